//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random test data
//! that maintains required invariants.

use proptest::prelude::*;

/// Strategy for generating facility names.
pub fn facility_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][a-z]{2,8} (Hotel|Lodge|Resort|Inn)").expect("Invalid regex")
}

/// Strategy for generating customer names.
pub fn customer_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][a-z]{2,10} [A-Z][a-z]{2,10}").expect("Invalid regex")
}

/// Strategy for generating contact strings.
pub fn contact_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{3,10}@example\\.(com|net|org)").expect("Invalid regex")
}

/// Strategy for generating facility capacities.
pub fn capacity_strategy() -> impl Strategy<Value = u32> {
    1u32..=50
}

/// A single operation against the booking ledger.
#[derive(Debug, Clone)]
pub enum LedgerOp {
    /// Book a room at one of the known facilities.
    Book {
        /// Customer id to record on the booking.
        customer_id: u64,
        /// Index into the facility list, taken modulo its length.
        facility_slot: usize,
    },
    /// Cancel the oldest live booking, if any.
    CancelOldest,
}

/// Strategy for generating ledger operations.
///
/// Books more often than it cancels so generated runs actually fill
/// facilities up.
pub fn ledger_op_strategy() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        3 => (1u64..100, any::<usize>()).prop_map(|(customer_id, facility_slot)| {
            LedgerOp::Book {
                customer_id,
                facility_slot,
            }
        }),
        2 => Just(LedgerOp::CancelOldest),
    ]
}

/// Strategy for generating a sequence of ledger operations.
pub fn op_sequence_strategy(min_ops: usize, max_ops: usize) -> impl Strategy<Value = Vec<LedgerOp>> {
    prop::collection::vec(ledger_op_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
