//! # LodgeDB Storage
//!
//! Store backend trait and implementations for LodgeDB.
//!
//! This crate provides the lowest-level storage abstraction for LodgeDB.
//! Store backends are **opaque byte stores** keyed by name - they do not
//! interpret the data they store.
//!
//! ## Design Principles
//!
//! - Backends are simple named byte stores (read, write)
//! - Every write replaces the named store as a whole
//! - No knowledge of LodgeDB record shapes or collections
//! - Must be `Send + Sync` for concurrent access
//! - LodgeDB owns all content interpretation
//!
//! ## Available Backends
//!
//! - [`MemoryBackend`] - For testing and ephemeral storage
//! - [`DirBackend`] - One file per store under a directory
//!
//! On top of the byte stores, [`load_documents`] and [`save_documents`]
//! read and write a store as a JSON array of documents, reporting missing,
//! corrupted, and unreadable stores as distinct outcomes.
//!
//! ## Example
//!
//! ```rust
//! use lodgedb_storage::{MemoryBackend, StoreBackend};
//!
//! let backend = MemoryBackend::new();
//! backend.write("greeting", b"hello world").unwrap();
//! let data = backend.read("greeting").unwrap();
//! assert_eq!(data.as_deref(), Some(&b"hello world"[..]));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod dir;
mod document;
mod error;
mod memory;

pub use backend::StoreBackend;
pub use dir::DirBackend;
pub use document::{load_documents, save_documents};
pub use error::{StorageError, StoreResult};
pub use memory::MemoryBackend;
