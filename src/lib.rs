//! Tiny persistent key-value store backed by a single JSON file.
//!
//! Every operation reads the whole file, mutates one key, and atomically
//! writes the whole file back. There is no in-memory cache and no
//! background work; the file is the database.
//!
//! ```rust,no_run
//! use vedudb::Store;
//!
//! let db = Store::open("db.json").unwrap();
//! db.set("hello", "world").unwrap();
//! assert_eq!(db.fetch("hello").unwrap().unwrap(), "world");
//! ```
//!
//! **Single-process only.** Mutations from threads of one process are
//! serialized by a per-store lock, but if multiple processes open the same
//! file they will clobber each other. Use advisory file locking or a real
//! database for multi-process access.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod persist;
pub mod serializer;
pub mod store;

pub use error::{Error, Result};
pub use store::{Store, StoreBuilder};

/// The on-disk document: one JSON object, keys in insertion order.
pub type Document = serde_json::Map<String, serde_json::Value>;
