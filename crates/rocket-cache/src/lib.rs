//! Local key-value persistence for RocketCart.
//!
//! Plays the role browser local storage plays for a web storefront: a
//! synchronous string store addressed by fixed keys, with a typed wrapper
//! doing the JSON encoding.
//!
//! # Example
//!
//! ```rust
//! use rocket_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! cache.set("@RocketShoes:cart", &vec![1, 2, 3]).unwrap();
//! let ids: Option<Vec<u32>> = cache.get("@RocketShoes:cart").unwrap();
//! assert_eq!(ids, Some(vec![1, 2, 3]));
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
