//! # Repository Module
//!
//! Row access behind one async interface.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  RowTable / CLI                                                        │
//! │       │                                                                 │
//! │       │  repo.delete("USR-010").await                                  │
//! │       ▼                                                                 │
//! │  Repository<T>                                                         │
//! │  ├── get(&self, id)                                                    │
//! │  ├── list(&self)                                                       │
//! │  ├── update(&self, row)                                                │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       ├──► MemoryRepository  (RwLock<Vec<T>>, tests and local files)  │
//! │       └──► HttpRepository    (GET / PUT / DELETE {base}/{id})         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`MemoryRepository`] - Insertion-ordered rows in memory
//! - [`HttpRepository`] - REST collection over reqwest

pub mod http;
pub mod memory;

pub use http::HttpRepository;
pub use memory::MemoryRepository;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreResult;
use tally_core::{Customer, Product};

/// A row with a stable identifier.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Name used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> &str;
}

impl Entity for Customer {
    const KIND: &'static str = "Customer";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Product {
    const KIND: &'static str = "Product";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Async access to a collection of rows.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// `None` when no row has this id.
    async fn get(&self, id: &str) -> StoreResult<Option<T>>;

    async fn list(&self) -> StoreResult<Vec<T>>;

    /// Replaces the row with the same id and returns the stored version.
    async fn update(&self, row: &T) -> StoreResult<T>;

    async fn delete(&self, id: &str) -> StoreResult<()>;
}
