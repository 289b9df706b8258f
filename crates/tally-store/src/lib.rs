//! # tally-store: Row Storage for Tally
//!
//! This crate provides access to the rows behind list screens (customers,
//! products), either held in memory or behind a REST collection.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Data Flow                                  │
//! │                                                                         │
//! │  CLI command (grid / remote delete / remote update)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tally-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   RowTable    │    │  Repositories  │    │ StoreConfig  │  │   │
//! │  │   │  (table.rs)   │───►│ Memory / Http  │◄───│ base URL     │  │   │
//! │  │   │ rows + grid   │    │                │    │ timeout      │  │   │
//! │  │   └───────────────┘    └───────┬────────┘    └──────────────┘  │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │                  REST API: GET/PUT/DELETE {base}/{id}                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - REST endpoint configuration
//! - [`error`] - Store error types
//! - [`repository`] - Repository trait and implementations
//! - [`table`] - Local rows kept in step with a repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_store::{HttpRepository, RowTable, StoreConfig};
//!
//! let repo = HttpRepository::<Customer>::new(StoreConfig::default())?;
//! let mut table = RowTable::load(repo).await?;
//! table.delete("USR-010").await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod repository;
pub mod table;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{StoreConfig, DEFAULT_API_URL};
pub use error::{StoreError, StoreResult};
pub use repository::{Entity, HttpRepository, MemoryRepository, Repository};
pub use table::RowTable;
