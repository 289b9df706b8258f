//! # Row Table
//!
//! The rows a list screen shows, kept in step with a repository.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  delete(id) / save_edit(row)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  repository.delete / repository.update   (remote first)                │
//! │       │                                                                 │
//! │       ├── Ok  ──► apply to local rows ──► true                         │
//! │       │                                                                 │
//! │       └── Err ──► tracing::error!, local rows untouched ──► false      │
//! │                                                                         │
//! │  No retry. The operator sees the row unchanged and can try again.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::marker::PhantomData;
use tracing::{debug, error};

use tally_core::grid::{Filterable, GridPage, GridState};

use crate::error::StoreResult;
use crate::repository::{Entity, Repository};

/// Local rows plus grid state, backed by a repository.
///
/// ## Usage
/// ```rust,ignore
/// let mut table = RowTable::load(HttpRepository::new(config)?).await?;
/// table.grid_mut().set_filter("name", "silva");
///
/// if !table.delete("USR-010").await {
///     eprintln!("delete failed, see log");
/// }
/// ```
#[derive(Debug)]
pub struct RowTable<T, R> {
    repository: R,
    rows: Vec<T>,
    grid: GridState,
    _marker: PhantomData<fn() -> T>,
}

impl<T, R> RowTable<T, R>
where
    T: Entity + Filterable,
    R: Repository<T>,
{
    /// Starts from rows already in hand.
    pub fn new(repository: R, rows: Vec<T>) -> Self {
        RowTable {
            repository,
            rows,
            grid: GridState::new(),
            _marker: PhantomData,
        }
    }

    /// Starts from whatever the repository lists.
    pub async fn load(repository: R) -> StoreResult<Self> {
        let rows = repository.list().await?;
        debug!(kind = T::KIND, count = rows.len(), "Loaded rows");
        Ok(Self::new(repository, rows))
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridState {
        &mut self.grid
    }

    /// The current page under the current filters.
    pub fn view(&self) -> GridPage<'_, T> {
        self.grid.view(&self.rows)
    }

    /// Deletes remotely, then locally. Returns whether the row was removed.
    pub async fn delete(&mut self, id: &str) -> bool {
        match self.repository.delete(id).await {
            Ok(()) => {
                self.rows.retain(|row| row.id() != id);
                debug!(kind = T::KIND, id = %id, "Row deleted");
                true
            }
            Err(err) => {
                error!(kind = T::KIND, id = %id, error = %err, "Failed to delete row");
                false
            }
        }
    }

    /// Saves an edited row remotely, then replaces the local copy.
    ///
    /// Rows the table does not hold are never added. Returns whether the
    /// repository accepted the edit.
    pub async fn save_edit(&mut self, row: T) -> bool {
        match self.repository.update(&row).await {
            Ok(stored) => {
                let id = stored.id().to_string();
                if let Some(existing) = self.rows.iter_mut().find(|r| r.id() == id) {
                    *existing = stored;
                }
                debug!(kind = T::KIND, id = %id, "Row updated");
                true
            }
            Err(err) => {
                error!(kind = T::KIND, id = %row.id(), error = %err, "Failed to update row");
                false
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::repository::MemoryRepository;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tally_core::{Address, Customer};

    fn customer(id: &str, name: &str, city: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@exemplo.com", id.to_lowercase()),
            phone: String::new(),
            avatar: String::new(),
            address: Address {
                city: city.to_string(),
                ..Address::default()
            },
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn customers() -> Vec<Customer> {
        vec![
            customer("USR-010", "Carlos Silva", "São Paulo"),
            customer("USR-009", "Ana Souza", "Rio de Janeiro"),
            customer("USR-008", "Fernando Oliveira", "Belo Horizonte"),
        ]
    }

    /// A repository whose writes always fail, counting the attempts.
    #[derive(Default)]
    struct FailingRepository {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl Repository<Customer> for FailingRepository {
        async fn get(&self, _id: &str) -> StoreResult<Option<Customer>> {
            Ok(None)
        }

        async fn list(&self) -> StoreResult<Vec<Customer>> {
            Ok(customers())
        }

        async fn update(&self, _row: &Customer) -> StoreResult<Customer> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::status("PUT", "http://localhost:3000/api/x", 503))
        }

        async fn delete(&self, _id: &str) -> StoreResult<()> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::status("DELETE", "http://localhost:3000/api/x", 503))
        }
    }

    #[tokio::test]
    async fn test_delete_success_removes_locally_and_remotely() {
        let mut table = RowTable::load(MemoryRepository::with_rows(customers()))
            .await
            .unwrap();

        assert!(table.delete("USR-009").await);
        assert_eq!(table.rows().len(), 2);
        assert!(table.rows().iter().all(|c| c.id != "USR-009"));
        assert!(table.repository().get("USR-009").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_rows_unchanged() {
        let repo = FailingRepository::default();
        let mut table = RowTable::load(repo).await.unwrap();
        let before = table.rows().to_vec();

        assert!(!table.delete("USR-009").await);
        assert_eq!(table.rows(), before.as_slice());
        // no retry
        assert_eq!(table.repository().attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_save_edit_success_replaces_row() {
        let mut table = RowTable::new(MemoryRepository::with_rows(customers()), customers());
        let mut edited = table.rows()[0].clone();
        edited.name = "Carlos Silva Neto".to_string();

        assert!(table.save_edit(edited.clone()).await);
        assert_eq!(table.rows()[0], edited);
        assert_eq!(table.rows().len(), 3);
    }

    #[tokio::test]
    async fn test_save_edit_failure_leaves_rows_unchanged() {
        let mut table = RowTable::new(FailingRepository::default(), customers());
        let mut edited = table.rows()[1].clone();
        edited.name = "Ana Souza Lima".to_string();

        assert!(!table.save_edit(edited).await);
        assert_eq!(table.rows()[1].name, "Ana Souza");
        assert_eq!(table.repository().attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_save_edit_of_missing_row_fails_in_memory() {
        let mut table = RowTable::new(MemoryRepository::with_rows(customers()), customers());

        assert!(!table.save_edit(customer("USR-999", "Nobody", "Nowhere")).await);
        assert_eq!(table.rows().len(), 3);
    }

    #[tokio::test]
    async fn test_save_edit_never_adds_rows_missing_locally() {
        let mut table = RowTable::new(MemoryRepository::with_rows(customers()), Vec::new());
        let mut edited = customers()[2].clone();
        edited.name = "Fernando Oliveira Costa".to_string();

        assert!(table.save_edit(edited.clone()).await);
        assert!(table.rows().is_empty());
        assert_eq!(
            table.repository().get("USR-008").await.unwrap(),
            Some(edited)
        );
    }

    #[tokio::test]
    async fn test_view_uses_grid_state() {
        let mut table = RowTable::new(MemoryRepository::with_rows(customers()), customers());
        table.grid_mut().set_filter("location", "rio");

        let page = table.view();
        assert_eq!(page.total_matches, 1);
        assert_eq!(page.rows[0].name, "Ana Souza");
    }
}
