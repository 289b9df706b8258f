//! # Memory Repository
//!
//! Rows held in insertion order behind a `tokio::sync::RwLock`.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Entity, Repository};
use crate::error::{StoreError, StoreResult};

/// In-memory repository.
///
/// ## Usage
/// ```rust,ignore
/// let repo = MemoryRepository::with_rows(customers);
///
/// repo.delete("USR-010").await?;
/// let left = repo.list().await?;
/// ```
#[derive(Debug)]
pub struct MemoryRepository<T> {
    rows: RwLock<Vec<T>>,
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryRepository<T> {
    pub fn new() -> Self {
        MemoryRepository {
            rows: RwLock::new(Vec::new()),
        }
    }

    pub fn with_rows(rows: Vec<T>) -> Self {
        MemoryRepository {
            rows: RwLock::new(rows),
        }
    }

    /// Appends a row, or replaces the row with the same id in place.
    pub async fn insert(&self, row: T) {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|r| r.id() == row.id()) {
            Some(existing) => *existing = row,
            None => rows.push(row),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn get(&self, id: &str) -> StoreResult<Option<T>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.id() == id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<T>> {
        Ok(self.rows.read().await.clone())
    }

    async fn update(&self, row: &T) -> StoreResult<T> {
        let mut rows = self.rows.write().await;
        let existing = rows
            .iter_mut()
            .find(|r| r.id() == row.id())
            .ok_or_else(|| StoreError::not_found(T::KIND, row.id()))?;

        *existing = row.clone();
        debug!(kind = T::KIND, id = %row.id(), "Updated row");
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(T::KIND, id))?;

        rows.remove(index);
        debug!(kind = T::KIND, id = %id, "Deleted row");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::Product;

    fn product(id: &str, name: &str) -> Product {
        let mut product = Product::new(name);
        product.id = id.to_string();
        product
    }

    fn repo() -> MemoryRepository<Product> {
        MemoryRepository::with_rows(vec![
            product("p1", "Arroz"),
            product("p2", "Feijão"),
            product("p3", "Café"),
        ])
    }

    #[tokio::test]
    async fn test_get_and_list_keep_order() {
        let repo = repo();
        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Arroz", "Feijão", "Café"]);

        assert_eq!(repo.get("p2").await.unwrap().unwrap().name, "Feijão");
        assert!(repo.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let repo = repo();
        let mut edited = product("p2", "Feijão Preto");
        edited.stock_quantity = 12;

        let stored = repo.update(&edited).await.unwrap();
        assert_eq!(stored, edited);

        let rows = repo.list().await.unwrap();
        assert_eq!(rows[1].name, "Feijão Preto");
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = repo();
        let err = repo.update(&product("p9", "Açúcar")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(repo.len().await, 3);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo();
        repo.delete("p1").await.unwrap();
        assert_eq!(repo.len().await, 2);
        assert!(repo.get("p1").await.unwrap().is_none());

        let err = repo.delete("p1").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_insert_upserts() {
        let repo: MemoryRepository<Product> = MemoryRepository::new();
        assert!(repo.is_empty().await);

        repo.insert(product("p1", "Arroz")).await;
        repo.insert(product("p2", "Feijão")).await;
        repo.insert(product("p1", "Arroz Integral")).await;

        let rows = repo.list().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Arroz Integral");
    }
}
