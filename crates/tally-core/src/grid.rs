//! # Grid Module
//!
//! Per-column text filtering and pagination for list screens.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rows ──► filter (every non-empty column filter must match) ──► slice │
//! │                                                                         │
//! │  filter:  column text contains needle, case-insensitive                │
//! │           missing column value → row rejected                          │
//! │  slice:   rows[page × per_page .. page × per_page + per_page]         │
//! │                                                                         │
//! │  Changing a filter or the page size jumps back to page 0.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::types::{Customer, Product};
use crate::validation::ValidationResult;
use crate::{DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS};

/// A row that exposes its columns as text for filtering.
pub trait Filterable {
    /// Text of `column`, or `None` when the row has no such column or value.
    fn filter_text(&self, column: &str) -> Option<String>;
}

impl Filterable for Customer {
    fn filter_text(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "email" => Some(self.email.clone()),
            "phone" => Some(self.phone.clone()),
            "location" | "address" => Some(self.location()),
            "createdAt" | "created_at" => Some(self.created_at.format("%d/%m/%Y").to_string()),
            _ => None,
        }
    }
}

impl Filterable for Product {
    fn filter_text(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "sku" => self.sku.clone(),
            "barcode" => self.barcode.clone(),
            "brand" => self.brand.clone(),
            "supplier" => self.supplier.clone(),
            "category" => self.category.clone(),
            "collection" => self.collection.clone(),
            _ => None,
        }
    }
}

// =============================================================================
// Grid State
// =============================================================================

/// Filters and pagination of one grid.
///
/// Deserializing checks `rows_per_page` the same way
/// [`GridState::set_rows_per_page`] does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridStateFields")]
pub struct GridState {
    filters: BTreeMap<String, String>,
    page: usize,
    rows_per_page: usize,
}

/// Unchecked wire form of [`GridState`].
#[derive(Deserialize)]
struct GridStateFields {
    filters: BTreeMap<String, String>,
    page: usize,
    rows_per_page: usize,
}

impl TryFrom<GridStateFields> for GridState {
    type Error = ValidationError;

    fn try_from(fields: GridStateFields) -> Result<Self, Self::Error> {
        let mut state = GridState {
            filters: fields.filters,
            ..GridState::default()
        };
        state.set_rows_per_page(fields.rows_per_page)?;
        state.page = fields.page;
        Ok(state)
    }
}

impl Default for GridState {
    fn default() -> Self {
        GridState {
            filters: BTreeMap::new(),
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

/// One page of filtered rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridPage<'a, T> {
    pub rows: Vec<&'a T>,
    /// Rows passing the filters, across all pages.
    pub total_matches: usize,
    pub page: usize,
    /// At least 1, even with no matches.
    pub page_count: usize,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Sets the filter for `column`; empty text clears it. Resets the page.
    pub fn set_filter(&mut self, column: impl Into<String>, text: impl Into<String>) {
        let column = column.into();
        let text = text.into();
        if text.is_empty() {
            self.filters.remove(&column);
        } else {
            self.filters.insert(column, text);
        }
        self.page = 0;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 0;
    }

    /// Moves to `page` (zero-based). Pages past the end are allowed and
    /// simply show nothing.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changes the page size to one of the offered options. Resets the page.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::grid::GridState;
    ///
    /// let mut grid = GridState::new();
    /// grid.set_page(3);
    /// grid.set_rows_per_page(10).unwrap();
    /// assert_eq!(grid.page(), 0);
    /// assert!(grid.set_rows_per_page(7).is_err());
    /// ```
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> ValidationResult<()> {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            return Err(ValidationError::NotAllowed {
                field: "rows_per_page".to_string(),
                allowed: ROWS_PER_PAGE_OPTIONS.iter().map(|n| n.to_string()).collect(),
            });
        }
        self.rows_per_page = rows_per_page;
        self.page = 0;
        Ok(())
    }

    /// Whether `row` passes every active filter.
    pub fn matches<T: Filterable>(&self, row: &T) -> bool {
        self.filters.iter().all(|(column, needle)| {
            row.filter_text(column)
                .map(|text| text.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false)
        })
    }

    /// All rows passing the filters, in their original order.
    pub fn filter<'a, T: Filterable>(&self, rows: &'a [T]) -> Vec<&'a T> {
        rows.iter().filter(|row| self.matches(*row)).collect()
    }

    /// Filters, then cuts out the current page.
    pub fn view<'a, T: Filterable>(&self, rows: &'a [T]) -> GridPage<'a, T> {
        let matched = self.filter(rows);
        let total_matches = matched.len();
        let per_page = self.rows_per_page.max(1);
        let page_count = total_matches.div_ceil(per_page).max(1);

        let rows = matched
            .into_iter()
            .skip(self.page.saturating_mul(per_page))
            .take(per_page)
            .collect();

        GridPage {
            rows,
            total_matches,
            page: self.page,
            page_count,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Address;
    use chrono::{TimeZone, Utc};

    fn customer(id: &str, name: &str, email: &str, city: &str, state: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: "(11) 98765-4321".to_string(),
            avatar: String::new(),
            address: Address {
                street: "Rua das Flores, 123".to_string(),
                city: city.to_string(),
                state: state.to_string(),
                country: "Brasil".to_string(),
            },
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap(),
        }
    }

    fn customers() -> Vec<Customer> {
        vec![
            customer("USR-010", "Carlos Silva", "carlos.silva@exemplo.com", "São Paulo", "SP"),
            customer("USR-009", "Ana Souza", "ana.souza@exemplo.com", "Rio de Janeiro", "RJ"),
            customer("USR-008", "Fernando Oliveira", "fernando@exemplo.com", "Belo Horizonte", "MG"),
            customer("USR-007", "Mariana Costa", "mariana.costa@exemplo.com", "Curitiba", "PR"),
            customer("USR-006", "Ricardo Lima", "ricardo.lima@exemplo.com", "Porto Alegre", "RS"),
            customer("USR-005", "Juliana Santos", "ju.santos@exemplo.com", "Salvador", "BA"),
            customer("USR-004", "Paulo Mendes", "paulo.mendes@exemplo.com", "Recife", "PE"),
        ]
    }

    #[test]
    fn test_defaults() {
        let grid = GridState::new();
        assert_eq!(grid.page(), 0);
        assert_eq!(grid.rows_per_page(), 5);
        assert!(grid.filters().is_empty());
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let rows = customers();
        let mut grid = GridState::new();
        grid.set_filter("name", "SOUZA");

        let matched = grid.filter(&rows);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "USR-009");
    }

    #[test]
    fn test_all_filters_must_match() {
        let rows = customers();
        let mut grid = GridState::new();
        grid.set_filter("name", "a");
        grid.set_filter("location", "rio");

        let ids: Vec<&str> = grid.filter(&rows).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["USR-009"]);
    }

    #[test]
    fn test_empty_filter_is_removed() {
        let rows = customers();
        let mut grid = GridState::new();
        grid.set_filter("email", "zzz");
        assert!(grid.filter(&rows).is_empty());

        grid.set_filter("email", "");
        assert_eq!(grid.filter(&rows).len(), rows.len());
    }

    #[test]
    fn test_missing_column_rejects_row() {
        let mut with_sku = Product::new("Arroz 5kg");
        with_sku.sku = Some("ARZ-5".to_string());
        let without_sku = Product::new("Feijão 1kg");
        let rows = vec![with_sku, without_sku];

        let mut grid = GridState::new();
        grid.set_filter("sku", "arz");
        let matched = grid.filter(&rows);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Arroz 5kg");

        grid.set_filter("sku", "");
        grid.set_filter("unknown_column", "x");
        assert!(grid.filter(&rows).is_empty());
    }

    #[test]
    fn test_pagination() {
        let rows = customers();
        let mut grid = GridState::new();

        let first = grid.view(&rows);
        assert_eq!(first.rows.len(), 5);
        assert_eq!(first.total_matches, 7);
        assert_eq!(first.page_count, 2);

        grid.set_page(1);
        let second = grid.view(&rows);
        assert_eq!(second.rows.len(), 2);
        assert_eq!(second.rows[0].id, "USR-005");

        grid.set_page(5);
        let past_end = grid.view(&rows);
        assert!(past_end.rows.is_empty());
        assert_eq!(past_end.total_matches, 7);
    }

    #[test]
    fn test_filter_and_page_size_reset_page() {
        let mut grid = GridState::new();
        grid.set_page(1);
        grid.set_filter("name", "a");
        assert_eq!(grid.page(), 0);

        grid.set_page(2);
        grid.set_rows_per_page(25).unwrap();
        assert_eq!(grid.page(), 0);
        assert_eq!(grid.rows_per_page(), 25);
    }

    #[test]
    fn test_rejects_unknown_page_size() {
        let mut grid = GridState::new();
        grid.set_page(1);
        let err = grid.set_rows_per_page(50).unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
        // state untouched
        assert_eq!(grid.rows_per_page(), 5);
        assert_eq!(grid.page(), 1);
    }

    #[test]
    fn test_deserialize_checks_page_size() {
        let err = serde_json::from_str::<GridState>(
            r#"{"filters":{},"page":0,"rows_per_page":0}"#,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("rows_per_page must be one of"));

        let grid: GridState = serde_json::from_str(
            r#"{"filters":{"name":"silva"},"page":2,"rows_per_page":10}"#,
        )
        .unwrap();
        assert_eq!(grid.rows_per_page(), 10);
        assert_eq!(grid.page(), 2);
        assert_eq!(grid.filters().get("name").map(String::as_str), Some("silva"));

        let round_trip: GridState =
            serde_json::from_str(&serde_json::to_string(&grid).unwrap()).unwrap();
        assert_eq!(round_trip, grid);
    }

    #[test]
    fn test_empty_rows_have_one_page() {
        let rows: Vec<Customer> = Vec::new();
        let page = GridState::new().view(&rows);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.total_matches, 0);
    }

    #[test]
    fn test_created_at_column() {
        let rows = customers();
        assert_eq!(
            rows[0].filter_text("createdAt").as_deref(),
            Some("15/03/2024")
        );
    }
}
