//! # Remote Commands
//!
//! `tally remote get | delete | update` against the REST collection at
//! `TALLY_API_URL`.
//!
//! Mutations go through [`RowTable`], so they behave like the list screens:
//! a failed request is logged and nothing changes. The command then exits
//! with an error.

use anyhow::{bail, Context};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use tracing::info;

use tally_core::grid::Filterable;
use tally_core::validation::{validate_customer, validate_product};
use tally_core::{Customer, Product};
use tally_store::{Entity, HttpRepository, Repository, RowTable};

use super::RowKind;
use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct RemoteArgs {
    #[command(subcommand)]
    pub action: RemoteAction,
}

#[derive(Debug, Subcommand)]
pub enum RemoteAction {
    /// Fetch one row and print it as JSON
    Get {
        id: String,
        #[arg(long, value_enum, default_value_t = RowKind::Customers)]
        kind: RowKind,
    },
    /// Delete one row
    Delete {
        id: String,
        #[arg(long, value_enum, default_value_t = RowKind::Customers)]
        kind: RowKind,
    },
    /// Save an edited row read from a JSON file
    Update {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = RowKind::Customers)]
        kind: RowKind,
    },
}

pub async fn remote(args: &RemoteArgs, config: &AppConfig) -> anyhow::Result<String> {
    match &args.action {
        RemoteAction::Get { id, kind } => match kind {
            RowKind::Customers => get::<Customer>(id, config).await,
            RowKind::Products => get::<Product>(id, config).await,
        },
        RemoteAction::Delete { id, kind } => match kind {
            RowKind::Customers => delete::<Customer>(id, config).await,
            RowKind::Products => delete::<Product>(id, config).await,
        },
        RemoteAction::Update { file, kind } => {
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            match kind {
                RowKind::Customers => {
                    let row: Customer = serde_json::from_str(&raw).context("Invalid customer")?;
                    validate_customer(&row)?;
                    update(row, config).await
                }
                RowKind::Products => {
                    let row: Product = serde_json::from_str(&raw).context("Invalid product")?;
                    validate_product(&row)?;
                    update(row, config).await
                }
            }
        }
    }
}

async fn get<T: Entity>(id: &str, config: &AppConfig) -> anyhow::Result<String> {
    let repo: HttpRepository<T> = HttpRepository::new(config.store_config())?;
    match repo.get(id).await? {
        Some(row) => Ok(serde_json::to_string_pretty(&row)?),
        None => bail!("{} {} not found", T::KIND, id),
    }
}

async fn delete<T>(id: &str, config: &AppConfig) -> anyhow::Result<String>
where
    T: Entity + Filterable,
{
    let repo: HttpRepository<T> = HttpRepository::new(config.store_config())?;
    let mut table = RowTable::new(repo, Vec::new());

    if !table.delete(id).await {
        bail!("Failed to delete {} {}; nothing was changed", T::KIND, id);
    }
    info!(kind = T::KIND, id = %id, "Deleted remotely");
    Ok(format!("Deleted {} {}", T::KIND, id))
}

async fn update<T>(row: T, config: &AppConfig) -> anyhow::Result<String>
where
    T: Entity + Filterable,
{
    let id = row.id().to_string();
    let repo: HttpRepository<T> = HttpRepository::new(config.store_config())?;
    let mut table = RowTable::new(repo, Vec::new());

    if !table.save_edit(row).await {
        bail!("Failed to update {} {}; nothing was changed", T::KIND, id);
    }
    info!(kind = T::KIND, id = %id, "Updated remotely");
    Ok(format!("Updated {} {}", T::KIND, id))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use std::time::Duration;

    /// Nothing listens on port 1.
    fn unreachable() -> AppConfig {
        AppConfig {
            api_url: "http://127.0.0.1:1/api".to_string(),
            http_timeout: Duration::from_secs(2),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_delete_failure_is_an_error() {
        let args = RemoteArgs {
            action: RemoteAction::Delete {
                id: "USR-010".to_string(),
                kind: RowKind::Customers,
            },
        };

        let err = remote(&args, &unreachable()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to delete Customer USR-010; nothing was changed"
        );
    }

    #[tokio::test]
    async fn test_update_failure_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"id":"USR-010","name":"Carlos Silva","email":"carlos@exemplo.com",
                "createdAt":"2024-05-01T12:00:00Z"}"#,
        )
        .unwrap();

        let args = RemoteArgs {
            action: RemoteAction::Update {
                file: file.path().to_path_buf(),
                kind: RowKind::Customers,
            },
        };

        let err = remote(&args, &unreachable()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to update Customer USR-010; nothing was changed"
        );
    }

    #[tokio::test]
    async fn test_update_validates_before_sending() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"id":"not-a-uuid","name":"Camiseta"}"#)
            .unwrap();

        let args = RemoteArgs {
            action: RemoteAction::Update {
                file: file.path().to_path_buf(),
                kind: RowKind::Products,
            },
        };

        let err = remote(&args, &unreachable()).await.unwrap_err();
        assert!(err.to_string().starts_with("id has invalid format"));
    }
}
