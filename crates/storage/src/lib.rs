use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::{domain::InventoryItem, error::StoreError};

/// Handle to the inventory collection: one row per item, keyed by name.
///
/// Every method is a single passthrough call; the store keeps no cache and
/// never retries. Callers refetch the full list after each mutation.
#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    /// Opens (creating if missing) the inventory database at `database_url`
    /// and runs the embedded migrations. Any setup failure maps to
    /// [`StoreError::Unavailable`].
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        ensure_sqlite_parent_dir_exists(database_url)
            .map_err(|err| StoreError::unavailable(format!("{err:#}")))?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .map_err(|err| StoreError::unavailable(err.to_string()))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await
            .map_err(|err| StoreError::unavailable(err.to_string()))?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|err| StoreError::unavailable(err.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|err| StoreError::unavailable(format!("sqlite ping failed: {err}")))?;
        Ok(())
    }

    /// Every item in the collection, in database iteration order. Order is
    /// not part of the contract.
    pub async fn list_all(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let rows = sqlx::query("SELECT name, quantity, cost FROM inventory")
            .fetch_all(&self.pool)
            .await
            .map_err(|err| StoreError::operation("list_all", err.to_string()))?;
        Ok(rows
            .into_iter()
            .map(|r| InventoryItem {
                name: r.get::<String, _>(0),
                quantity: r.get::<i64, _>(1) as u32,
                cost: r.get::<f64, _>(2),
            })
            .collect())
    }

    pub async fn fetch(&self, name: &str) -> Result<Option<InventoryItem>, StoreError> {
        let row = sqlx::query("SELECT name, quantity, cost FROM inventory WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StoreError::operation("fetch", err.to_string()))?;
        Ok(row.map(|r| InventoryItem {
            name: r.get::<String, _>(0),
            quantity: r.get::<i64, _>(1) as u32,
            cost: r.get::<f64, _>(2),
        }))
    }

    /// Creates the item, or, if one with the same name exists, adds the new
    /// quantity to the stored quantity and overwrites the cost with the new
    /// value. The cost is overwritten, not summed. A single atomic statement,
    /// so concurrent upserts of one key lose no increment.
    pub async fn upsert(&self, name: &str, quantity: u32, cost: f64) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO inventory (name, quantity, cost) VALUES (?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET
                quantity = quantity + excluded.quantity,
                cost = excluded.cost",
        )
        .bind(name)
        .bind(quantity as i64)
        .bind(cost)
        .execute(&self.pool)
        .await
        .map_err(|err| StoreError::operation("upsert", err.to_string()))?;
        Ok(())
    }

    /// Unconditionally overwrites both fields, creating the item if absent.
    pub async fn replace(&self, name: &str, quantity: u32, cost: f64) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO inventory (name, quantity, cost) VALUES (?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET
                quantity = excluded.quantity,
                cost = excluded.cost",
        )
        .bind(name)
        .bind(quantity as i64)
        .bind(cost)
        .execute(&self.pool)
        .await
        .map_err(|err| StoreError::operation("replace", err.to_string()))?;
        Ok(())
    }

    /// Deletes the item by name. Deleting an absent name succeeds.
    pub async fn remove(&self, name: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM inventory WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::operation("remove", err.to_string()))?;
        Ok(())
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
