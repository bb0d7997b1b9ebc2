use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::str::FromStr;

use shared::domain::{LowerThird, LowerThirdId};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        let storage = Self { pool };
        storage.ensure_schema().await?;
        Ok(storage)
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS lower_thirds (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                top_text      TEXT NOT NULL DEFAULT '',
                bottom_text   TEXT NOT NULL DEFAULT '',
                display_order INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to ensure lower_thirds table exists")?;
        Ok(())
    }

    /// Inserts the record and writes the assigned id back into it. A zero
    /// display_order means "append": the record lands after everything
    /// currently in the rotation.
    pub async fn create_lower_third(&self, lower_third: &mut LowerThird) -> Result<()> {
        if lower_third.display_order == 0 {
            lower_third.display_order = self.next_display_order().await?;
        }
        let rec = sqlx::query(
            "INSERT INTO lower_thirds (top_text, bottom_text, display_order)
             VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&lower_third.top_text)
        .bind(&lower_third.bottom_text)
        .bind(lower_third.display_order)
        .fetch_one(&self.pool)
        .await?;
        lower_third.id = LowerThirdId(rec.get::<i64, _>(0));
        Ok(())
    }

    pub async fn lower_third_by_id(&self, id: LowerThirdId) -> Result<Option<LowerThird>> {
        let row = sqlx::query(
            "SELECT id, top_text, bottom_text, display_order FROM lower_thirds WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(lower_third_from_row))
    }

    pub async fn all_lower_thirds(&self) -> Result<Vec<LowerThird>> {
        let rows = sqlx::query(
            "SELECT id, top_text, bottom_text, display_order FROM lower_thirds
             ORDER BY display_order",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(lower_third_from_row).collect())
    }

    /// Full-row replace by id; there is no partial update.
    pub async fn save_lower_third(&self, lower_third: &LowerThird) -> Result<()> {
        sqlx::query(
            "UPDATE lower_thirds SET top_text = ?, bottom_text = ?, display_order = ?
             WHERE id = ?",
        )
        .bind(&lower_third.top_text)
        .bind(&lower_third.bottom_text)
        .bind(lower_third.display_order)
        .bind(lower_third.id.0)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Deleting an id that was never stored (or already deleted) is a no-op.
    pub async fn delete_lower_third(&self, id: LowerThirdId) -> Result<()> {
        sqlx::query("DELETE FROM lower_thirds WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn next_display_order(&self) -> Result<i64> {
        let max: Option<i64> = sqlx::query_scalar("SELECT MAX(display_order) FROM lower_thirds")
            .fetch_one(&self.pool)
            .await?;
        Ok(max.unwrap_or(0) + 1)
    }
}

fn lower_third_from_row(row: SqliteRow) -> LowerThird {
    LowerThird {
        id: LowerThirdId(row.get(0)),
        top_text: row.get(1),
        bottom_text: row.get(2),
        display_order: row.get(3),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
