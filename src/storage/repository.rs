use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use crate::domain::{CategoryTotal, Expense, ExpensePatch, NewExpense};

use super::MIGRATION_001_INITIAL;

const EXPENSE_COLUMNS: &str = "id, date, amount, category, subcategory, note";

/// Repository for persisting and querying expenses.
#[derive(Debug)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations. Safe to run repeatedly: the schema statement
    /// is a no-op when the table already exists.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize a database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Verify the store is writable by inserting a row inside a rolled-back
    /// transaction. The rollback also reverts the AUTOINCREMENT counter, so
    /// the probe never consumes an id. Permission problems surface here, at
    /// startup, instead of on the first real write.
    pub async fn probe_writable(&self) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin write probe transaction")?;

        sqlx::query("INSERT INTO expenses (date, amount, category) VALUES ('1970-01-01', 0.0, 'probe')")
            .execute(&mut *tx)
            .await
            .context("Database is not writable")?;

        tx.rollback()
            .await
            .context("Failed to roll back write probe")?;

        Ok(())
    }

    /// Insert a new expense and return the id assigned by the store.
    pub async fn insert_expense(&self, expense: &NewExpense) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (date, amount, category, subcategory, note)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&expense.date)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(&expense.subcategory)
        .bind(&expense.note)
        .execute(&self.pool)
        .await
        .context("Failed to insert expense")?;

        Ok(result.last_insert_rowid())
    }

    /// List all expenses, date ascending, ties broken by insertion order.
    pub async fn list_all(&self) -> Result<Vec<Expense>> {
        let query = format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY date ASC, id ASC"
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list expenses")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// List expenses whose date lies in the closed interval
    /// `[start_date, end_date]`, inclusive on both ends.
    pub async fn list_by_date_range(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Expense>> {
        let query = format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE date BETWEEN ? AND ? ORDER BY date ASC, id ASC"
        );

        let rows = sqlx::query(&query)
            .bind(start_date)
            .bind(end_date)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list expenses by date range")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// Sum amounts per category within a date range, optionally narrowed to
    /// a single category. The optional predicate is appended to the same
    /// statement shape before grouping, so both branches share the grouping
    /// logic and result schema.
    pub async fn summarize(
        &self,
        start_date: &str,
        end_date: &str,
        category: Option<&str>,
    ) -> Result<Vec<CategoryTotal>> {
        let mut query = String::from(
            "SELECT category, SUM(amount) AS total_amount FROM expenses WHERE date BETWEEN ? AND ?",
        );

        if category.is_some() {
            query.push_str(" AND category = ?");
        }

        query.push_str(" GROUP BY category ORDER BY category ASC");

        let mut sql_query = sqlx::query(&query).bind(start_date).bind(end_date);
        if let Some(cat) = category {
            sql_query = sql_query.bind(cat);
        }

        let rows = sql_query
            .fetch_all(&self.pool)
            .await
            .context("Failed to summarize expenses")?;

        Ok(rows
            .iter()
            .map(|row| CategoryTotal {
                category: row.get("category"),
                total_amount: row.get("total_amount"),
            })
            .collect())
    }

    /// Apply a partial patch to one expense, scoped by id. Builds the SET
    /// list from the present fields only, binding in the fixed field order
    /// date, amount, category, subcategory, note. Returns the number of rows
    /// affected; the caller guarantees a non-empty patch.
    pub async fn update_expense(&self, id: i64, patch: &ExpensePatch) -> Result<u64> {
        let mut assignments = Vec::new();
        if patch.date.is_some() {
            assignments.push("date = ?");
        }
        if patch.amount.is_some() {
            assignments.push("amount = ?");
        }
        if patch.category.is_some() {
            assignments.push("category = ?");
        }
        if patch.subcategory.is_some() {
            assignments.push("subcategory = ?");
        }
        if patch.note.is_some() {
            assignments.push("note = ?");
        }

        let query = format!(
            "UPDATE expenses SET {} WHERE id = ?",
            assignments.join(", ")
        );

        // Bind in the same order the assignments were pushed
        let mut sql_query = sqlx::query(&query);
        if let Some(ref date) = patch.date {
            sql_query = sql_query.bind(date);
        }
        if let Some(amount) = patch.amount {
            sql_query = sql_query.bind(amount);
        }
        if let Some(ref category) = patch.category {
            sql_query = sql_query.bind(category);
        }
        if let Some(ref subcategory) = patch.subcategory {
            sql_query = sql_query.bind(subcategory);
        }
        if let Some(ref note) = patch.note {
            sql_query = sql_query.bind(note);
        }
        sql_query = sql_query.bind(id);

        let result = sql_query
            .execute(&self.pool)
            .await
            .context("Failed to update expense")?;

        Ok(result.rows_affected())
    }

    /// Delete one expense by id. Returns the number of rows affected.
    pub async fn delete_by_id(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete expense")?;

        Ok(result.rows_affected())
    }

    /// Delete one expense by id, requiring the category to match too.
    pub async fn delete_by_id_and_category(&self, id: i64, category: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ? AND category = ?")
            .bind(id)
            .bind(category)
            .execute(&self.pool)
            .await
            .context("Failed to delete expense by id and category")?;

        Ok(result.rows_affected())
    }

    /// Delete all expenses in a category. Zero matches is a valid outcome.
    pub async fn delete_by_category(&self, category: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM expenses WHERE category = ?")
            .bind(category)
            .execute(&self.pool)
            .await
            .context("Failed to delete expenses by category")?;

        Ok(result.rows_affected())
    }

    /// Delete every expense, unconditionally.
    pub async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM expenses")
            .execute(&self.pool)
            .await
            .context("Failed to delete all expenses")?;

        Ok(result.rows_affected())
    }

    fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Result<Expense> {
        Ok(Expense {
            id: row.get("id"),
            date: row.get("date"),
            amount: row.get("amount"),
            category: row.get("category"),
            subcategory: row.get("subcategory"),
            note: row.get("note"),
        })
    }
}
