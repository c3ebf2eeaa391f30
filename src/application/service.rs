use crate::domain::{CategoryTotal, Expense, ExpensePatch, NewExpense};
use crate::storage::Repository;

use super::AppError;

/// Application service providing the expense ledger operations.
/// This is the primary interface for any client (CLI, facade, tests).
#[derive(Debug)]
pub struct LedgerService {
    repo: Repository,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Open the ledger at the given path: connect (creating the file if
    /// needed), ensure the schema exists, and verify the store is writable.
    /// This is the one operation allowed to fail fatally; a ledger that
    /// cannot persist must not appear to serve.
    pub async fn open(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{database_path}?mode=rwc");
        let repo = Repository::init(&db_url)
            .await
            .map_err(classify_backend_error)?;
        repo.probe_writable().await.map_err(classify_backend_error)?;
        Ok(Self::new(repo))
    }

    /// Record a new expense and return the id assigned by the store.
    /// Field content is stored verbatim; business-level validation (calendar
    /// dates, positive amounts) is deliberately out of scope.
    pub async fn add_expense(&self, expense: NewExpense) -> Result<i64, AppError> {
        Ok(self.repo.insert_expense(&expense).await?)
    }

    /// List every expense, date ascending, insertion order on ties.
    pub async fn list_all(&self) -> Result<Vec<Expense>, AppError> {
        Ok(self.repo.list_all().await?)
    }

    /// List expenses with `start_date <= date <= end_date`, both inclusive.
    /// An empty result is a valid outcome, not an error.
    pub async fn list_by_date_range(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Expense>, AppError> {
        Ok(self.repo.list_by_date_range(start_date, end_date).await?)
    }

    /// Sum amounts per category in the date range. With a category filter
    /// the result has at most one row, for that category only.
    pub async fn summarize(
        &self,
        start_date: &str,
        end_date: &str,
        category: Option<&str>,
    ) -> Result<Vec<CategoryTotal>, AppError> {
        Ok(self.repo.summarize(start_date, end_date, category).await?)
    }

    /// Apply a partial patch to one expense. An empty patch is rejected
    /// before storage is touched. Zero rows affected means the id does not
    /// exist; a patch whose values all equal the stored ones still affects
    /// one row and is success.
    pub async fn update_expense(&self, id: i64, patch: ExpensePatch) -> Result<(), AppError> {
        if patch.is_empty() {
            return Err(AppError::NoFieldsToUpdate);
        }

        let affected = self.repo.update_expense(id, &patch).await?;
        if affected == 0 {
            return Err(AppError::ExpenseNotFound(id));
        }
        Ok(())
    }

    /// Delete one expense by id. The id names a specific record, so zero
    /// rows affected is a not-found error.
    pub async fn delete_expense(&self, id: i64) -> Result<u64, AppError> {
        let affected = self.repo.delete_by_id(id).await?;
        if affected == 0 {
            return Err(AppError::ExpenseNotFound(id));
        }
        Ok(affected)
    }

    /// Delete one expense by id, requiring its category to match. Covers
    /// both "no such id" and "id exists but in another category" with the
    /// same not-found outcome.
    pub async fn delete_expense_in_category(
        &self,
        id: i64,
        category: &str,
    ) -> Result<u64, AppError> {
        let affected = self.repo.delete_by_id_and_category(id, category).await?;
        if affected == 0 {
            return Err(AppError::ExpenseNotFoundInCategory {
                id,
                category: category.to_string(),
            });
        }
        Ok(affected)
    }

    /// Delete every expense in a category. A blanket operation: zero matches
    /// is success with count 0.
    pub async fn delete_by_category(&self, category: &str) -> Result<u64, AppError> {
        Ok(self.repo.delete_by_category(category).await?)
    }

    /// Delete every expense, reporting how many were removed (possibly 0).
    pub async fn delete_all(&self) -> Result<u64, AppError> {
        Ok(self.repo.delete_all().await?)
    }
}

/// Distinguish read-only storage failures from generic backend errors so the
/// startup diagnostic points at file permissions when that is the cause.
fn classify_backend_error(err: anyhow::Error) -> AppError {
    let text = format!("{err:#}");
    let lowered = text.to_lowercase();
    if lowered.contains("readonly")
        || lowered.contains("read-only")
        || lowered.contains("permission denied")
    {
        AppError::ReadOnlyDatabase(text)
    } else {
        AppError::Database(err)
    }
}
