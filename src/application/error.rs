use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Expense not found: {0}")]
    ExpenseNotFound(i64),

    #[error("Expense not found: {id} in category '{category}'")]
    ExpenseNotFoundInCategory { id: i64, category: String },

    #[error("No fields to update")]
    NoFieldsToUpdate,

    #[error("Database is read-only: {0}. Check write permissions on the ledger file and its directory")]
    ReadOnlyDatabase(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
