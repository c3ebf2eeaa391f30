// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use spesa::application::LedgerService;
use spesa::domain::NewExpense;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::open(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to record an expense with empty subcategory and note
pub async fn add(service: &LedgerService, date: &str, amount: f64, category: &str) -> Result<i64> {
    let id = service
        .add_expense(NewExpense::new(date, amount, category))
        .await?;
    Ok(id)
}
