//! Structured payload shaping for the ledger operations.
//!
//! Every function here returns a `serde_json::Value` and never an error:
//! success payloads carry the requested data, and every failure path is
//! converted to `{"status": "error", "message": ...}` before crossing this
//! boundary. The one exception to that rule lives in
//! [`LedgerService::open`], which is allowed to abort startup.

use serde_json::{Value, json};
use std::fmt::Display;

use crate::domain::{ExpensePatch, NewExpense};

use super::{CategoryProvider, LedgerService};

fn error_payload(message: impl Display) -> Value {
    json!({ "status": "error", "message": message.to_string() })
}

fn records_payload<T: serde::Serialize>(records: Vec<T>) -> Value {
    serde_json::to_value(records).unwrap_or_else(|err| error_payload(err))
}

/// Add a new expense. Success: `{"status": "ok", "id": N}`.
pub async fn add_expense(service: &LedgerService, expense: NewExpense) -> Value {
    match service.add_expense(expense).await {
        Ok(id) => json!({ "status": "ok", "id": id }),
        Err(err) => error_payload(err),
    }
}

/// List every expense as an array of records.
pub async fn list_all(service: &LedgerService) -> Value {
    match service.list_all().await {
        Ok(expenses) => records_payload(expenses),
        Err(err) => error_payload(err),
    }
}

/// List expenses within an inclusive date range.
pub async fn list_by_date_range(service: &LedgerService, start_date: &str, end_date: &str) -> Value {
    match service.list_by_date_range(start_date, end_date).await {
        Ok(expenses) => records_payload(expenses),
        Err(err) => error_payload(err),
    }
}

/// Summarize per-category totals as an array of
/// `{"category": ..., "total_amount": ...}` rows.
pub async fn summarize(
    service: &LedgerService,
    start_date: &str,
    end_date: &str,
    category: Option<&str>,
) -> Value {
    match service.summarize(start_date, end_date, category).await {
        Ok(totals) => records_payload(totals),
        Err(err) => error_payload(err),
    }
}

/// Apply a partial patch to one expense.
pub async fn update_expense(service: &LedgerService, id: i64, patch: ExpensePatch) -> Value {
    match service.update_expense(id, patch).await {
        Ok(()) => json!({ "status": "ok", "message": format!("Expense {id} updated") }),
        Err(err) => error_payload(err),
    }
}

/// Delete one expense by id.
pub async fn delete_expense(service: &LedgerService, id: i64) -> Value {
    match service.delete_expense(id).await {
        Ok(deleted) => json!({ "status": "ok", "deleted": deleted }),
        Err(err) => error_payload(err),
    }
}

/// Delete one expense by id, requiring the category to match.
pub async fn delete_expense_in_category(
    service: &LedgerService,
    id: i64,
    category: &str,
) -> Value {
    match service.delete_expense_in_category(id, category).await {
        Ok(deleted) => json!({ "status": "ok", "deleted": deleted }),
        Err(err) => error_payload(err),
    }
}

/// Delete every expense in a category; zero matches still succeeds.
pub async fn delete_by_category(service: &LedgerService, category: &str) -> Value {
    match service.delete_by_category(category).await {
        Ok(deleted) => json!({ "status": "ok", "deleted": deleted }),
        Err(err) => error_payload(err),
    }
}

/// Delete every expense, reporting the count removed.
pub async fn delete_all(service: &LedgerService) -> Value {
    match service.delete_all().await {
        Ok(deleted) => json!({ "status": "ok", "deleted": deleted }),
        Err(err) => error_payload(err),
    }
}

/// Serve the category taxonomy. A missing taxonomy file falls back to the
/// built-in list inside the provider; only unexpected I/O failures become
/// error payloads.
///
/// The payload is always well-formed JSON: taxonomy text that parses as JSON
/// is embedded structurally, anything else is carried verbatim as a JSON
/// string. Callers who want the raw bytes unwrapped should read the provider
/// directly.
pub fn categories(provider: &CategoryProvider) -> Value {
    match provider.load() {
        Ok(text) => serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text)),
        Err(err) => error_payload(format!("{err:#}")),
    }
}
