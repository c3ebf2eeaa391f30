mod common;

use anyhow::Result;
use common::{add, test_service};
use spesa::application::{CategoryProvider, facade};
use spesa::domain::{ExpensePatch, NewExpense};

#[tokio::test]
async fn test_add_payload_carries_status_and_id() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let payload = facade::add_expense(&service, NewExpense::new("2024-01-05", 12.50, "Food")).await;

    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["id"], 1);
    assert!(payload.get("message").is_none());

    Ok(())
}

#[tokio::test]
async fn test_list_payload_is_an_array_of_records() -> Result<()> {
    let (service, _temp) = test_service().await?;

    add(&service, "2024-01-05", 12.50, "Food").await?;
    add(&service, "2024-01-01", 5.00, "Transport").await?;

    let payload = facade::list_all(&service).await;
    let records = payload.as_array().unwrap();

    assert_eq!(records.len(), 2);
    // Date ascending, so the Transport expense comes first
    assert_eq!(records[0]["category"], "Transport");
    assert_eq!(records[0]["id"], 2);
    assert_eq!(records[1]["note"], "");

    Ok(())
}

#[tokio::test]
async fn test_range_payload_respects_bounds() -> Result<()> {
    let (service, _temp) = test_service().await?;

    add(&service, "2024-01-05", 12.50, "Food").await?;
    add(&service, "2024-02-05", 4.00, "Food").await?;

    let payload = facade::list_by_date_range(&service, "2024-01-01", "2024-01-31").await;
    assert_eq!(payload.as_array().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_summarize_payload_shape() -> Result<()> {
    let (service, _temp) = test_service().await?;

    add(&service, "2024-01-05", 12.50, "Food").await?;
    add(&service, "2024-01-10", 5.00, "Food").await?;

    let payload = facade::summarize(&service, "2024-01-01", "2024-01-31", None).await;
    let rows = payload.as_array().unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["category"], "Food");
    assert_eq!(rows[0]["total_amount"], 17.50);

    Ok(())
}

#[tokio::test]
async fn test_empty_patch_becomes_error_payload() -> Result<()> {
    let (service, _temp) = test_service().await?;

    add(&service, "2024-01-05", 12.50, "Food").await?;

    let payload = facade::update_expense(&service, 1, ExpensePatch::default()).await;

    assert_eq!(payload["status"], "error");
    assert_eq!(payload["message"], "No fields to update");

    Ok(())
}

#[tokio::test]
async fn test_missing_id_becomes_error_payload_not_a_fault() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let update = facade::update_expense(&service, 7, ExpensePatch::default().with_amount(1.0)).await;
    assert_eq!(update["status"], "error");
    assert!(update["message"].as_str().unwrap().contains("not found"));

    let delete = facade::delete_expense(&service, 7).await;
    assert_eq!(delete["status"], "error");
    assert!(delete["message"].as_str().unwrap().contains("7"));

    Ok(())
}

#[tokio::test]
async fn test_delete_payloads_report_counts() -> Result<()> {
    let (service, _temp) = test_service().await?;

    add(&service, "2024-01-05", 12.50, "Food").await?;
    add(&service, "2024-01-10", 7.50, "Food").await?;

    let by_category = facade::delete_by_category(&service, "Food").await;
    assert_eq!(by_category["status"], "ok");
    assert_eq!(by_category["deleted"], 2);

    // Bulk delete of an empty table is still success
    let all = facade::delete_all(&service).await;
    assert_eq!(all["status"], "ok");
    assert_eq!(all["deleted"], 0);

    Ok(())
}

#[tokio::test]
async fn test_category_mismatch_delete_payload() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let id = add(&service, "2024-01-05", 12.50, "Food").await?;

    let payload = facade::delete_expense_in_category(&service, id, "Transport").await;
    assert_eq!(payload["status"], "error");
    assert!(payload["message"].as_str().unwrap().contains("Transport"));

    Ok(())
}

#[test]
fn test_categories_falls_back_when_file_is_missing() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let provider = CategoryProvider::new(temp_dir.path().join("categories.json"));

    let payload = facade::categories(&provider);
    let categories = payload["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 10);
}

#[test]
fn test_categories_carries_non_json_content_as_a_string() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("categories.json");
    std::fs::write(&path, "Coffee\nBooks\n").unwrap();

    let provider = CategoryProvider::new(&path);
    let payload = facade::categories(&provider);

    // Content that is not JSON is still delivered verbatim, wrapped as a
    // JSON string so the payload stays well-formed
    assert_eq!(payload.as_str(), Some("Coffee\nBooks\n"));
}

#[test]
fn test_categories_serves_file_content_when_present() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("categories.json");
    std::fs::write(&path, r#"{"categories": ["Coffee", "Books"]}"#).unwrap();

    let provider = CategoryProvider::new(&path);
    let payload = facade::categories(&provider);

    let categories = payload["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0], "Coffee");
}
