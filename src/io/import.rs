use anyhow::Result;
use std::io::Read;

use crate::application::LedgerService;
use crate::domain::NewExpense;

/// Result of an import operation
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub dry_run: bool,
}

/// Importer for loading expenses into the ledger
pub struct Importer<'a> {
    service: &'a LedgerService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Import expenses from CSV with columns
    /// `date,amount,category[,subcategory,note]`. Bad rows are collected as
    /// per-line errors; good rows are inserted through the service.
    pub async fn import_expenses_csv<R: Read>(
        &self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut imported = 0;
        let mut errors = Vec::new();

        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let date = record.get(0).unwrap_or("");
            let amount_str = record.get(1).unwrap_or("");
            let category = record.get(2).unwrap_or("");
            let subcategory = record.get(3).unwrap_or("");
            let note = record.get(4).unwrap_or("");

            if date.is_empty() {
                errors.push(ImportError {
                    line,
                    field: Some("date".to_string()),
                    error: "Missing date".to_string(),
                });
                continue;
            }

            let amount: f64 = match amount_str.parse() {
                Ok(a) => a,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: Some("amount".to_string()),
                        error: format!("Invalid amount: {}", e),
                    });
                    continue;
                }
            };

            if category.is_empty() {
                errors.push(ImportError {
                    line,
                    field: Some("category".to_string()),
                    error: "Missing category".to_string(),
                });
                continue;
            }

            if options.dry_run {
                imported += 1;
                continue;
            }

            let expense = NewExpense::new(date, amount, category)
                .with_subcategory(subcategory)
                .with_note(note);

            match self.service.add_expense(expense).await {
                Ok(_) => imported += 1,
                Err(e) => errors.push(ImportError {
                    line,
                    field: None,
                    error: format!("Insert failed: {}", e),
                }),
            }
        }

        Ok(ImportResult { imported, errors })
    }
}
