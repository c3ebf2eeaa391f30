use anyhow::Result;
use std::io::Write;

use crate::application::LedgerService;

/// Exporter for writing ledger data out as CSV.
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export all expenses to CSV, in listing order (date ascending, id on
    /// ties). Returns the number of rows written.
    pub async fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let expenses = self.service.list_all().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "date", "amount", "category", "subcategory", "note"])?;

        let mut count = 0;
        for expense in &expenses {
            csv_writer.write_record([
                expense.id.to_string(),
                expense.date.clone(),
                expense.amount.to_string(),
                expense.category.clone(),
                expense.subcategory.clone(),
                expense.note.clone(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }
}
