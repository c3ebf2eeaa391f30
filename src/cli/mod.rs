use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Read, Write};

use crate::application::{CategoryProvider, LedgerService, facade};
use crate::domain::{Expense, ExpensePatch, NewExpense};
use crate::io::{Exporter, ImportOptions, Importer};

/// Spesa - Personal Expense Ledger
#[derive(Parser)]
#[command(name = "spesa")]
#[command(about = "A local-first personal expense ledger for the command line")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "spesa.db")]
    pub database: String,

    /// Category taxonomy file path
    #[arg(long, default_value = "categories.json")]
    pub categories_file: String,

    /// Print machine-readable JSON payloads instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record a new expense
    Add {
        /// Amount spent (e.g., "12.50"; negative values record refunds)
        #[arg(allow_negative_numbers = true)]
        amount: f64,

        /// Category (e.g., "Food", "Transport")
        category: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Subcategory
        #[arg(short, long)]
        subcategory: Option<String>,

        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List expenses, optionally within a date range
    List {
        /// Range start (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,

        /// Range end (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,
    },

    /// Summarize spending per category within a date range
    Summary {
        /// Range start (YYYY-MM-DD, inclusive)
        from: String,

        /// Range end (YYYY-MM-DD, inclusive)
        to: String,

        /// Restrict the summary to one category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Update fields of an existing expense
    Update {
        /// Expense id
        id: i64,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// New amount
        #[arg(long)]
        amount: Option<f64>,

        /// New category
        #[arg(long)]
        category: Option<String>,

        /// New subcategory (pass "" to clear)
        #[arg(long)]
        subcategory: Option<String>,

        /// New note (pass "" to clear)
        #[arg(long)]
        note: Option<String>,
    },

    /// Delete one expense by id
    Delete {
        /// Expense id
        id: i64,

        /// Require the expense to be in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete expenses in bulk: a whole category, or everything
    Purge {
        /// Category to purge (omit to delete all expenses)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show the category taxonomy
    Categories,

    /// Export expenses to CSV
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Import expenses from CSV
    Import {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Preview without importing
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    async fn open_service(&self) -> Result<LedgerService> {
        if self.verbose {
            eprintln!("Using database: {}", self.database);
        }
        let service = LedgerService::open(&self.database)
            .await
            .with_context(|| format!("Failed to open ledger at '{}'", self.database))?;
        Ok(service)
    }

    pub async fn run(self) -> Result<()> {
        match &self.command {
            Commands::Init => {
                LedgerService::open(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Add {
                amount,
                category,
                date,
                subcategory,
                note,
            } => {
                let service = self.open_service().await?;
                let date = date
                    .clone()
                    .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

                let expense = NewExpense::new(date.clone(), *amount, category.clone())
                    .with_subcategory(subcategory.clone().unwrap_or_default())
                    .with_note(note.clone().unwrap_or_default());

                if self.json {
                    print_payload(facade::add_expense(&service, expense).await)?;
                } else {
                    let id = service.add_expense(expense).await?;
                    println!("Recorded expense {}: {:.2} {} ({})", id, amount, category, date);
                }
            }

            Commands::List { from, to } => {
                let service = self.open_service().await?;
                run_list_command(&service, from.as_deref(), to.as_deref(), self.json).await?;
            }

            Commands::Summary { from, to, category } => {
                let service = self.open_service().await?;
                run_summary_command(&service, from, to, category.as_deref(), self.json).await?;
            }

            Commands::Update {
                id,
                date,
                amount,
                category,
                subcategory,
                note,
            } => {
                let service = self.open_service().await?;
                let patch = ExpensePatch {
                    date: date.clone(),
                    amount: *amount,
                    category: category.clone(),
                    subcategory: subcategory.clone(),
                    note: note.clone(),
                };

                if self.json {
                    print_payload(facade::update_expense(&service, *id, patch).await)?;
                } else {
                    service.update_expense(*id, patch).await?;
                    println!("Updated expense {}", id);
                }
            }

            Commands::Delete { id, category } => {
                let service = self.open_service().await?;
                run_delete_command(&service, *id, category.as_deref(), self.json).await?;
            }

            Commands::Purge { category } => {
                let service = self.open_service().await?;
                run_purge_command(&service, category.as_deref(), self.json).await?;
            }

            Commands::Categories => {
                let provider = CategoryProvider::new(&self.categories_file);
                if self.json {
                    print_payload(facade::categories(&provider))?;
                } else {
                    println!("{}", provider.load()?);
                }
            }

            Commands::Export { output } => {
                let service = self.open_service().await?;
                run_export_command(&service, output.as_deref()).await?;
            }

            Commands::Import { input, dry_run } => {
                let service = self.open_service().await?;
                run_import_command(&service, input.as_deref(), *dry_run).await?;
            }
        }

        Ok(())
    }
}

fn print_payload(payload: serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

async fn run_list_command(
    service: &LedgerService,
    from: Option<&str>,
    to: Option<&str>,
    json: bool,
) -> Result<()> {
    let expenses = match (from, to) {
        (Some(from), Some(to)) => {
            if json {
                return print_payload(facade::list_by_date_range(service, from, to).await);
            }
            service.list_by_date_range(from, to).await?
        }
        (None, None) => {
            if json {
                return print_payload(facade::list_all(service).await);
            }
            service.list_all().await?
        }
        _ => bail!("Both --from and --to are required for a date range"),
    };

    print_expense_table(&expenses);
    Ok(())
}

fn print_expense_table(expenses: &[Expense]) {
    if expenses.is_empty() {
        println!("No expenses found.");
        return;
    }

    println!(
        "{:<6} {:<12} {:>10} {:<16} {:<16} NOTE",
        "ID", "DATE", "AMOUNT", "CATEGORY", "SUBCATEGORY"
    );
    println!("{}", "-".repeat(72));
    for expense in expenses {
        println!(
            "{:<6} {:<12} {:>10.2} {:<16} {:<16} {}",
            expense.id,
            expense.date,
            expense.amount,
            expense.category,
            expense.subcategory,
            expense.note
        );
    }
}

async fn run_summary_command(
    service: &LedgerService,
    from: &str,
    to: &str,
    category: Option<&str>,
    json: bool,
) -> Result<()> {
    if json {
        return print_payload(facade::summarize(service, from, to, category).await);
    }

    let totals = service.summarize(from, to, category).await?;
    if totals.is_empty() {
        println!("No expenses between {} and {}.", from, to);
        return Ok(());
    }

    println!("{:<16} {:>12}", "CATEGORY", "TOTAL");
    println!("{}", "-".repeat(29));
    let mut grand_total = 0.0;
    for row in &totals {
        println!("{:<16} {:>12.2}", row.category, row.total_amount);
        grand_total += row.total_amount;
    }
    println!("{}", "-".repeat(29));
    println!("{:<16} {:>12.2}", "TOTAL", grand_total);
    Ok(())
}

async fn run_delete_command(
    service: &LedgerService,
    id: i64,
    category: Option<&str>,
    json: bool,
) -> Result<()> {
    match category {
        Some(category) => {
            if json {
                return print_payload(
                    facade::delete_expense_in_category(service, id, category).await,
                );
            }
            service.delete_expense_in_category(id, category).await?;
            println!("Deleted expense {} from category '{}'", id, category);
        }
        None => {
            if json {
                return print_payload(facade::delete_expense(service, id).await);
            }
            service.delete_expense(id).await?;
            println!("Deleted expense {}", id);
        }
    }
    Ok(())
}

async fn run_purge_command(
    service: &LedgerService,
    category: Option<&str>,
    json: bool,
) -> Result<()> {
    match category {
        Some(category) => {
            if json {
                return print_payload(facade::delete_by_category(service, category).await);
            }
            let deleted = service.delete_by_category(category).await?;
            println!("Deleted {} expense(s) in category '{}'", deleted, category);
        }
        None => {
            if json {
                return print_payload(facade::delete_all(service).await);
            }
            let deleted = service.delete_all().await?;
            println!("Deleted {} expense(s)", deleted);
        }
    }
    Ok(())
}

async fn run_export_command(service: &LedgerService, output: Option<&str>) -> Result<()> {
    let exporter = Exporter::new(service);

    let count = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file '{}'", path))?;
            exporter.export_expenses_csv(file).await?
        }
        None => exporter.export_expenses_csv(io::stdout().lock()).await?,
    };

    if let Some(path) = output {
        println!("Exported {} expense(s) to {}", count, path);
    }
    Ok(())
}

async fn run_import_command(
    service: &LedgerService,
    input: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let importer = Importer::new(service);
    let options = ImportOptions { dry_run };

    let reader: Box<dyn Read> = match input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("Failed to open input file '{}'", path))?,
        ),
        None => Box::new(io::stdin().lock()),
    };

    let result = importer.import_expenses_csv(reader, options).await?;

    if dry_run {
        println!("Dry run: {} expense(s) would be imported", result.imported);
    } else {
        println!("Imported {} expense(s)", result.imported);
    }

    if !result.errors.is_empty() {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{} row(s) had errors:", result.errors.len())?;
        for error in &result.errors {
            match &error.field {
                Some(field) => writeln!(stderr, "  line {} ({}): {}", error.line, field, error.error)?,
                None => writeln!(stderr, "  line {}: {}", error.line, error.error)?,
            }
        }
    }
    Ok(())
}
