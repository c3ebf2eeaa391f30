use serde::{Deserialize, Serialize};

/// A stored expense row. The field order matches the interchange shape
/// `{id, date, amount, category, subcategory, note}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    /// Date in `YYYY-MM-DD` form, stored verbatim. Lexicographic order on
    /// this format matches chronological order, which is what range filters
    /// and sorting rely on.
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub note: String,
}

/// A new expense to insert. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub note: String,
}

impl NewExpense {
    pub fn new(date: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            amount,
            category: category.into(),
            // Optional fields default to empty strings, never NULL
            subcategory: String::new(),
            note: String::new(),
        }
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = subcategory.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// A partial patch for an existing expense. Each field is present or absent,
/// not merely nullable: an absent field is left untouched, a present field
/// (including an empty string) overwrites the stored value.
///
/// Assignments are always applied in the fixed order
/// date, amount, category, subcategory, note.
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub date: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub note: Option<String>,
}

impl ExpensePatch {
    /// True when no field is provided. An empty patch is rejected before
    /// storage is touched.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.note.is_none()
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_expense_defaults_optional_fields_to_empty() {
        let expense = NewExpense::new("2024-01-05", 12.5, "Food");
        assert_eq!(expense.subcategory, "");
        assert_eq!(expense.note, "");
    }

    #[test]
    fn test_new_expense_builders() {
        let expense = NewExpense::new("2024-01-05", 12.5, "Food")
            .with_subcategory("Groceries")
            .with_note("weekly shop");
        assert_eq!(expense.subcategory, "Groceries");
        assert_eq!(expense.note, "weekly shop");
    }

    #[test]
    fn test_empty_patch() {
        assert!(ExpensePatch::default().is_empty());
    }

    #[test]
    fn test_patch_with_any_field_is_not_empty() {
        assert!(!ExpensePatch::default().with_date("2024-02-01").is_empty());
        assert!(!ExpensePatch::default().with_amount(9.99).is_empty());
        assert!(!ExpensePatch::default().with_note("").is_empty());
    }

    #[test]
    fn test_patch_distinguishes_empty_string_from_absent() {
        let patch = ExpensePatch::default().with_subcategory("");
        assert_eq!(patch.subcategory.as_deref(), Some(""));
        assert!(patch.note.is_none());
    }

    #[test]
    fn test_expense_interchange_shape() {
        let expense = Expense {
            id: 1,
            date: "2024-01-05".into(),
            amount: 12.5,
            category: "Food".into(),
            subcategory: String::new(),
            note: String::new(),
        };

        let value = serde_json::to_value(&expense).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 6);
        for key in ["id", "date", "amount", "category", "subcategory", "note"] {
            assert!(object.contains_key(key), "missing field '{key}'");
        }
    }
}
