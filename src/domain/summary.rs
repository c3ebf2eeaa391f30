use serde::{Deserialize, Serialize};

/// One aggregate row of a category summary: the sum of `amount` for every
/// expense in that category within the requested date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_amount: f64,
}
