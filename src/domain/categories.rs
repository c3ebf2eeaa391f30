use serde_json::json;

/// Built-in category taxonomy, used when no taxonomy file is present.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Food",
    "Transport",
    "Housing",
    "Utilities",
    "Health",
    "Entertainment",
    "Shopping",
    "Education",
    "Travel",
    "Other",
];

/// Serialize the built-in taxonomy as JSON text, in the same shape a
/// user-provided `categories.json` would have.
pub fn default_taxonomy_json() -> String {
    let value = json!({ "categories": DEFAULT_CATEGORIES });
    // json! of a static structure cannot fail to pretty-print
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_has_ten_categories() {
        assert_eq!(DEFAULT_CATEGORIES.len(), 10);
    }

    #[test]
    fn test_default_taxonomy_serializes_as_json() {
        let text = default_taxonomy_json();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let categories = value["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 10);
        assert_eq!(categories[0], "Food");
    }
}
