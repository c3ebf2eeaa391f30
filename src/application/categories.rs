use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::default_taxonomy_json;

/// Read-only provider for the category taxonomy. The taxonomy file is read
/// lazily on each request, never cached, so edits show up without a restart.
pub struct CategoryProvider {
    path: PathBuf,
}

impl CategoryProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Return the taxonomy text. A missing file is not an error: it falls
    /// back to the built-in ten-category list. Any other I/O failure is
    /// propagated for the caller to shape into a structured error.
    pub fn load(&self) -> Result<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(default_taxonomy_json()),
            Err(err) => Err(err).with_context(|| {
                format!("Failed to read categories file: {}", self.path.display())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let provider = CategoryProvider::new("/nonexistent/categories.json");
        let text = provider.load().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["categories"].as_array().unwrap().len(), 10);
    }
}
