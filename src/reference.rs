//! Static code ⇄ name lookup tables (ISO countries, CAMEO relations).

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::error::{EtlError, Result};

/// Bidirectional mapping between short codes and display names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupTable {
    code_to_name: HashMap<String, String>,
    name_to_code: HashMap<String, String>,
}

impl LookupTable {
    /// Load a two-column, tab-separated `code<TAB>name` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| EtlError::Lookup {
            path: path.to_path_buf(),
            line: 0,
            message: e.to_string(),
        })?;
        let table = Self::from_reader(BufReader::new(file), path)?;
        info!("📖 Loaded {} entries from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse lookup lines. Blank lines are ignored, both fields are trimmed
    /// and a repeated code or name overwrites the earlier entry.
    pub fn from_reader<R: BufRead>(reader: R, source: &Path) -> Result<Self> {
        let mut table = Self::default();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split('\t');
            let (code, name) = match (parts.next(), parts.next(), parts.next()) {
                (Some(code), Some(name), None) => (code.trim(), name.trim()),
                _ => {
                    return Err(EtlError::Lookup {
                        path: source.to_path_buf(),
                        line: idx + 1,
                        message: "expected exactly two tab-separated fields".to_string(),
                    })
                }
            };
            table.insert(code, name);
        }
        Ok(table)
    }

    pub fn insert(&mut self, code: &str, name: &str) {
        self.code_to_name.insert(code.to_string(), name.to_string());
        self.name_to_code.insert(name.to_string(), code.to_string());
    }

    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.code_to_name.get(code).map(String::as_str)
    }

    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.name_to_code.get(name).map(String::as_str)
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.code_to_name.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.code_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_to_name.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for LookupTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (code, name) in iter {
            table.insert(code, name);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_both_directions() {
        let data = "US\tUnited States\nFR\tFrance\n\n";
        let table = LookupTable::from_reader(data.as_bytes(), Path::new("iso.txt")).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.name_for("FR"), Some("France"));
        assert_eq!(table.code_for("United States"), Some("US"));
        assert!(table.contains_code("US"));
        assert!(!table.contains_code("DE"));
    }

    #[test]
    fn test_trims_whitespace_and_crlf() {
        let data = "010\tMake statement\r\n 020 \tAppeal \r\n";
        let table = LookupTable::from_reader(data.as_bytes(), Path::new("cameo.txt")).unwrap();

        assert_eq!(table.name_for("010"), Some("Make statement"));
        assert_eq!(table.name_for("020"), Some("Appeal"));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let data = "US\tUSA\nUS\tUnited States\n";
        let table = LookupTable::from_reader(data.as_bytes(), Path::new("iso.txt")).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.name_for("US"), Some("United States"));
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let data = "US\tUnited States\nbroken line\n";
        let err = LookupTable::from_reader(data.as_bytes(), Path::new("iso.txt")).unwrap_err();

        match err {
            EtlError::Lookup { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_lookup_error() {
        let err = LookupTable::load("/nonexistent/ISO_country_GeoNames.txt").unwrap_err();
        assert!(matches!(err, EtlError::Lookup { line: 0, .. }));
    }
}
