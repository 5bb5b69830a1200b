//! Melon catalog loaded from a flat file.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use ubermelon_core::{MelonId, Price};

use super::records;
use crate::models::Melon;

const FIELD_COUNT: usize = 7;

/// Errors loading the melon catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A line in the catalog is invalid.
    #[error("line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Two lines share the same melon ID.
    #[error("line {line}: duplicate melon id '{id}'")]
    DuplicateId {
        /// 1-based line number of the second occurrence.
        line: usize,
        /// The repeated ID.
        id: MelonId,
    },
}

/// Read-only product catalog, in file order.
#[derive(Debug, Clone, Default)]
pub struct MelonCatalog {
    melons: Vec<Melon>,
    index: HashMap<MelonId, usize>,
}

impl MelonCatalog {
    /// Load the catalog from a file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, and
    /// `Malformed`/`DuplicateId` for invalid content.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        tracing::info!(path = %path.display(), melons = catalog.len(), "Loaded melon catalog");
        Ok(catalog)
    }

    /// Parse a catalog from `id|melon_type|common_name|price|image_url|color|seedless` lines.
    ///
    /// # Errors
    ///
    /// See [`MelonCatalog::load`].
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for record in records(reader, FIELD_COUNT) {
            let record = record?;
            let melon = parse_melon(record.line, record.fields)?;

            if catalog.index.contains_key(&melon.id) {
                return Err(CatalogError::DuplicateId {
                    line: record.line,
                    id: melon.id,
                });
            }

            catalog.index.insert(melon.id.clone(), catalog.melons.len());
            catalog.melons.push(melon);
        }

        Ok(catalog)
    }

    /// All melons, in the order they appear in the file.
    #[must_use]
    pub fn get_all(&self) -> &[Melon] {
        &self.melons
    }

    /// Look up a melon by ID.
    #[must_use]
    pub fn get_by_id(&self, id: &MelonId) -> Option<&Melon> {
        self.index.get(id).and_then(|&idx| self.melons.get(idx))
    }

    /// Number of melons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.melons.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.melons.is_empty()
    }
}

fn parse_melon(line: usize, fields: Vec<String>) -> Result<Melon, CatalogError> {
    let malformed = |reason: String| CatalogError::Malformed { line, reason };

    let [id, melon_type, common_name, price, image_url, color, seedless]: [String; FIELD_COUNT] =
        fields
            .try_into()
            .map_err(|_| malformed("wrong number of fields".to_string()))?;

    let id = MelonId::parse(&id).map_err(|e| malformed(e.to_string()))?;
    let price = Price::parse(&price).map_err(|e| malformed(e.to_string()))?;
    let seedless = parse_flag(&seedless)
        .ok_or_else(|| malformed(format!("seedless must be 1/0 or true/false, got '{seedless}'")))?;

    if common_name.is_empty() {
        return Err(malformed("common name cannot be empty".to_string()));
    }

    Ok(Melon {
        id,
        melon_type,
        common_name,
        price,
        image_url,
        color,
        seedless,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG: &str = "\
# id|type|name|price|image|color|seedless
cren|Crenshaw|Crenshaw|2.00|/static/img/cren.jpg|green|0
yw|Watermelon|Yellow Watermelon|3.25|/static/img/yw.jpg|yellow|1
";

    fn id(s: &str) -> MelonId {
        MelonId::parse(s).unwrap()
    }

    #[test]
    fn test_load_preserves_file_order() {
        let catalog = MelonCatalog::from_reader(CATALOG.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);

        let names: Vec<&str> = catalog
            .get_all()
            .iter()
            .map(|m| m.common_name.as_str())
            .collect();
        assert_eq!(names, vec!["Crenshaw", "Yellow Watermelon"]);
    }

    #[test]
    fn test_get_by_id() {
        let catalog = MelonCatalog::from_reader(CATALOG.as_bytes()).unwrap();

        let yw = catalog.get_by_id(&id("yw")).unwrap();
        assert_eq!(yw.price.to_string(), "$3.25");
        assert!(yw.seedless);
        assert_eq!(yw.color, "yellow");

        assert!(catalog.get_by_id(&id("missing")).is_none());
    }

    #[test]
    fn test_bad_price_reports_line() {
        let err = MelonCatalog::from_reader("a|A|A|cheap|img|red|0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_oversized_price_is_malformed() {
        let input = "big|A|A|79228162514264337593543950335|img|red|0\n";
        let err = MelonCatalog::from_reader(input.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_bad_seedless_flag() {
        let err = MelonCatalog::from_reader("a|A|A|1.00|img|red|maybe\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("seedless"));
    }

    #[test]
    fn test_duplicate_id() {
        let input = "a|A|A|1.00|img|red|0\n\na|B|B|2.00|img|red|1\n";
        let err = MelonCatalog::from_reader(input.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { line: 3, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = MelonCatalog::load(Path::new("/nonexistent/melons.txt")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = MelonCatalog::from_reader("# nothing yet\n".as_bytes()).unwrap();
        assert!(catalog.is_empty());
    }
}
