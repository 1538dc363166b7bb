use super::CatalogError;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Metadata for one supported element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementInfo {
    /// Chemical symbol ("H", "W", ...).
    pub symbol: String,
    /// Long element name; also the catalog subdirectory name.
    pub name: String,
    /// Nuclear charge.
    pub nuclear_charge: u32,
}

impl ElementInfo {
    /// Number of ionization stages: neutral through fully stripped.
    pub fn num_stages(&self) -> usize {
        self.nuclear_charge as usize + 1
    }
}

/// Elements with tabulated atomic data shipped alongside the crate.
static BUILTIN_ELEMENTS: Map<&'static str, (u32, &'static str)> = phf_map! {
    "H" => (1, "Hydrogen"),
    "He" => (2, "Helium"),
    "Li" => (3, "Lithium"),
    "Be" => (4, "Beryllium"),
    "B" => (5, "Boron"),
    "C" => (6, "Carbon"),
    "N" => (7, "Nitrogen"),
    "O" => (8, "Oxygen"),
    "Ne" => (10, "Neon"),
    "Ar" => (18, "Argon"),
    "W" => (74, "Tungsten"),
};

/// Entry format of the TOML override file: a table per element symbol.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ElementEntry {
    name: String,
    nuclear_charge: u32,
}

/// Resolves element symbols to catalog metadata.
///
/// Ships a built-in table of elements with tabulated atomic data; entries can
/// be supplemented or overridden from a TOML file. The registry is injected
/// into the model builder rather than consulted as a module-wide global, so
/// tests can substitute their own.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    overrides: HashMap<String, ElementInfo>,
}

impl ElementRegistry {
    /// Registry with the built-in element table only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in table plus entries loaded from a TOML file.
    ///
    /// File entries take precedence over built-ins with the same symbol.
    pub fn with_overrides(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let entries: HashMap<String, ElementEntry> =
            toml::from_str(&content).map_err(|e| CatalogError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;

        let overrides = entries
            .into_iter()
            .map(|(symbol, entry)| {
                let info = ElementInfo {
                    symbol: symbol.clone(),
                    name: entry.name,
                    nuclear_charge: entry.nuclear_charge,
                };
                (symbol, info)
            })
            .collect();

        Ok(Self { overrides })
    }

    /// Looks up an element by chemical symbol.
    pub fn resolve(&self, symbol: &str) -> Option<ElementInfo> {
        if let Some(info) = self.overrides.get(symbol) {
            return Some(info.clone());
        }
        BUILTIN_ELEMENTS
            .get(symbol)
            .map(|&(nuclear_charge, name)| ElementInfo {
                symbol: symbol.to_string(),
                name: name.to_string(),
                nuclear_charge,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn resolves_builtin_elements() {
        let registry = ElementRegistry::new();
        let info = registry.resolve("W").unwrap();
        assert_eq!(info.name, "Tungsten");
        assert_eq!(info.nuclear_charge, 74);
        assert_eq!(info.num_stages(), 75);
    }

    #[test]
    fn unknown_symbol_resolves_to_none() {
        let registry = ElementRegistry::new();
        assert!(registry.resolve("Xx").is_none());
        assert!(registry.resolve("h").is_none());
    }

    #[test]
    fn toml_overrides_supplement_and_shadow_builtins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("elements.toml");
        fs::write(
            &path,
            r#"
[Fe]
name = "Iron"
nuclear_charge = 26

[H]
name = "Protium"
nuclear_charge = 1
"#,
        )
        .unwrap();

        let registry = ElementRegistry::with_overrides(&path).unwrap();

        let iron = registry.resolve("Fe").unwrap();
        assert_eq!(iron.name, "Iron");
        assert_eq!(iron.num_stages(), 27);

        // Override shadows the built-in entry
        assert_eq!(registry.resolve("H").unwrap().name, "Protium");
        // Built-ins not mentioned in the file are still available
        assert_eq!(registry.resolve("He").unwrap().name, "Helium");
    }

    #[test]
    fn invalid_toml_reports_toml_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("elements.toml");
        fs::write(&path, "not valid toml [").unwrap();

        let result = ElementRegistry::with_overrides(&path);
        assert!(matches!(result, Err(CatalogError::Toml { .. })));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("does_not_exist.toml");

        let result = ElementRegistry::with_overrides(&path);
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
