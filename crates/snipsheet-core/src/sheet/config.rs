//! Sheet configuration: named sheets made of formula columns.

use serde::Deserialize;

use crate::error::Result;

/// A named, user-editable column whose values come from a formula.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormulaColumn {
    pub name: String,
    #[serde(default)]
    pub formula: String,
    /// Hidden columns still take part in evaluation; they are only left out of
    /// rendered and exported output.
    #[serde(default)]
    pub hidden: bool,
}

impl FormulaColumn {
    pub fn new(name: impl Into<String>, formula: impl Into<String>) -> Self {
        FormulaColumn {
            name: name.into(),
            formula: formula.into(),
            hidden: false,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// One sheet: a name plus its ordered columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetConfig {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<FormulaColumn>,
}

impl SheetConfig {
    pub fn new(name: impl Into<String>, properties: Vec<FormulaColumn>) -> Self {
        SheetConfig {
            name: name.into(),
            properties,
        }
    }

    pub fn visible_columns(&self) -> impl Iterator<Item = &FormulaColumn> {
        self.properties.iter().filter(|c| !c.hidden)
    }

    pub fn column(&self, name: &str) -> Option<&FormulaColumn> {
        self.properties.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut FormulaColumn> {
        self.properties.iter_mut().find(|c| c.name == name)
    }
}

/// Every sheet configured for a document, looked up by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetStore {
    #[serde(default)]
    sheets: Vec<SheetConfig>,
}

impl SheetStore {
    pub fn new(sheets: Vec<SheetConfig>) -> Self {
        SheetStore { sheets }
    }

    /// Parse a TOML config of `[[sheets]]` tables.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn get(&self, name: &str) -> Option<&SheetConfig> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SheetConfig> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    pub fn first(&self) -> Option<&SheetConfig> {
        self.sheets.first()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Add a sheet, replacing any existing sheet with the same name.
    pub fn insert(&mut self, sheet: SheetConfig) {
        match self.get_mut(&sheet.name) {
            Some(existing) => *existing = sheet,
            None => self.sheets.push(sheet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[[sheets]]
name = "foods"

[[sheets.properties]]
name = "food"
formula = 'VALUES_OF_TYPE("food")'

[[sheets.properties]]
name = "meal"
hidden = true

[[sheets]]
name = "empty"
"#;

    #[test]
    fn test_parse_store() {
        let store = SheetStore::from_toml_str(CONFIG).unwrap();
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["foods", "empty"]);

        let foods = store.get("foods").unwrap();
        assert_eq!(foods.properties.len(), 2);
        assert_eq!(foods.properties[0].formula, r#"VALUES_OF_TYPE("food")"#);
        assert_eq!(foods.properties[1].formula, "");
        assert!(foods.properties[1].hidden);
        assert_eq!(foods.visible_columns().count(), 1);

        assert!(store.get("empty").unwrap().properties.is_empty());
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = SheetStore::from_toml_str("[[sheets]]\nname = \"a\"\ncolour = \"red\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn test_insert_replaces_by_name() {
        let mut store = SheetStore::default();
        store.insert(SheetConfig::new("a", vec![FormulaColumn::new("x", "1")]));
        store.insert(SheetConfig::new("b", vec![]));
        store.insert(SheetConfig::new("a", vec![FormulaColumn::new("y", "2")]));

        assert_eq!(store.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(store.get("a").unwrap().properties[0].name, "y");
    }

    #[test]
    fn test_edit_column_in_place() {
        let mut sheet = SheetConfig::new("a", vec![FormulaColumn::new("x", "1")]);
        if let Some(column) = sheet.column_mut("x") {
            column.formula = "[1, 2]".to_string();
            column.hidden = true;
        }
        assert_eq!(sheet.column("x").unwrap().formula, "[1, 2]");
        assert_eq!(sheet.visible_columns().count(), 0);
    }
}
