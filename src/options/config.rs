//! TOML config file source
//!
//! Config files are sectioned by scope:
//!
//! ```toml
//! [GLOBAL]
//! distdir = "dist"
//!
//! [lint]
//! batch_size = 64
//!
//! [flake8]
//! args = { add = ["--max-line-length=100"], remove = ["-q"] }
//! ```
//!
//! A list value is either an array (replacing whatever was below it) or a
//! table with `add` and/or `remove` arrays.

use std::fs;
use std::path::Path;

use toml::Table;
use toml::Value;

use super::{ListEdit, ListEditAction, OptionId, OptionsError, OptionsSource};

/// Options read from one or more merged TOML files
#[derive(Debug, Clone, Default)]
pub struct Config {
    config: Table,
}

impl Config {
    /// Parse one config file
    pub fn parse(file: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = file.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| OptionsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str_named(&contents, &path.display().to_string())
    }

    /// Parse config text; `name` labels it in error messages
    pub fn from_str_named(contents: &str, name: &str) -> Result<Self, OptionsError> {
        let config: Table = toml::from_str(contents).map_err(|e: toml::de::Error| OptionsError::Parse {
            path: name.to_string(),
            message: e.message().to_string(),
        })?;
        for (scope, section) in &config {
            if !section.is_table() {
                return Err(OptionsError::WrongType {
                    option: format!("[{scope}] in {name}"),
                    expected: "a table",
                    found: section.to_string(),
                });
            }
        }
        log::debug!("Loaded config {name} with {} section(s)", config.len());
        Ok(Self { config })
    }

    /// Parse several files and merge them in order
    pub fn merged<P: AsRef<Path>>(files: &[P]) -> Result<Self, OptionsError> {
        files.iter().try_fold(Self::default(), |acc, file| Ok(acc.merge(Self::parse(file)?)))
    }

    /// Merge `other` on top of `self`, key by key within each section
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for (scope, section) in other.config {
            if let Value::Table(incoming) = section {
                if let Some(Value::Table(existing)) = self.config.get_mut(&scope) {
                    existing.extend(incoming);
                    continue;
                }
                self.config.insert(scope, Value::Table(incoming));
            } else {
                self.config.insert(scope, section);
            }
        }
        self
    }

    /// Section names present, in file order
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.config.keys().map(String::as_str)
    }

    fn get_value(&self, id: &OptionId) -> Option<&Value> {
        self.config.get(id.scope()).and_then(|section| section.get(id.config_key()))
    }

    fn wrong_type(id: &OptionId, expected: &'static str, value: &Value) -> OptionsError {
        OptionsError::WrongType {
            option: id.to_string(),
            expected,
            found: value.to_string(),
        }
    }

    fn extract_string_list(option: &str, value: &Value) -> Result<Vec<String>, OptionsError> {
        let Some(array) = value.as_array() else {
            return Err(OptionsError::WrongType {
                option: option.to_string(),
                expected: "an array",
                found: value.to_string(),
            });
        };
        array
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| OptionsError::WrongType {
                    option: option.to_string(),
                    expected: "an array of strings",
                    found: value.to_string(),
                })
            })
            .collect()
    }
}

impl OptionsSource for Config {
    fn display(&self, id: &OptionId) -> String {
        format!("config {id}")
    }

    fn get_string(&self, id: &OptionId) -> Result<Option<String>, OptionsError> {
        self.get_value(id)
            .map(|value| value.as_str().map(str::to_string).ok_or_else(|| Self::wrong_type(id, "a string", value)))
            .transpose()
    }

    fn get_bool(&self, id: &OptionId) -> Result<Option<bool>, OptionsError> {
        self.get_value(id)
            .map(|value| value.as_bool().ok_or_else(|| Self::wrong_type(id, "a bool", value)))
            .transpose()
    }

    fn get_int(&self, id: &OptionId) -> Result<Option<i64>, OptionsError> {
        self.get_value(id)
            .map(|value| value.as_integer().ok_or_else(|| Self::wrong_type(id, "an integer", value)))
            .transpose()
    }

    fn get_float(&self, id: &OptionId) -> Result<Option<f64>, OptionsError> {
        self.get_value(id)
            .map(|value| match value {
                Value::Float(f) => Ok(*f),
                #[allow(clippy::cast_precision_loss)]
                Value::Integer(i) => Ok(*i as f64),
                _ => Err(Self::wrong_type(id, "a float", value)),
            })
            .transpose()
    }

    fn get_string_list(&self, id: &OptionId) -> Result<Option<Vec<ListEdit<String>>>, OptionsError> {
        let Some(value) = self.get_value(id) else {
            return Ok(None);
        };
        let option = id.to_string();

        let Some(table) = value.as_table() else {
            return Ok(Some(vec![ListEdit {
                action: ListEditAction::Replace,
                items: Self::extract_string_list(&option, value)?,
            }]));
        };

        if table.is_empty() || table.keys().any(|k| k != "add" && k != "remove") {
            return Err(OptionsError::BadListEdit {
                option,
                found: value.to_string(),
            });
        }

        let mut edits = Vec::new();
        if let Some(add) = table.get("add") {
            edits.push(ListEdit {
                action: ListEditAction::Add,
                items: Self::extract_string_list(&format!("{option}.add"), add)?,
            });
        }
        if let Some(remove) = table.get("remove") {
            edits.push(ListEdit {
                action: ListEditAction::Remove,
                items: Self::extract_string_list(&format!("{option}.remove"), remove)?,
            });
        }
        Ok(Some(edits))
    }
}
