//! Command-line option source
//!
//! `--option scope.name=value` sets any option from the command line;
//! `--option name=value` sets a global one. Values use the same syntax as
//! environment variables.

use std::collections::HashMap;

use super::env::{parse_bool, parse_float, parse_int, parse_list_edits};
use super::{ListEdit, OptionId, OptionsError, OptionsSource};

/// Options given as `--option` flags
#[derive(Debug, Clone, Default)]
pub struct ArgsSource {
    values: HashMap<OptionId, String>,
}

impl ArgsSource {
    /// Parse `scope.name=value` entries; later entries for the same option win
    pub fn parse(flags: &[String]) -> Result<Self, OptionsError> {
        let mut values = HashMap::new();
        for flag in flags {
            let (key, value) = flag.split_once('=').ok_or_else(|| OptionsError::BadFlag(flag.clone()))?;
            let id = match key.trim().split_once('.') {
                Some((scope, name)) if !scope.is_empty() && !name.is_empty() => OptionId::new(scope, name),
                None if !key.trim().is_empty() => OptionId::global(key.trim()),
                _ => return Err(OptionsError::BadFlag(flag.clone())),
            };
            log::debug!("Flag sets {id}");
            values.insert(id, value.to_string());
        }
        Ok(Self { values })
    }

    /// Set one option directly
    pub fn set(&mut self, id: OptionId, value: impl Into<String>) {
        self.values.insert(id, value.into());
    }

    fn get(&self, id: &OptionId) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }
}

impl OptionsSource for ArgsSource {
    fn display(&self, id: &OptionId) -> String {
        format!("flag {}", id.flag())
    }

    fn get_string(&self, id: &OptionId) -> Result<Option<String>, OptionsError> {
        Ok(self.get(id).map(str::to_string))
    }

    fn get_bool(&self, id: &OptionId) -> Result<Option<bool>, OptionsError> {
        self.get(id).map(|v| parse_bool(&self.display(id), v)).transpose()
    }

    fn get_int(&self, id: &OptionId) -> Result<Option<i64>, OptionsError> {
        self.get(id).map(|v| parse_int(&self.display(id), v)).transpose()
    }

    fn get_float(&self, id: &OptionId) -> Result<Option<f64>, OptionsError> {
        self.get(id).map(|v| parse_float(&self.display(id), v)).transpose()
    }

    fn get_string_list(&self, id: &OptionId) -> Result<Option<Vec<ListEdit<String>>>, OptionsError> {
        self.get(id).map(|v| parse_list_edits(&self.display(id), v)).transpose()
    }
}
