//! Environment variable source
//!
//! Every option can be set through `PACKWRIGHT_<SCOPE>_<NAME>` (or
//! `PACKWRIGHT_<NAME>` for global options). Values are strings, so typed
//! options are parsed here; the same parsers serve `--option` flags.

use std::collections::HashMap;

use super::{ENV_PREFIX, ListEdit, ListEditAction, OptionId, OptionsError, OptionsSource};

/// Options read from environment variables
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Snapshot the `PACKWRIGHT_*` variables of the current process
    #[must_use]
    pub fn from_env() -> Self {
        let prefix = format!("{ENV_PREFIX}_");
        Self::new(std::env::vars().filter(|(key, _)| key.starts_with(&prefix)))
    }

    /// Build from explicit variables
    pub fn new(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            vars: vars.into_iter().collect(),
        }
    }

    fn get(&self, id: &OptionId) -> Option<&str> {
        self.vars.get(&id.env_var()).map(String::as_str)
    }
}

impl OptionsSource for EnvSource {
    fn display(&self, id: &OptionId) -> String {
        id.env_var()
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

// =============================================================================
// Value parsing
// =============================================================================

fn wrong_type(option: &str, expected: &'static str, value: &str) -> OptionsError {
    OptionsError::WrongType {
        option: option.to_string(),
        expected,
        found: value.to_string(),
    }
}

/// `true` or `false`, any case
pub(crate) fn parse_bool(option: &str, value: &str) -> Result<bool, OptionsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(wrong_type(option, "a bool", value)),
    }
}

pub(crate) fn parse_int(option: &str, value: &str) -> Result<i64, OptionsError> {
    value.trim().parse().map_err(|_| wrong_type(option, "an integer", value))
}

pub(crate) fn parse_float(option: &str, value: &str) -> Result<f64, OptionsError> {
    value.trim().parse().map_err(|_| wrong_type(option, "a float", value))
}

/// Parse list edit syntax
///
/// `[a, b]` replaces, `+[a]` adds, `-[a]` removes, and several edits may be
/// joined with commas (`+[a],-[b]`). Anything else is a single item to add.
/// Items may be bare or quoted.
pub(crate) fn parse_list_edits(option: &str, value: &str) -> Result<Vec<ListEdit<String>>, OptionsError> {
    let trimmed = value.trim();
    if !is_edit_start(trimmed) {
        return Ok(vec![ListEdit {
            action: ListEditAction::Add,
            items: vec![trimmed.to_string()],
        }]);
    }

    let bad = || OptionsError::BadListEdit {
        option: option.to_string(),
        found: value.to_string(),
    };

    let mut edits = Vec::new();
    let mut rest = trimmed;
    while !rest.is_empty() {
        let (action, body) = match rest.as_bytes()[0] {
            b'+' => (ListEditAction::Add, &rest[1..]),
            b'-' => (ListEditAction::Remove, &rest[1..]),
            _ => (ListEditAction::Replace, rest),
        };
        let close = closing_bracket(body).ok_or_else(bad)?;
        edits.push(ListEdit {
            action,
            items: split_items(&body[1..close]),
        });
        rest = body[close + 1..].trim_start();
        if let Some(next) = rest.strip_prefix(',') {
            rest = next.trim_start();
            if !is_edit_start(rest) {
                return Err(bad());
            }
        } else if !rest.is_empty() {
            return Err(bad());
        }
    }
    Ok(edits)
}

fn is_edit_start(s: &str) -> bool {
    s.starts_with('[') || s.starts_with("+[") || s.starts_with("-[")
}

/// Index of the `]` closing the list that opens at `s[0]`, skipping quoted text
fn closing_bracket(s: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in s.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {},
            (None, '"' | '\'') => quote = Some(c),
            (None, ']') => return Some(i),
            (None, _) => {},
        }
    }
    None
}

fn split_items(inner: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote = None;
    for c in inner.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => quote = Some(c),
            (None, ',') => items.push(std::mem::take(&mut current)),
            (None, c) => current.push(c),
        }
    }
    items.push(current);
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
