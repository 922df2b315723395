//! Generic field-state container.
//!
//! A keyed string store backing every input of a form. The defaults passed to
//! `new` are kept for the lifetime of the container and `reset` always goes
//! back to exactly those values.

use std::collections::BTreeMap;

pub type FieldValues = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    defaults: FieldValues,
    values: FieldValues,
}

impl FormFields {
    pub fn new<I, K, V>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let defaults: FieldValues = defaults
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: defaults.clone(),
            defaults,
        }
    }

    /// Change handler shared by every input: set one field, keep the rest.
    pub fn on_change(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Restore the defaults captured at construction.
    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
    }

    /// Bulk update. Declared fields the updater removes come back with their
    /// default value, so every declared field always has a value.
    pub fn set_all<F>(&mut self, updater: F)
    where
        F: FnOnce(&mut FieldValues),
    {
        updater(&mut self.values);
        for (name, default) in &self.defaults {
            if !self.values.contains_key(name) {
                self.values.insert(name.clone(), default.clone());
            }
        }
    }

    /// Current value; empty for a name that was never declared or set.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.defaults.contains_key(name)
    }

    /// True when every field equals its default.
    pub fn is_pristine(&self) -> bool {
        self.values == self.defaults
    }
}
