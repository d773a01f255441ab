//! Form state store and validation error map

use super::field::{FieldSpec, FieldValue};
use std::collections::BTreeMap;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn active_spec(&self) -> Option<&'static FieldSpec>;
    fn store(&self) -> &FormStore;
    fn store_mut(&mut self) -> &mut FormStore;

    /// Apply an edit to the active field through the store
    fn edit_active(&mut self, edit: impl FnOnce(&FieldValue) -> FieldValue)
    where
        Self: Sized,
    {
        if let Some(spec) = self.active_spec() {
            let current = self.store().value_or_blank(spec);
            let updated = edit(&current);
            self.store_mut().set_field(spec.name, updated);
        }
    }
}

/// Field name to value mapping for one form session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: BTreeMap<String, FieldValue>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for seeding forms
    pub fn with(mut self, name: &str, value: FieldValue) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Absent fields count as blank
    pub fn is_blank(&self, name: &str) -> bool {
        self.values.get(name).map_or(true, FieldValue::is_blank)
    }

    pub fn text(&self, name: &str) -> &str {
        self.values.get(name).map_or("", |v| v.as_text().trim())
    }

    /// Trimmed text, or None when blank
    pub fn optional_text(&self, name: &str) -> Option<String> {
        let text = self.text(name);
        (!text.is_empty()).then(|| text.to_string())
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(FieldValue::as_number)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(FieldValue::as_integer)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(FieldValue::as_bool)
    }

    fn set(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name.to_string(), value);
    }
}

/// Field name to message mapping for the step or form being validated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.errors.remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[cfg(test)]
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }
}

/// Owns the values of one form session and the errors currently on display
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    state: FormState,
    errors: ValidationErrors,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: FormState) -> Self {
        Self {
            state,
            errors: ValidationErrors::new(),
        }
    }

    /// Replace one field's value and drop that field's error, if any
    pub fn set_field(&mut self, name: &str, value: FieldValue) {
        self.state.set(name, value);
        self.errors.remove(name);
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn set_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors = ValidationErrors::new();
    }

    /// Current value for the spec, or its blank value when never set
    pub fn value_or_blank(&self, spec: &FieldSpec) -> FieldValue {
        self.state
            .get(spec.name)
            .cloned()
            .unwrap_or_else(|| spec.blank_value())
    }
}
