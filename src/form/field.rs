//! Per-field form state: value, validation error and dirty flag

use crate::validator::{FieldError, FieldResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Field<T> {
    value: T,
    error: Option<FieldError>,
    dirty: bool,
}

impl<T: Default> Default for Field<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Field<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            error: None,
            dirty: false,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// User edit: marks the field dirty
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.dirty = true;
    }

    /// Programmatic load: clean, no error shown
    pub fn reset(&mut self, value: T) {
        self.value = value;
        self.error = None;
        self.dirty = false;
    }

    pub fn touch(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn error(&self) -> Option<FieldError> {
        self.error
    }

    /// Run `rule` against the current value and remember the outcome
    pub fn validate_with(&mut self, rule: impl FnOnce(&T) -> FieldResult) -> FieldResult {
        let result = rule(&self.value);
        self.error = result.err();
        result
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Invalid fields are only highlighted once the user touched them
    pub fn shows_error(&self) -> bool {
        self.dirty && self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::required_text;

    #[test]
    fn test_error_shown_only_when_dirty() {
        let mut name: Field<String> = Field::default();
        assert_eq!(
            name.validate_with(|v| required_text(v)),
            Err(FieldError::Required)
        );
        assert!(!name.is_valid());
        assert!(!name.shows_error());

        name.set("  ".to_string());
        name.validate_with(|v| required_text(v)).unwrap_err();
        assert!(name.shows_error());
        assert_eq!(name.error(), Some(FieldError::Blank));

        name.reset("Thunder".to_string());
        assert!(name.is_valid());
        assert!(!name.is_dirty());
    }
}
