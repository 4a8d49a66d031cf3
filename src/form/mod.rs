//! Form state machines
//!
//! - `field`: value + error + dirty record per input
//! - `debounce`: pending-deadline debouncer
//! - `typeahead`: substring/resolved pairs with suggestion search
//! - `horse_form`: create/edit/readonly horse form
//! - `owner_form`: owner create form

pub mod debounce;
pub mod field;
pub mod horse_form;
pub mod owner_form;
pub mod typeahead;

pub use debounce::Debouncer;
pub use field::Field;
pub use horse_form::{HorseForm, ReferenceField};
pub use owner_form::OwnerForm;
pub use typeahead::{
    DisplayName, OwnerSuggestions, ParentSuggestions, SearchContext, SearchTicket,
    SuggestionSource, Typeahead,
};

/// What the horse form currently does with its record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
    Readonly,
}

impl FormMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormMode::Create => "create",
            FormMode::Edit => "edit",
            FormMode::Readonly => "readonly",
        }
    }

    /// Past participle used in success and failure messages
    pub fn action_finished(&self) -> &'static str {
        match self {
            FormMode::Create => "created",
            FormMode::Edit | FormMode::Readonly => "edited",
        }
    }
}

impl std::fmt::Display for FormMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
