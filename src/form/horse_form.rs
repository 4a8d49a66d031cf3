//! Horse create / edit / readonly form
//!
//! The form owns one `Field` per scalar input and one `Typeahead` per
//! reference (owner, mother, father). Its mode comes from the route:
//!
//! ```text
//! /horses/create      Create    fields cleared
//! /horses/{id}/edit   Edit      record fetched
//! /horses/{id}        Readonly  record fetched
//! ```
//!
//! Mode transitions:
//! - into Create: clear everything
//! - Readonly -> Edit: no fetch
//! - Edit -> Readonly: re-fetch, unsaved edits are discarded
//! - id change: re-fetch

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use pedigree_types::{HorseDetail, HorseId, HorseMinimal, Owner, Sex};
use tracing::{debug, info, warn};

use super::field::Field;
use super::typeahead::{OwnerSuggestions, ParentSuggestions, SearchContext, Typeahead};
use super::FormMode;
use crate::context::AppContext;
use crate::error::{PedigreeError, Result};
use crate::route::Route;
use crate::validator::{self, FieldError};

/// The three typeahead-backed references of a horse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceField {
    Owner,
    Mother,
    Father,
}

pub struct HorseForm {
    ctx: AppContext,
    mode: FormMode,
    id: Option<HorseId>,
    name: Field<String>,
    description: Field<String>,
    date_of_birth: Field<Option<NaiveDate>>,
    sex: Field<Option<Sex>>,
    owner: Typeahead<Owner>,
    mother: Typeahead<HorseMinimal>,
    father: Typeahead<HorseMinimal>,
    owner_source: OwnerSuggestions,
    mother_source: ParentSuggestions,
    father_source: ParentSuggestions,
}

impl HorseForm {
    /// Empty form in create mode, not bound to any route yet
    pub fn new(ctx: AppContext) -> Self {
        let debounce = ctx.config.typeahead_debounce;
        let max = ctx.config.typeahead_max_results;
        Self {
            owner_source: OwnerSuggestions::new(Arc::clone(&ctx.owners), max),
            mother_source: ParentSuggestions::mothers(Arc::clone(&ctx.horses), max),
            father_source: ParentSuggestions::fathers(Arc::clone(&ctx.horses), max),
            ctx,
            mode: FormMode::Create,
            id: None,
            name: Field::default(),
            description: Field::default(),
            date_of_birth: Field::default(),
            sex: Field::default(),
            owner: Typeahead::new(debounce),
            mother: Typeahead::new(debounce),
            father: Typeahead::new(debounce),
        }
    }

    /// Form for `route`, with the record fetched when the route names one
    pub async fn open(ctx: AppContext, route: &Route) -> Result<Self> {
        let mut form = Self::new(ctx);
        form.on_route_change(route).await?;
        Ok(form)
    }

    /// React to a route (re)activation. Routes without a form are ignored.
    pub async fn on_route_change(&mut self, route: &Route) -> Result<()> {
        let Some(next) = route.form_mode() else {
            return Ok(());
        };
        let previous = self.mode;
        debug!("Horse form route change {} -> {} ({})", previous, next, route);

        match (next, route.horse_id()) {
            (FormMode::Create, _) | (_, None) => {
                self.set_create_mode();
                Ok(())
            }
            (_, Some(id)) => {
                let needs_fetch = self.id != Some(id)
                    || previous == FormMode::Create
                    || (previous == FormMode::Edit && next == FormMode::Readonly);
                self.mode = next;
                if needs_fetch {
                    if let Err(e) = self.request_horse_values(id).await {
                        // the route now names a horse we could not load
                        self.reset_fields();
                        return Err(e);
                    }
                }
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------
    // Mode
    // ------------------------------------------------------------------

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn id(&self) -> Option<HorseId> {
        self.id
    }

    pub fn set_create_mode(&mut self) {
        self.reset_fields();
        self.mode = FormMode::Create;
    }

    pub fn set_edit_mode(&mut self) {
        self.mode = FormMode::Edit;
    }

    /// Leave edit mode; the persisted record replaces any unsaved edits
    pub async fn set_readonly_mode(&mut self) -> Result<()> {
        let previous = self.mode;
        self.mode = FormMode::Readonly;
        match (previous, self.id) {
            (FormMode::Edit, Some(id)) => self.request_horse_values(id).await,
            _ => Ok(()),
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Horse",
            FormMode::Edit => "Edit Horse",
            FormMode::Readonly => "Details of Horse",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Horse",
            FormMode::Edit | FormMode::Readonly => "Save changes",
        }
    }

    fn is_editable(&self) -> bool {
        if self.mode == FormMode::Readonly {
            debug!("Ignoring edit in readonly mode");
            return false;
        }
        true
    }

    // ------------------------------------------------------------------
    // Scalar fields
    // ------------------------------------------------------------------

    pub fn name(&self) -> &Field<String> {
        &self.name
    }

    pub fn description(&self) -> &Field<String> {
        &self.description
    }

    pub fn date_of_birth(&self) -> &Field<Option<NaiveDate>> {
        &self.date_of_birth
    }

    pub fn sex(&self) -> &Field<Option<Sex>> {
        &self.sex
    }

    pub fn set_name(&mut self, name: &str) {
        if self.is_editable() {
            self.name.set(name.to_string());
        }
    }

    pub fn set_description(&mut self, description: &str) {
        if self.is_editable() {
            self.description.set(description.to_string());
        }
    }

    pub fn set_date_of_birth(&mut self, date: Option<NaiveDate>) {
        if self.is_editable() {
            self.date_of_birth.set(date);
        }
    }

    pub fn set_sex(&mut self, sex: Option<Sex>) {
        if self.is_editable() {
            self.sex.set(sex);
        }
    }

    // ------------------------------------------------------------------
    // References
    // ------------------------------------------------------------------

    pub fn owner(&self) -> &Typeahead<Owner> {
        &self.owner
    }

    pub fn mother(&self) -> &Typeahead<HorseMinimal> {
        &self.mother
    }

    pub fn father(&self) -> &Typeahead<HorseMinimal> {
        &self.father
    }

    /// Keystroke in a reference field
    pub fn input(&mut self, field: ReferenceField, text: &str) {
        if !self.is_editable() {
            return;
        }
        match field {
            ReferenceField::Owner => self.owner.on_input(text),
            ReferenceField::Mother => self.mother.on_input(text),
            ReferenceField::Father => self.father.on_input(text),
        }
    }

    /// Run the debounced suggestion search of `field`, if one is due
    pub async fn settle(&mut self, field: ReferenceField) -> bool {
        let search = SearchContext { exclude_id: self.id };
        match field {
            ReferenceField::Owner => self.owner.settle(&self.owner_source, &search).await,
            ReferenceField::Mother => self.mother.settle(&self.mother_source, &search).await,
            ReferenceField::Father => self.father.settle(&self.father_source, &search).await,
        }
    }

    pub fn select_owner(&mut self, owner: Owner) {
        if self.is_editable() {
            self.owner.select(owner);
        }
    }

    pub fn select_mother(&mut self, mother: HorseMinimal) {
        if self.is_editable() {
            self.mother.select(mother);
        }
    }

    pub fn select_father(&mut self, father: HorseMinimal) {
        if self.is_editable() {
            self.father.select(father);
        }
    }

    pub fn clear(&mut self, field: ReferenceField) {
        if !self.is_editable() {
            return;
        }
        match field {
            ReferenceField::Owner => self.owner.clear(),
            ReferenceField::Mother => self.mother.clear(),
            ReferenceField::Father => self.father.clear(),
        }
    }

    /// Open the mother's record in the current mode. False when there is none.
    pub fn navigate_to_mother(&self) -> bool {
        let id = self.mother.resolved().map(|m| m.id);
        self.navigate_to_parent(id)
    }

    pub fn navigate_to_father(&self) -> bool {
        let id = self.father.resolved().map(|f| f.id);
        self.navigate_to_parent(id)
    }

    fn navigate_to_parent(&self, id: Option<HorseId>) -> bool {
        let route = match (self.mode, id) {
            (FormMode::Readonly, Some(id)) => Route::horse_detail(id),
            (FormMode::Edit, Some(id)) => Route::HorseEdit { id },
            _ => return false,
        };
        self.ctx.navigator.navigate(route);
        true
    }

    // ------------------------------------------------------------------
    // Validation and submission
    // ------------------------------------------------------------------

    pub fn validate(&mut self) -> Result<()> {
        self.validate_at(Utc::now())
    }

    /// Validate every field against `now`; the error lists each failing field
    pub fn validate_at(&mut self, now: DateTime<Utc>) -> Result<()> {
        let mut failures: Vec<(&'static str, FieldError)> = Vec::new();

        if let Err(e) = self.name.validate_with(|v| validator::required_text(v)) {
            failures.push(("name", e));
        }
        if let Err(e) = self
            .description
            .validate_with(|v| validator::optional_text(v))
        {
            failures.push(("description", e));
        }
        if let Err(e) = self.date_of_birth.validate_with(|v| match v {
            Some(date) => validator::no_date_in_future(*date, now),
            None => Err(FieldError::Required),
        }) {
            failures.push(("dateOfBirth", e));
        }
        if let Err(e) = self.sex.validate_with(validator::required) {
            failures.push(("sex", e));
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(PedigreeError::Validation(failures))
        }
    }

    pub fn is_valid_at(&mut self, now: DateTime<Utc>) -> bool {
        self.validate_at(now).is_ok()
    }

    /// Trimmed record built from the field values and resolved references
    pub fn to_record(&self) -> Option<HorseDetail> {
        let description = self.description.value().trim();
        Some(HorseDetail {
            id: self.id,
            name: self.name.value().trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            date_of_birth: (*self.date_of_birth.value())?,
            sex: (*self.sex.value())?,
            owner: self.owner.resolved().cloned(),
            mother: self.mother.resolved().cloned(),
            father: self.father.resolved().cloned(),
        })
    }

    pub async fn submit(&mut self) -> Result<HorseDetail> {
        self.submit_at(Utc::now()).await
    }

    /// Validate, then create or update. Invalid forms never reach the network.
    pub async fn submit_at(&mut self, now: DateTime<Utc>) -> Result<HorseDetail> {
        if self.mode == FormMode::Readonly {
            return Err(PedigreeError::WrongMode(self.mode.as_str()));
        }
        if self.mode == FormMode::Edit && self.id.is_none() {
            return Err(PedigreeError::NotLoaded("horse"));
        }
        self.touch_all();
        self.validate_at(now)?;
        let record = self.to_record().ok_or(PedigreeError::NotLoaded("horse"))?;
        let action = self.mode.action_finished();

        let result = match self.mode {
            FormMode::Create => self.ctx.horses.create(&record).await,
            _ => self.ctx.horses.update(&record).await,
        };

        match result {
            Ok(horse) => {
                info!("Horse {} {}", horse.name, action);
                self.ctx
                    .notifier
                    .success(&format!("Horse {} successfully {}.", horse.name, action));
                self.ctx.navigator.navigate(Route::Horses);
                Ok(horse)
            }
            Err(e) => {
                warn!("Horse could not be {}: {}", action, e);
                self.ctx.notifier.error(
                    &format!("Horse could not be {}", action),
                    &e.display_message(),
                );
                Err(e.into())
            }
        }
    }

    /// Delete the loaded horse after confirmation. Ok(false) when declined.
    pub async fn delete(&mut self) -> Result<bool> {
        let id = self.id.ok_or(PedigreeError::NotLoaded("horse"))?;
        let name = self.name.value().clone();

        let prompt = format!("Are you sure you want to delete the horse \"{}\"", name);
        if !self.ctx.confirmer.confirm(&prompt).await {
            debug!("Deletion of horse {} declined", id);
            return Ok(false);
        }

        match self.ctx.horses.delete(id).await {
            Ok(()) => {
                info!("Horse {} deleted", id);
                self.ctx
                    .notifier
                    .success(&format!("Horse {} successfully deleted.", name));
                self.ctx.navigator.navigate(Route::Horses);
                Ok(true)
            }
            Err(e) => {
                warn!("Could not delete horse {}: {}", id, e);
                self.ctx
                    .notifier
                    .error("Could not delete horse.", &e.display_message());
                Err(e.into())
            }
        }
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    async fn request_horse_values(&mut self, id: HorseId) -> Result<()> {
        match self.ctx.horses.get_by_id(id).await {
            Ok(horse) => {
                self.set_form_values(horse);
                Ok(())
            }
            Err(e) => {
                warn!("Could not get horse {}: {}", id, e);
                self.ctx
                    .notifier
                    .error("Could not get horse.", &e.display_message());
                Err(e.into())
            }
        }
    }

    /// Load a fetched record; every field comes back clean
    pub fn set_form_values(&mut self, horse: HorseDetail) {
        self.id = horse.id;
        self.name.reset(horse.name);
        self.description
            .reset(horse.description.unwrap_or_default());
        self.date_of_birth.reset(Some(horse.date_of_birth));
        self.sex.reset(Some(horse.sex));
        self.owner.set_resolved(horse.owner);
        self.mother.set_resolved(horse.mother);
        self.father.set_resolved(horse.father);
    }

    fn reset_fields(&mut self) {
        self.id = None;
        self.name.reset(String::new());
        self.description.reset(String::new());
        self.date_of_birth.reset(None);
        self.sex.reset(None);
        self.owner.clear();
        self.mother.clear();
        self.father.clear();
    }

    fn touch_all(&mut self) {
        self.name.touch();
        self.description.touch();
        self.date_of_birth.touch();
        self.sex.touch();
    }
}

impl std::fmt::Debug for HorseForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HorseForm")
            .field("mode", &self.mode)
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
