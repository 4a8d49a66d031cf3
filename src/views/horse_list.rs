//! Horse search list
//!
//! A filter form kept in sync with the result list. Every valid filter change
//! is debounced and then re-searched; repeats of the last search and invalid
//! filters never reach the backend.

use chrono::{DateTime, NaiveDate, Utc};
use pedigree_types::{Horse, HorseId, HorseSearchFilter, Sex};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::context::AppContext;
use crate::error::{PedigreeError, Result};
use crate::form::{Debouncer, Field};
use crate::validator::{self, FieldError};

/// Raw filter inputs as typed by the user
#[derive(Debug, Clone, Default)]
pub struct HorseFilterForm {
    pub name: Field<String>,
    pub description: Field<String>,
    pub date_of_birth: Field<Option<NaiveDate>>,
    pub sex: Field<Option<Sex>>,
    pub owner_full_name: Field<String>,
    pub limit: Field<Option<i64>>,
}

impl HorseFilterForm {
    /// Validate the inputs and build the search filter from trimmed values
    pub fn to_filter(&mut self, now: DateTime<Utc>) -> Result<HorseSearchFilter> {
        let mut failures: Vec<(&'static str, FieldError)> = Vec::new();

        if let Err(e) = self.name.validate_with(|v| validator::optional_text(v)) {
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
            None => Ok(()),
        }) {
            failures.push(("dateOfBirth", e));
        }
        if let Err(e) = self
            .owner_full_name
            .validate_with(|v| validator::optional_text(v))
        {
            failures.push(("ownerFullNameSubstring", e));
        }
        if let Err(e) = self.limit.validate_with(|v| match v {
            Some(limit) => validator::positive(*limit),
            None => Ok(()),
        }) {
            failures.push(("limit", e));
        }

        if !failures.is_empty() {
            return Err(PedigreeError::Validation(failures));
        }

        Ok(HorseSearchFilter {
            name: non_empty(self.name.value()),
            description: non_empty(self.description.value()),
            date_of_birth: *self.date_of_birth.value(),
            sex: *self.sex.value(),
            owner_full_name_substring: non_empty(self.owner_full_name.value()),
            limit: *self.limit.value(),
            ..Default::default()
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub struct HorseList {
    ctx: AppContext,
    form: HorseFilterForm,
    debouncer: Debouncer<HorseSearchFilter>,
    horses: Vec<Horse>,
    banner_error: Option<String>,
}

impl HorseList {
    pub fn new(ctx: AppContext) -> Self {
        let debounce = ctx.config.search_debounce;
        Self {
            ctx,
            form: HorseFilterForm::default(),
            debouncer: Debouncer::new(debounce),
            horses: Vec::new(),
            banner_error: None,
        }
    }

    /// List with the unfiltered search already loaded
    pub async fn open(ctx: AppContext) -> Self {
        let mut list = Self::new(ctx);
        // failures are kept in the banner
        let _ = list.reload().await;
        list
    }

    pub fn horses(&self) -> &[Horse] {
        &self.horses
    }

    pub fn banner_error(&self) -> Option<&str> {
        self.banner_error.as_deref()
    }

    pub fn form(&self) -> &HorseFilterForm {
        &self.form
    }

    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn set_name(&mut self, value: &str) {
        self.form.name.set(value.to_string());
        self.on_filter_change();
    }

    pub fn set_description(&mut self, value: &str) {
        self.form.description.set(value.to_string());
        self.on_filter_change();
    }

    pub fn set_date_of_birth(&mut self, value: Option<NaiveDate>) {
        self.form.date_of_birth.set(value);
        self.on_filter_change();
    }

    pub fn set_sex(&mut self, value: Option<Sex>) {
        self.form.sex.set(value);
        self.on_filter_change();
    }

    pub fn set_owner_full_name(&mut self, value: &str) {
        self.form.owner_full_name.set(value.to_string());
        self.on_filter_change();
    }

    pub fn set_limit(&mut self, value: Option<i64>) {
        self.form.limit.set(value);
        self.on_filter_change();
    }

    /// Schedule a search for a valid filter; an invalid one drops any pending search
    fn on_filter_change(&mut self) {
        match self.form.to_filter(Utc::now()) {
            Ok(filter) => {
                self.debouncer.push(filter);
            }
            Err(e) => {
                debug!("Filter invalid, search suppressed: {}", e);
                self.debouncer.cancel();
            }
        }
    }

    /// Search if the debounce window for a pending filter has closed by `now`.
    /// For event loops that keep their own clock; returns true when a search ran.
    pub async fn run_due(&mut self, now: Instant) -> Result<bool> {
        let Some(filter) = self.debouncer.poll(now) else {
            return Ok(false);
        };
        self.search(&filter).await?;
        Ok(true)
    }

    /// Wait out the debounce window and search if a new filter is due.
    /// Returns true when a search ran.
    pub async fn settle(&mut self) -> Result<bool> {
        let Some(filter) = self.debouncer.settle().await else {
            return Ok(false);
        };
        self.search(&filter).await?;
        Ok(true)
    }

    /// Search with the current filter right away
    pub async fn reload(&mut self) -> Result<()> {
        let filter = self.form.to_filter(Utc::now())?;
        self.debouncer.cancel();
        self.debouncer.mark_dispatched(filter.clone());
        self.search(&filter).await
    }

    async fn search(&mut self, filter: &HorseSearchFilter) -> Result<()> {
        match self.ctx.horses.search(filter).await {
            Ok(horses) => {
                debug!("Loaded {} horses", horses.len());
                self.horses = horses;
                self.banner_error = None;
                Ok(())
            }
            Err(e) => {
                warn!("Error fetching horses: {}", e);
                self.banner_error = Some(format!("Could not fetch horses: {}", e.display_message()));
                self.ctx
                    .notifier
                    .error("Could Not Fetch Horses", &e.display_message());
                Err(e.into())
            }
        }
    }

    /// Confirm, delete and reload. The list is untouched unless the delete succeeded.
    pub async fn delete(&mut self, id: HorseId) -> Result<bool> {
        let name = self
            .horses
            .iter()
            .find(|h| h.id == Some(id))
            .map(|h| h.name.clone())
            .ok_or(PedigreeError::NotLoaded("horse"))?;

        let prompt = format!("Are you sure you want to delete the horse \"{}\"", name);
        if !self.ctx.confirmer.confirm(&prompt).await {
            return Ok(false);
        }

        if let Err(e) = self.ctx.horses.delete(id).await {
            warn!("Could not delete horse {}: {}", id, e);
            self.ctx
                .notifier
                .error("Could not delete horse.", &e.display_message());
            return Err(e.into());
        }

        info!("Horse {} deleted", id);
        self.ctx
            .notifier
            .success(&format!("Horse {} successfully deleted.", name));
        self.reload().await?;
        Ok(true)
    }
}

impl std::fmt::Debug for HorseList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HorseList")
            .field("horses", &self.horses.len())
            .field("banner_error", &self.banner_error)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_filter_trims_and_drops_empty() {
        let mut form = HorseFilterForm::default();
        form.name.set("  Wen ".into());
        form.owner_full_name.set(String::new());
        form.sex.set(Some(Sex::Female));

        let filter = form.to_filter(now()).unwrap();
        assert_eq!(filter.name.as_deref(), Some("Wen"));
        assert_eq!(filter.owner_full_name_substring, None);
        assert_eq!(filter.sex, Some(Sex::Female));
    }

    #[test]
    fn test_invalid_filters() {
        let mut form = HorseFilterForm::default();
        form.name.set("   ".into());
        assert!(form.to_filter(now()).is_err());

        let mut form = HorseFilterForm::default();
        form.date_of_birth.set(NaiveDate::from_ymd_opt(2030, 1, 1));
        assert!(form.to_filter(now()).is_err());

        let mut form = HorseFilterForm::default();
        form.limit.set(Some(0));
        match form.to_filter(now()) {
            Err(PedigreeError::Validation(fields)) => {
                assert_eq!(fields, vec![("limit", FieldError::NotPositive)])
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
