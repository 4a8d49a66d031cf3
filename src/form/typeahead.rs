//! Typeahead lookup for reference fields
//!
//! A reference field pairs the free-text substring the user types with the
//! entity actually resolved from the suggestions. Only the resolved entity is
//! ever submitted.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pedigree_types::{HorseId, HorseMinimal, HorseSearchFilter, Owner, OwnerSearchFilter, Sex};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::debounce::Debouncer;
use crate::api::{HorseApi, OwnerApi};
use crate::error::{ApiError, ApiResult};

/// Canonical display string written into the substring on selection
pub trait DisplayName {
    fn display_name(&self) -> String;
}

impl DisplayName for Owner {
    fn display_name(&self) -> String {
        self.full_name()
    }
}

impl DisplayName for HorseMinimal {
    fn display_name(&self) -> String {
        self.name.clone()
    }
}

/// Per-call context a suggestion search may depend on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchContext {
    /// Horse currently being edited, never offered as its own parent
    pub exclude_id: Option<HorseId>,
}

#[async_trait]
pub trait SuggestionSource<E>: Send + Sync {
    /// Search with an already trimmed, non-empty text
    async fn search(&self, text: &str, ctx: &SearchContext) -> ApiResult<Vec<E>>;
}

/// Resolve suggestions for `text`. Blank text yields nothing and never
/// reaches the source.
pub async fn suggestions_for<E>(
    source: &dyn SuggestionSource<E>,
    text: &str,
    ctx: &SearchContext,
) -> ApiResult<Vec<E>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    source.search(text, ctx).await
}

/// Owners by full-name substring
pub struct OwnerSuggestions {
    api: Arc<dyn OwnerApi>,
    max_results: i64,
}

impl OwnerSuggestions {
    pub fn new(api: Arc<dyn OwnerApi>, max_results: i64) -> Self {
        Self { api, max_results }
    }
}

#[async_trait]
impl SuggestionSource<Owner> for OwnerSuggestions {
    async fn search(&self, text: &str, _ctx: &SearchContext) -> ApiResult<Vec<Owner>> {
        let filter = OwnerSearchFilter {
            full_name_substring: Some(text.to_string()),
            max_result_count: Some(self.max_results),
        };
        self.api.search(&filter).await
    }
}

/// Parent candidates: horses of one sex by name substring, minus the horse being edited
pub struct ParentSuggestions {
    api: Arc<dyn HorseApi>,
    sex: Sex,
    max_results: i64,
}

impl ParentSuggestions {
    pub fn mothers(api: Arc<dyn HorseApi>, max_results: i64) -> Self {
        Self {
            api,
            sex: Sex::Female,
            max_results,
        }
    }

    pub fn fathers(api: Arc<dyn HorseApi>, max_results: i64) -> Self {
        Self {
            api,
            sex: Sex::Male,
            max_results,
        }
    }

    pub fn filter_for(&self, text: &str, ctx: &SearchContext) -> HorseSearchFilter {
        HorseSearchFilter {
            name: Some(text.to_string()),
            sex: Some(self.sex),
            limit: Some(self.max_results),
            id_of_horse_to_be_excluded: ctx.exclude_id,
            ..Default::default()
        }
    }
}

#[async_trait]
impl SuggestionSource<HorseMinimal> for ParentSuggestions {
    async fn search(&self, text: &str, ctx: &SearchContext) -> ApiResult<Vec<HorseMinimal>> {
        let horses = self.api.search(&self.filter_for(text, ctx)).await?;
        Ok(horses
            .into_iter()
            .filter_map(|h| {
                Some(HorseMinimal {
                    id: h.id?,
                    name: h.name,
                    date_of_birth: h.date_of_birth,
                    sex: h.sex,
                })
            })
            .collect())
    }
}

/// A dispatched search. Results are only applied for the newest ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Typeahead<E> {
    substring: String,
    resolved: Option<E>,
    suggestions: Vec<E>,
    debouncer: Debouncer<String>,
    seq: u64,
    last_error: Option<ApiError>,
}

impl<E: DisplayName + Clone + Send> Typeahead<E> {
    pub fn new(debounce: Duration) -> Self {
        Self {
            substring: String::new(),
            resolved: None,
            suggestions: Vec::new(),
            debouncer: Debouncer::new(debounce),
            seq: 0,
            last_error: None,
        }
    }

    pub fn substring(&self) -> &str {
        &self.substring
    }

    pub fn resolved(&self) -> Option<&E> {
        self.resolved.as_ref()
    }

    pub fn suggestions(&self) -> &[E] {
        &self.suggestions
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Keystroke: update the substring and restart the quiescence timer
    pub fn on_input(&mut self, text: &str) {
        self.substring = text.to_string();
        self.debouncer.push(text.to_string());
    }

    /// Ticket for the pending text if its timer expired and it is not a repeat
    pub fn poll_due(&mut self, now: Instant) -> Option<SearchTicket> {
        let text = self.debouncer.poll(now)?;
        Some(self.begin(text))
    }

    fn begin(&mut self, text: String) -> SearchTicket {
        self.seq += 1;
        SearchTicket {
            seq: self.seq,
            text,
        }
    }

    /// Apply search results. Stale tickets are discarded; returns whether applied.
    pub fn apply(&mut self, ticket: &SearchTicket, result: ApiResult<Vec<E>>) -> bool {
        if ticket.seq != self.seq {
            debug!(
                "Discarding stale suggestions for '{}' (ticket {}, latest {})",
                ticket.text, ticket.seq, self.seq
            );
            return false;
        }
        match result {
            Ok(suggestions) => {
                self.suggestions = suggestions;
                self.last_error = None;
            }
            Err(e) => {
                warn!("Suggestion search for '{}' failed: {}", ticket.text, e);
                self.suggestions.clear();
                self.last_error = Some(e);
            }
        }
        true
    }

    /// Wait out the debounce window and run the search if one is due.
    /// Returns true when new suggestions were applied.
    pub async fn settle(&mut self, source: &dyn SuggestionSource<E>, ctx: &SearchContext) -> bool {
        let Some(text) = self.debouncer.settle().await else {
            return false;
        };
        let ticket = self.begin(text);
        let result = suggestions_for(source, &ticket.text, ctx).await;
        self.apply(&ticket, result)
    }

    /// Take a suggestion: resolve it and show its display string
    pub fn select(&mut self, entity: E) {
        self.substring = entity.display_name();
        self.resolved = Some(entity);
        self.suggestions.clear();
        self.debouncer.cancel();
    }

    /// Reset both the substring and the resolved entity
    pub fn clear(&mut self) {
        self.substring.clear();
        self.resolved = None;
        self.suggestions.clear();
        self.debouncer.reset();
        self.last_error = None;
    }

    /// Load a resolved value from a fetched record
    pub fn set_resolved(&mut self, entity: Option<E>) {
        self.clear();
        if let Some(entity) = entity {
            self.substring = entity.display_name();
            self.resolved = Some(entity);
        }
    }
}
