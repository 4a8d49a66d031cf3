//! Navigation routes and query state
//!
//! ```text
//! /horses                 list
//! /horses/create          create form
//! /horses/{id}?limit=n    detail + family tree
//! /horses/{id}/edit       edit form
//! /owners                 owner list
//! /owners/create          owner form
//! ```
//!
//! Anything else redirects to `/horses`.

use std::fmt;

use pedigree_types::HorseId;
use url::form_urlencoded;

use crate::config::DEFAULT_TREE_LIMIT;
use crate::form::FormMode;

/// Query state persisted in the URL. `limit` is kept raw so that a
/// non-numeric value can fall back to the default instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub limit: Option<String>,
}

impl QueryState {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit.to_string()),
        }
    }

    pub fn parse(query: &str) -> Self {
        let mut state = Self::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            if key == "limit" {
                state.limit = Some(value.into_owned());
            }
        }
        state
    }

    pub fn has_limit(&self) -> bool {
        self.limit.is_some()
    }

    /// Positive numeric limit, or `default` when absent, non-numeric or zero
    pub fn limit_or(&self, default: u32) -> u32 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(default)
    }

    pub fn limit(&self) -> u32 {
        self.limit_or(DEFAULT_TREE_LIMIT)
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(limit) = &self.limit {
            serializer.append_pair("limit", limit);
        }
        serializer.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Horses,
    HorseCreate,
    HorseDetail { id: HorseId, query: QueryState },
    HorseEdit { id: HorseId },
    Owners,
    OwnerCreate,
}

impl Route {
    pub fn horse_detail(id: HorseId) -> Self {
        Route::HorseDetail {
            id,
            query: QueryState::default(),
        }
    }

    /// Parse a path with optional query string; unknown paths redirect to the list.
    pub fn parse(input: &str) -> Self {
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, query),
            None => (input, ""),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["horses"] => Route::Horses,
            ["horses", "create"] => Route::HorseCreate,
            ["horses", id] => match id.parse() {
                Ok(id) => Route::HorseDetail {
                    id,
                    query: QueryState::parse(query),
                },
                Err(_) => Route::Horses,
            },
            ["horses", id, "edit"] => match id.parse() {
                Ok(id) => Route::HorseEdit { id },
                Err(_) => Route::Horses,
            },
            ["owners"] => Route::Owners,
            ["owners", "create"] => Route::OwnerCreate,
            _ => Route::Horses,
        }
    }

    /// Form mode carried as route data, for routes that show the horse form
    pub fn form_mode(&self) -> Option<FormMode> {
        match self {
            Route::HorseCreate => Some(FormMode::Create),
            Route::HorseEdit { .. } => Some(FormMode::Edit),
            Route::HorseDetail { .. } => Some(FormMode::Readonly),
            _ => None,
        }
    }

    pub fn horse_id(&self) -> Option<HorseId> {
        match self {
            Route::HorseDetail { id, .. } | Route::HorseEdit { id } => Some(*id),
            _ => None,
        }
    }

    pub fn query(&self) -> Option<&QueryState> {
        match self {
            Route::HorseDetail { query, .. } => Some(query),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Horses => write!(f, "/horses"),
            Route::HorseCreate => write!(f, "/horses/create"),
            Route::HorseDetail { id, query } => {
                let query = query.to_query_string();
                if query.is_empty() {
                    write!(f, "/horses/{}", id)
                } else {
                    write!(f, "/horses/{}?{}", id, query)
                }
            }
            Route::HorseEdit { id } => write!(f, "/horses/{}/edit", id),
            Route::Owners => write!(f, "/owners"),
            Route::OwnerCreate => write!(f, "/owners/create"),
        }
    }
}
