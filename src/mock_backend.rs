//! In-memory mock of the pedigree REST backend
//!
//! Serves the horse and owner endpoints from a store held in memory, with the
//! same validation the real backend applies. Used by the end-to-end tests and
//! by `pedigree_mock_server` for local demos.
//!
//! Status codes: 422 for invalid input, 409 for conflicts with stored state,
//! 404 for unknown ids. Error bodies are `ErrorPayload`s.

use std::collections::{BTreeMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{NaiveDate, Utc};
use pedigree_types::{
    ErrorPayload, FamilyTreeNode, Horse, HorseDetail, HorseId, HorseMinimal, HorseSearchFilter,
    Owner, OwnerId, OwnerSearchFilter, Sex,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::error::ConfigError;
use crate::validator;

/// Generations returned when the family tree request names no limit
pub const DEFAULT_FAMILY_TREE_LIMIT: i64 = 1000;

const MAX_NAME_LEN: usize = 255;
const MAX_DESCRIPTION_LEN: usize = 4095;

/// Mock server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for MockServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl MockServerConfig {
    /// `PEDIGREE_MOCK_HOST` / `PEDIGREE_MOCK_PORT` over the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("PEDIGREE_MOCK_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("PEDIGREE_MOCK_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PEDIGREE_MOCK_PORT".to_string(),
                value: port.clone(),
            })?;
        }
        Ok(config)
    }

    /// Any free port on localhost, for tests
    pub fn ephemeral() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Error response: status plus `ErrorPayload` body
#[derive(Debug, Clone, PartialEq)]
pub struct BackendError {
    pub status: StatusCode,
    pub payload: ErrorPayload,
}

impl BackendError {
    fn new(status: StatusCode, message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            status,
            payload: ErrorPayload::new(message, errors),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, Vec::new())
    }

    fn validation(message: &str, errors: Vec<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message, errors)
    }

    fn conflict(message: &str, errors: Vec<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message, errors)
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        warn!(
            "{} {}: {:?}",
            self.status.as_u16(),
            self.payload.message,
            self.payload.errors
        );
        (self.status, Json(self.payload)).into_response()
    }
}

type BackendResult<T> = Result<T, BackendError>;

/// Collected validation and conflict messages of one request
#[derive(Default)]
struct Findings {
    validation: Vec<String>,
    conflicts: Vec<String>,
}

impl Findings {
    fn into_result(self, validation_msg: &str, conflict_msg: &str) -> BackendResult<()> {
        if !self.validation.is_empty() {
            return Err(BackendError::validation(validation_msg, self.validation));
        }
        if !self.conflicts.is_empty() {
            return Err(BackendError::conflict(conflict_msg, self.conflicts));
        }
        Ok(())
    }
}

fn check_text(
    label: &str,
    value: Option<&str>,
    required: bool,
    max_len: usize,
    errors: &mut Vec<String>,
) {
    let Some(value) = value else {
        if required {
            errors.push(format!("{} must be specified", label));
        }
        return;
    };
    if value.trim().is_empty() {
        errors.push(format!("{} is given but blank", label));
    }
    if value.chars().count() > max_len {
        errors.push(format!(
            "{} too long: longer than {} characters",
            label, max_len
        ));
    }
    if value.len() != value.trim().len() {
        errors.push(format!("{} must not start/end with whitespaces", label));
    }
}

// ============================================================================
// STORE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredHorse {
    id: HorseId,
    name: String,
    description: Option<String>,
    date_of_birth: NaiveDate,
    sex: Sex,
    owner_id: Option<OwnerId>,
    mother_id: Option<HorseId>,
    father_id: Option<HorseId>,
}

impl StoredHorse {
    fn minimal(&self) -> HorseMinimal {
        HorseMinimal {
            id: self.id,
            name: self.name.clone(),
            date_of_birth: self.date_of_birth,
            sex: self.sex,
        }
    }

    fn is_child_of(&self, parent: HorseId) -> bool {
        self.mother_id == Some(parent) || self.father_id == Some(parent)
    }
}

/// Horses and owners, keyed by id
#[derive(Debug, Default)]
pub struct MockStore {
    horses: BTreeMap<HorseId, StoredHorse>,
    owners: BTreeMap<OwnerId, Owner>,
    next_horse_id: HorseId,
    next_owner_id: OwnerId,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            next_horse_id: 1,
            next_owner_id: 1,
            ..Default::default()
        }
    }

    /// A small stable with three generations, for demos
    pub fn with_sample_data() -> Self {
        let mut store = Self::new();
        let today = Utc::now().date_naive();
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(today);

        let anna = store.insert_owner("Anna", "Berg", Some("anna.berg@stable.at"));
        let max = store.insert_owner("Max", "Huber", None);

        let grandma = store.insert_horse("Old Mare", Some("Grey"), date(2002, 4, 1), Sex::Female, None, None, None);
        let sire = store.insert_horse("Storm", None, date(2008, 6, 12), Sex::Male, Some(max), None, None);
        let mare = store.insert_horse("Wendy", Some("Bay mare"), date(2012, 3, 9), Sex::Female, Some(anna), Some(grandma), None);
        store.insert_horse("Thunderbolt", None, date(2019, 5, 20), Sex::Male, Some(anna), Some(mare), Some(sire));
        store.insert_horse("Hurricane", None, date(2020, 7, 2), Sex::Female, None, Some(mare), Some(sire));
        store
    }

    fn insert_owner(&mut self, first: &str, last: &str, email: Option<&str>) -> OwnerId {
        let id = self.next_owner_id;
        self.next_owner_id += 1;
        self.owners.insert(
            id,
            Owner {
                id: Some(id),
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: email.map(str::to_string),
            },
        );
        id
    }

    #[allow(clippy::too_many_arguments)]
    fn insert_horse(
        &mut self,
        name: &str,
        description: Option<&str>,
        date_of_birth: NaiveDate,
        sex: Sex,
        owner_id: Option<OwnerId>,
        mother_id: Option<HorseId>,
        father_id: Option<HorseId>,
    ) -> HorseId {
        let id = self.next_horse_id;
        self.next_horse_id += 1;
        self.horses.insert(
            id,
            StoredHorse {
                id,
                name: name.to_string(),
                description: description.map(str::to_string),
                date_of_birth,
                sex,
                owner_id,
                mother_id,
                father_id,
            },
        );
        id
    }

    pub fn horse_count(&self) -> usize {
        self.horses.len()
    }

    fn owner(&self, id: Option<OwnerId>) -> Option<Owner> {
        id.and_then(|id| self.owners.get(&id).cloned())
    }

    fn minimal(&self, id: Option<HorseId>) -> Option<HorseMinimal> {
        id.and_then(|id| self.horses.get(&id)).map(StoredHorse::minimal)
    }

    fn detail(&self, horse: &StoredHorse) -> HorseDetail {
        HorseDetail {
            id: Some(horse.id),
            name: horse.name.clone(),
            description: horse.description.clone(),
            date_of_birth: horse.date_of_birth,
            sex: horse.sex,
            owner: self.owner(horse.owner_id),
            mother: self.minimal(horse.mother_id),
            father: self.minimal(horse.father_id),
        }
    }

    fn children_of(&self, id: HorseId) -> Vec<&StoredHorse> {
        self.horses.values().filter(|h| h.is_child_of(id)).collect()
    }

    /// True if `target` appears in the ancestry of `start` (`start` included)
    fn has_ancestor(&self, start: HorseId, target: HorseId) -> bool {
        let mut stack = vec![start];
        let mut seen = HashSet::new();
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }
            if let Some(horse) = self.horses.get(&id) {
                stack.extend(horse.mother_id);
                stack.extend(horse.father_id);
            }
        }
        false
    }

    // ------------------------------------------------------------------
    // Horses
    // ------------------------------------------------------------------

    pub fn get_horse(&self, id: HorseId) -> BackendResult<HorseDetail> {
        self.horses
            .get(&id)
            .map(|h| self.detail(h))
            .ok_or_else(|| BackendError::not_found(format!("No horse with ID {} found", id)))
    }

    pub fn search_horses(
        &self,
        filter: &HorseSearchFilter,
        today: NaiveDate,
    ) -> BackendResult<Vec<Horse>> {
        let mut findings = Findings::default();
        check_text("Horse name", filter.name.as_deref(), false, MAX_NAME_LEN, &mut findings.validation);
        check_text(
            "Horse description",
            filter.description.as_deref(),
            false,
            MAX_DESCRIPTION_LEN,
            &mut findings.validation,
        );
        if filter.date_of_birth.is_some_and(|d| d > today) {
            findings
                .validation
                .push("Date used for filtering horses must not be in the future".to_string());
        }
        if filter.limit.is_some_and(|l| l <= 0) {
            findings.validation.push("Limit must be > 0".to_string());
        }
        if filter
            .id_of_horse_to_be_excluded
            .is_some_and(|id| !self.horses.contains_key(&id))
        {
            findings
                .conflicts
                .push("Horse to be excluded from search not found in database".to_string());
        }
        if filter
            .owner_id
            .is_some_and(|id| !self.owners.contains_key(&id))
        {
            findings
                .conflicts
                .push("Owner of search-filter not found in database".to_string());
        }
        findings.into_result(
            "Validation of horse search filter failed",
            "Conflict-Validation of horse search filter failed",
        )?;

        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };

        let matches = self.horses.values().filter(|h| {
            filter.name.as_deref().map_or(true, |n| contains(&h.name, n))
                && filter.description.as_deref().map_or(true, |d| {
                    h.description.as_deref().is_some_and(|desc| contains(desc, d))
                })
                && filter.date_of_birth.map_or(true, |d| h.date_of_birth == d)
                && filter.sex.map_or(true, |s| h.sex == s)
                && filter.owner_id.map_or(true, |o| h.owner_id == Some(o))
                && filter.owner_full_name_substring.as_deref().map_or(true, |o| {
                    self.owner(h.owner_id)
                        .is_some_and(|owner| contains(&owner.full_name(), o))
                })
                && filter.id_of_horse_to_be_excluded != Some(h.id)
        });

        let limit = filter.limit.map_or(usize::MAX, |l| l as usize);
        Ok(matches
            .take(limit)
            .map(|h| Horse::from(self.detail(h)))
            .collect())
    }

    /// Rules shared by create and update
    fn check_horse(&self, horse: &HorseDetail, today: NaiveDate, findings: &mut Findings) {
        check_text("Horse name", Some(&horse.name), true, MAX_NAME_LEN, &mut findings.validation);
        check_text(
            "Horse description",
            horse.description.as_deref(),
            false,
            MAX_DESCRIPTION_LEN,
            &mut findings.validation,
        );
        if horse.date_of_birth > today {
            findings
                .validation
                .push("Date of birth must not be in the future".to_string());
        }

        if let Some(owner) = &horse.owner {
            match owner.id {
                Some(id) if self.owners.contains_key(&id) => {}
                Some(_) => findings
                    .conflicts
                    .push("Could not find provided owner in the database".to_string()),
                None => findings
                    .validation
                    .push("Owner reference must carry an id".to_string()),
            }
        }

        for (parent, role, sex) in [
            (&horse.mother, "mother", Sex::Female),
            (&horse.father, "father", Sex::Male),
        ] {
            let Some(parent) = parent else { continue };
            match self.horses.get(&parent.id) {
                None => findings
                    .conflicts
                    .push(format!("Could not find provided {} in the database", role)),
                Some(stored) => {
                    if stored.sex != sex {
                        findings.validation.push(format!(
                            "{}'s sex must be {}",
                            capitalize(role),
                            sex.as_str().to_lowercase()
                        ));
                    }
                    if horse.date_of_birth < stored.date_of_birth {
                        findings
                            .conflicts
                            .push(format!("Horse must be younger than its {}", role));
                    }
                }
            }
        }

        if let (Some(mother), Some(father)) = (horse.mother_id(), horse.father_id()) {
            if mother == father {
                findings
                    .validation
                    .push("Mother ID must not equal Father ID".to_string());
            }
        }
    }

    pub fn create_horse(&mut self, horse: HorseDetail, today: NaiveDate) -> BackendResult<HorseDetail> {
        let mut findings = Findings::default();
        self.check_horse(&horse, today, &mut findings);
        findings.into_result(
            "Validation of horse for create failed",
            "Conflict arose while trying to create horse",
        )?;

        let id = self.insert_horse(
            &horse.name,
            horse.description.as_deref(),
            horse.date_of_birth,
            horse.sex,
            horse.owner_id(),
            horse.mother_id(),
            horse.father_id(),
        );
        info!("Created horse {} ({})", id, horse.name);
        self.get_horse(id)
    }

    pub fn update_horse(
        &mut self,
        id: HorseId,
        mut horse: HorseDetail,
        today: NaiveDate,
    ) -> BackendResult<HorseDetail> {
        let old = self
            .horses
            .get(&id)
            .cloned()
            .ok_or_else(|| BackendError::not_found(format!("No horse with ID {} found", id)))?;
        horse.id = Some(id);

        let mut findings = Findings::default();
        self.check_horse(&horse, today, &mut findings);
        if horse.mother_id() == Some(id) || horse.father_id() == Some(id) {
            findings
                .validation
                .push("A horse cannot be the parent of itself".to_string());
        } else if [horse.mother_id(), horse.father_id()]
            .into_iter()
            .flatten()
            .any(|parent| self.has_ancestor(parent, id))
        {
            findings
                .conflicts
                .push("A horse cannot be its own ancestor".to_string());
        }

        let children = self.children_of(id);
        if old.sex != horse.sex && !children.is_empty() {
            findings.conflicts.push(
                "Cannot change the sex of the horse since at least one child already has it as their (female/male) parent"
                    .to_string(),
            );
            findings.conflicts.push(format!(
                "The following horse-children already have this horse as their parent:\n{:?}",
                children.iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
            ));
        }
        if old.date_of_birth != horse.date_of_birth {
            let older: Vec<&str> = children
                .iter()
                .filter(|c| c.date_of_birth < horse.date_of_birth)
                .map(|c| c.name.as_str())
                .collect();
            if !older.is_empty() {
                findings.conflicts.push(
                    "Cannot change date of birth: at least one of its children would become older than the horse"
                        .to_string(),
                );
                findings.conflicts.push(format!(
                    "The following children would become older than their parent:\n{:?}",
                    older
                ));
            }
        }
        findings.into_result(
            "Validation of horse-update data failed",
            "Conflict arose while trying to update horse data",
        )?;

        self.horses.insert(
            id,
            StoredHorse {
                id,
                name: horse.name.clone(),
                description: horse.description.clone(),
                date_of_birth: horse.date_of_birth,
                sex: horse.sex,
                owner_id: horse.owner_id(),
                mother_id: horse.mother_id(),
                father_id: horse.father_id(),
            },
        );
        info!("Updated horse {}", id);
        self.get_horse(id)
    }

    /// Remove a horse; its children lose the parent reference
    pub fn delete_horse(&mut self, id: HorseId) -> BackendResult<()> {
        if self.horses.remove(&id).is_none() {
            return Err(BackendError::not_found("Horse to be deleted doesn't exist"));
        }
        for horse in self.horses.values_mut() {
            if horse.mother_id == Some(id) {
                horse.mother_id = None;
            }
            if horse.father_id == Some(id) {
                horse.father_id = None;
            }
        }
        info!("Deleted horse {}", id);
        Ok(())
    }

    /// Ancestry of `id` up to `limit` generations, the horse itself being the first
    pub fn family_tree(&self, id: HorseId, limit: i64) -> BackendResult<FamilyTreeNode> {
        if limit <= 0 {
            return Err(BackendError::validation(
                "Invalid family tree request parameters",
                vec!["Limit must be > 0".to_string()],
            ));
        }
        self.tree_node(id, 1, limit)
            .ok_or_else(|| BackendError::not_found(format!("No horse with ID {} found", id)))
    }

    fn tree_node(&self, id: HorseId, generation: i64, limit: i64) -> Option<FamilyTreeNode> {
        let horse = self.horses.get(&id)?;
        let parent = |parent_id: Option<HorseId>| {
            if generation >= limit {
                return None;
            }
            parent_id
                .and_then(|p| self.tree_node(p, generation + 1, limit))
                .map(Box::new)
        };
        Some(FamilyTreeNode {
            id: horse.id,
            name: horse.name.clone(),
            date_of_birth: horse.date_of_birth,
            sex: horse.sex,
            mother: parent(horse.mother_id),
            father: parent(horse.father_id),
        })
    }

    // ------------------------------------------------------------------
    // Owners
    // ------------------------------------------------------------------

    pub fn search_owners(&self, filter: &OwnerSearchFilter) -> BackendResult<Vec<Owner>> {
        let mut errors = Vec::new();
        check_text(
            "Full name substring",
            filter.full_name_substring.as_deref(),
            false,
            MAX_NAME_LEN * 2 + 1,
            &mut errors,
        );
        if filter.max_result_count.is_some_and(|m| m <= 0) {
            errors.push("Max result count must be > 0".to_string());
        }
        if !errors.is_empty() {
            return Err(BackendError::validation(
                "Validation of owner search failed",
                errors,
            ));
        }

        let needle = filter
            .full_name_substring
            .as_deref()
            .map(str::to_lowercase);
        let limit = filter.max_result_count.map_or(usize::MAX, |m| m as usize);
        Ok(self
            .owners
            .values()
            .filter(|o| {
                needle
                    .as_deref()
                    .map_or(true, |n| o.full_name().to_lowercase().contains(n))
            })
            .take(limit)
            .cloned()
            .collect())
    }

    pub fn create_owner(&mut self, owner: Owner) -> BackendResult<Owner> {
        let mut errors = Vec::new();
        check_text("First name", Some(&owner.first_name), true, MAX_NAME_LEN, &mut errors);
        check_text("Last name", Some(&owner.last_name), true, MAX_NAME_LEN, &mut errors);
        if let Some(email) = owner.email.as_deref() {
            if email.trim().is_empty() || validator::email(email).is_err() {
                errors.push("Invalid e-mail for new owner".to_string());
            }
        }
        if !errors.is_empty() {
            return Err(BackendError::validation(
                "Validation of owner to be created failed",
                errors,
            ));
        }

        let id = self.insert_owner(&owner.first_name, &owner.last_name, owner.email.as_deref());
        info!("Created owner {} ({})", id, owner.full_name());
        self.owners
            .get(&id)
            .cloned()
            .ok_or_else(|| BackendError::not_found(format!("No owner with ID {} found", id)))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// SERVER
// ============================================================================

/// Shared handler state
#[derive(Clone)]
pub struct MockState {
    pub store: Arc<RwLock<MockStore>>,
}

#[derive(Debug, Deserialize)]
struct FamilyTreeQuery {
    limit: Option<i64>,
}

pub struct MockBackend {
    config: MockServerConfig,
    state: MockState,
}

impl MockBackend {
    pub fn new(config: MockServerConfig) -> Self {
        Self::with_store(config, MockStore::new())
    }

    pub fn with_store(config: MockServerConfig, store: MockStore) -> Self {
        Self {
            config,
            state: MockState {
                store: Arc::new(RwLock::new(store)),
            },
        }
    }

    /// Handle on the store, for seeding and inspecting from tests
    pub fn store(&self) -> Arc<RwLock<MockStore>> {
        Arc::clone(&self.state.store)
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/horses", get(search_horses).post(create_horse))
            .route(
                "/horses/:id",
                get(get_horse).put(update_horse).delete(delete_horse),
            )
            .route("/horses/:id/familyTree", get(family_tree))
            .route("/owners", get(search_owners).post(create_owner))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(
                        CorsLayer::new()
                            .allow_origin(Any)
                            .allow_methods(Any)
                            .allow_headers(Any),
                    ),
            )
            .with_state(self.state.clone())
    }

    /// Serve until the process ends
    pub async fn start(self) -> std::io::Result<()> {
        let app = self.router();
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!("Starting mock pedigree backend on {}", addr);
        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await
    }

    /// Serve on a background task; returns the bound address
    pub async fn spawn(self) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let app = self.router();
        let listener =
            TcpListener::bind(format!("{}:{}", self.config.host, self.config.port)).await?;
        let addr = listener.local_addr()?;
        info!("Mock pedigree backend listening on {}", addr);

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("Mock backend stopped: {}", e);
            }
        });
        Ok((addr, handle))
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

async fn search_horses(
    State(state): State<MockState>,
    Query(filter): Query<HorseSearchFilter>,
) -> BackendResult<Json<Vec<Horse>>> {
    let store = state.store.read().await;
    store.search_horses(&filter, today()).map(Json)
}

async fn get_horse(
    State(state): State<MockState>,
    Path(id): Path<HorseId>,
) -> BackendResult<Json<HorseDetail>> {
    state.store.read().await.get_horse(id).map(Json)
}

async fn create_horse(
    State(state): State<MockState>,
    Json(horse): Json<HorseDetail>,
) -> BackendResult<(StatusCode, Json<HorseDetail>)> {
    let created = state.store.write().await.create_horse(horse, today())?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_horse(
    State(state): State<MockState>,
    Path(id): Path<HorseId>,
    Json(horse): Json<HorseDetail>,
) -> BackendResult<Json<HorseDetail>> {
    state
        .store
        .write()
        .await
        .update_horse(id, horse, today())
        .map(Json)
}

async fn delete_horse(
    State(state): State<MockState>,
    Path(id): Path<HorseId>,
) -> BackendResult<StatusCode> {
    state.store.write().await.delete_horse(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn family_tree(
    State(state): State<MockState>,
    Path(id): Path<HorseId>,
    Query(query): Query<FamilyTreeQuery>,
) -> BackendResult<Json<FamilyTreeNode>> {
    let limit = query.limit.unwrap_or(DEFAULT_FAMILY_TREE_LIMIT);
    state.store.read().await.family_tree(id, limit).map(Json)
}

async fn search_owners(
    State(state): State<MockState>,
    Query(filter): Query<OwnerSearchFilter>,
) -> BackendResult<Json<Vec<Owner>>> {
    state.store.read().await.search_owners(&filter).map(Json)
}

async fn create_owner(
    State(state): State<MockState>,
    Json(owner): Json<Owner>,
) -> BackendResult<(StatusCode, Json<Owner>)> {
    let created = state.store.write().await.create_owner(owner)?;
    Ok((StatusCode::CREATED, Json(created)))
}
