//! Shared fakes for component tests
//!
//! `FakeBackend` implements both service traits over an in-memory list and
//! records every call, so tests can assert exactly which requests went out.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use pedigree::types::{
    ErrorPayload, FamilyTreeNode, Horse, HorseDetail, HorseId, HorseMinimal, HorseSearchFilter,
    Owner, OwnerSearchFilter, Sex,
};
use pedigree::ui::{NavigationHistory, NotificationLog};
use pedigree::{ApiError, ApiResult, AppContext, ClientConfig, Confirmer, HorseApi, OwnerApi};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SearchHorses(HorseSearchFilter),
    GetHorse(HorseId),
    CreateHorse(HorseDetail),
    UpdateHorse(HorseDetail),
    DeleteHorse(HorseId),
    FamilyTree(HorseId, u32),
    ListOwners,
    SearchOwners(OwnerSearchFilter),
    CreateOwner(Owner),
}

#[derive(Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    horses: Mutex<Vec<HorseDetail>>,
    owners: Mutex<Vec<Owner>>,
    failure: Mutex<Option<ApiError>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_horse(self, horse: HorseDetail) -> Self {
        self.horses.lock().unwrap().push(horse);
        self
    }

    pub fn with_owner(self, owner: Owner) -> Self {
        self.owners.lock().unwrap().push(owner);
        self
    }

    /// Every following call fails with `error` until `recover`
    pub fn fail_with(&self, error: ApiError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn horse_searches(&self) -> Vec<HorseSearchFilter> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::SearchHorses(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    pub fn deletes(&self) -> Vec<HorseId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::DeleteHorse(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn tree_fetches(&self) -> Vec<(HorseId, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::FamilyTree(id, limit) => Some((id, limit)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn find(&self, id: HorseId) -> ApiResult<HorseDetail> {
        self.horses
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.id == Some(id))
            .cloned()
            .ok_or_else(|| {
                ApiError::server(404, ErrorPayload::new(format!("No horse with ID {} found", id), vec![]))
            })
    }

    fn tree(&self, id: HorseId, generation: u32, limit: u32) -> Option<FamilyTreeNode> {
        let horse = self.find(id).ok()?;
        let parent = |p: Option<HorseId>| {
            if generation >= limit {
                return None;
            }
            p.and_then(|p| self.tree(p, generation + 1, limit)).map(Box::new)
        };
        Some(FamilyTreeNode {
            id,
            name: horse.name.clone(),
            date_of_birth: horse.date_of_birth,
            sex: horse.sex,
            mother: parent(horse.mother_id()),
            father: parent(horse.father_id()),
        })
    }
}

#[async_trait]
impl HorseApi for FakeBackend {
    async fn search(&self, filter: &HorseSearchFilter) -> ApiResult<Vec<Horse>> {
        self.record(Call::SearchHorses(filter.clone()))?;
        let name = filter.name.as_deref().map(str::to_lowercase);
        let horses = self.horses.lock().unwrap().clone();
        Ok(horses
            .into_iter()
            .filter(|h| {
                name.as_deref()
                    .map_or(true, |n| h.name.to_lowercase().contains(n))
                    && filter.sex.map_or(true, |s| h.sex == s)
                    && filter.id_of_horse_to_be_excluded != h.id
            })
            .take(filter.limit.map_or(usize::MAX, |l| l as usize))
            .map(Horse::from)
            .collect())
    }

    async fn get_by_id(&self, id: HorseId) -> ApiResult<HorseDetail> {
        self.record(Call::GetHorse(id))?;
        self.find(id)
    }

    async fn create(&self, horse: &HorseDetail) -> ApiResult<HorseDetail> {
        self.record(Call::CreateHorse(horse.clone()))?;
        let mut horses = self.horses.lock().unwrap();
        let id = horses.iter().filter_map(|h| h.id).max().unwrap_or(0) + 1;
        let created = HorseDetail {
            id: Some(id),
            ..horse.clone()
        };
        horses.push(created.clone());
        Ok(created)
    }

    async fn update(&self, horse: &HorseDetail) -> ApiResult<HorseDetail> {
        self.record(Call::UpdateHorse(horse.clone()))?;
        let mut horses = self.horses.lock().unwrap();
        match horses.iter_mut().find(|h| h.id == horse.id) {
            Some(stored) => {
                *stored = horse.clone();
                Ok(horse.clone())
            }
            None => Err(ApiError::server(404, ErrorPayload::new("Horse not found", vec![]))),
        }
    }

    async fn delete(&self, id: HorseId) -> ApiResult<()> {
        self.record(Call::DeleteHorse(id))?;
        let mut horses = self.horses.lock().unwrap();
        let before = horses.len();
        horses.retain(|h| h.id != Some(id));
        if horses.len() == before {
            return Err(ApiError::server(
                404,
                ErrorPayload::new("Horse to be deleted doesn't exist", vec![]),
            ));
        }
        Ok(())
    }

    async fn family_tree(&self, id: HorseId, limit: u32) -> ApiResult<FamilyTreeNode> {
        self.record(Call::FamilyTree(id, limit))?;
        self.tree(id, 1, limit).ok_or_else(|| {
            ApiError::server(404, ErrorPayload::new(format!("No horse with ID {} found", id), vec![]))
        })
    }
}

#[async_trait]
impl OwnerApi for FakeBackend {
    async fn list_all(&self) -> ApiResult<Vec<Owner>> {
        self.record(Call::ListOwners)?;
        Ok(self.owners.lock().unwrap().clone())
    }

    async fn search(&self, filter: &OwnerSearchFilter) -> ApiResult<Vec<Owner>> {
        self.record(Call::SearchOwners(filter.clone()))?;
        let needle = filter
            .full_name_substring
            .as_deref()
            .unwrap_or("")
            .to_lowercase();
        Ok(self
            .owners
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.full_name().to_lowercase().contains(&needle))
            .take(filter.max_result_count.map_or(usize::MAX, |m| m as usize))
            .cloned()
            .collect())
    }

    async fn create(&self, owner: &Owner) -> ApiResult<Owner> {
        self.record(Call::CreateOwner(owner.clone()))?;
        let mut owners = self.owners.lock().unwrap();
        let created = Owner {
            id: Some(owners.len() as i64 + 1),
            ..owner.clone()
        };
        owners.push(created.clone());
        Ok(created)
    }
}

/// Confirmer with a fixed answer that remembers every prompt
pub struct RecordingConfirmer {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl RecordingConfirmer {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmer for RecordingConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

/// Everything a component test needs, wired together
pub struct Harness {
    pub backend: Arc<FakeBackend>,
    pub notes: Arc<NotificationLog>,
    pub nav: Arc<NavigationHistory>,
    pub confirmer: Arc<RecordingConfirmer>,
    pub ctx: AppContext,
}

impl Harness {
    pub fn new(backend: FakeBackend, confirm: bool) -> Self {
        let backend = Arc::new(backend);
        let notes = Arc::new(NotificationLog::new());
        let nav = Arc::new(NavigationHistory::new());
        let confirmer = Arc::new(RecordingConfirmer::new(confirm));
        let config = ClientConfig {
            backend_url: "http://unused.invalid".to_string(),
            ..ClientConfig::default()
        };
        let ctx = AppContext::new(
            backend.clone(),
            backend.clone(),
            notes.clone(),
            confirmer.clone(),
            nav.clone(),
            config,
        );
        Self {
            backend,
            notes,
            nav,
            confirmer,
            ctx,
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn owner(id: i64, first: &str, last: &str) -> Owner {
    Owner {
        id: Some(id),
        first_name: first.into(),
        last_name: last.into(),
        email: None,
    }
}

pub fn horse(id: HorseId, name: &str, dob: NaiveDate, sex: Sex) -> HorseDetail {
    HorseDetail {
        id: Some(id),
        name: name.into(),
        description: None,
        date_of_birth: dob,
        sex,
        owner: None,
        mother: None,
        father: None,
    }
}

pub fn minimal(horse: &HorseDetail) -> HorseMinimal {
    horse.to_minimal().unwrap()
}

/// Foal (5) with mother Wendy (3) and father Storm (2); Wendy's mother is Old Mare (1)
pub fn stable() -> FakeBackend {
    let old_mare = horse(1, "Old Mare", date(2002, 4, 1), Sex::Female);
    let storm = horse(2, "Storm", date(2008, 6, 12), Sex::Male);
    let mut wendy = horse(3, "Wendy", date(2012, 3, 9), Sex::Female);
    wendy.mother = Some(minimal(&old_mare));
    let willow = horse(4, "Willow", date(2013, 1, 1), Sex::Female);
    let mut foal = horse(5, "Foal", date(2019, 5, 20), Sex::Male);
    foal.mother = Some(minimal(&wendy));
    foal.father = Some(minimal(&storm));
    foal.owner = Some(owner(1, "Anna", "Berg"));

    FakeBackend::new()
        .with_owner(owner(1, "Anna", "Berg"))
        .with_owner(owner(2, "Max", "Huber"))
        .with_horse(old_mare)
        .with_horse(storm)
        .with_horse(wendy)
        .with_horse(willow)
        .with_horse(foal)
}
