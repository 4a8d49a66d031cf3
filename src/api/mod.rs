//! REST service boundary
//!
//! `HorseApi` and `OwnerApi` are the only way components talk to the
//! backend. `HttpClient` implements both over reqwest; tests substitute
//! in-process fakes.

pub mod http;

use async_trait::async_trait;
use pedigree_types::{
    FamilyTreeNode, Horse, HorseDetail, HorseId, HorseSearchFilter, Owner, OwnerSearchFilter,
};

use crate::error::ApiResult;

pub use http::HttpClient;

#[async_trait]
pub trait HorseApi: Send + Sync {
    /// `GET /horses` with the filter translated into query parameters
    async fn search(&self, filter: &HorseSearchFilter) -> ApiResult<Vec<Horse>>;

    async fn get_by_id(&self, id: HorseId) -> ApiResult<HorseDetail>;

    async fn create(&self, horse: &HorseDetail) -> ApiResult<HorseDetail>;

    /// `PUT /horses/{id}`; the id is taken from the record
    async fn update(&self, horse: &HorseDetail) -> ApiResult<HorseDetail>;

    async fn delete(&self, id: HorseId) -> ApiResult<()>;

    /// Ancestry of `id`, at most `limit` generations including the root
    async fn family_tree(&self, id: HorseId, limit: u32) -> ApiResult<FamilyTreeNode>;
}

#[async_trait]
pub trait OwnerApi: Send + Sync {
    async fn list_all(&self) -> ApiResult<Vec<Owner>>;

    async fn search(&self, filter: &OwnerSearchFilter) -> ApiResult<Vec<Owner>>;

    async fn create(&self, owner: &Owner) -> ApiResult<Owner>;
}

/// Translate a horse filter into query pairs; empty values are omitted.
pub fn horse_query_pairs(filter: &HorseSearchFilter) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    push_text(&mut pairs, "name", filter.name.as_deref());
    push_text(&mut pairs, "description", filter.description.as_deref());
    if let Some(date) = filter.date_of_birth {
        pairs.push(("dateOfBirth", date.format("%Y-%m-%d").to_string()));
    }
    if let Some(sex) = filter.sex {
        pairs.push(("sex", sex.as_str().to_string()));
    }
    if let Some(owner_id) = filter.owner_id {
        pairs.push(("ownerId", owner_id.to_string()));
    }
    push_text(
        &mut pairs,
        "ownerFullNameSubstring",
        filter.owner_full_name_substring.as_deref(),
    );
    if let Some(limit) = filter.limit {
        pairs.push(("limit", limit.to_string()));
    }
    if let Some(id) = filter.id_of_horse_to_be_excluded {
        pairs.push(("idOfHorseToBeExcluded", id.to_string()));
    }
    pairs
}

pub fn owner_query_pairs(filter: &OwnerSearchFilter) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    push_text(
        &mut pairs,
        "fullNameSubstring",
        filter.full_name_substring.as_deref(),
    );
    if let Some(max) = filter.max_result_count {
        pairs.push(("maxResultCount", max.to_string()));
    }
    pairs
}

fn push_text(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        pairs.push((key, value.to_string()));
    }
}
