//! Shared API Types for pedigree
//!
//! This crate is the SINGLE SOURCE OF TRUTH for all types crossing HTTP boundaries.
//!
//! ## Boundaries
//!
//! ```text
//! ┌──────────────────┐         ┌──────────────────┐
//! │  REST backend    │  JSON   │  pedigree client │
//! │  (mock: axum)    │ ◄─────► │  (reqwest)       │
//! └──────────────────┘         └──────────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. All API types live here - no inline struct definitions in handlers
//! 2. JSON field names are camelCase, enum values UPPERCASE
//! 3. Dates are ISO `YYYY-MM-DD`

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type HorseId = i64;
pub type OwnerId = i64;

// ============================================================================
// ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "FEMALE",
            Sex::Male => "MALE",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FEMALE" | "F" => Ok(Sex::Female),
            "MALE" | "M" => Ok(Sex::Male),
            other => Err(format!("unknown sex '{}', expected female or male", other)),
        }
    }
}

// ============================================================================
// OWNER
// ============================================================================

/// Owner record; `id` is absent before creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OwnerId>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Owner {
    /// "firstName lastName", the canonical display string
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Owner search parameters (`GET /owners`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSearchFilter {
    #[serde(default)]
    pub full_name_substring: Option<String>,
    #[serde(default)]
    pub max_result_count: Option<i64>,
}

// ============================================================================
// HORSE
// ============================================================================

/// Reduced projection used for parent references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseMinimal {
    pub id: HorseId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub sex: Sex,
}

/// Summary projection returned by searches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Horse {
    #[serde(default)]
    pub id: Option<HorseId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date_of_birth: NaiveDate,
    pub sex: Sex,
    #[serde(default)]
    pub owner: Option<Owner>,
}

/// Full record with resolved owner and parents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseDetail {
    #[serde(default)]
    pub id: Option<HorseId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date_of_birth: NaiveDate,
    pub sex: Sex,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub mother: Option<HorseMinimal>,
    #[serde(default)]
    pub father: Option<HorseMinimal>,
}

impl HorseDetail {
    pub fn owner_id(&self) -> Option<OwnerId> {
        self.owner.as_ref().and_then(|o| o.id)
    }

    pub fn mother_id(&self) -> Option<HorseId> {
        self.mother.as_ref().map(|m| m.id)
    }

    pub fn father_id(&self) -> Option<HorseId> {
        self.father.as_ref().map(|f| f.id)
    }

    /// Minimal projection, only available once persisted
    pub fn to_minimal(&self) -> Option<HorseMinimal> {
        self.id.map(|id| HorseMinimal {
            id,
            name: self.name.clone(),
            date_of_birth: self.date_of_birth,
            sex: self.sex,
        })
    }
}

impl From<HorseDetail> for Horse {
    fn from(detail: HorseDetail) -> Self {
        Self {
            id: detail.id,
            name: detail.name,
            description: detail.description,
            date_of_birth: detail.date_of_birth,
            sex: detail.sex,
            owner: detail.owner,
        }
    }
}

/// Horse search parameters (`GET /horses`). Every predicate is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseSearchFilter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub sex: Option<Sex>,
    #[serde(default)]
    pub owner_id: Option<OwnerId>,
    #[serde(default)]
    pub owner_full_name_substring: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    /// Used when picking a parent so the horse being edited is not offered
    #[serde(default)]
    pub id_of_horse_to_be_excluded: Option<HorseId>,
}

// ============================================================================
// FAMILY TREE
// ============================================================================

/// Recursive ancestry node (`GET /horses/{id}/familyTree`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTreeNode {
    pub id: HorseId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub sex: Sex,
    #[serde(default)]
    pub mother: Option<Box<FamilyTreeNode>>,
    #[serde(default)]
    pub father: Option<Box<FamilyTreeNode>>,
}

impl FamilyTreeNode {
    /// Number of generations in this tree, root included
    pub fn depth(&self) -> usize {
        let mother = self.mother.as_ref().map_or(0, |m| m.depth());
        let father = self.father.as_ref().map_or(0, |f| f.depth());
        1 + mother.max(father)
    }

    /// True if `id` appears anywhere in this tree
    pub fn contains(&self, id: HorseId) -> bool {
        self.id == id
            || self.mother.as_ref().is_some_and(|m| m.contains(id))
            || self.father.as_ref().is_some_and(|f| f.contains(id))
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Structured error body returned by the backend on 4xx responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }
}
