//! Pedigree - stable management client
//!
//! Headless components for managing horses and their owners against the
//! pedigree REST backend: create/edit/readonly forms with typeahead lookups,
//! a searchable horse list, owner pages and a family tree bounded by a
//! generation limit kept in the route's query state.
//!
//! ## Architecture
//!
//! ```text
//! shell (CLI, GUI, tests)
//!    │ input events, route changes
//!    ▼
//! form / views  ──► Notifier, Confirmer, Navigator
//!    │
//!    ▼
//! HorseApi / OwnerApi ──► HttpClient (reqwest) ──► REST backend
//! ```
//!
//! Components are plain `&mut self` state machines. Everything they present
//! or ask the user goes through the collaborator traits in [`ui`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pedigree::{AppContext, ClientConfig, HorseList};
//! use pedigree::ui::{FixedAnswer, NavigationHistory, NotificationLog};
//!
//! # async fn demo() -> pedigree::Result<()> {
//! let ctx = AppContext::over_http(
//!     ClientConfig::from_env()?,
//!     Arc::new(NotificationLog::new()),
//!     Arc::new(FixedAnswer(false)),
//!     Arc::new(NavigationHistory::new()),
//! )?;
//! let list = HorseList::open(ctx).await;
//! for horse in list.horses() {
//!     println!("{}", horse.name);
//! }
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Validation rules and configuration
pub mod config;
pub mod validator;

// REST service boundary
pub mod api;

// Collaborators and navigation
pub mod context;
pub mod route;
pub mod ui;

// Components
pub mod form;
pub mod views;

// In-memory backend for demos and end-to-end tests
#[cfg(feature = "mock-server")]
pub mod mock_backend;

pub use pedigree_types as types;

pub use api::{HorseApi, HttpClient, OwnerApi};
pub use config::ClientConfig;
pub use context::AppContext;
pub use error::{ApiError, ApiResult, ConfigError, PedigreeError, Result};
pub use form::{FormMode, HorseForm, OwnerForm, ReferenceField, Typeahead};
pub use route::{QueryState, Route};
pub use ui::{Confirmer, Navigator, NotificationKind, Notifier};
pub use views::{FamilyTree, HorseDetailView, HorseList, OwnerList};
