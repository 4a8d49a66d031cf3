//! Owner create form

use pedigree_types::Owner;
use tracing::{info, warn};

use super::field::Field;
use crate::context::AppContext;
use crate::error::{PedigreeError, Result};
use crate::route::Route;
use crate::validator::{self, FieldError};

pub struct OwnerForm {
    ctx: AppContext,
    first_name: Field<String>,
    last_name: Field<String>,
    email: Field<String>,
}

impl OwnerForm {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            first_name: Field::default(),
            last_name: Field::default(),
            email: Field::default(),
        }
    }

    pub fn first_name(&self) -> &Field<String> {
        &self.first_name
    }

    pub fn last_name(&self) -> &Field<String> {
        &self.last_name
    }

    pub fn email(&self) -> &Field<String> {
        &self.email
    }

    pub fn set_first_name(&mut self, value: &str) {
        self.first_name.set(value.to_string());
    }

    pub fn set_last_name(&mut self, value: &str) {
        self.last_name.set(value.to_string());
    }

    pub fn set_email(&mut self, value: &str) {
        self.email.set(value.to_string());
    }

    pub fn validate(&mut self) -> Result<()> {
        let mut failures: Vec<(&'static str, FieldError)> = Vec::new();
        if let Err(e) = self
            .first_name
            .validate_with(|v| validator::required_text(v))
        {
            failures.push(("firstName", e));
        }
        if let Err(e) = self.last_name.validate_with(|v| validator::required_text(v)) {
            failures.push(("lastName", e));
        }
        if let Err(e) = self.email.validate_with(|v| validator::email(v)) {
            failures.push(("email", e));
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(PedigreeError::Validation(failures))
        }
    }

    pub fn to_record(&self) -> Owner {
        let email = self.email.value().trim();
        Owner {
            id: None,
            first_name: self.first_name.value().trim().to_string(),
            last_name: self.last_name.value().trim().to_string(),
            email: (!email.is_empty()).then(|| email.to_string()),
        }
    }

    /// Validate and create. On success the user lands on the owner list.
    pub async fn submit(&mut self) -> Result<Owner> {
        self.first_name.touch();
        self.last_name.touch();
        self.email.touch();
        self.validate()?;

        let record = self.to_record();
        match self.ctx.owners.create(&record).await {
            Ok(owner) => {
                info!("Owner {} created", owner.full_name());
                self.ctx.notifier.success(&format!(
                    "Owner {} successfully created.",
                    owner.full_name()
                ));
                self.ctx.navigator.navigate(Route::Owners);
                Ok(owner)
            }
            Err(e) => {
                warn!("Owner could not be created: {}", e);
                self.ctx
                    .notifier
                    .error("Owner could not be created", &e.display_message());
                Err(e.into())
            }
        }
    }
}
