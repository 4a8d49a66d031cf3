//! Owner list

use pedigree_types::Owner;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::error::Result;

pub struct OwnerList {
    ctx: AppContext,
    owners: Vec<Owner>,
}

impl OwnerList {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            owners: Vec::new(),
        }
    }

    pub async fn open(ctx: AppContext) -> Self {
        let mut list = Self::new(ctx);
        // already notified
        let _ = list.reload().await;
        list
    }

    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    pub async fn reload(&mut self) -> Result<()> {
        match self.ctx.owners.list_all().await {
            Ok(owners) => {
                debug!("Loaded {} owners", owners.len());
                self.owners = owners;
                Ok(())
            }
            Err(e) => {
                warn!("Error fetching owners: {}", e);
                self.ctx
                    .notifier
                    .error("Could Not Fetch Owners", &e.display_message());
                Err(e.into())
            }
        }
    }
}
