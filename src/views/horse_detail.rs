//! Horse detail page: the record itself plus its family tree

use pedigree_types::{HorseDetail, HorseId};
use tracing::warn;

use super::family_tree::FamilyTree;
use crate::context::AppContext;
use crate::error::Result;
use crate::route::{QueryState, Route};

pub const NO_OWNER: &str = "No owner set for this horse";

pub struct HorseDetailView {
    ctx: AppContext,
    horse: Option<HorseDetail>,
    tree: FamilyTree,
}

impl HorseDetailView {
    pub fn new(ctx: AppContext, id: HorseId, query: &QueryState) -> Self {
        let tree = FamilyTree::new(ctx.clone(), id, query);
        Self {
            ctx,
            horse: None,
            tree,
        }
    }

    /// Detail view for a `/horses/{id}` route, horse and tree loaded
    pub async fn open(ctx: AppContext, id: HorseId, query: &QueryState) -> Result<Self> {
        let mut view = Self::new(ctx, id, query);
        view.load().await?;
        Ok(view)
    }

    pub fn id(&self) -> HorseId {
        self.tree.id()
    }

    pub fn horse(&self) -> Option<&HorseDetail> {
        self.horse.as_ref()
    }

    pub fn tree(&self) -> &FamilyTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut FamilyTree {
        &mut self.tree
    }

    pub fn owner_display(&self) -> String {
        self.horse
            .as_ref()
            .and_then(|h| h.owner.as_ref())
            .map(|o| o.full_name())
            .unwrap_or_else(|| NO_OWNER.to_string())
    }

    pub async fn load(&mut self) -> Result<()> {
        let id = self.tree.id();
        match self.ctx.horses.get_by_id(id).await {
            Ok(horse) => self.horse = Some(horse),
            Err(e) => {
                warn!("Could not get horse {}: {}", id, e);
                self.ctx
                    .notifier
                    .error("Could not get horse.", &e.display_message());
                return Err(e.into());
            }
        }
        self.tree.refresh().await
    }

    /// Follow a route change: a different horse reloads everything, a
    /// different limit only the tree.
    pub async fn on_route_change(&mut self, route: &Route) -> Result<()> {
        let Route::HorseDetail { id, query } = route else {
            return Ok(());
        };
        if *id != self.tree.id() {
            self.tree = FamilyTree::new(self.ctx.clone(), *id, query);
            self.horse = None;
            return self.load().await;
        }
        self.tree.on_query_change(route).await.map(|_| ())
    }

    pub fn edit(&self) {
        self.ctx.navigator.navigate(Route::HorseEdit { id: self.id() });
    }
}
