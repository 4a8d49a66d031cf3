//! Family tree of a horse, bounded by a generation limit
//!
//! The limit lives in the route's query state. Changing it goes through the
//! navigator; the tree only re-fetches once the new route comes back through
//! `on_query_change`.

use pedigree_types::{FamilyTreeNode, HorseId};
use tracing::{debug, info, warn};

use crate::context::AppContext;
use crate::error::{PedigreeError, Result};
use crate::route::{QueryState, Route};
use crate::validator::{self, FieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeRole {
    Root,
    Mother,
    Father,
}

impl TreeRole {
    pub fn label(&self) -> &'static str {
        match self {
            TreeRole::Root => "",
            TreeRole::Mother => "Mother",
            TreeRole::Father => "Father",
        }
    }
}

/// One rendered row of the tree; the root sits at depth 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine<'a> {
    pub depth: usize,
    pub role: TreeRole,
    pub node: &'a FamilyTreeNode,
}

impl TreeLine<'_> {
    pub fn text(&self) -> String {
        let indent = "  ".repeat(self.depth);
        match self.role {
            TreeRole::Root => format!(
                "{}{} ({}, {})",
                indent, self.node.name, self.node.date_of_birth, self.node.sex
            ),
            role => format!(
                "{}{}: {} ({})",
                indent,
                role.label(),
                self.node.name,
                self.node.date_of_birth
            ),
        }
    }
}

/// Depth-first lines, mother before father
pub fn render_lines(root: &FamilyTreeNode) -> Vec<TreeLine<'_>> {
    let mut lines = Vec::new();
    push_lines(&mut lines, root, TreeRole::Root, 0);
    lines
}

fn push_lines<'a>(
    lines: &mut Vec<TreeLine<'a>>,
    node: &'a FamilyTreeNode,
    role: TreeRole,
    depth: usize,
) {
    lines.push(TreeLine { depth, role, node });
    if let Some(mother) = &node.mother {
        push_lines(lines, mother, TreeRole::Mother, depth + 1);
    }
    if let Some(father) = &node.father {
        push_lines(lines, father, TreeRole::Father, depth + 1);
    }
}

fn find<'a>(node: &'a FamilyTreeNode, id: HorseId) -> Option<&'a FamilyTreeNode> {
    if node.id == id {
        return Some(node);
    }
    node.mother
        .as_deref()
        .and_then(|m| find(m, id))
        .or_else(|| node.father.as_deref().and_then(|f| find(f, id)))
}

pub struct FamilyTree {
    ctx: AppContext,
    id: HorseId,
    limit: u32,
    root: Option<FamilyTreeNode>,
    editing_limit: bool,
}

impl FamilyTree {
    /// Unloaded tree for `id`; call `refresh` or use `open`
    pub fn new(ctx: AppContext, id: HorseId, query: &QueryState) -> Self {
        let limit = query.limit_or(ctx.config.default_tree_limit);
        Self {
            ctx,
            id,
            limit,
            root: None,
            editing_limit: false,
        }
    }

    /// Tree for `id`, fetched once with the limit from `query`
    pub async fn open(ctx: AppContext, id: HorseId, query: &QueryState) -> Result<Self> {
        let mut tree = Self::new(ctx, id, query);
        tree.refresh().await?;
        Ok(tree)
    }

    pub fn id(&self) -> HorseId {
        self.id
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn root(&self) -> Option<&FamilyTreeNode> {
        self.root.as_ref()
    }

    pub fn lines(&self) -> Vec<TreeLine<'_>> {
        self.root.as_ref().map(render_lines).unwrap_or_default()
    }

    pub fn is_editing_limit(&self) -> bool {
        self.editing_limit
    }

    pub fn to_edit_mode(&mut self) {
        self.editing_limit = true;
    }

    /// Write a new limit into the query state. Nothing is fetched here.
    pub fn submit_limit(&mut self, limit: i64) -> Result<()> {
        validator::positive(limit)
            .map_err(|e| PedigreeError::Validation(vec![("limit", e)]))?;
        let limit = u32::try_from(limit)
            .map_err(|_| PedigreeError::Validation(vec![("limit", FieldError::NotPositive)]))?;

        self.editing_limit = false;
        self.ctx.navigator.navigate(Route::HorseDetail {
            id: self.id,
            query: QueryState::with_limit(limit),
        });
        Ok(())
    }

    /// Follow a route change. Re-fetches when the horse or the effective
    /// limit changed; returns whether a fetch happened.
    pub async fn on_query_change(&mut self, route: &Route) -> Result<bool> {
        let Route::HorseDetail { id, query } = route else {
            return Ok(false);
        };
        let limit = query.limit_or(self.ctx.config.default_tree_limit);
        if *id == self.id && limit == self.limit && self.root.is_some() {
            debug!("Family tree query unchanged (limit {})", limit);
            return Ok(false);
        }
        self.id = *id;
        self.limit = limit;
        if let Err(e) = self.refresh().await {
            // a tree fetched for another query must not pass for this one
            self.root = None;
            return Err(e);
        }
        Ok(true)
    }

    /// Fetch the tree for the current id and limit
    pub async fn refresh(&mut self) -> Result<()> {
        match self.ctx.horses.family_tree(self.id, self.limit).await {
            Ok(root) => {
                debug!(
                    "Family tree of {} loaded, {} generations",
                    self.id,
                    root.depth()
                );
                self.root = Some(root);
                Ok(())
            }
            Err(e) => {
                warn!("Could not fetch family tree of {}: {}", self.id, e);
                self.ctx
                    .notifier
                    .error("Could not fetch family tree.", &e.display_message());
                Err(e.into())
            }
        }
    }

    /// Delete a horse shown in the tree after confirmation, then refresh.
    /// Deleting the root leaves the tree and returns to the horse list.
    pub async fn delete_node(&mut self, id: HorseId) -> Result<bool> {
        let name = self
            .root
            .as_ref()
            .and_then(|root| find(root, id))
            .map(|node| node.name.clone())
            .ok_or(PedigreeError::NotLoaded("horse"))?;

        let prompt = format!("Are you sure you want to delete the horse \"{}\"", name);
        if !self.ctx.confirmer.confirm(&prompt).await {
            return Ok(false);
        }

        if let Err(e) = self.ctx.horses.delete(id).await {
            warn!("Could not delete horse {}: {}", id, e);
            self.ctx
                .notifier
                .error("Could not delete horse.", &e.display_message());
            return Err(e.into());
        }

        info!("Horse {} deleted from family tree of {}", id, self.id);
        self.ctx
            .notifier
            .success(&format!("Horse {} successfully deleted.", name));

        if id == self.id {
            self.root = None;
            self.ctx.navigator.navigate(Route::Horses);
        } else {
            self.refresh().await?;
        }
        Ok(true)
    }
}
