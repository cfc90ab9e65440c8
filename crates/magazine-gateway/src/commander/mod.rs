//! # Category Commander Group
//!
//! Routees of `category-commander-group` execute [`CategoryCommand`]s against the
//! category store. A command is validated against the rest of the category tree
//! before the store is asked to change anything:
//!
//! - names are trimmed, non-empty and at most 100 characters;
//! - a referenced parent must exist;
//! - a category can not be its own parent nor a descendant of itself;
//! - a category with children can not be deleted;
//! - unknown ids are [`CategoryError::NotFound`].
//!
//! Every routee shares one [`CommanderContext`]. Create, update and delete hold its
//! tree lock from the first read of the store until the write, so checks and change
//! are one step no matter which routee a command lands on.

use crate::category_store::CategoryError;
use crate::clients::CategoryStoreClient;
use crate::model::{normalize_name, Category, CategoryCreate, CategoryId, CategoryUpdate};
use actor_framework::{ActorClient, ConsistentHashable, MessageHandler};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, info, warn};

/// Name of the routed commander group.
pub const COMMANDER_GROUP: &str = "category-commander-group";

/// Reply channel carried inside commands and queries.
pub type Reply<T> = oneshot::Sender<Result<T, CategoryError>>;

/// Write-side protocol of the category domain.
#[derive(Debug)]
pub enum CategoryCommand {
    Create {
        params: CategoryCreate,
        respond_to: Reply<Category>,
    },
    Update {
        id: CategoryId,
        update: CategoryUpdate,
        respond_to: Reply<Category>,
    },
    Delete {
        id: CategoryId,
        respond_to: Reply<()>,
    },
    SetEnabled {
        id: CategoryId,
        enabled: bool,
        respond_to: Reply<bool>,
    },
}

impl ConsistentHashable for CategoryCommand {
    fn consistent_hash_key(&self) -> Option<String> {
        match self {
            CategoryCommand::Create { params, .. } => Some(params.name.trim().to_lowercase()),
            CategoryCommand::Update { id, .. }
            | CategoryCommand::Delete { id, .. }
            | CategoryCommand::SetEnabled { id, .. } => Some(id.to_string()),
        }
    }
}

/// Context of every commander routee: the store and the lock serializing tree changes.
#[derive(Clone)]
pub struct CommanderContext {
    store: CategoryStoreClient,
    tree: Arc<Mutex<()>>,
}

impl CommanderContext {
    pub fn new(store: CategoryStoreClient) -> Self {
        Self {
            store,
            tree: Arc::new(Mutex::new(())),
        }
    }
}

/// One routee of the commander group.
pub struct CategoryCommander {
    index: usize,
}

impl CategoryCommander {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Creates a category after checking its name and parent.
    pub async fn create(
        ctx: &CommanderContext,
        mut params: CategoryCreate,
    ) -> Result<Category, CategoryError> {
        params.name = normalize_name(&params.name)?;
        let store = &ctx.store;
        let _tree = ctx.tree.lock().await;
        if let Some(parent_id) = params.parent_id {
            ensure_parent_exists(store, parent_id).await?;
        }
        let id = store.create_category(params).await?;
        store.require(id).await
    }

    /// Applies an update after checking the new name and the new position in the tree.
    pub async fn update(
        ctx: &CommanderContext,
        id: CategoryId,
        mut update: CategoryUpdate,
    ) -> Result<Category, CategoryError> {
        if let Some(name) = update.name.take() {
            update.name = Some(normalize_name(&name)?);
        }
        let store = &ctx.store;
        let _tree = ctx.tree.lock().await;
        store.require(id).await?;

        if let Some(Some(parent_id)) = update.parent_id {
            if parent_id == id {
                return Err(CategoryError::CyclicParent {
                    id,
                    parent: parent_id,
                });
            }
            ensure_parent_exists(store, parent_id).await?;
            let categories = store.list().await?;
            if is_descendant(&categories, parent_id, id) {
                return Err(CategoryError::CyclicParent {
                    id,
                    parent: parent_id,
                });
            }
        }
        store.update_category(id, update).await
    }

    /// Deletes a category that has no children.
    pub async fn delete(ctx: &CommanderContext, id: CategoryId) -> Result<(), CategoryError> {
        let store = &ctx.store;
        let _tree = ctx.tree.lock().await;
        store.require(id).await?;
        let children = store
            .list()
            .await?
            .iter()
            .filter(|category| category.parent_id == Some(id))
            .count();
        if children > 0 {
            return Err(CategoryError::HasChildren { id, children });
        }
        store.delete(id).await
    }
}

async fn ensure_parent_exists(
    store: &CategoryStoreClient,
    parent_id: CategoryId,
) -> Result<(), CategoryError> {
    if store.exists(parent_id).await? {
        Ok(())
    } else {
        Err(CategoryError::ParentNotFound(parent_id))
    }
}

/// Returns `true` if `candidate` is `ancestor` or lies below it.
fn is_descendant(categories: &[Category], candidate: CategoryId, ancestor: CategoryId) -> bool {
    let parents: HashMap<CategoryId, Option<CategoryId>> = categories
        .iter()
        .map(|category| (category.id, category.parent_id))
        .collect();

    let mut current = Some(candidate);
    // Bounded by the number of categories, so a corrupt tree can not loop forever.
    for _ in 0..=parents.len() {
        match current {
            Some(id) if id == ancestor => return true,
            Some(id) => current = parents.get(&id).copied().flatten(),
            None => return false,
        }
    }
    false
}

fn reply<T>(respond_to: Reply<T>, result: Result<T, CategoryError>) {
    if respond_to.send(result).is_err() {
        debug!("Caller dropped the reply channel");
    }
}

#[async_trait]
impl MessageHandler for CategoryCommander {
    type Message = CategoryCommand;
    type Context = CommanderContext;

    async fn handle(&mut self, command: CategoryCommand, ctx: &CommanderContext) {
        let routee = self.index;
        match command {
            CategoryCommand::Create { params, respond_to } => {
                let result = Self::create(ctx, params).await;
                match &result {
                    Ok(category) => info!(routee, id = %category.id, "Category created"),
                    Err(e) => warn!(routee, error = %e, "Create rejected"),
                }
                reply(respond_to, result);
            }
            CategoryCommand::Update {
                id,
                update,
                respond_to,
            } => {
                let result = Self::update(ctx, id, update).await;
                match &result {
                    Ok(_) => info!(routee, %id, "Category updated"),
                    Err(e) => warn!(routee, %id, error = %e, "Update rejected"),
                }
                reply(respond_to, result);
            }
            CategoryCommand::Delete { id, respond_to } => {
                let result = Self::delete(ctx, id).await;
                match &result {
                    Ok(()) => info!(routee, %id, "Category deleted"),
                    Err(e) => warn!(routee, %id, error = %e, "Delete rejected"),
                }
                reply(respond_to, result);
            }
            CategoryCommand::SetEnabled {
                id,
                enabled,
                respond_to,
            } => {
                let result = ctx.store.set_enabled(id, enabled).await;
                if let Err(e) = &result {
                    warn!(routee, %id, error = %e, "SetEnabled rejected");
                }
                reply(respond_to, result);
            }
        }
    }

    async fn post_stop(&mut self, _ctx: &CommanderContext) {
        debug!(routee = self.index, "Commander stopped");
    }
}
