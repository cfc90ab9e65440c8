//! [`ActorEntity`] implementation for the [`Category`] domain type.
//!
//! The store checks what a single entity can check on its own: the name rules and
//! self-parenting. Rules that need other categories (parent exists, no cycles, no
//! children on delete) live in the commander group.

use super::{CategoryAction, CategoryError};
use crate::model::{normalize_name, Category, CategoryCreate, CategoryId, CategoryUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl ActorEntity for Category {
    type Id = CategoryId;
    type Create = CategoryCreate;
    type Update = CategoryUpdate;
    type Action = CategoryAction;
    type ActionResult = bool;
    type Context = ();
    type Error = CategoryError;

    fn from_create_params(id: CategoryId, params: CategoryCreate) -> Result<Self, Self::Error> {
        let name = normalize_name(&params.name)?;
        Ok(Category::new(id, name)
            .with_parent(params.parent_id)
            .with_description(params.description))
    }

    /// # Fields Updated
    /// - `name`: normalized, must stay valid
    /// - `description`: replaced
    /// - `parent_id`: `Some(None)` moves the category to the root
    async fn on_update(
        &mut self,
        update: CategoryUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = normalize_name(&name)?;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(parent_id) = update.parent_id {
            if parent_id == Some(self.id) {
                return Err(CategoryError::CyclicParent {
                    id: self.id,
                    parent: self.id,
                });
            }
            self.parent_id = parent_id;
        }
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CategoryAction,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        match action {
            CategoryAction::SetEnabled(enabled) => {
                if self.enabled == enabled {
                    return Ok(false);
                }
                self.enabled = enabled;
                self.updated_at = Some(Utc::now());
                Ok(true)
            }
        }
    }
}
