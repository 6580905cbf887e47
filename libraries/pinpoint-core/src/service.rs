//! User record service
//!
//! Combines a [`LocationResolver`] and a [`UserStore`] into the four CRUD
//! operations. Each call is a short sequential flow (resolve, read, merge,
//! write); the single `put` at the end is the only mutating step.
//!
//! Concurrent updates of the same id are last-write-wins. There is no
//! versioning and no locking across calls.

use crate::error::{PinpointError, Result};
use crate::traits::{LocationResolver, UserStore};
use crate::types::{CreateUser, UpdateUser, User, UserId, UserList};
use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Arc;
use tracing::{debug, info};

const ENTITY: &str = "User";

/// Orchestrates user CRUD over an injected store and resolver
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    resolver: Arc<dyn LocationResolver>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, resolver: Arc<dyn LocationResolver>) -> Self {
        Self { store, resolver }
    }

    /// Resolve the location, mint an id and store the new record
    ///
    /// Nothing is written unless the lookup succeeds. Every failure is
    /// reported as `CreateFailed` wrapping the cause.
    pub async fn create_user(&self, input: CreateUser) -> Result<User> {
        self.try_create(input)
            .await
            .map_err(PinpointError::create_failed)
    }

    async fn try_create(&self, input: CreateUser) -> Result<User> {
        let location = self.resolver.resolve(&input.zip_code).await?;

        let user = User::new(UserId::generate(), input, location, now());
        self.store.put(&user.id, &user).await?;

        info!(user_id = %user.id, zip_code = %user.zip_code, "Created user");
        Ok(user)
    }

    /// `Ok(None)` when no record exists under `id`
    pub async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        self.store
            .get(id)
            .await
            .map_err(PinpointError::fetch_failed)
    }

    pub async fn list_users(&self) -> Result<UserList> {
        let users = self
            .store
            .get_all()
            .await
            .map_err(PinpointError::fetch_failed)?;
        Ok(UserList::from(users))
    }

    /// Apply a partial update
    ///
    /// The location is looked up again only when `zip_code` is supplied and
    /// differs from the stored value. Returns `NotFound` unwrapped when the
    /// record is absent; other failures are wrapped in `UpdateFailed`.
    pub async fn update_user(&self, id: &UserId, changes: UpdateUser) -> Result<User> {
        let existing = self
            .store
            .get(id)
            .await
            .map_err(PinpointError::update_failed)?
            .ok_or_else(|| PinpointError::not_found(ENTITY, id.as_str()))?;

        self.try_update(existing, changes)
            .await
            .map_err(PinpointError::update_failed)
    }

    async fn try_update(&self, existing: User, changes: UpdateUser) -> Result<User> {
        let relocated = match changes.zip_code.as_deref() {
            Some(zip_code) if zip_code != existing.zip_code => {
                debug!(user_id = %existing.id, zip_code, "Zip code changed, resolving location");
                Some(self.resolver.resolve(zip_code).await?)
            }
            _ => None,
        };

        let mut user = existing;
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(zip_code) = changes.zip_code {
            user.zip_code = zip_code;
        }
        if let Some(location) = relocated {
            user.set_location(location);
        }
        user.updated_at = now();

        self.store.put(&user.id, &user).await?;

        info!(user_id = %user.id, "Updated user");
        Ok(user)
    }

    /// Remove the record under `id`; `NotFound` when it does not exist
    pub async fn delete_user(&self, id: &UserId) -> Result<()> {
        self.store
            .get(id)
            .await
            .map_err(PinpointError::delete_failed)?
            .ok_or_else(|| PinpointError::not_found(ENTITY, id.as_str()))?;

        self.store
            .remove(id)
            .await
            .map_err(PinpointError::delete_failed)?;

        info!(user_id = %id, "Deleted user");
        Ok(())
    }

    /// Check the store backend
    pub async fn ping_store(&self) -> Result<()> {
        self.store.ping().await
    }
}

// Millisecond precision so records round-trip unchanged through every backend
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
