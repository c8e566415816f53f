use std::sync::Arc;

use async_trait::async_trait;
use authkit_core::{Email, User, UserEvent, UserRepository, UserRepositoryError};
use dashmap::DashMap;
use uuid::Uuid;

/// Event-stream persistence in process memory; one stream per aggregate.
///
/// Lookups by email or Google subject hydrate and scan every stream, which is
/// fine at the scale this adapter is meant for (tests, demos, single-node
/// deployments).
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    streams: Arc<DashMap<Uuid, Vec<UserEvent>>>,
}

fn hydrate(events: Vec<UserEvent>) -> Result<User, UserRepositoryError> {
    User::from_events(events).map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))
}

impl InMemoryUserRepository {
    fn find<P>(&self, predicate: P) -> Result<Option<User>, UserRepositoryError>
    where
        P: Fn(&User) -> bool,
    {
        for entry in self.streams.iter() {
            let user = hydrate(entry.value().clone())?;
            if predicate(&user) {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        self.find(|user| user.email() == email)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        match self.streams.get(&id) {
            Some(entry) => hydrate(entry.value().clone()).map(Some),
            None => Ok(None),
        }
    }

    async fn get_by_google_id(
        &self,
        google_id: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        self.find(|user| user.google_id() == Some(google_id))
    }

    #[tracing::instrument(name = "Adding user to in-memory store", skip_all)]
    async fn add(&self, user: &mut User) -> Result<(), UserRepositoryError> {
        if self.get_by_email(user.email()).await?.is_some() {
            return Err(UserRepositoryError::AlreadyExists);
        }
        self.streams.insert(user.id(), user.take_pending_events());
        Ok(())
    }

    #[tracing::instrument(name = "Updating user in in-memory store", skip_all)]
    async fn update(&self, user: &mut User) -> Result<(), UserRepositoryError> {
        let mut stream = self
            .streams
            .get_mut(&user.id())
            .ok_or(UserRepositoryError::NotFound)?;
        if stream.len() as u64 != user.persisted_version() {
            return Err(UserRepositoryError::VersionConflict(user.id()));
        }
        stream.extend(user.take_pending_events());
        Ok(())
    }
}
