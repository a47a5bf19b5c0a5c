//! The caller of a service operation

use crate::storage::traits::NoteStore;
use crate::{NoteAppError, Result};

/// An authenticated user as seen by the services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub username: String,
}

/// Who is performing an operation.
///
/// Every service call takes the actor explicitly; there is no ambient
/// "current user".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Actor {
    /// No credentials were presented
    #[default]
    Anonymous,

    /// A logged-in user
    User(Identity),
}

impl Actor {
    pub fn user(id: impl Into<String>, username: impl Into<String>) -> Self {
        Actor::User(Identity {
            id: id.into(),
            username: username.into(),
        })
    }

    /// The caller's identity, or `NotAuthenticated` for anonymous callers
    pub fn identity(&self) -> Result<&Identity> {
        match self {
            Actor::User(identity) => Ok(identity),
            Actor::Anonymous => Err(NoteAppError::NotAuthenticated),
        }
    }

    /// Like [`Actor::identity`], but the account must also still exist.
    /// A caller whose account has been deleted is not authenticated.
    pub(crate) async fn live_identity(&self, store: &dyn NoteStore) -> Result<&Identity> {
        let identity = self.identity()?;
        if store.get_user(&identity.id).await?.is_none() {
            tracing::debug!(user_id = %identity.id, "Caller account no longer exists");
            return Err(NoteAppError::NotAuthenticated);
        }
        Ok(identity)
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Actor::User(identity) => Some(identity.id.as_str()),
            Actor::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Actor::User(_))
    }
}

impl Identity {
    /// Fail with `Forbidden` unless this identity owns the resource
    pub fn ensure_owns(
        &self,
        owner_id: &str,
        resource: &'static str,
        action: &'static str,
    ) -> Result<()> {
        if self.id == owner_id {
            Ok(())
        } else {
            Err(NoteAppError::Forbidden { resource, action })
        }
    }
}
