//! # User Directory
//!
//! Role-based user administration: listing profiles, registering the
//! profile row for a newly created auth account, and toggling the active
//! flag.
//!
//! Account creation itself (credentials, email confirmation) happens in the
//! external auth service; by the time this module runs, the account exists
//! and supplies the profile id.

use caja_core::{validation, Action, NewProfile, Profile};
use caja_store::Store;
use tracing::info;

use crate::error::ServiceResult;

/// Profile administration over the shared store handle. Every operation
/// requires [`Action::ManageUsers`] on the acting profile.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    store: Store,
}

impl UserDirectory {
    pub fn new(store: Store) -> Self {
        UserDirectory { store }
    }

    /// Lists all profiles, newest first.
    pub async fn list(&self, actor: &Profile) -> ServiceResult<Vec<Profile>> {
        actor.authorize(Action::ManageUsers)?;
        Ok(self.store.profiles().list().await?)
    }

    /// Registers the profile row for a freshly created auth account.
    pub async fn register(&self, actor: &Profile, new: NewProfile) -> ServiceResult<Profile> {
        actor.authorize(Action::ManageUsers)?;

        validation::validate_name(&new.name)?;
        validation::validate_email(&new.email)?;
        validation::validate_uuid(&new.id)?;

        let profile = self.store.profiles().insert(new).await?;
        info!(id = %profile.id, role = ?profile.role, by = %actor.id, "Profile registered");
        Ok(profile)
    }

    /// Activates or deactivates a profile.
    pub async fn set_active(&self, actor: &Profile, id: &str, active: bool) -> ServiceResult<()> {
        actor.authorize(Action::ManageUsers)?;

        self.store.profiles().set_active(id, active).await?;
        info!(id = %id, active = %active, by = %actor.id, "Profile active flag changed");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
