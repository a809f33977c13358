//! # Profile Repository
//!
//! User profile rows. The id of each profile is the id the external auth
//! service assigned to the account; this table never stores credentials.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use caja_core::{NewProfile, Profile};

#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProfileRepository { pool }
    }

    /// Lists all profiles, newest first.
    pub async fn list(&self) -> StoreResult<Vec<Profile>> {
        let profiles = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, name, email, role, active, created_at
            FROM profiles
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles)
    }

    /// Gets a profile by id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, name, email, role, active, created_at
            FROM profiles
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Inserts a profile; new profiles start active.
    ///
    /// Fails with [`StoreError::UniqueViolation`] on a duplicate email.
    pub async fn insert(&self, new: NewProfile) -> StoreResult<Profile> {
        let profile = Profile {
            id: new.id,
            name: new.name,
            email: new.email,
            role: new.role,
            active: true,
            created_at: Utc::now(),
        };

        debug!(id = %profile.id, email = %profile.email, "Inserting profile");

        sqlx::query(
            r#"
            INSERT INTO profiles (id, name, email, role, active, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(profile.role)
        .bind(profile.active)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Activates or deactivates a profile.
    pub async fn set_active(&self, id: &str, active: bool) -> StoreResult<()> {
        debug!(id = %id, active = %active, "Setting profile active flag");

        let result = sqlx::query("UPDATE profiles SET active = ?2 WHERE id = ?1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Profile", id));
        }

        Ok(())
    }
}
