use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::models::CandidateProfile;
use crate::services::directory::{CandidateDirectory, DirectoryError};

/// PostgreSQL backed candidate directory
///
/// Profiles live in `candidate_profiles`. Listing follows the identity
/// `position` column, so the pool comes back in insertion order even for
/// rows written in one transaction.
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    /// Create a new directory from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, DirectoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new directory from optional settings values
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, DirectoryError> {
        tracing::info!("Connecting to PostgreSQL candidate directory");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Insert or replace a profile
    ///
    /// Existing rows keep their `position`, so updates do not reorder the pool.
    pub async fn upsert_candidate(&self, profile: &CandidateProfile) -> Result<(), DirectoryError> {
        let query = r#"
            INSERT INTO candidate_profiles
                (id, name, skills_offered, skills_wanted, bio, location, avatar_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                skills_offered = EXCLUDED.skills_offered,
                skills_wanted = EXCLUDED.skills_wanted,
                bio = EXCLUDED.bio,
                location = EXCLUDED.location,
                avatar_url = EXCLUDED.avatar_url,
                updated_at = NOW()
        "#;

        sqlx::query(query)
            .bind(&profile.id)
            .bind(&profile.name)
            .bind(&profile.skills_offered)
            .bind(&profile.skills_wanted)
            .bind(&profile.bio)
            .bind(&profile.location)
            .bind(&profile.avatar_url)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Upserted candidate profile {}", profile.id);

        Ok(())
    }

    /// Insert a batch of profiles in one transaction, in slice order
    ///
    /// Ids already present are left untouched. Returns the number of rows
    /// actually inserted.
    pub async fn seed(&self, profiles: &[CandidateProfile]) -> Result<u64, DirectoryError> {
        crate::services::directory::ensure_unique_ids(profiles)?;

        let mut inserted = 0;
        let mut tx = self.pool.begin().await?;
        for profile in profiles {
            inserted += sqlx::query(
                r#"
                INSERT INTO candidate_profiles
                    (id, name, skills_offered, skills_wanted, bio, location, avatar_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(&profile.id)
            .bind(&profile.name)
            .bind(&profile.skills_offered)
            .bind(&profile.skills_wanted)
            .bind(&profile.bio)
            .bind(&profile.location)
            .bind(&profile.avatar_url)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }
        tx.commit().await?;

        tracing::info!(
            "Seeded {} candidate profiles ({} already present)",
            inserted,
            profiles.len() as u64 - inserted
        );

        Ok(inserted)
    }
}

fn profile_from_row(row: &PgRow) -> Result<CandidateProfile, sqlx::Error> {
    Ok(CandidateProfile {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        skills_offered: row.try_get("skills_offered")?,
        skills_wanted: row.try_get("skills_wanted")?,
        bio: row.try_get("bio")?,
        location: row.try_get("location")?,
        avatar_url: row.try_get("avatar_url")?,
    })
}

#[async_trait]
impl CandidateDirectory for PostgresDirectory {
    async fn list_candidates(&self) -> Result<Arc<Vec<CandidateProfile>>, DirectoryError> {
        let query = r#"
            SELECT id, name, skills_offered, skills_wanted, bio, location, avatar_url
            FROM candidate_profiles
            ORDER BY position
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let profiles = rows
            .iter()
            .map(profile_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Listed {} candidates from PostgreSQL", profiles.len());

        Ok(Arc::new(profiles))
    }

    async fn get_candidate(&self, id: &str) -> Result<Option<CandidateProfile>, DirectoryError> {
        let query = r#"
            SELECT id, name, skills_offered, skills_wanted, bio, location, avatar_url
            FROM candidate_profiles
            WHERE id = $1
        "#;

        let row = sqlx::query(query).bind(id).fetch_optional(&self.pool).await?;

        Ok(row.as_ref().map(profile_from_row).transpose()?)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
