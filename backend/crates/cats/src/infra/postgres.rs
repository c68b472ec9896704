//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::cat::{Cat, CatFields, CatSummary, CatWithPhotos};
use crate::domain::entity::photo::{CatPhoto, NewCatPhoto, PhotoRef};
use crate::domain::repository::{CatPhotoRepository, CatRepository};
use crate::domain::value_object::{
    CatId, PhotoId, UserId,
    cat_profile::{CatAge, CatDescription, CatName},
};
use crate::error::{CatsError, CatsResult};

/// PostgreSQL-backed cat and photo repository
#[derive(Clone)]
pub struct PgCatRepository {
    pool: PgPool,
}

impl PgCatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn require_row(rows_affected: u64) -> CatsResult<()> {
    if rows_affected == 0 {
        return Err(CatsError::CatNotFound);
    }
    Ok(())
}

// ============================================================================
// Cat Repository Implementation
// ============================================================================

impl CatRepository for PgCatRepository {
    async fn create(&self, owner: UserId, fields: &CatFields) -> CatsResult<Cat> {
        let row = sqlx::query_as::<_, CatRow>(
            r#"
            INSERT INTO cats (name, age, description, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, age, description, created_by, created_at
            "#,
        )
        .bind(fields.name.as_str())
        .bind(fields.age.value())
        .bind(fields.description.as_str())
        .bind(owner.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_cat())
    }

    async fn find_with_photos(&self, cat_id: CatId) -> CatsResult<Option<CatWithPhotos>> {
        let Some(row) = sqlx::query_as::<_, CatRow>(
            r#"
            SELECT id, name, age, description, created_by, created_at
            FROM cats
            WHERE id = $1
            "#,
        )
        .bind(cat_id.value())
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let photos = sqlx::query_as::<_, PhotoRefRow>(
            r#"
            SELECT id, url, is_primary
            FROM cat_photos
            WHERE cat_id = $1
            ORDER BY is_primary DESC, id
            "#,
        )
        .bind(cat_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(CatWithPhotos {
            cat: row.into_cat(),
            photos: photos.into_iter().map(PhotoRefRow::into_ref).collect(),
        }))
    }

    async fn owner_of(&self, cat_id: CatId) -> CatsResult<Option<UserId>> {
        let owner: Option<i64> = sqlx::query_scalar("SELECT created_by FROM cats WHERE id = $1")
            .bind(cat_id.value())
            .fetch_optional(&self.pool)
            .await?;

        Ok(owner.map(UserId::from_i64))
    }

    async fn list(&self) -> CatsResult<Vec<CatSummary>> {
        let rows = sqlx::query_as::<_, CatSummaryRow>(
            r#"
            SELECT c.id, c.name, c.age, p.id AS photo_id, p.url
            FROM cats c
            LEFT JOIN LATERAL (
                SELECT id, url
                FROM cat_photos
                WHERE cat_id = c.id
                ORDER BY is_primary DESC, id
                LIMIT 1
            ) p ON true
            ORDER BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CatSummaryRow::into_summary).collect())
    }

    async fn list_ids_by_owner(&self, owner: UserId) -> CatsResult<Vec<CatId>> {
        let ids: Vec<i64> =
            sqlx::query_scalar("SELECT id FROM cats WHERE created_by = $1 ORDER BY id")
                .bind(owner.value())
                .fetch_all(&self.pool)
                .await?;

        Ok(ids.into_iter().map(CatId::from_i64).collect())
    }

    async fn update(&self, cat_id: CatId, fields: &CatFields) -> CatsResult<Cat> {
        let row = sqlx::query_as::<_, CatRow>(
            r#"
            UPDATE cats
            SET name = $1, age = $2, description = $3
            WHERE id = $4
            RETURNING id, name, age, description, created_by, created_at
            "#,
        )
        .bind(fields.name.as_str())
        .bind(fields.age.value())
        .bind(fields.description.as_str())
        .bind(cat_id.value())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatsError::CatNotFound)?;

        Ok(row.into_cat())
    }

    async fn update_name(&self, cat_id: CatId, name: &CatName) -> CatsResult<()> {
        let updated = sqlx::query("UPDATE cats SET name = $1 WHERE id = $2")
            .bind(name.as_str())
            .bind(cat_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        require_row(updated)
    }

    async fn update_age(&self, cat_id: CatId, age: CatAge) -> CatsResult<()> {
        let updated = sqlx::query("UPDATE cats SET age = $1 WHERE id = $2")
            .bind(age.value())
            .bind(cat_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        require_row(updated)
    }

    async fn update_description(
        &self,
        cat_id: CatId,
        description: &CatDescription,
    ) -> CatsResult<()> {
        let updated = sqlx::query("UPDATE cats SET description = $1 WHERE id = $2")
            .bind(description.as_str())
            .bind(cat_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        require_row(updated)
    }

    async fn delete(&self, cat_id: CatId) -> CatsResult<Vec<String>> {
        let mut tx = self.pool.begin().await?;

        let keys: Vec<String> =
            sqlx::query_scalar("DELETE FROM cat_photos WHERE cat_id = $1 RETURNING object_key")
                .bind(cat_id.value())
                .fetch_all(&mut *tx)
                .await?;

        let deleted = sqlx::query("DELETE FROM cats WHERE id = $1")
            .bind(cat_id.value())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        require_row(deleted)?;
        tx.commit().await?;
        Ok(keys)
    }
}

// ============================================================================
// Cat Photo Repository Implementation
// ============================================================================

impl CatPhotoRepository for PgCatRepository {
    async fn insert(&self, photo: &NewCatPhoto) -> CatsResult<CatPhoto> {
        let row = sqlx::query_as::<_, CatPhotoRow>(
            r#"
            INSERT INTO cat_photos (cat_id, object_key, url, file_name, file_size, mime_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, cat_id, object_key, url, file_name, file_size, mime_type,
                      is_primary, created_at
            "#,
        )
        .bind(photo.cat_id.value())
        .bind(&photo.object_key)
        .bind(&photo.url)
        .bind(&photo.file_name)
        .bind(photo.file_size)
        .bind(&photo.mime_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_photo())
    }

    async fn find_by_id(&self, photo_id: PhotoId) -> CatsResult<Option<CatPhoto>> {
        let row = sqlx::query_as::<_, CatPhotoRow>(
            r#"
            SELECT id, cat_id, object_key, url, file_name, file_size, mime_type,
                   is_primary, created_at
            FROM cat_photos
            WHERE id = $1
            "#,
        )
        .bind(photo_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CatPhotoRow::into_photo))
    }

    async fn object_keys_for_cat(&self, cat_id: CatId) -> CatsResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT object_key FROM cat_photos WHERE cat_id = $1")
            .bind(cat_id.value())
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }

    async fn set_primary(&self, cat_id: CatId, photo_id: PhotoId) -> CatsResult<()> {
        let mut tx = self.pool.begin().await?;

        let owner: Option<i64> =
            sqlx::query_scalar("SELECT cat_id FROM cat_photos WHERE id = $1 FOR UPDATE")
                .bind(photo_id.value())
                .fetch_optional(&mut *tx)
                .await?;

        match owner {
            None => return Err(CatsError::PhotoNotFound),
            Some(owner) if owner != cat_id.value() => return Err(CatsError::PhotoNotOwned),
            Some(_) => {}
        }

        sqlx::query("UPDATE cat_photos SET is_primary = false WHERE cat_id = $1 AND is_primary")
            .bind(cat_id.value())
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE cat_photos SET is_primary = true WHERE id = $1")
            .bind(photo_id.value())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, photo_id: PhotoId) -> CatsResult<()> {
        sqlx::query("DELETE FROM cat_photos WHERE id = $1")
            .bind(photo_id.value())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CatRow {
    id: i64,
    name: String,
    age: i32,
    description: String,
    created_by: i64,
    created_at: DateTime<Utc>,
}

impl CatRow {
    fn into_cat(self) -> Cat {
        Cat {
            id: CatId::from_i64(self.id),
            name: CatName::from_db(self.name),
            age: CatAge::from_db(self.age),
            description: CatDescription::from_db(self.description),
            created_by: UserId::from_i64(self.created_by),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PhotoRefRow {
    id: i64,
    url: String,
    is_primary: bool,
}

impl PhotoRefRow {
    fn into_ref(self) -> PhotoRef {
        PhotoRef {
            id: PhotoId::from_i64(self.id),
            url: self.url,
            is_primary: self.is_primary,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CatSummaryRow {
    id: i64,
    name: String,
    age: i32,
    photo_id: Option<i64>,
    url: Option<String>,
}

impl CatSummaryRow {
    fn into_summary(self) -> CatSummary {
        CatSummary {
            id: CatId::from_i64(self.id),
            name: CatName::from_db(self.name),
            age: CatAge::from_db(self.age),
            photo_id: self.photo_id.map(PhotoId::from_i64),
            url: self.url,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CatPhotoRow {
    id: i64,
    cat_id: i64,
    object_key: String,
    url: String,
    file_name: String,
    file_size: i64,
    mime_type: String,
    is_primary: bool,
    created_at: DateTime<Utc>,
}

impl CatPhotoRow {
    fn into_photo(self) -> CatPhoto {
        CatPhoto {
            id: PhotoId::from_i64(self.id),
            cat_id: CatId::from_i64(self.cat_id),
            object_key: self.object_key,
            url: self.url,
            file_name: self.file_name,
            file_size: self.file_size,
            mime_type: self.mime_type,
            is_primary: self.is_primary,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    const CATS_MIGRATION: &str =
        include_str!("../../../../../database/migrations/20250101000001_create_cats.sql");

    fn column(table: &str, name: &str) -> String {
        let body = CATS_MIGRATION
            .split(&format!("CREATE TABLE IF NOT EXISTS {} (", table))
            .nth(1)
            .unwrap();
        let body = &body[..body.find(");").unwrap()];
        body.lines()
            .map(str::trim)
            .find(|line| line.starts_with(&format!("{} ", name)))
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_owner_and_cat_references_cascade() {
        assert_eq!(
            column("cats", "created_by"),
            "created_by BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,"
        );
        assert_eq!(
            column("cat_photos", "cat_id"),
            "cat_id BIGINT NOT NULL REFERENCES cats(id) ON DELETE CASCADE,"
        );
    }

    #[test]
    fn test_object_key_is_unique() {
        assert!(column("cat_photos", "object_key").contains("UNIQUE"));
        assert!(CATS_MIGRATION.contains("CREATE UNIQUE INDEX IF NOT EXISTS idx_cat_photos_primary"));
    }
}
