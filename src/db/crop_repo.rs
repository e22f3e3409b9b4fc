use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        crop::{Crop, CropWithHarvests},
        harvest::Harvest,
    },
};

// Interface de acesso a dados das culturas.
#[async_trait]
pub trait CropRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Crop>, AppError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Crop>, AppError>;
    /// Retorna só as culturas cujos ids existem; quem chama decide o que
    /// fazer quando a contagem não bate.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Crop>, AppError>;
    async fn find_with_harvests(&self, id: Uuid) -> Result<Option<CropWithHarvests>, AppError>;
    async fn list_with_harvests(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CropWithHarvests>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    async fn create(&self, name: &str) -> Result<Crop, AppError>;
    async fn update(&self, crop: &Crop) -> Result<Crop, AppError>;
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgCropRepository {
    pool: PgPool,
}

impl PgCropRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CropRepository for PgCropRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Crop>, AppError> {
        let crop = sqlx::query_as::<_, Crop>("SELECT id, name FROM crops WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(crop)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Crop>, AppError> {
        let crop = sqlx::query_as::<_, Crop>("SELECT id, name FROM crops WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(crop)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Crop>, AppError> {
        let crops = sqlx::query_as::<_, Crop>("SELECT id, name FROM crops WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(crops)
    }

    async fn find_with_harvests(&self, id: Uuid) -> Result<Option<CropWithHarvests>, AppError> {
        let Some(crop) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let harvests = sqlx::query_as::<_, Harvest>(
            r#"
            SELECT h.id, h.name, h.farm_id
            FROM harvests h
            JOIN harvest_crops hc ON hc.harvest_id = h.id
            WHERE hc.crop_id = $1
            ORDER BY h.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(CropWithHarvests::new(crop, harvests)))
    }

    async fn list_with_harvests(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CropWithHarvests>, AppError> {
        let crops =
            sqlx::query_as::<_, Crop>("SELECT id, name FROM crops ORDER BY name LIMIT $1 OFFSET $2")
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

        let crop_ids: Vec<Uuid> = crops.iter().map(|c| c.id).collect();
        let associations = sqlx::query_as::<_, (Uuid, Uuid, String, Uuid)>(
            r#"
            SELECT hc.crop_id, h.id, h.name, h.farm_id
            FROM harvests h
            JOIN harvest_crops hc ON hc.harvest_id = h.id
            WHERE hc.crop_id = ANY($1)
            ORDER BY h.name
            "#,
        )
        .bind(&crop_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(crops
            .into_iter()
            .map(|crop| {
                let harvests = associations
                    .iter()
                    .filter(|(crop_id, _, _, _)| *crop_id == crop.id)
                    .map(|(_, id, name, farm_id)| Harvest {
                        id: *id,
                        name: name.clone(),
                        farm_id: *farm_id,
                    })
                    .collect();
                CropWithHarvests::new(crop, harvests)
            })
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM crops")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create(&self, name: &str) -> Result<Crop, AppError> {
        let crop =
            sqlx::query_as::<_, Crop>("INSERT INTO crops (name) VALUES ($1) RETURNING id, name")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(map_crop_name_unique)?;
        Ok(crop)
    }

    async fn update(&self, crop: &Crop) -> Result<Crop, AppError> {
        let crop = sqlx::query_as::<_, Crop>(
            "UPDATE crops SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(crop.id)
        .bind(&crop.name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_crop_name_unique)?;
        Ok(crop)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        // As linhas de harvest_crops caem pelo ON DELETE CASCADE.
        sqlx::query("DELETE FROM crops WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// Converte a violação da chave única de nome no erro de domínio.
fn map_crop_name_unique(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::CropNameTaken;
        }
    }
    e.into()
}
