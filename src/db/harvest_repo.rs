use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        crop::Crop,
        farm::Farm,
        harvest::{Harvest, HarvestWithRelations},
    },
};

// Interface de acesso a dados das safras, incluindo a associação N:N
// com culturas.
#[async_trait]
pub trait HarvestRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Harvest>, AppError>;
    async fn find_by_name_in_farm(
        &self,
        name: &str,
        farm_id: Uuid,
    ) -> Result<Option<Harvest>, AppError>;
    async fn find_with_relations(
        &self,
        id: Uuid,
    ) -> Result<Option<HarvestWithRelations>, AppError>;
    async fn list_with_relations(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HarvestWithRelations>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    async fn create(
        &self,
        name: &str,
        farm_id: Uuid,
        crop_ids: &[Uuid],
    ) -> Result<Harvest, AppError>;
    async fn update(&self, harvest: &Harvest) -> Result<Harvest, AppError>;
    async fn set_crops(&self, harvest_id: Uuid, crop_ids: &[Uuid]) -> Result<(), AppError>;
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgHarvestRepository {
    pool: PgPool,
}

impl PgHarvestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HarvestRepository for PgHarvestRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Harvest>, AppError> {
        let harvest =
            sqlx::query_as::<_, Harvest>("SELECT id, name, farm_id FROM harvests WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(harvest)
    }

    async fn find_by_name_in_farm(
        &self,
        name: &str,
        farm_id: Uuid,
    ) -> Result<Option<Harvest>, AppError> {
        let harvest = sqlx::query_as::<_, Harvest>(
            "SELECT id, name, farm_id FROM harvests WHERE farm_id = $1 AND name = $2",
        )
        .bind(farm_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(harvest)
    }

    async fn find_with_relations(
        &self,
        id: Uuid,
    ) -> Result<Option<HarvestWithRelations>, AppError> {
        let Some(harvest) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let farm = sqlx::query_as::<_, Farm>(
            r#"
            SELECT id, name, city, state, total_area, agricultural_area, vegetation_area, producer_id
            FROM farms
            WHERE id = $1
            "#,
        )
        .bind(harvest.farm_id)
        .fetch_one(&self.pool)
        .await?;

        let crops = sqlx::query_as::<_, Crop>(
            r#"
            SELECT c.id, c.name
            FROM crops c
            JOIN harvest_crops hc ON hc.crop_id = c.id
            WHERE hc.harvest_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(HarvestWithRelations::new(harvest, farm, crops)))
    }

    async fn list_with_relations(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HarvestWithRelations>, AppError> {
        let harvests = sqlx::query_as::<_, Harvest>(
            "SELECT id, name, farm_id FROM harvests ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let harvest_ids: Vec<Uuid> = harvests.iter().map(|h| h.id).collect();
        let farm_ids: Vec<Uuid> = harvests.iter().map(|h| h.farm_id).collect();

        let farms = sqlx::query_as::<_, Farm>(
            r#"
            SELECT id, name, city, state, total_area, agricultural_area, vegetation_area, producer_id
            FROM farms
            WHERE id = ANY($1)
            "#,
        )
        .bind(&farm_ids)
        .fetch_all(&self.pool)
        .await?;

        // Pares (safra, cultura) de toda a página, agrupados em memória.
        let associations = sqlx::query_as::<_, (Uuid, Uuid, String)>(
            r#"
            SELECT hc.harvest_id, c.id, c.name
            FROM crops c
            JOIN harvest_crops hc ON hc.crop_id = c.id
            WHERE hc.harvest_id = ANY($1)
            ORDER BY c.name
            "#,
        )
        .bind(&harvest_ids)
        .fetch_all(&self.pool)
        .await?;

        harvests
            .into_iter()
            .map(|harvest| {
                let farm = farms
                    .iter()
                    .find(|f| f.id == harvest.farm_id)
                    .cloned()
                    .ok_or(sqlx::Error::RowNotFound)?;
                let crops = associations
                    .iter()
                    .filter(|(harvest_id, _, _)| *harvest_id == harvest.id)
                    .map(|(_, id, name)| Crop {
                        id: *id,
                        name: name.clone(),
                    })
                    .collect();
                Ok(HarvestWithRelations::new(harvest, farm, crops))
            })
            .collect()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM harvests")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create(
        &self,
        name: &str,
        farm_id: Uuid,
        crop_ids: &[Uuid],
    ) -> Result<Harvest, AppError> {
        let mut tx = self.pool.begin().await?;

        let harvest = sqlx::query_as::<_, Harvest>(
            "INSERT INTO harvests (name, farm_id) VALUES ($1, $2) RETURNING id, name, farm_id",
        )
        .bind(name)
        .bind(farm_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_harvest_name_unique)?;

        if !crop_ids.is_empty() {
            sqlx::query(
                "INSERT INTO harvest_crops (harvest_id, crop_id) SELECT $1, UNNEST($2::uuid[])",
            )
            .bind(harvest.id)
            .bind(crop_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(harvest)
    }

    async fn update(&self, harvest: &Harvest) -> Result<Harvest, AppError> {
        let harvest = sqlx::query_as::<_, Harvest>(
            "UPDATE harvests SET name = $2, farm_id = $3 WHERE id = $1 RETURNING id, name, farm_id",
        )
        .bind(harvest.id)
        .bind(&harvest.name)
        .bind(harvest.farm_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_harvest_name_unique)?;
        Ok(harvest)
    }

    async fn set_crops(&self, harvest_id: Uuid, crop_ids: &[Uuid]) -> Result<(), AppError> {
        // Substitui o conjunto inteiro de associações.
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM harvest_crops WHERE harvest_id = $1")
            .bind(harvest_id)
            .execute(&mut *tx)
            .await?;

        if !crop_ids.is_empty() {
            sqlx::query(
                "INSERT INTO harvest_crops (harvest_id, crop_id) SELECT $1, UNNEST($2::uuid[])",
            )
            .bind(harvest_id)
            .bind(crop_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM harvests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// Converte a violação da chave única (farm_id, name) no erro de domínio.
fn map_harvest_name_unique(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::HarvestNameTaken;
        }
    }
    e.into()
}
