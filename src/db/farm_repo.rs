use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        farm::{Farm, FarmWithRelations},
        harvest::Harvest,
        producer::Producer,
    },
};

// Interface de acesso a dados das fazendas.
#[async_trait]
pub trait FarmRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Farm>, AppError>;
    async fn find_with_relations(&self, id: Uuid) -> Result<Option<FarmWithRelations>, AppError>;
    async fn list_with_relations(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FarmWithRelations>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    #[allow(clippy::too_many_arguments)]
    async fn create(
        &self,
        name: &str,
        city: &str,
        state: &str,
        total_area: f64,
        agricultural_area: f64,
        vegetation_area: f64,
        producer_id: Uuid,
    ) -> Result<Farm, AppError>;
    async fn update(&self, farm: &Farm) -> Result<Farm, AppError>;
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

const FARM_COLUMNS: &str =
    "id, name, city, state, total_area, agricultural_area, vegetation_area, producer_id";

#[derive(Clone)]
pub struct PgFarmRepository {
    pool: PgPool,
}

impl PgFarmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_producer(&self, producer_id: Uuid) -> Result<Producer, AppError> {
        // A FK garante que o produtor existe enquanto a fazenda existir.
        let producer = sqlx::query_as::<_, Producer>(
            "SELECT id, name, document FROM producers WHERE id = $1",
        )
        .bind(producer_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(producer)
    }
}

#[async_trait]
impl FarmRepository for PgFarmRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Farm>, AppError> {
        let farm = sqlx::query_as::<_, Farm>(&format!(
            "SELECT {FARM_COLUMNS} FROM farms WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(farm)
    }

    async fn find_with_relations(&self, id: Uuid) -> Result<Option<FarmWithRelations>, AppError> {
        let Some(farm) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let producer = self.load_producer(farm.producer_id).await?;
        let harvests = sqlx::query_as::<_, Harvest>(
            "SELECT id, name, farm_id FROM harvests WHERE farm_id = $1 ORDER BY name",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(FarmWithRelations::new(farm, producer, harvests)))
    }

    async fn list_with_relations(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FarmWithRelations>, AppError> {
        let farms = sqlx::query_as::<_, Farm>(&format!(
            "SELECT {FARM_COLUMNS} FROM farms ORDER BY name LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let farm_ids: Vec<Uuid> = farms.iter().map(|f| f.id).collect();
        let producer_ids: Vec<Uuid> = farms.iter().map(|f| f.producer_id).collect();

        let producers = sqlx::query_as::<_, Producer>(
            "SELECT id, name, document FROM producers WHERE id = ANY($1)",
        )
        .bind(&producer_ids)
        .fetch_all(&self.pool)
        .await?;

        let harvests = sqlx::query_as::<_, Harvest>(
            "SELECT id, name, farm_id FROM harvests WHERE farm_id = ANY($1) ORDER BY name",
        )
        .bind(&farm_ids)
        .fetch_all(&self.pool)
        .await?;

        farms
            .into_iter()
            .map(|farm| {
                let producer = producers
                    .iter()
                    .find(|p| p.id == farm.producer_id)
                    .cloned()
                    .ok_or(sqlx::Error::RowNotFound)?;
                let harvests = harvests
                    .iter()
                    .filter(|h| h.farm_id == farm.id)
                    .cloned()
                    .collect();
                Ok(FarmWithRelations::new(farm, producer, harvests))
            })
            .collect()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM farms")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create(
        &self,
        name: &str,
        city: &str,
        state: &str,
        total_area: f64,
        agricultural_area: f64,
        vegetation_area: f64,
        producer_id: Uuid,
    ) -> Result<Farm, AppError> {
        let farm = sqlx::query_as::<_, Farm>(&format!(
            r#"
            INSERT INTO farms (name, city, state, total_area, agricultural_area, vegetation_area, producer_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {FARM_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(city)
        .bind(state)
        .bind(total_area)
        .bind(agricultural_area)
        .bind(vegetation_area)
        .bind(producer_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(farm)
    }

    async fn update(&self, farm: &Farm) -> Result<Farm, AppError> {
        let farm = sqlx::query_as::<_, Farm>(&format!(
            r#"
            UPDATE farms
            SET name = $2, city = $3, state = $4, total_area = $5,
                agricultural_area = $6, vegetation_area = $7, producer_id = $8
            WHERE id = $1
            RETURNING {FARM_COLUMNS}
            "#
        ))
        .bind(farm.id)
        .bind(&farm.name)
        .bind(&farm.city)
        .bind(&farm.state)
        .bind(farm.total_area)
        .bind(farm.agricultural_area)
        .bind(farm.vegetation_area)
        .bind(farm.producer_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(farm)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        // As safras caem pelo ON DELETE CASCADE.
        sqlx::query("DELETE FROM farms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
