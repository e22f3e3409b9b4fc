use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        farm::Farm,
        producer::{Producer, ProducerWithFarms},
    },
};

// Interface de acesso a dados dos produtores. Os serviços dependem do
// trait, não da implementação Postgres.
#[async_trait]
pub trait ProducerRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Producer>, AppError>;
    async fn find_by_document(&self, document: &str) -> Result<Option<Producer>, AppError>;
    async fn find_with_farms(&self, id: Uuid) -> Result<Option<ProducerWithFarms>, AppError>;
    async fn list_with_farms(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProducerWithFarms>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    async fn create(&self, name: &str, document: &str) -> Result<Producer, AppError>;
    async fn update(&self, producer: &Producer) -> Result<Producer, AppError>;
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgProducerRepository {
    pool: PgPool,
}

impl PgProducerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProducerRepository for PgProducerRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Producer>, AppError> {
        let producer =
            sqlx::query_as::<_, Producer>("SELECT id, name, document FROM producers WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(producer)
    }

    async fn find_by_document(&self, document: &str) -> Result<Option<Producer>, AppError> {
        let producer = sqlx::query_as::<_, Producer>(
            "SELECT id, name, document FROM producers WHERE document = $1",
        )
        .bind(document)
        .fetch_optional(&self.pool)
        .await?;
        Ok(producer)
    }

    async fn find_with_farms(&self, id: Uuid) -> Result<Option<ProducerWithFarms>, AppError> {
        let Some(producer) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let farms = sqlx::query_as::<_, Farm>(
            r#"
            SELECT id, name, city, state, total_area, agricultural_area, vegetation_area, producer_id
            FROM farms
            WHERE producer_id = $1
            ORDER BY name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ProducerWithFarms::new(producer, farms)))
    }

    async fn list_with_farms(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProducerWithFarms>, AppError> {
        let producers = sqlx::query_as::<_, Producer>(
            "SELECT id, name, document FROM producers ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = producers.iter().map(|p| p.id).collect();
        let farms = sqlx::query_as::<_, Farm>(
            r#"
            SELECT id, name, city, state, total_area, agricultural_area, vegetation_area, producer_id
            FROM farms
            WHERE producer_id = ANY($1)
            ORDER BY name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(producers
            .into_iter()
            .map(|producer| {
                let farms = farms
                    .iter()
                    .filter(|farm| farm.producer_id == producer.id)
                    .cloned()
                    .collect();
                ProducerWithFarms::new(producer, farms)
            })
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM producers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create(&self, name: &str, document: &str) -> Result<Producer, AppError> {
        let producer = sqlx::query_as::<_, Producer>(
            "INSERT INTO producers (name, document) VALUES ($1, $2) RETURNING id, name, document",
        )
        .bind(name)
        .bind(document)
        .fetch_one(&self.pool)
        .await
        .map_err(map_document_unique)?;
        Ok(producer)
    }

    async fn update(&self, producer: &Producer) -> Result<Producer, AppError> {
        let producer = sqlx::query_as::<_, Producer>(
            "UPDATE producers SET name = $2, document = $3 WHERE id = $1 RETURNING id, name, document",
        )
        .bind(producer.id)
        .bind(&producer.name)
        .bind(&producer.document)
        .fetch_one(&self.pool)
        .await
        .map_err(map_document_unique)?;
        Ok(producer)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        // As fazendas (e safras) caem pelo ON DELETE CASCADE.
        sqlx::query("DELETE FROM producers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// Converte a violação da chave única de documento no erro de domínio.
fn map_document_unique(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::DocumentAlreadyExists;
        }
    }
    e.into()
}
