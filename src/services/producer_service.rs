// src/services/producer_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{Paginated, PaginationParams},
    },
    db::ProducerRepository,
    models::producer::{
        CreateProducerPayload, Producer, ProducerWithFarms, UpdateProducerPayload,
    },
};

#[derive(Clone)]
pub struct ProducerService {
    repo: Arc<dyn ProducerRepository>,
}

impl ProducerService {
    pub fn new(repo: Arc<dyn ProducerRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, payload: &CreateProducerPayload) -> Result<Producer, AppError> {
        tracing::info!("Tentativa de criar produtor com documento {}", payload.document);

        // Atalho de mensagem; a chave única do banco é quem garante.
        if self
            .repo
            .find_by_document(&payload.document)
            .await?
            .is_some()
        {
            tracing::warn!("Produtor com documento {} já existe.", payload.document);
            return Err(AppError::DocumentAlreadyExists);
        }

        let producer = self.repo.create(&payload.name, &payload.document).await?;
        tracing::info!("Produtor criado com sucesso: ID {}", producer.id);
        Ok(producer)
    }

    pub async fn find_all(
        &self,
        params: &PaginationParams,
    ) -> Result<Paginated<ProducerWithFarms>, AppError> {
        let total = self.repo.count().await?;
        let data = self
            .repo
            .list_with_farms(params.limit(), params.offset())
            .await?;
        Ok(Paginated::new(data, params, total))
    }

    pub async fn find_one(&self, id: Uuid) -> Result<ProducerWithFarms, AppError> {
        self.repo
            .find_with_farms(id)
            .await?
            .ok_or(AppError::ProducerNotFound)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateProducerPayload,
    ) -> Result<Producer, AppError> {
        let mut producer = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ProducerNotFound)?;

        // Merge parcial: campos ausentes mantêm o valor atual.
        if let Some(name) = &payload.name {
            producer.name = name.clone();
        }
        if let Some(document) = &payload.document {
            producer.document = document.clone();
        }

        let saved = self.repo.update(&producer).await?;
        tracing::info!("Produtor atualizado com sucesso: ID {}", saved.id);
        Ok(saved)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ProducerNotFound)?;

        self.repo.delete(id).await?;
        tracing::info!("Produtor removido com sucesso: ID {}", id);
        Ok(())
    }
}
