// src/services/farm_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{Paginated, PaginationParams},
    },
    db::{FarmRepository, ProducerRepository},
    models::farm::{CreateFarmPayload, Farm, FarmWithRelations, UpdateFarmPayload},
};

#[derive(Clone)]
pub struct FarmService {
    farm_repo: Arc<dyn FarmRepository>,
    producer_repo: Arc<dyn ProducerRepository>,
}

// Invariante central da fazenda: a área total comporta as duas subáreas.
fn area_sum_fits(total: f64, agricultural: f64, vegetation: f64) -> bool {
    agricultural + vegetation <= total
}

impl FarmService {
    pub fn new(
        farm_repo: Arc<dyn FarmRepository>,
        producer_repo: Arc<dyn ProducerRepository>,
    ) -> Self {
        Self {
            farm_repo,
            producer_repo,
        }
    }

    pub async fn create(&self, payload: &CreateFarmPayload) -> Result<Farm, AppError> {
        if self
            .producer_repo
            .find_by_id(payload.producer_id)
            .await?
            .is_none()
        {
            tracing::warn!("Produtor com ID {} não encontrado.", payload.producer_id);
            return Err(AppError::ProducerNotFound);
        }

        if !area_sum_fits(
            payload.total_area,
            payload.agricultural_area,
            payload.vegetation_area,
        ) {
            tracing::warn!(
                "Áreas inválidas: agricultável {} + vegetação {} > total {}",
                payload.agricultural_area,
                payload.vegetation_area,
                payload.total_area
            );
            return Err(AppError::AreaSumExceedsTotal);
        }

        let farm = self
            .farm_repo
            .create(
                &payload.name,
                &payload.city,
                &payload.state,
                payload.total_area,
                payload.agricultural_area,
                payload.vegetation_area,
                payload.producer_id,
            )
            .await?;
        tracing::info!("Fazenda criada com sucesso: ID {}", farm.id);
        Ok(farm)
    }

    pub async fn find_all(
        &self,
        params: &PaginationParams,
    ) -> Result<Paginated<FarmWithRelations>, AppError> {
        let total = self.farm_repo.count().await?;
        let data = self
            .farm_repo
            .list_with_relations(params.limit(), params.offset())
            .await?;
        Ok(Paginated::new(data, params, total))
    }

    pub async fn find_one(&self, id: Uuid) -> Result<FarmWithRelations, AppError> {
        self.farm_repo
            .find_with_relations(id)
            .await?
            .ok_or(AppError::FarmNotFound)
    }

    pub async fn update(&self, id: Uuid, payload: &UpdateFarmPayload) -> Result<Farm, AppError> {
        let mut farm = self
            .farm_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::FarmNotFound)?;

        // Troca de produtor exige que o novo exista.
        if let Some(producer_id) = payload.producer_id {
            if producer_id != farm.producer_id
                && self.producer_repo.find_by_id(producer_id).await?.is_none()
            {
                tracing::warn!("Produtor com ID {} não encontrado.", producer_id);
                return Err(AppError::ProducerNotFound);
            }
            farm.producer_id = producer_id;
        }

        // O invariante é recalculado sobre os valores já mesclados.
        let total_area = payload.total_area.unwrap_or(farm.total_area);
        let agricultural_area = payload.agricultural_area.unwrap_or(farm.agricultural_area);
        let vegetation_area = payload.vegetation_area.unwrap_or(farm.vegetation_area);

        if !area_sum_fits(total_area, agricultural_area, vegetation_area) {
            tracing::warn!(
                "Áreas inválidas: agricultável {} + vegetação {} > total {}",
                agricultural_area,
                vegetation_area,
                total_area
            );
            return Err(AppError::AreaSumExceedsTotal);
        }

        if let Some(name) = &payload.name {
            farm.name = name.clone();
        }
        if let Some(city) = &payload.city {
            farm.city = city.clone();
        }
        if let Some(state) = &payload.state {
            farm.state = state.clone();
        }
        farm.total_area = total_area;
        farm.agricultural_area = agricultural_area;
        farm.vegetation_area = vegetation_area;

        let saved = self.farm_repo.update(&farm).await?;
        tracing::info!("Fazenda atualizada com sucesso: ID {}", saved.id);
        Ok(saved)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.farm_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::FarmNotFound)?;

        self.farm_repo.delete(id).await?;
        tracing::info!("Fazenda removida com sucesso: ID {}", id);
        Ok(())
    }
}
