// src/services/harvest_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{Paginated, PaginationParams},
    },
    db::{CropRepository, FarmRepository, HarvestRepository},
    models::harvest::{
        CreateHarvestPayload, Harvest, HarvestWithRelations, UpdateHarvestPayload,
    },
};

#[derive(Clone)]
pub struct HarvestService {
    harvest_repo: Arc<dyn HarvestRepository>,
    farm_repo: Arc<dyn FarmRepository>,
    crop_repo: Arc<dyn CropRepository>,
}

impl HarvestService {
    pub fn new(
        harvest_repo: Arc<dyn HarvestRepository>,
        farm_repo: Arc<dyn FarmRepository>,
        crop_repo: Arc<dyn CropRepository>,
    ) -> Self {
        Self {
            harvest_repo,
            farm_repo,
            crop_repo,
        }
    }

    // Tudo ou nada: qualquer id desconhecido invalida a associação inteira.
    async fn ensure_crops_exist(&self, crop_ids: &[Uuid]) -> Result<(), AppError> {
        if crop_ids.is_empty() {
            return Ok(());
        }
        let crops = self.crop_repo.find_by_ids(crop_ids).await?;
        if crops.len() != crop_ids.len() {
            tracing::warn!("Alguma(s) cultura(s) informada(s) não foram encontradas.");
            return Err(AppError::CropsNotFound);
        }
        Ok(())
    }

    pub async fn create(&self, payload: &CreateHarvestPayload) -> Result<Harvest, AppError> {
        tracing::info!(
            "Tentativa de criar safra \"{}\" na fazenda {}",
            payload.name,
            payload.farm_id
        );

        if self.farm_repo.find_by_id(payload.farm_id).await?.is_none() {
            tracing::warn!("Fazenda com ID {} não encontrada.", payload.farm_id);
            return Err(AppError::FarmNotFound);
        }

        if self
            .harvest_repo
            .find_by_name_in_farm(&payload.name, payload.farm_id)
            .await?
            .is_some()
        {
            tracing::warn!(
                "Já existe uma safra com o nome \"{}\" para a fazenda {}.",
                payload.name,
                payload.farm_id
            );
            return Err(AppError::HarvestNameTaken);
        }

        self.ensure_crops_exist(&payload.crop_ids).await?;

        let harvest = self
            .harvest_repo
            .create(&payload.name, payload.farm_id, &payload.crop_ids)
            .await?;
        tracing::info!("Safra criada com sucesso: ID {}", harvest.id);
        Ok(harvest)
    }

    pub async fn find_all(
        &self,
        params: &PaginationParams,
    ) -> Result<Paginated<HarvestWithRelations>, AppError> {
        let total = self.harvest_repo.count().await?;
        let data = self
            .harvest_repo
            .list_with_relations(params.limit(), params.offset())
            .await?;
        Ok(Paginated::new(data, params, total))
    }

    pub async fn find_one(&self, id: Uuid) -> Result<HarvestWithRelations, AppError> {
        self.harvest_repo
            .find_with_relations(id)
            .await?
            .ok_or(AppError::HarvestNotFound)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateHarvestPayload,
    ) -> Result<Harvest, AppError> {
        let mut harvest = self
            .harvest_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::HarvestNotFound)?;

        if let Some(farm_id) = payload.farm_id {
            if farm_id != harvest.farm_id && self.farm_repo.find_by_id(farm_id).await?.is_none() {
                tracing::warn!("Fazenda com ID {} não encontrada.", farm_id);
                return Err(AppError::FarmNotFound);
            }
            harvest.farm_id = farm_id;
        }

        if let Some(name) = &payload.name {
            harvest.name = name.clone();
        }

        // A unicidade vale no escopo da fazenda de destino (mover a safra
        // também pode conflitar), ignorando o próprio registro.
        if payload.name.is_some() || payload.farm_id.is_some() {
            let conflict = self
                .harvest_repo
                .find_by_name_in_farm(&harvest.name, harvest.farm_id)
                .await?;
            if conflict.is_some_and(|existing| existing.id != id) {
                tracing::warn!(
                    "Já existe uma safra com o nome \"{}\" para a fazenda {}.",
                    harvest.name,
                    harvest.farm_id
                );
                return Err(AppError::HarvestNameTaken);
            }
        }

        if let Some(crop_ids) = &payload.crop_ids {
            self.ensure_crops_exist(crop_ids).await?;
        }

        let saved = self.harvest_repo.update(&harvest).await?;

        if let Some(crop_ids) = &payload.crop_ids {
            self.harvest_repo.set_crops(id, crop_ids).await?;
        }

        tracing::info!("Safra atualizada com sucesso: ID {}", saved.id);
        Ok(saved)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.harvest_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::HarvestNotFound)?;

        self.harvest_repo.delete(id).await?;
        tracing::info!("Safra removida com sucesso: ID {}", id);
        Ok(())
    }
}
