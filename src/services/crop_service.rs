// src/services/crop_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{Paginated, PaginationParams},
    },
    db::CropRepository,
    models::crop::{CreateCropPayload, Crop, CropWithHarvests, UpdateCropPayload},
};

#[derive(Clone)]
pub struct CropService {
    repo: Arc<dyn CropRepository>,
}

impl CropService {
    pub fn new(repo: Arc<dyn CropRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, payload: &CreateCropPayload) -> Result<Crop, AppError> {
        if self.repo.find_by_name(&payload.name).await?.is_some() {
            tracing::warn!("Cultura com nome {} já existe.", payload.name);
            return Err(AppError::CropNameTaken);
        }

        let crop = self.repo.create(&payload.name).await?;
        tracing::info!("Cultura criada com sucesso: ID {}", crop.id);
        Ok(crop)
    }

    pub async fn find_all(
        &self,
        params: &PaginationParams,
    ) -> Result<Paginated<CropWithHarvests>, AppError> {
        let total = self.repo.count().await?;
        let data = self
            .repo
            .list_with_harvests(params.limit(), params.offset())
            .await?;
        Ok(Paginated::new(data, params, total))
    }

    pub async fn find_one(&self, id: Uuid) -> Result<CropWithHarvests, AppError> {
        self.repo
            .find_with_harvests(id)
            .await?
            .ok_or(AppError::CropNotFound)
    }

    pub async fn update(&self, id: Uuid, payload: &UpdateCropPayload) -> Result<Crop, AppError> {
        let mut crop = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::CropNotFound)?;

        if let Some(name) = &payload.name {
            crop.name = name.clone();
        }

        let saved = self.repo.update(&crop).await?;
        tracing::info!("Cultura atualizada com sucesso: ID {}", saved.id);
        Ok(saved)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::CropNotFound)?;

        self.repo.delete(id).await?;
        tracing::info!("Cultura removida com sucesso: ID {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::{MemoryCropRepository, MemoryStore};

    fn service() -> CropService {
        CropService::new(Arc::new(MemoryCropRepository(MemoryStore::shared())))
    }

    fn payload(name: &str) -> CreateCropPayload {
        CreateCropPayload {
            name: name.to_owned(),
        }
    }

    #[tokio::test]
    async fn creates_a_crop() {
        let service = service();
        let crop = service.create(&payload("Soja")).await.unwrap();
        assert_eq!(crop.name, "Soja");
    }

    #[tokio::test]
    async fn rejects_duplicate_name() {
        let service = service();
        service.create(&payload("Soja")).await.unwrap();

        let err = service.create(&payload("Soja")).await.unwrap_err();
        assert!(matches!(err, AppError::CropNameTaken));
    }

    #[tokio::test]
    async fn find_one_returns_not_found_for_unknown_id() {
        let service = service();
        let err = service.find_one(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::CropNotFound));
    }

    #[tokio::test]
    async fn update_renames_a_crop() {
        let service = service();
        let crop = service.create(&payload("Soja")).await.unwrap();

        let updated = service
            .update(
                crop.id,
                &UpdateCropPayload {
                    name: Some("Milho".to_owned()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Milho");
    }

    #[tokio::test]
    async fn update_to_taken_name_conflicts() {
        let service = service();
        service.create(&payload("Soja")).await.unwrap();
        let corn = service.create(&payload("Milho")).await.unwrap();

        let err = service
            .update(
                corn.id,
                &UpdateCropPayload {
                    name: Some("Soja".to_owned()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::CropNameTaken));
    }

    #[tokio::test]
    async fn removes_a_crop() {
        let service = service();
        let crop = service.create(&payload("Soja")).await.unwrap();

        service.remove(crop.id).await.unwrap();
        let err = service.remove(crop.id).await.unwrap_err();
        assert!(matches!(err, AppError::CropNotFound));
    }

    #[tokio::test]
    async fn paginates_the_listing() {
        let service = service();
        for name in ["Soja", "Milho", "Arroz"] {
            service.create(&payload(name)).await.unwrap();
        }

        let params = PaginationParams::new(Some(1), Some(2));
        let page = service.find_all(&params).await.unwrap();
        assert_eq!(page.meta.total_items, 3);
        assert_eq!(page.meta.total_pages, 2);
        assert_eq!(page.data.len(), 2);
        // Ordenação por nome: Arroz vem primeiro.
        assert_eq!(page.data[0].name, "Arroz");
    }
}
