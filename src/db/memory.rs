// Implementações em memória dos repositórios, usadas nos testes de
// serviço. Reproduzem o comportamento do schema: chaves únicas viram os
// mesmos erros de domínio e os deletes cascateiam como no banco.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CropRepository, FarmRepository, HarvestRepository, ProducerRepository, UserRepository},
    models::{
        auth::{User, UserRole},
        crop::{Crop, CropWithHarvests},
        farm::{Farm, FarmWithRelations},
        harvest::{Harvest, HarvestWithRelations},
        producer::{Producer, ProducerWithFarms},
    },
};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    producers: Vec<Producer>,
    farms: Vec<Farm>,
    harvests: Vec<Harvest>,
    crops: Vec<Crop>,
    harvest_crops: Vec<(Uuid, Uuid)>,
    users: Vec<User>,
}

impl MemoryStore {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

fn page<T: Clone>(items: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect()
}

pub struct MemoryProducerRepository(pub Arc<MemoryStore>);

#[async_trait]
impl ProducerRepository for MemoryProducerRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Producer>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.producers.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_document(&self, document: &str) -> Result<Option<Producer>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner
            .producers
            .iter()
            .find(|p| p.document == document)
            .cloned())
    }

    async fn find_with_farms(&self, id: Uuid) -> Result<Option<ProducerWithFarms>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        let Some(producer) = inner.producers.iter().find(|p| p.id == id).cloned() else {
            return Ok(None);
        };
        let farms = inner
            .farms
            .iter()
            .filter(|f| f.producer_id == id)
            .cloned()
            .collect();
        Ok(Some(ProducerWithFarms::new(producer, farms)))
    }

    async fn list_with_farms(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProducerWithFarms>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        let mut producers = inner.producers.clone();
        producers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(producers, limit, offset)
            .into_iter()
            .map(|producer| {
                let farms = inner
                    .farms
                    .iter()
                    .filter(|f| f.producer_id == producer.id)
                    .cloned()
                    .collect();
                ProducerWithFarms::new(producer, farms)
            })
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.producers.len() as i64)
    }

    async fn create(&self, name: &str, document: &str) -> Result<Producer, AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        if inner.producers.iter().any(|p| p.document == document) {
            return Err(AppError::DocumentAlreadyExists);
        }
        let producer = Producer {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            document: document.to_owned(),
        };
        inner.producers.push(producer.clone());
        Ok(producer)
    }

    async fn update(&self, producer: &Producer) -> Result<Producer, AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        if inner
            .producers
            .iter()
            .any(|p| p.document == producer.document && p.id != producer.id)
        {
            return Err(AppError::DocumentAlreadyExists);
        }
        let stored = inner
            .producers
            .iter_mut()
            .find(|p| p.id == producer.id)
            .ok_or(sqlx::Error::RowNotFound)?;
        *stored = producer.clone();
        Ok(producer.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        inner.producers.retain(|p| p.id != id);

        let farm_ids: Vec<Uuid> = inner
            .farms
            .iter()
            .filter(|f| f.producer_id == id)
            .map(|f| f.id)
            .collect();
        inner.farms.retain(|f| f.producer_id != id);

        let harvest_ids: Vec<Uuid> = inner
            .harvests
            .iter()
            .filter(|h| farm_ids.contains(&h.farm_id))
            .map(|h| h.id)
            .collect();
        inner.harvests.retain(|h| !farm_ids.contains(&h.farm_id));
        inner
            .harvest_crops
            .retain(|(harvest_id, _)| !harvest_ids.contains(harvest_id));
        Ok(())
    }
}

pub struct MemoryFarmRepository(pub Arc<MemoryStore>);

#[async_trait]
impl FarmRepository for MemoryFarmRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Farm>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.farms.iter().find(|f| f.id == id).cloned())
    }

    async fn find_with_relations(&self, id: Uuid) -> Result<Option<FarmWithRelations>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        let Some(farm) = inner.farms.iter().find(|f| f.id == id).cloned() else {
            return Ok(None);
        };
        let producer = inner
            .producers
            .iter()
            .find(|p| p.id == farm.producer_id)
            .cloned()
            .ok_or(sqlx::Error::RowNotFound)?;
        let harvests = inner
            .harvests
            .iter()
            .filter(|h| h.farm_id == id)
            .cloned()
            .collect();
        Ok(Some(FarmWithRelations::new(farm, producer, harvests)))
    }

    async fn list_with_relations(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FarmWithRelations>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        let mut farms = inner.farms.clone();
        farms.sort_by(|a, b| a.name.cmp(&b.name));
        page(farms, limit, offset)
            .into_iter()
            .map(|farm| {
                let producer = inner
                    .producers
                    .iter()
                    .find(|p| p.id == farm.producer_id)
                    .cloned()
                    .ok_or_else(|| AppError::from(sqlx::Error::RowNotFound))?;
                let harvests = inner
                    .harvests
                    .iter()
                    .filter(|h| h.farm_id == farm.id)
                    .cloned()
                    .collect();
                Ok(FarmWithRelations::new(farm, producer, harvests))
            })
            .collect()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.farms.len() as i64)
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
        let mut inner = self.0.inner.lock().unwrap();
        let farm = Farm {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            city: city.to_owned(),
            state: state.to_owned(),
            total_area,
            agricultural_area,
            vegetation_area,
            producer_id,
        };
        inner.farms.push(farm.clone());
        Ok(farm)
    }

    async fn update(&self, farm: &Farm) -> Result<Farm, AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        let stored = inner
            .farms
            .iter_mut()
            .find(|f| f.id == farm.id)
            .ok_or(sqlx::Error::RowNotFound)?;
        *stored = farm.clone();
        Ok(farm.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        inner.farms.retain(|f| f.id != id);

        let harvest_ids: Vec<Uuid> = inner
            .harvests
            .iter()
            .filter(|h| h.farm_id == id)
            .map(|h| h.id)
            .collect();
        inner.harvests.retain(|h| h.farm_id != id);
        inner
            .harvest_crops
            .retain(|(harvest_id, _)| !harvest_ids.contains(harvest_id));
        Ok(())
    }
}

pub struct MemoryHarvestRepository(pub Arc<MemoryStore>);

#[async_trait]
impl HarvestRepository for MemoryHarvestRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Harvest>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.harvests.iter().find(|h| h.id == id).cloned())
    }

    async fn find_by_name_in_farm(
        &self,
        name: &str,
        farm_id: Uuid,
    ) -> Result<Option<Harvest>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner
            .harvests
            .iter()
            .find(|h| h.farm_id == farm_id && h.name == name)
            .cloned())
    }

    async fn find_with_relations(
        &self,
        id: Uuid,
    ) -> Result<Option<HarvestWithRelations>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        let Some(harvest) = inner.harvests.iter().find(|h| h.id == id).cloned() else {
            return Ok(None);
        };
        let farm = inner
            .farms
            .iter()
            .find(|f| f.id == harvest.farm_id)
            .cloned()
            .ok_or(sqlx::Error::RowNotFound)?;
        let crops = inner
            .harvest_crops
            .iter()
            .filter(|(harvest_id, _)| *harvest_id == id)
            .filter_map(|(_, crop_id)| inner.crops.iter().find(|c| c.id == *crop_id).cloned())
            .collect();
        Ok(Some(HarvestWithRelations::new(harvest, farm, crops)))
    }

    async fn list_with_relations(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HarvestWithRelations>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        let mut harvests = inner.harvests.clone();
        harvests.sort_by(|a, b| a.name.cmp(&b.name));
        page(harvests, limit, offset)
            .into_iter()
            .map(|harvest| {
                let farm = inner
                    .farms
                    .iter()
                    .find(|f| f.id == harvest.farm_id)
                    .cloned()
                    .ok_or_else(|| AppError::from(sqlx::Error::RowNotFound))?;
                let crops = inner
                    .harvest_crops
                    .iter()
                    .filter(|(harvest_id, _)| *harvest_id == harvest.id)
                    .filter_map(|(_, crop_id)| {
                        inner.crops.iter().find(|c| c.id == *crop_id).cloned()
                    })
                    .collect();
                Ok(HarvestWithRelations::new(harvest, farm, crops))
            })
            .collect()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.harvests.len() as i64)
    }

    async fn create(
        &self,
        name: &str,
        farm_id: Uuid,
        crop_ids: &[Uuid],
    ) -> Result<Harvest, AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        if inner
            .harvests
            .iter()
            .any(|h| h.farm_id == farm_id && h.name == name)
        {
            return Err(AppError::HarvestNameTaken);
        }
        let harvest = Harvest {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            farm_id,
        };
        inner.harvests.push(harvest.clone());
        for crop_id in crop_ids {
            inner.harvest_crops.push((harvest.id, *crop_id));
        }
        Ok(harvest)
    }

    async fn update(&self, harvest: &Harvest) -> Result<Harvest, AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        if inner
            .harvests
            .iter()
            .any(|h| h.farm_id == harvest.farm_id && h.name == harvest.name && h.id != harvest.id)
        {
            return Err(AppError::HarvestNameTaken);
        }
        let stored = inner
            .harvests
            .iter_mut()
            .find(|h| h.id == harvest.id)
            .ok_or(sqlx::Error::RowNotFound)?;
        *stored = harvest.clone();
        Ok(harvest.clone())
    }

    async fn set_crops(&self, harvest_id: Uuid, crop_ids: &[Uuid]) -> Result<(), AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        inner.harvest_crops.retain(|(id, _)| *id != harvest_id);
        for crop_id in crop_ids {
            inner.harvest_crops.push((harvest_id, *crop_id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        inner.harvests.retain(|h| h.id != id);
        inner.harvest_crops.retain(|(harvest_id, _)| *harvest_id != id);
        Ok(())
    }
}

pub struct MemoryCropRepository(pub Arc<MemoryStore>);

#[async_trait]
impl CropRepository for MemoryCropRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Crop>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.crops.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Crop>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.crops.iter().find(|c| c.name == name).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Crop>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner
            .crops
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn find_with_harvests(&self, id: Uuid) -> Result<Option<CropWithHarvests>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        let Some(crop) = inner.crops.iter().find(|c| c.id == id).cloned() else {
            return Ok(None);
        };
        let harvests = inner
            .harvest_crops
            .iter()
            .filter(|(_, crop_id)| *crop_id == id)
            .filter_map(|(harvest_id, _)| {
                inner.harvests.iter().find(|h| h.id == *harvest_id).cloned()
            })
            .collect();
        Ok(Some(CropWithHarvests::new(crop, harvests)))
    }

    async fn list_with_harvests(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CropWithHarvests>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        let mut crops = inner.crops.clone();
        crops.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(crops, limit, offset)
            .into_iter()
            .map(|crop| {
                let harvests = inner
                    .harvest_crops
                    .iter()
                    .filter(|(_, crop_id)| *crop_id == crop.id)
                    .filter_map(|(harvest_id, _)| {
                        inner.harvests.iter().find(|h| h.id == *harvest_id).cloned()
                    })
                    .collect();
                CropWithHarvests::new(crop, harvests)
            })
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.crops.len() as i64)
    }

    async fn create(&self, name: &str) -> Result<Crop, AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        if inner.crops.iter().any(|c| c.name == name) {
            return Err(AppError::CropNameTaken);
        }
        let crop = Crop {
            id: Uuid::new_v4(),
            name: name.to_owned(),
        };
        inner.crops.push(crop.clone());
        Ok(crop)
    }

    async fn update(&self, crop: &Crop) -> Result<Crop, AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        if inner
            .crops
            .iter()
            .any(|c| c.name == crop.name && c.id != crop.id)
        {
            return Err(AppError::CropNameTaken);
        }
        let stored = inner
            .crops
            .iter_mut()
            .find(|c| c.id == crop.id)
            .ok_or(sqlx::Error::RowNotFound)?;
        *stored = crop.clone();
        Ok(crop.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        inner.crops.retain(|c| c.id != id);
        inner.harvest_crops.retain(|(_, crop_id)| *crop_id != id);
        Ok(())
    }
}

pub struct MemoryUserRepository(pub Arc<MemoryStore>);

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, AppError> {
        let inner = self.0.inner.lock().unwrap();
        let mut users = inner.users.clone();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(users, limit, offset))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.users.len() as i64)
    }

    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.email == email) {
            return Err(AppError::EmailAlreadyExists);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            role,
            created_at: now,
            updated_at: now,
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        if inner
            .users
            .iter()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(AppError::EmailAlreadyExists);
        }
        let stored = inner
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(sqlx::Error::RowNotFound)?;
        let mut updated = user.clone();
        updated.updated_at = Utc::now();
        *stored = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut inner = self.0.inner.lock().unwrap();
        inner.users.retain(|u| u.id != id);
        Ok(())
    }
}
