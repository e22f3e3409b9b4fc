use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::crop::Crop;
use crate::models::farm::Farm;

// Safra vinda do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Harvest {
    pub id: Uuid,
    pub name: String,
    pub farm_id: Uuid,
}

// Visão de leitura: safra com fazenda e culturas
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HarvestWithRelations {
    pub id: Uuid,
    pub name: String,
    pub farm: Farm,
    pub crops: Vec<Crop>,
}

impl HarvestWithRelations {
    pub fn new(harvest: Harvest, farm: Farm, crops: Vec<Crop>) -> Self {
        Self {
            id: harvest.id,
            name: harvest.name,
            farm,
            crops,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHarvestPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Safra 2024")]
    pub name: String,

    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub farm_id: Uuid,

    // Associação opcional com culturas já cadastradas
    #[serde(default)]
    pub crop_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHarvestPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    pub farm_id: Option<Uuid>,

    // `Some` substitui o conjunto de culturas; `None` mantém o atual.
    pub crop_ids: Option<Vec<Uuid>>,
}
