use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::harvest::Harvest;

// Cultura vinda do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    pub id: Uuid,
    pub name: String,
}

// Visão de leitura: cultura com as safras em que aparece
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropWithHarvests {
    pub id: Uuid,
    pub name: String,
    pub harvests: Vec<Harvest>,
}

impl CropWithHarvests {
    pub fn new(crop: Crop, harvests: Vec<Harvest>) -> Self {
        Self {
            id: crop.id,
            name: crop.name,
            harvests,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCropPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Soja")]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCropPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,
}
