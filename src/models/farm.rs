use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::harvest::Harvest;
use crate::models::producer::Producer;

// Fazenda vinda do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Farm {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
    pub total_area: f64,
    pub agricultural_area: f64,
    pub vegetation_area: f64,
    pub producer_id: Uuid,
}

// Visão de leitura: fazenda com produtor e safras
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FarmWithRelations {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
    pub total_area: f64,
    pub agricultural_area: f64,
    pub vegetation_area: f64,
    pub producer: Producer,
    pub harvests: Vec<Harvest>,
}

impl FarmWithRelations {
    pub fn new(farm: Farm, producer: Producer, harvests: Vec<Harvest>) -> Self {
        Self {
            id: farm.id,
            name: farm.name,
            city: farm.city,
            state: farm.state,
            total_area: farm.total_area,
            agricultural_area: farm.agricultural_area,
            vegetation_area: farm.vegetation_area,
            producer,
            harvests,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFarmPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Fazenda Primavera")]
    pub name: String,

    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    #[schema(example = "Uberlândia")]
    pub city: String,

    #[validate(length(min = 1, message = "O estado é obrigatório."))]
    #[schema(example = "MG")]
    pub state: String,

    #[validate(range(min = 0.0, message = "O valor não pode ser negativo."))]
    #[schema(example = 100.0)]
    pub total_area: f64,

    #[validate(range(min = 0.0, message = "O valor não pode ser negativo."))]
    #[schema(example = 60.0)]
    pub agricultural_area: f64,

    #[validate(range(min = 0.0, message = "O valor não pode ser negativo."))]
    #[schema(example = 30.0)]
    pub vegetation_area: f64,

    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub producer_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFarmPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    pub city: Option<String>,

    #[validate(length(min = 1, message = "O estado é obrigatório."))]
    pub state: Option<String>,

    #[validate(range(min = 0.0, message = "O valor não pode ser negativo."))]
    pub total_area: Option<f64>,

    #[validate(range(min = 0.0, message = "O valor não pode ser negativo."))]
    pub agricultural_area: Option<f64>,

    #[validate(range(min = 0.0, message = "O valor não pode ser negativo."))]
    pub vegetation_area: Option<f64>,

    pub producer_id: Option<Uuid>,
}
