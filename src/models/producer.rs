use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::document::validate_document;
use crate::models::farm::Farm;

// Produtor rural vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Producer {
    pub id: Uuid,
    pub name: String,
    pub document: String,
}

// Visão de leitura: produtor com as fazendas associadas
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProducerWithFarms {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub farms: Vec<Farm>,
}

impl ProducerWithFarms {
    pub fn new(producer: Producer, farms: Vec<Farm>) -> Self {
        Self {
            id: producer.id,
            name: producer.name,
            document: producer.document,
            farms,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProducerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "João da Silva")]
    pub name: String,

    #[validate(custom(function = "validate_document"))]
    #[schema(example = "52998224725")]
    pub document: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProducerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_document"))]
    pub document: Option<String>,
}
