// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::common;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::refresh_token,

        // --- Producers ---
        handlers::producers::create,
        handlers::producers::find_all,
        handlers::producers::find_one,
        handlers::producers::update,
        handlers::producers::remove,

        // --- Farms ---
        handlers::farms::create,
        handlers::farms::find_all,
        handlers::farms::find_one,
        handlers::farms::update,
        handlers::farms::remove,

        // --- Harvests ---
        handlers::harvests::create,
        handlers::harvests::find_all,
        handlers::harvests::find_one,
        handlers::harvests::update,
        handlers::harvests::remove,

        // --- Crops ---
        handlers::crops::create,
        handlers::crops::find_all,
        handlers::crops::find_one,
        handlers::crops::update,
        handlers::crops::remove,

        // --- Users ---
        handlers::users::create,
        handlers::users::find_all,
        handlers::users::find_one,
        handlers::users::update,
        handlers::users::remove,

        // --- Observability ---
        handlers::health::check,
        handlers::metrics::exposition,
    ),
    components(
        schemas(
            // --- Pagination ---
            common::pagination::PaginationMeta,

            // --- Producers ---
            models::producer::Producer,
            models::producer::ProducerWithFarms,
            models::producer::CreateProducerPayload,
            models::producer::UpdateProducerPayload,

            // --- Farms ---
            models::farm::Farm,
            models::farm::FarmWithRelations,
            models::farm::CreateFarmPayload,
            models::farm::UpdateFarmPayload,

            // --- Harvests ---
            models::harvest::Harvest,
            models::harvest::HarvestWithRelations,
            models::harvest::CreateHarvestPayload,
            models::harvest::UpdateHarvestPayload,

            // --- Crops ---
            models::crop::Crop,
            models::crop::CropWithHarvests,
            models::crop::CreateCropPayload,
            models::crop::UpdateCropPayload,

            // --- Auth / Users ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,
            models::auth::LoginPayload,
            models::auth::RefreshTokenPayload,
            models::auth::TokenPair,
            models::auth::AccessToken,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e renovação de tokens"),
        (name = "Producers", description = "Gestão de Produtores Rurais"),
        (name = "Farms", description = "Gestão de Fazendas"),
        (name = "Harvests", description = "Gestão de Safras"),
        (name = "Crops", description = "Gestão de Culturas"),
        (name = "Users", description = "Gestão de Usuários"),
        (name = "Health", description = "Verificação de saúde"),
        (name = "Metrics", description = "Métricas Prometheus")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
