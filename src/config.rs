// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    db::{
        PgCropRepository, PgFarmRepository, PgHarvestRepository, PgProducerRepository,
        PgUserRepository,
    },
    metrics::AppMetrics,
    services::{
        auth::AuthService, crop_service::CropService, farm_service::FarmService,
        harvest_service::HarvestService, producer_service::ProducerService,
        user_service::UserService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub producer_service: ProducerService,
    pub farm_service: FarmService,
    pub harvest_service: HarvestService,
    pub crop_service: CropService,
    pub user_service: UserService,
    pub auth_service: AuthService,
    pub metrics: AppMetrics,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let jwt_refresh_secret =
            env::var("JWT_REFRESH_SECRET").expect("JWT_REFRESH_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let producer_repo = Arc::new(PgProducerRepository::new(db_pool.clone()));
        let farm_repo = Arc::new(PgFarmRepository::new(db_pool.clone()));
        let harvest_repo = Arc::new(PgHarvestRepository::new(db_pool.clone()));
        let crop_repo = Arc::new(PgCropRepository::new(db_pool.clone()));
        let user_repo = Arc::new(PgUserRepository::new(db_pool.clone()));

        let producer_service = ProducerService::new(producer_repo.clone());
        let farm_service = FarmService::new(farm_repo.clone(), producer_repo);
        let harvest_service = HarvestService::new(harvest_repo, farm_repo, crop_repo.clone());
        let crop_service = CropService::new(crop_repo);
        let user_service = UserService::new(user_repo.clone());
        let auth_service = AuthService::new(user_repo, jwt_secret, jwt_refresh_secret);

        let metrics = AppMetrics::new()?;

        Ok(Self {
            db_pool,
            producer_service,
            farm_service,
            harvest_service,
            crop_service,
            user_service,
            auth_service,
            metrics,
        })
    }
}
