// src/main.rs

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod metrics;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;
use crate::middleware::metrics::track_metrics;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/refresh-token", post(handlers::auth::refresh_token));

    let producer_routes = Router::new()
        .route(
            "/",
            post(handlers::producers::create).get(handlers::producers::find_all),
        )
        .route(
            "/{id}",
            get(handlers::producers::find_one)
                .put(handlers::producers::update)
                .delete(handlers::producers::remove),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let farm_routes = Router::new()
        .route(
            "/",
            post(handlers::farms::create).get(handlers::farms::find_all),
        )
        .route(
            "/{id}",
            get(handlers::farms::find_one)
                .put(handlers::farms::update)
                .delete(handlers::farms::remove),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let harvest_routes = Router::new()
        .route(
            "/",
            post(handlers::harvests::create).get(handlers::harvests::find_all),
        )
        .route(
            "/{id}",
            get(handlers::harvests::find_one)
                .put(handlers::harvests::update)
                .delete(handlers::harvests::remove),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let crop_routes = Router::new()
        .route(
            "/",
            post(handlers::crops::create).get(handlers::crops::find_all),
        )
        .route(
            "/{id}",
            get(handlers::crops::find_one)
                .put(handlers::crops::update)
                .delete(handlers::crops::remove),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // POST /users é público (auto-registro); o restante exige token.
    let user_routes = Router::new()
        .route("/", post(handlers::users::create))
        .merge(
            Router::new()
                .route("/", get(handlers::users::find_all))
                .route(
                    "/{id}",
                    get(handlers::users::find_one)
                        .put(handlers::users::update)
                        .delete(handlers::users::remove),
                )
                .layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    auth_guard,
                )),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/metrics", get(handlers::metrics::exposition))
        .nest("/auth", auth_routes)
        .nest("/producers", producer_routes)
        .nest("/farms", farm_routes)
        .nest("/harvests", harvest_routes)
        .nest("/crops", crop_routes)
        .nest("/users", user_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            track_metrics,
        ))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
