use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Erros de domínio da aplicação, com `thiserror` para melhor ergonomia.
// Cada variante carrega a mensagem exibida ao cliente; o mapeamento para
// status HTTP fica no `IntoResponse`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Produtor não encontrado.")]
    ProducerNotFound,

    #[error("Já existe um produtor com esse documento (CPF ou CNPJ).")]
    DocumentAlreadyExists,

    #[error("Fazenda não encontrada.")]
    FarmNotFound,

    #[error("A soma das áreas agricultável e de vegetação não pode ser maior que a área total.")]
    AreaSumExceedsTotal,

    #[error("Safra não encontrada.")]
    HarvestNotFound,

    #[error("Já existe uma safra com esse nome para esta fazenda.")]
    HarvestNameTaken,

    #[error("Cultura não encontrada.")]
    CropNotFound,

    #[error("Já existe uma cultura com esse nome.")]
    CropNameTaken,

    #[error("Alguma(s) cultura(s) informada(s) não foram encontradas.")]
    CropsNotFound,

    #[error("Usuário não encontrado.")]
    UserNotFound,

    #[error("Já existe um usuário com este e-mail.")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas.")]
    InvalidCredentials,

    #[error("Token de autenticação inválido ou ausente.")]
    InvalidToken,

    #[error("Refresh token inválido ou expirado.")]
    InvalidRefreshToken,

    #[error("Você não tem permissão para realizar esta ação.")]
    Forbidden,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::ProducerNotFound
            | AppError::FarmNotFound
            | AppError::HarvestNotFound
            | AppError::CropNotFound
            | AppError::UserNotFound => StatusCode::NOT_FOUND,

            AppError::DocumentAlreadyExists
            | AppError::HarvestNameTaken
            | AppError::CropNameTaken
            | AppError::EmailAlreadyExists => StatusCode::CONFLICT,

            AppError::AreaSumExceedsTotal | AppError::CropsNotFound => StatusCode::BAD_REQUEST,

            AppError::InvalidCredentials
            | AppError::InvalidToken
            | AppError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,

            AppError::Forbidden => StatusCode::FORBIDDEN,

            // Todos os outros erros (DatabaseError, InternalServerError, ...) viram 500.
            // O detalhe fica no log; o cliente recebe uma mensagem genérica.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                let body = Json(json!({ "error": "Ocorreu um erro inesperado." }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
