use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Papéis de acesso dos usuários. O valor serializado é o mesmo gravado
// no enum `user_role` do banco.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role")]
pub enum UserRole {
    #[serde(rename = "admin")]
    #[sqlx(rename = "admin")]
    Admin,

    #[serde(rename = "gestor")]
    #[sqlx(rename = "gestor")]
    Gestor,

    #[serde(rename = "funcionário")]
    #[sqlx(rename = "funcionário")]
    Funcionario,

    #[serde(rename = "produtor")]
    #[sqlx(rename = "produtor")]
    Produtor,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para cadastro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Manuel Barros")]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "manuel@exemplo.com")]
    pub email: String,

    #[validate(
        length(min = 6, max = 20, message = "A senha deve ter entre 6 e 20 caracteres."),
        custom(function = "validate_password_strength")
    )]
    #[schema(example = "SenhaExemplo123*")]
    pub password: String,

    #[schema(example = "funcionário")]
    pub role: UserRole,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    #[validate(
        length(min = 6, max = 20, message = "A senha deve ter entre 6 e 20 caracteres."),
        custom(function = "validate_password_strength")
    )]
    pub password: Option<String>,

    pub role: Option<UserRole>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "manuel@exemplo.com")]
    pub email: String,

    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    #[schema(example = "SenhaExemplo123*")]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenPayload {
    #[validate(length(min = 1, message = "O refresh token é obrigatório."))]
    pub refresh_token: String,
}

// Resposta do login: par de tokens
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

// Resposta da renovação: só o access token
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
}

// Estrutura de dados ("claims") dentro dos JWTs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,      // Subject (ID do usuário)
    pub role: UserRole, // Papel usado na autorização por rota
    pub exp: usize,     // Expiration time (quando o token expira)
    pub iat: usize,     // Issued At (quando o token foi criado)
}

// A senha precisa de maiúscula, minúscula, número e caractere especial.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| "@$!%*?&".contains(c));

    if has_upper && has_lower && has_digit && has_special {
        return Ok(());
    }

    let mut err = ValidationError::new("password_strength");
    err.message = Some(
        "A senha deve conter letra maiúscula, minúscula, número e caractere especial.".into(),
    );
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_strong_password() {
        assert!(validate_password_strength("SenhaExemplo123*").is_ok());
    }

    #[test]
    fn rejects_password_missing_a_class() {
        assert!(validate_password_strength("senhafraca123*").is_err());
        assert!(validate_password_strength("SENHAFORTE123*").is_err());
        assert!(validate_password_strength("SenhaSemNumero*").is_err());
        assert!(validate_password_strength("SenhaSemEspecial123").is_err());
    }
}
