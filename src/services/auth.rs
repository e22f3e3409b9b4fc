// src/services/auth.rs

use std::sync::Arc;

use bcrypt::verify;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{AccessToken, Claims, TokenPair, User, UserRole},
};

// Vida curta para o access token, longa para o refresh token.
const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;
const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt_secret: String,
    jwt_refresh_secret: String,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        jwt_secret: String,
        jwt_refresh_secret: String,
    ) -> Self {
        Self {
            user_repo,
            jwt_secret,
            jwt_refresh_secret,
        }
    }

    // Retorna None (e não erro) quando o e-mail não existe ou a senha não
    // confere; o handler converte None em 401.
    pub async fn validate_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            tracing::warn!("Usuário com e-mail {} não encontrado", email);
            return Ok(None);
        };

        let password = password.to_owned();
        let password_hash = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password, &password_hash)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            tracing::warn!("Senha inválida para o e-mail {}", email);
            return Ok(None);
        }

        Ok(Some(user))
    }

    pub fn login(&self, user: &User) -> Result<TokenPair, AppError> {
        let access_token = self.sign_token(
            user.id,
            user.role,
            &self.jwt_secret,
            Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
        )?;
        let refresh_token = self.sign_token(
            user.id,
            user.role,
            &self.jwt_refresh_secret,
            Duration::days(REFRESH_TOKEN_TTL_DAYS),
        )?;

        tracing::info!("Login realizado com sucesso para o usuário {}", user.email);
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    pub fn refresh_token(&self, refresh_token: &str) -> Result<AccessToken, AppError> {
        let claims = decode_claims(refresh_token, &self.jwt_refresh_secret)
            .map_err(|_| AppError::InvalidRefreshToken)?;

        let access_token = self.sign_token(
            claims.sub,
            claims.role,
            &self.jwt_secret,
            Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
        )?;

        tracing::info!("Access token renovado para o usuário ID {}", claims.sub);
        Ok(AccessToken { access_token })
    }

    // Usado pelo middleware de autenticação nas rotas protegidas.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        decode_claims(token, &self.jwt_secret).map_err(|_| AppError::InvalidToken)
    }

    fn sign_token(
        &self,
        sub: Uuid,
        role: UserRole,
        secret: &str,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub,
            role,
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )?)
    }
}

fn decode_claims(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::{MemoryStore, MemoryUserRepository};
    use crate::models::auth::CreateUserPayload;
    use crate::services::user_service::UserService;

    async fn setup() -> (AuthService, User) {
        let store = MemoryStore::shared();
        let user_service = UserService::new(Arc::new(MemoryUserRepository(store.clone())));
        let user = user_service
            .create(&CreateUserPayload {
                name: "Manuel Barros".to_owned(),
                email: "manuel@exemplo.com".to_owned(),
                password: "SenhaExemplo123*".to_owned(),
                role: UserRole::Gestor,
            })
            .await
            .unwrap();

        let auth = AuthService::new(
            Arc::new(MemoryUserRepository(store)),
            "segredo-de-teste".to_owned(),
            "outro-segredo-de-teste".to_owned(),
        );
        (auth, user)
    }

    #[tokio::test]
    async fn validates_correct_credentials() {
        let (auth, user) = setup().await;
        let found = auth
            .validate_user("manuel@exemplo.com", "SenhaExemplo123*")
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn returns_none_for_unknown_email() {
        let (auth, _) = setup().await;
        let found = auth
            .validate_user("ninguem@exemplo.com", "SenhaExemplo123*")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn returns_none_for_wrong_password() {
        let (auth, _) = setup().await;
        let found = auth
            .validate_user("manuel@exemplo.com", "senha-errada")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn login_issues_tokens_with_subject_and_role() {
        let (auth, user) = setup().await;
        let pair = auth.login(&user).unwrap();

        let access = auth.validate_access_token(&pair.access_token).unwrap();
        assert_eq!(access.sub, user.id);
        assert_eq!(access.role, UserRole::Gestor);

        // O refresh token é assinado com o outro segredo.
        assert!(auth.validate_access_token(&pair.refresh_token).is_err());
    }

    #[tokio::test]
    async fn refresh_issues_access_token_with_same_claims() {
        let (auth, user) = setup().await;
        let pair = auth.login(&user).unwrap();

        let renewed = auth.refresh_token(&pair.refresh_token).unwrap();
        let claims = auth.validate_access_token(&renewed.access_token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, user.role);
    }

    #[tokio::test]
    async fn refresh_rejects_access_token_and_garbage() {
        let (auth, user) = setup().await;
        let pair = auth.login(&user).unwrap();

        // Access token não serve como refresh token.
        let err = auth.refresh_token(&pair.access_token).unwrap_err();
        assert!(matches!(err, AppError::InvalidRefreshToken));

        let err = auth.refresh_token("nem-um-jwt").unwrap_err();
        assert!(matches!(err, AppError::InvalidRefreshToken));
    }
}
