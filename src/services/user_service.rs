// src/services/user_service.rs

use std::sync::Arc;

use bcrypt::hash;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{Paginated, PaginationParams},
    },
    db::UserRepository,
    models::auth::{CreateUserPayload, UpdateUserPayload, User},
};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

// O custo padrão do bcrypt deixa os testes lentos demais.
#[cfg(not(test))]
const BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
const BCRYPT_COST: u32 = 4;

// Executa o hashing num thread separado para não bloquear o runtime.
async fn hash_password(password: String) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || hash(&password, BCRYPT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, payload: &CreateUserPayload) -> Result<User, AppError> {
        tracing::info!("Tentativa de criar usuário com e-mail: {}", payload.email);

        if self.repo.find_by_email(&payload.email).await?.is_some() {
            tracing::warn!(
                "Tentativa de cadastro com e-mail já existente: {}",
                payload.email
            );
            return Err(AppError::EmailAlreadyExists);
        }

        let password_hash = hash_password(payload.password.clone()).await?;
        let user = self
            .repo
            .create(&payload.name, &payload.email, &password_hash, payload.role)
            .await?;
        tracing::info!("Usuário criado com sucesso: ID {}", user.id);
        Ok(user)
    }

    pub async fn find_all(&self, params: &PaginationParams) -> Result<Paginated<User>, AppError> {
        let total = self.repo.count().await?;
        let data = self.repo.list(params.limit(), params.offset()).await?;
        Ok(Paginated::new(data, params, total))
    }

    pub async fn find_one(&self, id: Uuid) -> Result<User, AppError> {
        self.repo.find_by_id(id).await?.ok_or(AppError::UserNotFound)
    }

    pub async fn update(&self, id: Uuid, payload: &UpdateUserPayload) -> Result<User, AppError> {
        let mut user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if let Some(name) = &payload.name {
            user.name = name.clone();
        }
        if let Some(email) = &payload.email {
            user.email = email.clone();
        }
        if let Some(role) = payload.role {
            user.role = role;
        }
        if let Some(password) = &payload.password {
            user.password_hash = hash_password(password.clone()).await?;
        }

        let saved = self.repo.update(&user).await?;
        tracing::info!("Usuário atualizado com sucesso: ID {}", saved.id);
        Ok(saved)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        self.repo.delete(id).await?;
        tracing::info!("Usuário removido com sucesso: ID {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::{MemoryStore, MemoryUserRepository};
    use crate::models::auth::UserRole;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryUserRepository(MemoryStore::shared())))
    }

    fn payload(email: &str) -> CreateUserPayload {
        CreateUserPayload {
            name: "Manuel Barros".to_owned(),
            email: email.to_owned(),
            password: "SenhaExemplo123*".to_owned(),
            role: UserRole::Funcionario,
        }
    }

    #[tokio::test]
    async fn creates_a_user_with_hashed_password() {
        let service = service();
        let user = service.create(&payload("manuel@exemplo.com")).await.unwrap();

        assert_ne!(user.password_hash, "SenhaExemplo123*");
        assert!(bcrypt::verify("SenhaExemplo123*", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let service = service();
        service.create(&payload("manuel@exemplo.com")).await.unwrap();

        let err = service
            .create(&payload("manuel@exemplo.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyExists));
    }

    #[tokio::test]
    async fn find_one_returns_not_found_for_unknown_id() {
        let service = service();
        let err = service.find_one(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[tokio::test]
    async fn update_rehashes_password_when_present() {
        let service = service();
        let user = service.create(&payload("manuel@exemplo.com")).await.unwrap();

        let updated = service
            .update(
                user.id,
                &UpdateUserPayload {
                    name: None,
                    email: None,
                    password: Some("OutraSenha456&".to_owned()),
                    role: Some(UserRole::Gestor),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.role, UserRole::Gestor);
        assert!(bcrypt::verify("OutraSenha456&", &updated.password_hash).unwrap());
    }

    #[tokio::test]
    async fn update_keeps_password_when_absent() {
        let service = service();
        let user = service.create(&payload("manuel@exemplo.com")).await.unwrap();

        let updated = service
            .update(
                user.id,
                &UpdateUserPayload {
                    name: Some("Manuel B.".to_owned()),
                    email: None,
                    password: None,
                    role: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Manuel B.");
        assert_eq!(updated.password_hash, user.password_hash);
    }

    #[tokio::test]
    async fn removes_a_user() {
        let service = service();
        let user = service.create(&payload("manuel@exemplo.com")).await.unwrap();

        service.remove(user.id).await.unwrap();
        let err = service.remove(user.id).await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }
}
