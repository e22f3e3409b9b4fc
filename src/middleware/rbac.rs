// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError, middleware::auth::AuthenticatedUser, models::auth::UserRole,
};

/// 1. O trait que define um conjunto de papéis autorizados
pub trait RoleSet: Send + Sync + 'static {
    fn allowed() -> &'static [UserRole];
}

/// 2. O Extractor (Guardião): exige que o papel do token esteja no conjunto
pub struct RequireRole<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleSet,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Extrai o usuário colocado nos extensions pelo auth_guard
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or(AppError::InvalidToken)?;

        // B. Verifica o papel
        if !T::allowed().contains(&user.role) {
            return Err(AppError::Forbidden);
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS CONJUNTOS DE PAPÉIS
// ---

pub struct AdminOnly;
impl RoleSet for AdminOnly {
    fn allowed() -> &'static [UserRole] {
        &[UserRole::Admin]
    }
}

pub struct AdminGestor;
impl RoleSet for AdminGestor {
    fn allowed() -> &'static [UserRole] {
        &[UserRole::Admin, UserRole::Gestor]
    }
}

pub struct Staff;
impl RoleSet for Staff {
    fn allowed() -> &'static [UserRole] {
        &[UserRole::Admin, UserRole::Gestor, UserRole::Funcionario]
    }
}
