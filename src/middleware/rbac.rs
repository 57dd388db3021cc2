// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{User, UserRole},
};

/// 1. O Trait que define quem pode passar pelo guardião
pub trait RoleGate: Send + Sync + 'static {
    fn allows(role: UserRole) -> bool;
}

/// 2. O Extractor (Guardião)
// Declarado como argumento `_guard` nos handlers que exigem papel elevado.
pub struct RequireRole<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleGate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Extrai o usuário carregado pelo auth_guard
        let user = parts
            .extensions
            .get::<User>()
            .ok_or(AppError::InvalidToken)?;

        // B. Confere o papel; papel insuficiente responde 401
        if !T::allows(user.role) {
            return Err(AppError::Unauthorized);
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS ACEITOS (TIPOS)
// ---

pub struct AdminOnly;
impl RoleGate for AdminOnly {
    fn allows(role: UserRole) -> bool {
        role == UserRole::Admin
    }
}

pub struct DirectorOnly;
impl RoleGate for DirectorOnly {
    fn allows(role: UserRole) -> bool {
        role == UserRole::CompanyDirector
    }
}

// Diretor ou admin: usado nas rotas compartilhadas de escrita (ex: categorias)
pub struct ManagerOnly;
impl RoleGate for ManagerOnly {
    fn allows(role: UserRole) -> bool {
        matches!(role, UserRole::Admin | UserRole::CompanyDirector)
    }
}

// Toda mutação de diretor é filtrada pela empresa dele; um diretor sem
// empresa não tem o que acessar.
pub fn require_company(user: &User) -> Result<Uuid, AppError> {
    user.company_id.ok_or(AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portoes_de_papel() {
        assert!(AdminOnly::allows(UserRole::Admin));
        assert!(!AdminOnly::allows(UserRole::CompanyDirector));
        assert!(!AdminOnly::allows(UserRole::User));

        assert!(DirectorOnly::allows(UserRole::CompanyDirector));
        assert!(!DirectorOnly::allows(UserRole::Admin));

        assert!(ManagerOnly::allows(UserRole::Admin));
        assert!(ManagerOnly::allows(UserRole::CompanyDirector));
        assert!(!ManagerOnly::allows(UserRole::User));
    }
}
