// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, UserRepository},
    models::auth::{Claims, User, UserRole},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    company_repo: CompanyRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        company_repo: CompanyRepository,
        jwt_secret: String,
    ) -> Self {
        Self { user_repo, company_repo, jwt_secret }
    }

    // Registro público: sempre cria um usuário comum dentro de uma empresa existente.
    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        company_id: Uuid,
    ) -> Result<String, AppError> {
        self.company_repo
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Empresa não encontrada.".into()))?;

        let hashed_password = hash_password(password).await?;

        let new_user = self
            .user_repo
            .create_user(name, email, &hashed_password, UserRole::User, Some(company_id))
            .await?;

        self.create_token(new_user.id)
    }

    // Criação por admin/diretor: o papel e a empresa já vêm resolvidos pelo handler.
    pub async fn create_user_with_role(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
        company_id: Option<Uuid>,
    ) -> Result<User, AppError> {
        if let Some(company_id) = company_id {
            self.company_repo
                .find_by_id(company_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Empresa não encontrada.".into()))?;
        }

        let hashed_password = hash_password(password).await?;

        self.user_repo
            .create_user(name, email, &hashed_password, role, company_id)
            .await
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    // Decodifica o token e carrega o usuário correspondente do banco.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = self.decode_claims(token)?;

        self.user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    // Apenas a parte criptográfica da validação (sem tocar no banco).
    pub fn decode_claims(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    pub fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

// O hashing é pesado; roda fora do executor async.
async fn hash_password(password: &str) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn service(secret: &str) -> AuthService {
        // connect_lazy não abre conexão; os testes abaixo não tocam no banco.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/ignorado")
            .unwrap();
        AuthService::new(
            UserRepository::new(pool.clone()),
            CompanyRepository::new(pool),
            secret.to_string(),
        )
    }

    #[tokio::test]
    async fn token_roda_ida_e_volta() {
        let svc = service("segredo-de-teste");
        let user_id = Uuid::new_v4();

        let token = svc.create_token(user_id).unwrap();
        let claims = svc.decode_claims(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn token_com_segredo_errado_e_rejeitado() {
        let svc = service("segredo-a");
        let outro = service("segredo-b");

        let token = svc.create_token(Uuid::new_v4()).unwrap();
        let err = outro.decode_claims(&token).unwrap_err();

        assert!(matches!(err, AppError::InvalidToken));
    }

    #[tokio::test]
    async fn lixo_nao_passa_pela_decodificacao() {
        let svc = service("segredo-de-teste");
        assert!(matches!(
            svc.decode_claims("nao-e-um-jwt").unwrap_err(),
            AppError::InvalidToken
        ));
    }
}
