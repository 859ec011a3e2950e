use std::sync::Arc;

use crate::database::repository::Repository;
use crate::dto::auth_dto::{LoginPayload, LoginResponse, RegisterUserPayload, RegisterUserResponse};
use crate::error::{Error, Result};
use crate::models::user::UserSummary;
use crate::utils::blocking::spawn_blocking_with_tracing;
use crate::utils::crypto;
use validator::Validate;

pub const INVALID_CREDENTIALS: &str = "Credenciales incorrectas";

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn Repository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    pub async fn register(&self, payload: RegisterUserPayload) -> Result<RegisterUserResponse> {
        payload.validate()?;
        let password = payload.contrasena.clone().unwrap_or_default();
        let password_hash =
            spawn_blocking_with_tracing(move || crypto::hash_password(&password)).await??;
        let user = payload.into_new_user(password_hash);

        let id = self.repository.insert_user(&user).await?;
        tracing::info!(user_id = id, tipo = ?user.tipo, "Registered user");

        Ok(RegisterUserResponse { success: true, id })
    }

    /// Unknown email and wrong password both yield the same 401.
    pub async fn login(&self, payload: LoginPayload) -> Result<LoginResponse> {
        let candidates = self
            .repository
            .find_credentials_by_email(&payload.email)
            .await?;

        let password = payload.contrasena;
        let matched = spawn_blocking_with_tracing(move || {
            candidates.into_iter().find(|candidate| {
                candidate
                    .contrasena
                    .as_deref()
                    .is_some_and(|hash| crypto::verify_password(&password, hash))
            })
        })
        .await?;

        match matched {
            Some(user) => Ok(LoginResponse {
                success: true,
                tipo: user.tipo,
                id: user.id,
            }),
            None => {
                tracing::info!("Rejected login attempt");
                Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()))
            }
        }
    }

    pub async fn roster(&self) -> Result<Vec<UserSummary>> {
        self.repository.list_roster().await
    }
}
