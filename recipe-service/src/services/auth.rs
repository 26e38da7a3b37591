//! Registration, login, bearer-token authentication and profile updates.

use once_cell::sync::Lazy;
use std::sync::Arc;
use validator::ValidateEmail;

use super::error::{ServiceError, StoreError};
use super::jwt::JwtService;
use super::store::RecipeStore;
use crate::dtos::auth::{RegisterRequest, TokenResponse};
use crate::dtos::user::UpdateUserRequest;
use crate::models::User;
use crate::utils::{Password, PasswordHashString, hash_password, verify_password};

const MIN_PASSWORD_LEN: usize = 8;

/// Verified against when the email is unknown so both login failures cost
/// one Argon2 verification.
static UNKNOWN_USER_HASH: Lazy<Option<PasswordHashString>> =
    Lazy::new(|| hash_password(&Password::new("unknown-user-placeholder")).ok());

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn RecipeStore>,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(store: Arc<dyn RecipeStore>, jwt: JwtService) -> Self {
        Self { store, jwt }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<User, ServiceError> {
        let email = req.email.trim().to_string();

        if self.store.find_user_by_email(&email).await?.is_some() {
            tracing::info!("Registration rejected: email already registered");
            return Err(ServiceError::DuplicateEmail);
        }

        let password_hash = hash_password(&Password::new(req.password))?;

        let mut user = User::new(
            req.first_name.trim().to_string(),
            req.last_name.trim().to_string(),
            email,
            password_hash.into_string(),
        );
        if let Some(role) = non_empty(req.role) {
            user.role = role;
        }
        if let Some(status) = non_empty(req.status) {
            user.status = status;
        }
        if let Some(preferences) = req.preferences {
            user.preferences = preferences;
        }

        // A concurrent registration can still win the race past the lookup.
        let user = self
            .store
            .insert_user(&user)
            .await
            .map_err(duplicate_email)?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ServiceError> {
        let Some(user) = self.store.find_user_by_email(email.trim()).await? else {
            if let Some(hash) = UNKNOWN_USER_HASH.as_ref() {
                let _ = verify_password(&Password::new(password), hash);
            }
            tracing::info!("Login failed");
            return Err(ServiceError::InvalidCredentials);
        };

        let matches = verify_password(
            &Password::new(password),
            &PasswordHashString::new(user.password_hash.as_str()),
        )?;
        if !matches {
            tracing::info!(user_id = %user.id, "Login failed");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.jwt.generate_access_token(user.id)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(TokenResponse::bearer(
            token,
            self.jwt.access_token_expiry_seconds(),
        ))
    }

    /// Resolve a bearer token to a still-existing user.
    pub async fn authenticate(&self, token: &str) -> Result<User, ServiceError> {
        let claims = self.jwt.validate_access_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            ServiceError::Unauthorized
        })?;

        let user_id = claims.user_id().ok_or(ServiceError::Unauthorized)?;

        self.store
            .find_user_by_id(user_id)
            .await?
            .ok_or(ServiceError::Unauthorized)
    }

    /// Apply a partial update. `None` and blank strings leave fields as is.
    pub async fn update_profile(
        &self,
        current: &User,
        req: UpdateUserRequest,
    ) -> Result<User, ServiceError> {
        let mut user = current.clone();

        if let Some(first_name) = non_empty(req.first_name) {
            user.first_name = first_name;
        }
        if let Some(last_name) = non_empty(req.last_name) {
            user.last_name = last_name;
        }
        if let Some(email) = non_empty(req.email) {
            if !email.validate_email() {
                return Err(ServiceError::Validation("Invalid email format".into()));
            }
            if let Some(owner) = self.store.find_user_by_email(&email).await? {
                if owner.id != user.id {
                    return Err(ServiceError::DuplicateEmail);
                }
            }
            user.email = email;
        }
        if let Some(password) = req.password.filter(|p| !p.is_empty()) {
            if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(ServiceError::Validation(format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LEN
                )));
            }
            user.password_hash = hash_password(&Password::new(password))?.into_string();
        }
        if let Some(role) = non_empty(req.role) {
            user.role = role;
        }
        if let Some(status) = non_empty(req.status) {
            user.status = status;
        }
        if let Some(preferences) = req.preferences {
            user.preferences = preferences;
        }

        let user = self
            .store
            .update_user(&user)
            .await
            .map_err(duplicate_email)?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn duplicate_email(err: StoreError) -> ServiceError {
    match err {
        StoreError::UniqueViolation(_) => ServiceError::DuplicateEmail,
        other => ServiceError::Store(other),
    }
}
