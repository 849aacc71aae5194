use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension, Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use budgetly_core::users::{validate_password, NewUser, User as CoreUser};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::{present, AuthResponse, LoginRequest, SignupRequest, User};

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Vec<u8>,
    pub access_token_ttl: Duration,
}

pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
    decoy_hash: Option<String>,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    InvalidCredentials,
    Internal(String),
}

/// Identity of the caller, inserted into request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

impl AuthManager {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let decoy_hash = Argon2::default()
            .hash_password(b"budgetly-decoy", &SaltString::generate(&mut OsRng))
            .map(|hash| hash.to_string())
            .map_err(|e| tracing::warn!("Could not prepare decoy password hash: {}", e))
            .ok();
        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            token_ttl: config.access_token_ttl,
            decoy_hash,
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Failed to hash password: {e}")))
    }

    pub fn verify_password(&self, candidate: &str, stored_hash: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid stored password hash: {e}")))?;
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|err| match err {
                PasswordHashError::Password => AuthError::InvalidCredentials,
                other => AuthError::Internal(format!("Password verification failed: {other}")),
            })
    }

    /// Fails a login for an unknown email after the same Argon2 work a known
    /// email costs.
    pub fn reject_unknown_user(&self, candidate: &str) -> AuthError {
        if let Some(hash) = &self.decoy_hash {
            let _ = self.verify_password(candidate, hash);
        }
        AuthError::InvalidCredentials
    }

    pub fn issue_token(&self, user_id: &str) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Returns the user id carried by a valid token.
    pub fn validate_token(&self, token: &str) -> Result<String, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|err| {
                tracing::debug!("Rejected bearer token: {}", err);
                AuthError::Unauthorized
            })
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }

    fn auth_response(&self, user: CoreUser) -> Result<AuthResponse, AuthError> {
        Ok(AuthResponse {
            access_token: self.issue_token(&user.id)?,
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in().as_secs(),
            user: User::from(user),
        })
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => ApiError::Unauthorized("Unauthorized".to_string()),
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses((status = 201, body = AuthResponse), (status = 409, description = "Email already registered"))
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let Json(payload) = payload?;
    let password = present(payload.password, "password")?;
    validate_password(&password)?;

    let new_user = NewUser {
        name: present(payload.name, "name")?,
        email: present(payload.email, "email")?,
        password_hash: state.auth.hash_password(&password)?,
    };
    let user = state.user_service.register(new_user).await?;
    tracing::info!("New signup {}", user.id);

    Ok((StatusCode::CREATED, Json(state.auth.auth_response(user)?)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses((status = 200, body = AuthResponse), (status = 401, description = "Invalid credentials"))
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(payload) = payload?;
    let email = present(payload.email, "email")?;
    let password = present(payload.password, "password")?;

    let user = match state.user_service.find_by_email(&email) {
        Ok(Some(user)) => user,
        // a malformed email cannot belong to anyone
        Ok(None) | Err(budgetly_core::Error::Validation(_)) => {
            return Err(state.auth.reject_unknown_user(&password).into())
        }
        Err(e) => return Err(e.into()),
    };
    state.auth.verify_password(&password, &user.password_hash)?;

    Ok(Json(state.auth.auth_response(user)?))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses((status = 200, body = User), (status = 401, description = "Missing or invalid token"))
)]
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.get_user(&current.id)?;
    Ok(Json(User::from(user)))
}

pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::Unauthorized)?;

    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return Err(AuthError::Unauthorized);
    };

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::Unauthorized);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Unauthorized);
    }

    let user_id = state.auth.validate_token(token)?;
    request.extensions_mut().insert(CurrentUser { id: user_id });
    Ok(next.run(request).await)
}
