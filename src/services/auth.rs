//! Authentication service: password hashing, JWT, login sessions, and driver accounts.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::driver::{CreateDriver, Driver};
use crate::session::{SessionId, SessionStore, USER_ID_KEY};

/// JWT claims embedded in access and refresh tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub user_id: String,
    pub sid: SessionId,
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token pair returned on successful login.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Hash a plaintext password with argon2id.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Generate an access + refresh pair bound to one login session.
pub fn generate_tokens(
    driver: &Driver,
    session: &SessionId,
    jwt_secret: &str,
    access_expiry_secs: i64,
    refresh_expiry_secs: i64,
) -> Result<TokenPair, AppError> {
    let now = Utc::now();
    let encoding_key = EncodingKey::from_secret(jwt_secret.as_bytes());

    let claims = |token_type: &str, expiry_secs: i64| Claims {
        sub: driver.username.clone(),
        user_id: driver.id.to_string(),
        sid: session.clone(),
        token_type: token_type.to_string(),
        exp: (now + Duration::seconds(expiry_secs)).timestamp(),
        iat: now.timestamp(),
    };

    let encode = |c: &Claims| {
        jsonwebtoken::encode(&Header::default(), c, &encoding_key)
            .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
    };

    Ok(TokenPair {
        access_token: encode(&claims("access", access_expiry_secs))?,
        refresh_token: encode(&claims("refresh", refresh_expiry_secs))?,
        token_type: "Bearer".to_string(),
        expires_in: access_expiry_secs,
    })
}

/// Validate a JWT and return the claims.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    jsonwebtoken::decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized)
}

/// Confirm the token's session is still live and belongs to the token's user.
///
/// Logout or TTL expiry removes the session, which revokes every token
/// minted for it.
pub async fn ensure_session(sessions: &dyn SessionStore, claims: &Claims) -> Result<(), AppError> {
    match sessions.get(&claims.sid, USER_ID_KEY).await? {
        Some(owner) if owner == claims.user_id => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

/// Register a new driver account with hashed password.
pub async fn create_driver(pool: &PgPool, input: &CreateDriver) -> Result<Driver, AppError> {
    let password_hash = hash_password(&input.password)?;

    let driver = sqlx::query_as::<_, Driver>(
        r#"
        INSERT INTO drivers (username, password_hash, first_name, last_name, email, license_number)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&input.username)
    .bind(&password_hash)
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.email)
    .bind(&input.license_number)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Username or license number already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!(driver_id = %driver.id, username = %driver.username, "Driver registered");
    Ok(driver)
}

/// Authenticate a driver, open a new session, and return a token pair for it.
pub async fn login(
    pool: &PgPool,
    sessions: &dyn SessionStore,
    config: &AppConfig,
    username: &str,
    password: &str,
) -> Result<TokenPair, AppError> {
    let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !driver.is_active || !verify_password(password, &driver.password_hash)? {
        tracing::warn!(username, "Rejected login attempt");
        return Err(AppError::Unauthorized);
    }

    sqlx::query("UPDATE drivers SET last_login = NOW() WHERE id = $1")
        .bind(driver.id)
        .execute(pool)
        .await?;

    let session = SessionId::generate();
    sessions
        .set(&session, USER_ID_KEY, &driver.id.to_string())
        .await?;
    tracing::info!(driver_id = %driver.id, "Session opened");

    generate_tokens(
        &driver,
        &session,
        &config.jwt_secret,
        config.jwt_access_token_expiry_secs,
        config.jwt_refresh_token_expiry_secs,
    )
}

/// Exchange a refresh token for a new pair on the same session.
pub async fn refresh_token(
    pool: &PgPool,
    sessions: &dyn SessionStore,
    config: &AppConfig,
    refresh_token_str: &str,
) -> Result<TokenPair, AppError> {
    let claims = validate_token(refresh_token_str, &config.jwt_secret)?;

    if claims.token_type != "refresh" {
        return Err(AppError::Unauthorized);
    }
    ensure_session(sessions, &claims).await?;

    let driver_id: Uuid = claims
        .user_id
        .parse()
        .map_err(|_| AppError::Unauthorized)?;

    let driver =
        sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1 AND is_active = true")
            .bind(driver_id)
            .fetch_optional(pool)
            .await?
            .ok_or(AppError::Unauthorized)?;

    generate_tokens(
        &driver,
        &claims.sid,
        &config.jwt_secret,
        config.jwt_access_token_expiry_secs,
        config.jwt_refresh_token_expiry_secs,
    )
}

/// End a session. Its visit counter goes with it.
pub async fn logout(sessions: &dyn SessionStore, session: &SessionId) -> Result<(), AppError> {
    sessions.remove(session).await?;
    tracing::info!("Session closed");
    Ok(())
}

/// Find a driver by ID.
pub async fn find_driver_by_id(pool: &PgPool, id: Uuid) -> Result<Driver, AppError> {
    sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Driver not found".to_string()))
}
