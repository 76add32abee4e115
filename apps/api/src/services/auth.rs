//! Authentication service for Inkwell
//!
//! This module provides:
//! - User registration with Argon2id password hashing
//! - Login with JWT bearer token issuance
//! - Access token verification

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::user::{Claims, IssuedToken, NewUser, User};
use crate::repositories::UserRepository;
use crate::services::validation::{
    has_min_length, is_valid_email, Validator, MIN_PASSWORD_LENGTH,
};

/// Default token lifetime: one hour
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Authentication service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Access token TTL in seconds (default: 1 hour)
    pub token_ttl_secs: i64,
    /// JWT issuer
    pub issuer: String,
    /// JWT audience
    pub audience: String,
    /// Argon2 memory cost in KiB
    pub hash_memory_kib: u32,
    /// Argon2 iteration count
    pub hash_iterations: u32,
}

impl AuthConfig {
    /// Create a new AuthConfig with the default TTL and Argon2 costs
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            issuer: "inkwell".to_string(),
            audience: "inkwell".to_string(),
            hash_memory_kib: Params::DEFAULT_M_COST,
            hash_iterations: Params::DEFAULT_T_COST,
        }
    }

    /// Create AuthConfig with an expiry string (e.g., "1h", "30m")
    ///
    /// Unparseable expiries fall back to one hour.
    pub fn with_expiry_string(jwt_secret: String, expiry: &str) -> Self {
        Self {
            token_ttl_secs: parse_duration_string(expiry).unwrap_or(DEFAULT_TOKEN_TTL_SECS),
            ..Self::new(jwt_secret)
        }
    }

    /// Build the auth configuration from the server configuration
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::with_expiry_string(config.jwt_secret.clone(), &config.jwt_expiry);
        Self {
            hash_memory_kib: config
                .password_hash_memory_kib
                .unwrap_or(defaults.hash_memory_kib),
            hash_iterations: config
                .password_hash_iterations
                .unwrap_or(defaults.hash_iterations),
            ..defaults
        }
    }

    /// Override the Argon2 cost parameters
    pub fn with_hash_cost(mut self, memory_kib: u32, iterations: u32) -> Self {
        self.hash_memory_kib = memory_kib;
        self.hash_iterations = iterations;
        self
    }
}

/// Parse duration strings like "15m", "7d", "1h" to seconds
fn parse_duration_string(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (unit_at, _) = s.char_indices().last()?;
    let (num_str, unit) = s.split_at(unit_at);
    let num: i64 = num_str.parse().ok()?;

    match unit {
        "s" => Some(num),
        "m" => Some(num * 60),
        "h" => Some(num * 3600),
        "d" => Some(num * 24 * 3600),
        "w" => Some(num * 7 * 24 * 3600),
        _ => None,
    }
}

/// Authentication service providing registration, login, and token checks
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    config: AuthConfig,
    argon2: Argon2<'static>,
}

impl AuthService {
    /// Create a new AuthService instance
    ///
    /// # Errors
    /// - `ApiError::Configuration` if the Argon2 cost parameters are rejected
    pub fn new(users: Arc<dyn UserRepository>, config: AuthConfig) -> ApiResult<Self> {
        let params = Params::new(
            config.hash_memory_kib,
            config.hash_iterations,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| ApiError::Configuration(format!("invalid password hash cost: {}", e)))?;

        Ok(Self {
            users,
            config,
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Configuration in effect
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register a new user account
    ///
    /// # Errors
    /// - `ApiError::InvalidInput` listing every rejected field
    /// - `ApiError::Conflict` if the email is already registered
    pub async fn register(&self, email: &str, name: &str, password: &str) -> ApiResult<User> {
        let mut validator = Validator::new();
        validator
            .check(is_valid_email(email), "email", "E-mail is invalid.")
            .check(
                has_min_length(password, MIN_PASSWORD_LENGTH),
                "password",
                &format!(
                    "Password must be at least {} characters.",
                    MIN_PASSWORD_LENGTH
                ),
            );
        validator.finish()?;

        let password_hash = self.hash_password(password)?;

        let user = self
            .users
            .create(NewUser {
                email: email.trim().to_string(),
                name: name.trim().to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered successfully");

        Ok(user)
    }

    /// Authenticate a user and issue a bearer token
    ///
    /// # Errors
    /// - `ApiError::InvalidCredentials` for an unknown email or a wrong password
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<(User, IssuedToken)> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::warn!(email = %email, "Login failed: user not found");
                return Err(ApiError::InvalidCredentials("User not found."));
            }
        };

        if !self.verify_password(password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ApiError::InvalidCredentials("Password Incorrect"));
        }

        let token = self.issue_token(&user)?;

        tracing::info!(
            user_id = %user.id,
            email = %user.email,
            expires_at = %token.expires_at,
            "User logged in successfully"
        );

        Ok((user, token))
    }

    /// Sign a bearer token for `user`
    pub fn issue_token(&self, user: &User) -> ApiResult<IssuedToken> {
        let mut claims = Claims::new(user, self.config.token_ttl_secs);
        claims.iss = self.config.issuer.clone();
        claims.aud = self.config.audience.clone();

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )?;

        Ok(IssuedToken {
            token,
            user_id: user.id,
            expires_at: Utc::now() + Duration::seconds(self.config.token_ttl_secs),
        })
    }

    /// Verify an access token and return its claims
    ///
    /// # Errors
    /// - `ApiError::InvalidToken` if token is invalid, expired, or malformed
    pub fn verify_access_token(&self, token: &str) -> ApiResult<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "Access token verification failed");
            ApiError::InvalidToken(e.to_string())
        })?;

        Ok(token_data.claims)
    }

    /// Hash a password with Argon2id
    fn hash_password(&self, password: &str) -> ApiResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against an Argon2id hash
    fn verify_password(&self, password: &str, hash: &str) -> ApiResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| ApiError::Internal(format!("Invalid password hash format: {}", e)))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
