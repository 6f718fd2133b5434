use crate::models::{Claims, ServiceError, User};
use actix_web::{HttpMessage, HttpRequest};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::env;
use std::fs;
use std::path::Path;

pub mod activity_storage;
pub mod invitation_storage;
pub mod team_lock;
pub mod team_storage;

pub use auth_middleware::Authentication;

// JWT utility functions
pub mod jwt {
    use super::*;

    // Get JWT secret from environment or use default
    fn get_jwt_secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| "teamflow_super_secret_key".to_string())
    }

    // Generate a new JWT token for a user
    pub fn generate_token(user: &User) -> Result<String, ServiceError> {
        let secret = get_jwt_secret();
        let expiration = (Utc::now() + Duration::days(7)).timestamp() as usize;

        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            exp: expiration,
            iat: Utc::now().timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .map_err(|_| ServiceError::InternalServerError)
    }

    // Validate and decode a JWT token
    pub fn decode_token(token: &str) -> Result<Claims, ServiceError> {
        let secret = get_jwt_secret();

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| ServiceError::Unauthorized)
    }

    // Extract JWT from Authorization header
    pub fn extract_token_from_header(auth_header: &str) -> Result<String, ServiceError> {
        if !auth_header.starts_with("Bearer ") {
            return Err(ServiceError::Unauthorized);
        }

        Ok(auth_header.trim_start_matches("Bearer ").to_string())
    }
}

// Password utility functions
pub mod password {
    use super::*;

    pub fn hash_password(password: &str) -> Result<String, ServiceError> {
        hash(password, DEFAULT_COST).map_err(|_| ServiceError::InternalServerError)
    }

    pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServiceError> {
        verify(password, hash).map_err(|_| ServiceError::InternalServerError)
    }
}

// Input validation helpers
pub mod validation {
    use super::ServiceError;
    use lazy_static::lazy_static;
    use regex::Regex;

    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
    }

    pub fn validate_email(email: &str) -> Result<(), ServiceError> {
        if EMAIL_RE.is_match(email) {
            Ok(())
        } else {
            Err(ServiceError::Validation(
                "email is not a valid address".to_string(),
            ))
        }
    }

    // Team and display names share the same 1-50 character bound
    pub fn validate_name(field: &str, value: &str) -> Result<String, ServiceError> {
        let trimmed = value.trim();
        let len = trimmed.chars().count();
        if len == 0 || len > 50 {
            return Err(ServiceError::Validation(format!(
                "{} must be between 1 and 50 characters",
                field
            )));
        }
        Ok(trimmed.to_string())
    }
}

// User storage utilities
pub mod user_storage {
    use super::*;
    use log::error;

    const USERS_DIR: &str = "./storage/users";

    fn ensure_users_dir() -> Result<(), ServiceError> {
        let dir = Path::new(USERS_DIR);
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                error!("Failed to create users directory: {:?}", e);
                ServiceError::InternalServerError
            })?;
        }
        Ok(())
    }

    // Save a user to storage
    pub fn save_user(user: &User) -> Result<(), ServiceError> {
        ensure_users_dir()?;
        let user_path = format!("{}/{}.json", USERS_DIR, user.id);

        let user_json =
            serde_json::to_string(&user).map_err(|_| ServiceError::InternalServerError)?;

        fs::write(&user_path, user_json).map_err(|e| {
            error!("Failed to save user: {:?}", e);
            ServiceError::InternalServerError
        })
    }

    // Find a user by email
    pub fn find_user_by_email(email: &str) -> Result<Option<User>, ServiceError> {
        ensure_users_dir()?;
        let users_dir = Path::new(USERS_DIR);

        for entry in fs::read_dir(users_dir).map_err(|_| ServiceError::InternalServerError)? {
            let entry = entry.map_err(|_| ServiceError::InternalServerError)?;
            let path = entry.path();

            if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
                let content =
                    fs::read_to_string(&path).map_err(|_| ServiceError::InternalServerError)?;
                let user: User =
                    serde_json::from_str(&content).map_err(|_| ServiceError::InternalServerError)?;

                if user.email.eq_ignore_ascii_case(email) {
                    return Ok(Some(user));
                }
            }
        }

        Ok(None)
    }

    // Find a user by ID
    pub fn find_user_by_id(id: &str) -> Result<Option<User>, ServiceError> {
        let user_path = format!("{}/{}.json", USERS_DIR, id);
        let path = Path::new(&user_path);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|_| ServiceError::InternalServerError)?;
        let user: User =
            serde_json::from_str(&content).map_err(|_| ServiceError::InternalServerError)?;

        Ok(Some(user))
    }
}

// Middleware for JWT authentication
pub mod auth_middleware {
    use super::*;
    use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
    use actix_web::http::header;
    use actix_web::Error;
    use futures::future::{ok, Ready};
    use std::future::Future;
    use std::pin::Pin;

    pub struct Authentication;

    impl<S, B> Transform<S, ServiceRequest> for Authentication
    where
        S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
        S::Future: 'static,
        B: 'static,
    {
        type Response = ServiceResponse<B>;
        type Error = Error;
        type Transform = AuthenticationMiddleware<S>;
        type InitError = ();
        type Future = Ready<Result<Self::Transform, Self::InitError>>;

        fn new_transform(&self, service: S) -> Self::Future {
            ok(AuthenticationMiddleware { service })
        }
    }

    pub struct AuthenticationMiddleware<S> {
        service: S,
    }

    impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
    where
        S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
        S::Future: 'static,
        B: 'static,
    {
        type Response = ServiceResponse<B>;
        type Error = Error;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

        forward_ready!(service);

        fn call(&self, req: ServiceRequest) -> Self::Future {
            let auth_header = req.headers().get(header::AUTHORIZATION);

            if let Some(auth_header) = auth_header {
                if let Ok(auth_str) = auth_header.to_str() {
                    if let Ok(token) = jwt::extract_token_from_header(auth_str) {
                        if let Ok(claims) = jwt::decode_token(&token) {
                            // Make the caller identity available to handlers
                            req.extensions_mut().insert(claims);
                            let fut = self.service.call(req);
                            return Box::pin(async move { fut.await });
                        }
                    }
                }
            }

            Box::pin(async move { Err(ServiceError::Unauthorized.into()) })
        }
    }
}

// Resolve the authenticated caller placed in request extensions by the
// authentication middleware.
pub fn get_user_id_from_request(req: &HttpRequest) -> Result<String, ServiceError> {
    req.extensions()
        .get::<Claims>()
        .map(|claims| claims.sub.clone())
        .ok_or(ServiceError::Unauthorized)
}
