// teamflow-service/src/routes/auth_routes.rs
use crate::models::{AuthResponse, ServiceError, SignupRequest, UpdateProfileRequest, User,
                    UserCredentials};
use crate::utils::{get_user_id_from_request, jwt, password, user_storage, validation};
use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use chrono::Utc;
use log::{error, info};
use uuid::Uuid;

// Register a new user
#[post("/auth/signup")]
async fn signup(data: web::Json<SignupRequest>) -> Result<HttpResponse, ServiceError> {
    info!("📝 Signup request for email: {}", data.email);

    let name = validation::validate_name("name", &data.name)?;
    validation::validate_email(&data.email)?;
    if data.password.chars().count() < 6 {
        return Err(ServiceError::Validation(
            "password must be at least 6 characters".to_string(),
        ));
    }

    if user_storage::find_user_by_email(&data.email)?.is_some() {
        error!("❌ Email already registered: {}", data.email);
        return Err(ServiceError::Conflict(
            "Email already registered".to_string(),
        ));
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        name,
        email: data.email.clone(),
        password_hash: password::hash_password(&data.password)?,
        profile_image: None,
        created_at: Utc::now(),
    };

    user_storage::save_user(&user)?;

    let token = jwt::generate_token(&user)?;

    info!("✅ User registered successfully: {}", user.id);

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: user.summary(),
    }))
}

// Login and get JWT token
#[post("/auth/login")]
async fn login(credentials: web::Json<UserCredentials>) -> Result<HttpResponse, ServiceError> {
    info!("🔑 Login request for email: {}", credentials.email);

    let user = match user_storage::find_user_by_email(&credentials.email)? {
        Some(user) => user,
        None => {
            error!("❌ User not found: {}", credentials.email);
            return Err(ServiceError::Unauthorized);
        }
    };

    if !password::verify_password(&credentials.password, &user.password_hash)? {
        error!("❌ Invalid password for user: {}", credentials.email);
        return Err(ServiceError::Unauthorized);
    }

    let token = jwt::generate_token(&user)?;

    info!("✅ User logged in successfully: {}", user.id);

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: user.summary(),
    }))
}

// Get current user info (requires authentication)
#[get("/auth/profile")]
async fn get_profile(req: HttpRequest) -> Result<HttpResponse, ServiceError> {
    let user_id = get_user_id_from_request(&req)?;

    let user = user_storage::find_user_by_id(&user_id)?.ok_or(ServiceError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(user.summary()))
}

// Update display name and profile image
#[put("/auth/profile")]
async fn update_profile(
    req: HttpRequest,
    data: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ServiceError> {
    let user_id = get_user_id_from_request(&req)?;

    let mut user = user_storage::find_user_by_id(&user_id)?.ok_or(ServiceError::Unauthorized)?;

    user.name = validation::validate_name("name", &data.name)?;
    user.profile_image = data
        .profile_image
        .as_ref()
        .filter(|url| !url.is_empty())
        .cloned();

    user_storage::save_user(&user)?;

    info!("✅ Profile updated for user: {}", user.id);

    Ok(HttpResponse::Ok().json(user.summary()))
}

// Routes reachable without a bearer token
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(signup).service(login);
}

// Routes behind the authentication middleware
pub fn init_protected_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_profile).service(update_profile);
}
