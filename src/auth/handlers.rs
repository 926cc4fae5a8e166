use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            is_valid_email, AdminSummary, AuthResponse, CreateAdminResponse, LoginRequest,
            MeResponse, RegisterRequest,
        },
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::{Role, User},
    },
    error::ApiError,
    extract::ApiJson,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/create-admin", post(create_admin))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(mut payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.name.trim().is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation(
            "Por favor, preencha todos os campos".into(),
        ));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Forneça um e-mail válido".into()));
    }
    if payload.password.len() < 6 {
        return Err(ApiError::Validation(
            "A senha deve ter pelo menos 6 caracteres".into(),
        ));
    }

    if User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::internal)?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Validation("Este email já está em uso".into()));
    }

    // The plaintext is hashed exactly once, here, before it reaches the store
    let hash = hash_password(&payload.password).map_err(ApiError::internal)?;
    let user = User::create(&state.db, payload.name.trim(), &payload.email, &hash, Role::User)
        .await
        .map_err(ApiError::internal)?;

    let token = JwtKeys::from_ref(&state)
        .sign(user.id)
        .map_err(ApiError::internal)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(mut payload): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation(
            "Por favor, forneça email e senha".into(),
        ));
    }

    // Unknown email and wrong password answer identically
    let user = match User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::internal)?
    {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::Unauthenticated("Email ou senha inválidos".into()));
        }
    };

    let ok = verify_password(&payload.password, &user.password_hash)
        .map_err(ApiError::internal)?;
    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthenticated("Email ou senha inválidos".into()));
    }

    let token = JwtKeys::from_ref(&state)
        .sign(user.id)
        .map_err(ApiError::internal)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        success: true,
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        token,
    }))
}

#[instrument(skip_all)]
pub async fn me(AuthUser(user): AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        success: true,
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    })
}

/// Development bootstrap: creates the default admin account once. Refuses to
/// run again while any admin exists.
#[instrument(skip(state))]
pub async fn create_admin(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateAdminResponse>), ApiError> {
    if User::admin_exists(&state.db).await.map_err(ApiError::internal)? {
        return Err(ApiError::Validation(
            "Já existe um administrador no sistema".into(),
        ));
    }

    let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin LusoBites".into());
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@lusobites.com".into());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "Admin123!".into());

    let hash = hash_password(&password).map_err(ApiError::internal)?;
    let admin = User::create(&state.db, &name, &email, &hash, Role::Admin)
        .await
        .map_err(ApiError::internal)?;

    info!(user_id = %admin.id, email = %admin.email, "admin bootstrapped");
    Ok((
        StatusCode::CREATED,
        Json(CreateAdminResponse {
            success: true,
            message: "Administrador criado com sucesso".into(),
            admin: AdminSummary {
                name: admin.name,
                email: admin.email,
            },
        }),
    ))
}
