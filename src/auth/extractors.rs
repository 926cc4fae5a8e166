use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::{
    jwt::JwtKeys,
    repo::{Role, User},
};
use crate::{error::ApiError, state::AppState};

/// Authenticated caller, resolved from the bearer token. Verifies the JWT
/// and loads the user row it names; any failure along the way is a 401.
pub struct AuthUser(pub User);

fn unauthenticated(msg: &str) -> ApiError {
    ApiError::Unauthenticated(msg.to_string())
}

pub(crate) fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthenticated("Acesso não autorizado, token não fornecido"))?;
    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthenticated("Acesso não autorizado, token não fornecido"))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "token rejected");
            unauthenticated("Não autorizado")
        })?;

        // The token may outlive its user; a missing row is unauthenticated,
        // not a server error.
        let user = User::find_by_id(&state.db, claims.sub)
            .await
            .map_err(ApiError::internal)?
            .ok_or_else(|| unauthenticated("Usuário não encontrado"))?;

        Ok(AuthUser(user))
    }
}

/// Authenticated caller holding the admin role. Authentication always runs
/// first; a valid non-admin token is a 403, never a 401.
#[derive(Debug)]
pub struct AdminUser(pub User);

fn require_admin(user: User) -> Result<AdminUser, ApiError> {
    if user.role != Role::Admin {
        warn!(user_id = %user.id, "admin route denied");
        return Err(ApiError::Forbidden(
            "Usuário não autorizado para acessar este recurso".to_string(),
        ));
    }
    Ok(AdminUser(user))
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        require_admin(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/recipes");
        if let Some(v) = value {
            builder = builder.header(axum::http::header::AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        let parts = parts_with_auth(None);
        let err = bearer_token(&parts).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }

    #[test]
    fn non_bearer_scheme_is_unauthenticated() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        let err = bearer_token(&parts).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }

    #[test]
    fn bearer_token_extracted() {
        let parts = parts_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");
    }

    fn make_user(role: Role) -> User {
        User {
            id: uuid::Uuid::new_v4(),
            name: "Ana".into(),
            email: "ana@x.com".into(),
            password_hash: "$argon2id$hash".into(),
            role,
            created_at: time::OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn admin_role_passes_gate() {
        let AdminUser(user) = require_admin(make_user(Role::Admin)).expect("admin allowed");
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn user_role_is_forbidden_not_unauthenticated() {
        let err = require_admin(make_user(Role::User)).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
