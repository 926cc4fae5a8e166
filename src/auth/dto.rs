use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::Role;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^\w+([\.-]?\w+)*@\w+([\.-]?\w+)*(\.\w{2,3})+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for user registration. Fields default to empty so an
/// absent one reaches the handler's own validation message.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Envelope returned by register and login: the public user plus a token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}

/// Envelope returned by /auth/me.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Envelope returned by the one-shot admin bootstrap route.
#[derive(Debug, Serialize)]
pub struct CreateAdminResponse {
    pub success: bool,
    pub message: String,
    pub admin: AdminSummary,
}

#[derive(Debug, Serialize)]
pub struct AdminSummary {
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("ana@x.com"));
        assert!(is_valid_email("joao.silva@lusobites.com.br"));
        assert!(is_valid_email("admin@lusobites.com"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("sem-arroba"));
        assert!(!is_valid_email("dois@@x.com"));
        assert!(!is_valid_email("espaco em@x.com"));
        assert!(!is_valid_email("ana@x"));
    }

    #[test]
    fn register_request_tolerates_missing_fields() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"name":"Ana","email":"ana@x.com"}"#).unwrap();
        assert_eq!(req.name, "Ana");
        assert!(req.password.is_empty());

        let req: LoginRequest = serde_json::from_str(r#"{"email":"ana@x.com"}"#).unwrap();
        assert!(req.password.is_empty());
    }

    #[test]
    fn auth_response_uses_mongo_style_id_key() {
        let response = AuthResponse {
            success: true,
            id: Uuid::new_v4(),
            name: "Ana".into(),
            email: "ana@x.com".into(),
            role: Role::User,
            token: "tok".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("id").is_none());
        assert_eq!(json["role"], "user");
    }
}
