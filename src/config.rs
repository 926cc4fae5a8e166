use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub allowed_origins: Vec<String>,
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn default_origins() -> Vec<String> {
    vec![
        "https://lusobites.vercel.app".to_string(),
        "https://www.lusobites.com".to_string(),
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_days: std::env::var("JWT_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(30),
        };
        let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_else(|_| default_origins());
        Ok(Self {
            database_url,
            jwt,
            allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_split_and_trim() {
        let origins = parse_origins("https://lusobites.vercel.app, http://localhost:3000");
        assert_eq!(
            origins,
            vec!["https://lusobites.vercel.app", "http://localhost:3000"]
        );
    }

    #[test]
    fn origins_skip_empty_entries() {
        let origins = parse_origins("http://localhost:3000,,");
        assert_eq!(origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn default_origins_include_production_hosts() {
        let origins = default_origins();
        assert!(origins.contains(&"https://lusobites.vercel.app".to_string()));
        assert!(origins.contains(&"https://www.lusobites.com".to_string()));
        assert!(origins.contains(&"http://localhost:3000".to_string()));
    }
}
