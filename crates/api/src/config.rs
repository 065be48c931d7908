use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Which service(s) this process exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceRole {
    /// Villa Directory only (`/api/v1/villas`).
    Villas,
    /// Reservation Ledger only (`/api/v1/reservations`).
    Reservations,
    /// Both services against one database.
    All,
}

impl ServiceRole {
    pub fn serves_villas(self) -> bool {
        matches!(self, Self::Villas | Self::All)
    }

    pub fn serves_reservations(self) -> bool {
        matches!(self, Self::Reservations | Self::All)
    }
}

impl FromStr for ServiceRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "villas" => Ok(Self::Villas),
            "reservations" => Ok(Self::Reservations),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown service role '{other}', expected villas, reservations or all"
            )),
        }
    }
}

/// How bearer tokens are checked.
#[derive(Debug, Clone)]
pub enum IdentityConfig {
    /// Ask the identity service at `base_url` for the caller's profile.
    Remote { base_url: String },
    /// Verify HS256 tokens locally with the shared secret.
    Local(JwtConfig),
}

impl IdentityConfig {
    /// `IDENTITY_SERVICE_URL` selects remote validation; otherwise
    /// `JWT_SECRET` is required for local validation.
    pub fn from_env() -> Self {
        match std::env::var("IDENTITY_SERVICE_URL") {
            Ok(url) if !url.trim().is_empty() => Self::Remote {
                base_url: trim_base_url(&url),
            },
            _ => Self::Local(JwtConfig::from_env()),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Which routes this process mounts (default: `all`).
    pub service_role: ServiceRole,
    /// Remote Villa Directory base URL. `None` reads the local `villas` table.
    pub villa_service_url: Option<String>,
    /// Media service base URL used for villa image uploads.
    pub media_service_url: String,
    /// Timeout for each collaborator HTTP call in seconds (default: `10`).
    pub upstream_timeout_secs: u64,
    /// Bearer token validation mode.
    pub identity: IdentityConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SERVICE_ROLE`          | `all`                      |
    /// | `VILLA_SERVICE_URL`     | unset (local table)        |
    /// | `MEDIA_SERVICE_URL`     | `http://localhost:8004`    |
    /// | `UPSTREAM_TIMEOUT_SECS` | `10`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let service_role: ServiceRole = std::env::var("SERVICE_ROLE")
            .unwrap_or_else(|_| "all".into())
            .parse()
            .unwrap_or_else(|e| panic!("SERVICE_ROLE is invalid: {e}"));

        let villa_service_url = std::env::var("VILLA_SERVICE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|s| trim_base_url(&s));

        let media_service_url = trim_base_url(
            &std::env::var("MEDIA_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8004".into()),
        );

        let upstream_timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64");

        let identity = IdentityConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            service_role,
            villa_service_url,
            media_service_url,
            upstream_timeout_secs,
            identity,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Strip whitespace and trailing slashes so paths can be appended with `/`.
fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
