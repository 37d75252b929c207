use std::path::PathBuf;

use kalvi_core::language::Language;
use kalvi_core::media::DEFAULT_MAX_UPLOAD_BYTES;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the JWT
/// secret.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Directory uploaded media is written under.
    pub media_root: PathBuf,
    pub media_max_bytes: u64,
    /// Language used to resolve display names when a request has no `?lang=`.
    pub default_language: Language,
    /// Seconds between purges of dead refresh sessions.
    pub session_sweep_secs: u64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:4200` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `MEDIA_ROOT`           | `storage/media`         |
    /// | `MEDIA_MAX_BYTES`      | `20971520`              |
    /// | `DEFAULT_LANGUAGE`     | `en`                    |
    /// | `SESSION_SWEEP_SECS`   | `3600`                  |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values; misconfiguration should stop startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:4200".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let media_root = PathBuf::from(
            std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "storage/media".into()),
        );

        let media_max_bytes: u64 = std::env::var("MEDIA_MAX_BYTES")
            .map(|v| v.parse().expect("MEDIA_MAX_BYTES must be a valid u64"))
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let default_language: Language = std::env::var("DEFAULT_LANGUAGE")
            .unwrap_or_else(|_| "en".into())
            .parse()
            .expect("DEFAULT_LANGUAGE must be one of ta, en, si");

        let session_sweep_secs: u64 = std::env::var("SESSION_SWEEP_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("SESSION_SWEEP_SECS must be a valid u64");
        assert!(session_sweep_secs > 0, "SESSION_SWEEP_SECS must be positive");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            media_root,
            media_max_bytes,
            default_language,
            session_sweep_secs,
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Output format of the tracing subscriber, read before the rest of the
/// configuration so startup itself is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// `LOG_FORMAT=json` (any case) selects JSON; anything else is text.
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
