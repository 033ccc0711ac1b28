//! Environment configuration.

/// Env var holding a JSON fixture path. When set, the server reads the
/// catalog from the fixture instead of connecting to AWS.
pub const FIXTURE_ENV: &str = "GLUE_MCP_FIXTURE";

const API_KEY_ENV: &str = "GLUE_MCP_API_KEY";
const CORS_ORIGINS_ENV: &str = "GLUE_MCP_CORS_ORIGINS";
const RATE_LIMIT_ENV: &str = "GLUE_MCP_RATE_LIMIT";

const DEFAULT_RATE_LIMIT: u32 = 100;

/// Security configuration for the REST API, loaded from environment
/// variables. Auth and rate limiting only engage when an API key is set;
/// a bare local server stays open.
#[derive(Clone, Debug)]
pub struct SecurityConfig {
    /// Bearer token required on API requests (from GLUE_MCP_API_KEY).
    pub api_key: Option<String>,
    /// Allowed CORS origins (from GLUE_MCP_CORS_ORIGINS, comma-separated).
    pub cors_origins: Option<Vec<String>>,
    /// Requests per minute per client IP (from GLUE_MCP_RATE_LIMIT).
    pub rate_limit: Option<u32>,
}

impl SecurityConfig {
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok();

        let cors_origins = std::env::var(CORS_ORIGINS_ENV)
            .ok()
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect());

        // Rate limiting rides along with auth: a keyed deployment is a
        // remote one, a keyless one is local and unthrottled.
        let rate_limit = api_key.is_some().then(|| {
            std::env::var(RATE_LIMIT_ENV)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RATE_LIMIT)
        });

        Self {
            api_key,
            cors_origins,
            rate_limit,
        }
    }

    /// No auth, no throttling (local development and tests).
    pub fn disabled() -> Self {
        Self {
            api_key: None,
            cors_origins: None,
            rate_limit: None,
        }
    }

    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            ..Self::disabled()
        }
    }

    pub fn with_rate_limit(max_requests: u32) -> Self {
        Self {
            rate_limit: Some(max_requests),
            ..Self::disabled()
        }
    }

    pub fn with_cors_origins(origins: Vec<String>) -> Self {
        Self {
            cors_origins: Some(origins),
            ..Self::disabled()
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
