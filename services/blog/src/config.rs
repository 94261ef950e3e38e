//! Service configuration
//!
//! Every setting is read from the environment exactly once at startup and
//! carried in an explicit [`AppConfig`] value; no part of the service reads
//! ambient configuration after boot.

use anyhow::Result;
use jsonwebtoken::Algorithm;

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret used to sign and verify access tokens
    pub secret_key: String,
    /// HMAC signing algorithm
    pub algorithm: Algorithm,
    /// Access token lifetime in minutes
    pub access_token_expire_minutes: i64,
}

impl AuthConfig {
    /// Create a new AuthConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SECRET_KEY`: Token signing secret (required)
    /// - `JWT_ALGORITHM`: HS256, HS384 or HS512 (default: HS256)
    /// - `ACCESS_TOKEN_EXPIRE_MINUTES`: Token lifetime in minutes (default: 30)
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("SECRET_KEY")
            .map_err(|_| anyhow::anyhow!("SECRET_KEY environment variable not set"))?;

        let algorithm_name =
            std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string());
        let algorithm = match algorithm_name.as_str() {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => anyhow::bail!("Unsupported JWT algorithm: {}", other),
        };

        let access_token_expire_minutes = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(AuthConfig {
            secret_key,
            algorithm,
            access_token_expire_minutes,
        })
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `HOST`: Bind address (default: 0.0.0.0)
    /// - `PORT`: Bind port (default: 8000)
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .unwrap_or(8000);

        ServerConfig { host, port }
    }
}

/// Listing pagination configuration
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// Page size used when the caller does not pass a limit
    pub default_limit: i64,
    /// Hard ceiling applied to any caller-supplied limit
    pub max_limit: i64,
}

impl PaginationConfig {
    /// Create a new PaginationConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DEFAULT_PAGE_SIZE`: Default listing page size (default: 100)
    /// - `MAX_PAGE_SIZE`: Maximum listing page size (default: 100)
    pub fn from_env() -> Self {
        let default_limit = std::env::var("DEFAULT_PAGE_SIZE")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .unwrap_or(100);

        let max_limit = std::env::var("MAX_PAGE_SIZE")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .unwrap_or(100);

        PaginationConfig {
            default_limit,
            max_limit,
        }
    }
}

/// Top-level service configuration, built once in `main`
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
}

impl AppConfig {
    /// Assemble the full configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(AppConfig {
            auth: AuthConfig::from_env()?,
            server: ServerConfig::from_env(),
            pagination: PaginationConfig::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_auth_config_defaults() {
        unsafe {
            std::env::set_var("SECRET_KEY", "test-secret");
            std::env::remove_var("JWT_ALGORITHM");
            std::env::remove_var("ACCESS_TOKEN_EXPIRE_MINUTES");
        }

        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.secret_key, "test-secret");
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.access_token_expire_minutes, 30);

        unsafe {
            std::env::remove_var("SECRET_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_auth_config_missing_secret() {
        unsafe {
            std::env::remove_var("SECRET_KEY");
        }

        assert!(AuthConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_auth_config_rejects_non_hmac_algorithm() {
        unsafe {
            std::env::set_var("SECRET_KEY", "test-secret");
            std::env::set_var("JWT_ALGORITHM", "RS256");
        }

        assert!(AuthConfig::from_env().is_err());

        unsafe {
            std::env::remove_var("SECRET_KEY");
            std::env::remove_var("JWT_ALGORITHM");
        }
    }

    #[test]
    #[serial]
    fn test_auth_config_custom_values() {
        unsafe {
            std::env::set_var("SECRET_KEY", "another-secret");
            std::env::set_var("JWT_ALGORITHM", "HS512");
            std::env::set_var("ACCESS_TOKEN_EXPIRE_MINUTES", "5");
        }

        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.algorithm, Algorithm::HS512);
        assert_eq!(config.access_token_expire_minutes, 5);

        unsafe {
            std::env::remove_var("SECRET_KEY");
            std::env::remove_var("JWT_ALGORITHM");
            std::env::remove_var("ACCESS_TOKEN_EXPIRE_MINUTES");
        }
    }

    #[test]
    #[serial]
    fn test_server_and_pagination_defaults() {
        unsafe {
            std::env::remove_var("HOST");
            std::env::remove_var("PORT");
            std::env::remove_var("DEFAULT_PAGE_SIZE");
            std::env::remove_var("MAX_PAGE_SIZE");
        }

        let server = ServerConfig::from_env();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8000);

        let pagination = PaginationConfig::from_env();
        assert_eq!(pagination.default_limit, 100);
        assert_eq!(pagination.max_limit, 100);
    }
}
