use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use thiserror::Error;
use validator::{Validate, ValidationError};

const REDACTED: &str = "***";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// How the client authenticates against the database
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthConfig {
    #[default]
    None,
    Basic {
        username: String,
        password: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        realm: Option<String>,
    },
    Bearer {
        token: String,
    },
    Kerberos {
        ticket: String,
    },
}

impl AuthConfig {
    /// Same variant with every secret replaced
    pub fn redacted(&self) -> Self {
        match self {
            AuthConfig::None => AuthConfig::None,
            AuthConfig::Basic {
                username, realm, ..
            } => AuthConfig::Basic {
                username: username.clone(),
                password: REDACTED.to_string(),
                realm: realm.clone(),
            },
            AuthConfig::Bearer { .. } => AuthConfig::Bearer {
                token: REDACTED.to_string(),
            },
            AuthConfig::Kerberos { .. } => AuthConfig::Kerberos {
                ticket: REDACTED.to_string(),
            },
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthConfig::None => write!(f, "None"),
            AuthConfig::Basic {
                username, realm, ..
            } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &REDACTED)
                .field("realm", realm)
                .finish(),
            AuthConfig::Bearer { .. } => {
                f.debug_struct("Bearer").field("token", &REDACTED).finish()
            }
            AuthConfig::Kerberos { .. } => {
                f.debug_struct("Kerberos").field("ticket", &REDACTED).finish()
            }
        }
    }
}

/// Graph client configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Connection URI, e.g. `bolt://localhost:7687` or `neo4j+s://host`
    #[validate(custom(function = "validate_uri"))]
    pub uri: String,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Target database; the server default when unset
    #[serde(default)]
    #[validate(length(min = 1, message = "Database name cannot be empty"))]
    pub database: Option<String>,

    /// Rows per UNWIND statement when bulk writing
    #[serde(default = "default_bulk_batch_size")]
    #[validate(range(
        min = 1,
        max = 100_000,
        message = "Bulk batch size must be between 1 and 100000"
    ))]
    pub bulk_batch_size: usize,
}

fn default_bulk_batch_size() -> usize {
    1000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            auth: AuthConfig::None,
            database: None,
            bulk_batch_size: default_bulk_batch_size(),
        }
    }
}

fn validate_uri(uri: &str) -> Result<(), ValidationError> {
    const SCHEMES: [&str; 6] = ["bolt", "bolt+s", "bolt+ssc", "neo4j", "neo4j+s", "neo4j+ssc"];
    let Some((scheme, rest)) = uri.split_once("://") else {
        return Err(ValidationError::new("uri_missing_scheme"));
    };
    if !SCHEMES.contains(&scheme) {
        return Err(ValidationError::new("uri_unsupported_scheme"));
    }
    if rest.is_empty() {
        return Err(ValidationError::new("uri_missing_host"));
    }
    Ok(())
}

impl ClientConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let auth = match env::var("NEO4J_USERNAME") {
            Ok(username) => AuthConfig::Basic {
                username,
                password: env::var("NEO4J_PASSWORD").unwrap_or_default(),
                realm: env::var("NEO4J_REALM").ok(),
            },
            Err(env::VarError::NotPresent) => AuthConfig::None,
            Err(e) => return Err(e.into()),
        };

        let config = Self {
            uri: env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string()),
            auth,
            database: env::var("NEO4J_DATABASE").ok(),
            bulk_batch_size: parse_env_var("CYPHERFORGE_BULK_BATCH_SIZE", "1000")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments with validation
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let auth = match cli.username {
            Some(username) => AuthConfig::Basic {
                username,
                password: cli.password.unwrap_or_default(),
                realm: None,
            },
            None => AuthConfig::None,
        };
        let config = Self {
            uri: cli.uri,
            auth,
            database: cli.database,
            bulk_batch_size: cli.bulk_batch_size,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: "<redacted>".to_string(),
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Copy safe to print or log
    pub fn redacted(&self) -> Self {
        Self {
            auth: self.auth.redacted(),
            ..self.clone()
        }
    }
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (database: {}, bulk batch size: {})",
            self.uri,
            self.database.as_deref().unwrap_or("<default>"),
            self.bulk_batch_size
        )
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub uri: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub bulk_batch_size: usize,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
