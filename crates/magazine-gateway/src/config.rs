//! # Configuration
//!
//! Layered configuration, later sources override earlier ones:
//!
//! 1. built-in defaults ([`GatewayConfig::default`]),
//! 2. `appsettings.json` in the content root (optional),
//! 3. `appsettings.{environment}.json` (optional),
//! 4. environment variables prefixed `MAGAZINE__`, nested with `__`
//!    (`MAGAZINE__SERVER__PORT=8080`).
//!
//! The environment name is read from `MAGAZINE_ENVIRONMENT` (default `Production`)
//! and the content root from `MAGAZINE_CONTENT_ROOT` (default the working directory).
//! Maps merge key by key, so a file that only tunes one router deployment keeps the
//! defaults of the other.

use crate::commander::COMMANDER_GROUP;
use crate::error::GatewayError;
use crate::query::QUERY_GROUP;
use actor_framework::{ActorSystemSettings, DeploymentConfig, RouterKind};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENVIRONMENT_VAR: &str = "MAGAZINE_ENVIRONMENT";
pub const CONTENT_ROOT_VAR: &str = "MAGAZINE_CONTENT_ROOT";
pub const DEFAULT_ENVIRONMENT: &str = "Production";
const ENV_PREFIX: &str = "MAGAZINE";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Hosting environment the configuration was loaded for. Not read from files.
    #[serde(skip)]
    pub environment: String,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub json: JsonConfig,
    pub swagger: SwaggerConfig,
    pub actor_system: ActorSystemConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for tearing the actor system down.
    pub shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    pub indented: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorSystemConfig {
    pub name: String,
    pub store_mailbox_capacity: usize,
    /// Router name to deployment, read by `router_of`.
    pub deployment: HashMap<String, DeploymentConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            json: JsonConfig::default(),
            swagger: SwaggerConfig::default(),
            actor_system: ActorSystemConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            shutdown_timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { indented: true }
    }
}

impl Default for SwaggerConfig {
    fn default() -> Self {
        Self {
            title: "Magazine Website API".to_string(),
            version: "v1".to_string(),
        }
    }
}

impl Default for ActorSystemConfig {
    fn default() -> Self {
        let deployment = [QUERY_GROUP, COMMANDER_GROUP]
            .into_iter()
            .map(|group| {
                (
                    group.to_string(),
                    DeploymentConfig::new(RouterKind::RoundRobinPool),
                )
            })
            .collect();
        Self {
            name: "magazine-system".to_string(),
            store_mailbox_capacity: 64,
            deployment,
        }
    }
}

impl ServerConfig {
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    pub fn bind_address(&self) -> Result<SocketAddr, GatewayError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| GatewayError::InvalidConfig(format!("server address: {e}")))
    }
}

impl ActorSystemConfig {
    pub fn settings(&self) -> ActorSystemSettings {
        ActorSystemSettings {
            deployment: self.deployment.clone(),
        }
    }
}

impl GatewayConfig {
    /// Loads the configuration for the environment named by `MAGAZINE_ENVIRONMENT`,
    /// from the process environment.
    pub fn load() -> Result<Self, GatewayError> {
        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());
        let content_root = std::env::var_os(CONTENT_ROOT_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::load_from(&content_root, &environment, None)
    }

    /// Loads and validates the configuration.
    ///
    /// `env_vars` replaces the process environment as the last layer when given.
    pub fn load_from(
        content_root: &Path,
        environment: &str,
        env_vars: Option<HashMap<String, String>>,
    ) -> Result<Self, GatewayError> {
        let base = content_root.join("appsettings.json");
        let specific = content_root.join(format!("appsettings.{environment}.json"));

        let env_source = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(env_vars.map(|vars| vars.into_iter().collect()));

        let config = Config::builder()
            .add_source(Config::try_from(&GatewayConfig::default())?)
            .add_source(File::from(base).required(false))
            .add_source(File::from(specific).required(false))
            .add_source(env_source)
            .build()?;

        let mut loaded: GatewayConfig = config.try_deserialize()?;
        loaded.environment = environment.to_string();
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        let invalid = |reason: String| Err(GatewayError::InvalidConfig(reason));

        if self.server.port == 0 {
            return invalid("server.port must not be 0".to_string());
        }
        if self.server.host.trim().is_empty() {
            return invalid("server.host must not be empty".to_string());
        }
        if self.actor_system.name.trim().is_empty() {
            return invalid("actor_system.name must not be empty".to_string());
        }
        if self.actor_system.store_mailbox_capacity == 0 {
            return invalid("actor_system.store_mailbox_capacity must be at least 1".to_string());
        }
        if self.swagger.title.trim().is_empty() || self.swagger.version.trim().is_empty() {
            return invalid("swagger.title and swagger.version must not be empty".to_string());
        }
        for group in [QUERY_GROUP, COMMANDER_GROUP] {
            let deployment = self.actor_system.deployment.get(group).ok_or_else(|| {
                GatewayError::InvalidConfig(format!("actor_system.deployment.{group} is missing"))
            })?;
            deployment.validate(group)?;
        }
        Ok(())
    }
}
