use std::env;
use std::env::current_dir;
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Duration;

use config::Config;
use config::ConfigError;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::mysql::MySqlSslMode;

/// Global configuration, loaded from `configuration/*.yaml`. See
/// `get_configuration`.
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub templates: TemplateSettings,
    pub submission_log: SubmissionLogSettings,
    pub weather: WeatherSettings,
    pub library: LibrarySettings,
}

/// Server configuration
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    /// Should be localhost on dev machine, 0.0.0.0 on prod
    pub host: String,

    /// 5000 by default; 0 lets the OS pick (tests)
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TemplateSettings {
    /// Directory containing `layout.html` and one file per page
    pub dir: PathBuf,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SubmissionLogSettings {
    pub path: PathBuf,
}

/// Settings for the one-shot weather fetch performed at startup
#[derive(Deserialize, Clone, Debug)]
pub struct WeatherSettings {
    pub base_url: String,

    /// File holding the API key; line breaks are stripped
    pub api_key_path: PathBuf,

    /// Where the (truncated) response body is written
    pub output_path: PathBuf,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub city_id: u64,
    pub units: String,
    pub lang: String,

    /// Upper bound on the number of body bytes kept
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_bytes: usize,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl WeatherSettings {
    pub fn timeout(&self) -> Duration { Duration::from_millis(self.timeout_milliseconds) }
}

/// Settings for the startup CSV dump of the `Books` table
#[derive(Deserialize, Clone, Debug)]
pub struct LibrarySettings {
    /// The export needs a running MySQL instance, so it can be switched off
    pub enabled: bool,
    pub export_path: PathBuf,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub row_limit: u32,
    pub database: DatabaseSettings,
}

/// Database configuration
#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: Secret<String>,
    pub host: String,

    /// Port for the MySQL server, 3306 by default
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub database_name: String,

    /// Should be `true` in production.
    pub require_ssl: bool,

    /// How long to wait for a connection before giving up
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl DatabaseSettings {
    pub fn timeout(&self) -> Duration { Duration::from_millis(self.timeout_milliseconds) }

    /// Return connection options for the named database. The password is
    /// only exposed here.
    pub fn connection(&self) -> MySqlConnectOptions {
        let opts = MySqlConnectOptions::new()
            .username(&self.username)
            .host(&self.host)
            .port(self.port)
            .database(&self.database_name)
            .ssl_mode(match self.require_ssl {
                true => MySqlSslMode::Required,
                false => MySqlSslMode::Preferred,
            });

        // an empty password means "none", e.g. `root:@/library`
        match self.password.expose_secret().is_empty() {
            true => opts,
            false => opts.password(self.password.expose_secret()),
        }
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Display for Environment {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Environment::Local => "local",
                Environment::Production => "production",
            }
        )?;
        Ok(())
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            e => Err(format!("Invalid environment: {e}")),
        }
    }
}

/// Load yaml configuration files at `<project_root>/configuration`.
///
/// All fields must be present in these files, otherwise initialisation will
/// fail immediately, and the server will not start.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let cfg_dir = current_dir()
        .map_err(|e| ConfigError::Foreign(Box::new(e)))?
        .join("configuration");

    let env: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".to_string())
        .try_into()
        .map_err(ConfigError::Message)?;

    tracing::info!("loading config for {env} env");

    let settings = Config::builder()
        .add_source(config::File::from(cfg_dir.join("base.yaml")))
        .add_source(config::File::from(cfg_dir.join(format!("{env}.yaml"))))
        .add_source(
            // env vars are -always- parsed as String, `serde-aux` is required to parse other
            // types.
            //
            // `APP_APPLICATION__PORT=5001` -> `Settings.application.port`
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
