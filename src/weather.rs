use std::path::Path;
use std::path::PathBuf;

use reqwest::Client;
use secrecy::ExposeSecret;
use secrecy::Secret;

use crate::configuration::WeatherSettings;

#[derive(thiserror::Error, Debug)]
pub enum WeatherError {
    #[error("Could not read api key from {path:?}")]
    ApiKey {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Weather request failed")]
    Request(#[from] reqwest::Error),
    #[error("Could not write weather response to {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read the api key from `path`. Line breaks are dropped, so a trailing
/// newline (or a key split across lines) is harmless.
pub async fn read_api_key(path: &Path) -> Result<Secret<String>, WeatherError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| WeatherError::ApiKey {
            path: path.to_owned(),
            source,
        })?;
    Ok(Secret::new(raw.lines().collect()))
}

/// Client for the "current weather" endpoint of an OpenWeatherMap-style api.
///
/// Only the first `max_bytes` of the response body are kept.
pub struct WeatherClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
    city_id: u64,
    units: String,
    lang: String,
    max_bytes: usize,
}

impl WeatherClient {
    pub fn new(
        cfg: &WeatherSettings,
        api_key: Secret<String>,
    ) -> Result<Self, WeatherError> {
        let http_client = Client::builder().timeout(cfg.timeout()).build()?;
        Ok(Self {
            http_client,
            base_url: cfg.base_url.clone(),
            api_key,
            city_id: cfg.city_id,
            units: cfg.units.clone(),
            lang: cfg.lang.clone(),
            max_bytes: cfg.max_bytes,
        })
    }

    /// `GET {base_url}/data/2.5/weather`. Non-2xx responses are errors.
    #[tracing::instrument(name = "Fetching current weather", skip(self), fields(city_id = self.city_id))]
    pub async fn fetch_current(&self) -> Result<Vec<u8>, WeatherError> {
        let city_id = self.city_id.to_string();
        let mut resp = self
            .http_client
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[
                ("id", city_id.as_str()),
                ("units", self.units.as_str()),
                ("appid", self.api_key.expose_secret().as_str()),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        // stop reading once we have enough; the rest of the body is dropped with
        // `resp`
        let mut body = Vec::with_capacity(self.max_bytes);
        while body.len() < self.max_bytes {
            match resp.chunk().await? {
                Some(chunk) => {
                    let take = chunk.len().min(self.max_bytes - body.len());
                    body.extend_from_slice(&chunk[..take]);
                }
                None => break,
            }
        }
        Ok(body)
    }
}

/// Startup task: read the key, fetch the current weather, and write the
/// (truncated) body to `output_path`, replacing any previous file. Returns the
/// number of bytes written.
#[tracing::instrument(name = "Weather fetch", skip(cfg))]
pub async fn fetch_weather(cfg: &WeatherSettings) -> Result<usize, WeatherError> {
    let api_key = read_api_key(&cfg.api_key_path).await?;
    let client = WeatherClient::new(cfg, api_key)?;
    let body = client.fetch_current().await?;

    let write_err = |source| WeatherError::Write {
        path: cfg.output_path.clone(),
        source,
    };
    if let Some(parent) = cfg.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }
    }
    tokio::fs::write(&cfg.output_path, &body)
        .await
        .map_err(write_err)?;

    tracing::info!(bytes = body.len(), "Wrote weather response");
    Ok(body.len())
}
