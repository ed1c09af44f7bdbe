use crate::config::AppConfig;
use crate::logo::traits::LogoResolver;
use crate::model::LogoError;
use crate::normalizer::canonical_key;

use reqwest::{Client, StatusCode};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

pub struct LogoFetcher {
    client: Client,
    endpoint: String,
    tld: String,
    logo_dir: PathBuf,
    url_prefix: String,
    default_path: String,
}

impl LogoFetcher {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) DealSniperBot/0.1")
            .timeout(Duration::from_secs(config.logo_timeout_seconds))
            .build()
            .expect("❗ Failed to create HTTP client");

        Self {
            client,
            endpoint: config.logo_endpoint.trim_end_matches('/').to_string(),
            tld: config.logo_tld.clone(),
            logo_dir: config.logo_directory.clone(),
            url_prefix: config.logo_url_prefix.trim_end_matches('/').to_string(),
            default_path: config.default_logo_path.clone(),
        }
    }

    /// The key is percent-encoded so `?` or `#` in a name stay part of the path.
    fn build_url(&self, key: &str) -> String {
        format!("{}/{}.{}", self.endpoint, urlencoding::encode(key), self.tld)
    }

    /// One GET; on 200 the body is written to `{logo_dir}/{key}.png`.
    async fn fetch_and_store(&self, key: &str) -> Result<String, LogoError> {
        let url = self.build_url(key);
        debug!("Fetching logo {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(LogoError::Status(response.status()));
        }
        let bytes = response.bytes().await?;

        let file_name = format!("{}.png", key);
        tokio::fs::create_dir_all(&self.logo_dir).await?;
        tokio::fs::write(self.logo_dir.join(&file_name), &bytes).await?;

        Ok(format!("{}/{}", self.url_prefix, urlencoding::encode(&file_name)))
    }
}

#[async_trait::async_trait]
impl LogoResolver for LogoFetcher {
    async fn resolve(&self, company_name: &str) -> String {
        let key = canonical_key(company_name);
        if key.is_empty() || key.contains(['/', '\\']) {
            warn!("No usable logo key for '{}'", company_name);
            return self.default_path.clone();
        }

        match self.fetch_and_store(&key).await {
            Ok(path) => path,
            Err(e) => {
                warn!("Failed to fetch logo for {}: {}", key, e);
                self.default_path.clone()
            }
        }
    }
}
