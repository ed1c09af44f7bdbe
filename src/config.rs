use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub document_path: PathBuf,
    pub cache_path: PathBuf,
    /// Directory fetched logos are written into.
    pub logo_directory: PathBuf,
    /// Resource path handed out when no logo could be fetched.
    pub default_logo_path: String,
    /// Resource path prefix under which `logo_directory` is served.
    pub logo_url_prefix: String,
    pub logo_endpoint: String,
    pub logo_tld: String,
    pub logo_timeout_seconds: u64,
    pub bind_address: String,
    /// Re-run extraction before every listing.
    pub extract_on_request: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from("All_deals_word.pdf"),
            cache_path: PathBuf::from("deals_data.csv"),
            logo_directory: PathBuf::from("static/logos"),
            default_logo_path: "/static/logos/default_logo.png".into(),
            logo_url_prefix: "/static/logos".into(),
            logo_endpoint: "https://logo.clearbit.com".into(),
            logo_tld: "com".into(),
            logo_timeout_seconds: 10,
            bind_address: "127.0.0.1:5000".into(),
            extract_on_request: true,
        }
    }
}

impl AppConfig {
    /// On-disk location of the fallback logo, derived from `default_logo_path`.
    pub fn default_logo_file(&self) -> PathBuf {
        let name = self
            .default_logo_path
            .rsplit('/')
            .next()
            .unwrap_or("default_logo.png");
        self.logo_directory.join(name)
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Config file {} not found, using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
