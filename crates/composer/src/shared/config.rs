use once_cell::sync::OnceCell;
use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Process-wide configuration, loaded once on first access
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| match load_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "config load failed, using defaults");
            Config::default()
        }
    })
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub paging: PagingConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PagingConfig {
    /// Page size for browse screens
    pub page_size: u32,
    /// Large page size used to fetch "all" options for select fields
    pub option_page_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Pause between consecutive photo uploads
    pub photo_pause_ms: u64,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:3000"
timeout_secs = 30

[paging]
page_size = 10
option_page_size = 1000

[uploads]
photo_pause_ms = 300
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }
}
