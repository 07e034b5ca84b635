use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Allowed CORS origins. Defaults to localhost dev ports.
    /// Set MEDIA_ADMIN__API__CORS_ALLOWED_ORIGINS in production.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Public base URL of the admin panel; confirmation links are built from it.
    #[serde(default = "default_web_path")]
    pub web_path: String,
    /// Switchable server features, e.g. "access_control".
    #[serde(default = "default_features")]
    pub features: Vec<String>,
    /// Privilege ceiling granted to callers of this fragment.
    /// Expected domain values: 0, 5, 25, 50, 75, 100.
    #[serde(default = "default_granted_level")]
    pub granted_level: i64,
}

fn default_api_port() -> u16 { 8080 }
fn default_bind() -> String { "0.0.0.0".to_string() }
fn default_db_path() -> String { "./media-admin.db".to_string() }
fn default_web_path() -> String { "http://localhost:8080".to_string() }
fn default_features() -> Vec<String> { vec!["access_control".to_string()] }
fn default_granted_level() -> i64 { 100 }
fn default_cors_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:8080".to_string(),
    ]
}

pub fn validate(cfg: &Config) -> Result<()> {
    if cfg.site.web_path.ends_with('/') {
        anyhow::bail!(
            "CONFIG ERROR: site.web_path must not end with a slash (got {})",
            cfg.site.web_path
        );
    }

    // Validate database path directory exists or can be created
    if let Some(parent) = std::path::Path::new(&cfg.database.path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            anyhow::bail!(
                "CONFIG ERROR: Database directory does not exist: {}",
                parent.display()
            );
        }
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}

pub fn load() -> Result<Config> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("MEDIA_ADMIN").separator("__"))
        .set_default("api.bind", "0.0.0.0")?
        .set_default("api.port", 8080)?
        .set_default("database.path", "./media-admin.db")?
        .set_default("site.web_path", "http://localhost:8080")?
        .set_default("site.features", vec!["access_control"])?
        .set_default("site.granted_level", 100)?
        .build()?
        .try_deserialize()?;

    validate(&cfg)?;

    Ok(cfg)
}
