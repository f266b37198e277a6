use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "breed-gallery")]
#[command(about = "Browse dog breeds, their sub-breeds and images, and keep favorites")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Base URL of the breed API
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// Directory holding the favorites record
    #[arg(long, global = true)]
    pub favorites_dir: Option<String>,

    /// Name of the favorites record
    #[arg(long, global = true)]
    pub favorites_key: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all breeds
    Breeds,
    /// List the sub-breeds of a breed
    SubBreeds { breed: String },
    /// Resolve and print the gallery for a breed
    Show {
        breed: String,
        /// Sub-breeds to show instead of the default first one
        #[arg(long = "sub", value_delimiter = ',')]
        sub_breeds: Vec<String>,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Interactive session on stdin/stdout
    Browse,
}

#[derive(Debug, Clone, Subcommand)]
pub enum FavoritesAction {
    List,
    Toggle { image: String },
    Remove { image: String },
}

impl CliConfig {
    /// 合併預設值、設定檔與命令列參數，並驗證結果
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration from: {}", path);
            settings = settings.merge_file(&TomlConfig::from_file(path)?);
        }

        if let Some(api_base) = &self.api_base {
            settings.api_endpoint = api_base.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        if let Some(dir) = &self.favorites_dir {
            settings.favorites_dir = dir.clone();
        }
        if let Some(key) = &self.favorites_key {
            settings.favorites_key = key.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}
