use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use anyhow::Result;
use crate::cli::ConfigCommands;
use crate::error::MorphError;
use crate::payload::merge::BooleanTokens;

const ENV_PREFIX: &str = "MORPH";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub payload: PayloadConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneralConfig {
    /// Name of the remote appliance payloads are assembled for
    pub appliance: Option<String>,
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PayloadConfig {
    pub compact: bool,
    pub booleanize: bool,
    pub true_tokens: Vec<String>,
    pub false_tokens: Vec<String>,
    pub pretty: bool,
}

impl PayloadConfig {
    pub fn boolean_tokens(&self) -> BooleanTokens {
        BooleanTokens::new(self.true_tokens.clone(), self.false_tokens.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
        let config_dir = home_dir.join(".config/morph");
        let data_dir = home_dir.join(".local/share/morph");
        let tokens = BooleanTokens::default();

        Config {
            general: GeneralConfig {
                appliance: None,
                config_dir,
                data_dir,
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
            },
            payload: PayloadConfig {
                compact: true,
                booleanize: true,
                true_tokens: tokens.truthy,
                false_tokens: tokens.falsy,
                pretty: true,
            },
        }
    }
}

impl Config {
    /// Layer defaults, the TOML file (if present) and `MORPH_<SECTION>__<KEY>`
    /// environment variables, later layers winning.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        Self::build(path, true)
    }

    /// Defaults plus the TOML file only. Used when the result is written back,
    /// so environment overrides never end up on disk.
    pub async fn load_file_layers(path: Option<&Path>) -> Result<Self> {
        Self::build(path, false)
    }

    fn build(path: Option<&Path>, with_env: bool) -> Result<Self> {
        let config_path = Self::resolve_path(path);

        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default()).map_err(MorphError::from)?)
            .add_source(config::File::from(config_path.as_path()).required(false));
        if with_env {
            builder = builder.add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("payload.true_tokens")
                    .with_list_parse_key("payload.false_tokens")
                    .try_parsing(true),
            );
        }

        let settings = builder.build().map_err(MorphError::from)?;
        let config: Config = settings.try_deserialize().map_err(MorphError::from)?;
        Ok(config)
    }

    pub async fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = Self::resolve_path(path);

        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(self)?;
        tokio::fs::write(&config_path, content).await?;

        Ok(())
    }

    pub fn get_config_path() -> PathBuf {
        let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
        home_dir.join(".config/morph/config.toml")
    }

    fn resolve_path(path: Option<&Path>) -> PathBuf {
        path.map(Path::to_path_buf).unwrap_or_else(Self::get_config_path)
    }

    pub fn get_value(&self, key: &str) -> Option<String> {
        match key {
            "general.appliance" => self.general.appliance.clone(),
            "general.config_dir" => Some(self.general.config_dir.display().to_string()),
            "general.data_dir" => Some(self.general.data_dir.display().to_string()),
            "logging.level" => Some(self.logging.level.clone()),
            "payload.compact" => Some(self.payload.compact.to_string()),
            "payload.booleanize" => Some(self.payload.booleanize.to_string()),
            "payload.true_tokens" => Some(self.payload.true_tokens.join(",")),
            "payload.false_tokens" => Some(self.payload.false_tokens.join(",")),
            "payload.pretty" => Some(self.payload.pretty.to_string()),
            _ => None,
        }
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "general.appliance" => {
                self.general.appliance = if value.is_empty() { None } else { Some(value.to_string()) };
            }
            "general.config_dir" => {
                self.general.config_dir = PathBuf::from(value);
            }
            "general.data_dir" => {
                self.general.data_dir = PathBuf::from(value);
            }
            "logging.level" => {
                self.logging.level = value.to_string();
            }
            "payload.compact" => {
                self.payload.compact = parse_flag(key, value)?;
            }
            "payload.booleanize" => {
                self.payload.booleanize = parse_flag(key, value)?;
            }
            "payload.true_tokens" => {
                self.payload.true_tokens = parse_tokens(value);
            }
            "payload.false_tokens" => {
                self.payload.false_tokens = parse_tokens(value);
            }
            "payload.pretty" => {
                self.payload.pretty = parse_flag(key, value)?;
            }
            _ => {
                return Err(MorphError::invalid_config(key, "Unknown configuration key").into());
            }
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    BooleanTokens::default()
        .resolve(value)
        .ok_or_else(|| MorphError::invalid_config(key, "Expected true/false or on/off").into())
}

fn parse_tokens(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn handle_command(cmd: &ConfigCommands, path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load(path).await?;
            let content = toml::to_string_pretty(&config)?;
            println!("{}", content);
        }
        ConfigCommands::Init => {
            let config = Config::default();
            config.save(path).await?;
            println!("✅ Configuration initialized at: {:?}", Config::resolve_path(path));
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_file_layers(path).await?;
            config.set_value(key, value)?;
            config.save(path).await?;
            println!("✅ Set {} = {}", key, value);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(path).await?;
            if let Some(value) = config.get_value(key) {
                println!("{}", value);
            } else {
                eprintln!("❌ Configuration key '{}' not found", key);
            }
        }
    }
    Ok(())
}
