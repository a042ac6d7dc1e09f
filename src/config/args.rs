use crate::adapters::sources::SUPPORTED_EXTENSIONS;
use crate::config::toml_config::TomlConfig;
use crate::core::pipeline::AddRequest;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "domain-directory")]
#[command(about = "Manage a local directory of domain names")]
pub struct CliConfig {
    /// Domains to add manually
    #[arg(long, num_args = 0..)]
    pub add: Vec<String>,

    /// Load domains from a .txt, .csv, .xls or .xlsx file
    #[arg(long)]
    pub file: Option<String>,

    /// List stored domains after any additions
    #[arg(long)]
    pub list: bool,

    /// Directory file (overrides the config file)
    #[arg(long)]
    pub data_file: Option<String>,

    /// Path to TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn add_request(&self) -> AddRequest {
        AddRequest {
            manual: self.add.clone(),
            file: self.file.as_ref().map(PathBuf::from),
        }
    }

    /// 載入 TOML 配置（若有）並套用命令列覆蓋
    pub fn resolve_settings(&self) -> Result<TomlConfig> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(data_file) = &self.data_file {
            settings.directory.data_file = Some(data_file.clone());
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(file) = &self.file {
            validate_path("file", file)?;
            validate_file_extension(file, &SUPPORTED_EXTENSIONS)?;
        }
        if let Some(data_file) = &self.data_file {
            validate_path("data_file", data_file)?;
        }
        Ok(())
    }
}
