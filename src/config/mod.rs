pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub mod args;

#[cfg(feature = "cli")]
pub use args::CliConfig;
pub use cli::LocalStorage;
pub use toml_config::TomlConfig;
