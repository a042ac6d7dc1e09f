pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LocalStorage, TomlConfig};

pub use adapters::prompt::LinePrompter;
pub use adapters::whois_tcp::TcpWhoisTransport;
pub use crate::core::{
    engine::DirectoryEngine, pipeline::DirectoryPipeline, store::DomainStore,
    whois::WhoisResolver,
};
pub use domain::model::DomainRecord;
pub use utils::error::{DirectoryError, Result};
