pub mod engine;
pub mod enrichment;
pub mod pipeline;
pub mod store;
pub mod whois;

pub use crate::domain::model::{DomainRecord, WhoisFields};
pub use crate::domain::ports::{
    ConfigProvider, DomainSource, Pipeline, Prompter, Storage, WhoisTransport,
};
pub use crate::utils::error::Result;
