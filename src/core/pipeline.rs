use crate::adapters::sources::read_domain_file;
use crate::core::enrichment::enrich;
use crate::core::store::DomainStore;
use crate::core::whois::WhoisResolver;
use crate::core::{DomainRecord, Pipeline, Prompter, Storage, WhoisTransport};
use crate::utils::error::Result;
use std::path::PathBuf;

/// 本次執行要新增的網域：手動輸入的名稱在前，檔案內容在後
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    pub manual: Vec<String>,
    pub file: Option<PathBuf>,
}

impl AddRequest {
    pub fn is_empty(&self) -> bool {
        self.manual.is_empty() && self.file.is_none()
    }
}

pub struct DirectoryPipeline<S: Storage, T: WhoisTransport, P: Prompter> {
    request: AddRequest,
    resolver: WhoisResolver<T>,
    prompter: P,
    store: DomainStore<S>,
}

impl<S: Storage, T: WhoisTransport, P: Prompter> DirectoryPipeline<S, T, P> {
    pub fn new(
        request: AddRequest,
        resolver: WhoisResolver<T>,
        prompter: P,
        store: DomainStore<S>,
    ) -> Self {
        Self {
            request,
            resolver,
            prompter,
            store,
        }
    }

    pub fn store(&self) -> &DomainStore<S> {
        &self.store
    }

    pub fn into_store(self) -> DomainStore<S> {
        self.store
    }
}

#[async_trait::async_trait]
impl<S: Storage, T: WhoisTransport, P: Prompter> Pipeline for DirectoryPipeline<S, T, P> {
    async fn extract(&mut self) -> Result<Vec<String>> {
        let mut domains = self.request.manual.clone();

        if let Some(path) = &self.request.file {
            domains.extend(read_domain_file(path)?);
        }

        Ok(domains)
    }

    async fn transform(&mut self, domain: &str) -> Result<DomainRecord> {
        let mut record = self.resolver.resolve(domain).await;

        println!("\nAdding domain: {}", domain);
        enrich(&mut record, &mut self.prompter)?;

        Ok(record)
    }

    async fn load(&mut self, record: DomainRecord) -> Result<()> {
        self.store.append(record).await?;
        println!("Domain stored.");
        Ok(())
    }
}
