use crate::domain::model::DomainRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

/// WHOIS 網路邊界：送出查詢字串，讀取完整回應直到對方關閉連線
pub trait WhoisTransport: Send + Sync {
    fn query(
        &self,
        server: &str,
        query: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// 產生網域名稱清單的來源（文字檔、CSV、試算表）
pub trait DomainSource {
    fn read_domains(&self, path: &Path) -> Result<Vec<String>>;
}

pub trait Prompter: Send {
    /// 回傳使用者的原始輸入，空白輸入代表保留目前的值
    fn ask(&mut self, label: &str, current: &str) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn data_file(&self) -> &str;
    fn whois_root_server(&self) -> &str;
    fn whois_port(&self) -> u16;
    fn whois_timeout(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send {
    async fn extract(&mut self) -> Result<Vec<String>>;
    async fn transform(&mut self, domain: &str) -> Result<DomainRecord>;
    async fn load(&mut self, record: DomainRecord) -> Result<()>;
}
