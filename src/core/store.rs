use crate::domain::model::DomainRecord;
use crate::domain::ports::Storage;
use crate::utils::error::{DirectoryError, Result};

pub const DEFAULT_DATA_FILE: &str = "domains.json";

/// 以單一 JSON 檔為後端的網域目錄，依插入順序保存
pub struct DomainStore<S: Storage> {
    storage: S,
    path: String,
    records: Vec<DomainRecord>,
}

impl<S: Storage> DomainStore<S> {
    /// 建立並載入目錄；檔案不存在時從空目錄開始
    pub async fn open(storage: S, path: impl Into<String>) -> Result<Self> {
        let mut store = Self {
            storage,
            path: path.into(),
            records: Vec::new(),
        };
        store.load().await?;
        Ok(store)
    }

    pub async fn load(&mut self) -> Result<()> {
        if !self
            .storage
            .exists(&self.path)
            .await
            .map_err(|e| self.storage_error(e))?
        {
            tracing::debug!("{} does not exist yet, starting empty", self.path);
            self.records.clear();
            return Ok(());
        }

        let data = self
            .storage
            .read_file(&self.path)
            .await
            .map_err(|e| self.storage_error(e))?;
        self.records = serde_json::from_slice(&data).map_err(|e| self.storage_error(e.into()))?;
        tracing::debug!("Loaded {} records from {}", self.records.len(), self.path);
        Ok(())
    }

    /// 新增後立即整份覆寫到檔案
    pub async fn append(&mut self, record: DomainRecord) -> Result<()> {
        self.records.push(record);
        self.save().await
    }

    pub async fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)
            .map_err(|e| self.storage_error(e.into()))?;
        self.storage
            .write_file(&self.path, json.as_bytes())
            .await
            .map_err(|e| self.storage_error(e))?;
        tracing::debug!("Saved {} records to {}", self.records.len(), self.path);
        Ok(())
    }

    pub fn records(&self) -> &[DomainRecord] {
        &self.records
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn storage_error(&self, e: DirectoryError) -> DirectoryError {
        match e {
            DirectoryError::StorageError { .. } => e,
            other => DirectoryError::StorageError {
                path: self.path.clone(),
                message: other.to_string(),
            },
        }
    }
}
