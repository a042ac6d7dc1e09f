pub mod delimited;
pub mod spreadsheet;
pub mod text;

pub use delimited::CsvListReader;
pub use spreadsheet::SpreadsheetReader;
pub use text::TextListReader;

use crate::domain::ports::DomainSource;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::validate_file_extension;
use std::path::Path;

pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["txt", "csv", "xls", "xlsx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    Csv,
    Spreadsheet,
}

impl SourceKind {
    /// 依副檔名（不分大小寫）選擇讀取器
    pub fn from_path(path: &Path) -> Result<Self> {
        validate_file_extension(&path.to_string_lossy(), &SUPPORTED_EXTENSIONS)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "txt" => Ok(SourceKind::Text),
            "csv" => Ok(SourceKind::Csv),
            "xls" | "xlsx" => Ok(SourceKind::Spreadsheet),
            other => Err(DirectoryError::UnsupportedFileType {
                extension: format!(".{}", other),
            }),
        }
    }

    pub fn reader(self) -> Box<dyn DomainSource> {
        match self {
            SourceKind::Text => Box::new(TextListReader),
            SourceKind::Csv => Box::new(CsvListReader),
            SourceKind::Spreadsheet => Box::new(SpreadsheetReader),
        }
    }
}

/// 讀取網域清單檔
///
/// 試算表解析失敗只會回報並視為零筆，其他錯誤（不支援的副檔名、讀檔失敗）向上傳遞。
pub fn read_domain_file(path: &Path) -> Result<Vec<String>> {
    let kind = SourceKind::from_path(path)?;
    tracing::debug!("Reading {:?} domain list from {}", kind, path.display());

    match kind.reader().read_domains(path) {
        Ok(domains) => {
            tracing::info!("📄 Read {} domains from {}", domains.len(), path.display());
            Ok(domains)
        }
        Err(e @ DirectoryError::ParseError { .. }) => {
            tracing::error!("❌ Failed to read spreadsheet: {}", e);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}
