use crate::domain::ports::DomainSource;
use crate::utils::error::{DirectoryError, Result};
use std::io::Read;
use std::path::Path;

/// CSV 清單：每列只取第一個欄位，原樣保留不去空白
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvListReader;

impl CsvListReader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<String>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let mut domains = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            // 空行不會產生欄位
            if let Some(first) = row.get(0) {
                domains.push(first.to_string());
            }
        }
        Ok(domains)
    }
}

impl DomainSource for CsvListReader {
    fn read_domains(&self, path: &Path) -> Result<Vec<String>> {
        let file = std::fs::File::open(path).map_err(|e| DirectoryError::SourceError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(file)
    }
}
