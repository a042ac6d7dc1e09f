use crate::domain::ports::DomainSource;
use crate::utils::error::{DirectoryError, Result};
use std::path::Path;

/// 每行一個網域，去除前後空白並略過空行
#[derive(Debug, Default, Clone, Copy)]
pub struct TextListReader;

impl TextListReader {
    pub fn parse(content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl DomainSource for TextListReader {
    fn read_domains(&self, path: &Path) -> Result<Vec<String>> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DirectoryError::SourceError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::parse(&content))
    }
}
