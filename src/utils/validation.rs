use crate::utils::error::{DirectoryError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 副檔名比對不分大小寫，不支援的副檔名一律視為輸入錯誤
pub fn validate_file_extension(file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let extension = Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if allowed_extensions.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(DirectoryError::UnsupportedFileType {
            extension: format!(".{}", ext),
        }),
        None => Err(DirectoryError::UnsupportedFileType {
            extension: String::new(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data_file", "domains.json").is_ok());
        assert!(validate_path("data_file", "").is_err());
        assert!(validate_path("data_file", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["txt", "csv", "xls", "xlsx"];
        assert!(validate_file_extension("domains.txt", &allowed).is_ok());
        assert!(validate_file_extension("DOMAINS.XLSX", &allowed).is_ok());

        match validate_file_extension("domains.pdf", &allowed) {
            Err(DirectoryError::UnsupportedFileType { extension }) => assert_eq!(extension, ".pdf"),
            other => panic!("expected unsupported file type, got {:?}", other),
        }
        assert!(validate_file_extension("domains", &allowed).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("whois.timeout_seconds", 5, 1, 300).is_ok());
        assert!(validate_range("whois.timeout_seconds", 0, 1, 300).is_err());
        assert!(validate_range("whois.port", 70000u32, 1, 65535).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("whois.root_server", "whois.iana.org").is_ok());
        assert!(validate_non_empty_string("whois.root_server", "   ").is_err());
    }
}
