use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unsupported file type: {extension}")]
    UnsupportedFileType { extension: String },

    #[error("Cannot read domain list '{path}': {message}")]
    SourceError { path: String, message: String },

    #[error("Failed to parse '{path}': {message}")]
    ParseError { path: String, message: String },

    #[error("WHOIS query to {server} failed: {message}")]
    NetworkError { server: String, message: String },

    #[error("WHOIS query to {server} timed out after {millis}ms")]
    TimeoutError { server: String, millis: u128 },

    #[error("Storage error on '{path}': {message}")]
    StorageError { path: String, message: String },

    #[error("Prompt failed: {message}")]
    PromptError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Parse,
    Network,
    Storage,
    Config,
    Interaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DirectoryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DirectoryError::UnsupportedFileType { .. }
            | DirectoryError::SourceError { .. }
            | DirectoryError::CsvError(_) => ErrorCategory::Input,
            DirectoryError::ZipError(_)
            | DirectoryError::XmlError(_)
            | DirectoryError::ParseError { .. } => ErrorCategory::Parse,
            DirectoryError::NetworkError { .. } | DirectoryError::TimeoutError { .. } => {
                ErrorCategory::Network
            }
            DirectoryError::IoError(_)
            | DirectoryError::SerializationError(_)
            | DirectoryError::StorageError { .. } => ErrorCategory::Storage,
            DirectoryError::PromptError { .. } => ErrorCategory::Interaction,
            DirectoryError::ConfigError { .. }
            | DirectoryError::ConfigValidationError { .. }
            | DirectoryError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤只影響單一網域，欄位留空即可
            ErrorCategory::Network => ErrorSeverity::Low,
            ErrorCategory::Parse => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Config | ErrorCategory::Interaction => {
                ErrorSeverity::High
            }
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 是否應中止整個執行
    pub fn is_fatal(&self) -> bool {
        self.severity() >= ErrorSeverity::High
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Use a .txt, .csv, .xls or .xlsx file and check that it is readable",
            ErrorCategory::Parse => "Re-save the spreadsheet as .xlsx or export it as CSV",
            ErrorCategory::Network => "Check network access; fields can also be filled in manually",
            ErrorCategory::Storage => "Check that the data file is valid JSON and writable",
            ErrorCategory::Config => "Review the configuration file and command line flags",
            ErrorCategory::Interaction => "Run the command from an interactive terminal",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DirectoryError::UnsupportedFileType { extension } => {
                format!("Unsupported file type: {}", extension)
            }
            DirectoryError::ParseError { path, .. } => {
                format!("Could not read domains from '{}'", path)
            }
            DirectoryError::StorageError { path, message } => {
                format!("Domain directory '{}' is unusable: {}", path, message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
