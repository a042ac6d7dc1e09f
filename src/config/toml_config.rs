use crate::core::store::DEFAULT_DATA_FILE;
use crate::core::whois::DEFAULT_ROOT_SERVER;
use crate::core::ConfigProvider;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_WHOIS_PORT: u16 = 43;
const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub whois: WhoisConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub data_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhoisConfig {
    pub root_server: Option<String>,
    pub port: Option<u16>,
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| DirectoryError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WHOIS_SERVER})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DirectoryError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("directory.data_file", self.data_file())?;
        validate_non_empty_string("whois.root_server", self.whois_root_server())?;
        validate_range("whois.port", self.whois_port(), 1, u16::MAX)?;
        validate_range(
            "whois.timeout_seconds",
            self.whois.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            1,
            300,
        )?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn data_file(&self) -> &str {
        self.directory.data_file.as_deref().unwrap_or(DEFAULT_DATA_FILE)
    }

    fn whois_root_server(&self) -> &str {
        self.whois.root_server.as_deref().unwrap_or(DEFAULT_ROOT_SERVER)
    }

    fn whois_port(&self) -> u16 {
        self.whois.port.unwrap_or(DEFAULT_WHOIS_PORT)
    }

    fn whois_timeout(&self) -> Duration {
        Duration::from_secs(self.whois.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = TomlConfig::default();
        assert_eq!(config.data_file(), "domains.json");
        assert_eq!(config.whois_root_server(), "whois.iana.org");
        assert_eq!(config.whois_port(), 43);
        assert_eq!(config.whois_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[whois]
timeout_seconds = 10
"#,
        )
        .unwrap();

        assert_eq!(config.whois_timeout(), Duration::from_secs(10));
        assert_eq!(config.data_file(), "domains.json");
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("DOMAIN_DIRECTORY_TEST_FILE", "/tmp/portfolio.json");
        let config = TomlConfig::from_toml_str(
            r#"
[directory]
data_file = "${DOMAIN_DIRECTORY_TEST_FILE}"

[whois]
root_server = "${DOMAIN_DIRECTORY_UNSET_VAR}"
"#,
        )
        .unwrap();

        assert_eq!(config.data_file(), "/tmp/portfolio.json");
        assert_eq!(config.whois_root_server(), "${DOMAIN_DIRECTORY_UNSET_VAR}");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = TomlConfig::default();
        config.whois.timeout_seconds = Some(0);
        assert!(config.validate().is_err());

        let mut config = TomlConfig::default();
        config.whois.root_server = Some("  ".to_string());
        assert!(config.validate().is_err());

        let mut config = TomlConfig::default();
        config.directory.data_file = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[whois\nport = ");
        assert!(matches!(
            result,
            Err(DirectoryError::ConfigValidationError { .. })
        ));
    }
}
