use crate::domain::ports::{ConfigProvider, WhoisTransport};
use crate::utils::error::{DirectoryError, Result};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

pub const WHOIS_PORT: u16 = 43;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// RFC 3912 純文字 WHOIS：每次查詢開一條短連線，讀到對方關閉為止
#[derive(Debug, Clone)]
pub struct TcpWhoisTransport {
    port: u16,
    timeout: Duration,
}

impl TcpWhoisTransport {
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self { port, timeout }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.whois_port(), config.whois_timeout())
    }

    async fn exchange(&self, server: &str, query: &str) -> Result<String> {
        let network_error = |e: std::io::Error| DirectoryError::NetworkError {
            server: server.to_string(),
            message: e.to_string(),
        };

        let mut stream = TcpStream::connect((server, self.port))
            .await
            .map_err(network_error)?;
        stream
            .write_all(format!("{}\r\n", query).as_bytes())
            .await
            .map_err(network_error)?;

        let mut response = Vec::new();
        stream
            .read_to_end(&mut response)
            .await
            .map_err(network_error)?;

        Ok(String::from_utf8_lossy(&response).into_owned())
    }
}

impl Default for TcpWhoisTransport {
    fn default() -> Self {
        Self::new(WHOIS_PORT, DEFAULT_TIMEOUT)
    }
}

impl WhoisTransport for TcpWhoisTransport {
    async fn query(&self, server: &str, query: &str) -> Result<String> {
        tracing::debug!("WHOIS query '{}' -> {}:{}", query, server, self.port);

        // 逾時涵蓋連線、送出與讀取整段
        match timeout(self.timeout, self.exchange(server, query)).await {
            Ok(result) => result,
            Err(_) => Err(DirectoryError::TimeoutError {
                server: server.to_string(),
                millis: self.timeout.as_millis(),
            }),
        }
    }
}
