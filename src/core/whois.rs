//! Two-hop WHOIS resolution: a referral query to the root authority, then a
//! query to the registry it names. Field extraction is kept free of I/O.

use crate::domain::model::{DomainRecord, WhoisFields};
use crate::domain::ports::{ConfigProvider, WhoisTransport};
use crate::utils::error::Result;
use chrono::{SecondsFormat, Utc};

pub const DEFAULT_ROOT_SERVER: &str = "whois.iana.org";

/// 第一行以 `whois:` 開頭（不分大小寫）者，冒號後的主機名即為權威伺服器
pub fn parse_referral(response: &str) -> Option<String> {
    response
        .lines()
        .map(str::trim_start)
        .find(|line| line.to_ascii_lowercase().starts_with("whois:"))
        .and_then(value_after_colon)
        .filter(|server| !server.is_empty())
}

/// 逐行擷取日期與 name server，日期以最後一筆為準，name server 全部累積
///
/// 值為空白的 `Name Server:` 行會被略過，合併結果不會出現 `ns1,` 這類空項目。
pub fn extract_fields(response: &str) -> WhoisFields {
    let mut fields = WhoisFields::default();

    for line in response.lines() {
        let Some(value) = value_after_colon(line) else {
            continue;
        };

        if line.contains("Creation Date") || line.contains("Registered On") {
            fields.registration_date = Some(value);
        } else if line.contains("Expiry Date") || line.contains("Expiration Date") {
            fields.expiration_date = Some(value);
        } else if line.trim_start().to_ascii_lowercase().starts_with("name server") && !value.is_empty() {
            fields.name_servers.push(value);
        }
    }

    fields
}

fn value_after_colon(line: &str) -> Option<String> {
    line.split_once(':').map(|(_, value)| value.trim().to_string())
}

pub struct WhoisResolver<T: WhoisTransport> {
    transport: T,
    root_server: String,
}

impl<T: WhoisTransport> WhoisResolver<T> {
    pub fn new(transport: T, root_server: impl Into<String>) -> Self {
        Self {
            transport,
            root_server: root_server.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(transport: T, config: &C) -> Self {
        Self::new(transport, config.whois_root_server())
    }

    /// 永不失敗：任何網路錯誤都只會讓 WHOIS 欄位維持空白
    pub async fn resolve(&self, domain: &str) -> DomainRecord {
        let mut record = DomainRecord::new(domain);
        record.timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        match self.lookup(domain).await {
            Ok(Some(fields)) => fields.apply_to(&mut record),
            Ok(None) => tracing::debug!("No WHOIS referral found for {}", domain),
            Err(e) => tracing::debug!("WHOIS lookup for {} failed: {}", domain, e),
        }

        record
    }

    async fn lookup(&self, domain: &str) -> Result<Option<WhoisFields>> {
        let referral = self.transport.query(&self.root_server, domain).await?;
        let Some(server) = parse_referral(&referral) else {
            return Ok(None);
        };

        tracing::debug!("{} is served by {}", domain, server);
        let response = self.transport.query(&server, domain).await?;
        Ok(Some(extract_fields(&response)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::DirectoryError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const IANA_COM: &str = "% IANA WHOIS server\n\ndomain:       COM\n\nwhois:        whois.verisign-grs.com\n\nstatus:       ACTIVE\n";

    const VERISIGN_EXAMPLE: &str = "   Domain Name: EXAMPLE.COM\r\n   Registry Domain ID: 2336799_DOMAIN_COM-VRSN\r\n   Creation Date: 1995-08-14T04:00:00Z\r\n   Registry Expiry Date: 2025-08-13T04:00:00Z\r\n   Name Server: A.IANA-SERVERS.NET\r\n   Name Server: B.IANA-SERVERS.NET\r\n";

    struct CannedTransport {
        responses: HashMap<String, String>,
        queried: Mutex<Vec<String>>,
    }

    impl CannedTransport {
        fn new(responses: &[(&str, &str)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(server, body)| (server.to_string(), body.to_string()))
                    .collect(),
                queried: Mutex::new(Vec::new()),
            }
        }

        fn queried(&self) -> Vec<String> {
            self.queried.lock().unwrap().clone()
        }
    }

    impl WhoisTransport for CannedTransport {
        async fn query(&self, server: &str, _query: &str) -> Result<String> {
            self.queried.lock().unwrap().push(server.to_string());
            self.responses
                .get(server)
                .cloned()
                .ok_or_else(|| DirectoryError::NetworkError {
                    server: server.to_string(),
                    message: "connection refused".to_string(),
                })
        }
    }

    #[test]
    fn test_parse_referral_is_case_insensitive() {
        assert_eq!(
            parse_referral(IANA_COM),
            Some("whois.verisign-grs.com".to_string())
        );
        assert_eq!(
            parse_referral("WHOIS: whois.nic.io\nwhois: later.example\n"),
            Some("whois.nic.io".to_string())
        );
    }

    #[test]
    fn test_parse_referral_missing_or_empty() {
        assert_eq!(parse_referral("domain: TEST\nstatus: ACTIVE\n"), None);
        assert_eq!(parse_referral("whois:   \n"), None);
        assert_eq!(parse_referral("refer-whois: nope\n"), None);
    }

    #[test]
    fn test_extract_fields_from_registry_response() {
        let fields = extract_fields(VERISIGN_EXAMPLE);
        assert_eq!(fields.registration_date.as_deref(), Some("1995-08-14T04:00:00Z"));
        assert_eq!(fields.expiration_date.as_deref(), Some("2025-08-13T04:00:00Z"));
        assert_eq!(fields.name_servers, vec!["A.IANA-SERVERS.NET", "B.IANA-SERVERS.NET"]);
    }

    #[test]
    fn test_last_date_line_wins_and_name_servers_accumulate() {
        let response = "Expiry Date: 2030-01-01\nName Server: ns1.a.net\nname server: ns2.a.net\nRegistrar Registration Expiration Date: 2031-02-02\nNAME SERVER: ns1.a.net\n";
        let fields = extract_fields(response);

        assert_eq!(fields.expiration_date.as_deref(), Some("2031-02-02"));
        assert_eq!(fields.name_servers, vec!["ns1.a.net", "ns2.a.net", "ns1.a.net"]);
    }

    #[test]
    fn test_registered_on_and_lines_without_colon() {
        let response = "Registered On 2001\nRegistered On: 12-Mar-2001\nName Server\n";
        let fields = extract_fields(response);

        assert_eq!(fields.registration_date.as_deref(), Some("12-Mar-2001"));
        assert!(fields.name_servers.is_empty());
    }

    #[test]
    fn test_empty_name_server_values_are_skipped() {
        let response = "Name Server: ns1.a.net\nName Server:\nName Server:    \nName Server: ns2.a.net\n";
        let fields = extract_fields(response);

        assert_eq!(fields.name_servers, vec!["ns1.a.net", "ns2.a.net"]);
    }

    #[tokio::test]
    async fn test_resolve_follows_referral() {
        let transport = CannedTransport::new(&[
            (DEFAULT_ROOT_SERVER, IANA_COM),
            ("whois.verisign-grs.com", VERISIGN_EXAMPLE),
        ]);
        let resolver = WhoisResolver::new(transport, DEFAULT_ROOT_SERVER);

        let record = resolver.resolve("example.com").await;

        assert_eq!(record.domain, "example.com");
        assert!(!record.timestamp.is_empty());
        assert_eq!(record.registration_date, "1995-08-14T04:00:00Z");
        assert_eq!(record.expiration_date, "2025-08-13T04:00:00Z");
        assert_eq!(record.name_server, "A.IANA-SERVERS.NET,B.IANA-SERVERS.NET");
        assert_eq!(
            resolver.transport.queried(),
            vec![DEFAULT_ROOT_SERVER, "whois.verisign-grs.com"]
        );
    }

    #[tokio::test]
    async fn test_resolve_without_referral_makes_one_query() {
        let transport = CannedTransport::new(&[(DEFAULT_ROOT_SERVER, "domain: LOCAL\n")]);
        let resolver = WhoisResolver::new(transport, DEFAULT_ROOT_SERVER);

        let record = resolver.resolve("intranet.local").await;

        assert_eq!(record.domain, "intranet.local");
        assert!(!record.timestamp.is_empty());
        assert_eq!(
            record,
            DomainRecord {
                domain: "intranet.local".to_string(),
                timestamp: record.timestamp.clone(),
                ..DomainRecord::default()
            }
        );
        assert_eq!(resolver.transport.queried(), vec![DEFAULT_ROOT_SERVER]);
    }

    #[tokio::test]
    async fn test_resolve_swallows_network_failure() {
        let transport = CannedTransport::new(&[(DEFAULT_ROOT_SERVER, IANA_COM)]);
        let resolver = WhoisResolver::new(transport, DEFAULT_ROOT_SERVER);

        let record = resolver.resolve("example.com").await;

        assert_eq!(record.expiration_date, "");
        assert_eq!(record.name_server, "");
        assert!(!record.timestamp.is_empty());
    }
}
