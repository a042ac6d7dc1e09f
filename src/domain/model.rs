use serde::{Deserialize, Serialize};

/// 目錄中的一筆網域資料，所有欄位皆為字串，不做型別轉換
///
/// 載入時缺少的欄位以空字串補上、未知欄位忽略，只有 `domain` 為必要欄位。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub domain: String,
    #[serde(default, alias = "appraisalValue")]
    pub appraisal_value: String,
    #[serde(default, alias = "renewalStatus")]
    pub renewal_status: String,
    #[serde(default, alias = "expirationDate")]
    pub expiration_date: String,
    #[serde(default, alias = "nameServer")]
    pub name_server: String,
    #[serde(default, alias = "registrationDate")]
    pub registration_date: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, alias = "adminEmail")]
    pub admin_email: String,
    #[serde(default, alias = "domainNote")]
    pub domain_note: String,
    #[serde(default, alias = "totalSearch30d")]
    pub total_search_30d: String,
    #[serde(default, alias = "totalSearch180d")]
    pub total_search_180d: String,
    #[serde(default, alias = "uniqueSearch30d")]
    pub unique_search_30d: String,
    #[serde(default, alias = "uniqueSearch180d")]
    pub unique_search_180d: String,
}

impl DomainRecord {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// 可由使用者覆寫的欄位，依提示順序排列
    ///
    /// `admin_email` 與 `domain_note` 保留給日後手動使用，不在此列。
    pub fn editable_fields_mut(&mut self) -> [(&'static str, &mut String); 9] {
        [
            ("Appraisal Value", &mut self.appraisal_value),
            ("Renewal Status", &mut self.renewal_status),
            ("Expiration Date", &mut self.expiration_date),
            ("Name Server", &mut self.name_server),
            ("Registration Date", &mut self.registration_date),
            ("Total Search Last 30 Days", &mut self.total_search_30d),
            ("Total Search Last 180 Days", &mut self.total_search_180d),
            ("Unique Search Last 30 Days", &mut self.unique_search_30d),
            ("Unique Search Last 180 Days", &mut self.unique_search_180d),
        ]
    }
}

/// WHOIS 回應中可擷取的欄位
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhoisFields {
    pub registration_date: Option<String>,
    pub expiration_date: Option<String>,
    pub name_servers: Vec<String>,
}

impl WhoisFields {
    pub fn apply_to(self, record: &mut DomainRecord) {
        if let Some(date) = self.registration_date {
            record.registration_date = date;
        }
        if let Some(date) = self.expiration_date {
            record.expiration_date = date;
        }
        if !self.name_servers.is_empty() {
            record.name_server = self.name_servers.join(",");
        }
    }
}
