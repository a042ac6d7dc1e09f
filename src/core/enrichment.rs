use crate::domain::model::DomainRecord;
use crate::domain::ports::Prompter;
use crate::utils::error::Result;

/// 逐欄位詢問覆寫值：空白回應保留原值，其他回應取去空白後的內容
pub fn enrich<P: Prompter + ?Sized>(record: &mut DomainRecord, prompter: &mut P) -> Result<()> {
    for (label, value) in record.editable_fields_mut() {
        let response = prompter.ask(label, value)?;
        let response = response.trim();
        if !response.is_empty() {
            *value = response.to_string();
        }
    }
    Ok(())
}
