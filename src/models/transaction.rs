use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::validate::{integer_string, lenient_f64, non_empty, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReceiptStatus {
    Success,
    Failed,
}

impl ReceiptStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReceiptStatus::Success => "Success",
            ReceiptStatus::Failed => "Failed",
        }
    }
}

impl<'de> Deserialize<'de> for ReceiptStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = lenient_f64(deserializer)?;
        Ok(if code == 1.0 {
            ReceiptStatus::Success
        } else {
            ReceiptStatus::Failed
        })
    }
}

/// Native-coin transfer as listed by the aggregation API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    /// Wei-denominated integer, kept as text to avoid float loss
    #[serde(deserialize_with = "integer_string")]
    pub value: String,
    #[serde(default = "default_status")]
    pub receipt_status: ReceiptStatus,
    #[serde(default)]
    pub chain: Option<String>,
    #[serde(default)]
    pub block_timestamp: Option<DateTime<Utc>>,
}

fn default_status() -> ReceiptStatus {
    ReceiptStatus::Failed
}

impl Validate for Transaction {
    fn validate(&self) -> Result<(), String> {
        non_empty("hash", &self.hash)?;
        non_empty("from", &self.from)?;
        if self.value.is_empty() || !self.value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("value {:?} is not an unsigned integer", self.value));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_string_and_numeric_status() {
        let a: Transaction = serde_json::from_str(
            r#"{"hash":"0x1","from":"0xa","to":"0xb","value":"1000000000000000000",
                "receiptStatus":"1","chain":"eth","blockTimestamp":"2024-03-01T12:00:00.000Z"}"#,
        )
        .unwrap();
        let b: Transaction = serde_json::from_str(
            r#"{"hash":"0x2","from":"0xa","to":null,"value":0,"receiptStatus":0}"#,
        )
        .unwrap();
        assert_eq!(a.receipt_status, ReceiptStatus::Success);
        assert!(a.block_timestamp.is_some());
        assert_eq!(b.receipt_status, ReceiptStatus::Failed);
        assert_eq!(b.value, "0");
        assert!(b.to.is_none());
    }

    #[test]
    fn fractional_value_fails_validation() {
        let tx: Transaction = serde_json::from_str(
            r#"{"hash":"0x3","from":"0xa","to":"0xb","value":"1.5","receiptStatus":1}"#,
        )
        .unwrap();
        assert!(tx.validate().is_err());
    }
}
