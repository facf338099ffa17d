use crate::models::{same_address, ReceiptStatus, Transaction};
use crate::utils::helper::{format_units, NATIVE_DECIMALS};

/// Fixed decimals shown for native amounts
pub const AMOUNT_PRECISION: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Incoming => "IN",
            Direction::Outgoing => "OUT",
        }
    }
}

/// Incoming when the recipient is the viewed address, ignoring case
pub fn classify(tx: &Transaction, viewed_address: &str) -> Direction {
    match tx.to.as_deref() {
        Some(to) if same_address(to, viewed_address) => Direction::Incoming,
        _ => Direction::Outgoing,
    }
}

/// Wei string → native coin amount, e.g. `"1000000000000000000"` → `"1.0000"`
pub fn format_amount(raw_value: &str) -> String {
    format_units(raw_value, NATIVE_DECIMALS, AMOUNT_PRECISION).unwrap_or_else(|| "N/A".to_string())
}

pub fn native_symbol(chain: Option<&str>) -> &'static str {
    match chain.map(str::to_ascii_lowercase).as_deref() {
        Some("bsc") | Some("0x38") => "BNB",
        Some("polygon") | Some("matic") | Some("0x89") => "MATIC",
        Some("avalanche") | Some("0xa86a") => "AVAX",
        Some("fantom") | Some("0xfa") => "FTM",
        _ => "ETH",
    }
}

/// Block explorer link for a transaction hash
pub fn explorer_url(chain: Option<&str>, hash: &str) -> String {
    let host = match chain.map(str::to_ascii_lowercase).as_deref() {
        Some("bsc") | Some("0x38") => "bscscan.com",
        Some("polygon") | Some("matic") | Some("0x89") => "polygonscan.com",
        Some("arbitrum") | Some("0xa4b1") => "arbiscan.io",
        Some("base") | Some("0x2105") => "basescan.org",
        _ => "etherscan.io",
    };
    format!("https://{}/tx/{}", host, hash)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub hash: String,
    pub direction: Direction,
    pub from: String,
    pub to: Option<String>,
    /// The other side of the transfer relative to the viewed address
    pub counterparty: Option<String>,
    pub amount: String,
    pub symbol: &'static str,
    pub status: ReceiptStatus,
    pub chain: Option<String>,
    pub timestamp: Option<String>,
    pub explorer_url: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionList {
    pub rows: Vec<TransactionRow>,
    pub incoming: usize,
    pub outgoing: usize,
}

impl TransactionList {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn transaction_row(tx: &Transaction, viewed_address: &str) -> TransactionRow {
    let direction = classify(tx, viewed_address);
    let counterparty = match direction {
        Direction::Incoming => Some(tx.from.clone()),
        Direction::Outgoing => tx.to.clone(),
    };

    TransactionRow {
        hash: tx.hash.clone(),
        direction,
        from: tx.from.clone(),
        to: tx.to.clone(),
        counterparty,
        amount: format_amount(&tx.value),
        symbol: native_symbol(tx.chain.as_deref()),
        status: tx.receipt_status,
        chain: tx.chain.clone(),
        timestamp: tx
            .block_timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        explorer_url: explorer_url(tx.chain.as_deref(), &tx.hash),
    }
}

/// Rows in fetch order, with direction counts
pub fn transaction_list(transactions: &[Transaction], viewed_address: &str) -> TransactionList {
    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|tx| transaction_row(tx, viewed_address))
        .collect();
    let incoming = rows
        .iter()
        .filter(|r| r.direction == Direction::Incoming)
        .count();

    TransactionList {
        outgoing: rows.len() - incoming,
        incoming,
        rows,
    }
}
