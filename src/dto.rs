use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Successful,
    Failed,
    Unauthorized,
    Aborted,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Successful => "SUCCESSFUL",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Unauthorized => "UNAUTHORIZED",
            TransactionStatus::Aborted => "ABORTED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUCCESSFUL" => Ok(TransactionStatus::Successful),
            "FAILED" => Ok(TransactionStatus::Failed),
            "UNAUTHORIZED" => Ok(TransactionStatus::Unauthorized),
            "ABORTED" => Ok(TransactionStatus::Aborted),
            other => Err(format!("unknown transaction status: {other}")),
        }
    }
}

/// A single transfer attempt between two parties.
///
/// Values are immutable once built; [`Transaction::with_status`] produces a
/// copy carrying a different status. Two transactions are equal only when
/// every field matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    id: u32,
    status: TransactionStatus,
    from: String,
    to: String,
    #[serde(with = "rust_decimal::serde::str")]
    amount: Decimal,
}

impl Transaction {
    pub fn new(
        id: u32,
        status: TransactionStatus,
        from: impl Into<String>,
        to: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id,
            status,
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Sender name.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Receiver name.
    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn with_status(&self, status: TransactionStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}
