use crate::money::Rupees;
use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Earning,
    Withdrawal,
    Deposit,
    Referral,
    TaskCreation,
    JobSubscription,
    JoiningFee,
    SpinPurchase,
    PendingDeposit,
}

impl TransactionKind {
    /// Pending deposits are recorded for the history but never move the balance.
    pub fn settles(self) -> bool {
        !matches!(self, TransactionKind::PendingDeposit)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Earning => "Earning",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Referral => "Referral",
            TransactionKind::TaskCreation => "Task Creation",
            TransactionKind::JobSubscription => "Job Subscription",
            TransactionKind::JoiningFee => "Joining Fee",
            TransactionKind::SpinPurchase => "Spin Purchase",
            TransactionKind::PendingDeposit => "Pending Deposit",
        };
        write!(f, "{label}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithdrawalMethod {
    EasyPaisa,
    JazzCash,
    BankTransfer,
}

impl WithdrawalMethod {
    pub const ALL: [WithdrawalMethod; 3] = [
        WithdrawalMethod::EasyPaisa,
        WithdrawalMethod::JazzCash,
        WithdrawalMethod::BankTransfer,
    ];
}

impl fmt::Display for WithdrawalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WithdrawalMethod::EasyPaisa => "EasyPaisa",
            WithdrawalMethod::JazzCash => "JazzCash",
            WithdrawalMethod::BankTransfer => "Bank Transfer",
        };
        write!(f, "{label}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalDetails {
    pub method: WithdrawalMethod,
    pub account_title: String,
    pub account_number: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Rupees,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawal_details: Option<WithdrawalDetails>,
}

/// Append-only transaction history with a running balance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    balance: Rupees,
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from its persisted halves without reconciling them.
    pub fn from_parts(balance: Rupees, transactions: Vec<Transaction>) -> Self {
        Self {
            balance,
            transactions,
        }
    }

    pub fn balance(&self) -> Rupees {
        self.balance
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn append(
        &mut self,
        kind: TransactionKind,
        description: impl Into<String>,
        amount: Rupees,
        withdrawal_details: Option<WithdrawalDetails>,
        at: DateTime<Utc>,
    ) -> &Transaction {
        let transaction = Transaction {
            id: self.next_id(at),
            kind,
            description: description.into(),
            amount,
            date: at,
            withdrawal_details,
        };
        if kind.settles() {
            self.balance += amount;
        }
        self.transactions.push(transaction);
        &self.transactions[self.transactions.len() - 1]
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev().take(limit)
    }

    pub fn count_of(&self, kind: TransactionKind) -> usize {
        self.transactions.iter().filter(|tx| tx.kind == kind).count()
    }

    pub fn sum_of(&self, kind: TransactionKind) -> Rupees {
        self.transactions
            .iter()
            .filter(|tx| tx.kind == kind)
            .map(|tx| tx.amount)
            .sum()
    }

    /// Balance implied by the history alone.
    pub fn recomputed_balance(&self) -> Rupees {
        self.transactions
            .iter()
            .filter(|tx| tx.kind.settles())
            .map(|tx| tx.amount)
            .sum()
    }

    pub fn is_consistent(&self) -> bool {
        self.balance == self.recomputed_balance()
    }

    fn next_id(&self, at: DateTime<Utc>) -> String {
        let base = format!("tx_{}", at.timestamp_millis());
        let taken = |id: &str| self.transactions.iter().any(|tx| tx.id == id);
        if !taken(&base) {
            return base;
        }
        (1..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or(base)
    }
}
