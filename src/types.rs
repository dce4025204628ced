use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for an investment
pub type InvestmentId = Uuid;

/// loan types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    Home,
    Personal,
    Car,
    Education,
    CreditCard,
    Other,
}

/// loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// still being repaid; counted by the dashboard
    Active,
    /// paid off or otherwise closed
    Closed,
}

/// investment vehicles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentType {
    /// systematic investment plan
    Sip,
    /// employee stock purchase plan
    Espp,
    MutualFund,
    FixedDeposit,
    Stocks,
    Other,
}

/// investment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentStatus {
    Active,
    Paused,
    Matured,
}

/// recommendation severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Warning,
    Success,
    Info,
}
