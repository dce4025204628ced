use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinanceError {
    #[error("invalid loan terms: {message}")]
    InvalidLoanTerms {
        message: String,
    },

    #[error("invalid prepayment scenario: {message}")]
    InvalidScenario {
        message: String,
    },

    #[error("invalid investment plan: {message}")]
    InvalidInvestmentPlan {
        message: String,
    },

    #[error("invalid amount for {field}: {value}")]
    InvalidAmount {
        field: String,
        value: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },
}

impl FinanceError {
    pub(crate) fn loan_terms(message: impl Into<String>) -> Self {
        FinanceError::InvalidLoanTerms { message: message.into() }
    }

    pub(crate) fn scenario(message: impl Into<String>) -> Self {
        FinanceError::InvalidScenario { message: message.into() }
    }

    pub(crate) fn investment_plan(message: impl Into<String>) -> Self {
        FinanceError::InvalidInvestmentPlan { message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, FinanceError>;
