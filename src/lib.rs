pub mod budget;
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod decimal;
pub mod errors;
pub mod investments;
pub mod loans;
pub mod types;
pub mod views;

// re-export key types
pub use budget::{
    BudgetCategory, BudgetShare, MonthlyBudget, MonthlyRecord, MonthlyRecordSummary, PeriodTotals,
};
pub use config::{AdvisorConfig, FinanceConfig, TimelineConfig};
pub use dashboard::{
    build_dashboard_report, build_dashboard_summary, build_dashboard_summary_with, DashboardReport,
    DashboardSummary, LoanOverview, Recommendation, RecommendationRule,
};
pub use decimal::{Money, Rate};
pub use errors::{FinanceError, Result};
pub use investments::{
    compute_espp_gains, compute_projection, EsppGains, EsppHolding, Investment, InvestmentPlan,
    PortfolioTotals, ProjectionResult,
};
pub use loans::{
    build_payoff_timeline, compute_amortization, compute_prepayment_scenario, AmortizationResult,
    Loan, LoanProgress, LoanRow, LoanTerms, PaymentScheduleEntry, PortfolioProgress,
    PrepaymentScenario, TimelinePoint,
};
pub use types::{
    InvestmentId, InvestmentStatus, InvestmentType, LoanId, LoanStatus, LoanType,
    RecommendationKind,
};
pub use views::ScheduleView;

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
