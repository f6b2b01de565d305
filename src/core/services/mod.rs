pub mod chart_service;
pub mod record_service;
pub mod summary_service;

pub use chart_service::{BarChartData, ChartService, PieSlice};
pub use record_service::{DateInput, RecordService};
pub use summary_service::{Summary, SummaryService};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}
