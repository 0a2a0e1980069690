//! Rule Engine Error Types

use thiserror::Error;

/// Errors raised by the speed rule engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A mandatory context field was not set
    #[error("Invalid driving context: {field} must be set")]
    InvalidContext { field: &'static str },
}
