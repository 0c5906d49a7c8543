use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid metric '{0}': expected one of Budget, Revenue, Profit, Note, Popularity")]
    InvalidMetric(String),
}
