use crate::models::{PlayerId, Position};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DepthChartError {
    #[error("Player not found: {id}")]
    NotFound { id: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Order {order} out of range for {position}: expected 1..={max}")]
    OrderOutOfRange { position: Position, order: u32, max: u32 },

    #[error("Cannot swap player {id} with itself")]
    SamePlayer { id: PlayerId },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Seed error: {0}")]
    Seed(String),
}

impl DepthChartError {
    pub fn not_found(id: impl ToString) -> Self {
        DepthChartError::NotFound { id: id.to_string() }
    }

    /// True for errors caused by the request rather than the service.
    pub fn is_client_error(&self) -> bool {
        match self {
            DepthChartError::NotFound { .. } => true,
            DepthChartError::InvalidRequest(_) => true,
            DepthChartError::OrderOutOfRange { .. } => true,
            DepthChartError::SamePlayer { .. } => true,
            DepthChartError::Store(_) => false,
            DepthChartError::Seed(_) => false,
        }
    }
}

impl From<validator::ValidationErrors> for DepthChartError {
    fn from(err: validator::ValidationErrors) -> Self {
        DepthChartError::InvalidRequest(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DepthChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(DepthChartError::not_found("abc").is_client_error());
        assert!(DepthChartError::InvalidRequest("bad".into()).is_client_error());
        assert!(!DepthChartError::Store("disk full".into()).is_client_error());
    }

    #[test]
    fn test_order_out_of_range_message() {
        let err = DepthChartError::OrderOutOfRange { position: Position::QB, order: 5, max: 3 };
        assert_eq!(err.to_string(), "Order 5 out of range for QB: expected 1..=3");
    }
}
