//! Error types for the Order actor.

use crate::model::{OrderStatus, StatusAction};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The action is not offered for the order's current status.
    #[error("Cannot {action} order {id} while {status}")]
    InvalidTransition {
        id: String,
        status: OrderStatus,
        action: StatusAction,
    },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
