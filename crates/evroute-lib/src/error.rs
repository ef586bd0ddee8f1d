use thiserror::Error;

use crate::network::NodeId;

/// Convenient result alias for the evroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised before a search starts when a caller-supplied parameter is out of range.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// Raised when a node identifier is not part of the road network.
    #[error("unknown node: {id}")]
    UnknownNode { id: NodeId },

    /// Raised when a road network or charger document is structurally invalid.
    #[error("invalid network data: {message}")]
    InvalidNetwork { message: String },

    /// Raised when no feasible battery/recharge combination reaches the destination.
    #[error("no feasible route found between {origin} and {destination}")]
    RouteNotFound {
        origin: NodeId,
        destination: NodeId,
    },

    /// Raised when the heuristic-only search exhausted its iteration cap.
    #[error(
        "search abandoned between {origin} and {destination} after {iterations} iterations"
    )]
    SearchAbandoned {
        origin: NodeId,
        destination: NodeId,
        iterations: usize,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_network(message: impl Into<String>) -> Self {
        Error::InvalidNetwork {
            message: message.into(),
        }
    }
}
