//! Driven port for honour-ledger persistence adapters.

use async_trait::async_trait;

use crate::domain::honour::{Honour, HonourFilter};

/// Persistence errors raised by honour repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HonourPersistenceError {
    /// Repository connection could not be established.
    #[error("honour repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("honour repository query failed: {message}")]
    Query {
        /// Adapter-supplied diagnostic.
        message: String,
    },
}

impl HonourPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Storage operations over the append-only honours ledger.
#[async_trait]
pub trait HonourRepository: Send + Sync {
    /// Append an awarded honour.
    async fn insert(&self, honour: &Honour) -> Result<(), HonourPersistenceError>;

    /// List honours matching the filter, newest first.
    async fn search(&self, filter: &HonourFilter) -> Result<Vec<Honour>, HonourPersistenceError>;
}
