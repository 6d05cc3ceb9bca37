//! Driving port for the public honours archive.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::honour::{Honour, HonourFilter};

/// Domain use-case port for searching awarded honours.
#[async_trait]
pub trait HonourQuery: Send + Sync {
    /// List honours matching the filter, newest first. The search term
    /// matches either recipient handle case-insensitively.
    async fn search(&self, filter: HonourFilter) -> Result<Vec<Honour>, Error>;
}
