//! Symbol directory trait.

use async_trait::async_trait;

use crate::error::DataError;
use crate::types::Symbol;

/// Supplies the set of symbols to sync.
#[async_trait]
pub trait SymbolDirectory: Send + Sync {
    /// List every symbol that should be synced, already filtered by the
    /// directory's own exclusion policy.
    async fn list_symbols(&self) -> Result<Vec<Symbol>, DataError>;

    /// Get the directory name.
    fn name(&self) -> &str;
}
