//! CLI command implementations.

pub mod quote;
pub mod stores;
pub mod sync;

pub use quote::QuoteCommand;
pub use stores::StoresCommand;
pub use sync::SyncCommand;
