//! Service Layer
//!
//! Abstraction over the remote record store the client list is read from.
//!
//! ```text
//! SelectionManager ──fetch_clients()──▶ ClientStore ──HTTP──▶ Supabase (PostgREST)
//! ```

mod supabase;

pub use supabase::*;

use crate::domain::Client;
use crate::error::Result;
use async_trait::async_trait;

/// Remote source of client records
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Fetch every client, newest `created_at` first
    async fn fetch_clients(&self) -> Result<Vec<Client>>;
}
