//! Selection Context
//!
//! Scoped access to a shared [`SelectionManager`]. A handle is installed for
//! the duration of a future (or closure) with [`provide_selection`], and code
//! running inside that scope retrieves it with [`use_selection`]. Asking for
//! it anywhere else is an error.

use crate::domain::Client;
use crate::error::{Error, Result};
use crate::state::{ClientSelection, SelectionManager};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

tokio::task_local! {
    static CURRENT_SELECTION: SelectionHandle;
}

/// Cheap, cloneable view onto a shared selection manager
#[derive(Clone, Debug)]
pub struct SelectionHandle {
    manager: Arc<SelectionManager>,
}

impl SelectionHandle {
    pub fn new(manager: Arc<SelectionManager>) -> Self {
        Self { manager }
    }

    /// Currently selected client
    pub fn selection(&self) -> Option<Arc<Client>> {
        self.manager.selection()
    }

    /// Replace the selection (persisted when `Some`)
    pub fn set_selection(&self, client: Option<Arc<Client>>) {
        self.manager.set_selection(client);
    }

    /// Clients in display order
    pub fn clients(&self) -> Vec<Arc<Client>> {
        self.manager.clients()
    }

    /// Whether a fetch is in flight
    pub fn loading(&self) -> bool {
        self.manager.is_loading()
    }

    /// Re-query the remote store
    pub async fn refresh(&self) {
        self.manager.refresh().await;
    }

    /// Full state snapshot
    pub fn snapshot(&self) -> ClientSelection {
        self.manager.snapshot()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<ClientSelection> {
        self.manager.subscribe()
    }

    pub fn manager(&self) -> &Arc<SelectionManager> {
        &self.manager
    }
}

impl From<Arc<SelectionManager>> for SelectionHandle {
    fn from(manager: Arc<SelectionManager>) -> Self {
        Self::new(manager)
    }
}

impl From<SelectionManager> for SelectionHandle {
    fn from(manager: SelectionManager) -> Self {
        Self::new(Arc::new(manager))
    }
}

/// Run `future` with `handle` available through [`use_selection`]
pub async fn provide_selection<F>(handle: SelectionHandle, future: F) -> F::Output
where
    F: Future,
{
    CURRENT_SELECTION.scope(handle, future).await
}

/// Synchronous counterpart of [`provide_selection`]
pub fn provide_selection_sync<R>(handle: SelectionHandle, f: impl FnOnce() -> R) -> R {
    CURRENT_SELECTION.sync_scope(handle, f)
}

/// Get the handle installed by the enclosing provider
///
/// Returns [`Error::OutsideProvider`] when called outside any provider scope.
pub fn use_selection() -> Result<SelectionHandle> {
    CURRENT_SELECTION
        .try_with(SelectionHandle::clone)
        .map_err(|_| Error::OutsideProvider)
}
