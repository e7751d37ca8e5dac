//! Selection Manager
//!
//! Single source of truth for the client list and the currently selected
//! client. State is published through a `watch` channel, so every transition
//! (list replaced, selection changed, loading toggled) reaches subscribers as
//! soon as it happens.
//!
//! ```text
//! fetch() ─▶ loading=true ─▶ ClientStore ─▶ replace clients ─▶ auto-select ─▶ loading=false
//!                                               (only while selection is empty)
//! ```

use crate::constants::SELECTED_CLIENT_KEY;
use crate::domain::{Client, ClientId};
use crate::services::ClientStore;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Snapshot of the selection state
#[derive(Clone, Debug, Default)]
pub struct ClientSelection {
    /// Clients in store order (newest first)
    pub clients: Vec<Arc<Client>>,
    /// Currently selected client
    pub selected: Option<Arc<Client>>,
    /// Whether a fetch is in flight
    pub loading: bool,
}

impl ClientSelection {
    /// Get the selected client ID
    pub fn selected_id(&self) -> Option<&ClientId> {
        self.selected.as_ref().map(|c| &c.id)
    }

    /// Find a client in the current list
    pub fn client(&self, id: &ClientId) -> Option<&Arc<Client>> {
        self.clients.iter().find(|c| &c.id == id)
    }
}

/// Owns the client list and selection, and keeps the persisted key in sync
pub struct SelectionManager {
    store: Arc<dyn ClientStore>,
    kv: Arc<dyn KeyValueStore>,
    state: watch::Sender<ClientSelection>,
}

impl SelectionManager {
    /// Create a manager with empty state, without fetching
    pub fn new(store: Arc<dyn ClientStore>, kv: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(ClientSelection::default());
        Self { store, kv, state }
    }

    /// Create a manager and run the initial fetch
    pub async fn init(store: Arc<dyn ClientStore>, kv: Arc<dyn KeyValueStore>) -> Self {
        let manager = Self::new(store, kv);
        manager.fetch().await;
        manager
    }

    // ==================== Getters ====================

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<ClientSelection> {
        self.state.subscribe()
    }

    /// Clone the current state
    pub fn snapshot(&self) -> ClientSelection {
        self.state.borrow().clone()
    }

    /// Get all clients in display order
    pub fn clients(&self) -> Vec<Arc<Client>> {
        self.state.borrow().clients.clone()
    }

    /// Get the selected client
    pub fn selection(&self) -> Option<Arc<Client>> {
        self.state.borrow().selected.clone()
    }

    /// Find a client in the current list
    pub fn client(&self, id: &ClientId) -> Option<Arc<Client>> {
        self.state.borrow().client(id).cloned()
    }

    /// Check if a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    // ==================== Operations ====================

    /// Reload the client list from the remote store
    ///
    /// Failures are logged and leave the previous list in place. The loading
    /// flag is cleared on every outcome. Overlapping calls are not serialized:
    /// the list holds whichever response lands last, and the first call to
    /// finish clears `loading` even if another is still in flight.
    pub async fn fetch(&self) {
        self.state.send_modify(|s| s.loading = true);

        let result = self.store.fetch_clients().await;

        // Storage IO stays outside send_modify so readers never wait on it
        let remembered = match &result {
            Ok(rows) if !rows.is_empty() && self.selection().is_none() => {
                self.remembered_client_id()
            }
            _ => None,
        };

        let mut auto_selected = None;
        self.state.send_modify(|s| {
            match result {
                Ok(rows) => {
                    info!(count = rows.len(), "Fetched clients");
                    s.clients = rows.into_iter().map(Arc::new).collect();

                    if s.selected.is_none() {
                        if let Some(client) = pick_initial(&s.clients, remembered.as_deref()) {
                            let restored = remembered.as_deref() == Some(client.id.as_str());
                            debug!(client_id = %client.id, restored, "Auto-selected client");
                            auto_selected = Some(client.id.clone());
                            s.selected = Some(client.clone());
                        }
                    }
                }
                Err(e) => {
                    error!(error = %e, "Failed to fetch clients");
                }
            }
            s.loading = false;
        });

        if let Some(id) = auto_selected {
            self.persist(&id);
        }
    }

    /// Alias for [`fetch`](Self::fetch)
    pub async fn refresh(&self) {
        self.fetch().await;
    }

    /// Replace the selection
    ///
    /// No membership check is made against the current list. A `Some` value is
    /// persisted; `None` leaves the persisted key untouched.
    pub fn set_selection(&self, client: Option<Arc<Client>>) {
        let id = client.as_ref().map(|c| c.id.clone());
        self.state.send_modify(|s| s.selected = client);

        if let Some(id) = id {
            self.persist(&id);
        }
    }

    // ==================== Persistence ====================

    fn remembered_client_id(&self) -> Option<String> {
        match self.kv.get(SELECTED_CLIENT_KEY) {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted client selection");
                None
            }
        }
    }

    fn persist(&self, id: &ClientId) {
        if let Err(e) = self.kv.set(SELECTED_CLIENT_KEY, id.as_str()) {
            error!(error = %e, client_id = %id, "Failed to persist client selection");
        }
    }
}

impl std::fmt::Debug for SelectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("SelectionManager")
            .field("clients", &state.clients.len())
            .field("selected", &state.selected_id())
            .field("loading", &state.loading)
            .finish()
    }
}

/// Choose the client to select after a load: the remembered one if it is still
/// listed, else the first
pub fn pick_initial<'a>(
    clients: &'a [Arc<Client>],
    remembered: Option<&str>,
) -> Option<&'a Arc<Client>> {
    remembered
        .and_then(|id| clients.iter().find(|c| c.id.as_str() == id))
        .or_else(|| clients.first())
}
