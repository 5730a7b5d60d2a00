use std::sync::Arc;
use std::time::Duration;

use jotter_db::DataClient;

use crate::actions::NoteActions;
use crate::cache::ViewCache;
use crate::config::ServerConfig;
use crate::editor::{Draft, Editor, InFlightEditors};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Handle to the remote store.
    pub client: Arc<dyn DataClient>,
    /// Cached data behind the note views.
    pub cache: Arc<ViewCache>,
    pub config: Arc<ServerConfig>,
    /// Editor tokens with a save or delete in flight.
    pub editors: Arc<InFlightEditors>,
}

impl AppState {
    pub fn new(client: Arc<dyn DataClient>, config: ServerConfig) -> Self {
        let cache = ViewCache::new(Duration::from_secs(config.view_cache_ttl_secs));
        Self {
            client,
            cache: Arc::new(cache),
            config: Arc::new(config),
            editors: Arc::new(InFlightEditors::default()),
        }
    }

    /// Server actions bound to this state's client and cache.
    pub fn actions(&self) -> NoteActions {
        NoteActions::new(Arc::clone(&self.client), Arc::clone(&self.cache))
    }

    /// Editor over `draft` for a form submitted with editor `token`.
    pub fn editor(&self, draft: Draft, token: &str) -> Editor {
        Editor::new(self.actions(), draft).with_token(Arc::clone(&self.editors), token)
    }
}
