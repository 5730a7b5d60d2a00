//! Server-side cache of the data behind rendered views.
//!
//! Pages read through [`ViewCache`]; mutations call
//! [`ViewCache::revalidate`] for every view they touch so the next read goes
//! back to the store. Entries also expire after the configured TTL, which
//! bounds how long changes made outside this process stay invisible.
//!
//! Each route carries a generation that [`ViewCache::revalidate`] and
//! [`ViewCache::prime`] bump. A read stores its result only if the
//! generation it saw before fetching is still current, so a fetch that
//! overlapped a mutation never pins the pre-mutation snapshot.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use jotter_core::route::Route;
use jotter_core::types::RecordId;
use jotter_db::models::note::{Note, NoteColumn};
use jotter_db::{ClientResult, DataClient, Order};
use tokio::sync::RwLock;

#[derive(Clone)]
enum CachedView {
    NoteList(Arc<Vec<Note>>),
    Note(Arc<Note>),
}

struct Entry {
    view: CachedView,
    stored_at: Instant,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<Route, Entry>,
    generations: HashMap<Route, u64>,
}

impl CacheState {
    fn generation(&self, route: &Route) -> u64 {
        self.generations.get(route).copied().unwrap_or(0)
    }

    fn bump(&mut self, route: &Route) {
        *self.generations.entry(route.clone()).or_default() += 1;
    }
}

pub struct ViewCache {
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl ViewCache {
    /// A cache whose entries live for `ttl`. A zero TTL caches nothing.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(CacheState::default()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Notes for the list view, newest first.
    pub async fn note_list(&self, client: &dyn DataClient) -> ClientResult<Arc<Vec<Note>>> {
        let seen = match self.lookup(&Route::NoteList).await {
            Ok(CachedView::NoteList(notes)) => return Ok(notes),
            Ok(_) => self.generation(&Route::NoteList).await,
            Err(generation) => generation,
        };
        let notes = Arc::new(
            client
                .notes()
                .list(Some(Order::desc(NoteColumn::CreatedAt)))
                .await?,
        );
        self.store(
            Route::NoteList,
            CachedView::NoteList(Arc::clone(&notes)),
            seen,
        )
        .await;
        Ok(notes)
    }

    /// The note behind a detail view. Absent notes are not cached.
    pub async fn note(
        &self,
        client: &dyn DataClient,
        id: &RecordId,
    ) -> ClientResult<Option<Arc<Note>>> {
        let route = Route::note(id.clone());
        let seen = match self.lookup(&route).await {
            Ok(CachedView::Note(note)) => return Ok(Some(note)),
            Ok(_) => self.generation(&route).await,
            Err(generation) => generation,
        };
        let Some(note) = client.notes().get(id).await? else {
            return Ok(None);
        };
        let note = Arc::new(note);
        self.store(route, CachedView::Note(Arc::clone(&note)), seen)
            .await;
        Ok(Some(note))
    }

    /// Store a note returned by a mutation as its detail view's data.
    ///
    /// Reads of that view still in flight will not overwrite it.
    pub async fn prime(&self, note: &Note) {
        let route = Route::note(note.id.clone());
        let mut state = self.state.write().await;
        state.bump(&route);
        if self.ttl.is_zero() {
            return;
        }
        state.entries.insert(
            route,
            Entry {
                view: CachedView::Note(Arc::new(note.clone())),
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop the cached data for `route` so the next read refetches it.
    ///
    /// Reads of that view already in flight will not store their result.
    pub async fn revalidate(&self, route: &Route) {
        let mut state = self.state.write().await;
        state.bump(route);
        if state.entries.remove(route).is_some() {
            tracing::debug!(%route, "Revalidated view");
        }
    }

    /// Whether a fresh entry exists for `route`.
    pub async fn contains(&self, route: &Route) -> bool {
        self.lookup(route).await.is_ok()
    }

    /// The fresh cached view for `route`, or the route's current generation
    /// on a miss.
    async fn lookup(&self, route: &Route) -> Result<CachedView, u64> {
        let state = self.state.read().await;
        state
            .entries
            .get(route)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.view.clone())
            .ok_or_else(|| state.generation(route))
    }

    async fn generation(&self, route: &Route) -> u64 {
        self.state.read().await.generation(route)
    }

    /// Store a fetched view unless `route` was revalidated or primed since
    /// generation `seen` was read.
    async fn store(&self, route: Route, view: CachedView, seen: u64) {
        if self.ttl.is_zero() {
            return;
        }
        let mut state = self.state.write().await;
        if state.generation(&route) != seen {
            tracing::debug!(%route, "Discarded view fetched before a revalidation");
            return;
        }
        state.entries.insert(
            route,
            Entry {
                view,
                stored_at: Instant::now(),
            },
        );
    }
}
