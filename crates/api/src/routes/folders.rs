use axum::routing::post;
use axum::Router;

use crate::handlers::folders;
use crate::state::AppState;

/// Folder routes.
///
/// ```text
/// POST   /folders              -> create_folder
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/folders", post(folders::create_folder))
}
