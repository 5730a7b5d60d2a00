//! Integration tests for the note list and detail pages.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_string, get, location, post_form, seed_folder, seed_note, setup};
use jotter_db::memory::Operation;
use jotter_db::DataClient;

// ---------------------------------------------------------------------------
// List page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_redirects_to_note_list() {
    let (app, _client) = setup();
    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/notes");
}

#[tokio::test]
async fn empty_store_shows_placeholders() {
    let (app, _client) = setup();
    let response = get(app, "/notes").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("No notes yet."));
    assert!(body.contains("No folders or notes yet."));
    assert!(body.contains("Create a new note"));
}

#[tokio::test]
async fn list_shows_newest_first_with_excerpts() {
    let (app, client) = setup();
    seed_note(&client, "Older", "first body").await;
    seed_note(&client, "Newer", "").await;

    let body = body_string(get(app, "/notes").await).await;

    let list_start = body.find(r#"<ul class="note-list">"#).unwrap();
    let list = &body[list_start..];
    let newer = list.find("Newer").unwrap();
    let older = list.find("Older").unwrap();
    assert!(newer < older);
    assert!(list.contains("first body..."));
    assert!(list.contains("No content"));
}

#[tokio::test]
async fn list_load_failure_renders_error_with_502() {
    let (app, client) = setup();
    seed_note(&client, "Hidden", "body").await;
    // One for the sidebar, one for the list itself.
    client.fail_next("notes", Operation::List);
    client.fail_next("notes", Operation::List);

    let response = get(app, "/notes").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_string(response).await;
    assert!(body.contains("An error occurred while loading notes."));
    assert!(body.contains("Error: Injected failure"));
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_redirects_to_the_new_note() {
    let (app, client) = setup();
    let folder = seed_folder(&client, "Errands").await;

    let form = format!("title=Groceries&content=milk&folder_id={}", folder.id);
    let response = post_form(app.clone(), "/notes", &form).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with("/notes/"));

    let notes = client.notes().list(None).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title.as_deref(), Some("Groceries"));
    assert_eq!(notes[0].folder_id.as_ref(), Some(&folder.id));
    assert_eq!(target, format!("/notes/{}", notes[0].id));

    let body = body_string(get(app, &target).await).await;
    assert!(body.contains(r#"value="Groceries""#));
    assert!(body.contains("note-link selected"));
}

#[tokio::test]
async fn create_with_empty_fields_stores_no_values() {
    let (app, client) = setup();

    let response = post_form(app, "/notes", "title=&content=&folder_id=").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let notes = client.notes().list(None).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, None);
    assert_eq!(notes[0].folder_id, None);
}

#[tokio::test]
async fn failed_create_keeps_the_draft() {
    let (app, client) = setup();
    client.fail_next("notes", Operation::Insert);

    let response = post_form(app, "/notes", "title=Kept&content=typed+text").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_string(response).await;
    assert!(body.contains("Failed to save."));
    assert!(body.contains(r#"value="Kept""#));
    assert!(body.contains("typed text"));
    assert!(client.notes().list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn editor_form_carries_a_token() {
    let (app, _client) = setup();
    let body = body_string(get(app, "/notes").await).await;

    assert!(body.contains(r#"<input type="hidden" name="editor_token" value=""#));
}

#[tokio::test]
async fn double_submitted_create_inserts_once() {
    let (app, client) = setup();
    client.set_latency(Some(Duration::from_millis(50)));
    let form = "title=Once&content=&folder_id=&editor_token=tok-double";

    let (first, second) = tokio::join!(
        post_form(app.clone(), "/notes", form),
        post_form(app.clone(), "/notes", form),
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::SEE_OTHER, StatusCode::CONFLICT]);
    client.set_latency(None);
    assert_eq!(client.notes().list(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn separate_forms_are_not_blocked_by_each_other() {
    let (app, client) = setup();
    client.set_latency(Some(Duration::from_millis(20)));

    let (first, second) = tokio::join!(
        post_form(app.clone(), "/notes", "title=A&editor_token=tok-a"),
        post_form(app.clone(), "/notes", "title=B&editor_token=tok-b"),
    );

    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(second.status(), StatusCode::SEE_OTHER);
    client.set_latency(None);
    assert_eq!(client.notes().list(None).await.unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_note_is_not_found() {
    let (app, _client) = setup();
    let response = get(app, "/notes/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_fetch_is_not_found() {
    let (app, client) = setup();
    let note = seed_note(&client, "Unlucky", "body").await;
    client.fail_next("notes", Operation::Get);

    let response = get(app, &format!("/notes/{}", note.id)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn preview_renders_markup_and_escapes_html() {
    let (app, client) = setup();
    let note = seed_note(&client, "Rich", "**bold** <script>alert(1)</script>").await;

    let response = get(app, &format!("/notes/{}", note.id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("<strong>bold</strong>"));
    assert!(body.contains("&lt;script&gt;"));
    assert!(!body.contains("<script>"));
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_redirects_to_list_and_refreshes_it() {
    let (app, client) = setup();
    let note = seed_note(&client, "Draft title", "body").await;

    // Prime the cached list.
    let before = body_string(get(app.clone(), "/notes").await).await;
    assert!(before.contains("Draft title"));

    let path = format!("/notes/{}", note.id);
    let response = post_form(app.clone(), &path, "title=Final+title&content=body").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/notes");

    let after = body_string(get(app, "/notes").await).await;
    assert!(after.contains("Final title"));
    assert!(!after.contains("Draft title"));
}

#[tokio::test]
async fn failed_update_rerenders_the_form() {
    let (app, client) = setup();
    let note = seed_note(&client, "Original", "body").await;
    client.fail_next("notes", Operation::Update);

    let path = format!("/notes/{}", note.id);
    let response = post_form(app, &path, "title=Edited&content=body").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_string(response).await;
    assert!(body.contains("Failed to save."));
    assert!(body.contains(r#"value="Edited""#));

    let stored = client.notes().get(&note.id).await.unwrap().unwrap();
    assert_eq!(stored.title.as_deref(), Some("Original"));
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_asks_for_confirmation_first() {
    let (app, client) = setup();
    let note = seed_note(&client, "Doomed", "body").await;
    let path = format!("/notes/{}/delete", note.id);

    let response = post_form(app.clone(), &path, "").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Really delete"));
    assert!(body.contains(r#"name="confirm" value="yes""#));
    assert_eq!(client.count_calls("notes", Operation::Delete), 0);

    let response = post_form(app.clone(), &path, "confirm=yes").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/notes");
    assert_eq!(client.count_calls("notes", Operation::Delete), 1);

    let response = get(app, &format!("/notes/{}", note.id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_delete_keeps_the_note() {
    let (app, client) = setup();
    let note = seed_note(&client, "Survivor", "body").await;
    client.fail_next("notes", Operation::Delete);

    let path = format!("/notes/{}/delete", note.id);
    let response = post_form(app, &path, "confirm=yes").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_string(response).await;
    assert!(body.contains("Failed to delete."));
    assert!(client.notes().get(&note.id).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_a_missing_note_is_not_found() {
    let (app, _client) = setup();
    let response = post_form(app, "/notes/gone/delete", "confirm=yes").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
