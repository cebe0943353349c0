//! Entry API handlers. Every route sits behind the bearer Auth Gate.
//!
//! ```text
//! GET    /api/entries
//! GET    /api/entries/{entryId}
//! POST   /api/entries {"title":"Day 1","notes":"hello","photoUrl":"http://x/y.png"}
//! PUT    /api/entries/{entryId} {"title":..,"notes":..,"photoUrl":..}
//! DELETE /api/entries/{entryId}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Entry, EntryDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::Authenticated;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{entry_error, parse_entry_id};

/// Body for create and update. All three fields are required and replaced
/// together; absent fields read as empty and fail validation.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryRequest {
    #[schema(example = "Day 1")]
    pub title: String,
    #[schema(example = "hello")]
    pub notes: String,
    #[schema(example = "http://x/y.png")]
    pub photo_url: String,
}

impl TryFrom<EntryRequest> for EntryDraft {
    type Error = crate::domain::Error;

    fn try_from(value: EntryRequest) -> Result<Self, Self::Error> {
        EntryDraft::try_new(value.title, value.notes, value.photo_url).map_err(entry_error)
    }
}

/// A persisted journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    #[schema(example = 1)]
    pub entry_id: i64,
    pub title: String,
    pub notes: String,
    pub photo_url: String,
}

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            entry_id: entry.id().get(),
            title: entry.title().to_owned(),
            notes: entry.notes().to_owned(),
            photo_url: entry.photo_url().to_owned(),
        }
    }
}

/// List every entry in creation order.
#[utoipa::path(
    get,
    path = "/api/entries",
    responses(
        (status = 200, description = "All entries", body = [EntryResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "listEntries"
)]
#[get("")]
pub async fn list_entries(
    state: web::Data<HttpState>,
    _user: Authenticated,
) -> ApiResult<web::Json<Vec<EntryResponse>>> {
    let entries = state.entries.list().await?;
    Ok(web::Json(entries.into_iter().map(EntryResponse::from).collect()))
}

/// Fetch one entry.
#[utoipa::path(
    get,
    path = "/api/entries/{entryId}",
    params(("entryId" = i64, Path, description = "Positive entry identifier")),
    responses(
        (status = 200, description = "The entry", body = EntryResponse),
        (status = 400, description = "Malformed entry id", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "No such entry", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "getEntry"
)]
#[get("/{entry_id}")]
pub async fn get_entry(
    state: web::Data<HttpState>,
    _user: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<EntryResponse>> {
    let id = parse_entry_id(&path)?;
    let entry = state.entries.get(id).await?;
    Ok(web::Json(entry.into()))
}

/// Create an entry.
#[utoipa::path(
    post,
    path = "/api/entries",
    request_body = EntryRequest,
    responses(
        (status = 201, description = "Entry created", body = EntryResponse),
        (status = 400, description = "Missing field", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "createEntry"
)]
#[post("")]
pub async fn create_entry(
    state: web::Data<HttpState>,
    user: Authenticated,
    payload: web::Json<EntryRequest>,
) -> ApiResult<HttpResponse> {
    let draft = EntryDraft::try_from(payload.into_inner())?;
    let entry = state.entries_command.create(draft).await?;
    debug!(user_id = %user.0.user_id(), entry_id = %entry.id(), "entry created via API");
    Ok(HttpResponse::Created().json(EntryResponse::from(entry)))
}

/// Replace all fields of an entry.
#[utoipa::path(
    put,
    path = "/api/entries/{entryId}",
    params(("entryId" = i64, Path, description = "Positive entry identifier")),
    request_body = EntryRequest,
    responses(
        (status = 200, description = "Entry updated", body = EntryResponse),
        (status = 400, description = "Malformed id or missing field", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "No such entry", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "updateEntry"
)]
#[put("/{entry_id}")]
pub async fn update_entry(
    state: web::Data<HttpState>,
    _user: Authenticated,
    path: web::Path<String>,
    payload: web::Json<EntryRequest>,
) -> ApiResult<web::Json<EntryResponse>> {
    let id = parse_entry_id(&path)?;
    let draft = EntryDraft::try_from(payload.into_inner())?;
    let entry = state.entries_command.update(id, draft).await?;
    Ok(web::Json(entry.into()))
}

/// Permanently delete an entry.
#[utoipa::path(
    delete,
    path = "/api/entries/{entryId}",
    params(("entryId" = i64, Path, description = "Positive entry identifier")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 400, description = "Malformed entry id", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "No such entry", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "deleteEntry"
)]
#[delete("/{entry_id}")]
pub async fn delete_entry(
    state: web::Data<HttpState>,
    _user: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_entry_id(&path)?;
    state.entries_command.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockEntriesCommand, MockEntriesQuery};
    use crate::domain::{EntryId, Error};
    use crate::inbound::http::test_utils::{TEST_TOKEN, entries_state, entries_test_app};
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn sample(id: i64) -> Entry {
        Entry::new(
            EntryId::new(id),
            EntryDraft::try_new("Day 1", "hello", "http://x/y.png").expect("valid draft"),
        )
    }

    fn authed(request: actix_test::TestRequest) -> actix_test::TestRequest {
        request.insert_header((AUTHORIZATION, format!("Bearer {TEST_TOKEN}")))
    }

    #[rstest]
    #[actix_web::test]
    async fn list_returns_entries() {
        let mut query = MockEntriesQuery::new();
        query
            .expect_list()
            .return_once(|| Ok(vec![sample(1), sample(2)]));
        let app = actix_test::init_service(entries_test_app(entries_state(
            query,
            MockEntriesCommand::new(),
        )))
        .await;

        let request = authed(actix_test::TestRequest::get().uri("/api/entries")).to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(
            body,
            json!([
                { "entryId": 1, "title": "Day 1", "notes": "hello", "photoUrl": "http://x/y.png" },
                { "entryId": 2, "title": "Day 1", "notes": "hello", "photoUrl": "http://x/y.png" },
            ])
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn create_returns_created_entry() {
        let mut command = MockEntriesCommand::new();
        command
            .expect_create()
            .withf(|draft| draft.title() == "Day 1" && draft.photo_url() == "http://x/y.png")
            .return_once(|draft| Ok(Entry::new(EntryId::new(5), draft)));
        let app = actix_test::init_service(entries_test_app(entries_state(
            MockEntriesQuery::new(),
            command,
        )))
        .await;

        let request = authed(actix_test::TestRequest::post().uri("/api/entries"))
            .set_json(json!({ "title": "Day 1", "notes": "hello", "photoUrl": "http://x/y.png" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["entryId"], 5);
    }

    #[rstest]
    #[case(json!({ "notes": "hello", "photoUrl": "u" }), "title")]
    #[case(json!({ "title": "t", "notes": "", "photoUrl": "u" }), "notes")]
    #[case(json!({ "title": "t", "notes": "n" }), "photoUrl")]
    #[actix_web::test]
    async fn create_rejects_missing_fields(#[case] body: Value, #[case] field: &str) {
        let app = actix_test::init_service(entries_test_app(entries_state(
            MockEntriesQuery::new(),
            MockEntriesCommand::new(),
        )))
        .await;

        let request = authed(actix_test::TestRequest::post().uri("/api/entries"))
            .set_json(&body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload: Value = actix_test::read_body_json(response).await;
        assert_eq!(payload["error"], format!("{field} is required"));
        assert_eq!(payload["details"]["field"], field);
    }

    #[rstest]
    #[case("abc")]
    #[case("0")]
    #[case("-4")]
    #[case("1.5")]
    #[actix_web::test]
    async fn malformed_ids_are_rejected_on_every_route(#[case] raw: &str) {
        let app = actix_test::init_service(entries_test_app(entries_state(
            MockEntriesQuery::new(),
            MockEntriesCommand::new(),
        )))
        .await;
        let uri = format!("/api/entries/{raw}");
        let body = json!({ "title": "t", "notes": "n", "photoUrl": "u" });

        let requests = [
            authed(actix_test::TestRequest::get().uri(&uri)).to_request(),
            authed(actix_test::TestRequest::put().uri(&uri))
                .set_json(&body)
                .to_request(),
            authed(actix_test::TestRequest::delete().uri(&uri)).to_request(),
        ];
        for request in requests {
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let payload: Value = actix_test::read_body_json(response).await;
            assert_eq!(payload["error"], "entryId must be a positive integer");
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_entries_are_not_found() {
        let mut query = MockEntriesQuery::new();
        query
            .expect_get()
            .return_once(|id| Err(Error::not_found(format!("Entry {id} not found"))));
        let mut command = MockEntriesCommand::new();
        command
            .expect_delete()
            .return_once(|id| Err(Error::not_found(format!("Entry {id} not found"))));
        let app = actix_test::init_service(entries_test_app(entries_state(query, command))).await;

        for request in [
            authed(actix_test::TestRequest::get().uri("/api/entries/9")).to_request(),
            authed(actix_test::TestRequest::delete().uri("/api/entries/9")).to_request(),
        ] {
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn update_and_delete_succeed() {
        let mut command = MockEntriesCommand::new();
        command
            .expect_update()
            .withf(|id, draft| id.get() == 3 && draft.notes() == "bye")
            .return_once(|id, draft| Ok(Entry::new(id, draft)));
        command.expect_delete().return_once(|_| Ok(()));
        let app = actix_test::init_service(entries_test_app(entries_state(
            MockEntriesQuery::new(),
            command,
        )))
        .await;

        let update = authed(actix_test::TestRequest::put().uri("/api/entries/3"))
            .set_json(json!({ "title": "t", "notes": "bye", "photoUrl": "u" }))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, update).await;
        assert_eq!(body["notes"], "bye");

        let remove = authed(actix_test::TestRequest::delete().uri("/api/entries/3")).to_request();
        let response = actix_test::call_service(&app, remove).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[actix_web::test]
    async fn unauthenticated_writes_touch_nothing() {
        let mut command = MockEntriesCommand::new();
        command.expect_create().never();
        command.expect_delete().never();
        let app = actix_test::init_service(entries_test_app(entries_state(
            MockEntriesQuery::new(),
            command,
        )))
        .await;

        let create = actix_test::TestRequest::post()
            .uri("/api/entries")
            .set_json(json!({ "title": "t", "notes": "n", "photoUrl": "u" }))
            .to_request();
        let remove = actix_test::TestRequest::delete()
            .uri("/api/entries/1")
            .insert_header((AUTHORIZATION, "Bearer forged"))
            .to_request();
        for request in [create, remove] {
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
