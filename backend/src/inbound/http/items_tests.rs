//! Tests for item HTTP handlers.

use super::*;
use crate::inbound::http::categories::list_categories;
use crate::inbound::http::lists::{add_collaborator, create_list};
use crate::inbound::http::test_utils::{TEST_ADMIN, bearer, permissive_state};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(permissive_state())).service(
        web::scope("/api/v1")
            .service(list_categories)
            .service(create_list)
            .service(add_collaborator)
            .service(list_items)
            .service(create_item)
            .service(toggle_done)
            .service(update_item)
            .service(delete_item),
    )
}

async fn send(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

async fn public_list_with_item(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> (String, String) {
    let (status, list) = send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/lists")
            .insert_header(bearer("alice"))
            .set_json(json!({"title": "Movies", "categoryName": "Films", "isPublic": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let list_id = list["id"].as_str().expect("list id").to_owned();

    let (status, item) = send(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/lists/{list_id}/items"))
            .insert_header(bearer("alice"))
            .set_json(json!({"text": "Heat", "subCategory": "Thriller"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (list_id, item["id"].as_str().expect("item id").to_owned())
}

#[actix_web::test]
async fn creating_an_item_tags_the_category() {
    let app = actix_test::init_service(test_app()).await;
    public_list_with_item(&app).await;

    let (status, categories) = send(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/categories"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let films = categories
        .as_array()
        .expect("array")
        .iter()
        .find(|category| category["name"] == "Films")
        .expect("Films category");
    assert_eq!(films["subCategoryTags"], json!(["Thriller"]));
}

#[actix_web::test]
async fn completion_is_tracked_per_user() {
    let app = actix_test::init_service(test_app()).await;
    let (list_id, item_id) = public_list_with_item(&app).await;
    let (status, _) = send(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/lists/{list_id}/collaborators"))
            .insert_header(bearer("alice"))
            .set_json(json!({"uid": "bob"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, toggled) = send(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/items/{item_id}/done"))
            .insert_header(bearer("bob"))
            .set_json(json!({"done": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["done"], true);
    assert_eq!(toggled["doneBy"], json!(["bob"]));

    let items_uri = format!("/api/v1/lists/{list_id}/items");
    for (header, expected) in [(Some("bob"), true), (Some("alice"), false), (None, false)] {
        let mut request = actix_test::TestRequest::get().uri(&items_uri);
        if let Some(viewer) = header {
            request = request.insert_header(bearer(viewer));
        }
        let (status, items) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(items[0]["done"], expected, "viewer {header:?}");
        assert_eq!(items[0]["doneBy"], json!(["bob"]), "viewer {header:?}");
    }
}

#[actix_web::test]
async fn strangers_cannot_add_or_toggle() {
    let app = actix_test::init_service(test_app()).await;
    let (list_id, item_id) = public_list_with_item(&app).await;

    let (add_status, _) = send(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/lists/{list_id}/items"))
            .insert_header(bearer("mallory"))
            .set_json(json!({"text": "Spam"})),
    )
    .await;
    let (toggle_status, _) = send(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/items/{item_id}/done"))
            .insert_header(bearer("mallory"))
            .set_json(json!({"done": true})),
    )
    .await;

    assert_eq!(add_status, StatusCode::FORBIDDEN);
    assert_eq!(toggle_status, StatusCode::FORBIDDEN);
}

#[rstest]
#[case("alice", StatusCode::OK)]
#[case(TEST_ADMIN, StatusCode::FORBIDDEN)]
#[case("bob", StatusCode::FORBIDDEN)]
#[actix_web::test]
async fn only_the_creator_edits_fields(#[case] actor: &str, #[case] expected: StatusCode) {
    let app = actix_test::init_service(test_app()).await;
    let (_, item_id) = public_list_with_item(&app).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/items/{item_id}"))
            .insert_header(bearer(actor))
            .set_json(json!({"text": "Heat (1995)", "subCategory": " "})),
    )
    .await;

    assert_eq!(status, expected);
    if status == StatusCode::OK {
        assert_eq!(body["text"], "Heat (1995)");
        assert_eq!(body["subCategory"], "Misc");
    }
}

#[rstest]
#[case("alice", StatusCode::NO_CONTENT)]
#[case(TEST_ADMIN, StatusCode::NO_CONTENT)]
#[case("bob", StatusCode::FORBIDDEN)]
#[actix_web::test]
async fn delete_requires_creator_or_admin(#[case] actor: &str, #[case] expected: StatusCode) {
    let app = actix_test::init_service(test_app()).await;
    let (_, item_id) = public_list_with_item(&app).await;

    let (status, _) = send(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/items/{item_id}"))
            .insert_header(bearer(actor)),
    )
    .await;

    assert_eq!(status, expected);
}

#[rstest]
#[case(json!({}), "done")]
#[actix_web::test]
async fn toggle_requires_the_done_flag(#[case] body: Value, #[case] field: &str) {
    let app = actix_test::init_service(test_app()).await;
    let (_, item_id) = public_list_with_item(&app).await;

    let (status, error) = send(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/items/{item_id}/done"))
            .insert_header(bearer("alice"))
            .set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"]["field"], field);
}

#[actix_web::test]
async fn private_list_items_are_hidden_from_anonymous_viewers() {
    let app = actix_test::init_service(test_app()).await;
    let (status, list) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/lists")
            .insert_header(bearer("alice"))
            .set_json(json!({"title": "Diary"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        actix_test::TestRequest::get().uri(&format!(
            "/api/v1/lists/{}/items",
            list["id"].as_str().expect("id")
        )),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[rstest]
fn missing_text_is_reported_by_field() {
    let err = parse_new_item(CreateItemRequest::default()).expect_err("text is required");
    assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
}
