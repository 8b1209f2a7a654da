//! Tests for category HTTP handlers.

use super::*;
use crate::inbound::http::test_utils::{TEST_ADMIN, bearer, permissive_state};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
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
            .service(create_category)
            .service(rename_category)
            .service(delete_category),
    )
}

async fn resolve(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    actor: &str,
    name: &str,
) -> Value {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/categories")
        .insert_header(bearer(actor))
        .set_json(json!({ "name": name }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    actix_test::read_body_json(response).await
}

#[actix_web::test]
async fn resolving_ignores_case_and_keeps_the_first_owner() {
    let app = actix_test::init_service(test_app()).await;

    let first = resolve(&app, "alice", "Movies").await;
    let second = resolve(&app, "bob", "  movies ").await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["name"], "Movies");
    assert_eq!(second["ownerUid"], "alice");

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/categories")
        .to_request();
    let listed: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[case(json!({}))]
#[case(json!({"name": "   "}))]
#[actix_web::test]
async fn resolving_rejects_missing_or_blank_names(#[case] body: Value) {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/categories")
        .insert_header(bearer("alice"))
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case("alice", "Films", StatusCode::OK)]
#[case(TEST_ADMIN, "Films", StatusCode::OK)]
#[case("bob", "Films", StatusCode::FORBIDDEN)]
#[case("alice", "BOOKS", StatusCode::CONFLICT)]
#[actix_web::test]
async fn rename_is_limited_to_owner_or_admin(
    #[case] actor: &str,
    #[case] new_name: &str,
    #[case] expected: StatusCode,
) {
    let app = actix_test::init_service(test_app()).await;
    let movies = resolve(&app, "alice", "Movies").await;
    resolve(&app, "bob", "Books").await;

    let request = actix_test::TestRequest::put()
        .uri(&format!(
            "/api/v1/categories/{}",
            movies["id"].as_str().expect("id")
        ))
        .insert_header(bearer(actor))
        .set_json(json!({ "name": new_name }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), expected);
}

#[rstest]
#[case("alice", StatusCode::FORBIDDEN)]
#[case(TEST_ADMIN, StatusCode::NO_CONTENT)]
#[actix_web::test]
async fn only_the_admin_removes_categories(#[case] actor: &str, #[case] expected: StatusCode) {
    let app = actix_test::init_service(test_app()).await;
    let movies = resolve(&app, "alice", "Movies").await;

    let request = actix_test::TestRequest::delete()
        .uri(&format!(
            "/api/v1/categories/{}",
            movies["id"].as_str().expect("id")
        ))
        .insert_header(bearer(actor))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), expected);
}

#[actix_web::test]
async fn malformed_ids_are_rejected_before_lookup() {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::delete()
        .uri("/api/v1/categories/not-a-uuid")
        .insert_header(bearer(TEST_ADMIN))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
