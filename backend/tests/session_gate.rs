//! Sign-in and session requirements on the form routes.

#[macro_use]
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use dashboard_backend::domain::TRACE_ID_HEADER;
use support::{Harness, customer_request};

#[rstest]
#[case::create_invoice("/dashboard/invoices")]
#[case::update_invoice("/dashboard/invoices/3958dc9e-712f-4377-85e9-fec4b6a6442a")]
#[case::delete_invoice("/dashboard/invoices/3958dc9e-712f-4377-85e9-fec4b6a6442a/delete")]
#[actix_web::test]
async fn invoice_routes_require_a_session(#[case] uri: &str) {
    let harness = Harness::in_memory();
    let app = test::init_service(harness.app()).await;

    let req = test::TestRequest::post()
        .uri(uri)
        .set_form(vec![("amount", "1")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(harness.cache.seen().is_empty());
}

#[rstest]
#[actix_web::test]
async fn customer_route_requires_a_session() {
    let harness = Harness::in_memory();
    let app = test::init_service(harness.app()).await;

    let req = customer_request("Ada", "ada@example.com", "image/png", &[1; 8]).to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(harness.assets.uploads(), 0);
}

#[rstest]
#[actix_web::test]
async fn wrong_password_is_reported_plainly() {
    let harness = Harness::in_memory();
    let app = test::init_service(harness.app()).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form(vec![("username", "admin"), ("password", "nope")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(
        res.response()
            .cookies()
            .all(|cookie| cookie.name() != "session")
    );
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "error": "Invalid credentials." }));
}

#[rstest]
#[actix_web::test]
async fn every_response_carries_a_trace_id() {
    let harness = Harness::in_memory();
    let app = test::init_service(harness.app()).await;
    let cookie = sign_in!(&app);

    let req = test::TestRequest::post()
        .uri("/dashboard/invoices/not-a-uuid/delete")
        .cookie(cookie)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
}
