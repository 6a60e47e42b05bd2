mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::assert_problem_details;
use common::read_json;
use support::auth::{bearer, mint_test_token};
use support::factory::register;
use support::{build_test_state, create_test_app, send};

#[actix_web::test]
async fn me_returns_the_token_subject() {
    let app = create_test_app(build_test_state().await).await;
    register(&app, "alice@example.com", "secret1").await;
    let bob = register(&app, "bob@example.com", "secret2").await;

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(bearer(&bob.token))
        .to_request();
    let body = read_json(send(&app, req).await, 200).await;
    assert_eq!(body["user"]["id"].as_i64(), Some(bob.id));
    assert_eq!(body["user"]["email"], "bob@example.com");
    assert_eq!(body["user"]["is_admin"], false);
}

#[actix_web::test]
async fn me_for_unknown_subject_is_not_found() {
    let state = build_test_state().await;
    let security = state.security.clone();
    let app = create_test_app(state).await;

    let token = mint_test_token(4242, "ghost@example.com", false, &security);
    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(bearer(&token))
        .to_request();
    assert_problem_details(
        send(&app, req).await,
        "USER_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}
