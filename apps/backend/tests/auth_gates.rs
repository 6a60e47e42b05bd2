mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use argon2::Params;
use backend_test_support::assert_problem_details;
use common::read_json;
use serde_json::json;
use support::auth::{bearer, mint_expired_token, mint_test_token, sign_claims};
use support::factory::register;
use support::test_state::build_test_state_with;
use support::{build_test_state, create_test_app, send};
use todo_backend::auth::jwt::Claims;
use todo_backend::state::security_config::SecurityConfig;

#[actix_web::test]
async fn missing_authorization_header_is_rejected() {
    let app = create_test_app(build_test_state().await).await;

    for uri in ["/api/todos", "/api/me", "/api/admin/users"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        assert_problem_details(
            send(&app, req).await,
            "UNAUTHORIZED",
            StatusCode::UNAUTHORIZED,
            Some("Authorization header required"),
        )
        .await;
    }
}

#[actix_web::test]
async fn non_bearer_schemes_are_rejected() {
    let app = create_test_app(build_test_state().await).await;

    for value in ["Basic dXNlcjpwYXNz", "bearer abc.def.ghi", "Token abc"] {
        let req = test::TestRequest::get()
            .uri("/api/todos")
            .insert_header(("Authorization", value))
            .to_request();
        assert_problem_details(
            send(&app, req).await,
            "UNAUTHORIZED",
            StatusCode::UNAUTHORIZED,
            Some("Bearer token required"),
        )
        .await;
    }
}

#[actix_web::test]
async fn garbled_expired_and_foreign_tokens_are_invalid() {
    let state = build_test_state().await;
    let security = state.security.clone();
    let app = create_test_app(state).await;
    let alice = register(&app, "alice@example.com", "secret1").await;

    let foreign = SecurityConfig::new(b"some-other-deployment-secret".to_vec());
    let tokens = [
        String::new(),
        "not-a-token".to_string(),
        mint_expired_token(alice.id, &alice.email, &security),
        mint_test_token(alice.id, &alice.email, true, &foreign),
    ];

    for token in tokens {
        let req = test::TestRequest::get()
            .uri("/api/todos")
            .insert_header(bearer(&token))
            .to_request();
        assert_problem_details(
            send(&app, req).await,
            "UNAUTHORIZED",
            StatusCode::UNAUTHORIZED,
            Some("Invalid token"),
        )
        .await;
    }
}

#[actix_web::test]
async fn non_positive_subject_is_rejected() {
    let state = build_test_state().await;
    let security = state.security.clone();
    let app = create_test_app(state).await;

    let claims = Claims {
        user_id: 0,
        email: "ghost@example.com".to_string(),
        is_admin: true,
        exp: i64::MAX / 2,
    };
    let req = test::TestRequest::get()
        .uri("/api/todos")
        .insert_header(bearer(&sign_claims(&claims, &security)))
        .to_request();
    assert_problem_details(
        send(&app, req).await,
        "UNAUTHORIZED",
        StatusCode::UNAUTHORIZED,
        Some("Invalid user ID in token"),
    )
    .await;
}

#[actix_web::test]
async fn admin_routes_forbid_non_admins_and_allow_admins() {
    let app = create_test_app(build_test_state().await).await;
    let alice = register(&app, "alice@example.com", "secret1").await;
    let bob = register(&app, "bob@example.com", "secret2").await;

    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header(bearer(&bob.token))
        .to_request();
    assert_problem_details(
        send(&app, req).await,
        "FORBIDDEN",
        StatusCode::FORBIDDEN,
        Some("Admin access required"),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header(bearer(&alice.token))
        .to_request();
    let body = read_json(send(&app, req).await, 200).await;
    assert_eq!(body["users"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn admin_gate_trusts_the_token_flag() {
    let state = build_test_state().await;
    let security = state.security.clone();
    let app = create_test_app(state).await;
    register(&app, "alice@example.com", "secret1").await;
    let bob = register(&app, "bob@example.com", "secret2").await;

    // A correctly signed token is trusted as-is until it expires.
    let elevated = mint_test_token(bob.id, &bob.email, true, &security);
    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header(bearer(&elevated))
        .to_request();
    assert_eq!(send(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn public_routes_need_no_token() {
    let app = create_test_app(build_test_state().await).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    assert_eq!(send(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "nobody@example.com", "password": "secret1" }))
        .to_request();
    assert_eq!(send(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn missing_secret_fails_token_operations_with_config_error() {
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap();
    let security = SecurityConfig::new(Vec::new()).with_argon2_params(params);
    let app = create_test_app(build_test_state_with(security).await).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "alice@example.com", "password": "secret1" }))
        .to_request();
    assert_problem_details(
        send(&app, req).await,
        "CONFIG_ERROR",
        StatusCode::INTERNAL_SERVER_ERROR,
        None,
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/todos")
        .insert_header(("Authorization", "Bearer abc.def.ghi"))
        .to_request();
    assert_problem_details(
        send(&app, req).await,
        "CONFIG_ERROR",
        StatusCode::INTERNAL_SERVER_ERROR,
        None,
    )
    .await;
}

#[actix_web::test]
async fn error_responses_carry_security_headers() {
    let app = create_test_app(build_test_state().await).await;

    let req = test::TestRequest::get().uri("/api/me").to_request();
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let headers = resp.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("cache-control").unwrap(), "no-store");
    assert!(headers.contains_key("x-trace-id"));
    assert!(headers.contains_key("x-request-id"));
}
