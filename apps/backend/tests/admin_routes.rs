mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::assert_problem_details;
use common::read_json;
use serde_json::json;
use support::auth::bearer;
use support::factory::{create_todo, register};
use support::{build_test_state, create_test_app, send};

#[actix_web::test]
async fn admin_can_read_users() {
    let app = create_test_app(build_test_state().await).await;
    let alice = register(&app, "alice@example.com", "secret1").await;
    let bob = register(&app, "bob@example.com", "secret2").await;

    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header(bearer(&alice.token))
        .to_request();
    let body = read_json(send(&app, req).await, 200).await;
    let emails: Vec<&str> = body["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, ["alice@example.com", "bob@example.com"]);

    let req = test::TestRequest::get()
        .uri(&format!("/api/admin/users/{}", bob.id))
        .insert_header(bearer(&alice.token))
        .to_request();
    let body = read_json(send(&app, req).await, 200).await;
    assert_eq!(body["user"]["email"], "bob@example.com");
    assert_eq!(body["user"]["is_admin"], false);
    assert!(body["user"].get("password_hash").is_none());
}

#[actix_web::test]
async fn unknown_user_is_not_found() {
    let app = create_test_app(build_test_state().await).await;
    let alice = register(&app, "alice@example.com", "secret1").await;

    for method in ["GET", "DELETE", "PATCH"] {
        let req = match method {
            "GET" => test::TestRequest::get(),
            "DELETE" => test::TestRequest::delete(),
            _ => test::TestRequest::patch().set_json(json!({ "is_admin": true })),
        }
        .uri("/api/admin/users/9999")
        .insert_header(bearer(&alice.token))
        .to_request();
        assert_problem_details(
            send(&app, req).await,
            "USER_NOT_FOUND",
            StatusCode::NOT_FOUND,
            Some("User not found"),
        )
        .await;
    }
}

#[actix_web::test]
async fn malformed_path_id_is_bad_request() {
    let app = create_test_app(build_test_state().await).await;
    let alice = register(&app, "alice@example.com", "secret1").await;

    for raw in ["abc", "0", "-3"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/admin/users/{raw}"))
            .insert_header(bearer(&alice.token))
            .to_request();
        assert_problem_details(
            send(&app, req).await,
            "INVALID_ID",
            StatusCode::BAD_REQUEST,
            Some(raw),
        )
        .await;
    }
}

#[actix_web::test]
async fn admin_cannot_delete_self() {
    let app = create_test_app(build_test_state().await).await;
    let alice = register(&app, "alice@example.com", "secret1").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/users/{}", alice.id))
        .insert_header(bearer(&alice.token))
        .to_request();
    assert_problem_details(
        send(&app, req).await,
        "SELF_DELETION",
        StatusCode::BAD_REQUEST,
        Some("Cannot delete yourself"),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/admin/users/{}", alice.id))
        .insert_header(bearer(&alice.token))
        .to_request();
    assert_eq!(send(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn delete_user_removes_account_and_todos() {
    let app = create_test_app(build_test_state().await).await;
    let alice = register(&app, "alice@example.com", "secret1").await;
    let bob = register(&app, "bob@example.com", "secret2").await;
    create_todo(&app, &bob.token, "buy milk").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/users/{}", bob.id))
        .insert_header(bearer(&alice.token))
        .to_request();
    let body = read_json(send(&app, req).await, 200).await;
    assert_eq!(body["message"], "User deleted successfully");

    let req = test::TestRequest::get()
        .uri(&format!("/api/admin/users/{}", bob.id))
        .insert_header(bearer(&alice.token))
        .to_request();
    assert_eq!(send(&app, req).await.status(), StatusCode::NOT_FOUND);

    // Bob's token is still well-formed, but his data is gone.
    let req = test::TestRequest::get()
        .uri("/api/todos")
        .insert_header(bearer(&bob.token))
        .to_request();
    let body = read_json(send(&app, req).await, 200).await;
    assert_eq!(body["todos"], json!([]));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/users/{}", bob.id))
        .insert_header(bearer(&alice.token))
        .to_request();
    assert_eq!(send(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleted_email_cannot_be_registered_again() {
    let app = create_test_app(build_test_state().await).await;
    let alice = register(&app, "alice@example.com", "secret1").await;
    let bob = register(&app, "bob@example.com", "secret2").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/users/{}", bob.id))
        .insert_header(bearer(&alice.token))
        .to_request();
    assert_eq!(send(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "bob@example.com", "password": "secret2" }))
        .to_request();
    assert_problem_details(send(&app, req).await, "EMAIL_TAKEN", StatusCode::CONFLICT, None)
        .await;
}

#[actix_web::test]
async fn admin_flag_can_be_granted_and_self_revoked() {
    let app = create_test_app(build_test_state().await).await;
    let alice = register(&app, "alice@example.com", "secret1").await;
    let bob = register(&app, "bob@example.com", "secret2").await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/users/{}", bob.id))
        .insert_header(bearer(&alice.token))
        .set_json(json!({ "is_admin": true }))
        .to_request();
    let body = read_json(send(&app, req).await, 200).await;
    assert_eq!(body["user"]["is_admin"], true);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/users/{}", alice.id))
        .insert_header(bearer(&alice.token))
        .set_json(json!({ "is_admin": false }))
        .to_request();
    let body = read_json(send(&app, req).await, 200).await;
    assert_eq!(body["user"]["is_admin"], false);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/users/{}", alice.id))
        .insert_header(bearer(&alice.token))
        .set_json(json!({ "admin": true }))
        .to_request();
    assert_problem_details(
        send(&app, req).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}
