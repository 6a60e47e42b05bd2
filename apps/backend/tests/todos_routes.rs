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
async fn create_and_list_newest_first() {
    let app = create_test_app(build_test_state().await).await;
    let alice = register(&app, "alice@example.com", "secret1").await;

    let req = test::TestRequest::post()
        .uri("/api/todos")
        .insert_header(bearer(&alice.token))
        .set_json(json!({ "title": "first", "description": "details" }))
        .to_request();
    let body = read_json(send(&app, req).await, 201).await;
    assert_eq!(body["todo"]["title"], "first");
    assert_eq!(body["todo"]["description"], "details");
    assert_eq!(body["todo"]["completed"], false);
    assert_eq!(body["todo"]["user_id"].as_i64(), Some(alice.id));

    create_todo(&app, &alice.token, "second").await;

    let req = test::TestRequest::get()
        .uri("/api/todos")
        .insert_header(bearer(&alice.token))
        .to_request();
    let body = read_json(send(&app, req).await, 200).await;
    let titles: Vec<&str> = body["todos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["second", "first"]);
}

#[actix_web::test]
async fn todos_are_scoped_to_their_owner() {
    let app = create_test_app(build_test_state().await).await;
    let alice = register(&app, "alice@example.com", "secret1").await;
    let bob = register(&app, "bob@example.com", "secret2").await;
    let todo = create_todo(&app, &bob.token, "bob's todo").await;
    let id = todo["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/todos")
        .insert_header(bearer(&alice.token))
        .to_request();
    let body = read_json(send(&app, req).await, 200).await;
    assert_eq!(body["todos"], json!([]));

    // Admin status grants nothing over other users' todos.
    let attempts = [
        test::TestRequest::get(),
        test::TestRequest::put().set_json(json!({ "completed": true })),
        test::TestRequest::delete(),
    ];
    for attempt in attempts {
        let req = attempt
            .uri(&format!("/api/todos/{id}"))
            .insert_header(bearer(&alice.token))
            .to_request();
        assert_problem_details(
            send(&app, req).await,
            "TODO_NOT_FOUND",
            StatusCode::NOT_FOUND,
            Some("Todo not found"),
        )
        .await;
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/todos/{id}"))
        .insert_header(bearer(&bob.token))
        .to_request();
    let body = read_json(send(&app, req).await, 200).await;
    assert_eq!(body["todo"]["completed"], false);
}

#[actix_web::test]
async fn update_changes_only_supplied_fields() {
    let app = create_test_app(build_test_state().await).await;
    let alice = register(&app, "alice@example.com", "secret1").await;

    let req = test::TestRequest::post()
        .uri("/api/todos")
        .insert_header(bearer(&alice.token))
        .set_json(json!({ "title": "write report", "description": "draft" }))
        .to_request();
    let body = read_json(send(&app, req).await, 201).await;
    let id = body["todo"]["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/todos/{id}"))
        .insert_header(bearer(&alice.token))
        .set_json(json!({ "completed": true, "title": null }))
        .to_request();
    let body = read_json(send(&app, req).await, 200).await;
    assert_eq!(body["todo"]["title"], "write report");
    assert_eq!(body["todo"]["description"], "draft");
    assert_eq!(body["todo"]["completed"], true);

    // An explicit empty description clears it.
    let req = test::TestRequest::put()
        .uri(&format!("/api/todos/{id}"))
        .insert_header(bearer(&alice.token))
        .set_json(json!({ "description": "" }))
        .to_request();
    let body = read_json(send(&app, req).await, 200).await;
    assert_eq!(body["todo"]["description"], "");
    assert_eq!(body["todo"]["completed"], true);

    let req = test::TestRequest::put()
        .uri(&format!("/api/todos/{id}"))
        .insert_header(bearer(&alice.token))
        .set_json(json!({ "title": "" }))
        .to_request();
    assert_problem_details(
        send(&app, req).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("title"),
    )
    .await;
}

#[actix_web::test]
async fn delete_removes_the_todo() {
    let app = create_test_app(build_test_state().await).await;
    let alice = register(&app, "alice@example.com", "secret1").await;
    let todo = create_todo(&app, &alice.token, "temporary").await;
    let id = todo["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/todos/{id}"))
        .insert_header(bearer(&alice.token))
        .to_request();
    let body = read_json(send(&app, req).await, 200).await;
    assert_eq!(body["message"], "Todo deleted successfully");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/todos/{id}"))
        .insert_header(bearer(&alice.token))
        .to_request();
    assert_eq!(send(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn create_requires_title_and_valid_id() {
    let app = create_test_app(build_test_state().await).await;
    let alice = register(&app, "alice@example.com", "secret1").await;

    let req = test::TestRequest::post()
        .uri("/api/todos")
        .insert_header(bearer(&alice.token))
        .set_json(json!({ "title": "" }))
        .to_request();
    assert_problem_details(
        send(&app, req).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("title is required"),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/todos/not-a-number")
        .insert_header(bearer(&alice.token))
        .to_request();
    assert_problem_details(
        send(&app, req).await,
        "INVALID_ID",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}
