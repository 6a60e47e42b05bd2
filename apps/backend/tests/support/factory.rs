//! Drive the public API to set up fixtures.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use serde_json::{json, Value};

use super::auth::bearer;
use super::send;

/// A user created through `POST /api/auth/register`.
#[derive(Debug, Clone)]
pub struct Registered {
    pub id: i64,
    pub email: String,
    pub token: String,
    pub is_admin: bool,
}

pub async fn register<S, B>(app: &S, email: &str, password: &str) -> Registered
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody + 'static,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = send(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "register {email}");

    let body: Value = test::read_body_json(resp).await;
    Registered {
        id: body["user"]["id"].as_i64().expect("user.id"),
        email: email.to_string(),
        token: body["token"].as_str().expect("token").to_string(),
        is_admin: body["user"]["is_admin"].as_bool().expect("user.is_admin"),
    }
}

pub async fn create_todo<S, B>(app: &S, token: &str, title: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody + 'static,
{
    let req = test::TestRequest::post()
        .uri("/api/todos")
        .insert_header(bearer(token))
        .set_json(json!({ "title": title }))
        .to_request();
    let resp = send(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "create todo {title}");

    let body: Value = test::read_body_json(resp).await;
    body["todo"].clone()
}
