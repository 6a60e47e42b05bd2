#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Read a JSON success body, asserting the expected status first.
pub async fn read_json(resp: ServiceResponse<BoxBody>, expected_status: u16) -> Value {
    assert_eq!(
        resp.status().as_u16(),
        expected_status,
        "unexpected status for {}",
        resp.request().path()
    );
    test::read_body_json(resp).await
}
