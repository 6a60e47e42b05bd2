use actix_http::Request;
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use todo_backend::middleware::{
    cors_middleware, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use todo_backend::routes;
use todo_backend::state::app_state::AppState;

/// Build a test service with the production route table and middleware stack.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let data = web::Data::new(state);

    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(cors_middleware())
            .wrap(SecurityHeaders)
            .app_data(data)
            .configure(routes::configure),
    )
    .await
}

/// Call the service and box the body so problem-details helpers can read it.
pub async fn send<S, B>(app: &S, req: Request) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody + 'static,
{
    test::call_service(app, req).await.map_into_boxed_body()
}
