use actix_web::middleware::from_fn;
use actix_web::{App, HttpResponse, test, web};
use customer_mngt::middleware::{CORRELATION_ID_HEADER, RequestContext, correlation_id};

async fn echo_context(context: RequestContext) -> HttpResponse {
    HttpResponse::Ok().body(context.correlation_id)
}

#[actix_web::test]
async fn test_generates_correlation_id_when_absent() {
    let app = test::init_service(
        App::new()
            .wrap(from_fn(correlation_id))
            .route("/", web::get().to(echo_context)),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert!(resp.status().is_success());

    let header = resp
        .headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .expect("correlation id header");
    let body = test::read_body(resp).await;

    assert!(!header.is_empty());
    assert_eq!(body, header.as_bytes());
}

#[actix_web::test]
async fn test_echoes_supplied_correlation_id() {
    let app = test::init_service(
        App::new()
            .wrap(from_fn(correlation_id))
            .route("/", web::get().to(echo_context)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((CORRELATION_ID_HEADER, "req-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(
        resp.headers().get(CORRELATION_ID_HEADER).unwrap(),
        "req-123"
    );
    assert_eq!(test::read_body(resp).await, "req-123");
}

#[actix_web::test]
async fn test_blank_correlation_id_is_replaced() {
    let app = test::init_service(
        App::new()
            .wrap(from_fn(correlation_id))
            .route("/", web::get().to(echo_context)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((CORRELATION_ID_HEADER, "   "))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let header = resp.headers().get(CORRELATION_ID_HEADER).unwrap();
    assert!(!header.to_str().unwrap().trim().is_empty());
}
