//! HTTP boundary: route registration and translation of service outcomes
//! into responses.

use std::fmt::{Debug, Display};

use actix_web::error::InternalError;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};

use crate::dto::api::ErrorResponse;
use crate::forms::field_messages;
use crate::middleware::RequestContext;
use crate::services::{ServiceError, ServiceResult};

pub mod customer;

/// Versioned prefix shared by every API route.
pub const API_BASE_PATH: &str = "/api/v1";

/// Registers the customer API together with binding error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_BASE_PATH)
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, req| binding_error("request body", err, req)),
            )
            .app_data(
                web::QueryConfig::default()
                    .error_handler(|err, req| binding_error("query string", err, req)),
            )
            .app_data(
                web::PathConfig::default()
                    .error_handler(|err, req| binding_error("path", err, req)),
            )
            .service(customer::list_customers)
            .service(customer::get_customer)
            .service(customer::create_customer)
            .service(customer::update_customer)
            .service(customer::delete_customer),
    );
}

/// Turns an extractor failure into a `400` carrying the parser message.
fn binding_error<E>(kind: &str, err: E, req: &HttpRequest) -> actix_web::Error
where
    E: Debug + Display + 'static,
{
    let correlation_id = req
        .extensions()
        .get::<RequestContext>()
        .map(|context| context.correlation_id.clone())
        .unwrap_or_default();
    log::warn!("Invalid {kind}: {err}. CorrelationId: {correlation_id}");

    let response =
        HttpResponse::BadRequest().json(ErrorResponse::message(format!("Invalid {kind}: {err}")));
    InternalError::from_response(err, response).into()
}

/// Maps a service failure to its HTTP status, logging it with the request's
/// correlation id.
pub fn error_response(context: &RequestContext, err: ServiceError) -> HttpResponse {
    let correlation_id = &context.correlation_id;

    match err {
        ServiceError::InvalidFields(errors) => {
            log::error!("Validation failure: {errors}. CorrelationId: {correlation_id}");
            HttpResponse::BadRequest().json(ErrorResponse::with_fields(
                "validation failed",
                field_messages(&errors),
            ))
        }
        ServiceError::Validation(message) => {
            log::error!("Validation failure: {message}. CorrelationId: {correlation_id}");
            HttpResponse::BadRequest().json(ErrorResponse::message(message))
        }
        ServiceError::NotFound => {
            log::error!("Customer not found. CorrelationId: {correlation_id}");
            HttpResponse::NotFound().json(ErrorResponse::message("customer not found"))
        }
        ServiceError::Persistence(message) => {
            log::error!("Persistence failure: {message}. CorrelationId: {correlation_id}");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::message("internal server error"))
        }
    }
}

/// Runs a blocking service call on the actix blocking thread pool.
pub async fn run_blocking<T, F>(f: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(f).await.unwrap_or_else(|err| {
        Err(ServiceError::Persistence(format!(
            "blocking task failed: {err}"
        )))
    })
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use validator::Validate;

    use super::*;
    use crate::forms::customer::CustomerRequestDto;

    fn context() -> RequestContext {
        RequestContext {
            correlation_id: "test-correlation".to_string(),
        }
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            error_response(&context(), ServiceError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(&context(), ServiceError::Validation("bad".to_string())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(&context(), ServiceError::Persistence("down".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn field_errors_are_listed_per_field() {
        let dto: CustomerRequestDto = serde_json::from_str(
            r#"{"firstName": "A", "surname": "B", "email": "nope", "password": "Password01@"}"#,
        )
        .unwrap();
        let errors = dto.validate().unwrap_err();

        let response = error_response(&context(), ServiceError::InvalidFields(errors));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "validation failed");
        assert!(json["fields"]["email"].is_array());
        assert!(json["fields"].get("surname").is_none());
    }

    #[test]
    fn persistence_details_are_not_leaked() {
        let response = error_response(
            &context(),
            ServiceError::Persistence("database is locked".to_string()),
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
