//! Request correlation for log lines and responses.

use std::future::{Ready, ready};

use actix_web::body::MessageBody;
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use uuid::Uuid;

/// Header carrying the correlation id in both directions.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

const MAX_CORRELATION_ID_LEN: usize = 128;

/// Request-scoped context available to route handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub correlation_id: String,
}

impl RequestContext {
    fn generate() -> Self {
        Self {
            correlation_id: Uuid::new_v4().to_string(),
        }
    }

    fn from_header(req: &ServiceRequest) -> Self {
        req.headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty() && value.len() <= MAX_CORRELATION_ID_LEN)
            .map(|value| Self {
                correlation_id: value.to_string(),
            })
            .unwrap_or_else(Self::generate)
    }
}

impl FromRequest for RequestContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let context = req
            .extensions()
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_else(Self::generate);
        ready(Ok(context))
    }
}

/// Accepts or assigns a correlation id and echoes it on the response.
pub async fn correlation_id(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let context = RequestContext::from_header(&req);
    let header_value = HeaderValue::from_str(&context.correlation_id).ok();
    req.extensions_mut().insert(context);

    let mut res = next.call(req).await?;

    if let Some(value) = header_value {
        res.headers_mut()
            .insert(HeaderName::from_static(CORRELATION_ID_HEADER), value);
    }

    Ok(res)
}
