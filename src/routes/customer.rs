use actix_web::http::header;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::types::CustomerId;
use crate::dto::api::ErrorResponse;
use crate::dto::customer::CreatedCustomerDto;
use crate::forms::customer::{CustomerFilterDto, CustomerRequestDto};
use crate::middleware::RequestContext;
use crate::repository::DieselRepository;
use crate::routes::{API_BASE_PATH, error_response, run_blocking};
use crate::services::customer as customer_service;

/// Rejects non-positive identifiers before any service call.
fn parse_id(context: &RequestContext, id: i32) -> Result<CustomerId, HttpResponse> {
    CustomerId::new(id).map_err(|err| {
        log::error!(
            "Invalid id {id}: {err}. CorrelationId: {}",
            context.correlation_id
        );
        HttpResponse::BadRequest().json(ErrorResponse::message("Invalid id."))
    })
}

#[get("/customer")]
pub async fn list_customers(
    context: RequestContext,
    repo: web::Data<DieselRepository>,
    web::Query(filter): web::Query<CustomerFilterDto>,
) -> impl Responder {
    let result =
        run_blocking(move || customer_service::list_customers(repo.get_ref(), &filter)).await;

    match result {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&context, err),
    }
}

#[get("/customer/{id}")]
pub async fn get_customer(
    context: RequestContext,
    repo: web::Data<DieselRepository>,
    id: web::Path<i32>,
) -> impl Responder {
    let id = match parse_id(&context, id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let filter = CustomerFilterDto::by_id(id);
    let result =
        run_blocking(move || customer_service::get_customer(repo.get_ref(), &filter)).await;

    match result {
        Ok(Some(customer)) => HttpResponse::Ok().json(customer),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::message("customer not found")),
        Err(err) => error_response(&context, err),
    }
}

#[post("/customer")]
pub async fn create_customer(
    context: RequestContext,
    repo: web::Data<DieselRepository>,
    web::Json(request): web::Json<CustomerRequestDto>,
) -> impl Responder {
    let result =
        run_blocking(move || customer_service::create_customer(repo.get_ref(), &request)).await;

    match result {
        Ok(id) => HttpResponse::Created()
            .insert_header((header::LOCATION, format!("{API_BASE_PATH}/customer/{id}")))
            .json(CreatedCustomerDto { id: id.get() }),
        Err(err) => error_response(&context, err),
    }
}

#[put("/customer/{id}")]
pub async fn update_customer(
    context: RequestContext,
    repo: web::Data<DieselRepository>,
    id: web::Path<i32>,
    web::Json(request): web::Json<CustomerRequestDto>,
) -> impl Responder {
    let id = match parse_id(&context, id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result =
        run_blocking(move || customer_service::update_customer(repo.get_ref(), id, &request))
            .await;

    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&context, err),
    }
}

#[delete("/customer/{id}")]
pub async fn delete_customer(
    context: RequestContext,
    repo: web::Data<DieselRepository>,
    id: web::Path<i32>,
) -> impl Responder {
    let id = match parse_id(&context, id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = run_blocking(move || customer_service::delete_customer(repo.get_ref(), id)).await;

    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&context, err),
    }
}
