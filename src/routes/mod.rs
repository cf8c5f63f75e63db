use actix_web::{HttpResponse, error, web};
use serde::Serialize;

use crate::services::{Resource, ServiceError};

pub mod categories;
pub mod products;

/// Body returned with every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Map a service error onto its HTTP status and JSON body.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound(Resource::Product) => {
            HttpResponse::NotFound().json(ErrorMessage::new("Produto não encontrado"))
        }
        ServiceError::NotFound(Resource::Category) => {
            HttpResponse::NotFound().json(ErrorMessage::new("Categoria não encontrada"))
        }
        ServiceError::Form(message) => HttpResponse::BadRequest().json(ErrorMessage::new(message)),
        ServiceError::Internal => HttpResponse::InternalServerError()
            .json(ErrorMessage::new("Erro interno do servidor")),
    }
}

fn bad_request<E>(err: E) -> error::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let response = HttpResponse::BadRequest().json(ErrorMessage::new(err.to_string()));
    error::InternalError::from_response(err, response).into()
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorMessage::new("Recurso não encontrado"))
}

/// Register every catalog route.
///
/// Literal segments (`/mais-vendidos`, `/filtrar`) are registered before
/// `/{id}` so they are never captured as an identifier. Unknown paths get a
/// JSON 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| bad_request(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _| bad_request(err)))
        .app_data(web::PathConfig::default().error_handler(|err, _| bad_request(err)))
        .service(products::list_products)
        .service(products::best_selling_products)
        .service(products::filter_products)
        .service(products::search_products_by_name)
        .service(products::find_product)
        .service(products::create_product)
        .service(products::update_product)
        .service(products::delete_product)
        .service(categories::list_categories)
        .service(categories::search_categories_by_name)
        .service(categories::find_category)
        .service(categories::create_category)
        .service(categories::update_category)
        .service(categories::delete_category)
        .default_service(web::to(not_found));
}
