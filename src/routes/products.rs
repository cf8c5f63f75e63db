use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::product::ProductFilter;
use crate::forms::products::{
    BestSellersQuery, CreateProductPayload, FilterProductsQuery, ProductForm,
    UpdateProductPayload,
};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::products::{
    best_selling_products as best_selling_products_service,
    create_product as create_product_service, delete_product as delete_product_service,
    filter_products as filter_products_service, find_product as find_product_service,
    list_products as list_products_service,
    search_products_by_name as search_products_by_name_service,
    update_product as update_product_service,
};

#[get("/produtos")]
pub async fn list_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_products_service(repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(&err),
    }
}

#[get("/produtos/{product_id}")]
pub async fn find_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match find_product_service(product_id.into_inner(), repo.get_ref()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(&err),
    }
}

#[get("/produtos/nome/{nome}")]
pub async fn search_products_by_name(
    nome: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match search_products_by_name_service(&nome, repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(&err),
    }
}

#[get("/produtos/mais-vendidos")]
pub async fn best_selling_products(
    web::Query(params): web::Query<BestSellersQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let limit = match params.limit() {
        Ok(limit) => limit,
        Err(e) => return error_response(&ServiceError::from(e)),
    };

    match best_selling_products_service(limit, repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(&err),
    }
}

#[get("/produtos/filtrar")]
pub async fn filter_products(
    web::Query(params): web::Query<FilterProductsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let filter = match ProductFilter::try_from(params) {
        Ok(filter) => filter,
        Err(e) => return error_response(&ServiceError::from(e)),
    };

    match filter_products_service(filter, repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(&err),
    }
}

#[post("/produtos")]
pub async fn create_product(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProductForm>,
) -> impl Responder {
    let payload: CreateProductPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(&ServiceError::from(e)),
    };

    match create_product_service(payload, repo.get_ref()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response(&err),
    }
}

#[put("/produtos")]
pub async fn update_product(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProductForm>,
) -> impl Responder {
    let payload: UpdateProductPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(&ServiceError::from(e)),
    };

    match update_product_service(payload, repo.get_ref()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(&err),
    }
}

#[delete("/produtos/{product_id}")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_product_service(product_id.into_inner(), repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}
