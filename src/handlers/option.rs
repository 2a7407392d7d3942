use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{CreateOptionRequest, UpdateOptionRequest};
use crate::utils::validate_request;

use super::AppState;

pub async fn create_option(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<CreateOptionRequest>,
) -> AppResult<HttpResponse> {
    let req = req.into_inner();
    validate_request(&req)?;
    let option = state.option_service.create(path.into_inner(), req).await?;
    Ok(HttpResponse::Created().json(option))
}

pub async fn update_option(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateOptionRequest>,
) -> AppResult<HttpResponse> {
    let req = req.into_inner();
    validate_request(&req)?;
    let option = state.option_service.update(path.into_inner(), req).await?;
    Ok(HttpResponse::Ok().json(option))
}

pub async fn delete_option(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.option_service.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
