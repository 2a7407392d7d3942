use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{CreateSectionRequest, UpdateSectionRequest};
use crate::utils::validate_request;

use super::AppState;

pub async fn list_sections(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let sections = state.section_service.list(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(sections))
}

pub async fn get_section(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (survey_id, section_id) = path.into_inner();
    let section = state.section_service.get(survey_id, section_id).await?;
    Ok(HttpResponse::Ok().json(section))
}

pub async fn create_section(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<CreateSectionRequest>,
) -> AppResult<HttpResponse> {
    let req = req.into_inner();
    validate_request(&req)?;
    let section = state.section_service.create(path.into_inner(), req).await?;
    Ok(HttpResponse::Created().json(section))
}

pub async fn update_section(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    req: web::Json<UpdateSectionRequest>,
) -> AppResult<HttpResponse> {
    let req = req.into_inner();
    validate_request(&req)?;
    let (survey_id, section_id) = path.into_inner();
    let section = state
        .section_service
        .update(survey_id, section_id, req)
        .await?;
    Ok(HttpResponse::Ok().json(section))
}

pub async fn delete_section(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (survey_id, section_id) = path.into_inner();
    state.section_service.delete(survey_id, section_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
