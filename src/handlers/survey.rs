use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{CreateSurveyRequest, UpdateSurveyRequest};
use crate::utils::validate_request;

use super::AppState;

pub async fn list_surveys(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let surveys = state.survey_service.list().await?;
    Ok(HttpResponse::Ok().json(surveys))
}

pub async fn list_draft_surveys(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let surveys = state.survey_service.list_drafts().await?;
    Ok(HttpResponse::Ok().json(surveys))
}

pub async fn get_survey(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let survey = state.survey_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(survey))
}

pub async fn create_survey(
    state: web::Data<AppState>,
    req: web::Json<CreateSurveyRequest>,
) -> AppResult<HttpResponse> {
    let req = req.into_inner();
    validate_request(&req)?;
    let survey = state.survey_service.create(req).await?;
    Ok(HttpResponse::Created().json(survey))
}

pub async fn update_survey(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateSurveyRequest>,
) -> AppResult<HttpResponse> {
    let req = req.into_inner();
    validate_request(&req)?;
    let survey = state.survey_service.update(path.into_inner(), req).await?;
    Ok(HttpResponse::Ok().json(survey))
}

pub async fn duplicate_survey(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let survey = state.survey_service.duplicate(path.into_inner()).await?;
    Ok(HttpResponse::Created().json(survey))
}

pub async fn publish_survey(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let survey = state.survey_service.publish(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(survey))
}

pub async fn unpublish_survey(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let survey = state.survey_service.unpublish(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(survey))
}

pub async fn delete_draft_survey(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.survey_service.delete_draft(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
