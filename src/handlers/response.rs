use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::SubmitResponseRequest;

use super::AppState;

pub async fn submit_response(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<SubmitResponseRequest>,
) -> AppResult<HttpResponse> {
    let response = state
        .response_service
        .submit(path.into_inner(), req.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

pub async fn list_responses(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let responses = state.response_service.list(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(responses))
}

pub async fn survey_statistics(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let stats = state
        .response_service
        .survey_statistics(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(stats))
}

pub async fn section_statistics(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (survey_id, section_id) = path.into_inner();
    let stats = state
        .response_service
        .section_statistics(survey_id, section_id)
        .await?;
    Ok(HttpResponse::Ok().json(stats))
}
