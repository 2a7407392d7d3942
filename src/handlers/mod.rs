pub mod option;
pub mod response;
pub mod section;
pub mod survey;

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{HealthResponse, MessageResponse};
use crate::repository::{
    OptionRepository, ResponseRepository, SectionRepository, SurveyRepository,
};
use crate::services::{OptionService, ResponseService, SectionService, SurveyService};

pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: PgPool,
    pub survey_service: Arc<SurveyService>,
    pub section_service: Arc<SectionService>,
    pub option_service: Arc<OptionService>,
    pub response_service: Arc<ResponseService>,
}

impl AppState {
    pub fn new(config: Arc<Config>, db_pool: PgPool) -> Self {
        let survey_repo = Arc::new(SurveyRepository::new(db_pool.clone()));
        let section_repo = Arc::new(SectionRepository::new(db_pool.clone()));
        let option_repo = Arc::new(OptionRepository::new(db_pool.clone()));
        let response_repo = Arc::new(ResponseRepository::new(db_pool.clone()));

        let survey_service = Arc::new(SurveyService::new(survey_repo.clone()));
        let section_service = Arc::new(SectionService::new(
            section_repo.clone(),
            survey_repo.clone(),
        ));
        let option_service = Arc::new(OptionService::new(option_repo));
        let response_service = Arc::new(ResponseService::new(
            response_repo,
            survey_repo,
            section_repo,
        ));

        Self {
            config,
            db_pool,
            survey_service,
            section_service,
            option_service,
            response_service,
        }
    }
}

pub async fn index() -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Survey API is running".to_string(),
    }))
}

pub async fn health_check(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let database = match sqlx::query("SELECT 1").execute(&state.db_pool).await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        database: database.to_string(),
    }))
}
