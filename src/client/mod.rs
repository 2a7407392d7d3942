mod store;
mod view;

pub use store::*;
pub use view::*;

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{AnswerInput, ResponseStatus, SubmitResponseRequest, Survey, SurveyResponse};

/// Typed HTTP client for the survey API
#[derive(Debug, Clone)]
pub struct SurveyClient {
    base_url: String,
    http: reqwest::Client,
}

impl SurveyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn fetch_surveys(&self) -> AppResult<Vec<Survey>> {
        let surveys = self
            .http
            .get(format!("{}/surveys", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(surveys)
    }

    pub async fn fetch_survey(&self, id: Uuid) -> AppResult<Survey> {
        let survey = self
            .http
            .get(format!("{}/surveys/{}", self.base_url, id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(survey)
    }

    pub async fn submit_response(
        &self,
        survey_id: Uuid,
        status: ResponseStatus,
        answers: Vec<AnswerInput>,
    ) -> AppResult<SurveyResponse> {
        let body = SubmitResponseRequest { status, answers };
        let response = self
            .http
            .post(format!("{}/surveys/{}/responses", self.base_url, survey_id))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response)
    }
}
