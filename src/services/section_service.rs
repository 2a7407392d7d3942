use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{CreateSectionRequest, NewSection, Section, UpdateSectionRequest};
use crate::repository::{SectionRepository, SurveyRepository};

use super::survey_service::build_new_questions;

pub struct SectionService {
    section_repo: Arc<SectionRepository>,
    survey_repo: Arc<SurveyRepository>,
}

impl SectionService {
    pub fn new(section_repo: Arc<SectionRepository>, survey_repo: Arc<SurveyRepository>) -> Self {
        Self {
            section_repo,
            survey_repo,
        }
    }

    pub async fn list(&self, survey_id: Uuid) -> AppResult<Vec<Section>> {
        if !self.survey_repo.exists(survey_id).await? {
            return Err(AppError::NotFound("Survey not found".to_string()));
        }
        self.section_repo.list_by_survey(survey_id).await
    }

    pub async fn get(&self, survey_id: Uuid, section_id: Uuid) -> AppResult<Section> {
        self.section_repo
            .find_scoped(survey_id, section_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Section not found".to_string()))
    }

    pub async fn create(&self, survey_id: Uuid, req: CreateSectionRequest) -> AppResult<Section> {
        // Attaching to a missing survey is a malformed request, not a lookup miss
        if !self.survey_repo.exists(survey_id).await? {
            return Err(AppError::BadRequest("Survey does not exist".to_string()));
        }

        let order_index = match req.order_index {
            Some(order_index) => order_index,
            // Default to the end of the survey
            None => self.section_repo.count_by_survey(survey_id).await? as i32,
        };

        let section = NewSection {
            id: Uuid::new_v4(),
            title: req.title,
            order_index,
            questions: build_new_questions(req.questions)?,
        };

        self.section_repo.create(survey_id, &section).await
    }

    pub async fn update(
        &self,
        survey_id: Uuid,
        section_id: Uuid,
        req: UpdateSectionRequest,
    ) -> AppResult<Section> {
        let updated = self
            .section_repo
            .update_scoped(survey_id, section_id, req.title.as_deref(), req.order_index)
            .await?;
        if !updated {
            return Err(AppError::NotFound("Section not found".to_string()));
        }

        self.get(survey_id, section_id).await
    }

    pub async fn delete(&self, survey_id: Uuid, section_id: Uuid) -> AppResult<()> {
        if self.section_repo.delete_scoped(survey_id, section_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Section not found".to_string()))
        }
    }
}
