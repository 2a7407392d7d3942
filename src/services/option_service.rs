use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{CreateOptionRequest, QuestionOption, UpdateOptionRequest};
use crate::repository::OptionRepository;

pub struct OptionService {
    option_repo: Arc<OptionRepository>,
}

impl OptionService {
    pub fn new(option_repo: Arc<OptionRepository>) -> Self {
        Self { option_repo }
    }

    pub async fn create(
        &self,
        question_id: Uuid,
        req: CreateOptionRequest,
    ) -> AppResult<QuestionOption> {
        if !self.option_repo.question_exists(question_id).await? {
            return Err(AppError::NotFound("Question not found".to_string()));
        }

        // Stored value falls back to the display label
        let value = req.value.as_deref().unwrap_or(&req.label);
        self.option_repo.create(question_id, &req.label, value).await
    }

    pub async fn update(&self, id: Uuid, req: UpdateOptionRequest) -> AppResult<QuestionOption> {
        self.option_repo
            .update(id, req.label.as_deref(), req.value.as_deref())
            .await?
            .ok_or_else(|| AppError::NotFound("Option not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.option_repo.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Option not found".to_string()))
        }
    }
}
