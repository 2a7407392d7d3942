use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    AnswerInput, Question, QuestionBody, QuestionOption, ResponseStatus, SectionStatistics,
    SubmitResponseRequest, SurveyResponse, SurveyStatistics,
};
use crate::repository::{ResponseRepository, SectionRepository, SurveyRepository};

pub struct ResponseService {
    response_repo: Arc<ResponseRepository>,
    survey_repo: Arc<SurveyRepository>,
    section_repo: Arc<SectionRepository>,
}

impl ResponseService {
    pub fn new(
        response_repo: Arc<ResponseRepository>,
        survey_repo: Arc<SurveyRepository>,
        section_repo: Arc<SectionRepository>,
    ) -> Self {
        Self {
            response_repo,
            survey_repo,
            section_repo,
        }
    }

    /// Validate every answer against its question before anything is
    /// written; a complete submission gets its timestamp stamped here.
    pub async fn submit(
        &self,
        survey_id: Uuid,
        req: SubmitResponseRequest,
    ) -> AppResult<SurveyResponse> {
        let survey = self
            .survey_repo
            .find_by_id(survey_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Survey not found".to_string()))?;

        let questions: HashMap<Uuid, &Question> = survey
            .sections
            .iter()
            .flat_map(|section| section.questions.iter())
            .map(|question| (question.id, question))
            .collect();

        for answer in &req.answers {
            let question = questions.get(&answer.question_id).ok_or_else(|| {
                AppError::ValidationError(format!(
                    "Question {} does not belong to survey {}",
                    answer.question_id, survey_id
                ))
            })?;
            validate_answer(question, answer)?;
        }

        self.response_repo
            .create(
                survey_id,
                req.status,
                submission_timestamp(req.status),
                &req.answers,
            )
            .await
    }

    pub async fn list(&self, survey_id: Uuid) -> AppResult<Vec<SurveyResponse>> {
        if !self.survey_repo.exists(survey_id).await? {
            return Err(AppError::NotFound("Survey not found".to_string()));
        }
        self.response_repo.list_by_survey(survey_id).await
    }

    pub async fn survey_statistics(&self, survey_id: Uuid) -> AppResult<SurveyStatistics> {
        if !self.survey_repo.exists(survey_id).await? {
            return Err(AppError::NotFound("Survey not found".to_string()));
        }

        let mut stats = SurveyStatistics {
            survey_id,
            total: 0,
            complete: 0,
            partial: 0,
            invalid: 0,
        };
        for (status, count) in self.response_repo.status_counts(survey_id).await? {
            stats.total += count;
            match status.as_str() {
                "complete" => stats.complete = count,
                "partial" => stats.partial = count,
                "invalid" => stats.invalid = count,
                _ => {}
            }
        }

        Ok(stats)
    }

    pub async fn section_statistics(
        &self,
        survey_id: Uuid,
        section_id: Uuid,
    ) -> AppResult<SectionStatistics> {
        if !self.section_repo.exists_scoped(survey_id, section_id).await? {
            return Err(AppError::NotFound("Section not found".to_string()));
        }

        let questions = self.response_repo.question_counts(section_id).await?;
        Ok(SectionStatistics {
            survey_id,
            section_id,
            questions,
        })
    }
}

/// Only a complete submission carries a submission time; partial and
/// invalid responses keep it null until (if ever) completed.
pub(crate) fn submission_timestamp(status: ResponseStatus) -> Option<NaiveDateTime> {
    match status {
        ResponseStatus::Complete => Some(Utc::now().naive_utc()),
        ResponseStatus::Partial | ResponseStatus::Invalid => None,
    }
}

/// An answer must populate exactly one value channel, and that channel
/// must match the question's type. Exhaustive over both sides so a new
/// question type cannot slip through unvalidated.
pub fn validate_answer(question: &Question, answer: &AnswerInput) -> AppResult<()> {
    let populated = answer.text_value.is_some() as u8
        + answer.bool_value.is_some() as u8
        + answer.option_ids.is_some() as u8;
    if populated != 1 {
        return Err(AppError::ValidationError(format!(
            "Answer for question {} must populate exactly one value channel",
            question.id
        )));
    }

    match &question.body {
        QuestionBody::Open { .. } => {
            if answer.text_value.is_none() {
                return Err(AppError::ValidationError(format!(
                    "Question {} expects a text answer",
                    question.id
                )));
            }
        }
        QuestionBody::Checkbox { .. } => {
            if answer.bool_value.is_none() {
                return Err(AppError::ValidationError(format!(
                    "Question {} expects a boolean answer",
                    question.id
                )));
            }
        }
        QuestionBody::Radio { options } | QuestionBody::Dropdown { options } => {
            validate_selection(question.id, options, answer.option_ids.as_deref(), true)?;
        }
        QuestionBody::Matrix { options } => {
            validate_selection(question.id, options, answer.option_ids.as_deref(), false)?;
        }
    }

    Ok(())
}

fn validate_selection(
    question_id: Uuid,
    options: &[QuestionOption],
    selected: Option<&[Uuid]>,
    exactly_one: bool,
) -> AppResult<()> {
    let selected = selected.ok_or_else(|| {
        AppError::ValidationError(format!(
            "Question {} expects selected options",
            question_id
        ))
    })?;

    if exactly_one && selected.len() != 1 {
        return Err(AppError::ValidationError(format!(
            "Question {} takes exactly one selected option",
            question_id
        )));
    }
    if selected.is_empty() {
        return Err(AppError::ValidationError(format!(
            "Question {} requires at least one selected option",
            question_id
        )));
    }

    for option_id in selected {
        if !options.iter().any(|option| option.id == *option_id) {
            return Err(AppError::ValidationError(format!(
                "Option {} does not belong to question {}",
                option_id, question_id
            )));
        }
    }

    Ok(())
}
