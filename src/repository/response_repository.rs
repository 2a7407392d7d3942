use std::collections::HashMap;

use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    AnswerInput, QuestionResponse, QuestionResponseCount, ResponseStatus, SurveyResponse,
};

#[derive(Clone)]
pub struct ResponseRepository {
    pool: PgPool,
}

impl ResponseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a response and all of its answers in one transaction
    pub async fn create(
        &self,
        survey_id: Uuid,
        status: ResponseStatus,
        submitted_at: Option<NaiveDateTime>,
        answers: &[AnswerInput],
    ) -> AppResult<SurveyResponse> {
        let mut tx = self.pool.begin().await?;

        let response_id: Uuid = sqlx::query_scalar(
            "INSERT INTO survey_responses (survey_id, status, submitted_at) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(survey_id)
        .bind(status)
        .bind(submitted_at)
        .fetch_one(&mut *tx)
        .await?;

        for answer in answers {
            let answer_id: Uuid = sqlx::query_scalar(
                r#"
                INSERT INTO question_responses (response_id, question_id, text_value, bool_value)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(response_id)
            .bind(answer.question_id)
            .bind(&answer.text_value)
            .bind(answer.bool_value)
            .fetch_one(&mut *tx)
            .await?;

            if let Some(option_ids) = &answer.option_ids {
                for option_id in option_ids {
                    sqlx::query(
                        "INSERT INTO question_response_options (question_response_id, option_id) VALUES ($1, $2)",
                    )
                    .bind(answer_id)
                    .bind(option_id)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        tx.commit().await?;

        self.find_by_id(response_id)
            .await?
            .ok_or_else(|| AppError::InternalError("Created response vanished".to_string()))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SurveyResponse>> {
        let response =
            sqlx::query_as::<_, SurveyResponse>("SELECT * FROM survey_responses WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match response {
            Some(response) => Ok(self.attach_answers(vec![response]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn list_by_survey(&self, survey_id: Uuid) -> AppResult<Vec<SurveyResponse>> {
        let responses = sqlx::query_as::<_, SurveyResponse>(
            "SELECT * FROM survey_responses WHERE survey_id = $1 ORDER BY created_at, id",
        )
        .bind(survey_id)
        .fetch_all(&self.pool)
        .await?;

        self.attach_answers(responses).await
    }

    /// Response counts grouped by status for one survey
    pub async fn status_counts(&self, survey_id: Uuid) -> AppResult<Vec<(String, i64)>> {
        let counts = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM survey_responses WHERE survey_id = $1 GROUP BY status",
        )
        .bind(survey_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Answer counts grouped by question for one section
    pub async fn question_counts(&self, section_id: Uuid) -> AppResult<Vec<QuestionResponseCount>> {
        let counts = sqlx::query_as::<_, QuestionResponseCount>(
            r#"
            SELECT q.id AS question_id, q.label, COUNT(qr.id) AS response_count
            FROM questions q
            LEFT JOIN question_responses qr ON qr.question_id = q.id
            WHERE q.section_id = $1
            GROUP BY q.id
            ORDER BY q.order_index, q.id
            "#,
        )
        .bind(section_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    async fn attach_answers(
        &self,
        mut responses: Vec<SurveyResponse>,
    ) -> AppResult<Vec<SurveyResponse>> {
        if responses.is_empty() {
            return Ok(responses);
        }

        let response_ids: Vec<Uuid> = responses.iter().map(|r| r.id).collect();
        let mut answers = sqlx::query_as::<_, QuestionResponse>(
            "SELECT * FROM question_responses WHERE response_id = ANY($1) ORDER BY created_at, id",
        )
        .bind(&response_ids)
        .fetch_all(&self.pool)
        .await?;

        let answer_ids: Vec<Uuid> = answers.iter().map(|a| a.id).collect();
        let selections = sqlx::query_as::<_, (Uuid, Uuid)>(
            "SELECT question_response_id, option_id FROM question_response_options WHERE question_response_id = ANY($1)",
        )
        .bind(&answer_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut options_by_answer: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for (answer_id, option_id) in selections {
            options_by_answer.entry(answer_id).or_default().push(option_id);
        }

        let mut answers_by_response: HashMap<Uuid, Vec<QuestionResponse>> = HashMap::new();
        for answer in &mut answers {
            answer.option_ids = options_by_answer.remove(&answer.id).unwrap_or_default();
        }
        for answer in answers {
            answers_by_response
                .entry(answer.response_id)
                .or_default()
                .push(answer);
        }

        for response in &mut responses {
            response.answers = answers_by_response.remove(&response.id).unwrap_or_default();
        }

        Ok(responses)
    }
}
