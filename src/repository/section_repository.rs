use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{NewSection, Question, QuestionOption, QuestionRow, Section};

use super::survey_repository::insert_section_tx;

#[derive(Clone)]
pub struct SectionRepository {
    pool: PgPool,
}

impl SectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_survey(&self, survey_id: Uuid) -> AppResult<Vec<Section>> {
        let sections = sqlx::query_as::<_, Section>(
            "SELECT * FROM sections WHERE survey_id = $1 ORDER BY order_index, id",
        )
        .bind(survey_id)
        .fetch_all(&self.pool)
        .await?;

        self.attach_questions(sections).await
    }

    /// Fetch a section only when both ids match; a section id under the
    /// wrong survey reads as absent.
    pub async fn find_scoped(
        &self,
        survey_id: Uuid,
        section_id: Uuid,
    ) -> AppResult<Option<Section>> {
        let section = sqlx::query_as::<_, Section>(
            "SELECT * FROM sections WHERE id = $1 AND survey_id = $2",
        )
        .bind(section_id)
        .bind(survey_id)
        .fetch_optional(&self.pool)
        .await?;

        match section {
            Some(section) => Ok(self.attach_questions(vec![section]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn create(&self, survey_id: Uuid, section: &NewSection) -> AppResult<Section> {
        let mut tx = self.pool.begin().await?;
        insert_section_tx(&mut tx, survey_id, section).await?;
        tx.commit().await?;

        self.find_scoped(survey_id, section.id).await?.ok_or_else(|| {
            crate::error::AppError::InternalError("Created section vanished".to_string())
        })
    }

    pub async fn update_scoped(
        &self,
        survey_id: Uuid,
        section_id: Uuid,
        title: Option<&str>,
        order_index: Option<i32>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE sections
            SET title = COALESCE($3, title), order_index = COALESCE($4, order_index), updated_at = NOW()
            WHERE id = $1 AND survey_id = $2
            "#,
        )
        .bind(section_id)
        .bind(survey_id)
        .bind(title)
        .bind(order_index)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_scoped(&self, survey_id: Uuid, section_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1 AND survey_id = $2")
            .bind(section_id)
            .bind(survey_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_survey(&self, survey_id: Uuid) -> AppResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sections WHERE survey_id = $1")
                .bind(survey_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    pub async fn exists_scoped(&self, survey_id: Uuid, section_id: Uuid) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM sections WHERE id = $1 AND survey_id = $2)",
        )
        .bind(section_id)
        .bind(survey_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn attach_questions(&self, mut sections: Vec<Section>) -> AppResult<Vec<Section>> {
        if sections.is_empty() {
            return Ok(sections);
        }

        let section_ids: Vec<Uuid> = sections.iter().map(|s| s.id).collect();
        let question_rows = sqlx::query_as::<_, QuestionRow>(
            "SELECT * FROM questions WHERE section_id = ANY($1) ORDER BY order_index, id",
        )
        .bind(&section_ids)
        .fetch_all(&self.pool)
        .await?;

        let question_ids: Vec<Uuid> = question_rows.iter().map(|q| q.id).collect();
        let options = sqlx::query_as::<_, QuestionOption>(
            "SELECT * FROM question_options WHERE question_id = ANY($1) ORDER BY created_at, id",
        )
        .bind(&question_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut options_by_question: HashMap<Uuid, Vec<QuestionOption>> = HashMap::new();
        for option in options {
            options_by_question
                .entry(option.question_id)
                .or_default()
                .push(option);
        }

        let mut questions_by_section: HashMap<Uuid, Vec<Question>> = HashMap::new();
        for row in question_rows {
            let options = options_by_question.remove(&row.id).unwrap_or_default();
            questions_by_section
                .entry(row.section_id)
                .or_default()
                .push(row.into_question(options));
        }

        for section in &mut sections {
            section.questions = questions_by_section.remove(&section.id).unwrap_or_default();
        }

        Ok(sections)
    }
}
