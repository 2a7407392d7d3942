use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::QuestionOption;

#[derive(Clone)]
pub struct OptionRepository {
    pool: PgPool,
}

impl OptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn question_exists(&self, question_id: Uuid) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM questions WHERE id = $1)")
                .bind(question_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    pub async fn create(
        &self,
        question_id: Uuid,
        label: &str,
        value: &str,
    ) -> AppResult<QuestionOption> {
        let option = sqlx::query_as::<_, QuestionOption>(
            r#"
            INSERT INTO question_options (question_id, label, value)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(question_id)
        .bind(label)
        .bind(value)
        .fetch_one(&self.pool)
        .await?;

        Ok(option)
    }

    pub async fn update(
        &self,
        id: Uuid,
        label: Option<&str>,
        value: Option<&str>,
    ) -> AppResult<Option<QuestionOption>> {
        let option = sqlx::query_as::<_, QuestionOption>(
            r#"
            UPDATE question_options
            SET label = COALESCE($2, label), value = COALESCE($3, value)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(label)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(option)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM question_options WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
