use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    NewOption, NewQuestion, NewSection, OptionWrite, Question, QuestionOption, QuestionPatch,
    QuestionRow, QuestionWrite, Section, SectionPatch, SectionWrite, Survey, SurveyStatus,
    SurveyWritePlan,
};

#[derive(Clone)]
pub struct SurveyRepository {
    pool: PgPool,
}

impl SurveyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Survey>> {
        let surveys =
            sqlx::query_as::<_, Survey>("SELECT * FROM surveys ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await?;

        self.attach_trees(surveys).await
    }

    pub async fn find_by_status(&self, status: SurveyStatus) -> AppResult<Vec<Survey>> {
        let surveys = sqlx::query_as::<_, Survey>(
            "SELECT * FROM surveys WHERE status = $1 ORDER BY created_at, id",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        self.attach_trees(surveys).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Survey>> {
        let survey = sqlx::query_as::<_, Survey>("SELECT * FROM surveys WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match survey {
            Some(survey) => Ok(self.attach_trees(vec![survey]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM surveys WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Insert a survey and its whole section/question/option tree in one
    /// transaction; a failing nested write rolls everything back.
    pub async fn create_survey(
        &self,
        title: &str,
        description: Option<&str>,
        status: SurveyStatus,
        sections: &[NewSection],
    ) -> AppResult<Survey> {
        let mut tx = self.pool.begin().await?;

        let survey_id: Uuid = sqlx::query_scalar(
            "INSERT INTO surveys (title, description, status) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(title)
        .bind(description)
        .bind(status)
        .fetch_one(&mut *tx)
        .await?;

        for section in sections {
            insert_section_tx(&mut tx, survey_id, section).await?;
        }

        tx.commit().await?;

        self.find_by_id(survey_id)
            .await?
            .ok_or_else(|| AppError::InternalError("Created survey vanished".to_string()))
    }

    /// Apply a reconcile plan: survey field patches plus per-child
    /// update-or-insert writes, all in one transaction.
    pub async fn apply_plan(&self, plan: &SurveyWritePlan) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE surveys
            SET title = COALESCE($2, title), description = COALESCE($3, description), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(plan.survey_id)
        .bind(&plan.title)
        .bind(&plan.description)
        .execute(&mut *tx)
        .await?;

        for write in &plan.sections {
            match write {
                SectionWrite::Insert(section) => {
                    insert_section_tx(&mut tx, plan.survey_id, section).await?
                }
                SectionWrite::Update(patch) => {
                    apply_section_patch_tx(&mut tx, plan.survey_id, patch).await?
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Flip status only when the survey currently holds `from`; other
    /// statuses are unaffected.
    pub async fn update_status_from(
        &self,
        id: Uuid,
        from: SurveyStatus,
        to: SurveyStatus,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE surveys SET status = $3, updated_at = NOW() WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_draft(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM surveys WHERE id = $1 AND status = 'draft'")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Load sections, questions and options for the given surveys and fold
    /// them into nested trees, ordered by order_index at each level.
    async fn attach_trees(&self, mut surveys: Vec<Survey>) -> AppResult<Vec<Survey>> {
        if surveys.is_empty() {
            return Ok(surveys);
        }

        let survey_ids: Vec<Uuid> = surveys.iter().map(|s| s.id).collect();
        let sections = sqlx::query_as::<_, Section>(
            "SELECT * FROM sections WHERE survey_id = ANY($1) ORDER BY order_index, id",
        )
        .bind(&survey_ids)
        .fetch_all(&self.pool)
        .await?;

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

        let mut sections_by_survey: HashMap<Uuid, Vec<Section>> = HashMap::new();
        for mut section in sections {
            section.questions = questions_by_section.remove(&section.id).unwrap_or_default();
            sections_by_survey
                .entry(section.survey_id)
                .or_default()
                .push(section);
        }

        for survey in &mut surveys {
            survey.sections = sections_by_survey.remove(&survey.id).unwrap_or_default();
        }

        Ok(surveys)
    }
}

pub(crate) async fn insert_section_tx(
    tx: &mut Transaction<'_, Postgres>,
    survey_id: Uuid,
    section: &NewSection,
) -> AppResult<()> {
    sqlx::query("INSERT INTO sections (id, survey_id, title, order_index) VALUES ($1, $2, $3, $4)")
        .bind(section.id)
        .bind(survey_id)
        .bind(&section.title)
        .bind(section.order_index)
        .execute(&mut **tx)
        .await?;

    for question in &section.questions {
        insert_question_tx(tx, section.id, question).await?;
    }

    Ok(())
}

pub(crate) async fn insert_question_tx(
    tx: &mut Transaction<'_, Postgres>,
    section_id: Uuid,
    question: &NewQuestion,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO questions
            (id, section_id, label, required, question_type, order_index,
             prompt, placeholder, max_length, default_checked)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(question.id)
    .bind(section_id)
    .bind(&question.label)
    .bind(question.required)
    .bind(question.question_type)
    .bind(question.order_index)
    .bind(&question.prompt)
    .bind(&question.placeholder)
    .bind(question.max_length)
    .bind(question.default_checked)
    .execute(&mut **tx)
    .await?;

    for option in &question.options {
        insert_option_tx(tx, question.id, option).await?;
    }

    Ok(())
}

pub(crate) async fn insert_option_tx(
    tx: &mut Transaction<'_, Postgres>,
    question_id: Uuid,
    option: &NewOption,
) -> AppResult<()> {
    sqlx::query("INSERT INTO question_options (id, question_id, label, value) VALUES ($1, $2, $3, $4)")
        .bind(option.id)
        .bind(question_id)
        .bind(&option.label)
        .bind(&option.value)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

async fn apply_section_patch_tx(
    tx: &mut Transaction<'_, Postgres>,
    survey_id: Uuid,
    patch: &SectionPatch,
) -> AppResult<()> {
    sqlx::query(
        r#"
        UPDATE sections
        SET title = COALESCE($3, title), order_index = COALESCE($4, order_index), updated_at = NOW()
        WHERE id = $1 AND survey_id = $2
        "#,
    )
    .bind(patch.id)
    .bind(survey_id)
    .bind(&patch.title)
    .bind(patch.order_index)
    .execute(&mut **tx)
    .await?;

    for write in &patch.questions {
        match write {
            QuestionWrite::Insert(question) => insert_question_tx(tx, patch.id, question).await?,
            QuestionWrite::Update(patch) => apply_question_patch_tx(tx, patch).await?,
        }
    }

    Ok(())
}

async fn apply_question_patch_tx(
    tx: &mut Transaction<'_, Postgres>,
    patch: &QuestionPatch,
) -> AppResult<()> {
    sqlx::query(
        r#"
        UPDATE questions
        SET label = COALESCE($2, label),
            required = COALESCE($3, required),
            order_index = COALESCE($4, order_index),
            prompt = COALESCE($5, prompt),
            placeholder = COALESCE($6, placeholder),
            max_length = COALESCE($7, max_length),
            default_checked = COALESCE($8, default_checked),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(patch.id)
    .bind(&patch.label)
    .bind(patch.required)
    .bind(patch.order_index)
    .bind(&patch.prompt)
    .bind(&patch.placeholder)
    .bind(patch.max_length)
    .bind(patch.default_checked)
    .execute(&mut **tx)
    .await?;

    for write in &patch.options {
        match write {
            OptionWrite::Insert(option) => insert_option_tx(tx, patch.id, option).await?,
            OptionWrite::Update(option) => {
                sqlx::query(
                    r#"
                    UPDATE question_options
                    SET label = COALESCE($3, label), value = COALESCE($4, value)
                    WHERE id = $1 AND question_id = $2
                    "#,
                )
                .bind(option.id)
                .bind(patch.id)
                .bind(&option.label)
                .bind(&option.value)
                .execute(&mut **tx)
                .await?;
            }
        }
    }

    Ok(())
}
