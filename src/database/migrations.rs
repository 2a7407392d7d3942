use anyhow::Result;
use sqlx::PgPool;
use tracing::{info, warn};

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    let migrations = vec![
        // Enable UUID extension
        r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp";"#,
        // Surveys table
        r#"CREATE TABLE IF NOT EXISTS surveys (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            title VARCHAR(255) NOT NULL,
            description TEXT,
            status VARCHAR(20) NOT NULL DEFAULT 'draft' CHECK (status IN ('draft', 'published', 'closed')),
            created_at TIMESTAMP NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP NOT NULL DEFAULT NOW()
        );"#,
        // Sections table. order_index defines display order within a survey;
        // the constraint is deferred so reorders inside one transaction are legal.
        r#"CREATE TABLE IF NOT EXISTS sections (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            survey_id UUID NOT NULL REFERENCES surveys(id) ON DELETE CASCADE,
            title VARCHAR(255) NOT NULL,
            order_index INTEGER NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP NOT NULL DEFAULT NOW(),
            CONSTRAINT sections_order_unique UNIQUE (survey_id, order_index) DEFERRABLE INITIALLY DEFERRED
        );"#,
        // Questions table. prompt/placeholder/max_length apply to open questions,
        // default_checked to checkbox questions; the rest are NULL.
        r#"CREATE TABLE IF NOT EXISTS questions (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            section_id UUID NOT NULL REFERENCES sections(id) ON DELETE CASCADE,
            label VARCHAR(500) NOT NULL,
            required BOOLEAN NOT NULL DEFAULT false,
            question_type VARCHAR(20) NOT NULL CHECK (question_type IN ('open', 'checkbox', 'radio', 'dropdown', 'matrix')),
            order_index INTEGER NOT NULL,
            prompt TEXT,
            placeholder VARCHAR(255),
            max_length INTEGER,
            default_checked BOOLEAN,
            created_at TIMESTAMP NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP NOT NULL DEFAULT NOW(),
            CONSTRAINT questions_order_unique UNIQUE (section_id, order_index) DEFERRABLE INITIALLY DEFERRED
        );"#,
        // Question options table. value falls back to label at insert time.
        r#"CREATE TABLE IF NOT EXISTS question_options (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            question_id UUID NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
            label VARCHAR(255) NOT NULL,
            value VARCHAR(255) NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT NOW()
        );"#,
        // Survey responses table. submitted_at is stamped only for complete responses.
        r#"CREATE TABLE IF NOT EXISTS survey_responses (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            survey_id UUID NOT NULL REFERENCES surveys(id) ON DELETE CASCADE,
            status VARCHAR(20) NOT NULL CHECK (status IN ('complete', 'partial', 'invalid')),
            submitted_at TIMESTAMP,
            created_at TIMESTAMP NOT NULL DEFAULT NOW()
        );"#,
        // Question responses table. question_id is nulled, not cascaded, when a
        // question is deleted from a survey, so historical answers survive edits.
        r#"CREATE TABLE IF NOT EXISTS question_responses (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            response_id UUID NOT NULL REFERENCES survey_responses(id) ON DELETE CASCADE,
            question_id UUID REFERENCES questions(id) ON DELETE SET NULL,
            text_value TEXT,
            bool_value BOOLEAN,
            created_at TIMESTAMP NOT NULL DEFAULT NOW()
        );"#,
        // Selected options per question response (radio/dropdown/matrix channel)
        r#"CREATE TABLE IF NOT EXISTS question_response_options (
            question_response_id UUID NOT NULL REFERENCES question_responses(id) ON DELETE CASCADE,
            option_id UUID NOT NULL REFERENCES question_options(id) ON DELETE CASCADE,
            PRIMARY KEY (question_response_id, option_id)
        );"#,
        // Indexes for the hot read paths
        r#"CREATE INDEX IF NOT EXISTS idx_sections_survey ON sections(survey_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_questions_section ON questions(section_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_options_question ON question_options(question_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_responses_survey ON survey_responses(survey_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_question_responses_response ON question_responses(response_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_question_responses_question ON question_responses(question_id);"#,
    ];

    for (i, migration) in migrations.iter().enumerate() {
        match sqlx::query(migration).execute(pool).await {
            Ok(_) => {}
            Err(e) => {
                warn!("Migration {} failed (may already exist): {}", i, e);
            }
        }
    }

    info!("Database migrations completed");
    Ok(())
}
