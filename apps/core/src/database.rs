use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::info;

use crate::error::AppError;
use crate::models::{BasicInfo, Experience, Project, Skill};
use crate::services::traits::ProfileStore;

/// SQLite-backed profile knowledge store.
///
/// Creates the schema on first start and seeds a demo profile when the
/// database is empty, so the binary answers questions out of the box.
pub struct SqliteProfileStore {
    pool: SqlitePool,
}

impl SqliteProfileStore {
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        info!("Initializing knowledge store at: {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Configuration(format!("invalid database url: {}", e)))?
            .create_if_missing(true);

        // An in-memory database is one database per connection, so the
        // pool must be pinned to a single long-lived connection.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        let store = Self { pool };
        store.run_migrations().await?;
        store.seed_if_empty().await?;
        Ok(store)
    }

    /// Private scratch database for tests and dry runs.
    pub async fn connect_in_memory() -> Result<Self, AppError> {
        Self::connect("sqlite::memory:").await
    }

    async fn run_migrations(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT,
                location TEXT,
                summary TEXT,
                linkedin_url TEXT,
                github_username TEXT
            );
            CREATE TABLE IF NOT EXISTS skills (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                profile_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                category TEXT,
                proficiency_level TEXT,
                FOREIGN KEY(profile_id) REFERENCES profiles(id)
            );
            CREATE TABLE IF NOT EXISTS experiences (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                profile_id INTEGER NOT NULL,
                company TEXT NOT NULL,
                role TEXT NOT NULL,
                start_date TEXT,
                end_date TEXT,
                description TEXT,
                location TEXT,
                FOREIGN KEY(profile_id) REFERENCES profiles(id)
            );
            CREATE TABLE IF NOT EXISTS projects (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                profile_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                tech_stack TEXT,
                relevance_tags TEXT,
                github_url TEXT,
                demo_url TEXT,
                FOREIGN KEY(profile_id) REFERENCES profiles(id)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Knowledge store migrations applied");
        Ok(())
    }

    async fn seed_if_empty(&self) -> Result<(), AppError> {
        let profile_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await?;
        if profile_count > 0 {
            return Ok(());
        }

        info!("Seeding demo profile");

        sqlx::query(
            r#"
            INSERT INTO profiles (name, email, location, summary, linkedin_url, github_username)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind("Deniz Aksoy")
        .bind("deniz.aksoy@example.com")
        .bind("Istanbul, Turkey")
        .bind("Backend engineer focused on data-heavy services, APIs and applied machine learning.")
        .bind("https://linkedin.com/in/denizaksoy")
        .bind("denizaksoy")
        .execute(&self.pool)
        .await?;

        let skills = [
            ("Python", "Languages", "advanced"),
            ("Rust", "Languages", "intermediate"),
            ("FastAPI", "Frameworks", "advanced"),
            ("React", "Frameworks", "intermediate"),
            ("PostgreSQL", "Databases", "advanced"),
        ];
        for (name, category, level) in skills {
            sqlx::query(
                "INSERT INTO skills (profile_id, name, category, proficiency_level) VALUES (1, ?, ?, ?)",
            )
            .bind(name)
            .bind(category)
            .bind(level)
            .execute(&self.pool)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO experiences (profile_id, company, role, start_date, end_date, description, location)
            VALUES (1, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind("Arda Labs")
        .bind("Senior Backend Engineer")
        .bind("2021-03-01")
        .bind(Option::<String>::None)
        .bind("Designs and operates the ingestion pipeline behind a real-time analytics product.")
        .bind("Remote")
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO projects (profile_id, title, description, tech_stack, relevance_tags, github_url, demo_url)
            VALUES (1, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind("cv-chat")
        .bind("Interactive CV assistant answering questions about this profile.")
        .bind(r#"["Python", "FastAPI", "React"]"#)
        .bind(r#"["ai", "chatbot"]"#)
        .bind("https://github.com/denizaksoy/cv-chat")
        .bind(Option::<String>::None)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// List columns hold JSON text; malformed values read as empty lists.
fn decode_list(raw: Option<String>) -> Vec<String> {
    raw.and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or_default()
}

#[derive(FromRow)]
struct ProjectRow {
    id: i64,
    title: String,
    description: Option<String>,
    tech_stack: Option<String>,
    relevance_tags: Option<String>,
    github_url: Option<String>,
    demo_url: Option<String>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            title: row.title,
            description: row.description,
            tech_stack: decode_list(row.tech_stack),
            relevance_tags: decode_list(row.relevance_tags),
            github_url: row.github_url,
            demo_url: row.demo_url,
        }
    }
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn get_basic_info(&self, profile_id: i64) -> Result<Option<BasicInfo>, AppError> {
        let info = sqlx::query_as::<_, BasicInfo>(
            r#"
            SELECT id, name, email, location, summary, linkedin_url, github_username
            FROM profiles
            WHERE id = ?
            "#,
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(info)
    }

    async fn get_summary(&self, profile_id: i64) -> Result<Option<String>, AppError> {
        let summary: Option<Option<String>> =
            sqlx::query_scalar("SELECT summary FROM profiles WHERE id = ?")
                .bind(profile_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(summary.flatten())
    }

    async fn get_skills(&self, profile_id: i64) -> Result<Vec<Skill>, AppError> {
        let skills = sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, name, category, proficiency_level
            FROM skills
            WHERE profile_id = ?
            ORDER BY category, name
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(skills)
    }

    async fn get_experiences(&self, profile_id: i64) -> Result<Vec<Experience>, AppError> {
        let experiences = sqlx::query_as::<_, Experience>(
            r#"
            SELECT id, company, role, start_date, end_date, description, location
            FROM experiences
            WHERE profile_id = ?
            ORDER BY start_date DESC
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(experiences)
    }

    async fn get_projects(&self, profile_id: i64) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, title, description, tech_stack, relevance_tags, github_url, demo_url
            FROM projects
            WHERE profile_id = ?
            ORDER BY id
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }
}
