/// Demo data for an empty database
///
/// Creates one demo account with two projects and three tasks whose due dates
/// are relative to the day the seed runs. Nothing happens once any user
/// exists. All rows are written in one transaction.

use chrono::{Days, NaiveDate, Utc};
use sqlx::PgPool;

use crate::auth::password::{hash_password, PasswordError};
use crate::models::{
    project::{CreateProject, Project, ProjectStatus},
    task::{Task, TaskFields, TaskPriority, TaskState},
    user::{CreateUser, User},
};

/// Demo account email
pub const DEMO_EMAIL: &str = "demo@taskboard.dev";

/// Demo account password
pub const DEMO_PASSWORD: &str = "Demo123!";

/// Error type for seeding
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
}

fn offset(today: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        today.checked_add_days(Days::new(days as u64)).unwrap_or(today)
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs())).unwrap_or(today)
    }
}

/// Seeds demo data if the users table is empty
///
/// # Returns
///
/// `true` if data was inserted, `false` if the database already had users
pub async fn seed_demo_data(pool: &PgPool) -> Result<bool, SeedError> {
    let mut tx = pool.begin().await?;

    if User::count(&mut *tx).await? > 0 {
        return Ok(false);
    }

    let hashed = hash_password(DEMO_PASSWORD)?;
    let user = User::create(
        &mut *tx,
        CreateUser {
            email: DEMO_EMAIL.to_string(),
            password_hash: hashed.hash,
            password_salt: hashed.salt,
        },
    )
    .await?;

    let prep = Project::create(
        &mut *tx,
        CreateProject {
            owner_id: user.id,
            name: "Interview Prep App".to_string(),
            description: "Build a full-stack app to demonstrate engineering depth".to_string(),
            status: ProjectStatus::InProgress,
        },
    )
    .await?;

    let pipeline = Project::create(
        &mut *tx,
        CreateProject {
            owner_id: user.id,
            name: "CI/CD Pipeline".to_string(),
            description: "Automate test/build/deploy with GitHub Actions".to_string(),
            status: ProjectStatus::NotStarted,
        },
    )
    .await?;

    let today = Utc::now().date_naive();
    let tasks = [
        (prep.id, "Set up the REST API", TaskPriority::High, TaskState::Done, -6),
        (prep.id, "Create dashboard view", TaskPriority::High, TaskState::InProgress, 2),
        (pipeline.id, "Draft Terraform modules", TaskPriority::Medium, TaskState::NotStarted, 4),
    ];

    for (project_id, title, priority, state, due_in_days) in tasks {
        Task::create_for_owner(
            &mut *tx,
            user.id,
            TaskFields {
                project_id,
                title: title.to_string(),
                priority,
                state,
                due_date: offset(today, due_in_days),
            },
        )
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    }

    tx.commit().await?;
    Ok(true)
}
