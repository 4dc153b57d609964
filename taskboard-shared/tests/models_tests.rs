/// Integration tests for the owner-scoped models
///
/// These tests require a running PostgreSQL database.
/// Run with: cargo test -p taskboard-shared --test models_tests -- --ignored --test-threads=1

mod common;

use chrono::{Days, Utc};
use common::{create_user, test_pool};
use taskboard_shared::auth::password::{hash_password, verify_password};
use taskboard_shared::seed::{seed_demo_data, DEMO_EMAIL};
use taskboard_shared::models::{
    dashboard::DashboardSummary,
    project::{CreateProject, Project, ProjectStatus, UpdateProject},
    task::{Task, TaskFields, TaskPriority, TaskState},
    user::{CreateUser, User},
};
use uuid::Uuid;

fn new_project(owner_id: Uuid, name: &str) -> CreateProject {
    CreateProject {
        owner_id,
        name: name.to_string(),
        description: "A project used by the integration tests".to_string(),
        status: ProjectStatus::NotStarted,
    }
}

fn new_task(project_id: Uuid, state: TaskState, due_in_days: i64) -> TaskFields {
    let today = Utc::now().date_naive();
    let due_date = if due_in_days >= 0 {
        today.checked_add_days(Days::new(due_in_days as u64)).unwrap()
    } else {
        today.checked_sub_days(Days::new(due_in_days.unsigned_abs())).unwrap()
    };

    TaskFields {
        project_id,
        title: "Integration task".to_string(),
        priority: TaskPriority::Medium,
        state,
        due_date,
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_email_is_unique_case_insensitively() {
    let pool = test_pool().await;
    let email = format!("Mixed-{}@Example.com", Uuid::new_v4());
    let hashed = hash_password("Password123!").unwrap();

    let user = User::create(
        &pool,
        CreateUser {
            email: email.clone(),
            password_hash: hashed.hash.clone(),
            password_salt: hashed.salt.clone(),
        },
    )
    .await
    .unwrap();
    assert_eq!(user.email, email.to_lowercase());

    let duplicate = User::create(
        &pool,
        CreateUser {
            email: email.to_uppercase(),
            password_hash: hashed.hash,
            password_salt: hashed.salt,
        },
    )
    .await;

    match duplicate {
        Err(sqlx::Error::Database(db_err)) => {
            assert_eq!(db_err.constraint(), Some("users_email_key"));
        }
        other => panic!("expected unique violation, got {:?}", other.map(|u| u.id)),
    }

    assert!(User::email_exists(&pool, &email.to_uppercase()).await.unwrap());

    let found = User::find_by_email(&pool, &email).await.unwrap().unwrap();
    assert!(verify_password("Password123!", &found.password_hash, &found.password_salt).unwrap());

    User::delete(&pool, user.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_projects_are_owner_scoped() {
    let pool = test_pool().await;
    let alice = create_user(&pool).await;
    let bob = create_user(&pool).await;

    let first = Project::create(&pool, new_project(alice.id, "First")).await.unwrap();
    let second = Project::create(&pool, new_project(alice.id, "Second")).await.unwrap();

    let listed = Project::list_for_owner(&pool, alice.id).await.unwrap();
    assert_eq!(
        listed.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );
    assert!(Project::list_for_owner(&pool, bob.id).await.unwrap().is_empty());

    assert!(Project::find_for_owner(&pool, first.id, bob.id).await.unwrap().is_none());

    let update = UpdateProject {
        name: "Hijacked".to_string(),
        description: "Bob should not be able to do this".to_string(),
        status: ProjectStatus::Done,
    };
    assert!(Project::update_for_owner(&pool, first.id, bob.id, update.clone())
        .await
        .unwrap()
        .is_none());
    assert!(!Project::delete_for_owner(&pool, first.id, bob.id).await.unwrap());

    let updated = Project::update_for_owner(&pool, first.id, alice.id, update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, ProjectStatus::Done);
    assert_eq!(updated.created_at, first.created_at);

    User::delete(&pool, alice.id).await.unwrap();
    User::delete(&pool, bob.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_tasks_are_owner_scoped() {
    let pool = test_pool().await;
    let alice = create_user(&pool).await;
    let bob = create_user(&pool).await;

    let project = Project::create(&pool, new_project(alice.id, "Scoped")).await.unwrap();
    let task = Task::create_for_owner(&pool, alice.id, new_task(project.id, TaskState::NotStarted, 1))
        .await
        .unwrap()
        .unwrap();

    assert!(Task::find_for_owner(&pool, task.id, alice.id).await.unwrap().is_some());
    assert!(Task::find_for_owner(&pool, task.id, bob.id).await.unwrap().is_none());
    assert!(Task::list_for_owner(&pool, bob.id).await.unwrap().is_empty());
    assert!(Task::update_for_owner(&pool, task.id, bob.id, new_task(project.id, TaskState::Done, 0))
        .await
        .unwrap()
        .is_none());
    assert!(!Task::delete_for_owner(&pool, task.id, bob.id).await.unwrap());

    assert!(Task::delete_for_owner(&pool, task.id, alice.id).await.unwrap());
    assert!(Task::find_for_owner(&pool, task.id, alice.id).await.unwrap().is_none());

    User::delete(&pool, alice.id).await.unwrap();
    User::delete(&pool, bob.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_tasks_only_land_in_owned_projects() {
    let pool = test_pool().await;
    let alice = create_user(&pool).await;
    let bob = create_user(&pool).await;

    let first = Project::create(&pool, new_project(alice.id, "First")).await.unwrap();
    let second = Project::create(&pool, new_project(alice.id, "Second")).await.unwrap();
    let foreign = Project::create(&pool, new_project(bob.id, "Bob's")).await.unwrap();

    let created = Task::create_for_owner(&pool, alice.id, new_task(foreign.id, TaskState::NotStarted, 1))
        .await
        .unwrap();
    assert!(created.is_none());
    let missing = Task::create_for_owner(&pool, alice.id, new_task(Uuid::new_v4(), TaskState::NotStarted, 1))
        .await
        .unwrap();
    assert!(missing.is_none());
    assert!(Task::list_for_project(&pool, foreign.id, bob.id).await.unwrap().is_empty());

    let task = Task::create_for_owner(&pool, alice.id, new_task(first.id, TaskState::NotStarted, 1))
        .await
        .unwrap()
        .unwrap();

    let hijack = Task::update_for_owner(&pool, task.id, alice.id, new_task(foreign.id, TaskState::Done, 0))
        .await
        .unwrap();
    assert!(hijack.is_none());
    let unchanged = Task::find_for_owner(&pool, task.id, alice.id).await.unwrap().unwrap();
    assert_eq!(unchanged.project_id, first.id);
    assert_eq!(unchanged.state, TaskState::NotStarted);

    let moved = Task::update_for_owner(&pool, task.id, alice.id, new_task(second.id, TaskState::Done, 0))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.project_id, second.id);
    assert_eq!(moved.state, TaskState::Done);

    User::delete(&pool, alice.id).await.unwrap();
    User::delete(&pool, bob.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_deleting_project_removes_its_tasks() {
    let pool = test_pool().await;
    let owner = create_user(&pool).await;

    let project = Project::create(&pool, new_project(owner.id, "Doomed")).await.unwrap();
    for days in 0..3 {
        Task::create_for_owner(&pool, owner.id, new_task(project.id, TaskState::NotStarted, days))
            .await
            .unwrap()
            .unwrap();
    }
    assert_eq!(Task::list_for_project(&pool, project.id, owner.id).await.unwrap().len(), 3);

    assert!(Project::delete_for_owner(&pool, project.id, owner.id).await.unwrap());

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
        .bind(project.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    User::delete(&pool, owner.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_dashboard_counts_match_rows() {
    let pool = test_pool().await;
    let owner = create_user(&pool).await;
    let other = create_user(&pool).await;

    let project = Project::create(&pool, new_project(owner.id, "Counted")).await.unwrap();
    Project::create(&pool, new_project(owner.id, "Empty")).await.unwrap();
    Task::create_for_owner(&pool, owner.id, new_task(project.id, TaskState::Done, 1)).await.unwrap().unwrap();
    Task::create_for_owner(&pool, owner.id, new_task(project.id, TaskState::InProgress, 0)).await.unwrap().unwrap();
    Task::create_for_owner(&pool, owner.id, new_task(project.id, TaskState::NotStarted, 3)).await.unwrap().unwrap();
    Task::create_for_owner(&pool, owner.id, new_task(project.id, TaskState::NotStarted, -2)).await.unwrap().unwrap();

    let foreign = Project::create(&pool, new_project(other.id, "Not mine")).await.unwrap();
    Task::create_for_owner(&pool, other.id, new_task(foreign.id, TaskState::NotStarted, 5))
        .await
        .unwrap()
        .unwrap();

    let today = Utc::now().date_naive();
    let summary = DashboardSummary::for_owner(&pool, owner.id, today).await.unwrap();

    let tasks = Task::list_for_owner(&pool, owner.id).await.unwrap();
    let projects = Project::count_for_owner(&pool, owner.id).await.unwrap();
    assert_eq!(summary, DashboardSummary::from_parts(projects, &tasks, today));

    assert_eq!(summary.projects, 2);
    assert_eq!(summary.tasks, 4);
    assert_eq!(summary.completed_tasks, 1);
    assert_eq!(summary.in_progress_tasks, 1);
    assert_eq!(summary.upcoming_tasks, 2);

    let empty = DashboardSummary::for_owner(&pool, Uuid::new_v4(), today).await.unwrap();
    assert_eq!(empty, DashboardSummary::default());

    User::delete(&pool, owner.id).await.unwrap();
    User::delete(&pool, other.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_writes_in_rolled_back_transaction_vanish() {
    let pool = test_pool().await;
    let email = format!("tx-{}@example.com", Uuid::new_v4());
    let hashed = hash_password("Password123!").unwrap();

    let mut tx = pool.begin().await.unwrap();
    let user = User::create(
        &mut *tx,
        CreateUser {
            email: email.clone(),
            password_hash: hashed.hash,
            password_salt: hashed.salt,
        },
    )
    .await
    .unwrap();
    let project = Project::create(&mut *tx, new_project(user.id, "Uncommitted")).await.unwrap();
    Task::create_for_owner(&mut *tx, user.id, new_task(project.id, TaskState::NotStarted, 1))
        .await
        .unwrap()
        .unwrap();
    assert!(User::count(&mut *tx).await.unwrap() >= 1);
    tx.rollback().await.unwrap();

    assert!(!User::email_exists(&pool, &email).await.unwrap());
    assert!(Task::list_for_project(&pool, project.id, user.id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_seed_skips_populated_database() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;

    let before = User::count(&pool).await.unwrap();
    let demo_existed = User::email_exists(&pool, DEMO_EMAIL).await.unwrap();

    assert!(!seed_demo_data(&pool).await.unwrap());
    assert_eq!(User::count(&pool).await.unwrap(), before);
    assert_eq!(User::email_exists(&pool, DEMO_EMAIL).await.unwrap(), demo_existed);

    User::delete(&pool, user.id).await.unwrap();
}
