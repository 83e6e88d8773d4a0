//! Integration tests for the MySQL repositories
//!
//! These tests require a running MySQL instance; the schema is applied
//! automatically from the bundled migrations.
//! Run with: cargo test -p ts_infra --test mysql_integration -- --ignored

use uuid::Uuid;

use ts_core::domain::entities::{CodePurpose, OneTimeCode, Role, User, UserRole, Workspace};
use ts_core::repositories::{
    CodeRepository, NewWorkspaceOwner, UserRepository, WorkspaceRepository,
};
use ts_infra::database::mysql::{
    MySqlCodeRepository, MySqlUserRepository, MySqlWorkspaceRepository,
};
use ts_infra::DatabasePool;
use ts_shared::config::DatabaseConfig;
use ts_shared::types::Language;

async fn pool() -> DatabasePool {
    let config = DatabaseConfig::from_env();
    let pool = DatabasePool::new(&config)
        .await
        .expect("Failed to connect to MySQL");
    pool.run_migrations()
        .await
        .expect("Failed to apply migrations");
    pool
}

fn sample_registration() -> NewWorkspaceOwner {
    let slug = format!("it-{}", &Uuid::new_v4().to_string()[..8]);
    let workspace = Workspace::new(slug, "Integration Co".to_string(), 1, Language::English);
    let owner = User::new(
        workspace.id,
        format!("owner-{}@example.com", Uuid::new_v4()),
        "$2b$04$integrationhash".to_string(),
        "Ada".to_string(),
        "Lovelace".to_string(),
        None,
    );
    let owner_role = UserRole::new(owner.id, Role::Owner);
    let verification_code = OneTimeCode::new(owner.id, CodePurpose::EmailVerification);
    NewWorkspaceOwner {
        workspace,
        owner,
        owner_role,
        verification_code,
    }
}

#[tokio::test]
#[ignore] // Requires MySQL server
async fn test_registration_persists_all_four_rows() {
    let pool = pool().await;
    let workspaces = MySqlWorkspaceRepository::new(pool.inner().clone());
    let users = MySqlUserRepository::new(pool.inner().clone());
    let codes = MySqlCodeRepository::new(pool.inner().clone());

    let registration = sample_registration();
    let owner_id = registration.owner.id;
    let owner_email = registration.owner.email.clone();
    let slug = registration.workspace.workspace_url.clone();

    let workspace = workspaces.create_with_owner(registration).await.unwrap();

    let found = workspaces.find_active_by_url(&slug).await.unwrap().unwrap();
    assert_eq!(found.id, workspace.id);

    let owner = users
        .find_by_email(workspace.id, &owner_email)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(owner.id, owner_id);
    assert!(!owner.is_verified);

    let roles = users.active_roles(owner_id).await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].role, Role::Owner);

    let code = codes
        .find_latest(owner_id, CodePurpose::EmailVerification)
        .await
        .unwrap()
        .unwrap();
    assert!(!code.activated);
}

#[tokio::test]
#[ignore] // Requires MySQL server
async fn test_email_verification_is_atomic() {
    let pool = pool().await;
    let workspaces = MySqlWorkspaceRepository::new(pool.inner().clone());
    let users = MySqlUserRepository::new(pool.inner().clone());
    let codes = MySqlCodeRepository::new(pool.inner().clone());

    let registration = sample_registration();
    let owner_id = registration.owner.id;
    let code_id = registration.verification_code.id;
    workspaces.create_with_owner(registration).await.unwrap();

    codes
        .activate_email_verification(code_id, owner_id)
        .await
        .unwrap();

    let user = users.find_by_id(owner_id).await.unwrap().unwrap();
    assert!(user.is_verified);
    let code = codes
        .find_latest(owner_id, CodePurpose::EmailVerification)
        .await
        .unwrap()
        .unwrap();
    assert!(code.activated);

    // Consuming the same code twice must fail
    let result = codes.activate_email_verification(code_id, owner_id).await;
    assert!(result.is_err());
}

#[tokio::test]
#[ignore] // Requires MySQL server
async fn test_duplicate_active_slug_is_rejected() {
    let pool = pool().await;
    let workspaces = MySqlWorkspaceRepository::new(pool.inner().clone());

    let registration = sample_registration();
    let slug = registration.workspace.workspace_url.clone();
    workspaces.create_with_owner(registration).await.unwrap();

    assert!(workspaces.exists_active_url(&slug).await.unwrap());

    let mut duplicate = sample_registration();
    duplicate.workspace.workspace_url = slug;
    // The unique index on active slugs must reject the second insert
    assert!(workspaces.create_with_owner(duplicate).await.is_err());
}
