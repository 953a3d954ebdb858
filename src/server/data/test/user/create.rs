use super::*;

fn param(email: &str) -> CreateUserParam {
    CreateUserParam {
        name: "Alice".to_string(),
        email: email.to_string(),
        password_hash: factory::user::PLACEHOLDER_PASSWORD_HASH.to_string(),
        role: Role::User,
        activated: false,
    }
}

/// Tests creating a new user.
///
/// Verifies that the repository inserts the user with version 1 and returns the
/// stored values converted to the domain model.
///
/// Expected: Ok with user created
#[tokio::test]
async fn creates_user_with_initial_version() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(param("alice@example.com")).await?;

    assert!(user.id > 0);
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, Role::User);
    assert_eq!(user.version, 1);
    assert!(!user.activated);

    Ok(())
}

/// Tests that email addresses are unique.
///
/// Expected: Err(AppError::DbErr) on the second insert
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(param("dup@example.com")).await?;
    let result = repo.create(param("dup@example.com")).await;

    assert!(matches!(result, Err(AppError::DbErr(_))));

    Ok(())
}
