use super::*;

/// Tests updating a user.
///
/// Verifies the write lands and the version is bumped.
///
/// Expected: Ok with version incremented
#[tokio::test]
async fn updates_user_and_bumps_version() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    let mut user = repo.find_by_id(created.id).await?.unwrap();
    user.activated = true;
    let updated = repo.update(user).await?;

    assert_eq!(updated.version, 2);

    let stored = repo.find_by_id(created.id).await?.unwrap();
    assert!(stored.activated);
    assert_eq!(stored.version, 2);

    Ok(())
}

/// Tests the optimistic concurrency check.
///
/// Two copies of the same user are read; the second write must fail once the first
/// has bumped the version.
///
/// Expected: Err(AppError::EditConflict)
#[tokio::test]
async fn rejects_stale_version() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    let mut first = repo.find_by_id(created.id).await?.unwrap();
    let mut second = first.clone();

    first.name = "First".to_string();
    repo.update(first).await?;

    second.name = "Second".to_string();
    let result = repo.update(second).await;

    assert!(matches!(result, Err(AppError::EditConflict)));
    assert_eq!(repo.find_by_id(created.id).await?.unwrap().name, "First");

    Ok(())
}
