use super::*;

/// Tests finding a user by ID and by email.
///
/// Expected: Ok(Some(User)) for both lookups
#[tokio::test]
async fn finds_user_by_id_and_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .email("finder@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let by_id = repo.find_by_id(created.id).await?.unwrap();
    let by_email = repo.find_by_email("finder@example.com").await?.unwrap();

    assert_eq!(by_id.id, created.id);
    assert_eq!(by_id, by_email);

    Ok(())
}

/// Tests lookups that match nothing.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert!(repo.find_by_id(9999).await?.is_none());
    assert!(repo.find_by_email("nobody@example.com").await?.is_none());

    Ok(())
}

/// Tests that a stored role outside the known set is not silently accepted.
///
/// Expected: Err(AppError::InternalErr(UnknownRole))
#[tokio::test]
async fn fails_on_unknown_stored_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .role("superuser")
        .build()
        .await?;

    let result = UserRepository::new(db).find_by_id(created.id).await;

    assert!(matches!(
        result,
        Err(AppError::InternalErr(InternalError::UnknownRole { ref value })) if value == "superuser"
    ));

    Ok(())
}

/// Tests listing all users.
///
/// Expected: Ok with users in ID order
#[tokio::test]
async fn lists_users_ordered_by_id() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let third = factory::create_user(db).await?;

    let users = UserRepository::new(db).get_all().await?;
    let ids: Vec<i32> = users.iter().map(|u| u.id).collect();

    assert_eq!(ids, vec![first.id, second.id, third.id]);

    Ok(())
}
