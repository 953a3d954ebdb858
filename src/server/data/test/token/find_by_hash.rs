use super::*;

/// Tests that an inserted token can be found by its hash.
///
/// Expected: Ok(Some(Token)) with the stored fields
#[tokio::test]
async fn finds_inserted_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    let token = Token {
        hash: factory::token::hash_plaintext("ABCDEFGHIJKLMNOPQRSTUV"),
        user_id: user.id,
        scope: Scope::PasswordReset,
        expiry: Utc::now() + Duration::minutes(45),
    };

    let repo = TokenRepository::new(db);
    repo.insert(&token).await?;

    let found = repo.find_by_hash(&token.hash).await?.unwrap();
    assert_eq!(found.user_id, user.id);
    assert_eq!(found.scope, Scope::PasswordReset);

    Ok(())
}

/// Tests lookup of a hash that was never stored.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_hash() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let found = TokenRepository::new(db)
        .find_by_hash(&factory::token::hash_plaintext("nothing"))
        .await?;

    assert!(found.is_none());

    Ok(())
}

/// Tests that a stored scope outside the known set fails conversion.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn fails_on_unknown_stored_scope() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    let stored = factory::token::TokenFactory::new(db, user.id)
        .scope("admin")
        .build()
        .await?;

    let result = TokenRepository::new(db).find_by_hash(&stored.hash).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
