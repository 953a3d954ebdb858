use super::*;

/// Tests deleting a user's tokens of one scope.
///
/// Tokens of other scopes and of other users are left alone.
///
/// Expected: Ok with only the matching tokens removed
#[tokio::test]
async fn deletes_only_matching_scope_and_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let activation = factory::token::TokenFactory::new(db, user.id)
        .scope("activation")
        .build()
        .await?;
    let authentication = factory::token::TokenFactory::new(db, user.id)
        .build()
        .await?;
    let other_activation = factory::token::TokenFactory::new(db, other.id)
        .scope("activation")
        .build()
        .await?;

    let repo = TokenRepository::new(db);
    let removed = repo.delete_all_for_user(user.id, Scope::Activation).await?;

    assert_eq!(removed, 1);
    assert!(repo.find_by_hash(&activation.hash).await?.is_none());
    assert!(repo.find_by_hash(&authentication.hash).await?.is_some());
    assert!(repo.find_by_hash(&other_activation.hash).await?.is_some());

    let removed_again = repo.delete_all_for_user(user.id, Scope::Activation).await?;
    assert_eq!(removed_again, 0);

    Ok(())
}

/// Tests purging expired tokens.
///
/// A token expiring exactly at `now` counts as expired.
///
/// Expected: Ok with expired tokens removed, live tokens kept
#[tokio::test]
async fn deletes_expired_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let now = Utc::now();

    let past = factory::token::TokenFactory::new(db, user.id)
        .expiry(now - Duration::hours(1))
        .build()
        .await?;
    let boundary = factory::token::TokenFactory::new(db, user.id)
        .expiry(now)
        .build()
        .await?;
    let live = factory::token::TokenFactory::new(db, user.id)
        .expiry(now + Duration::hours(1))
        .build()
        .await?;

    let repo = TokenRepository::new(db);
    let removed = repo.delete_expired(now).await?;

    assert_eq!(removed, 2);
    assert!(repo.find_by_hash(&past.hash).await?.is_none());
    assert!(repo.find_by_hash(&boundary.hash).await?.is_none());
    assert!(repo.find_by_hash(&live.hash).await?.is_some());

    Ok(())
}
