//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an activated user together with a live authentication token.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((user, plaintext))` - The user and the plaintext of their authentication token
/// - `Err(DbErr)` - Database error during creation
pub async fn create_authenticated_user(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, String), DbErr> {
    let user = crate::factory::user::UserFactory::new(db)
        .activated(true)
        .build()
        .await?;
    let plaintext = crate::factory::token::unique_plaintext();
    crate::factory::token::TokenFactory::new(db, user.id)
        .plaintext(plaintext.clone())
        .build()
        .await?;

    Ok((user, plaintext))
}
