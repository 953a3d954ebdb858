use thiserror::Error;

/// Internal issues indicating unexpected stored data or library failures.
///
/// Every variant results in a 500 Internal Server Error with a generic message
/// returned to the client.
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored role is outside the closed set of roles.
    ///
    /// The row is never treated as any known role; requests depending on it fail closed.
    #[error("Unknown role '{value}' stored for user")]
    UnknownRole { value: String },

    /// A stored token scope is outside the closed set of scopes.
    #[error("Unknown token scope '{value}'")]
    UnknownScope { value: String },

    /// Argon2 failed to hash a password or parse a stored hash.
    #[error("Password hashing failed: {reason}")]
    PasswordHash { reason: String },

    /// A TTL could not be added to the current time.
    #[error("Token expiry out of range for ttl of {seconds}s")]
    ExpiryOutOfRange { seconds: i64 },
}
