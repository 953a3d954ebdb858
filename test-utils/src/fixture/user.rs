use chrono::Utc;

use crate::factory::user::PLACEHOLDER_PASSWORD_HASH;

/// Creates an in-memory user entity with default values.
pub fn entity() -> entity::user::Model {
    entity_builder().build()
}

/// Creates a builder for a customized in-memory user entity.
pub fn entity_builder() -> UserEntityBuilder {
    UserEntityBuilder {
        model: entity::user::Model {
            id: 1,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: PLACEHOLDER_PASSWORD_HASH.to_string(),
            role: "user".to_string(),
            activated: false,
            version: 1,
            created_at: Utc::now(),
        },
    }
}

/// Builder for in-memory user entities.
pub struct UserEntityBuilder {
    model: entity::user::Model,
}

impl UserEntityBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.model.id = id;
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.model.role = role.into();
        self
    }

    pub fn activated(mut self, activated: bool) -> Self {
        self.model.activated = activated;
        self
    }

    pub fn build(self) -> entity::user::Model {
        self.model
    }
}
