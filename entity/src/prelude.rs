pub use super::token::Entity as Token;
pub use super::user::Entity as User;
