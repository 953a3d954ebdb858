//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. The token service owns
//! every credential decision; the account service drives user lifecycle flows
//! (registration, activation, login, password reset) on top of it.

pub mod account;
pub mod mailer;
pub mod password;
pub mod token;
