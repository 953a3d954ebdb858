use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EmailDto {
    pub email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CredentialsDto {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TokenDto {
    pub token: String,
    pub expiry: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthenticationTokenDto {
    pub authentication_token: TokenDto,
}
