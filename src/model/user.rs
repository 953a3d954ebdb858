use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub activated: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RegisterUserDto {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ActivateUserDto {
    pub token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ResetPasswordDto {
    pub password: String,
    pub token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PermissionsDto {
    pub role: String,
    pub permissions: Vec<String>,
}
