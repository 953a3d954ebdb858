use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageDto {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthDto {
    pub status: String,
    pub environment: String,
    pub version: String,
}
