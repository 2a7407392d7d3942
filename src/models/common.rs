use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

// Simple message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
