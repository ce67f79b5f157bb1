use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub task: String,
    pub done: bool,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Stored user record. `credential` holds the hashed password and must never
/// reach a client; read-facing code goes through `api::UserView`, which has
/// no credential field. Deliberately not `Serialize`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub credential: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
