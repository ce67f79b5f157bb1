//! Row types mapping directly onto SQLite rows, kept separate from the
//! medbridge-types domain models so the DB layer owns its own shapes.

use chrono::{DateTime, NaiveDateTime, Utc};
use medbridge_types::models::{Todo, User};
use tracing::warn;

pub struct TodoRow {
    pub id: i64,
    pub task: String,
    pub done: bool,
    pub owner_id: Option<i64>,
    pub created_at: String,
}

impl TodoRow {
    pub fn into_todo(self) -> Todo {
        let created_at = parse_timestamp(&self.created_at, "todo", self.id);
        Todo {
            id: self.id,
            task: self.task,
            done: self.done,
            owner_id: self.owner_id,
            created_at,
        }
    }
}

pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub credential: String,
    pub is_active: bool,
    pub created_at: String,
}

impl UserRow {
    pub fn into_user(self) -> User {
        let created_at = parse_timestamp(&self.created_at, "user", self.id);
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            credential: self.credential,
            is_active: self.is_active,
            created_at,
        }
    }
}

fn parse_timestamp(raw: &str, table: &str, id: i64) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite's datetime('now') emits "YYYY-MM-DD HH:MM:SS" without a
            // timezone. Parse as naive UTC and convert.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("corrupt created_at '{}' on {} {}: {}", raw, table, id, e);
            DateTime::default()
        })
}
