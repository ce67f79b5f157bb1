use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Todo, User};

// -- Todos --

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, max = 200))]
    pub task: String,
    #[serde(default)]
    pub done: bool,
    pub owner_id: Option<i64>,
}

/// PUT body. Both fields are mandatory, the whole todo is overwritten.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ReplaceTodoRequest {
    #[validate(length(min = 1, max = 200))]
    pub task: String,
    pub done: bool,
}

/// PATCH body. A missing key means "leave unchanged"; a present key is
/// applied even when the value is falsy (`done: false` must stick).
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PatchTodoRequest {
    #[validate(length(min = 1, max = 200))]
    pub task: Option<String>,
    pub done: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct TodoView {
    pub id: i64,
    pub task: String,
    pub done: bool,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<Todo> for TodoView {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            task: todo.task,
            done: todo.done,
            owner_id: todo.owner_id,
            created_at: todo.created_at,
        }
    }
}

// -- Users --

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Credential-free projection of a stored user.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

// -- Stats --

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub total_todos: usize,
    pub completed_todos: usize,
    pub pending_todos: usize,
    pub total_users: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_view_has_no_credential_key() {
        let user = User {
            id: 1,
            name: "Alice".into(),
            email: "alice@example.com".into(),
            credential: "$argon2id$v=19$secret".into(),
            is_active: true,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(UserView::from(user)).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert!(!keys.contains(&"credential"));
        assert!(!keys.contains(&"password"));
        assert_eq!(json["email"], "alice@example.com");
    }

    #[test]
    fn patch_distinguishes_absent_from_false() {
        let absent: PatchTodoRequest = serde_json::from_str("{}").unwrap();
        assert!(absent.done.is_none());

        let explicit: PatchTodoRequest = serde_json::from_str(r#"{"done": false}"#).unwrap();
        assert_eq!(explicit.done, Some(false));
    }

    #[test]
    fn create_todo_rejects_oversized_task() {
        let req = CreateTodoRequest {
            task: "x".repeat(201),
            done: false,
            owner_id: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_user_rejects_bad_email() {
        let req = CreateUserRequest {
            name: "Bob".into(),
            email: "not-an-email".into(),
            password: "supersecret".into(),
        };
        assert!(req.validate().is_err());
    }
}
