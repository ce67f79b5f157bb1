pub mod memory;
pub mod stats;

use medbridge_types::models::{Todo, User};
use thiserror::Error;

/// Failures a store operation can surface. Validation of request shape
/// happens before any store call and never reaches this taxonomy.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no todo with id {0}")]
    NotFound(i64),
    #[error("owner {0} does not exist")]
    ReferenceNotFound(i64),
    #[error("email '{0}' is already registered")]
    DuplicateEmail(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Wrap a backend failure that has no mapping in the taxonomy. Fatal for
    /// the request; retry policy belongs to the caller.
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct NewTodo {
    pub task: String,
    pub done: bool,
    pub owner_id: Option<i64>,
}

/// The password is hashed by the caller; stores only ever see the finished
/// credential string.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub credential: String,
}

/// Field present means "apply this value", including falsy ones. Field absent
/// means "leave as is".
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub task: Option<String>,
    pub done: Option<bool>,
}

pub trait TodoStore: Send + Sync {
    /// Assigns the next id and appends. `ReferenceNotFound` when `owner_id`
    /// names no existing user; the collection is left untouched on failure.
    fn create_todo(&self, new: NewTodo) -> Result<Todo, StoreError>;

    /// All todos in creation order.
    fn list_todos(&self) -> Result<Vec<Todo>, StoreError>;

    fn get_todo(&self, id: i64) -> Result<Todo, StoreError>;

    /// Overwrites `task` and `done`; `id`, `owner_id` and `created_at` are
    /// preserved.
    fn replace_todo(&self, id: i64, task: String, done: bool) -> Result<Todo, StoreError>;

    fn update_todo(&self, id: i64, patch: TodoPatch) -> Result<Todo, StoreError>;

    /// Removes the todo. Deleting an id twice yields `NotFound` the second
    /// time, not a no-op success.
    fn delete_todo(&self, id: i64) -> Result<(), StoreError>;
}

pub trait UserStore: Send + Sync {
    /// `DuplicateEmail` when the email exact-matches an existing user's
    /// (comparison is case-sensitive on the stored string).
    fn create_user(&self, new: NewUser) -> Result<User, StoreError>;

    /// All users in creation order.
    fn list_users(&self) -> Result<Vec<User>, StoreError>;
}

/// What callers hold: one handle that owns both collections, swappable
/// between the in-memory and the SQLite backend.
pub trait Store: TodoStore + UserStore {}

impl<T: TodoStore + UserStore> Store for T {}
