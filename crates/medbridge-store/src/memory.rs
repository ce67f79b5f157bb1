use std::sync::Mutex;

use chrono::Utc;
use medbridge_types::models::{Todo, User};

use crate::{NewTodo, NewUser, StoreError, TodoPatch, TodoStore, UserStore};

/// Process-local backend. One mutex over the whole state, so every operation
/// (including the id bump) is atomic; id counters are high-water marks and
/// never hand out a previously assigned id, matching what AUTOINCREMENT
/// guarantees on the SQLite side.
pub struct MemoryStore {
    inner: Mutex<State>,
}

#[derive(Default)]
struct State {
    todos: Vec<Todo>,
    users: Vec<User>,
    last_todo_id: i64,
    last_user_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(State::default()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>, StoreError> {
        self.inner
            .lock()
            .map_err(|e| StoreError::unavailable(format!("store lock poisoned: {}", e)))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore for MemoryStore {
    fn create_todo(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let mut state = self.lock()?;

        if let Some(owner_id) = new.owner_id {
            if !state.users.iter().any(|u| u.id == owner_id) {
                return Err(StoreError::ReferenceNotFound(owner_id));
            }
        }

        state.last_todo_id += 1;
        let todo = Todo {
            id: state.last_todo_id,
            task: new.task,
            done: new.done,
            owner_id: new.owner_id,
            created_at: Utc::now(),
        };
        state.todos.push(todo.clone());
        Ok(todo)
    }

    fn list_todos(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.lock()?.todos.clone())
    }

    fn get_todo(&self, id: i64) -> Result<Todo, StoreError> {
        self.lock()?
            .todos
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn replace_todo(&self, id: i64, task: String, done: bool) -> Result<Todo, StoreError> {
        let mut state = self.lock()?;
        let todo = state
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        todo.task = task;
        todo.done = done;
        Ok(todo.clone())
    }

    fn update_todo(&self, id: i64, patch: TodoPatch) -> Result<Todo, StoreError> {
        let mut state = self.lock()?;
        let todo = state
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(task) = patch.task {
            todo.task = task;
        }
        if let Some(done) = patch.done {
            todo.done = done;
        }
        Ok(todo.clone())
    }

    fn delete_todo(&self, id: i64) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let before = state.todos.len();
        state.todos.retain(|t| t.id != id);
        if state.todos.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

impl UserStore for MemoryStore {
    fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut state = self.lock()?;

        if state.users.iter().any(|u| u.email == new.email) {
            return Err(StoreError::DuplicateEmail(new.email));
        }

        state.last_user_id += 1;
        let user = User {
            id: state.last_user_id,
            name: new.name,
            email: new.email,
            credential: new.credential,
            is_active: true,
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.lock()?.users.clone())
    }
}
