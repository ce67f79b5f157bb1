use medbridge_types::api::StatsReport;

use crate::{Store, StoreError};

/// Derived counts over the current store state. No caching; every call
/// recomputes from what the store holds right now.
pub fn stats(store: &dyn Store) -> Result<StatsReport, StoreError> {
    let todos = store.list_todos()?;
    let users = store.list_users()?;

    let completed = todos.iter().filter(|t| t.done).count();

    Ok(StatsReport {
        total_todos: todos.len(),
        completed_todos: completed,
        pending_todos: todos.len() - completed,
        total_users: users.len(),
    })
}
