use rusqlite::{Connection, OptionalExtension, Row, params};

use medbridge_store::{NewTodo, NewUser, StoreError, TodoPatch, TodoStore, UserStore};
use medbridge_types::models::{Todo, User};

use crate::Database;
use crate::models::{TodoRow, UserRow};

const TODO_COLUMNS: &str = "id, task, done, owner_id, created_at";
const USER_COLUMNS: &str = "id, name, email, credential, is_active, created_at";

impl TodoStore for Database {
    fn create_todo(&self, new: NewTodo) -> Result<Todo, StoreError> {
        self.with_conn(|conn| {
            let tx = conn.transaction().map_err(StoreError::unavailable)?;

            // Owner check and insert are one unit of work; a failed check
            // rolls back with nothing written.
            if let Some(owner_id) = new.owner_id {
                if !user_exists(&tx, owner_id)? {
                    return Err(StoreError::ReferenceNotFound(owner_id));
                }
            }

            tx.execute(
                "INSERT INTO todos (task, done, owner_id) VALUES (?1, ?2, ?3)",
                params![new.task, new.done, new.owner_id],
            )
            .map_err(StoreError::unavailable)?;
            let id = tx.last_insert_rowid();

            let row = query_todo(&tx, id)?
                .ok_or_else(|| StoreError::unavailable("todo missing after insert"))?;
            tx.commit().map_err(StoreError::unavailable)?;
            Ok(row.into_todo())
        })
    }

    fn list_todos(&self) -> Result<Vec<Todo>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&format!("SELECT {} FROM todos ORDER BY id", TODO_COLUMNS))
                .map_err(StoreError::unavailable)?;

            let rows = stmt
                .query_map([], todo_from_row)
                .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
                .map_err(StoreError::unavailable)?;

            Ok(rows.into_iter().map(TodoRow::into_todo).collect())
        })
    }

    fn get_todo(&self, id: i64) -> Result<Todo, StoreError> {
        self.with_conn(|conn| {
            query_todo(conn, id)?
                .map(TodoRow::into_todo)
                .ok_or(StoreError::NotFound(id))
        })
    }

    fn replace_todo(&self, id: i64, task: String, done: bool) -> Result<Todo, StoreError> {
        self.with_conn(|conn| {
            let tx = conn.transaction().map_err(StoreError::unavailable)?;

            let changed = tx
                .execute(
                    "UPDATE todos SET task = ?1, done = ?2 WHERE id = ?3",
                    params![task, done, id],
                )
                .map_err(StoreError::unavailable)?;
            if changed == 0 {
                return Err(StoreError::NotFound(id));
            }

            let row = query_todo(&tx, id)?
                .ok_or_else(|| StoreError::unavailable("todo missing after update"))?;
            tx.commit().map_err(StoreError::unavailable)?;
            Ok(row.into_todo())
        })
    }

    fn update_todo(&self, id: i64, patch: TodoPatch) -> Result<Todo, StoreError> {
        self.with_conn(|conn| {
            let tx = conn.transaction().map_err(StoreError::unavailable)?;

            let current = query_todo(&tx, id)?.ok_or(StoreError::NotFound(id))?;
            let task = patch.task.unwrap_or(current.task);
            let done = patch.done.unwrap_or(current.done);

            tx.execute(
                "UPDATE todos SET task = ?1, done = ?2 WHERE id = ?3",
                params![task, done, id],
            )
            .map_err(StoreError::unavailable)?;

            let row = query_todo(&tx, id)?
                .ok_or_else(|| StoreError::unavailable("todo missing after update"))?;
            tx.commit().map_err(StoreError::unavailable)?;
            Ok(row.into_todo())
        })
    }

    fn delete_todo(&self, id: i64) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            let deleted = conn
                .execute("DELETE FROM todos WHERE id = ?1", [id])
                .map_err(StoreError::unavailable)?;
            if deleted == 0 {
                return Err(StoreError::NotFound(id));
            }
            Ok(())
        })
    }
}

impl UserStore for Database {
    fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        self.with_conn(|conn| {
            let tx = conn.transaction().map_err(StoreError::unavailable)?;

            // Exact-match comparison; the UNIQUE constraint backs this up.
            let taken: bool = tx
                .query_row(
                    "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
                    [&new.email],
                    |row| row.get(0),
                )
                .map_err(StoreError::unavailable)?;
            if taken {
                return Err(StoreError::DuplicateEmail(new.email));
            }

            tx.execute(
                "INSERT INTO users (name, email, credential) VALUES (?1, ?2, ?3)",
                params![new.name, new.email, new.credential],
            )
            .map_err(StoreError::unavailable)?;
            let id = tx.last_insert_rowid();

            let row = query_user(&tx, id)?
                .ok_or_else(|| StoreError::unavailable("user missing after insert"))?;
            tx.commit().map_err(StoreError::unavailable)?;
            Ok(row.into_user())
        })
    }

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))
                .map_err(StoreError::unavailable)?;

            let rows = stmt
                .query_map([], user_from_row)
                .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
                .map_err(StoreError::unavailable)?;

            Ok(rows.into_iter().map(UserRow::into_user).collect())
        })
    }
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<TodoRow> {
    Ok(TodoRow {
        id: row.get(0)?,
        task: row.get(1)?,
        done: row.get(2)?,
        owner_id: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        credential: row.get(3)?,
        is_active: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn query_todo(conn: &Connection, id: i64) -> Result<Option<TodoRow>, StoreError> {
    conn.query_row(
        &format!("SELECT {} FROM todos WHERE id = ?1", TODO_COLUMNS),
        [id],
        todo_from_row,
    )
    .optional()
    .map_err(StoreError::unavailable)
}

fn query_user(conn: &Connection, id: i64) -> Result<Option<UserRow>, StoreError> {
    conn.query_row(
        &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
        [id],
        user_from_row,
    )
    .optional()
    .map_err(StoreError::unavailable)
}

fn user_exists(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )
    .map_err(StoreError::unavailable)
}
