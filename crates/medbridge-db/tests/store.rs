use std::path::Path;

use medbridge_db::Database;
use medbridge_store::{NewTodo, NewUser, StoreError, TodoPatch, TodoStore, UserStore};

fn open() -> Database {
    Database::open(Path::new(":memory:")).unwrap()
}

fn new_todo(task: &str) -> NewTodo {
    NewTodo {
        task: task.into(),
        done: false,
        owner_id: None,
    }
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Alice".into(),
        email: email.into(),
        credential: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
    }
}

#[test]
fn ids_strictly_increase_and_survive_deletes() {
    let db = open();
    let a = db.create_todo(new_todo("a")).unwrap();
    let b = db.create_todo(new_todo("b")).unwrap();
    assert!(b.id > a.id);

    // AUTOINCREMENT: deleting the max row must not recycle its id.
    db.delete_todo(b.id).unwrap();
    let c = db.create_todo(new_todo("c")).unwrap();
    assert!(c.id > b.id);
}

#[test]
fn unknown_owner_is_rejected_with_nothing_written() {
    let db = open();
    let err = db
        .create_todo(NewTodo {
            task: "orphan".into(),
            done: false,
            owner_id: Some(42),
        })
        .unwrap_err();

    assert!(matches!(err, StoreError::ReferenceNotFound(42)));
    assert!(db.list_todos().unwrap().is_empty());
}

#[test]
fn todo_can_reference_existing_owner() {
    let db = open();
    let alice = db.create_user(new_user("alice@example.com")).unwrap();

    let todo = db
        .create_todo(NewTodo {
            task: "Prendre medicament".into(),
            done: false,
            owner_id: Some(alice.id),
        })
        .unwrap();

    assert_eq!(todo.owner_id, Some(alice.id));
    assert_eq!(db.get_todo(todo.id).unwrap().task, "Prendre medicament");
}

#[test]
fn duplicate_email_is_rejected_with_nothing_written() {
    let db = open();
    db.create_user(new_user("alice@example.com")).unwrap();

    let err = db.create_user(new_user("alice@example.com")).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEmail(_)));
    assert_eq!(db.list_users().unwrap().len(), 1);
}

#[test]
fn email_comparison_is_exact_match() {
    let db = open();
    db.create_user(new_user("alice@example.com")).unwrap();
    db.create_user(new_user("Alice@example.com")).unwrap();
    assert_eq!(db.list_users().unwrap().len(), 2);
}

#[test]
fn user_defaults_are_applied() {
    let db = open();
    let alice = db.create_user(new_user("alice@example.com")).unwrap();
    assert!(alice.is_active);
    assert!(alice.created_at.timestamp() > 0);
}

#[test]
fn get_missing_todo_is_not_found() {
    let db = open();
    assert!(matches!(db.get_todo(999), Err(StoreError::NotFound(999))));
}

#[test]
fn replace_overwrites_but_preserves_owner() {
    let db = open();
    let alice = db.create_user(new_user("alice@example.com")).unwrap();
    let todo = db
        .create_todo(NewTodo {
            task: "before".into(),
            done: false,
            owner_id: Some(alice.id),
        })
        .unwrap();

    let replaced = db.replace_todo(todo.id, "after".into(), true).unwrap();
    assert_eq!(replaced.id, todo.id);
    assert_eq!(replaced.owner_id, Some(alice.id));
    assert_eq!(replaced.task, "after");
    assert!(replaced.done);

    assert!(matches!(
        db.replace_todo(999, "nope".into(), false),
        Err(StoreError::NotFound(999))
    ));
}

#[test]
fn patch_applies_only_present_fields() {
    let db = open();
    let todo = db
        .create_todo(NewTodo {
            task: "original".into(),
            done: true,
            owner_id: None,
        })
        .unwrap();

    // Explicit false must stick.
    let patched = db
        .update_todo(
            todo.id,
            TodoPatch {
                task: None,
                done: Some(false),
            },
        )
        .unwrap();
    assert!(!patched.done);
    assert_eq!(patched.task, "original");

    // Absent fields stay put.
    let untouched = db.update_todo(todo.id, TodoPatch::default()).unwrap();
    assert_eq!(untouched.task, "original");
    assert!(!untouched.done);
}

#[test]
fn second_delete_is_not_found() {
    let db = open();
    let todo = db.create_todo(new_todo("once")).unwrap();

    db.delete_todo(todo.id).unwrap();
    assert!(matches!(
        db.delete_todo(todo.id),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn list_keeps_creation_order() {
    let db = open();
    for task in ["first", "second", "third"] {
        db.create_todo(new_todo(task)).unwrap();
    }

    let tasks: Vec<String> = db
        .list_todos()
        .unwrap()
        .into_iter()
        .map(|t| t.task)
        .collect();
    assert_eq!(tasks, ["first", "second", "third"]);
}
