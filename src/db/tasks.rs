//! Task CRUD operations.
//!
//! SQLite stores `completed` as 0/1. Conversion to and from `bool` happens
//! here and nowhere else.

use super::Database;
use crate::types::{NewTask, Task};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

const TASK_COLUMNS: &str = "id, title, description, completed, created_at";

/// Rows inserted into an empty table at startup: (title, description, completed).
const DEMO_TASKS: [(&str, Option<&str>, bool); 3] = [
    ("Do the dishes", None, false),
    (
        "Prepare for the interview",
        Some("Review the topics covered in the interview"),
        true,
    ),
    ("Buy groceries", Some("Buy groceries for the week"), false),
];

pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    // Tables created before the NOT NULL constraint may hold NULL here.
    let completed: Option<i64> = row.get("completed")?;

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        completed: completed.is_some_and(|c| c != 0),
        created_at: row.get("created_at")?,
    })
}

/// Internal helper to get a task using an existing connection (avoids deadlock).
fn get_task_internal(conn: &Connection, task_id: i64) -> Result<Option<Task>> {
    let task = conn
        .query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
            params![task_id],
            parse_task_row,
        )
        .optional()?;
    Ok(task)
}

fn insert_task(
    conn: &Connection,
    title: &str,
    description: Option<&str>,
    completed: bool,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO tasks (title, description, completed) VALUES (?1, ?2, ?3)",
        params![title, description, completed as i64],
    )?;
    Ok(conn.last_insert_rowid())
}

impl Database {
    /// List every task, newest first.
    ///
    /// `created_at` has one-second resolution, so rows created within the same
    /// second fall back to id order.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC, id DESC"
            ))?;
            let tasks = stmt
                .query_map([], parse_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
    }

    /// Get a task by id.
    pub fn get_task(&self, task_id: i64) -> Result<Option<Task>> {
        self.with_conn(|conn| get_task_internal(conn, task_id))
    }

    /// Insert a new, not yet completed task and return the stored row.
    ///
    /// An empty description is stored as NULL.
    pub fn create_task(&self, new_task: &NewTask) -> Result<Task> {
        let description = new_task.description.as_deref().filter(|d| !d.is_empty());

        self.with_conn(|conn| {
            let id = insert_task(conn, &new_task.title, description, false)?;
            debug!(task_id = id, "Task inserted");
            get_task_internal(conn, id)?
                .ok_or_else(|| anyhow::anyhow!("Task {} vanished after insert", id))
        })
    }

    /// Flip `completed` in a single statement.
    ///
    /// Returns the updated task, or `None` when no task has that id.
    pub fn toggle_task(&self, task_id: i64) -> Result<Option<Task>> {
        self.with_conn(|conn| {
            let task = conn
                .query_row(
                    &format!(
                        "UPDATE tasks
                         SET completed = CASE WHEN COALESCE(completed, 0) = 0 THEN 1 ELSE 0 END
                         WHERE id = ?1
                         RETURNING {TASK_COLUMNS}"
                    ),
                    params![task_id],
                    parse_task_row,
                )
                .optional()?;
            Ok(task)
        })
    }

    /// Delete a task. Returns `false` when no task has that id.
    pub fn delete_task(&self, task_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let changes = conn.execute("DELETE FROM tasks WHERE id = ?1", params![task_id])?;
            Ok(changes > 0)
        })
    }

    /// Insert the demo tasks if the table is empty.
    ///
    /// Returns the number of rows inserted (0 when the table already had data).
    pub fn seed_demo_tasks(&self) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let count: i64 = tx.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
            if count > 0 {
                return Ok(0);
            }

            for (title, description, completed) in DEMO_TASKS {
                insert_task(&tx, title, description, completed)?;
            }

            tx.commit()?;
            Ok(DEMO_TASKS.len())
        })
    }
}
