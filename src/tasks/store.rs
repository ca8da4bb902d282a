//! Task persistence.

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::types::{NewTask, Priority, Task, TaskUpdate};
use crate::error::QuickdueError;
use crate::storage::Database;

/// Task storage operations used by the commands.
#[cfg_attr(test, mockall::automock)]
pub trait TaskStore {
    /// Create a task and return it with its assigned ID.
    fn add(&self, task: &NewTask) -> Result<Task, QuickdueError>;

    /// Fetch one task.
    fn get(&self, id: i64) -> Result<Task, QuickdueError>;

    /// All tasks, newest first.
    fn list(&self) -> Result<Vec<Task>, QuickdueError>;

    /// Flip completion, stamping or clearing `completed_at`.
    fn toggle(&self, id: i64, now: NaiveDateTime) -> Result<Task, QuickdueError>;

    /// Apply a partial update.
    fn update(&self, id: i64, update: &TaskUpdate) -> Result<Task, QuickdueError>;

    /// Remove a task.
    fn delete(&self, id: i64) -> Result<(), QuickdueError>;
}

const SELECT_COLUMNS: &str =
    "SELECT id, text, completed, priority, category, deadline, created_at, completed_at FROM tasks";

/// `SQLite`-backed task store.
pub struct SqliteTaskStore {
    db: Database,
}

impl SqliteTaskStore {
    /// Open the store at the default database location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open() -> Result<Self, QuickdueError> {
        Ok(Self::with_database(Database::open()?))
    }

    /// Create a store over an existing database.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    fn save(&self, task: &Task) -> Result<(), QuickdueError> {
        self.db
            .connection()
            .execute(
                r"UPDATE tasks SET
                  text = ?1,
                  completed = ?2,
                  priority = ?3,
                  category = ?4,
                  deadline = ?5,
                  completed_at = ?6
                  WHERE id = ?7",
                params![
                    task.text,
                    task.completed,
                    task.priority.as_str(),
                    task.category,
                    task.deadline,
                    task.completed_at,
                    task.id,
                ],
            )
            .map_err(|e| QuickdueError::Database(format!("Failed to update task {}: {e}", task.id)))?;
        Ok(())
    }
}

impl TaskStore for SqliteTaskStore {
    fn add(&self, task: &NewTask) -> Result<Task, QuickdueError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO tasks (text, completed, priority, category, deadline, created_at)
              VALUES (?1, 0, ?2, ?3, ?4, ?5)",
            params![
                task.text,
                task.priority.as_str(),
                task.category,
                task.deadline,
                task.created_at,
            ],
        )
        .map_err(|e| QuickdueError::Database(format!("Failed to insert task: {e}")))?;

        let id = conn.last_insert_rowid();
        debug!(id, category = %task.category, "task added");

        Ok(Task {
            id,
            text: task.text.clone(),
            completed: false,
            priority: task.priority,
            category: task.category.clone(),
            deadline: task.deadline,
            created_at: task.created_at,
            completed_at: None,
        })
    }

    fn get(&self, id: i64) -> Result<Task, QuickdueError> {
        self.db
            .connection()
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id], row_to_task)
            .optional()
            .map_err(|e| QuickdueError::Database(format!("Failed to query task {id}: {e}")))?
            .ok_or_else(|| QuickdueError::NotFound(format!("Task with ID: {id}")))
    }

    fn list(&self) -> Result<Vec<Task>, QuickdueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"))
            .map_err(|e| QuickdueError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_task)
            .map_err(|e| QuickdueError::Database(format!("Failed to query tasks: {e}")))?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }

        Ok(tasks)
    }

    fn toggle(&self, id: i64, now: NaiveDateTime) -> Result<Task, QuickdueError> {
        let mut task = self.get(id)?;
        task.completed = !task.completed;
        task.completed_at = task.completed.then_some(now);
        self.save(&task)?;
        debug!(id, completed = task.completed, "task toggled");
        Ok(task)
    }

    fn update(&self, id: i64, update: &TaskUpdate) -> Result<Task, QuickdueError> {
        let mut task = self.get(id)?;
        update.apply_to(&mut task);
        self.save(&task)?;
        debug!(id, "task updated");
        Ok(task)
    }

    fn delete(&self, id: i64) -> Result<(), QuickdueError> {
        let removed = self
            .db
            .connection()
            .execute("DELETE FROM tasks WHERE id = ?1", [id])
            .map_err(|e| QuickdueError::Database(format!("Failed to delete task {id}: {e}")))?;

        if removed == 0 {
            return Err(QuickdueError::NotFound(format!("Task with ID: {id}")));
        }
        debug!(id, "task deleted");
        Ok(())
    }
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let priority: String = row.get(3)?;
    let priority = Priority::from_str_opt(&priority).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            Type::Text,
            format!("unknown priority '{priority}'").into(),
        )
    })?;

    Ok(Task {
        id: row.get(0)?,
        text: row.get(1)?,
        completed: row.get(2)?,
        priority,
        category: row.get(4)?,
        deadline: row.get(5)?,
        created_at: row.get(6)?,
        completed_at: row.get(7)?,
    })
}
