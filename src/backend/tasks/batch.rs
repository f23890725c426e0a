/**
 * Batch Task Moves
 *
 * Validation and persistence of `PUT /api/v1/tasks/move`, the endpoint the
 * board client calls after every drag and drop.
 *
 * # Validation
 *
 * Checks run in this order and stop at the first failure, before anything
 * is written:
 *
 * 1. `updates` is a non-empty array
 * 2. every entry has a well-formed task `id` and `list` id
 * 3. every `position` is a non-negative integer
 * 4. positions aimed at the same list are pairwise distinct
 * 5. every target list exists
 * 6. tasks already in a target list that are not part of the batch do not
 *    hold a position the batch claims
 *
 * Checks 1 to 3 walk the entries in input order and test `id`, then `list`,
 * then `position` for each entry.
 *
 * # Apply
 *
 * Entries are applied in input order. Each task takes its new list, the
 * list's board and its new position. A missing task stops the batch with a
 * 404; in atomic mode every earlier entry of the batch is rolled back, in
 * sequential mode earlier entries stay written.
 *
 * Nothing locks the lists between validation and apply, so two overlapping
 * batches can both pass validation. Clients re-fetch the board after every
 * move and converge on what was stored.
 */

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::lists::db::find_list;
use crate::backend::tasks::db::{find_task, list_positions, move_task};
use crate::shared::board::Task;
use crate::shared::ordering::TaskMove;

/// Why a batch was rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("Updates must be a non-empty array")]
    EmptyBatch,

    #[error("Invalid task ID in updates")]
    InvalidTaskId,

    #[error("Invalid list ID in updates")]
    InvalidListId,

    #[error("Invalid position in updates")]
    InvalidPosition,

    #[error("Duplicate positions detected in the same list")]
    DuplicatePositions { list: Uuid, position: i64 },

    #[error("Position {position} is already taken in list {list}")]
    PositionTaken { list: Uuid, position: i64 },

    #[error("List with ID {0} not found")]
    ListNotFound(Uuid),

    #[error("Task with ID {0} not found")]
    TaskNotFound(Uuid),
}

impl BatchError {
    /// Whether the error names an entity that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, BatchError::ListNotFound(_) | BatchError::TaskNotFound(_))
    }
}

/// A batch that passed the shape checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveBatch {
    entries: Vec<TaskMove>,
}

impl MoveBatch {
    /// Check shape and per-list position uniqueness of a raw `updates` value
    pub fn parse(updates: Option<&Value>) -> Result<Self, BatchError> {
        let items = match updates {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(BatchError::EmptyBatch),
        };

        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let id = parse_id(item.get("id")).ok_or(BatchError::InvalidTaskId)?;
            let list = parse_id(item.get("list")).ok_or(BatchError::InvalidListId)?;
            let position = item
                .get("position")
                .and_then(Value::as_i64)
                .filter(|p| *p >= 0)
                .ok_or(BatchError::InvalidPosition)?;
            entries.push(TaskMove { id, list, position });
        }

        let batch = MoveBatch { entries };
        batch.check_distinct_positions()?;
        Ok(batch)
    }

    pub fn entries(&self) -> &[TaskMove] {
        &self.entries
    }

    /// Target lists in order of first appearance
    pub fn target_lists(&self) -> Vec<Uuid> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|e| e.list)
            .filter(|list| seen.insert(*list))
            .collect()
    }

    /// Whether the batch moves this task
    pub fn contains_task(&self, id: Uuid) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    fn check_distinct_positions(&self) -> Result<(), BatchError> {
        let mut claimed = HashSet::new();
        for entry in &self.entries {
            if !claimed.insert((entry.list, entry.position)) {
                return Err(BatchError::DuplicatePositions {
                    list: entry.list,
                    position: entry.position,
                });
            }
        }
        Ok(())
    }

    /// Reject positions in `list` held by persisted tasks outside the batch
    ///
    /// `persisted` is the `(id, position)` of every task currently stored in
    /// `list`.
    pub fn check_siblings(&self, list: Uuid, persisted: &[(Uuid, i64)]) -> Result<(), BatchError> {
        let occupied: HashSet<i64> = persisted
            .iter()
            .filter(|(id, _)| !self.contains_task(*id))
            .map(|(_, position)| *position)
            .collect();

        match self
            .entries
            .iter()
            .filter(|e| e.list == list)
            .find(|e| occupied.contains(&e.position))
        {
            Some(entry) => Err(BatchError::PositionTaken {
                list,
                position: entry.position,
            }),
            None => Ok(()),
        }
    }
}

fn parse_id(value: Option<&Value>) -> Option<Uuid> {
    value.and_then(Value::as_str).and_then(|s| Uuid::parse_str(s).ok())
}

/// Validate a batch against the stored lists and tasks
///
/// Returns the board of every target list, used when applying.
pub async fn check_against_store(
    pool: &SqlitePool,
    batch: &MoveBatch,
) -> Result<HashMap<Uuid, Uuid>, BackendError> {
    let mut boards = HashMap::new();
    for list_id in batch.target_lists() {
        let list = find_list(pool, list_id)
            .await?
            .ok_or(BatchError::ListNotFound(list_id))?;
        boards.insert(list_id, list.board);
    }

    for list_id in batch.target_lists() {
        let persisted = list_positions(pool, list_id).await?;
        batch.check_siblings(list_id, &persisted)?;
    }

    Ok(boards)
}

/// Validate and persist a batch, returning the moved tasks in input order
pub async fn apply_batch(pool: &SqlitePool, batch: &MoveBatch, atomic: bool) -> Result<Vec<Task>, BackendError> {
    let boards = check_against_store(pool, batch).await?;

    if atomic {
        let mut tx = pool.begin().await?;
        let moved = apply_entries(&mut tx, batch, &boards).await?;
        tx.commit().await?;
        Ok(moved)
    } else {
        let mut conn = pool.acquire().await?;
        apply_entries(&mut conn, batch, &boards).await
    }
}

async fn apply_entries(
    conn: &mut sqlx::SqliteConnection,
    batch: &MoveBatch,
    boards: &HashMap<Uuid, Uuid>,
) -> Result<Vec<Task>, BackendError> {
    let mut moved = Vec::with_capacity(batch.entries().len());
    for entry in batch.entries() {
        let board = boards
            .get(&entry.list)
            .copied()
            .ok_or(BatchError::ListNotFound(entry.list))?;

        if !move_task(&mut *conn, entry.id, entry.list, board, entry.position).await? {
            tracing::warn!("Batch move stopped at missing task {}", entry.id);
            return Err(BatchError::TaskNotFound(entry.id).into());
        }

        let task = find_task(conn, entry.id)
            .await?
            .ok_or(BatchError::TaskNotFound(entry.id))?;
        moved.push(task);
    }
    Ok(moved)
}
