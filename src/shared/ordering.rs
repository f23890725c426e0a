//! Drag-and-Drop Ordering Engine
//!
//! Computes the position reassignment produced by dragging a task card,
//! either within its list or onto another list.
//!
//! Positions are never edited independently: after every move the affected
//! lists are re-derived from their new sequence, so each one holds the
//! positions `0..n` with no gaps or repeats. The engine is a pure function of
//! the snapshot it is given; the caller owns snapshot freshness.
//!
//! # Example
//!
//! ```rust
//! use taskboard::shared::ordering::{compute_reorder, DragDrop, TaskMove};
//! use uuid::Uuid;
//!
//! let list = Uuid::new_v4();
//! let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
//! let tasks = vec![
//!     TaskMove { id: a, list, position: 0 },
//!     TaskMove { id: b, list, position: 1 },
//!     TaskMove { id: c, list, position: 2 },
//! ];
//!
//! // Drag B to the end of its own list
//! let reorder = compute_reorder(&tasks, &DragDrop::new(b, list)).unwrap();
//! let order: Vec<Uuid> = reorder.batch.iter().map(|m| m.id).collect();
//! assert_eq!(order, vec![a, c, b]);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Anything that occupies a slot in a list
pub trait Orderable: Clone {
    fn id(&self) -> Uuid;
    fn list(&self) -> Uuid;
    fn position(&self) -> i64;
    /// Move to `list` at `position`
    fn relocate(&mut self, list: Uuid, position: i64);
}

/// One entry of a batch move: where a task ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskMove {
    pub id: Uuid,
    pub list: Uuid,
    pub position: i64,
}

impl TaskMove {
    pub fn of<T: Orderable>(task: &T) -> Self {
        Self {
            id: task.id(),
            list: task.list(),
            position: task.position(),
        }
    }
}

impl Orderable for TaskMove {
    fn id(&self) -> Uuid {
        self.id
    }

    fn list(&self) -> Uuid {
        self.list
    }

    fn position(&self) -> i64 {
        self.position
    }

    fn relocate(&mut self, list: Uuid, position: i64) {
        self.list = list;
        self.position = position;
    }
}

/// Where the dragged task lands relative to the drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPlacement {
    /// Take the drop target's slot; the drop target and its followers shift down
    #[default]
    Before,
    /// Land immediately after the drop target
    After,
}

/// A completed drag gesture
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragDrop {
    /// Task being dragged
    pub dragged: Option<Uuid>,
    /// List the task was released over
    pub target_list: Option<Uuid>,
    /// Task under the pointer at release, if any
    pub drop_target: Option<Uuid>,
    pub placement: DropPlacement,
}

impl DragDrop {
    pub fn new(dragged: Uuid, target_list: Uuid) -> Self {
        Self {
            dragged: Some(dragged),
            target_list: Some(target_list),
            drop_target: None,
            placement: DropPlacement::default(),
        }
    }

    /// Release over `task`
    pub fn onto(mut self, task: Uuid) -> Self {
        self.drop_target = Some(task);
        self
    }

    pub fn with_drop_target(mut self, task: Option<Uuid>) -> Self {
        self.drop_target = task;
        self
    }

    pub fn placement(mut self, placement: DropPlacement) -> Self {
        self.placement = placement;
        self
    }
}

/// Reasons a drag cannot be turned into a batch
///
/// The messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("No task is being dragged.")]
    MissingDraggedTask,

    #[error("Invalid target list.")]
    MissingTargetList,

    #[error("Dragged task not found.")]
    UnknownTask(Uuid),
}

/// Result of a reorder computation
#[derive(Debug, Clone, PartialEq)]
pub struct Reorder<T> {
    /// Full snapshot with the affected tasks relocated, in input order
    pub tasks: Vec<T>,
    /// One entry per task of the source and target lists
    ///
    /// Source list entries come first when the move crosses lists; each
    /// list's entries are in ascending new position.
    pub batch: Vec<TaskMove>,
}

/// Tasks of `list` sorted by position
///
/// The sort is stable: tasks sharing a (stale) position keep snapshot order.
pub fn list_order<T: Orderable>(tasks: &[T], list: Uuid) -> Vec<T> {
    let mut ordered: Vec<T> = tasks.iter().filter(|t| t.list() == list).cloned().collect();
    ordered.sort_by_key(|t| t.position());
    ordered
}

/// Reassign `0..n` in sequence order
pub fn repack<T: Orderable>(sequence: &mut [T]) {
    for (index, task) in sequence.iter_mut().enumerate() {
        let list = task.list();
        task.relocate(list, index as i64);
    }
}

/// Whether the tasks of `list` hold exactly the positions `0..n`
pub fn is_contiguous<T: Orderable>(tasks: &[T], list: Uuid) -> bool {
    let mut positions: Vec<i64> = tasks
        .iter()
        .filter(|t| t.list() == list)
        .map(|t| t.position())
        .collect();
    positions.sort_unstable();
    positions.iter().enumerate().all(|(i, p)| *p == i as i64)
}

/// Compute the new position assignment for a drag gesture
///
/// # Errors
///
/// Fails without touching anything when no task is dragged, no target list
/// is given, or the dragged task is not part of the snapshot.
pub fn compute_reorder<T: Orderable>(tasks: &[T], drop: &DragDrop) -> Result<Reorder<T>, ReorderError> {
    let dragged_id = drop.dragged.ok_or(ReorderError::MissingDraggedTask)?;
    let target_list = drop.target_list.ok_or(ReorderError::MissingTargetList)?;
    let dragged = tasks
        .iter()
        .find(|t| t.id() == dragged_id)
        .ok_or(ReorderError::UnknownTask(dragged_id))?;
    let source_list = dragged.list();

    let mut target = list_order(tasks, target_list);
    let original_index = target.iter().position(|t| t.id() == dragged_id);
    target.retain(|t| t.id() != dragged_id);

    let index = insertion_index(&target, dragged_id, original_index, drop);
    let mut moved = dragged.clone();
    moved.relocate(target_list, index as i64);
    target.insert(index, moved);

    let mut relocated = Vec::with_capacity(target.len());
    if source_list != target_list {
        let mut source = list_order(tasks, source_list);
        source.retain(|t| t.id() != dragged_id);
        repack(&mut source);
        relocated.extend(source);
    }
    repack(&mut target);
    relocated.extend(target);

    let batch: Vec<TaskMove> = relocated.iter().map(TaskMove::of).collect();
    let by_id: HashMap<Uuid, &T> = relocated.iter().map(|t| (t.id(), t)).collect();
    let tasks = tasks
        .iter()
        .map(|t| by_id.get(&t.id()).map_or_else(|| t.clone(), |r| (*r).clone()))
        .collect();

    Ok(Reorder { tasks, batch })
}

/// Index in `sequence` (which no longer contains the dragged task) to insert at
fn insertion_index<T: Orderable>(
    sequence: &[T],
    dragged: Uuid,
    original_index: Option<usize>,
    drop: &DragDrop,
) -> usize {
    match drop.drop_target {
        Some(target) if target == dragged => original_index.unwrap_or(sequence.len()),
        Some(target) => match sequence.iter().position(|t| t.id() == target) {
            Some(index) => match drop.placement {
                DropPlacement::Before => index,
                DropPlacement::After => index + 1,
            },
            None => sequence.len(),
        },
        None => sequence.len(),
    }
}
