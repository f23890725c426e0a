/**
 * Board Data Structures
 *
 * This module defines the board, list and task types exchanged between the
 * server and its clients. The JSON shape follows the wire format the board
 * client renders: camelCase field names, `list`/`board` references as plain
 * ids, and assignees populated as user summaries.
 *
 * Storage rows live in the backend; these types are what leaves the server.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::ordering::Orderable;

/// Maximum board title length
pub const BOARD_TITLE_MAX: usize = 100;
/// Maximum board description length
pub const BOARD_DESCRIPTION_MAX: usize = 500;
/// Maximum list title length
pub const LIST_TITLE_MAX: usize = 50;
/// Maximum task title length
pub const TASK_TITLE_MAX: usize = 200;
/// Maximum task description length
pub const TASK_DESCRIPTION_MAX: usize = 1000;
/// Maximum comment length
pub const COMMENT_MAX: usize = 500;

/// Role of a user within a board
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Board creator
    Owner,
    /// Invited member
    #[default]
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::Member => "member",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "owner" => Some(MemberRole::Owner),
            "member" => Some(MemberRole::Member),
            _ => None,
        }
    }
}

/// Workflow status of a task
///
/// `in-progress` is accepted as a legacy spelling of `doing`; both map to
/// [`TaskStatus::Doing`] and are written back as `doing`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    #[serde(alias = "in-progress", alias = "in_progress")]
    Doing,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "todo" => Some(TaskStatus::Todo),
            "doing" | "in-progress" | "in_progress" => Some(TaskStatus::Doing),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

/// Public view of a user (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A user's membership in a board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    pub user: UserSummary,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

/// Top-level workspace owning lists and members
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Owner of the board
    pub created_by: Uuid,
    #[serde(default)]
    pub members: Vec<BoardMember>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Whether the user owns or has been invited to this board
    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.created_by == user_id || self.members.iter().any(|m| m.user.id == user_id)
    }
}

/// An ordered column of tasks within a board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub id: Uuid,
    pub board: Uuid,
    pub title: String,
    pub position: i64,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment left on a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub user: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// File reference attached to a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: Uuid,
    pub filename: String,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

/// A unit of work belonging to exactly one list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub list: Uuid,
    /// Denormalized parent board of `list`
    pub board: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    pub position: i64,
    #[serde(default)]
    pub assigned_to: Vec<UserSummary>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Orderable for Task {
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

/// A list together with its tasks, ordered by position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListWithTasks {
    #[serde(flatten)]
    pub list: TaskList,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Full board state as rendered by the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardView {
    pub board: Board,
    pub lists: Vec<ListWithTasks>,
}

impl BoardView {
    /// All tasks of the board, flattened across lists
    pub fn tasks(&self) -> Vec<Task> {
        self.lists.iter().flat_map(|l| l.tasks.iter().cloned()).collect()
    }

    /// Rebuild the per-list task vectors from a flat task snapshot
    ///
    /// Tasks are grouped by their `list` reference and sorted by position.
    /// Tasks pointing at a list this board does not contain are dropped.
    pub fn with_tasks(&self, tasks: &[Task]) -> BoardView {
        let lists = self
            .lists
            .iter()
            .map(|l| {
                let mut list_tasks: Vec<Task> = tasks
                    .iter()
                    .filter(|t| t.list == l.list.id)
                    .cloned()
                    .collect();
                list_tasks.sort_by_key(|t| t.position);
                ListWithTasks {
                    list: l.list.clone(),
                    tasks: list_tasks,
                }
            })
            .collect();

        BoardView {
            board: self.board.clone(),
            lists,
        }
    }
}
