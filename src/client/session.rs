//! # Drag-and-Drop Session
//!
//! Client-side state of one open board and the drop workflow:
//!
//! 1. compute the new ordering from the current snapshot
//! 2. render it immediately (optimistic view)
//! 3. submit the batch to the server
//! 4. re-fetch the board whatever the outcome
//!
//! A failed submit throws the optimistic view away and leaves a
//! user-facing notice. The stored board is always the source of truth
//! after step 4.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskboard::client::{BoardClient, BoardSession};
//! use taskboard::shared::DragDrop;
//! # async fn example(board: uuid::Uuid, task: uuid::Uuid, list: uuid::Uuid) -> Result<(), taskboard::client::ClientError> {
//! let mut client = BoardClient::connect("http://127.0.0.1:5000")?;
//! client.login("ada@example.com", "secret").await?;
//!
//! let mut session = BoardSession::open(client, board).await?;
//! session.drop_task(&DragDrop::new(task, list)).await?;
//! # Ok(())
//! # }
//! ```

use uuid::Uuid;

use crate::client::api::BoardClient;
use crate::client::error::ClientError;
use crate::shared::board::BoardView;
use crate::shared::ordering::{compute_reorder, DragDrop, TaskMove};

/// A computed move that has been rendered but not yet confirmed
#[derive(Debug, Clone)]
pub struct PendingMove {
    /// Snapshot from before the drop
    previous: BoardView,
    /// Entries to submit
    pub batch: Vec<TaskMove>,
}

/// One open board
#[derive(Debug)]
pub struct BoardSession {
    client: BoardClient,
    board_id: Uuid,
    view: BoardView,
    notice: Option<String>,
}

impl BoardSession {
    /// Fetch `board_id` and start a session on it
    pub async fn open(client: BoardClient, board_id: Uuid) -> Result<Self, ClientError> {
        let view = client.board(board_id).await?;
        Ok(Self {
            client,
            board_id,
            view,
            notice: None,
        })
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn client(&self) -> &BoardClient {
        &self.client
    }

    /// Last error message to show the user, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Replace the view with the server's current board
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.view = self.client.board(self.board_id).await?;
        Ok(())
    }

    /// Compute a drop and render it optimistically
    ///
    /// Nothing is sent. A drag that cannot be resolved leaves the view
    /// untouched and sets the notice.
    pub fn begin_drop(&mut self, drop: &DragDrop) -> Result<PendingMove, ClientError> {
        let reorder = match compute_reorder(&self.view.tasks(), drop) {
            Ok(reorder) => reorder,
            Err(e) => {
                tracing::debug!("Drop rejected locally: {}", e);
                self.notice = Some(e.to_string());
                return Err(e.into());
            }
        };

        let optimistic = self.view.with_tasks(&reorder.tasks);
        let previous = std::mem::replace(&mut self.view, optimistic);
        Ok(PendingMove {
            previous,
            batch: reorder.batch,
        })
    }

    /// Submit a pending move and converge on the stored board
    ///
    /// On failure the optimistic view is discarded before re-fetching, and
    /// the submit error is returned even when the re-fetch succeeds. Every
    /// error path leaves a notice.
    pub async fn commit(&mut self, pending: PendingMove) -> Result<(), ClientError> {
        match self.client.move_tasks(&pending.batch).await {
            Ok(moved) => {
                tracing::debug!("Server accepted move of {} tasks", moved.len());
                self.notice = None;
                // The optimistic view stays, it matches what was stored
                if let Err(e) = self.refresh().await {
                    tracing::warn!("Re-fetch after accepted move failed: {}", e);
                    self.notice = Some(e.to_string());
                    return Err(e);
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Move rejected: {}", e);
                self.view = pending.previous;
                self.notice = Some(e.to_string());
                if let Err(refresh_err) = self.refresh().await {
                    tracing::warn!("Re-fetch after failed move failed: {}", refresh_err);
                }
                Err(e)
            }
        }
    }

    /// Full drop workflow: compute, render, submit, re-fetch
    pub async fn drop_task(&mut self, drop: &DragDrop) -> Result<(), ClientError> {
        let pending = self.begin_drop(drop)?;
        self.commit(pending).await
    }
}
