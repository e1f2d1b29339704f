//! # Notifier
//!
//! Transient, stacking success/failure notices.
//!
//! A notice is never replaced by a later one: a fetch failure and a mutation success that
//! land in quick succession are both visible until each one's time-to-live runs out.
//! The board is cheap to clone and shared by every controller of a console.
//!
//! Every notice is also emitted as a `tracing` event, so headless runs still see them.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Default lifetime of a notice.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: Level,
    pub message: String,
    pub created_at: Instant,
}

#[derive(Debug, Default)]
struct Board {
    next_id: u64,
    notices: VecDeque<Notice>,
}

impl Board {
    fn prune(&mut self, now: Instant, ttl: Duration) {
        self.notices
            .retain(|notice| now.saturating_duration_since(notice.created_at) < ttl);
    }
}

/// Shared notice board with auto-dismiss.
#[derive(Debug, Clone)]
pub struct Notifier {
    board: Arc<Mutex<Board>>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            board: Arc::new(Mutex::new(Board::default())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        let message = message.into();
        info!(notice = %message, "Success");
        self.push(Level::Success, message)
    }

    pub fn failure(&self, message: impl Into<String>) -> u64 {
        let message = message.into();
        warn!(notice = %message, "Failure");
        self.push(Level::Failure, message)
    }

    /// Notices still visible now, oldest first.
    pub fn visible(&self) -> Vec<Notice> {
        self.visible_at(Instant::now())
    }

    /// Notices visible at `now`. Expired notices are dropped from the board.
    pub fn visible_at(&self, now: Instant) -> Vec<Notice> {
        let mut board = self.lock();
        board.prune(now, self.ttl);
        board.notices.iter().cloned().collect()
    }

    /// Dismiss a notice before it expires.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut board = self.lock();
        let before = board.notices.len();
        board.notices.retain(|notice| notice.id != id);
        board.notices.len() != before
    }

    fn push(&self, level: Level, message: String) -> u64 {
        let now = Instant::now();
        let mut board = self.lock();
        board.prune(now, self.ttl);
        board.next_id += 1;
        let id = board.next_id;
        board.notices.push_back(Notice {
            id,
            level,
            message,
            created_at: now,
        });
        id
    }

    fn lock(&self) -> MutexGuard<'_, Board> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
