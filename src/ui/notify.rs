// src/ui/notify.rs

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Success,
    Warning,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Error => "❌",
            NotificationKind::Success => "✅",
            NotificationKind::Warning => "⚠️",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Error => write!(f, "error"),
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Notifications currently on screen, newest first.
///
/// New entries go in right after the anchor, so they sit in front of older
/// ones. Each entry leaves on its own once its TTL has passed.
#[derive(Debug)]
pub struct Notifications {
    ttl: Duration,
    next_id: u64,
    active: VecDeque<Notification>,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: 1,
            active: VecDeque::new(),
        }
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> &Notification {
        let notification = Notification {
            id: self.next_id,
            kind,
            message: message.into(),
            expires_at: Instant::now() + self.ttl,
        };
        self.next_id += 1;
        self.active.push_front(notification);
        &self.active[0]
    }

    /// Removes everything, returning the removed ids.
    pub fn clear(&mut self) -> Vec<u64> {
        self.active.drain(..).map(|n| n.id).collect()
    }

    /// Removes entries whose TTL has run out by `now`.
    pub fn expire(&mut self, now: Instant) -> Vec<u64> {
        let mut removed = Vec::new();
        self.active.retain(|n| {
            let alive = n.expires_at > now;
            if !alive {
                removed.push(n.id);
            }
            alive
        });
        removed
    }

    pub fn next_expiry(&self) -> Option<Instant> {
        self.active.iter().map(|n| n.expires_at).min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let mut notes = Notifications::new(Duration::from_secs(5));
        notes.push(NotificationKind::Warning, "first");

        tokio::time::advance(Duration::from_secs(3)).await;
        notes.push(NotificationKind::Success, "second");
        assert!(notes.expire(Instant::now()).is_empty());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(notes.expire(Instant::now()), vec![1]);
        assert_eq!(notes.len(), 1);

        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(notes.expire(Instant::now()), vec![2]);
        assert!(notes.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn newest_sits_first_and_clear_removes_all() {
        let mut notes = Notifications::new(Duration::from_secs(5));
        notes.push(NotificationKind::Error, "a");
        notes.push(NotificationKind::Error, "b");

        let messages: Vec<&str> = notes.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, ["b", "a"]);
        assert_eq!(notes.next_expiry(), Some(Instant::now() + Duration::from_secs(5)));

        assert_eq!(notes.clear(), vec![2, 1]);
        assert_eq!(notes.next_expiry(), None);
    }
}
