//! Bounded live-stream comment log.
//!
//! Before each append the log keeps only its most recent `retain`
//! entries, so with the default of 20 it never holds more than 21
//! comments. Synthetic comments are drawn from fixed pools of usernames
//! and phrases; viewer comments always carry the name "You".

use serde::{Deserialize, Serialize};

use crate::constants::live::{COMMENT_RETAIN, PHRASES, SELF_USER, USERNAMES};
use crate::random::{pick, RandomSource};

/// One chat line under the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    /// Position in the session's comment stream, starting at 1.
    pub seq: u64,
    pub user: String,
    pub text: String,
    /// Simulation time in milliseconds.
    pub timestamp_ms: u64,
}

/// Insertion-ordered comments, oldest dropped first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentLog {
    retain: usize,
    comments: Vec<Comment>,
    next_id: u64,
}

impl CommentLog {
    /// `retain` is how many existing comments survive each append.
    pub fn new(retain: usize) -> Self {
        Self {
            retain,
            comments: Vec::new(),
            next_id: 1,
        }
    }

    /// Largest length the log can reach.
    pub fn capacity(&self) -> usize {
        self.retain + 1
    }

    /// Append a comment stamped at `now_ms` and return it.
    pub fn push(&mut self, user: &str, text: &str, now_ms: u64) -> &Comment {
        if self.comments.len() > self.retain {
            let excess = self.comments.len() - self.retain;
            self.comments.drain(..excess);
        }
        let seq = self.next_id;
        self.next_id += 1;
        self.comments.push(Comment {
            id: format!("c-{seq}"),
            seq,
            user: user.to_string(),
            text: text.to_string(),
            timestamp_ms: now_ms,
        });
        &self.comments[self.comments.len() - 1]
    }

    /// Append a random comment from the built-in pools.
    pub fn push_synthetic<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        now_ms: u64,
    ) -> &Comment {
        let user = *pick(rng, &USERNAMES);
        let text = *pick(rng, &PHRASES);
        self.push(user, text, now_ms)
    }

    /// Append a comment typed by the viewer. Blank text is ignored.
    pub fn push_own(&mut self, text: &str, now_ms: u64) -> Option<&Comment> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(self.push(SELF_USER, text, now_ms))
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Comments still held whose `seq` is greater than `seq`.
    pub fn since(&self, seq: u64) -> &[Comment] {
        let start = self.comments.partition_point(|c| c.seq <= seq);
        &self.comments[start..]
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

impl Default for CommentLog {
    fn default() -> Self {
        Self::new(COMMENT_RETAIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RngSource, ScriptedRandom};

    #[test]
    fn test_hundred_comments_keeps_last_21() {
        let mut log = CommentLog::default();
        for i in 0..100 {
            log.push("u", &format!("n{i}"), i);
        }
        assert_eq!(log.len(), 21);
        let texts: Vec<_> = log.comments().iter().map(|c| c.text.clone()).collect();
        let expected: Vec<_> = (79..100).map(|i| format!("n{i}")).collect();
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut log = CommentLog::new(5);
        let mut rng = RngSource::seeded(42);
        for t in 0..200 {
            if t % 3 == 0 {
                log.push_own("hi", t);
            } else {
                log.push_synthetic(&mut rng, t);
            }
            assert!(log.len() <= log.capacity());
        }
        assert_eq!(log.len(), 6);
    }

    #[test]
    fn test_synthetic_uses_pools() {
        let mut log = CommentLog::default();
        let mut rng = ScriptedRandom::new(vec![0.0, 0.99]);
        let c = log.push_synthetic(&mut rng, 3000);
        assert_eq!(c.user, "StarGazer42");
        assert_eq!(c.text, "The curvature is so clear!");
        assert_eq!(c.timestamp_ms, 3000);
    }

    #[test]
    fn test_own_comment() {
        let mut log = CommentLog::default();
        assert!(log.push_own("   ", 0).is_none());
        let c = log.push_own("  Hello!  ", 10).unwrap();
        assert_eq!(c.user, "You");
        assert_eq!(c.text, "Hello!");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_since_survives_trimming() {
        let mut log = CommentLog::new(2);
        for i in 0..3 {
            log.push("u", &format!("n{i}"), i);
        }
        let last_seen = log.comments().last().unwrap().seq;
        assert_eq!(last_seen, 3);
        assert!(log.since(last_seen).is_empty());

        // Five more pushes trim the last seen comment out of the log.
        for i in 3..8 {
            log.push("u", &format!("n{i}"), i);
        }
        assert!(log.comments().iter().all(|c| c.seq != last_seen));
        let fresh: Vec<_> = log.since(last_seen).iter().map(|c| c.seq).collect();
        assert_eq!(fresh, vec![6, 7, 8]);
        assert_eq!(log.since(0).len(), log.len());
    }
}
