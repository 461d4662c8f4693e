//! Conversation log and reply bookkeeping for the assistant chat.
//!
//! The log is append-only and starts with a single assistant greeting.
//! Sending is split in two halves so a scheduler can sit between them:
//! [`ChatExchange::submit`] records the user message and hands out a
//! [`ReplyTicket`], and [`ChatExchange::deliver`] later appends the answer
//! for that ticket.
//!
//! ```
//! use spacescope_logic::conversation::{ChatExchange, ReplyOrdering, Role};
//!
//! let mut chat = ChatExchange::new(ReplyOrdering::Unordered);
//! assert!(chat.submit("   ").is_none());
//!
//! let ticket = chat.submit("Tell me about Mars").unwrap();
//! assert!(chat.is_typing());
//! chat.deliver(&ticket);
//! assert!(!chat.is_typing());
//!
//! let last = chat.log().last().unwrap();
//! assert_eq!(last.role, Role::Assistant);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::chat::{GREETING, GREETING_ID};
use crate::intent::{IntentMatcher, Topic};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique within its log.
    pub id: String,
    pub role: Role,
    pub content: String,
}

/// Append-only, chronologically ordered list of messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationLog {
    messages: Vec<Message>,
    next_id: u64,
}

impl ConversationLog {
    /// New log holding only the assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![greeting()],
            next_id: 1,
        }
    }

    /// Append a message and return it.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> &Message {
        let id = format!("msg-{}", self.next_id);
        self.next_id += 1;
        self.messages.push(Message {
            id,
            role,
            content: content.into(),
        });
        &self.messages[self.messages.len() - 1]
    }

    /// Drop everything except the greeting. Ids keep increasing.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(greeting());
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}

fn greeting() -> Message {
    Message {
        id: GREETING_ID.to_string(),
        role: Role::Assistant,
        content: GREETING.to_string(),
    }
}

/// How replies that land out of order are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyOrdering {
    /// Every reply is appended when it lands, in whatever order.
    #[default]
    Unordered,
    /// Only the reply to the most recent message is appended.
    LatestOnly,
}

/// A pending reply handed out by [`ChatExchange::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyTicket {
    /// Monotonically increasing per exchange.
    pub seq: u64,
    /// Id of the user message being answered.
    pub message_id: String,
    pub topic: Topic,
}

/// Where the exchange is in the send cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatPhase {
    Idle,
    /// At least one reply is pending and the typing indicator is on.
    Responding,
}

/// Outcome of delivering a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Appended,
    /// Dropped because a newer message was sent (`LatestOnly`).
    Stale,
    /// The ticket was already delivered or never issued.
    Unknown,
}

/// Conversation log plus the in-flight reply state.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    log: ConversationLog,
    matcher: IntentMatcher,
    ordering: ReplyOrdering,
    pending: Vec<ReplyTicket>,
    latest_seq: u64,
    typing: bool,
}

impl ChatExchange {
    pub fn new(ordering: ReplyOrdering) -> Self {
        Self::with_matcher(IntentMatcher::default(), ordering)
    }

    pub fn with_matcher(matcher: IntentMatcher, ordering: ReplyOrdering) -> Self {
        Self {
            log: ConversationLog::new(),
            matcher,
            ordering,
            pending: Vec::new(),
            latest_seq: 0,
            typing: false,
        }
    }

    /// Record a user message and issue a ticket for its reply.
    ///
    /// Blank input is ignored and returns `None`. Accepted text is trimmed.
    /// The topic is resolved now; the matcher is pure so this is the same
    /// answer the reply would get later.
    pub fn submit(&mut self, input: &str) -> Option<ReplyTicket> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        let topic = self.matcher.classify(text);
        let message_id = self.log.append(Role::User, text).id.clone();
        self.latest_seq += 1;
        let ticket = ReplyTicket {
            seq: self.latest_seq,
            message_id,
            topic,
        };
        self.pending.push(ticket.clone());
        self.typing = true;
        log::debug!("chat: queued reply #{} ({:?})", ticket.seq, topic);
        Some(ticket)
    }

    /// Append the reply for `ticket`.
    ///
    /// The typing indicator goes off whenever a reply lands, even if other
    /// replies are still pending.
    pub fn deliver(&mut self, ticket: &ReplyTicket) -> Delivery {
        let Some(pos) = self.pending.iter().position(|t| t.seq == ticket.seq) else {
            return Delivery::Unknown;
        };
        self.pending.remove(pos);
        self.typing = false;

        if self.ordering == ReplyOrdering::LatestOnly && ticket.seq != self.latest_seq {
            log::debug!("chat: dropped stale reply #{}", ticket.seq);
            return Delivery::Stale;
        }
        self.log.append(Role::Assistant, ticket.topic.response());
        Delivery::Appended
    }

    /// Forget pending replies and clear the log back to the greeting.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.typing = false;
        self.log.reset();
    }

    pub fn phase(&self) -> ChatPhase {
        if self.typing {
            ChatPhase::Responding
        } else {
            ChatPhase::Idle
        }
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn pending(&self) -> &[ReplyTicket] {
        &self.pending
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }
}

impl Default for ChatExchange {
    fn default() -> Self {
        Self::new(ReplyOrdering::default())
    }
}
