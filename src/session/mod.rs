// Conversation session state
//
// Holds the turn log for the process-wide conversation and performs one
// provider round trip per user turn.

pub mod conversation;
pub mod history;

pub use conversation::{ConversationSession, SessionState};
pub use history::{encode_history, ConversationLog, HistoryOrder, Turn};
