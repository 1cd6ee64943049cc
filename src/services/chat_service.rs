use crate::models::Turn;

/// Number of trailing turns sent upstream with each completion request
/// (5 user/assistant pairs).
pub const HISTORY_WINDOW: usize = 10;

/// Greeting the assistant opens every session with.
pub const GREETING: &str = "你好！我是AI助手，很高兴为您服务。有什么我可以帮助您的吗？";

/// In-memory conversation for one UI session. Turns are append-only and
/// nothing survives a restart. At most one completion is in flight at a
/// time, tracked by `pending`.
pub struct ChatSession {
    turns: Vec<Turn>,
    pending: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            turns: vec![Turn::assistant(GREETING)],
            pending: false,
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The last `max_turns` turns in original order; all of them if fewer
    /// exist.
    pub fn recent_context(&self, max_turns: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(max_turns);
        &self.turns[start..]
    }

    /// Accept a draft message and start an exchange.
    ///
    /// Blank or whitespace-only drafts are a no-op (`Ok(None)`): the
    /// conversation is untouched and no request should be made. A draft
    /// submitted while a reply is still pending is rejected. Otherwise the
    /// bounded context is captured, the user turn is appended and the
    /// session enters the pending state until `finish_exchange`.
    ///
    /// The returned context is taken before the new user turn so the draft
    /// appears exactly once in the outbound request.
    pub fn begin_exchange(&mut self, draft: &str) -> Result<Option<Vec<Turn>>, String> {
        let text = draft.trim();
        if text.is_empty() {
            return Ok(None);
        }
        if self.pending {
            return Err("A reply is still pending".to_string());
        }

        let context = self.recent_context(HISTORY_WINDOW).to_vec();
        self.turns.push(Turn::user(text));
        self.pending = true;
        Ok(Some(context))
    }

    /// Append the assistant turn for the pending exchange and return to
    /// idle. Called with either the model reply or the fallback text, so
    /// every accepted submission ends with exactly one assistant turn.
    pub fn finish_exchange(&mut self, reply: String) -> Turn {
        let turn = Turn::assistant(reply);
        self.turns.push(turn.clone());
        self.pending = false;
        turn
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
