use std::time::Duration;

pub const ROTATION_INTERVAL: Duration = Duration::from_millis(2000);

pub const DEFAULT_MESSAGES: [&str; 12] = [
    "🤖 AI is thinking...",
    "🍳 Cooking magic...",
    "🚀 Almost there...",
    "🔢 Crunching numbers...",
    "☕ Brewing insights...",
    "💪 Working hard...",
    "✨ Making magic happen...",
    "🧠 Processing brilliance...",
    "🔧 Assembling wisdom...",
    "⚡ Supercharging...",
    "🎨 Crafting perfection...",
    "🌟 Polishing results...",
];

/// Status text shown while an upload is in flight; cycles through its
/// messages and wraps around.
#[derive(Clone, Debug)]
pub struct StatusRotator {
    messages: Vec<String>,
    index: usize,
}

impl Default for StatusRotator {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl StatusRotator {
    pub fn new(messages: Vec<String>) -> Self {
        let messages = if messages.is_empty() {
            DEFAULT_MESSAGES.iter().map(|m| m.to_string()).collect()
        } else {
            messages
        };
        Self { messages, index: 0 }
    }

    pub fn current(&self) -> &str {
        &self.messages[self.index]
    }

    pub fn advance(&mut self) -> &str {
        self.index = (self.index + 1) % self.messages.len();
        self.current()
    }
}
