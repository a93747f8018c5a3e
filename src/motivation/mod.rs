/// Motivational copy, with an optional generative-text collaborator
///
/// The engine commits all streak/achievement/notification state before any
/// text generation happens; generated copy is decoration. Any failure here
/// (missing generator, error, timeout, blank response) falls back to a
/// canned line synchronously and without retry, and is never surfaced as an
/// error.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Habit;

/// Canned fallback lines used whenever generation is unavailable
pub const FALLBACK_MOTIVATION: [&str; 5] = [
    "You are stronger than you think!",
    "Consistency is key. Keep going!",
    "Every step counts towards your goal.",
    "Small habits make big differences.",
    "Don't stop now, you're doing great!",
];

/// How long to wait for the generator before falling back
const GENERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from the text-generation collaborator
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("text generation unavailable: {0}")]
    Unavailable(String),

    #[error("text generation timed out")]
    Timeout,
}

/// The outbound text-generation seam
///
/// Implementations may call a remote service; the engine itself ships none
/// and treats the collaborator as optional.
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// What occasion the message is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageContext {
    /// A reminder that the habit is still due today
    Reminder,
    /// A streak celebration for the given streak length
    Streak(u32),
    /// A plain completion acknowledgement
    Completion,
}

/// Produces motivational copy, preferring the generator when one is wired in
pub struct Motivator {
    generator: Option<Box<dyn MessageGenerator>>,
    next_fallback: AtomicUsize,
}

impl Motivator {
    pub fn new(generator: Option<Box<dyn MessageGenerator>>) -> Self {
        Self {
            generator,
            next_fallback: AtomicUsize::new(0),
        }
    }

    /// A motivator with no generator wired in; always uses canned lines
    pub fn canned() -> Self {
        Self::new(None)
    }

    /// Produce a message for the given habit and occasion
    ///
    /// Never fails: every generation problem degrades to a canned line.
    pub async fn message_for(&self, habit: &Habit, context: MessageContext) -> String {
        let Some(generator) = &self.generator else {
            return self.fallback();
        };

        let prompt = build_prompt(habit, context);
        match tokio::time::timeout(GENERATION_TIMEOUT, generator.generate(&prompt)).await {
            Ok(Ok(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    "Keep pushing forward!".to_string()
                } else {
                    trimmed.to_string()
                }
            }
            Ok(Err(err)) => {
                tracing::warn!("Text generation failed, using fallback: {}", err);
                self.fallback()
            }
            Err(_) => {
                tracing::warn!("Text generation timed out, using fallback");
                self.fallback()
            }
        }
    }

    /// Rotate through the canned lines
    fn fallback(&self) -> String {
        let index = self.next_fallback.fetch_add(1, Ordering::Relaxed);
        FALLBACK_MOTIVATION[index % FALLBACK_MOTIVATION.len()].to_string()
    }
}

fn build_prompt(habit: &Habit, context: MessageContext) -> String {
    match context {
        MessageContext::Reminder => format!(
            "Generate a short, punchy, motivational push notification message \
             (max 15 words) for a user who needs to do their habit: \"{}\". \
             The habit description is \"{}\". Make it urgent but encouraging.",
            habit.title,
            habit.description.as_deref().unwrap_or("")
        ),
        MessageContext::Streak(streak) => format!(
            "Generate a short, celebratory message (max 15 words) for a user \
             who just reached a {}-day streak on their habit: \"{}\". Use emojis.",
            streak, habit.title
        ),
        MessageContext::Completion => format!(
            "Generate a short, rewarding message (max 15 words) for completing \
             the task \"{}\".",
            habit.title
        ),
    }
}
