/// Gamification module: milestones and achievements
///
/// Milestones flag noteworthy streak lengths for celebratory messages;
/// achievements are one-time-unlockable badges evaluated against a fixed
/// rule table.

pub mod achievement;
pub mod milestone;

pub use achievement::*;
pub use milestone::*;
