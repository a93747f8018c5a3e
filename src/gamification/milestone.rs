/// Milestone detection for streak celebrations
///
/// A fixed table of round-number streak lengths gets the full celebration;
/// every other positive multiple of three gets a lower-intensity one. The
/// two tiers stay distinguishable so callers can pick message styling.

/// Streak lengths that earn the full celebration
pub const MILESTONES: [u32; 7] = [7, 14, 21, 30, 50, 100, 365];

/// How loudly to celebrate a streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneTier {
    /// A round-number milestone from the fixed table
    Major,
    /// A positive multiple of three that is not a table milestone
    Minor,
}

/// Check whether a streak length is a round-number milestone
pub fn is_milestone(streak: u32) -> bool {
    MILESTONES.contains(&streak)
}

/// Classify a streak length into a celebration tier, if any
pub fn milestone_tier(streak: u32) -> Option<MilestoneTier> {
    if is_milestone(streak) {
        Some(MilestoneTier::Major)
    } else if streak > 0 && streak % 3 == 0 {
        Some(MilestoneTier::Minor)
    } else {
        None
    }
}
