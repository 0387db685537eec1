//! Encounter phase ordering
//!
//! The phase counter is a tagged total order: lifecycle sentinels below and
//! above the mechanic ranks, mechanics in between. A mechanic may only fire
//! while the current rank is strictly below its own, which makes the
//! "already past" check a single integer comparison.

/// Current position within one encounter attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Initial sentinel before any lifecycle event has been seen.
    #[default]
    Ready,
    /// Inside the instance lobby after a join line.
    Lobby,
    /// Fight underway, no mechanic reached yet.
    Start,
    /// At the mechanic with this rank. Mechanic ranks start at 2.
    Mechanic(u8),
    /// Terminal sentinel after the kill-ended line.
    Dead,
}

impl Phase {
    /// Position in the total order.
    pub fn rank(self) -> i32 {
        match self {
            Phase::Ready => -1,
            Phase::Lobby => 0,
            Phase::Start => 1,
            Phase::Mechanic(rank) => i32::from(rank),
            Phase::Dead => i32::MAX,
        }
    }

    /// Whether a mechanic with `mechanic_rank` is still ahead of us.
    pub fn is_before(self, mechanic_rank: u8) -> bool {
        self.rank() < i32::from(mechanic_rank)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Dead)
    }
}
