//! Session bookkeeping: score, lives, and the running flag.
//!
//! Exhausting lives is the only terminal condition. It is surfaced through
//! `running`, never as an error: the world simply stops mutating gameplay
//! state until a full reset.

pub const STARTING_LIVES: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub score: u32,
    pub lives: i32,
    pub running: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            running: true,
        }
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// Take a life. Returns true when the session continues (the caller
    /// respawns the character) and false when it just ended.
    pub fn lose_life(&mut self) -> bool {
        self.lives -= 1;
        if self.lives <= 0 {
            self.running = false;
            false
        } else {
            true
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausting_lives_ends_the_session() {
        let mut session = SessionState::new();
        assert!(session.lose_life());
        assert!(session.lose_life());
        assert!(session.running);
        assert!(!session.lose_life());
        assert!(!session.running);
        assert_eq!(session.lives, 0);
    }

    #[test]
    fn reset_restores_everything() {
        let mut session = SessionState::new();
        session.add_score(130);
        while session.lose_life() {}
        session.reset();
        assert_eq!(session, SessionState::new());
    }
}
