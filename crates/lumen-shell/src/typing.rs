//! Tick-driven typewriter animation.
//!
//! A typed line lands on the surface with its full text immediately; the
//! animation only governs how much of it the renderer reveals. The
//! frontend advances the reveal cursor one character per tick.
//! Cancellation is best-effort: the flag is checked before the next tick,
//! so one already-queued tick may still land, after which the full text
//! is committed at once.

use crate::output::OutputSurface;

/// Reveal state for one typed line.
#[derive(Debug, Clone)]
pub struct TypingAnimation {
    node: u64,
    total: usize,
    revealed: usize,
    cancelled: bool,
}

impl TypingAnimation {
    fn new(node: u64, total: usize) -> Self {
        Self {
            node,
            total,
            revealed: 0,
            cancelled: false,
        }
    }

    /// Request cancellation; the next tick commits the remaining text.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_done(&self) -> bool {
        self.cancelled || self.revealed >= self.total
    }

    /// Advance one character. Returns true when the animation finished.
    pub fn tick(&mut self) -> bool {
        if self.cancelled {
            self.revealed = self.total;
            return true;
        }
        if self.revealed < self.total {
            self.revealed += 1;
        }
        self.revealed >= self.total
    }
}

/// The session's single typing-animation slot.
///
/// Starting a new animation overwrites the previous cancellation hook;
/// there is never more than one cancellable animation.
#[derive(Debug, Default)]
pub struct TypingState {
    in_progress: bool,
    current: Option<TypingAnimation>,
}

impl TypingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Whether a reveal is still running (regardless of the hook state).
    pub fn is_animating(&self) -> bool {
        self.current.is_some()
    }

    /// Push a typed line onto the surface and start revealing it.
    pub fn start(&mut self, surface: &mut OutputSurface, text: &str) {
        let id = surface.echo_typed(text);
        self.current = Some(TypingAnimation::new(id, text.chars().count()));
        self.in_progress = true;
    }

    /// Cancel the current animation, if the hook is still armed.
    pub fn cancel(&mut self) {
        if self.in_progress
            && let Some(animation) = &mut self.current
        {
            animation.cancel();
        }
        self.in_progress = false;
    }

    /// End-of-dispatch cleanup: not-in-progress, hook cleared. A reveal
    /// that is still running finishes cosmetically but can no longer be
    /// cancelled.
    pub fn settle(&mut self) {
        self.in_progress = false;
        if self.current.as_ref().is_some_and(TypingAnimation::is_done) {
            self.current = None;
        }
    }

    /// Advance the animation one character. Returns true when a tick was
    /// consumed (the frontend uses this to keep its tick timer alive).
    pub fn tick(&mut self) -> bool {
        let Some(animation) = &mut self.current else {
            return false;
        };
        if animation.tick() {
            self.current = None;
            self.in_progress = false;
        }
        true
    }

    /// How many characters of the typed node `id` to show, or `None` to
    /// show the full text.
    pub fn revealed_for(&self, id: u64) -> Option<usize> {
        match &self.current {
            Some(animation) if animation.node == id && !animation.is_done() => {
                Some(animation.revealed)
            },
            _ => None,
        }
    }
}
