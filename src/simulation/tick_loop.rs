use bevy::prelude::Resource;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::registry::CardId;

/// Shared "stop running" switch. Checked at the top of each frame, never
/// interrupts one.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One run of the frame loop. Captures the focused card by value: when
/// focus changes the task is replaced, not updated.
#[derive(Debug, Clone)]
pub struct TickTask {
    stop: StopFlag,
    focused: Option<CardId>,
    generation: u64,
}

impl TickTask {
    pub fn focused(&self) -> Option<CardId> {
        self.focused
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owner of the current frame task
#[derive(Resource, Debug)]
pub struct TickLoop {
    task: TickTask,
}

impl Default for TickLoop {
    fn default() -> Self {
        Self::start(None)
    }
}

impl TickLoop {
    pub fn start(focused: Option<CardId>) -> Self {
        TickLoop {
            task: TickTask {
                stop: StopFlag::new(),
                focused,
                generation: 0,
            },
        }
    }

    pub fn task(&self) -> &TickTask {
        &self.task
    }

    /// Does the running task skip a different card than `focused`?
    pub fn needs_restart(&self, focused: Option<CardId>) -> bool {
        self.task.focused != focused
    }

    /// Stop the current task and replace it with one that skips `focused`
    pub fn restart(&mut self, focused: Option<CardId>) -> &TickTask {
        self.task.stop.stop();
        self.task = TickTask {
            stop: StopFlag::new(),
            focused,
            generation: self.task.generation + 1,
        };
        &self.task
    }

    /// Teardown: no further frames run
    pub fn stop(&mut self) {
        self.task.stop.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_loop_runs() {
        let tick_loop = TickLoop::default();
        assert!(!tick_loop.task().is_stopped());
        assert_eq!(tick_loop.task().focused(), None);
        assert_eq!(tick_loop.task().generation(), 0);
    }

    #[test]
    fn test_restart_stops_previous_task() {
        let mut tick_loop = TickLoop::default();
        let old = tick_loop.task().clone();

        assert!(tick_loop.needs_restart(Some(CardId(2))));
        let new = tick_loop.restart(Some(CardId(2))).clone();

        assert!(old.is_stopped());
        assert!(!new.is_stopped());
        assert_eq!(new.focused(), Some(CardId(2)));
        assert_eq!(new.generation(), 1);
        assert!(!tick_loop.needs_restart(Some(CardId(2))));
    }

    #[test]
    fn test_captured_focus_does_not_follow_later_changes() {
        let mut tick_loop = TickLoop::start(Some(CardId(1)));
        let captured = tick_loop.task().clone();

        tick_loop.restart(None);
        assert_eq!(captured.focused(), Some(CardId(1)));
        assert!(captured.is_stopped());
    }

    #[test]
    fn test_stop_at_teardown() {
        let mut tick_loop = TickLoop::default();
        let running = tick_loop.task().clone();

        tick_loop.stop();
        assert!(running.is_stopped());
        assert!(tick_loop.task().is_stopped());
    }
}
