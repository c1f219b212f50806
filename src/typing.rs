use std::{cell::RefCell, rc::Rc};

use crate::{
    dom::ElementHandle,
    timer::{CancelToken, Scheduler},
};

pub const ROLE_SELECTOR: &str = ".title-role";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTimings {
    pub type_interval_ms: u32,
    pub delete_interval_ms: u32,
    /// Pause once a role is fully typed.
    pub hold_ms: u32,
    /// Pause once a role is fully deleted, before the next one starts.
    pub next_role_delay_ms: u32,
    pub start_delay_ms: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Typing,
    Deleting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub delay_ms: u32,
}

/// Cursor into the role list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypingState {
    pub role_index: usize,
    pub char_index: usize,
    pub phase: Phase,
}

impl TypingState {
    /// Moves one character forward or back and returns what to display plus
    /// how long to wait before the next step. `None` for an empty role list.
    pub fn advance(&mut self, roles: &[String], timings: &TypingTimings) -> Option<Frame> {
        if roles.is_empty() {
            return None;
        }

        let role = &roles[self.role_index % roles.len()];
        let length = role.chars().count();

        let mut delay_ms = match self.phase {
            Phase::Typing => {
                self.char_index = (self.char_index + 1).min(length);
                timings.type_interval_ms
            }
            Phase::Deleting => {
                self.char_index = self.char_index.saturating_sub(1);
                timings.delete_interval_ms
            }
        };
        let text = role.chars().take(self.char_index).collect();

        if self.phase == Phase::Typing && self.char_index == length {
            self.phase = Phase::Deleting;
            delay_ms = timings.hold_ms;
        } else if self.phase == Phase::Deleting && self.char_index == 0 {
            self.phase = Phase::Typing;
            self.role_index = (self.role_index + 1) % roles.len();
            delay_ms = timings.next_role_delay_ms;
        }

        Some(Frame { text, delay_ms })
    }
}

struct TypingLoop<E, S> {
    target: E,
    roles: Vec<String>,
    timings: TypingTimings,
    state: RefCell<TypingState>,
    scheduler: S,
    cancel: CancelToken,
}

impl<E: ElementHandle, S: Scheduler> TypingLoop<E, S> {
    fn tick(self: Rc<Self>) {
        if self.cancel.is_cancelled() {
            return;
        }

        let Some(frame) = self.state.borrow_mut().advance(&self.roles, &self.timings) else {
            return;
        };
        self.target.set_text(&frame.text);

        let next = Rc::clone(&self);
        self.scheduler
            .schedule(frame.delay_ms, Box::new(move || next.tick()));
    }
}

/// Starts cycling `roles` into `target`. The loop never ends on its own;
/// the returned token stops it. Returns `None` when there is no target or
/// nothing to type.
pub fn start<E: ElementHandle, S: Scheduler>(
    target: Option<E>,
    roles: &[String],
    timings: TypingTimings,
    scheduler: S,
) -> Option<CancelToken> {
    let target = target?;
    let roles = roles
        .iter()
        .filter(|role| !role.is_empty())
        .cloned()
        .collect::<Vec<_>>();

    if roles.is_empty() {
        return None;
    }

    let cancel = CancelToken::new();
    let typing = Rc::new(TypingLoop {
        target,
        roles,
        timings,
        state: RefCell::new(TypingState::default()),
        scheduler: scheduler.clone(),
        cancel: cancel.clone(),
    });

    scheduler.schedule(timings.start_delay_ms, Box::new(move || typing.tick()));
    Some(cancel)
}
