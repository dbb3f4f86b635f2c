//! Screen composition and change detection for the active mode.
use log::trace;
use std::fmt::Write as _;

use crate::context::SimContext;
use crate::mode::ModeManager;

pub const NO_MODE_TEXT: &str = "[NO GAME MODE ATTACHED]";
pub const DEFAULT_MODE_TEXT: &str = "[DEFAULT GAME MODE TEXT USER INTERFACE]";
pub const PROMPT: &str = "What is your choice? ";

type ScreenListener = Box<dyn FnMut(&str)>;

/// Holds the last published screen and notifies listeners when it changes.
#[derive(Default)]
pub struct Renderer {
    screen: String,
    listeners: Vec<ScreenListener>,
}

impl Renderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_screen_changed(&mut self, listener: impl FnMut(&str) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    #[must_use]
    pub fn screen(&self) -> &str {
        &self.screen
    }

    /// Publish `text` if it differs from the current screen ignoring ASCII case.
    /// Returns whether listeners were notified.
    pub fn present(&mut self, text: String) -> bool {
        if self.screen.eq_ignore_ascii_case(&text) {
            trace!("screen unchanged");
            return false;
        }
        self.screen = text;
        for listener in &mut self.listeners {
            listener(&self.screen);
        }
        true
    }

    pub fn clear(&mut self) {
        self.screen.clear();
        self.listeners.clear();
    }
}

/// Status line, active mode text and prompt for the current frame.
#[must_use]
pub fn compose(manager: &ModeManager, sim: &SimContext) -> String {
    let mut out = String::new();
    let Some(mode) = manager.active_mode() else {
        out.push_str(NO_MODE_TEXT);
        out.push('\n');
        return out;
    };
    let state = mode
        .current_state()
        .map_or_else(|| "NO STATE".to_string(), |state| state.id.to_string());
    let _ = writeln!(
        out,
        "Mode({}): {}({state}) - Turns: {:04}",
        manager.mode_count(),
        mode.category(),
        sim.total_turns
    );
    let body = mode.render(sim);
    if body.trim().is_empty() {
        out.push_str(DEFAULT_MODE_TEXT);
        out.push('\n');
    } else {
        out.push_str(&body);
        if !body.ends_with('\n') {
            out.push('\n');
        }
    }
    if manager.accepting_input() {
        out.push_str(PROMPT);
    }
    out
}
