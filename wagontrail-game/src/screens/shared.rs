//! States usable by any mode regardless of its payload.
use crate::context::SimContext;
use crate::mode::{State, StateCx, StateId, Transition};

pub(crate) const PRESS_ENTER: &str = "Press ENTER to continue";

/// Trail map with the party's position marked.
pub struct LookAtMap;

impl<D> State<D> for LookAtMap {
    fn id(&self) -> StateId {
        StateId::LookAtMap
    }

    fn render(&self, _data: &D, sim: &SimContext) -> String {
        format!("{}\n{PRESS_ENTER}\n", sim.trail.render_map())
    }

    fn on_input(&mut self, _input: &str, _cx: &mut StateCx<'_, D>) -> Transition {
        Transition::Clear
    }
}

pub fn look_at_map<D: 'static>(_: &D) -> Box<dyn State<D>> {
    Box::new(LookAtMap)
}

/// The current top ten list.
pub struct TopTenList;

impl<D> State<D> for TopTenList {
    fn id(&self) -> StateId {
        StateId::TopTen
    }

    fn render(&self, _data: &D, sim: &SimContext) -> String {
        format!("{}\n{PRESS_ENTER}\n", sim.top_ten.render())
    }

    fn on_input(&mut self, _input: &str, _cx: &mut StateCx<'_, D>) -> Transition {
        Transition::Clear
    }
}

pub fn top_ten<D: 'static>(_: &D) -> Box<dyn State<D>> {
    Box::new(TopTenList)
}

/// Parse a yes/no answer. Anything else is `None`.
#[must_use]
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_no_answers() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no(" no "), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }
}
