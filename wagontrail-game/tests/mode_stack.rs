use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wagontrail_game::{
    Mode, ModeCategory, ModeError, ModeFactory, ModeManager, ModeResult, SimConfig, SimContext,
    StateId, StateInfo,
};

thread_local! {
    static TICKS: RefCell<HashMap<ModeCategory, u32>> = RefCell::new(HashMap::new());
}

fn ticks(category: ModeCategory) -> u32 {
    TICKS.with(|ticks| ticks.borrow().get(&category).copied().unwrap_or(0))
}

/// Scriptable mode: input words toggle its flags.
struct Probe {
    category: ModeCategory,
    accepts: bool,
    state: Option<StateInfo>,
    remove: bool,
    broken: bool,
}

impl Probe {
    fn boxed(category: ModeCategory) -> Box<dyn Mode> {
        Box::new(Self {
            category,
            accepts: true,
            state: None,
            remove: false,
            broken: false,
        })
    }

    /// Fails while being attached, like a screen entering an unregistered state.
    fn broken(category: ModeCategory) -> Box<dyn Mode> {
        Box::new(Self {
            category,
            accepts: true,
            state: None,
            remove: false,
            broken: true,
        })
    }
}

impl Mode for Probe {
    fn category(&self) -> ModeCategory {
        self.category
    }

    fn accepts_input(&self) -> bool {
        self.accepts
    }

    fn should_remove(&self) -> bool {
        self.remove
    }

    fn flag_for_removal(&mut self) {
        self.remove = true;
    }

    fn current_state(&self) -> Option<StateInfo> {
        self.state
    }

    fn on_post_create(&mut self, _sim: &mut SimContext) -> ModeResult<()> {
        if self.broken {
            return Err(ModeError::UnknownStateType(StateId::Drive));
        }
        Ok(())
    }

    fn tick(&mut self, _sim: &mut SimContext) -> ModeResult<()> {
        TICKS.with(|ticks| *ticks.borrow_mut().entry(self.category).or_insert(0) += 1);
        Ok(())
    }

    fn render(&self, _sim: &SimContext) -> String {
        format!("{} screen", self.category)
    }

    fn on_input(&mut self, input: &str, _sim: &mut SimContext) -> ModeResult<()> {
        match input {
            "remove" => self.remove = true,
            "refuse" => self.accepts = false,
            "busy" => {
                self.state = Some(StateInfo {
                    id: StateId::Crossing,
                    accepts_input: false,
                });
            }
            "idle" => {
                self.state = Some(StateInfo {
                    id: StateId::CrossingResult,
                    accepts_input: true,
                });
            }
            _ => {}
        }
        Ok(())
    }
}

fn setup() -> (ModeManager, SimContext, Rc<RefCell<Vec<ModeCategory>>>) {
    let factory = ModeFactory::new()
        .register(ModeCategory::Travel, |_| Probe::boxed(ModeCategory::Travel))
        .register(ModeCategory::Store, |_| Probe::boxed(ModeCategory::Store))
        .register(ModeCategory::RandomEvent, |_| {
            Probe::boxed(ModeCategory::RandomEvent)
        })
        .register(ModeCategory::Trade, |_| Probe::broken(ModeCategory::Trade));
    let mut manager = ModeManager::new(factory);
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    manager.on_mode_changed(move |category| sink.borrow_mut().push(category));
    let sim = SimContext::new(SimConfig::default()).unwrap();
    (manager, sim, changes)
}

#[test]
fn duplicate_categories_are_ignored() {
    let (mut manager, mut sim, changes) = setup();
    manager.add_mode(ModeCategory::Travel, &mut sim).unwrap();
    manager.add_mode(ModeCategory::Travel, &mut sim).unwrap();
    assert_eq!(manager.mode_count(), 1);
    assert_eq!(manager.run_count(ModeCategory::Travel), 1);
    assert_eq!(*changes.borrow(), vec![ModeCategory::Travel]);
}

#[test]
fn newest_mode_is_active_and_removal_uncovers_the_one_below() {
    let (mut manager, mut sim, changes) = setup();
    manager.add_mode(ModeCategory::Travel, &mut sim).unwrap();
    manager.add_mode(ModeCategory::Store, &mut sim).unwrap();
    assert_eq!(manager.active_category(), Some(ModeCategory::Store));

    assert!(manager.send_input("remove", &mut sim).unwrap());
    manager.tick(&mut sim).unwrap();

    assert_eq!(manager.active_category(), Some(ModeCategory::Travel));
    assert_eq!(
        *changes.borrow(),
        vec![ModeCategory::Travel, ModeCategory::Store, ModeCategory::Travel]
    );
    assert_eq!(ticks(ModeCategory::Travel), 1);
    assert_eq!(ticks(ModeCategory::Store), 0);
}

#[test]
fn only_the_top_mode_is_ticked() {
    let (mut manager, mut sim, _) = setup();
    manager.add_mode(ModeCategory::Travel, &mut sim).unwrap();
    manager.add_mode(ModeCategory::Store, &mut sim).unwrap();
    for _ in 0..3 {
        manager.tick(&mut sim).unwrap();
    }
    assert_eq!(ticks(ModeCategory::Store), 3);
    assert_eq!(ticks(ModeCategory::Travel), 0);
}

#[test]
fn accepting_input_follows_mode_and_state_flags() {
    let (mut manager, mut sim, _) = setup();
    assert!(!manager.accepting_input());

    manager.add_mode(ModeCategory::Travel, &mut sim).unwrap();
    assert!(manager.accepting_input());

    manager.send_input("idle", &mut sim).unwrap();
    assert!(manager.accepting_input());

    manager.send_input("busy", &mut sim).unwrap();
    assert!(!manager.accepting_input());
    assert!(!manager.send_input("remove", &mut sim).unwrap());
    assert!(!manager.active_mode().unwrap().should_remove());

    manager.add_mode(ModeCategory::Store, &mut sim).unwrap();
    manager.send_input("idle", &mut sim).unwrap();
    assert!(manager.accepting_input());
    manager.send_input("refuse", &mut sim).unwrap();
    assert!(manager.active_mode().unwrap().current_state().unwrap().accepts_input);
    assert!(!manager.accepting_input());
}

#[test]
fn sweeping_an_empty_stack_is_an_error() {
    let (mut manager, mut sim, _) = setup();
    assert_eq!(
        manager.remove_dirty_modes(&mut sim),
        Err(ModeError::NoActiveMode)
    );
    manager.tick(&mut sim).unwrap();
}

#[test]
fn removed_categories_can_be_attached_again() {
    let (mut manager, mut sim, _) = setup();
    manager.add_mode(ModeCategory::Travel, &mut sim).unwrap();
    for _ in 0..2 {
        manager.add_mode(ModeCategory::RandomEvent, &mut sim).unwrap();
        manager.send_input("remove", &mut sim).unwrap();
        manager.remove_dirty_modes(&mut sim).unwrap();
        assert!(!manager.contains(ModeCategory::RandomEvent));
    }
    assert_eq!(manager.run_count(ModeCategory::RandomEvent), 2);
    assert_eq!(manager.categories().collect::<Vec<_>>(), [ModeCategory::Travel]);
}

#[test]
fn removing_the_last_mode_sends_no_notification() {
    let (mut manager, mut sim, changes) = setup();
    manager.add_mode(ModeCategory::Travel, &mut sim).unwrap();
    manager.send_input("remove", &mut sim).unwrap();
    manager.remove_dirty_modes(&mut sim).unwrap();
    assert_eq!(manager.mode_count(), 0);
    assert!(manager.active_mode().is_none());
    assert_eq!(*changes.borrow(), vec![ModeCategory::Travel]);
}

#[test]
fn unregistered_category_fails_without_changing_the_stack() {
    let (mut manager, mut sim, _) = setup();
    manager.add_mode(ModeCategory::Travel, &mut sim).unwrap();
    let err = manager.add_mode(ModeCategory::Hunt, &mut sim).unwrap_err();
    assert_eq!(err, ModeError::UnknownModeCategory(ModeCategory::Hunt));
    assert_eq!(manager.mode_count(), 1);
    assert_eq!(manager.run_count(ModeCategory::Hunt), 0);
}

#[test]
fn failed_attach_leaves_the_stack_as_it_was() {
    let (mut manager, mut sim, changes) = setup();
    manager.add_mode(ModeCategory::Travel, &mut sim).unwrap();
    for _ in 0..2 {
        let err = manager.add_mode(ModeCategory::Trade, &mut sim).unwrap_err();
        assert_eq!(err, ModeError::UnknownStateType(StateId::Drive));
        assert_eq!(manager.mode_count(), 1);
        assert_eq!(manager.active_category(), Some(ModeCategory::Travel));
        assert!(!manager.contains(ModeCategory::Trade));
    }
    assert_eq!(manager.run_count(ModeCategory::Trade), 0);
    assert_eq!(*changes.borrow(), vec![ModeCategory::Travel]);
}
