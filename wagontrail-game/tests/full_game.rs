use std::cell::RefCell;
use std::rc::Rc;

use wagontrail_game::{
    Entity, GameSimulation, Mode, ModeCategory, PROMPT, SimConfig, StateId,
};

fn quiet_config() -> SimConfig {
    SimConfig {
        event_chance_per_day: 0.0,
        ..SimConfig::default()
    }
}

fn started() -> GameSimulation {
    let mut game = GameSimulation::new(quiet_config()).unwrap();
    game.start().unwrap();
    game
}

fn send_all(game: &mut GameSimulation, lines: &[&str]) {
    for line in lines {
        assert!(game.send_input(line).unwrap(), "input {line:?} was refused");
    }
}

/// Banker party of four leaving in March, outfitted and back on the travel screen.
fn outfitted() -> GameSimulation {
    let mut game = started();
    send_all(&mut game, &["1", "Ann", "", "y", "1", ""]);
    send_all(&mut game, &["1", "6", "2", "1000", "4", "200", "8"]);
    game.tick().unwrap();
    game
}

#[test]
fn start_shows_new_game_over_travel() {
    let game = started();
    assert_eq!(game.active_category(), Some(ModeCategory::NewGame));
    assert_eq!(game.modes().mode_count(), 2);
    assert!(game.screen().starts_with("Mode(2): new_game(NO STATE) - Turns: 0000"));
    assert!(game.screen().ends_with(PROMPT));
}

#[test]
fn leader_prompt_then_empty_line_fills_the_party() {
    let mut game = started();
    send_all(&mut game, &["2", "Ann", "Bob"]);
    assert!(game.screen().contains("2. Bob"));
    send_all(&mut game, &[""]);
    let state = game.active_mode().unwrap().current_state().unwrap();
    assert_eq!(state.id, StateId::ConfirmPlayerNames);
    let screen = game.screen().to_string();
    assert!(screen.contains("1. Ann (leader)"));
    assert!(screen.contains("4. "));
}

#[test]
fn four_names_walk_every_slot_before_confirmation() {
    let mut game = started();
    send_all(&mut game, &["1"]);
    for name in ["Ann", "Bob", "Cyd", "Dot"] {
        let state = game.active_mode().unwrap().current_state().unwrap();
        assert_eq!(state.id, StateId::InputPlayerName);
        send_all(&mut game, &[name]);
    }
    let state = game.active_mode().unwrap().current_state().unwrap();
    assert_eq!(state.id, StateId::ConfirmPlayerNames);
    let screen = game.screen();
    assert!(screen.contains("1. Ann (leader)"));
    assert!(screen.contains("4. Dot"));
}

#[test]
fn outfitting_sits_above_new_game_until_the_store_closes() {
    let mut game = started();
    send_all(&mut game, &["3", "", "y", "2"]);
    assert_eq!(game.active_category(), Some(ModeCategory::InitialPurchases));
    assert_eq!(
        game.modes().categories().collect::<Vec<_>>(),
        [
            ModeCategory::Travel,
            ModeCategory::NewGame,
            ModeCategory::InitialPurchases
        ]
    );
    assert!(game.screen().contains("store_advice"));
}

#[test]
fn closing_the_store_returns_to_travel_with_one_notification() {
    let mut game = started();
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    game.on_mode_changed(move |category| sink.borrow_mut().push(category));
    send_all(&mut game, &["1", "", "y", "1", ""]);
    send_all(&mut game, &["1", "4", "8"]);
    changes.borrow_mut().clear();
    game.tick().unwrap();

    assert_eq!(*changes.borrow(), vec![ModeCategory::Travel]);
    assert_eq!(game.active_category(), Some(ModeCategory::Travel));
    assert_eq!(game.modes().mode_count(), 1);
    assert_eq!(game.context().vehicle.quantity(Entity::Animal), 4);
}

#[test]
fn purchases_are_paid_for_when_the_store_closes() {
    let game = outfitted();
    let vehicle = &game.context().vehicle;
    assert_eq!(vehicle.quantity(Entity::Animal), 6);
    assert_eq!(vehicle.quantity(Entity::Food), 1000);
    assert_eq!(vehicle.quantity(Entity::Ammo), 200);
    assert_eq!(vehicle.balance_cents, 160_000 - 12_000 - 20_000 - 2_000);
    assert_eq!(vehicle.passengers.len(), 4);
}

#[test]
fn driving_reaches_the_first_river_and_crossing_refuses_input() {
    let mut game = outfitted();
    send_all(&mut game, &["1"]);
    for _ in 0..100 {
        game.tick().unwrap();
        if game.active_category() == Some(ModeCategory::RiverCrossing) {
            break;
        }
    }
    assert_eq!(game.active_category(), Some(ModeCategory::RiverCrossing));
    assert!(game.context().total_turns > 0);
    assert_eq!(game.context().location_name(), "Kansas River Crossing");
    assert!(!game.context().vehicle.is_moving());

    send_all(&mut game, &["3"]);
    assert!(!game.accepting_input());
    assert!(!game.send_input("1").unwrap());
    assert!(!game.screen().ends_with(PROMPT));

    while game.active_mode().unwrap().current_state().map(|s| s.id) == Some(StateId::Crossing) {
        game.tick().unwrap();
    }
    assert!(game.screen().contains("ferry carried you safely"));
    send_all(&mut game, &[""]);
    game.tick().unwrap();
    assert_eq!(game.active_category(), Some(ModeCategory::Travel));
    assert_eq!(game.context().trail.current_index(), 1);
}

#[test]
fn resting_spends_the_requested_days() {
    let mut game = outfitted();
    let before = game.context().clock.total_days();
    send_all(&mut game, &["6", "5"]);
    game.tick().unwrap();
    assert_eq!(game.context().clock.total_days(), before + 5);
    assert_eq!(game.context().total_turns, 5);
}

#[test]
fn destroy_clears_the_stack() {
    let mut game = outfitted();
    game.destroy();
    assert!(game.active_mode().is_none());
    game.destroy();
    assert_eq!(game.screen(), "");
}
