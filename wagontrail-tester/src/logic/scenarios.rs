//! Named scripted runs through the simulation.
use anyhow::{Result, bail, ensure};
use wagontrail_game::{Entity, MAX_PLAYERS, ModeCategory, PROMPT, StateId};

use super::script::ScriptedGame;

/// Frames the long-haul run may spend before it is judged stuck.
const LONG_HAUL_FRAMES: usize = 4_000;

pub struct TestScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub script: fn(&mut ScriptedGame) -> Result<()>,
}

static SCENARIOS: [TestScenario; 5] = [
    TestScenario {
        name: "smoke",
        description: "Start a game and check the opening screen",
        script: smoke,
    },
    TestScenario {
        name: "new-game",
        description: "Walk the profession, party name and month prompts",
        script: new_game,
    },
    TestScenario {
        name: "outfitting",
        description: "Buy the first load of supplies and return to the trail",
        script: outfitting,
    },
    TestScenario {
        name: "river-crossing",
        description: "Drive to the first river and get across",
        script: river_crossing,
    },
    TestScenario {
        name: "long-haul",
        description: "Autopilot down the trail until the journey ends",
        script: long_haul,
    },
];

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    SCENARIOS
        .iter()
        .map(|scenario| (scenario.name, scenario.description))
}

pub fn get_scenario(name: &str) -> Option<&'static TestScenario> {
    SCENARIOS
        .iter()
        .find(|scenario| scenario.name.eq_ignore_ascii_case(name))
}

/// Replace an `all` entry with every registered scenario.
pub fn expand_scenarios(names: Vec<String>) -> Vec<String> {
    if !names.iter().any(|name| name == "all") {
        return names;
    }
    let mut expanded: Vec<String> = names.into_iter().filter(|name| name != "all").collect();
    for (name, _) in list_scenarios() {
        if !expanded.iter().any(|existing| existing == name) {
            expanded.push(name.to_string());
        }
    }
    expanded
}

fn smoke(run: &mut ScriptedGame) -> Result<()> {
    run.expect_mode(ModeCategory::NewGame)?;
    let screen = run.game.screen();
    ensure!(
        screen.starts_with("Mode(2): new_game(NO STATE)"),
        "unexpected status line in {screen:?}"
    );
    ensure!(screen.ends_with(PROMPT), "opening screen has no prompt");
    run.send("Find out the differences between these choices")?;
    ensure!(run.state() == Some(StateId::ProfessionAdvice));
    run.send("")?;
    run.tick()?;
    run.expect_mode(ModeCategory::NewGame)
}

fn new_game(run: &mut ScriptedGame) -> Result<()> {
    run.send_all(&["1", "Ezra", "Martha"])?;
    ensure!(
        run.state() == Some(StateId::InputPlayerName),
        "name chain stopped early"
    );
    run.send("")?;
    ensure!(run.state() == Some(StateId::ConfirmPlayerNames));
    run.send_all(&["n", "Ezra", ""])?;
    run.send_all(&["y", "April"])?;
    run.expect_mode(ModeCategory::InitialPurchases)?;
    let sim = run.game.context();
    ensure!(
        sim.vehicle.passengers.len() == MAX_PLAYERS,
        "party has {} members",
        sim.vehicle.passengers.len()
    );
    ensure!(
        sim.vehicle.leader().is_some_and(|leader| leader.name == "Ezra"),
        "leader was not kept"
    );
    ensure!(sim.clock.long_date() == "April 1, 1848");
    Ok(())
}

fn outfitting(run: &mut ScriptedGame) -> Result<()> {
    run.create_party("2", "1")?;
    let purse = run.game.context().vehicle.balance_cents;
    run.outfit()?;
    let vehicle = &run.game.context().vehicle;
    ensure!(vehicle.balance_cents < purse, "nothing was paid for");
    ensure!(vehicle.quantity(Entity::Food) == 800);
    ensure!(run.game.modes().mode_count() == 1, "store modes left behind");
    Ok(())
}

fn river_crossing(run: &mut ScriptedGame) -> Result<()> {
    run.create_party("1", "2")?;
    run.outfit()?;
    run.send("Continue on trail")?;
    for _ in 0..LONG_HAUL_FRAMES {
        if run.game.active_category() == Some(ModeCategory::RiverCrossing) {
            break;
        }
        run.autopilot_step()?;
    }
    run.expect_mode(ModeCategory::RiverCrossing)?;
    let river = run.game.context().trail.current_index();
    run.send("1")?;
    ensure!(run.state() == Some(StateId::Crossing), "crossing did not begin");
    ensure!(!run.game.accepting_input(), "crossing accepted input");
    run.tick_until("the crossing to resolve", |game| {
        game.active_mode()
            .and_then(|mode| mode.current_state())
            .is_some_and(|state| state.id == StateId::CrossingResult)
    })?;
    run.send("")?;
    run.tick()?;
    run.expect_mode(ModeCategory::Travel)?;
    ensure!(run.game.context().trail.current_index() == river);
    Ok(())
}

fn long_haul(run: &mut ScriptedGame) -> Result<()> {
    run.create_party("1", "1")?;
    run.outfit()?;
    for _ in 0..LONG_HAUL_FRAMES {
        if run.game.is_over() {
            break;
        }
        run.autopilot_step()?;
    }
    let sim = run.game.context();
    if !run.game.is_over() && sim.trail.current_index() == 0 {
        bail!("never left {}", sim.location_name());
    }
    ensure!(sim.total_turns > 0, "no time passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_expands_without_duplicates() {
        let expanded = expand_scenarios(vec!["smoke".to_string(), "all".to_string()]);
        assert_eq!(expanded.len(), SCENARIOS.len());
        assert_eq!(expanded[0], "smoke");
    }

    #[test]
    fn lookup_ignores_case() {
        assert!(get_scenario("River-Crossing").is_some());
        assert!(get_scenario("unknown").is_none());
    }
}
