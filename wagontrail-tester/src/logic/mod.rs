pub mod reports;
pub mod scenarios;
pub mod script;
pub mod seeds;
pub mod tester;

pub use scenarios::{expand_scenarios, get_scenario, list_scenarios};
pub use seeds::resolve_seed_inputs;
pub use tester::*;
