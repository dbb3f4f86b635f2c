//! Wagontrail Game Engine
//!
//! Platform-agnostic core for a text-driven wagon trail simulation. Game
//! screens are modes on a stack owned by [`ModeManager`]; only the newest mode
//! is ticked, rendered and handed input. [`GameSimulation`] drives the stack,
//! advances simulated days and publishes the composed screen text.

pub mod climate;
pub mod clock;
pub mod config;
pub mod context;
pub mod director;
pub mod entity;
pub mod error;
pub mod mode;
pub mod numbers;
pub mod render;
pub mod score;
pub mod screens;
pub mod simulation;
pub mod trail;

// Re-export commonly used types
pub use climate::{Climate, ClimateClassification, Weather};
pub use clock::{Clock, ClockEvent};
pub use config::{SimConfig, StartDate};
pub use context::{JourneyOutcome, MAX_PLAYERS, SimContext};
pub use director::{EventCategory, EventDirector, EventKind, EventOutcome};
pub use entity::{
    Entity, HealthStatus, Person, Profession, RationLevel, SimItem, TravelPace, Vehicle,
    VehicleStatus,
};
pub use error::{ConfigError, DataError, ModeError, ModeResult, SimError};
pub use mode::{
    Menu, Mode, ModeCategory, ModeCore, ModeFactory, ModeManager, Screen, State, StateCx,
    StateFactory, StateId, StateInfo, Transition,
};
pub use render::{DEFAULT_MODE_TEXT, NO_MODE_TEXT, PROMPT, Renderer, compose};
pub use score::{Rating, Score, TopTen, final_score};
pub use screens::default_mode_factory;
pub use simulation::GameSimulation;
pub use trail::{Location, LocationKind, Trail, TrailData};
