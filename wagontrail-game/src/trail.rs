//! Points of interest along the trail and the party's position between them.
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::error::DataError;
use crate::mode::ModeCategory;

const DEFAULT_TRAIL: &str = include_str!("../data/trail.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    #[serde(default)]
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LocationKind {
    Landmark,
    Settlement,
    River {
        depth_ft: u32,
        width_ft: u32,
        #[serde(default)]
        ferry_cost_cents: i64,
    },
    ForkInRoad {
        branches: Vec<Branch>,
    },
}

impl LocationKind {
    /// Mode attached when the party arrives here, if any.
    #[must_use]
    pub const fn arrival_mode(&self) -> Option<ModeCategory> {
        match self {
            Self::River { .. } => Some(ModeCategory::RiverCrossing),
            Self::ForkInRoad { .. } => Some(ModeCategory::ForkInRoad),
            Self::Landmark | Self::Settlement => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub kind: LocationKind,
    /// Distance to the following location.
    #[serde(default)]
    pub miles_to_next: u32,
    #[serde(default)]
    pub advice: Vec<String>,
}

impl Location {
    #[must_use]
    pub const fn is_settlement(&self) -> bool {
        matches!(self.kind, LocationKind::Settlement)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailData {
    pub name: String,
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trail {
    name: String,
    locations: Vec<Location>,
    current: usize,
    miles_to_next: u32,
    departed: bool,
}

impl Trail {
    /// Parse a trail table.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Parse`] for malformed JSON and
    /// [`DataError::EmptyTrail`] when there are no locations.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let data: TrailData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// # Errors
    ///
    /// Returns [`DataError::EmptyTrail`] when there are no locations.
    pub fn from_data(data: TrailData) -> Result<Self, DataError> {
        if data.locations.is_empty() {
            return Err(DataError::EmptyTrail(data.name));
        }
        Ok(Self {
            name: data.name,
            locations: data.locations,
            current: 0,
            miles_to_next: 0,
            departed: false,
        })
    }

    /// The embedded Oregon trail table.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] if the embedded table is invalid.
    pub fn oregon() -> Result<Self, DataError> {
        Self::from_json(DEFAULT_TRAIL)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Last location reached.
    #[must_use]
    pub fn current_location(&self) -> Option<&Location> {
        self.locations.get(self.current)
    }

    #[must_use]
    pub fn next_location(&self) -> Option<&Location> {
        self.locations.get(self.current + 1)
    }

    #[must_use]
    pub const fn is_first_location(&self) -> bool {
        self.current == 0 && !self.departed
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current + 1 >= self.locations.len()
    }

    /// True while the party stands at its current location.
    #[must_use]
    pub const fn arrived(&self) -> bool {
        !self.departed
    }

    #[must_use]
    pub const fn miles_to_next(&self) -> u32 {
        self.miles_to_next
    }

    /// Leave the current location. Does nothing at the end of the trail or while already under way.
    pub fn depart(&mut self) {
        if self.departed || self.is_finished() {
            return;
        }
        self.miles_to_next = self
            .current_location()
            .map_or(0, |location| location.miles_to_next);
        self.departed = true;
    }

    /// Cover `miles` towards the next location. Returns its index on arrival.
    pub fn move_towards_next(&mut self, miles: u32) -> Option<usize> {
        if !self.departed || self.is_finished() {
            return None;
        }
        self.miles_to_next = self.miles_to_next.saturating_sub(miles);
        if self.miles_to_next > 0 {
            return None;
        }
        self.current += 1;
        self.departed = false;
        if let Some(location) = self.current_location() {
            info!("arrived at {}", location.name);
        }
        Some(self.current)
    }

    /// Branch names offered at the current fork.
    #[must_use]
    pub fn branches(&self) -> Vec<&str> {
        match self.current_location().map(|location| &location.kind) {
            Some(LocationKind::ForkInRoad { branches }) => {
                branches.iter().map(|branch| branch.name.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Splice the chosen branch's locations after the current fork.
    pub fn choose_branch(&mut self, idx: usize) -> bool {
        let Some(Location {
            kind: LocationKind::ForkInRoad { branches },
            ..
        }) = self.locations.get(self.current)
        else {
            return false;
        };
        let Some(branch) = branches.get(idx) else {
            return false;
        };
        info!("took the road towards {}", branch.name);
        let spliced = branch.locations.clone();
        let tail = self.locations.split_off(self.current + 1);
        self.locations.extend(spliced);
        self.locations.extend(tail);
        if let Some(fork) = self.locations.get_mut(self.current) {
            fork.kind = LocationKind::Landmark;
        }
        true
    }

    /// Text map with a marker on the current location.
    #[must_use]
    pub fn render_map(&self) -> String {
        let mut out = format!("{}\n", self.name);
        for (idx, location) in self.locations.iter().enumerate() {
            let marker = if idx == self.current { '>' } else { ' ' };
            let _ = writeln!(out, " {marker} {}", location.name);
        }
        out
    }
}
