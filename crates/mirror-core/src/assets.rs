//! Availability of externally loaded assets.
//!
//! Loading itself happens outside the core. The registry only records which
//! assets are usable and hands out generation tickets so a load that finishes
//! after its feature was switched off can be recognised and dropped.

use crate::error::ConfigError;
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetId {
    ClockModel,
    EnvironmentMap,
}

impl AssetId {
    pub fn path(self) -> &'static str {
        match self {
            AssetId::ClockModel => "/images/analog_clock.glb",
            AssetId::EnvironmentMap => "/images/modern_bathroom_4k.hdr",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssetState {
    #[default]
    Missing,
    Loading,
    Ready,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub asset: AssetId,
    generation: u64,
}

#[derive(Clone, Debug, Default)]
pub struct AssetRegistry {
    states: FnvHashMap<AssetId, AssetState>,
    generations: FnvHashMap<AssetId, u64>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, asset: AssetId) -> AssetState {
        self.states.get(&asset).copied().unwrap_or_default()
    }

    pub fn is_ready(&self, asset: AssetId) -> bool {
        self.state(asset) == AssetState::Ready
    }

    /// Start (or restart) a load. Returns `None` if the asset is already usable.
    pub fn request(&mut self, asset: AssetId) -> Option<LoadTicket> {
        if self.is_ready(asset) {
            return None;
        }
        let generation = self.generations.entry(asset).or_insert(0);
        *generation += 1;
        self.states.insert(asset, AssetState::Loading);
        Some(LoadTicket {
            asset,
            generation: *generation,
        })
    }

    /// Invalidate any outstanding ticket for `asset`.
    pub fn cancel(&mut self, asset: AssetId) {
        if self.state(asset) != AssetState::Loading {
            return;
        }
        *self.generations.entry(asset).or_insert(0) += 1;
        self.states.insert(asset, AssetState::Missing);
    }

    /// Record the outcome of a load. Stale tickets are ignored and return `false`.
    pub fn resolve(&mut self, ticket: LoadTicket, result: Result<(), ConfigError>) -> bool {
        let current = self.generations.get(&ticket.asset).copied().unwrap_or(0);
        if current != ticket.generation {
            log::info!("[assets] ignoring late load of {:?}", ticket.asset);
            return false;
        }
        let state = match result {
            Ok(()) => AssetState::Ready,
            Err(e) => {
                log::warn!("[assets] {e}");
                AssetState::Failed
            }
        };
        self.states.insert(ticket.asset, state);
        true
    }
}
