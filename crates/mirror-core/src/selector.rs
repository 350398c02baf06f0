//! Position selector state machine.
//!
//! `Disabled -> Pending -> Committed`, one-way per enable cycle. Disabling
//! from any state returns to `Disabled` and drops the committed placement,
//! so the next enable starts over at `Pending`.

use crate::error::{ConfigError, Result};
use crate::features::{Feature, Placement};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectorState {
    #[default]
    Disabled,
    /// Enabled, hit targets on screen, attachment drawn at the center.
    Pending,
    Committed(Placement),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorEvent {
    Enable,
    Disable,
    Pick(Placement),
}

impl SelectorState {
    pub fn placement(self) -> Option<Placement> {
        match self {
            SelectorState::Committed(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_pending(self) -> bool {
        self == SelectorState::Pending
    }

    pub fn transition(self, feature: Feature, event: SelectorEvent) -> Result<SelectorState> {
        match (self, event) {
            (_, SelectorEvent::Disable) => Ok(SelectorState::Disabled),
            (SelectorState::Disabled, SelectorEvent::Enable) => Ok(SelectorState::Pending),
            (state, SelectorEvent::Enable) => Ok(state),
            (SelectorState::Disabled, SelectorEvent::Pick(_)) => {
                Err(ConfigError::FeatureDisabled(feature))
            }
            (_, SelectorEvent::Pick(p)) if !feature.offers(p) => {
                Err(ConfigError::PlacementNotOffered {
                    feature,
                    placement: p,
                })
            }
            (_, SelectorEvent::Pick(p)) => Ok(SelectorState::Committed(p)),
        }
    }
}
