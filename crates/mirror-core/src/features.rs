//! Optional mirror features and their placements.

use crate::constants::{SHELF_PERCENT_DEFAULT, SHELF_PERCENT_MAX, SHELF_PERCENT_MIN};
use crate::error::{ConfigError, Result};
use crate::selector::{SelectorEvent, SelectorState};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Wall,
    Light,
    Clock,
    Socket,
    Shelf,
    HygieneMirror,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Wall,
        Feature::Light,
        Feature::Clock,
        Feature::Socket,
        Feature::Shelf,
        Feature::HygieneMirror,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Placements a user may pick for this feature, in selector order.
    pub fn candidates(self) -> &'static [Placement] {
        match self {
            Feature::Clock => &Placement::ALL,
            Feature::Socket => &Placement::CORNERS,
            Feature::HygieneMirror => &[Placement::BottomLeft, Placement::BottomRight],
            Feature::Wall | Feature::Light | Feature::Shelf => &[],
        }
    }

    pub fn is_placeable(self) -> bool {
        !self.candidates().is_empty()
    }

    pub fn offers(self, placement: Placement) -> bool {
        self.candidates().contains(&placement)
    }

    /// Stable id used for DOM element names and logs.
    pub fn id(self) -> &'static str {
        match self {
            Feature::Wall => "wall",
            Feature::Light => "light",
            Feature::Clock => "clock",
            Feature::Socket => "socket",
            Feature::Shelf => "shelf",
            Feature::HygieneMirror => "hygiene-mirror",
        }
    }
}

/// Compass position relative to the mirror center.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    TopLeft,
    TopCenter,
    TopRight,
    RightCenter,
    BottomRight,
    BottomCenter,
    BottomLeft,
    LeftCenter,
}

impl Placement {
    pub const ALL: [Placement; 8] = [
        Placement::TopLeft,
        Placement::TopCenter,
        Placement::TopRight,
        Placement::RightCenter,
        Placement::BottomRight,
        Placement::BottomCenter,
        Placement::BottomLeft,
        Placement::LeftCenter,
    ];

    pub const CORNERS: [Placement; 4] = [
        Placement::TopLeft,
        Placement::TopRight,
        Placement::BottomLeft,
        Placement::BottomRight,
    ];

    /// Unit direction signs `(sx, sy)` with +x right and +y up.
    pub fn signs(self) -> (f32, f32) {
        match self {
            Placement::TopLeft => (-1.0, 1.0),
            Placement::TopCenter => (0.0, 1.0),
            Placement::TopRight => (1.0, 1.0),
            Placement::RightCenter => (1.0, 0.0),
            Placement::BottomRight => (1.0, -1.0),
            Placement::BottomCenter => (0.0, -1.0),
            Placement::BottomLeft => (-1.0, -1.0),
            Placement::LeftCenter => (-1.0, 0.0),
        }
    }

    /// Compass angle in radians, counter-clockwise from +x.
    pub fn angle(self) -> f32 {
        let (sx, sy) = self.signs();
        sy.atan2(sx)
    }

    pub fn id(self) -> &'static str {
        match self {
            Placement::TopLeft => "top-left",
            Placement::TopCenter => "top-center",
            Placement::TopRight => "top-right",
            Placement::RightCenter => "right-center",
            Placement::BottomRight => "bottom-right",
            Placement::BottomCenter => "bottom-center",
            Placement::BottomLeft => "bottom-left",
            Placement::LeftCenter => "left-center",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Placement {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Placement::ALL
            .iter()
            .copied()
            .find(|p| p.id() == s)
            .ok_or(())
    }
}

/// Per-feature state as seen by the renderer and the price engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureFlag {
    pub enabled: bool,
    pub placement: Option<Placement>,
    pub extra: Option<u32>,
    enabled_seq: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureSet {
    flags: [FeatureFlag; 6],
    next_seq: u64,
}

impl Default for FeatureSet {
    fn default() -> Self {
        let mut set = Self {
            flags: [FeatureFlag::default(); 6],
            next_seq: 0,
        };
        set.toggle(Feature::Wall, true);
        set
    }
}

impl FeatureSet {
    /// All features off, including the wall.
    pub fn empty() -> Self {
        Self {
            flags: [FeatureFlag::default(); 6],
            next_seq: 0,
        }
    }

    pub fn flag(&self, feature: Feature) -> &FeatureFlag {
        &self.flags[feature.index()]
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.flag(feature).enabled
    }

    pub fn placement(&self, feature: Feature) -> Option<Placement> {
        self.flag(feature).placement
    }

    pub fn shelf_width_percent(&self) -> Option<u32> {
        self.flag(Feature::Shelf).extra
    }

    /// Selector state, or `None` for features without placements.
    pub fn selector_state(&self, feature: Feature) -> Option<SelectorState> {
        if !feature.is_placeable() {
            return None;
        }
        let flag = self.flag(feature);
        Some(match (flag.enabled, flag.placement) {
            (false, _) => SelectorState::Disabled,
            (true, None) => SelectorState::Pending,
            (true, Some(p)) => SelectorState::Committed(p),
        })
    }

    /// Set a flag. Returns `true` if anything changed.
    ///
    /// Disabling clears placement and sub-parameter; enabling starts pending.
    pub fn toggle(&mut self, feature: Feature, enabled: bool) -> bool {
        if self.flag(feature).enabled == enabled {
            return false;
        }
        let event = if enabled {
            SelectorEvent::Enable
        } else {
            SelectorEvent::Disable
        };
        let next = match self.selector_state(feature) {
            Some(state) => match state.transition(feature, event) {
                Ok(next) => next.placement(),
                Err(_) => None,
            },
            None => None,
        };
        self.next_seq += 1;
        let seq = self.next_seq;
        let flag = &mut self.flags[feature.index()];
        flag.enabled = enabled;
        flag.placement = next;
        flag.extra = match (feature, enabled) {
            (Feature::Shelf, true) => Some(SHELF_PERCENT_DEFAULT),
            _ => None,
        };
        flag.enabled_seq = if enabled { seq } else { 0 };
        true
    }

    pub fn set_placement(&mut self, feature: Feature, placement: Placement) -> Result<()> {
        let state = self
            .selector_state(feature)
            .ok_or(ConfigError::NotPlaceable(feature))?;
        let next = state.transition(feature, SelectorEvent::Pick(placement))?;
        self.flags[feature.index()].placement = next.placement();
        Ok(())
    }

    /// Clamp into `[10, 100]` and store. Refused while the shelf is off.
    pub fn set_shelf_width_percent(&mut self, percent: u32) -> Result<u32> {
        let flag = &mut self.flags[Feature::Shelf.index()];
        if !flag.enabled {
            return Err(ConfigError::FeatureDisabled(Feature::Shelf));
        }
        let v = percent.clamp(SHELF_PERCENT_MIN, SHELF_PERCENT_MAX);
        flag.extra = Some(v);
        Ok(v)
    }

    pub fn pending(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL
            .into_iter()
            .filter(|f| self.selector_state(*f) == Some(SelectorState::Pending))
    }

    /// The pending feature whose hit targets are on screen: the most recently enabled one.
    pub fn active_selection(&self) -> Option<Feature> {
        self.pending().max_by_key(|f| self.flag(*f).enabled_seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_sets_match_features() {
        assert_eq!(Feature::Clock.candidates().len(), 8);
        assert_eq!(Feature::Socket.candidates().len(), 4);
        assert_eq!(Feature::HygieneMirror.candidates().len(), 2);
        assert!(!Feature::Shelf.is_placeable());
        assert!(!Feature::HygieneMirror.offers(Placement::TopLeft));
    }

    #[test]
    fn placement_ids_round_trip_through_from_str() {
        for p in Placement::ALL {
            assert_eq!(p.id().parse::<Placement>(), Ok(p));
        }
        assert!("middle".parse::<Placement>().is_err());
    }

    #[test]
    fn wall_is_on_by_default() {
        let set = FeatureSet::default();
        assert!(set.is_enabled(Feature::Wall));
        assert!(!set.is_enabled(Feature::Clock));
    }

    #[test]
    fn shelf_percent_defaults_and_clamps() {
        let mut set = FeatureSet::empty();
        assert!(set.set_shelf_width_percent(50).is_err());
        set.toggle(Feature::Shelf, true);
        assert_eq!(set.shelf_width_percent(), Some(SHELF_PERCENT_DEFAULT));
        assert_eq!(set.set_shelf_width_percent(3), Ok(SHELF_PERCENT_MIN));
        assert_eq!(set.set_shelf_width_percent(300), Ok(SHELF_PERCENT_MAX));
        set.toggle(Feature::Shelf, false);
        assert_eq!(set.shelf_width_percent(), None);
    }

    #[test]
    fn newest_pending_feature_owns_the_selector() {
        let mut set = FeatureSet::empty();
        set.toggle(Feature::Clock, true);
        set.toggle(Feature::Socket, true);
        assert_eq!(set.active_selection(), Some(Feature::Socket));
        set.set_placement(Feature::Socket, Placement::TopRight).unwrap();
        assert_eq!(set.active_selection(), Some(Feature::Clock));
        set.set_placement(Feature::Clock, Placement::TopCenter).unwrap();
        assert_eq!(set.active_selection(), None);
    }

    #[test]
    fn placement_on_unplaceable_feature_is_refused() {
        let mut set = FeatureSet::default();
        assert_eq!(
            set.set_placement(Feature::Wall, Placement::TopLeft),
            Err(ConfigError::NotPlaceable(Feature::Wall))
        );
    }
}
