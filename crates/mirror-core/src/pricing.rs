//! Price engine: area rate plus flat per-feature surcharges.

use crate::dimension::Dimensions;
use crate::features::{Feature, FeatureSet};

#[derive(Clone, Debug, PartialEq)]
pub struct PriceTable {
    pub rate_per_m2: f64,
    pub clock_fee: f64,
    pub socket_fee: f64,
    pub shelf_fee: f64,
    pub hygiene_mirror_fee: f64,
    pub light_fee: f64,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            rate_per_m2: 150.0,
            clock_fee: 45.0,
            socket_fee: 0.0,
            shelf_fee: 0.0,
            hygiene_mirror_fee: 0.0,
            light_fee: 0.0,
        }
    }
}

impl PriceTable {
    /// Flat fee added when `feature` is enabled. The wall is never priced.
    pub fn fee(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Wall => 0.0,
            Feature::Light => self.light_fee,
            Feature::Clock => self.clock_fee,
            Feature::Socket => self.socket_fee,
            Feature::Shelf => self.shelf_fee,
            Feature::HygieneMirror => self.hygiene_mirror_fee,
        }
    }

    /// Unrounded total; round only when formatting.
    pub fn total(&self, dims: &Dimensions, features: &FeatureSet) -> f64 {
        let base = dims.area_m2() * self.rate_per_m2;
        Feature::ALL
            .iter()
            .filter(|f| features.is_enabled(**f))
            .fold(base, |sum, f| sum + self.fee(*f))
    }
}

/// Total with the default price table.
pub fn compute_price(dims: &Dimensions, features: &FeatureSet) -> f64 {
    PriceTable::default().total(dims, features)
}

pub fn format_price(amount: f64) -> String {
    format!("{amount:.2} €")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_price() {
        let p = compute_price(&Dimensions::default(), &FeatureSet::default());
        assert!((p - 216.0).abs() < 1e-9);
        assert_eq!(format_price(p), "216.00 €");
    }

    #[test]
    fn wall_and_light_are_free_by_default() {
        let dims = Dimensions::default();
        let mut set = FeatureSet::empty();
        let bare = compute_price(&dims, &set);
        set.toggle(Feature::Wall, true);
        set.toggle(Feature::Light, true);
        assert_eq!(compute_price(&dims, &set), bare);
    }

    #[test]
    fn custom_fees_apply_per_feature() {
        let table = PriceTable {
            socket_fee: 20.0,
            shelf_fee: 30.0,
            ..PriceTable::default()
        };
        let dims = Dimensions::new(1000, 1000);
        let mut set = FeatureSet::empty();
        set.toggle(Feature::Socket, true);
        set.toggle(Feature::Shelf, true);
        assert!((table.total(&dims, &set) - 200.0).abs() < 1e-9);
    }
}
