use crate::constants::{
    AIR_DENSITY_SEA_LEVEL, DENSITY_SCALE_HEIGHT, FEET_TO_METERS, THRUST_LAPSE_ALTITUDE,
};

/// Exponential atmosphere, kg/m³.
pub fn air_density(altitude_ft: f64) -> f64 {
    let altitude_m = altitude_ft.max(0.0) * FEET_TO_METERS;
    AIR_DENSITY_SEA_LEVEL * (-altitude_m / DENSITY_SCALE_HEIGHT).exp()
}

/// Fraction of sea-level thrust available at altitude.
pub fn thrust_factor(altitude_ft: f64) -> f64 {
    (-altitude_ft.max(0.0) / THRUST_LAPSE_ALTITUDE).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sea_level() {
        assert_abs_diff_eq!(air_density(0.0), 1.225, epsilon = 1e-12);
        assert_abs_diff_eq!(thrust_factor(0.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_density_at_scale_height() {
        // 8500 m is one e-folding
        let altitude_ft = 8_500.0 / FEET_TO_METERS;
        assert_abs_diff_eq!(air_density(altitude_ft), 1.225 / std::f64::consts::E, epsilon = 1e-9);
    }

    #[test]
    fn test_thrust_lapse() {
        assert_abs_diff_eq!(thrust_factor(30_000.0), 1.0 / std::f64::consts::E, epsilon = 1e-12);
        assert!(thrust_factor(10_000.0) < thrust_factor(5_000.0));
    }

    #[test]
    fn test_negative_altitude_treated_as_sea_level() {
        assert_eq!(air_density(-200.0), air_density(0.0));
        assert_eq!(thrust_factor(-200.0), 1.0);
    }
}
