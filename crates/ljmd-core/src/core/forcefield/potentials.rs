/// Lennard-Jones 12-6 pair energy `4ε((σ/r)^12 − (σ/r)^6)`.
///
/// Non-positive distances describe a degenerate, overlapping pair and contribute zero.
#[inline]
pub fn lennard_jones_12_6(dist: f64, sigma: f64, epsilon: f64) -> f64 {
    if dist <= 0.0 {
        return 0.0;
    }
    let rho6 = (sigma / dist).powi(6);
    let rho12 = rho6 * rho6;
    4.0 * epsilon * (rho12 - rho6)
}

/// Magnitude of the Lennard-Jones pair force, `(24ε/r)(2(σ/r)^12 − (σ/r)^6)`.
///
/// Positive values are repulsive. The caller is responsible for keeping `dist`
/// away from zero.
#[inline]
pub fn lennard_jones_force(dist: f64, sigma: f64, epsilon: f64) -> f64 {
    let rho6 = (sigma / dist).powi(6);
    let rho12 = rho6 * rho6;
    (24.0 * epsilon / dist) * (2.0 * rho12 - rho6)
}

/// Clamps a pair distance to the force floor `r_min`.
///
/// Returns the distance to use in the force formula and whether clamping occurred.
#[inline]
pub fn clamp_distance(dist: f64, r_min: f64) -> (f64, bool) {
    if dist < r_min {
        (r_min, true)
    } else {
        (dist, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn lennard_jones_is_zero_at_sigma() {
        assert_eq!(lennard_jones_12_6(1.0, 1.0, 1.0), 0.0);
        assert!(f64_approx_equal(lennard_jones_12_6(0.3345, 0.3345, 0.0661), 0.0));
    }

    #[test]
    fn lennard_jones_at_minimum_returns_negative_epsilon() {
        let r_min = 2.0f64.powf(1.0 / 6.0);
        assert!(f64_approx_equal(lennard_jones_12_6(r_min, 1.0, 2.5), -2.5));
    }

    #[test]
    fn lennard_jones_is_repulsive_inside_sigma() {
        assert!(lennard_jones_12_6(0.9, 1.0, 1.0) > 0.0);
    }

    #[test]
    fn lennard_jones_with_non_positive_distance_contributes_zero() {
        assert_eq!(lennard_jones_12_6(0.0, 1.0, 1.0), 0.0);
        assert_eq!(lennard_jones_12_6(-1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn force_vanishes_at_potential_minimum() {
        let r_min = 2.0f64.powf(1.0 / 6.0);
        assert!(f64_approx_equal(lennard_jones_force(r_min, 1.0, 1.0), 0.0));
    }

    #[test]
    fn force_at_sigma_equals_24_epsilon_over_sigma() {
        assert!(f64_approx_equal(lennard_jones_force(1.0, 1.0, 1.0), 24.0));
        assert!(f64_approx_equal(lennard_jones_force(2.0, 2.0, 3.0), 36.0));
    }

    #[test]
    fn force_is_negative_derivative_of_energy() {
        let (sigma, epsilon, r, h) = (0.3345, 0.0661, 0.41, 1e-6);
        let numeric = -(lennard_jones_12_6(r + h, sigma, epsilon)
            - lennard_jones_12_6(r - h, sigma, epsilon))
            / (2.0 * h);
        assert!((numeric - lennard_jones_force(r, sigma, epsilon)).abs() < 1e-6);
    }

    #[test]
    fn clamp_distance_raises_small_distances_to_floor() {
        assert_eq!(clamp_distance(0.0, 0.001), (0.001, true));
        assert_eq!(clamp_distance(0.0005, 0.001), (0.001, true));
    }

    #[test]
    fn clamp_distance_keeps_distances_at_or_above_floor() {
        assert_eq!(clamp_distance(0.001, 0.001), (0.001, false));
        assert_eq!(clamp_distance(0.5, 0.001), (0.5, false));
    }
}
