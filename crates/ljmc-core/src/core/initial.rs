use super::models::CoordinateState;
use nalgebra::Point3;
use rand::Rng;

/// Draws `count` positions uniformly over the canonical cell
/// `(-L/2, L/2]^3`.
///
/// The caller owns the generator, so the same seeded stream that produces
/// the configuration goes on to drive the rest of the run; for a fixed seed
/// the output is bit-identical across runs and worker counts.
pub fn random_configuration(
    count: usize,
    box_length: f64,
    rng: &mut impl Rng,
) -> CoordinateState {
    let positions = (0..count)
        .map(|_| {
            Point3::new(
                (0.5 - rng.r#gen::<f64>()) * box_length,
                (0.5 - rng.r#gen::<f64>()) * box_length,
                (0.5 - rng.r#gen::<f64>()) * box_length,
            )
        })
        .collect();
    CoordinateState::new(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generates_the_requested_number_of_particles() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = random_configuration(64, 5.0, &mut rng);
        assert_eq!(state.len(), 64);
    }

    #[test]
    fn all_positions_lie_inside_the_canonical_cell() {
        let box_length = 4.81;
        let mut rng = StdRng::seed_from_u64(1);
        let state = random_configuration(200, box_length, &mut rng);
        for p in state.positions() {
            for k in 0..3 {
                assert!(p[k] > -box_length / 2.0);
                assert!(p[k] <= box_length / 2.0);
            }
        }
    }

    #[test]
    fn a_fixed_seed_reproduces_the_configuration_bit_for_bit() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let a = random_configuration(50, 6.0, &mut rng_a);
        let b = random_configuration(50, 6.0, &mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_give_different_configurations() {
        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(2);
        let a = random_configuration(50, 6.0, &mut rng_a);
        let b = random_configuration(50, 6.0, &mut rng_b);
        assert_ne!(a, b);
    }
}
