use super::system::ParticleSet;

/// Pairwise Euclidean distances between every pair of particles in a set.
///
/// The matrix is stored row-major in a single buffer. It is symmetric with a zero
/// diagonal, and it is always rebuilt from scratch from the current positions; it is
/// never patched incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes the full distance matrix for the current positions of `particles`.
    ///
    /// Each unordered pair is evaluated once and mirrored, so `get(i, j)` and
    /// `get(j, i)` are bit-identical.
    pub fn compute(particles: &ParticleSet) -> Self {
        let positions = particles.positions();
        let size = positions.len();
        let mut data = vec![0.0; size * size];

        for i in 0..size {
            for j in (i + 1)..size {
                let r = (positions[i] - positions[j]).norm();
                data[i * size + j] = r;
                data[j * size + i] = r;
            }
        }

        Self { size, data }
    }

    /// Returns the number of particles the matrix was computed for.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the distance between particles `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.size && j < self.size,
            "distance index ({i}, {j}) out of bounds for {} particles",
            self.size
        );
        self.data[i * self.size + j]
    }

    /// Returns row `i`: the distances from particle `i` to every particle.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.size..(i + 1) * self.size]
    }

    /// Iterates over each unordered pair `(i, j, r)` with `i < j`.
    pub fn unique_pairs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.size).flat_map(move |i| {
            ((i + 1)..self.size).map(move |j| (i, j, self.data[i * self.size + j]))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::particle::Particle;
    use nalgebra::Point3;

    fn set_of(points: &[[f64; 3]]) -> ParticleSet {
        ParticleSet::from_particles(
            points
                .iter()
                .map(|p| Particle::unlabeled(Point3::new(p[0], p[1], p[2]), 1.0)),
        )
        .unwrap()
    }

    #[test]
    fn compute_is_symmetric_with_zero_diagonal() {
        let set = set_of(&[
            [0.0, 0.0, 0.0],
            [1.0, 2.0, 2.0],
            [-0.3, 0.7, 5.1],
            [4.0, -1.0, 0.25],
        ]);
        let d = DistanceMatrix::compute(&set);
        for i in 0..d.size() {
            assert_eq!(d.get(i, i), 0.0);
            for j in 0..d.size() {
                assert_eq!(d.get(i, j), d.get(j, i));
            }
        }
    }

    #[test]
    fn compute_returns_euclidean_norm() {
        let set = set_of(&[[0.0, 0.0, 0.0], [1.0, 2.0, 2.0]]);
        let d = DistanceMatrix::compute(&set);
        assert!((d.get(0, 1) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn coincident_particles_have_zero_distance() {
        let set = set_of(&[[1.0, 1.0, 1.0], [1.0, 1.0, 1.0]]);
        let d = DistanceMatrix::compute(&set);
        assert_eq!(d.get(0, 1), 0.0);
    }

    #[test]
    fn empty_set_yields_empty_matrix() {
        let d = DistanceMatrix::compute(&ParticleSet::new());
        assert!(d.is_empty());
        assert_eq!(d.unique_pairs().count(), 0);
    }

    #[test]
    fn unique_pairs_visits_each_pair_once() {
        let set = set_of(&[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        let d = DistanceMatrix::compute(&set);
        let pairs: Vec<_> = d.unique_pairs().map(|(i, j, _)| (i, j)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn row_matches_get() {
        let set = set_of(&[[0.0; 3], [3.0, 4.0, 0.0]]);
        let d = DistanceMatrix::compute(&set);
        assert_eq!(d.row(1), &[5.0, 0.0]);
    }

    #[test]
    #[should_panic]
    fn get_panics_out_of_bounds() {
        let set = set_of(&[[0.0; 3]]);
        DistanceMatrix::compute(&set).get(0, 1);
    }
}
