use nalgebra::{Point3, Vector3};

/// The full set of particle positions, every component inside the canonical
/// periodic cell.
///
/// Each worker holds a complete replica. Replicas are kept consistent purely
/// by broadcast from the coordinator; workers never mutate their copy on
/// their own, so the flat-buffer conversions below are the only way state
/// crosses the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateState {
    positions: Vec<Point3<f64>>,
}

impl CoordinateState {
    pub fn new(positions: Vec<Point3<f64>>) -> Self {
        Self { positions }
    }

    /// A zeroed replica of the given size, used as a broadcast receive buffer.
    pub fn zeroed(count: usize) -> Self {
        Self {
            positions: vec![Point3::origin(); count],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn position(&self, particle: usize) -> &Point3<f64> {
        &self.positions[particle]
    }

    pub fn set_position(&mut self, particle: usize, position: Point3<f64>) {
        self.positions[particle] = position;
    }

    /// Serializes the replica into a flat `[x0, y0, z0, x1, ...]` buffer for
    /// a collective transfer.
    pub fn write_flat(&self, buffer: &mut [f64]) {
        debug_assert_eq!(buffer.len(), 3 * self.positions.len());
        for (chunk, p) in buffer.chunks_exact_mut(3).zip(&self.positions) {
            chunk[0] = p.x;
            chunk[1] = p.y;
            chunk[2] = p.z;
        }
    }

    /// Overwrites the replica wholesale from a flat buffer received over the
    /// transport.
    pub fn read_flat(&mut self, buffer: &[f64]) {
        debug_assert_eq!(buffer.len(), 3 * self.positions.len());
        for (chunk, p) in buffer.chunks_exact(3).zip(&mut self.positions) {
            *p = Point3::new(chunk[0], chunk[1], chunk[2]);
        }
    }
}

/// A single trial move: which particle to displace and by how much.
///
/// Drawn once per step by the coordinator and broadcast; no other worker
/// ever regenerates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveProposal {
    pub particle: usize,
    pub displacement: Vector3<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_round_trip_preserves_every_component() {
        let state = CoordinateState::new(vec![
            Point3::new(0.1, -0.2, 0.3),
            Point3::new(1.5, 2.5, -3.5),
        ]);
        let mut buffer = vec![0.0; 6];
        state.write_flat(&mut buffer);
        assert_eq!(buffer, vec![0.1, -0.2, 0.3, 1.5, 2.5, -3.5]);

        let mut replica = CoordinateState::zeroed(2);
        replica.read_flat(&buffer);
        assert_eq!(replica, state);
    }

    #[test]
    fn zeroed_replica_has_requested_size_at_origin() {
        let state = CoordinateState::zeroed(4);
        assert_eq!(state.len(), 4);
        assert!(state.positions().iter().all(|p| *p == Point3::origin()));
    }

    #[test]
    fn set_position_replaces_only_the_targeted_particle() {
        let mut state = CoordinateState::zeroed(3);
        state.set_position(1, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(*state.position(0), Point3::origin());
        assert_eq!(*state.position(1), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(*state.position(2), Point3::origin());
    }
}
