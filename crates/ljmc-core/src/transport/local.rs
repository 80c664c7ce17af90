use super::{ParallelRuntime, TransportError};
use std::time::Instant;

/// Single-worker transport.
///
/// Rank 0 of a group of one: broadcasts and reductions are identity
/// pass-throughs, and point-to-point transfers fail because no peer exists.
#[derive(Debug)]
pub struct LocalTransport {
    started: Instant,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for LocalTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelRuntime for LocalTransport {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn broadcast(&mut self, _buffer: &mut [f64], root: usize) -> Result<(), TransportError> {
        if root != 0 {
            return Err(TransportError::RankOutOfRange { rank: root, size: 1 });
        }
        Ok(())
    }

    fn broadcast_index(&mut self, _value: &mut usize, root: usize) -> Result<(), TransportError> {
        if root != 0 {
            return Err(TransportError::RankOutOfRange { rank: root, size: 1 });
        }
        Ok(())
    }

    fn all_reduce_sum(&mut self, value: f64) -> Result<f64, TransportError> {
        Ok(value)
    }

    fn send(&mut self, _buffer: &[f64], _dest: usize, _tag: u32) -> Result<(), TransportError> {
        Err(TransportError::NoPeer)
    }

    fn recv(&mut self, _buffer: &mut [f64], _source: usize, _tag: u32) -> Result<(), TransportError> {
        Err(TransportError::NoPeer)
    }

    fn wall_time(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_leaves_the_buffer_untouched() {
        let mut transport = LocalTransport::new();
        let mut buffer = [1.0, 2.0, 3.0];
        transport.broadcast(&mut buffer, 0).unwrap();
        assert_eq!(buffer, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn broadcast_from_a_nonexistent_root_is_rejected() {
        let mut transport = LocalTransport::new();
        let mut buffer = [0.0];
        let result = transport.broadcast(&mut buffer, 1);
        assert!(matches!(
            result,
            Err(TransportError::RankOutOfRange { rank: 1, size: 1 })
        ));
    }

    #[test]
    fn all_reduce_of_one_worker_is_the_identity() {
        let mut transport = LocalTransport::new();
        assert_eq!(transport.all_reduce_sum(-2.5).unwrap(), -2.5);
    }

    #[test]
    fn point_to_point_has_no_peer() {
        let mut transport = LocalTransport::new();
        assert!(matches!(
            transport.send(&[1.0], 0, 7),
            Err(TransportError::NoPeer)
        ));
        let mut buffer = [0.0];
        assert!(matches!(
            transport.recv(&mut buffer, 0, 7),
            Err(TransportError::NoPeer)
        ));
    }

    #[test]
    fn wall_time_is_monotonic() {
        let transport = LocalTransport::new();
        let a = transport.wall_time();
        let b = transport.wall_time();
        assert!(b >= a);
    }
}
