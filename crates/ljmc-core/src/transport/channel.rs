use super::{ParallelRuntime, TransportError};
use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Instant;

/// Rank that gathers reduction contributions before fanning the total back
/// out.
const REDUCE_ROOT: usize = 0;

#[derive(Debug, Clone)]
enum Message {
    Broadcast(Vec<f64>),
    BroadcastIndex(usize),
    ReducePart { rank: usize, value: f64 },
    ReduceTotal(f64),
    PointToPoint {
        source: usize,
        tag: u32,
        payload: Vec<f64>,
    },
}

/// Constructor for a connected in-process worker group.
pub struct ChannelGroup;

impl ChannelGroup {
    /// Creates `size` connected endpoints, one per worker, rank = index.
    ///
    /// Each endpoint is `Send` and is meant to be moved into its worker's
    /// thread; the group is fully wired before any endpoint is handed out.
    pub fn connect(size: usize) -> Vec<ChannelTransport> {
        let (senders, receivers): (Vec<Sender<Message>>, Vec<Receiver<Message>>) =
            (0..size).map(|_| channel()).unzip();

        receivers
            .into_iter()
            .enumerate()
            .map(|(rank, inbox)| ChannelTransport {
                rank,
                size,
                peers: senders.clone(),
                inbox,
                pending: VecDeque::new(),
                started: Instant::now(),
            })
            .collect()
    }
}

/// One worker's endpoint of a [`ChannelGroup`].
///
/// Collectives block until every participating endpoint reaches the matching
/// call; messages that arrive ahead of what the worker is currently waiting
/// for are parked in a pending queue and matched later.
pub struct ChannelTransport {
    rank: usize,
    size: usize,
    peers: Vec<Sender<Message>>,
    inbox: Receiver<Message>,
    pending: VecDeque<Message>,
    started: Instant,
}

impl ChannelTransport {
    fn post(&self, dest: usize, message: Message) -> Result<(), TransportError> {
        self.peers[dest]
            .send(message)
            .map_err(|_| TransportError::Disconnected)
    }

    /// Returns the first queued or incoming message matching `want`; parks
    /// everything else in arrival order.
    fn take(
        &mut self,
        want: impl Fn(&Message) -> bool,
    ) -> Result<Message, TransportError> {
        if let Some(index) = self.pending.iter().position(&want) {
            return Ok(self.pending.remove(index).expect("index just found"));
        }
        loop {
            let message = self
                .inbox
                .recv()
                .map_err(|_| TransportError::Disconnected)?;
            if want(&message) {
                return Ok(message);
            }
            self.pending.push_back(message);
        }
    }

    fn check_root(&self, root: usize) -> Result<(), TransportError> {
        if root >= self.size {
            return Err(TransportError::RankOutOfRange {
                rank: root,
                size: self.size,
            });
        }
        Ok(())
    }
}

impl ParallelRuntime for ChannelTransport {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn broadcast(&mut self, buffer: &mut [f64], root: usize) -> Result<(), TransportError> {
        self.check_root(root)?;
        if self.rank == root {
            for dest in 0..self.size {
                if dest != root {
                    self.post(dest, Message::Broadcast(buffer.to_vec()))?;
                }
            }
            return Ok(());
        }

        let message = self.take(|m| matches!(m, Message::Broadcast(_)))?;
        let Message::Broadcast(payload) = message else {
            unreachable!("take() matched on Broadcast");
        };
        if payload.len() != buffer.len() {
            return Err(TransportError::Broadcast {
                root,
                reason: format!(
                    "buffer length mismatch: sent {}, expected {}",
                    payload.len(),
                    buffer.len()
                ),
            });
        }
        buffer.copy_from_slice(&payload);
        Ok(())
    }

    fn broadcast_index(&mut self, value: &mut usize, root: usize) -> Result<(), TransportError> {
        self.check_root(root)?;
        if self.rank == root {
            for dest in 0..self.size {
                if dest != root {
                    self.post(dest, Message::BroadcastIndex(*value))?;
                }
            }
            return Ok(());
        }

        let message = self.take(|m| matches!(m, Message::BroadcastIndex(_)))?;
        let Message::BroadcastIndex(received) = message else {
            unreachable!("take() matched on BroadcastIndex");
        };
        *value = received;
        Ok(())
    }

    fn all_reduce_sum(&mut self, value: f64) -> Result<f64, TransportError> {
        if self.size == 1 {
            return Ok(value);
        }

        if self.rank == REDUCE_ROOT {
            let mut parts: Vec<Option<f64>> = vec![None; self.size];
            parts[self.rank] = Some(value);
            for _ in 0..self.size - 1 {
                let message = self.take(|m| matches!(m, Message::ReducePart { .. }))?;
                let Message::ReducePart { rank, value } = message else {
                    unreachable!("take() matched on ReducePart");
                };
                if parts[rank].replace(value).is_some() {
                    return Err(TransportError::AllReduce {
                        rank: self.rank,
                        reason: format!("duplicate contribution from rank {rank}"),
                    });
                }
            }
            // Fold in rank order so the total does not depend on message
            // arrival order.
            let mut total = 0.0;
            for (rank, part) in parts.iter().enumerate() {
                total += part.ok_or_else(|| TransportError::AllReduce {
                    rank: self.rank,
                    reason: format!("missing contribution from rank {rank}"),
                })?;
            }
            for dest in 0..self.size {
                if dest != REDUCE_ROOT {
                    self.post(dest, Message::ReduceTotal(total))?;
                }
            }
            Ok(total)
        } else {
            self.post(
                REDUCE_ROOT,
                Message::ReducePart {
                    rank: self.rank,
                    value,
                },
            )?;
            let message = self.take(|m| matches!(m, Message::ReduceTotal(_)))?;
            let Message::ReduceTotal(total) = message else {
                unreachable!("take() matched on ReduceTotal");
            };
            Ok(total)
        }
    }

    fn send(&mut self, buffer: &[f64], dest: usize, tag: u32) -> Result<(), TransportError> {
        if dest >= self.size {
            return Err(TransportError::RankOutOfRange {
                rank: dest,
                size: self.size,
            });
        }
        self.post(
            dest,
            Message::PointToPoint {
                source: self.rank,
                tag,
                payload: buffer.to_vec(),
            },
        )
    }

    fn recv(&mut self, buffer: &mut [f64], source: usize, tag: u32) -> Result<(), TransportError> {
        if source >= self.size {
            return Err(TransportError::RankOutOfRange {
                rank: source,
                size: self.size,
            });
        }
        let message = self.take(|m| {
            matches!(
                m,
                Message::PointToPoint { source: s, tag: t, .. } if *s == source && *t == tag
            )
        })?;
        let Message::PointToPoint { payload, .. } = message else {
            unreachable!("take() matched on PointToPoint");
        };
        if payload.len() != buffer.len() {
            return Err(TransportError::PointToPoint {
                from: source,
                dest: self.rank,
                tag,
                reason: format!(
                    "buffer length mismatch: sent {}, expected {}",
                    payload.len(),
                    buffer.len()
                ),
            });
        }
        buffer.copy_from_slice(&payload);
        Ok(())
    }

    fn wall_time(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}
