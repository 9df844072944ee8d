//! Host callback contracts and the deferred-commit plumbing.
//!
//! The engine calls into exactly three host hooks: synchronous drop
//! validation, asynchronous position commits, and click selection. It never
//! mutates slot records itself; the host is the single source of truth and
//! re-supplies updated data once a commit is accepted.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

#[cfg(test)]
use mockall::automock;

/// The callbacks a host supplies to the board.
#[cfg_attr(test, automock)]
pub trait SchedulerHost {
    /// Decide whether `slot_id` may rest at `candidate_start` in `lane_id`.
    ///
    /// Runs on every pointer move, potentially dozens of times per second:
    /// keep it cheap, synchronous, and free of I/O. A slow implementation
    /// degrades drag smoothness but cannot corrupt state.
    fn validate_drop(&self, slot_id: &str, candidate_start: &str, lane_id: &str) -> bool;

    /// Accept or reject a dropped position change. Called at most once per
    /// drag, and only when the drop is valid and actually moves the slot.
    ///
    /// The returned ticket resolves later with the host's verdict. The board
    /// keeps rendering the slot at its old position until the host re-supplies
    /// updated slot data, so a rejected or forever-pending commit simply
    /// leaves the board unchanged.
    fn commit_position(&mut self, slot_id: &str, new_start: &str, new_lane_id: &str)
        -> CommitTicket;

    /// A click on a slot that never became a drag.
    fn on_select(&mut self, slot_id: &str);
}

/// Deferred boolean verdict of a `commit_position` call.
pub struct CommitTicket {
    rx: Receiver<bool>,
}

/// Host-side handle used to resolve a pending [`CommitTicket`].
pub struct CommitResolver {
    tx: Sender<bool>,
}

impl CommitTicket {
    /// A ticket the host resolves later, e.g. from a worker thread once its
    /// backend answers.
    pub fn pending() -> (Self, CommitResolver) {
        let (tx, rx) = mpsc::channel();
        (Self { rx }, CommitResolver { tx })
    }

    /// A ticket that already carries its verdict, for hosts that decide
    /// synchronously.
    pub fn resolved(accepted: bool) -> Self {
        let (ticket, resolver) = Self::pending();
        resolver.resolve(accepted);
        ticket
    }

    fn poll(&self) -> CommitPoll {
        match self.rx.try_recv() {
            Ok(accepted) => CommitPoll::Resolved(accepted),
            Err(TryRecvError::Empty) => CommitPoll::Pending,
            Err(TryRecvError::Disconnected) => CommitPoll::Abandoned,
        }
    }
}

impl CommitResolver {
    pub fn resolve(self, accepted: bool) {
        // The board may have been torn down while the host was deciding.
        let _ = self.tx.send(accepted);
    }
}

enum CommitPoll {
    Pending,
    Resolved(bool),
    Abandoned,
}

/// How a tracked commit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Accepted,
    Rejected,
    /// The host dropped its resolver without answering.
    Abandoned,
}

/// A commit that finished this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitResolution {
    pub slot_id: String,
    pub start_time: String,
    pub lane_id: String,
    pub outcome: CommitOutcome,
}

struct InFlightCommit {
    slot_id: String,
    start_time: String,
    lane_id: String,
    ticket: CommitTicket,
}

/// Outstanding `commit_position` calls, polled without blocking each frame.
///
/// There is no timeout: a permanently pending commit leaves its slot at the
/// pre-drag position indefinitely. New drags may start while commits are
/// still resolving; serializing conflicting commits is the host's concern.
#[derive(Default)]
pub struct PendingCommits {
    in_flight: Vec<InFlightCommit>,
}

impl PendingCommits {
    pub fn track(
        &mut self,
        slot_id: String,
        start_time: String,
        lane_id: String,
        ticket: CommitTicket,
    ) {
        self.in_flight.push(InFlightCommit {
            slot_id,
            start_time,
            lane_id,
            ticket,
        });
    }

    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Drain every ticket that resolved since the last poll.
    pub fn poll(&mut self) -> Vec<CommitResolution> {
        let mut resolutions = Vec::new();
        self.in_flight.retain(|commit| {
            let outcome = match commit.ticket.poll() {
                CommitPoll::Pending => return true,
                CommitPoll::Resolved(true) => {
                    log::info!(
                        "commit accepted: slot {} -> {} in lane {}",
                        commit.slot_id,
                        commit.start_time,
                        commit.lane_id
                    );
                    CommitOutcome::Accepted
                }
                CommitPoll::Resolved(false) => {
                    log::warn!(
                        "commit rejected: slot {} stays at its previous position",
                        commit.slot_id
                    );
                    CommitOutcome::Rejected
                }
                CommitPoll::Abandoned => {
                    log::warn!(
                        "commit abandoned: host dropped the resolver for slot {}",
                        commit.slot_id
                    );
                    CommitOutcome::Abandoned
                }
            };
            resolutions.push(CommitResolution {
                slot_id: commit.slot_id.clone(),
                start_time: commit.start_time.clone(),
                lane_id: commit.lane_id.clone(),
                outcome,
            });
            false
        });
        resolutions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(commits: &mut PendingCommits, slot_id: &str, ticket: CommitTicket) {
        commits.track(slot_id.into(), "10:30".into(), "L2".into(), ticket);
    }

    #[test]
    fn test_resolved_ticket_drains_immediately() {
        let mut commits = PendingCommits::default();
        track(&mut commits, "s1", CommitTicket::resolved(true));

        let resolutions = commits.poll();
        assert_eq!(resolutions.len(), 1);
        assert_eq!(resolutions[0].slot_id, "s1");
        assert_eq!(resolutions[0].outcome, CommitOutcome::Accepted);
        assert!(commits.is_empty());
    }

    #[test]
    fn test_pending_ticket_stays_tracked() {
        let mut commits = PendingCommits::default();
        let (ticket, resolver) = CommitTicket::pending();
        track(&mut commits, "s1", ticket);

        assert!(commits.poll().is_empty());
        assert_eq!(commits.len(), 1);

        resolver.resolve(false);
        let resolutions = commits.poll();
        assert_eq!(resolutions[0].outcome, CommitOutcome::Rejected);
        assert!(commits.is_empty());
    }

    #[test]
    fn test_dropped_resolver_is_abandoned() {
        let mut commits = PendingCommits::default();
        let (ticket, resolver) = CommitTicket::pending();
        track(&mut commits, "s1", ticket);
        drop(resolver);

        let resolutions = commits.poll();
        assert_eq!(resolutions[0].outcome, CommitOutcome::Abandoned);
        assert!(commits.is_empty());
    }

    #[test]
    fn test_independent_commits_resolve_independently() {
        let mut commits = PendingCommits::default();
        let (slow, slow_resolver) = CommitTicket::pending();
        track(&mut commits, "s1", slow);
        track(&mut commits, "s2", CommitTicket::resolved(true));

        let first = commits.poll();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].slot_id, "s2");
        assert_eq!(commits.len(), 1);

        slow_resolver.resolve(true);
        let second = commits.poll();
        assert_eq!(second[0].slot_id, "s1");
    }
}
