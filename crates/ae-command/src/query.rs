//! Pending-request table for one agent's overlap and path queries.
//!
//! Requests go out in a command batch; replies come back in a later tick's
//! telemetry tagged with the same [`QueryId`].  The table is plain data: an
//! Orchestrator can list what is outstanding and how long it has waited.

use std::collections::BTreeMap;

use ae_core::{AgentId, QueryId, Tick};

use crate::{OverlapResult, PathResult, TickTelemetry};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QueryKind {
    Overlap,
    Path,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingQuery {
    pub kind:      QueryKind,
    pub issued_at: Tick,
}

/// Outstanding queries of one agent, keyed by id.
#[derive(Debug, Clone)]
pub struct PendingQueries {
    agent:    AgentId,
    next_seq: u32,
    pending:  BTreeMap<QueryId, PendingQuery>,
}

impl PendingQueries {
    pub fn new(agent: AgentId) -> Self {
        Self { agent, next_seq: 0, pending: BTreeMap::new() }
    }

    #[inline]
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    /// Allocate a fresh id and record it as pending.
    pub fn issue(&mut self, kind: QueryKind, now: Tick) -> QueryId {
        let id = QueryId::new(self.agent, self.next_seq);
        self.next_seq = self.next_seq.wrapping_add(1);
        self.pending.insert(id, PendingQuery { kind, issued_at: now });
        id
    }

    /// Take the overlap reply for `id` from `telemetry`, if it has arrived.
    ///
    /// A delivered query leaves the table.  Undelivered ones stay pending.
    ///
    /// # Panics
    /// If `id` was issued by another agent or is not an overlap query.
    pub fn overlap<'t>(&mut self, id: QueryId, telemetry: &'t TickTelemetry) -> Option<&'t OverlapResult> {
        self.check(id, QueryKind::Overlap);
        let result = telemetry.overlap(id)?;
        self.pending.remove(&id);
        Some(result)
    }

    /// Take the path reply for `id` from `telemetry`, if it has arrived.
    ///
    /// # Panics
    /// If `id` was issued by another agent or is not a path query.
    pub fn path<'t>(&mut self, id: QueryId, telemetry: &'t TickTelemetry) -> Option<&'t PathResult> {
        self.check(id, QueryKind::Path);
        let result = telemetry.path(id)?;
        self.pending.remove(&id);
        Some(result)
    }

    /// Forget a query whose reply is no longer wanted.  Returns whether it
    /// was still pending.
    pub fn cancel(&mut self, id: QueryId) -> bool {
        self.pending.remove(&id).is_some()
    }

    #[inline]
    pub fn is_pending(&self, id: QueryId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Ticks `id` has been waiting at `now`.
    pub fn age(&self, id: QueryId, now: Tick) -> Option<u64> {
        self.pending.get(&id).map(|p| now.since(p.issued_at))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QueryId, &PendingQuery)> {
        self.pending.iter()
    }

    fn check(&self, id: QueryId, kind: QueryKind) {
        assert_eq!(id.agent, self.agent, "{id} does not belong to {}", self.agent);
        if let Some(p) = self.pending.get(&id) {
            assert_eq!(p.kind, kind, "{id} is a {:?} query", p.kind);
        }
    }
}
