//! Scoped restoration of [`CollisionDetection`] mutations.
//!
//! An action that disables avoidance or excludes held objects records the
//! change in its lease.  When the action is finalized the lease is released,
//! putting back exactly what it changed:
//!
//! - `avoid` returns to the value it had before the *first* change made
//!   through this lease, however many times it was toggled since.
//! - Exclusions the lease added are removed; exclusions that were already
//!   present stay.
//!
//! The policy itself is owned by the Orchestrator and lent to the action one
//! tick at a time, so the lease stores the undo record rather than a borrow.

use ae_core::ObjectId;

use crate::CollisionDetection;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PolicyLease {
    saved_avoid: Option<bool>,
    added:       Vec<ObjectId>,
}

impl PolicyLease {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `policy.avoid`, remembering the original value on first use.
    pub fn set_avoid(&mut self, policy: &mut CollisionDetection, avoid: bool) {
        if self.saved_avoid.is_none() {
            self.saved_avoid = Some(policy.avoid);
        }
        policy.avoid = avoid;
    }

    /// Add `object` to the exclusion set unless it is already there.
    pub fn exclude(&mut self, policy: &mut CollisionDetection, object: ObjectId) {
        if policy.exclude_objects.insert(object) {
            self.added.push(object);
        }
    }

    pub fn exclude_all(&mut self, policy: &mut CollisionDetection, objects: impl IntoIterator<Item = ObjectId>) {
        for object in objects {
            self.exclude(policy, object);
        }
    }

    /// Undo everything recorded.  Releasing an empty lease is a no-op, so
    /// calling this twice is harmless.
    pub fn release(&mut self, policy: &mut CollisionDetection) {
        if let Some(avoid) = self.saved_avoid.take() {
            policy.avoid = avoid;
        }
        for object in self.added.drain(..) {
            policy.exclude_objects.remove(&object);
        }
    }

    /// `true` while the lease holds changes that have not been released.
    pub fn is_held(&self) -> bool {
        self.saved_avoid.is_some() || !self.added.is_empty()
    }
}
