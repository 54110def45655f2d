//! The multi-agent yield rule.
//!
//! When two navigating agents come within `distance` of each other, the one
//! with the numerically lower [`AgentId`] yields and the other carries on.
//! Both agents evaluate the rule independently from the same read-only
//! positions, so exactly one of any close pair backs off.
//!
//! Known limitation: the rule is not starvation-free.  An agent that keeps
//! re-entering proximity with the same higher-id peer yields every time.

use ae_core::{AgentId, Vec3};

use crate::PeerIndex;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct YieldRule {
    pub distance: f32,
}

impl YieldRule {
    pub fn new(distance: f32) -> Self {
        Self { distance }
    }

    /// The nearest higher-id peer within range, if `me` must yield to one.
    pub fn yield_to(&self, me: AgentId, position: Vec3, peers: &PeerIndex) -> Option<AgentId> {
        peers
            .others_within(me, position, self.distance)
            .into_iter()
            .find(|&(peer, _)| peer > me)
            .map(|(peer, _)| peer)
    }
}
