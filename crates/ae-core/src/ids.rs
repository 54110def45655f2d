//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and in
//! sorted collections.  Ordering matters: the yield protocol breaks ties by
//! comparing `AgentId`s, and the session advances agents in ascending order.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// `false` only for the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// Identity of an embodied agent.  Unique per agent, stable for its lifetime.
    pub struct AgentId(u32);
}

typed_id! {
    /// Identity of a scene object (furniture, props, anything graspable).
    pub struct ObjectId(u32);
}

typed_id! {
    /// Identity of one rigid body part of an agent (a hand, a wheel, the pelvis…).
    pub struct BodyPartId(u32);
}

// ── QueryId ───────────────────────────────────────────────────────────────────

/// Identity of an outstanding overlap or path request.
///
/// Scoped to the issuing agent so that every Orchestrator can allocate ids
/// without a shared counter: two agents may both issue sequence number 4,
/// but `(AgentId(3), 4)` and `(AgentId(7), 4)` never collide.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryId {
    pub agent: AgentId,
    pub seq:   u32,
}

impl QueryId {
    #[inline]
    pub fn new(agent: AgentId, seq: u32) -> Self {
        Self { agent, seq }
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Query({}#{})", self.agent.0, self.seq)
    }
}
