//! Immutable per-agent capabilities.

use ae_core::{AgentId, Arm, BodyPartId, Locomotion};

/// Capabilities fixed at spawn.  Build with
/// [`AgentStaticBuilder`][crate::AgentStaticBuilder].
///
/// Fields are private: nothing after construction may change them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStatic {
    pub(crate) id:         AgentId,
    pub(crate) name:       String,
    pub(crate) locomotion: Locomotion,
    pub(crate) body_parts: Vec<BodyPartId>,
    pub(crate) left_hand:  Option<BodyPartId>,
    pub(crate) right_hand: Option<BodyPartId>,
    pub(crate) radius:     f32,
}

impl AgentStatic {
    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn locomotion(&self) -> Locomotion {
        self.locomotion
    }

    pub fn body_parts(&self) -> &[BodyPartId] {
        &self.body_parts
    }

    /// The body part acting as `arm`'s hand, if the rig has one.
    pub fn hand(&self, arm: Arm) -> Option<BodyPartId> {
        match arm {
            Arm::Left  => self.left_hand,
            Arm::Right => self.right_hand,
        }
    }

    /// `true` if `part` belongs to this agent.
    pub fn owns(&self, part: BodyPartId) -> bool {
        self.body_parts.contains(&part)
    }

    /// Footprint radius on the floor plane, metres.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// `true` if at least one hand is declared.
    pub fn has_arms(&self) -> bool {
        self.left_hand.is_some() || self.right_hand.is_some()
    }
}
