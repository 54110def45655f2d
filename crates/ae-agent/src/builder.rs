//! Fluent builder for [`AgentStatic`].
//!
//! # Usage
//!
//! ```rust
//! use ae_agent::AgentStaticBuilder;
//! use ae_core::{AgentId, Arm, BodyPartId, Locomotion};
//!
//! let agent = AgentStaticBuilder::new(AgentId(3), Locomotion::Wheelchair)
//!     .name("ada")
//!     .body_parts([BodyPartId(30), BodyPartId(31), BodyPartId(32)])
//!     .hand(Arm::Left, BodyPartId(31))
//!     .hand(Arm::Right, BodyPartId(32))
//!     .build();
//!
//! assert_eq!(agent.body_parts().len(), 3);
//! assert_eq!(agent.hand(Arm::Right), Some(BodyPartId(32)));
//! ```

use ae_core::{AgentId, Arm, BodyPartId, Locomotion};

use crate::AgentStatic;

const DEFAULT_RADIUS: f32 = 0.3;

pub struct AgentStaticBuilder {
    inner: AgentStatic,
}

impl AgentStaticBuilder {
    pub fn new(id: AgentId, locomotion: Locomotion) -> Self {
        Self {
            inner: AgentStatic {
                id,
                name:       format!("agent_{}", id.0),
                locomotion,
                body_parts: Vec::new(),
                left_hand:  None,
                right_hand: None,
                radius:     DEFAULT_RADIUS,
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = name.into();
        self
    }

    pub fn body_parts(mut self, parts: impl IntoIterator<Item = BodyPartId>) -> Self {
        self.inner.body_parts.extend(parts);
        self
    }

    /// Declare `part` as `arm`'s hand.  The part is also added to the body
    /// part list if missing.
    pub fn hand(mut self, arm: Arm, part: BodyPartId) -> Self {
        if !self.inner.body_parts.contains(&part) {
            self.inner.body_parts.push(part);
        }
        match arm {
            Arm::Left  => self.inner.left_hand = Some(part),
            Arm::Right => self.inner.right_hand = Some(part),
        }
        self
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.inner.radius = radius;
        self
    }

    pub fn build(self) -> AgentStatic {
        self.inner
    }
}
