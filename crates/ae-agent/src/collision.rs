//! The per-agent collision detection policy.
//!
//! # Fields and defaults
//!
//! | Field               | Default | Effect when set                                         |
//! |---------------------|---------|---------------------------------------------------------|
//! | `walls`             | `true`  | wall contacts end motion with `collision`               |
//! | `floor`             | `false` | floor contacts end motion with `collision`              |
//! | `objects`           | `true`  | object and peer-agent contacts end motion               |
//! | `avoid`             | `true`  | cast an overlap box ahead; hits end with `detected_obstacle` |
//! | `previous_was_same` | `true`  | repeating a move that just collided fails immediately   |
//! | `exclude_objects`   | empty   | never counted, for contacts or overlaps                 |
//! | `include_objects`   | empty   | always counted, even with `objects == false`            |
//!
//! The Orchestrator owns the policy for the agent's lifetime and lends it to
//! the active action every tick.  Actions that change it do so through a
//! [`PolicyLease`][crate::PolicyLease].

use std::collections::BTreeSet;

use ae_command::{Contact, OverlapResult};
use ae_core::ObjectId;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CollisionDetection {
    pub walls:             bool,
    pub floor:             bool,
    pub objects:           bool,
    pub avoid:             bool,
    pub previous_was_same: bool,
    pub exclude_objects:   BTreeSet<ObjectId>,
    pub include_objects:   BTreeSet<ObjectId>,
}

impl Default for CollisionDetection {
    fn default() -> Self {
        Self {
            walls:             true,
            floor:             false,
            objects:           true,
            avoid:             true,
            previous_was_same: true,
            exclude_objects:   BTreeSet::new(),
            include_objects:   BTreeSet::new(),
        }
    }
}

impl CollisionDetection {
    /// A policy that ignores every contact and never casts overlaps.
    pub fn none() -> Self {
        Self {
            walls:             false,
            floor:             false,
            objects:           false,
            avoid:             false,
            previous_was_same: false,
            exclude_objects:   BTreeSet::new(),
            include_objects:   BTreeSet::new(),
        }
    }

    /// Whether a contact of this kind should interrupt motion.
    pub fn counts(&self, contact: Contact) -> bool {
        match contact {
            Contact::Environment { floor: true }  => self.floor,
            Contact::Environment { floor: false } => self.walls,
            Contact::Object(id) => {
                self.include_objects.contains(&id)
                    || (self.objects && !self.exclude_objects.contains(&id))
            }
            Contact::Agent(_) => self.objects,
        }
    }

    /// Whether an overlap reply shows something in the way.
    ///
    /// Walls always count; objects count unless excluded; peer agents count.
    pub fn is_obstructed(&self, overlap: &OverlapResult) -> bool {
        overlap.walls
            || !overlap.agents.is_empty()
            || overlap.objects.iter().any(|id| !self.exclude_objects.contains(id))
    }
}
