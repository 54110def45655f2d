//! Body descriptors shared by every crate: how an agent moves and which arm
//! an arm action addresses.

/// The locomotion rig of an agent.  Decides which actuation commands a
/// motion action emits.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Locomotion {
    /// Walks by playing root-motion animations.
    #[default]
    Legged,
    /// Sits in a wheelchair driven by rear-wheel motor and brake torques.
    Wheelchair,
}

impl Locomotion {
    /// Human-readable label, used in logs and CSV traces.
    pub fn as_str(self) -> &'static str {
        match self {
            Locomotion::Legged     => "legged",
            Locomotion::Wheelchair => "wheelchair",
        }
    }
}

impl std::fmt::Display for Locomotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the agent's two arms.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Arm {
    Left,
    Right,
}

impl Arm {
    pub const BOTH: [Arm; 2] = [Arm::Left, Arm::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Arm::Left  => "left",
            Arm::Right => "right",
        }
    }
}

impl std::fmt::Display for Arm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
