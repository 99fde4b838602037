use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two parallel frame faces a member belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameFace {
    Front,
    Back,
}

impl FrameFace {
    /// Label prefix shared by every member of this face, e.g. `front_`.
    pub fn prefix(&self) -> &'static str {
        match self {
            FrameFace::Front => "front_",
            FrameFace::Back => "back_",
        }
    }

    /// Label of the sub-assembly holding this face's members.
    pub fn assembly_label(&self) -> &'static str {
        match self {
            FrameFace::Front => "front_frame",
            FrameFace::Back => "back_frame",
        }
    }
}

/// Height at which a group of bridges joins the two faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BridgeLevel {
    Bottom,
    Top,
}

impl BridgeLevel {
    pub fn name(&self) -> &'static str {
        match self {
            BridgeLevel::Bottom => "bottom",
            BridgeLevel::Top => "top",
        }
    }

    /// Label of the `index`-th bridge (1-based), e.g. `bottom_bridge_2`.
    pub fn member_label(&self, index: usize) -> String {
        format!("{}_bridge_{}", self.name(), index)
    }
}

impl fmt::Display for BridgeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural role of a member, which also decides its cut length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    /// Upright between the top and bottom horizontals of one face.
    Vertical,
    /// Full-width rail at the top or bottom of one face.
    Horizontal,
    /// Strut running along the depth between the two faces.
    Bridge,
}

impl MemberKind {
    pub const ALL: [MemberKind; 3] = [
        MemberKind::Vertical,
        MemberKind::Horizontal,
        MemberKind::Bridge,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MemberKind::Vertical => "vertical",
            MemberKind::Horizontal => "horizontal",
            MemberKind::Bridge => "bridge",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
