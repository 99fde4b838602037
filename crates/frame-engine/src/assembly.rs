//! The labeled assembly tree produced by the frame assembler.

use frame_types::{BoundingBox, MemberKind, Placement};
use profile_kernel::KernelSolidHandle;
use profile_ops::Extrusion;
use serde::Serialize;

/// Label of the root assembly.
pub const ROOT_LABEL: &str = "pc_frame";

/// An extruded shape shared by every member placed from it.
///
/// The kernel never modifies a solid after creation, so placing a template
/// only copies its handle into a new [`Member`].
#[derive(Debug, Clone)]
pub struct MemberTemplate {
    pub kind: MemberKind,
    pub extrusion: Extrusion,
}

impl MemberTemplate {
    pub fn new(kind: MemberKind, extrusion: Extrusion) -> Self {
        Self { kind, extrusion }
    }

    pub fn length(&self) -> f64 {
        self.extrusion.length
    }

    /// Create an independently owned member at `placement`.
    pub fn instantiate(&self, label: impl Into<String>, placement: Placement) -> Member {
        Member {
            label: label.into(),
            kind: self.kind,
            length: self.extrusion.length,
            placement,
            shape: self.extrusion.handle.clone(),
            local_bounds: self.extrusion.bounds,
        }
    }
}

/// One positioned extrusion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub label: String,
    pub kind: MemberKind,
    pub length: f64,
    pub placement: Placement,
    /// Session-local solid in the kernel that produced it.
    #[serde(rename = "shape_id")]
    pub shape: KernelSolidHandle,
    /// Bounds of the shape in its own frame, before placement.
    pub local_bounds: BoundingBox,
}

impl Member {
    /// Bounds in assembly coordinates.
    pub fn world_bounds(&self) -> BoundingBox {
        self.placement.transform_bounds(&self.local_bounds)
    }
}

/// A child of an assembly: a nested assembly or a leaf member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum AssemblyNode {
    Assembly(SubAssembly),
    Member(Member),
}

impl AssemblyNode {
    pub fn label(&self) -> &str {
        match self {
            AssemblyNode::Assembly(a) => &a.label,
            AssemblyNode::Member(m) => &m.label,
        }
    }
}

/// A labeled group of nodes, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubAssembly {
    pub label: String,
    pub children: Vec<AssemblyNode>,
}

impl SubAssembly {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn push_member(&mut self, member: Member) {
        self.children.push(AssemblyNode::Member(member));
    }

    pub fn push_assembly(&mut self, assembly: SubAssembly) {
        self.children.push(AssemblyNode::Assembly(assembly));
    }

    /// Leaf members in depth-first insertion order.
    pub fn members(&self) -> Vec<&Member> {
        let mut out = Vec::new();
        self.collect_members(&mut out);
        out
    }

    fn collect_members<'a>(&'a self, out: &mut Vec<&'a Member>) {
        for child in &self.children {
            match child {
                AssemblyNode::Assembly(a) => a.collect_members(out),
                AssemblyNode::Member(m) => out.push(m),
            }
        }
    }

    /// Deep copy with every label's `from` prefix swapped for `to` and every
    /// member moved by the given offsets. Rotations are unchanged.
    pub fn relabeled_copy(&self, from: &str, to: &str, dx: f64, dy: f64, dz: f64) -> SubAssembly {
        SubAssembly {
            label: swap_prefix(&self.label, from, to),
            children: self
                .children
                .iter()
                .map(|child| match child {
                    AssemblyNode::Assembly(a) => {
                        AssemblyNode::Assembly(a.relabeled_copy(from, to, dx, dy, dz))
                    }
                    AssemblyNode::Member(m) => AssemblyNode::Member(Member {
                        label: swap_prefix(&m.label, from, to),
                        placement: m.placement.translated(dx, dy, dz),
                        ..m.clone()
                    }),
                })
                .collect(),
        }
    }

    fn write_topology(&self, depth: usize, out: &mut String) {
        out.push_str(&format!("{}{}/\n", "  ".repeat(depth), self.label));
        for child in &self.children {
            match child {
                AssemblyNode::Assembly(a) => a.write_topology(depth + 1, out),
                AssemblyNode::Member(m) => {
                    let p = m.placement.position;
                    let r = m.placement.orientation;
                    out.push_str(&format!(
                        "{}{} [{}] {:.1}mm at ({:.1}, {:.1}, {:.1}) rot ({:.0}, {:.0}, {:.0})\n",
                        "  ".repeat(depth + 1),
                        m.label,
                        m.kind,
                        m.length,
                        p.x,
                        p.y,
                        p.z,
                        r.x_deg,
                        r.y_deg,
                        r.z_deg
                    ));
                }
            }
        }
    }
}

fn swap_prefix(label: &str, from: &str, to: &str) -> String {
    match label.strip_prefix(from) {
        Some(rest) => format!("{}{}", to, rest),
        None => label.to_string(),
    }
}

/// The complete frame: root `pc_frame` holding both faces and the bridges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssemblyTree {
    pub root: SubAssembly,
}

impl AssemblyTree {
    pub fn new(root: SubAssembly) -> Self {
        Self { root }
    }

    pub fn label(&self) -> &str {
        &self.root.label
    }

    /// Labels of the root's direct children, in order.
    pub fn child_labels(&self) -> Vec<&str> {
        self.root.children.iter().map(AssemblyNode::label).collect()
    }

    pub fn find_assembly(&self, label: &str) -> Option<&SubAssembly> {
        self.root.children.iter().find_map(|child| match child {
            AssemblyNode::Assembly(a) if a.label == label => Some(a),
            _ => None,
        })
    }

    /// All leaf members in traversal order.
    pub fn members(&self) -> Vec<&Member> {
        self.root.members()
    }

    pub fn find_member(&self, label: &str) -> Option<&Member> {
        self.members().into_iter().find(|m| m.label == label)
    }

    pub fn member_count(&self) -> usize {
        self.members().len()
    }

    /// Sum of member lengths, accumulated in traversal order.
    pub fn total_member_length(&self) -> f64 {
        self.members().iter().map(|m| m.length).sum()
    }

    /// Union of every member's placed bounds.
    pub fn world_bounds(&self) -> BoundingBox {
        self.members()
            .iter()
            .fold(BoundingBox::empty(), |acc, m| acc.union(&m.world_bounds()))
    }

    /// Indented text rendering of the tree.
    pub fn show_topology(&self) -> String {
        let mut out = String::new();
        self.root.write_topology(0, &mut out);
        out
    }

    /// Serialize for a viewer. Shape ids are only meaningful while the
    /// kernel session that produced them is alive.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
