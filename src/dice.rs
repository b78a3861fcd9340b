//! The die type registry.
//!
//! One declarative [`DieSpec`] per physical die kind bundles its geometry
//! builder, face-grouping strategy, and face-to-value labeling. Dispatch is
//! a static table of records holding function fields, selected by die tag;
//! there is no per-kind type hierarchy.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::{
    convex_args, group_by_normal, group_kite_faces, ConvexArgs, FaceGroup, MeshData,
};

/// A die as the user selects it. `D100` is the percentile composite and
/// expands to a tens/units pair of physical dice in the tray.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DieKind {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl DieKind {
    pub const ALL: [DieKind; 7] = [
        DieKind::D4,
        DieKind::D6,
        DieKind::D8,
        DieKind::D10,
        DieKind::D12,
        DieKind::D20,
        DieKind::D100,
    ];

    pub fn max_value(&self) -> u32 {
        match self {
            DieKind::D4 => 4,
            DieKind::D6 => 6,
            DieKind::D8 => 8,
            DieKind::D10 => 10,
            DieKind::D12 => 12,
            DieKind::D20 => 20,
            DieKind::D100 => 100,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DieKind::D4 => "D4",
            DieKind::D6 => "D6",
            DieKind::D8 => "D8",
            DieKind::D10 => "D10",
            DieKind::D12 => "D12",
            DieKind::D20 => "D20",
            DieKind::D100 => "D100",
        }
    }

    pub fn parse(s: &str) -> Option<DieKind> {
        match s.to_lowercase().as_str() {
            "d4" => Some(DieKind::D4),
            "d6" => Some(DieKind::D6),
            "d8" => Some(DieKind::D8),
            "d10" => Some(DieKind::D10),
            "d12" => Some(DieKind::D12),
            "d20" => Some(DieKind::D20),
            "d100" | "d%" => Some(DieKind::D100),
            _ => None,
        }
    }

    pub fn is_percentile(&self) -> bool {
        matches!(self, DieKind::D100)
    }

    /// The physical dice this selection places on the felt.
    pub fn physical(&self) -> &'static [PhysicalDie] {
        match self {
            DieKind::D4 => &[PhysicalDie::D4],
            DieKind::D6 => &[PhysicalDie::D6],
            DieKind::D8 => &[PhysicalDie::D8],
            DieKind::D10 => &[PhysicalDie::D10],
            DieKind::D12 => &[PhysicalDie::D12],
            DieKind::D20 => &[PhysicalDie::D20],
            DieKind::D100 => &[PhysicalDie::PercentileTens, PhysicalDie::PercentileUnits],
        }
    }
}

/// A die shape that actually lands in the tray. The percentile tens/units
/// variants share the d10 solid but label it differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhysicalDie {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    PercentileTens,
    PercentileUnits,
}

impl PhysicalDie {
    pub const ALL: [PhysicalDie; 8] = [
        PhysicalDie::D4,
        PhysicalDie::D6,
        PhysicalDie::D8,
        PhysicalDie::D10,
        PhysicalDie::D12,
        PhysicalDie::D20,
        PhysicalDie::PercentileTens,
        PhysicalDie::PercentileUnits,
    ];

    pub fn spec(self) -> &'static DieSpec {
        &DIE_SPECS[self as usize]
    }
}

/// Which world direction identifies the result face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadMode {
    /// Read the face pointing up (the default).
    Top,
    /// Read the face touching the ground (the d4).
    Bottom,
}

/// Immutable per-kind specification: geometry, grouping strategy, labeling,
/// and presentation parameters. Constructed once in the static registry.
pub struct DieSpec {
    pub die: PhysicalDie,
    pub max_value: u32,
    /// Uniform scale applied to the canonical mesh; hull and visual mesh
    /// are both derived from the scaled instance.
    pub scale: f32,
    /// Default tint, RGBA. A user-configured color overrides this.
    pub color: [f32; 4],
    pub label_size: f32,
    pub read_mode: ReadMode,
    pub density: f32,
    pub geometry: fn() -> Result<MeshData, GeometryError>,
    pub grouping: fn(&MeshData) -> Result<Vec<FaceGroup>, GeometryError>,
    value: fn(usize, &[FaceGroup]) -> u32,
    label: fn(usize, &[FaceGroup]) -> String,
}

impl DieSpec {
    /// Printed value of face group `group`.
    pub fn value_of(&self, group: usize, groups: &[FaceGroup]) -> u32 {
        (self.value)(group, groups)
    }

    /// Printed label of face group `group` ("00".."90" on the tens die).
    pub fn label_of(&self, group: usize, groups: &[FaceGroup]) -> String {
        (self.label)(group, groups)
    }

    /// Build the scaled mesh, collision hull, and face grouping for one die
    /// instance. Hull and grouping both come from the same scaled mesh so
    /// the physics shape and the visuals cannot diverge.
    pub fn build_assets(&self) -> Result<DieAssets, GeometryError> {
        let mesh = (self.geometry)()?.scaled(self.scale);
        let groups = (self.grouping)(&mesh)?;
        let hull = convex_args(&mesh)?;
        let mut triangle_groups = vec![0usize; mesh.triangle_count()?];
        for (index, group) in groups.iter().enumerate() {
            for &tri in &group.triangles {
                triangle_groups[tri] = index;
            }
        }
        Ok(DieAssets {
            mesh,
            hull,
            groups,
            triangle_groups,
        })
    }
}

/// Everything derived from one die's geometry: the scaled mesh, the convex
/// hull for the physics engine, the physical faces for labeling, and the
/// triangle-to-face map the settle detector scans with.
pub struct DieAssets {
    pub mesh: MeshData,
    pub hull: ConvexArgs,
    pub groups: Vec<FaceGroup>,
    triangle_groups: Vec<usize>,
}

impl DieAssets {
    pub fn group_of_triangle(&self, tri: usize) -> usize {
        self.triangle_groups[tri]
    }
}

/// Composite percentile value. Double zero reads as 100.
pub fn percentile_total(tens: u32, units: u32) -> u32 {
    if tens == 0 && units == 0 {
        100
    } else {
        tens + units
    }
}

// Faces are labeled 1..N in grouping output order, which is generation
// order. The ordering carries no geometric meaning and must stay as-is:
// renumbering would change observable die faces.
fn value_one_based(group: usize, _groups: &[FaceGroup]) -> u32 {
    group as u32 + 1
}

fn value_tens(group: usize, _groups: &[FaceGroup]) -> u32 {
    (group as u32 % 10) * 10
}

fn value_units(group: usize, _groups: &[FaceGroup]) -> u32 {
    group as u32 % 10
}

fn label_one_based(group: usize, groups: &[FaceGroup]) -> String {
    value_one_based(group, groups).to_string()
}

fn label_tens(group: usize, groups: &[FaceGroup]) -> String {
    format!("{:02}", value_tens(group, groups))
}

fn label_units(group: usize, groups: &[FaceGroup]) -> String {
    value_units(group, groups).to_string()
}

pub static DIE_SPECS: [DieSpec; 8] = [
    DieSpec {
        die: PhysicalDie::D4,
        max_value: 4,
        scale: 0.9,
        color: [0.3, 0.4, 0.9, 0.92],
        label_size: 0.32,
        read_mode: ReadMode::Bottom,
        density: 1.0,
        geometry: crate::meshes::d4::build,
        grouping: group_by_normal,
        value: value_one_based,
        label: label_one_based,
    },
    DieSpec {
        die: PhysicalDie::D6,
        max_value: 6,
        scale: 1.0,
        color: [0.1, 0.1, 0.1, 0.95],
        label_size: 0.36,
        read_mode: ReadMode::Top,
        density: 1.5,
        geometry: crate::meshes::d6::build,
        grouping: group_by_normal,
        value: value_one_based,
        label: label_one_based,
    },
    DieSpec {
        die: PhysicalDie::D8,
        max_value: 8,
        scale: 1.0,
        color: [0.6, 0.2, 0.8, 0.92],
        label_size: 0.3,
        read_mode: ReadMode::Top,
        density: 1.8,
        geometry: crate::meshes::d8::build,
        grouping: group_by_normal,
        value: value_one_based,
        label: label_one_based,
    },
    DieSpec {
        die: PhysicalDie::D10,
        max_value: 10,
        scale: 1.05,
        color: [0.95, 0.95, 0.95, 0.92],
        label_size: 0.26,
        read_mode: ReadMode::Top,
        density: 2.0,
        geometry: crate::meshes::d10::build,
        grouping: group_kite_faces,
        value: value_one_based,
        label: label_one_based,
    },
    DieSpec {
        die: PhysicalDie::D12,
        max_value: 12,
        scale: 1.1,
        color: [0.95, 0.5, 0.1, 0.92],
        label_size: 0.3,
        read_mode: ReadMode::Top,
        density: 2.5,
        geometry: crate::meshes::d12::build,
        grouping: group_by_normal,
        value: value_one_based,
        label: label_one_based,
    },
    DieSpec {
        die: PhysicalDie::D20,
        max_value: 20,
        scale: 1.2,
        color: [0.95, 0.85, 0.2, 0.92],
        label_size: 0.22,
        read_mode: ReadMode::Top,
        density: 3.0,
        geometry: crate::meshes::d20::build,
        grouping: group_by_normal,
        value: value_one_based,
        label: label_one_based,
    },
    DieSpec {
        die: PhysicalDie::PercentileTens,
        max_value: 90,
        scale: 1.05,
        color: [0.9, 0.3, 0.3, 0.92],
        label_size: 0.24,
        read_mode: ReadMode::Top,
        density: 2.0,
        geometry: crate::meshes::d10::build,
        grouping: group_kite_faces,
        value: value_tens,
        label: label_tens,
    },
    DieSpec {
        die: PhysicalDie::PercentileUnits,
        max_value: 9,
        scale: 1.05,
        color: [0.95, 0.95, 0.95, 0.92],
        label_size: 0.26,
        read_mode: ReadMode::Top,
        density: 2.0,
        geometry: crate::meshes::d10::build,
        grouping: group_kite_faces,
        value: value_units,
        label: label_units,
    },
];
