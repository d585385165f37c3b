//! Triangle mesh construction
//!
//! Converts the height grid into a renderable triangle mesh. The dense
//! variant emits every grid vertex and quad; the masked variant keeps only
//! land triangles and compacts the vertex list so no unused vertex survives.
//! Indices are 32-bit throughout: a compacted mesh over a large grid can
//! exceed the 16-bit range, and truncation there corrupts topology silently.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::IslandConfig;
use crate::grid::Grid;

/// Inclusion rule for the masked mesh variant.
///
/// Two formulas for the land test exist in the wild and disagree near the
/// coast; both are kept selectable so callers (and tests) pin the one they
/// want instead of the builder guessing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MaskRule {
    /// Use the land mask as computed by the land classifier
    /// (height threshold plus radial edge margin).
    ThresholdMargin,
    /// Ignore the mask and keep any vertex whose height clears a fixed
    /// threshold, with no edge margin.
    HeightAbove(f32),
}

impl Default for MaskRule {
    fn default() -> Self {
        MaskRule::ThresholdMargin
    }
}

/// A triangle mesh handed to the rendering collaborator.
///
/// Invariant: every index in `triangles` is `< vertices.len()`; for the
/// masked variant additionally every vertex is referenced by at least one
/// triangle.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    /// Flat index triples, consistent winding (normals face +Y on flat ground)
    pub triangles: Vec<u32>,
    /// Per-vertex normals, derived from the final triangle set
    pub normals: Vec<Vec3>,
}

impl Mesh {
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            normals: Vec::new(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}

/// Build the dense mesh: all grid vertices, two triangles per quad cell,
/// regardless of land classification. Used when the whole grid square
/// renders (a separate water plane hides the zero-height skirt).
pub fn build_dense_mesh(heights: &Grid<f32>, config: &IslandConfig) -> Mesh {
    let verts = config.verts_per_axis();
    let res = config.resolution;

    let mut vertices = Vec::with_capacity(verts * verts);
    for z in 0..verts {
        for x in 0..verts {
            let p = config.vertex_world(x, z);
            vertices.push(Vec3::new(p.x, *heights.get(x, z), p.y));
        }
    }

    let mut triangles = Vec::with_capacity(res * res * 6);
    for z in 0..res {
        for x in 0..res {
            let i0 = (z * verts + x) as u32;
            let i1 = (z * verts + x + 1) as u32;
            let i2 = ((z + 1) * verts + x) as u32;
            let i3 = ((z + 1) * verts + x + 1) as u32;

            triangles.extend_from_slice(&[i0, i2, i1]);
            triangles.extend_from_slice(&[i1, i2, i3]);
        }
    }

    let normals = compute_normals(&vertices, &triangles);
    Mesh {
        vertices,
        triangles,
        normals,
    }
}

/// Build the masked/compacted mesh: a quad half is emitted only when all
/// three of its corners pass the mask rule, and vertices are remapped to a
/// compact index space on first reference. Zero qualifying triangles is a
/// valid empty mesh.
pub fn build_masked_mesh(
    heights: &Grid<f32>,
    mask: &Grid<bool>,
    config: &IslandConfig,
    rule: MaskRule,
) -> Mesh {
    let verts = config.verts_per_axis();
    let res = config.resolution;

    let included = |x: usize, z: usize| -> bool {
        match rule {
            MaskRule::ThresholdMargin => *mask.get(x, z),
            MaskRule::HeightAbove(threshold) => *heights.get(x, z) > threshold,
        }
    };

    // Original grid index -> compacted index, assigned on first reference.
    let mut remap: Vec<u32> = vec![u32::MAX; verts * verts];
    let mut vertices: Vec<Vec3> = Vec::new();
    let mut triangles: Vec<u32> = Vec::new();

    let emit = |grid_index: usize, remap: &mut Vec<u32>, vertices: &mut Vec<Vec3>| -> u32 {
        if remap[grid_index] == u32::MAX {
            let x = grid_index % verts;
            let z = grid_index / verts;
            let p = config.vertex_world(x, z);
            remap[grid_index] = vertices.len() as u32;
            vertices.push(Vec3::new(p.x, *heights.get(x, z), p.y));
        }
        remap[grid_index]
    };

    for z in 0..res {
        for x in 0..res {
            let i0 = z * verts + x;
            let i1 = z * verts + x + 1;
            let i2 = (z + 1) * verts + x;
            let i3 = (z + 1) * verts + x + 1;

            if included(x, z) && included(x, z + 1) && included(x + 1, z) {
                let a = emit(i0, &mut remap, &mut vertices);
                let b = emit(i2, &mut remap, &mut vertices);
                let c = emit(i1, &mut remap, &mut vertices);
                triangles.extend_from_slice(&[a, b, c]);
            }
            if included(x + 1, z) && included(x, z + 1) && included(x + 1, z + 1) {
                let a = emit(i1, &mut remap, &mut vertices);
                let b = emit(i2, &mut remap, &mut vertices);
                let c = emit(i3, &mut remap, &mut vertices);
                triangles.extend_from_slice(&[a, b, c]);
            }
        }
    }

    let normals = compute_normals(&vertices, &triangles);
    Mesh {
        vertices,
        triangles,
        normals,
    }
}

/// Per-vertex normals accumulated from face normals.
///
/// The unnormalized cross product weights each face by its area; the sum is
/// normalized at the end. Isolated degenerate sums fall back to +Y.
fn compute_normals(vertices: &[Vec3], triangles: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; vertices.len()];

    for tri in triangles.chunks_exact(3) {
        let a = vertices[tri[0] as usize];
        let b = vertices[tri[1] as usize];
        let c = vertices[tri[2] as usize];
        let face = (b - a).cross(c - a);
        for &i in tri {
            normals[i as usize] += face;
        }
    }

    for n in &mut normals {
        *n = n.normalize_or_zero();
        if *n == Vec3::ZERO {
            *n = Vec3::Y;
        }
    }

    normals
}
