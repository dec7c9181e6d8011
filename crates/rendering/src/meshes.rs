//! Hand-built meshes the stock primitives don't cover.
//!
//! Polyhedra come out flat-shaded (duplicated vertices, per-face normals);
//! the curved surfaces keep shared vertices and smooth normals. None of
//! these carry UVs — every material in the scenes is a plain color.

use std::f32::consts::PI;

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

const PHI: f32 = 1.618_034;

fn flat_mesh(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Mesh {
    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_indices(Indices::U32(indices))
    .with_duplicated_vertices()
    .with_computed_flat_normals()
}

// ---------------------------------------------------------------------------
// Pyramid
// ---------------------------------------------------------------------------

/// A square pyramid sitting on the XZ plane: base edge `base`, apex at
/// `height` above the base center.
pub fn square_pyramid(base: f32, height: f32) -> Mesh {
    let h = base / 2.0;
    let positions = vec![
        [-h, 0.0, -h],
        [h, 0.0, -h],
        [h, 0.0, h],
        [-h, 0.0, h],
        [0.0, height, 0.0],
    ];
    let indices = vec![
        0, 4, 1, 1, 4, 2, 2, 4, 3, 3, 4, 0, // sides
        0, 1, 2, 0, 2, 3, // base
    ];
    flat_mesh(positions, indices)
}

// ---------------------------------------------------------------------------
// Extruded annulus
// ---------------------------------------------------------------------------

/// A flat ring between `inner` and `outer` radius, extruded to `height`:
/// top, bottom, and the two cylindrical walls.
pub fn extruded_annulus(inner: f32, outer: f32, height: f32, segments: usize) -> Mesh {
    let mut positions = Vec::with_capacity(segments * 4);
    let half = height / 2.0;
    for i in 0..segments {
        let theta = i as f32 / segments as f32 * 2.0 * PI;
        let (sin, cos) = theta.sin_cos();
        positions.push([inner * cos, half, inner * sin]);
        positions.push([outer * cos, half, outer * sin]);
        positions.push([inner * cos, -half, inner * sin]);
        positions.push([outer * cos, -half, outer * sin]);
    }

    let mut indices = Vec::new();
    let at = |seg: usize, corner: u32| (seg % segments) as u32 * 4 + corner;
    for i in 0..segments {
        // Top face (viewed from +Y).
        indices.extend([at(i, 0), at(i, 1), at(i + 1, 1)]);
        indices.extend([at(i, 0), at(i + 1, 1), at(i + 1, 0)]);
        // Bottom face.
        indices.extend([at(i, 2), at(i + 1, 3), at(i, 3)]);
        indices.extend([at(i, 2), at(i + 1, 2), at(i + 1, 3)]);
        // Outer wall.
        indices.extend([at(i, 1), at(i, 3), at(i + 1, 3)]);
        indices.extend([at(i, 1), at(i + 1, 3), at(i + 1, 1)]);
        // Inner wall.
        indices.extend([at(i, 0), at(i + 1, 2), at(i, 2)]);
        indices.extend([at(i, 0), at(i + 1, 0), at(i + 1, 2)]);
    }
    flat_mesh(positions, indices)
}

// ---------------------------------------------------------------------------
// Polyhedra
// ---------------------------------------------------------------------------

fn scaled_to_radius(raw: &[[f32; 3]], radius: f32) -> Vec<[f32; 3]> {
    raw.iter()
        .map(|&p| {
            let v = Vec3::from_array(p).normalize() * radius;
            v.to_array()
        })
        .collect()
}

/// A regular icosahedron with all vertices at `radius`.
pub fn icosahedron(radius: f32) -> Mesh {
    let t = PHI;
    let raw = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ];
    let indices = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, //
        1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8, //
        3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, //
        4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
    ];
    flat_mesh(scaled_to_radius(&raw, radius), indices)
}

/// A regular dodecahedron with all vertices at `radius`. Pentagonal faces
/// are fanned into three triangles each.
pub fn dodecahedron(radius: f32) -> Mesh {
    let t = PHI;
    let r = 1.0 / PHI;
    let raw = [
        [-1.0, -1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, -1.0],
        [1.0, 1.0, 1.0],
        [0.0, -r, -t],
        [0.0, -r, t],
        [0.0, r, -t],
        [0.0, r, t],
        [-r, -t, 0.0],
        [-r, t, 0.0],
        [r, -t, 0.0],
        [r, t, 0.0],
        [-t, 0.0, -1.0],
        [t, 0.0, -1.0],
        [-t, 0.0, 1.0],
        [t, 0.0, 1.0],
    ];
    let indices = vec![
        3, 11, 7, 3, 7, 15, 3, 15, 13, //
        7, 19, 17, 7, 17, 6, 7, 6, 15, //
        17, 4, 8, 17, 8, 10, 17, 10, 6, //
        8, 0, 16, 8, 16, 2, 8, 2, 10, //
        0, 12, 1, 0, 1, 18, 0, 18, 16, //
        6, 10, 2, 6, 2, 13, 6, 13, 15, //
        2, 16, 18, 2, 18, 3, 2, 3, 13, //
        18, 1, 9, 18, 9, 11, 18, 11, 3, //
        4, 14, 12, 4, 12, 0, 4, 0, 8, //
        11, 9, 5, 11, 5, 19, 11, 19, 7, //
        19, 5, 14, 19, 14, 4, 19, 4, 17, //
        1, 12, 14, 1, 14, 5, 1, 5, 9,
    ];
    flat_mesh(scaled_to_radius(&raw, radius), indices)
}

// ---------------------------------------------------------------------------
// Torus knot
// ---------------------------------------------------------------------------

/// Point on a (p, q) torus knot of overall size `radius`.
fn knot_point(t: f32, radius: f32, p: f32, q: f32) -> Vec3 {
    let r = radius * (2.0 + (q * t).cos()) / 3.0;
    Vec3::new(
        r * (p * t).cos(),
        radius * (q * t).sin() / 3.0,
        r * (p * t).sin(),
    )
}

/// A tube of `tube_radius` swept along a (p, q) torus knot, smooth-shaded.
pub fn torus_knot(
    radius: f32,
    tube_radius: f32,
    p: u32,
    q: u32,
    tubular_segments: usize,
    radial_segments: usize,
) -> Mesh {
    let (p, q) = (p as f32, q as f32);
    let mut positions = Vec::with_capacity(tubular_segments * radial_segments);
    let mut normals = Vec::with_capacity(positions.capacity());

    for i in 0..tubular_segments {
        let t = i as f32 / tubular_segments as f32 * 2.0 * PI;
        let center = knot_point(t, radius, p, q);
        // Frame from the local tangent; the binormal never degenerates for
        // these knot parameters.
        let tangent = (knot_point(t + 0.01, radius, p, q) - center).normalize();
        let normal = (knot_point(t + 0.01, radius, p, q) + center).normalize();
        let binormal = tangent.cross(normal).normalize();
        let normal = binormal.cross(tangent);

        for j in 0..radial_segments {
            let phi = j as f32 / radial_segments as f32 * 2.0 * PI;
            let dir = normal * phi.cos() + binormal * phi.sin();
            positions.push((center + dir * tube_radius).to_array());
            normals.push(dir.to_array());
        }
    }

    let mut indices = Vec::new();
    let at = |i: usize, j: usize| {
        ((i % tubular_segments) * radial_segments + (j % radial_segments)) as u32
    };
    for i in 0..tubular_segments {
        for j in 0..radial_segments {
            indices.extend([at(i, j), at(i + 1, j), at(i + 1, j + 1)]);
            indices.extend([at(i, j), at(i + 1, j + 1), at(i, j + 1)]);
        }
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_indices(Indices::U32(indices))
}

// ---------------------------------------------------------------------------
// Parametric surfaces
// ---------------------------------------------------------------------------

/// An open surface sampled from `f` over the unit square, smooth-shaded.
/// Render these with a double-sided material; the sheet has no thickness.
pub fn parametric(f: impl Fn(f32, f32) -> Vec3, nu: usize, nv: usize) -> Mesh {
    let mut positions = Vec::with_capacity((nu + 1) * (nv + 1));
    for i in 0..=nu {
        for j in 0..=nv {
            let u = i as f32 / nu as f32;
            let v = j as f32 / nv as f32;
            positions.push(f(u, v).to_array());
        }
    }

    let mut indices = Vec::new();
    let at = |i: usize, j: usize| (i * (nv + 1) + j) as u32;
    for i in 0..nu {
        for j in 0..nv {
            indices.extend([at(i, j), at(i + 1, j), at(i + 1, j + 1)]);
            indices.extend([at(i, j), at(i + 1, j + 1), at(i, j + 1)]);
        }
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_indices(Indices::U32(indices))
    .with_computed_smooth_normals()
}

/// A Möbius strip of center radius `radius` and band width `width`.
pub fn mobius(radius: f32, width: f32, nu: usize, nv: usize) -> Mesh {
    parametric(
        move |u, v| {
            let theta = u * 2.0 * PI;
            let w = (v - 0.5) * width;
            let r = radius + w * (theta / 2.0).cos();
            Vec3::new(
                r * theta.cos(),
                w * (theta / 2.0).sin(),
                r * theta.sin(),
            )
        },
        nu,
        nv,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    fn positions(mesh: &Mesh) -> &Vec<[f32; 3]> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION).unwrap() {
            VertexAttributeValues::Float32x3(values) => values,
            other => panic!("unexpected position format: {} values", other.len()),
        }
    }

    #[test]
    fn test_icosahedron_has_twenty_flat_faces() {
        let mesh = icosahedron(3.0);
        // Duplicated for flat shading: 20 faces x 3 vertices.
        assert_eq!(positions(&mesh).len(), 60);
    }

    #[test]
    fn test_polyhedra_vertices_sit_on_the_sphere() {
        for (mesh, radius) in [(icosahedron(3.0), 3.0), (dodecahedron(3.5), 3.5)] {
            for &p in positions(&mesh) {
                let r = Vec3::from_array(p).length();
                assert!((r - radius).abs() < 1e-4, "vertex at radius {r}");
            }
        }
    }

    #[test]
    fn test_pyramid_has_six_faces() {
        let mesh = square_pyramid(3.0, 6.0);
        // 4 sides + 2 base triangles, duplicated for flat shading.
        assert_eq!(positions(&mesh).len(), 18);
    }

    #[test]
    fn test_annulus_respects_radii() {
        let mesh = extruded_annulus(6.0, 20.0, 5.0, 32);
        for &p in positions(&mesh) {
            let r = Vec3::new(p[0], 0.0, p[2]).length();
            assert!(r >= 6.0 - 1e-4 && r <= 20.0 + 1e-4);
            assert!(p[1].abs() <= 2.5 + 1e-4);
        }
    }

    #[test]
    fn test_parametric_grid_dimensions() {
        let mesh = parametric(|u, v| Vec3::new(u, 0.0, v), 8, 4);
        assert_eq!(positions(&mesh).len(), 9 * 5);
        assert_eq!(mesh.indices().unwrap().len(), 8 * 4 * 6);
    }

    #[test]
    fn test_torus_knot_tube_radius() {
        let radius = 2.0;
        let tube = 0.4;
        let mesh = torus_knot(radius, tube, 2, 3, 64, 8);
        for &p in positions(&mesh) {
            let len = Vec3::from_array(p).length();
            assert!(len <= radius + tube + 1e-3, "vertex at {len}");
        }
    }

    #[test]
    fn test_mobius_strip_closes_on_itself() {
        // The strip's boundary is a single curve: u=0 and u=1 trace the same
        // segment with v flipped.
        let f = |u: f32, v: f32| {
            let theta = u * 2.0 * PI;
            let w = (v - 0.5) * 4.0;
            let r = 8.0 + w * (theta / 2.0).cos();
            Vec3::new(r * theta.cos(), w * (theta / 2.0).sin(), r * theta.sin())
        };
        assert!(f(0.0, 0.0).distance(f(1.0, 1.0)) < 1e-4);
        assert!(f(0.0, 1.0).distance(f(1.0, 0.0)) < 1e-4);
    }
}
