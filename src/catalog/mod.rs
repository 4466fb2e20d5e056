//! The five Platonic solids as fixed vertex/edge tables.
//!
//! Coordinates come from closed-form constructions (cube corners, signed
//! axes, golden-ratio rectangles) normalized to a per-solid radius. Edge
//! tables are explicit adjacency lists; nothing is derived at runtime.

mod tables;

use glam::Vec3;

/// Number of solids in the catalog.
pub const SOLID_COUNT: usize = 5;

/// An ordered pair of indices into a solid's vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// First endpoint.
    pub a: usize,
    /// Second endpoint.
    pub b: usize,
}

impl Edge {
    /// Edge from `a` to `b`.
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

/// Which Platonic solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolidKind {
    /// 4 vertices, 6 edges.
    Tetrahedron,
    /// 8 vertices, 12 edges.
    Cube,
    /// 6 vertices, 12 edges.
    Octahedron,
    /// 20 vertices, 30 edges.
    Dodecahedron,
    /// 12 vertices, 30 edges.
    Icosahedron,
}

impl SolidKind {
    /// All kinds in display order (left to right on screen).
    pub const ALL: [SolidKind; SOLID_COUNT] = [
        SolidKind::Tetrahedron,
        SolidKind::Cube,
        SolidKind::Octahedron,
        SolidKind::Dodecahedron,
        SolidKind::Icosahedron,
    ];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tetrahedron => "tetrahedron",
            Self::Cube => "cube",
            Self::Octahedron => "octahedron",
            Self::Dodecahedron => "dodecahedron",
            Self::Icosahedron => "icosahedron",
        }
    }

    /// Vertex count of the solid's topology.
    pub fn vertex_count(self) -> usize {
        match self {
            Self::Tetrahedron => 4,
            Self::Cube => 8,
            Self::Octahedron => 6,
            Self::Dodecahedron => 20,
            Self::Icosahedron => 12,
        }
    }

    /// Edge count of the solid's topology.
    pub fn edge_count(self) -> usize {
        match self {
            Self::Tetrahedron => 6,
            Self::Cube | Self::Octahedron => 12,
            Self::Dodecahedron | Self::Icosahedron => 30,
        }
    }

    /// Circumradius the vertices are normalized to.
    pub fn radius(self) -> f32 {
        match self {
            Self::Tetrahedron | Self::Octahedron => 1.0,
            Self::Cube => 0.6 * 3.0_f32.sqrt(),
            Self::Dodecahedron => 0.85,
            Self::Icosahedron => 0.9,
        }
    }
}

/// A polyhedron: vertices on a sphere plus the edges between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    /// Which solid this is.
    pub kind: SolidKind,
    /// Unique vertex positions.
    pub vertices: Vec<Vec3>,
    /// Edges as vertex-index pairs.
    pub edges: Vec<Edge>,
}

impl Solid {
    /// Build a solid from raw coordinates and an edge table.
    fn from_tables(
        kind: SolidKind,
        vertices: impl IntoIterator<Item = Vec3>,
        edges: &[[usize; 2]],
    ) -> Self {
        Self {
            kind,
            vertices: vertices.into_iter().collect(),
            edges: edges.iter().map(|&[a, b]| Edge::new(a, b)).collect(),
        }
    }

    /// Solid name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Both endpoints of an edge.
    pub fn endpoints(&self, edge: Edge) -> (Vec3, Vec3) {
        (self.vertices[edge.a], self.vertices[edge.b])
    }
}

/// Scale every point to length `radius`.
fn normalized(
    points: &[[f32; 3]],
    radius: f32,
) -> impl Iterator<Item = Vec3> + '_ {
    points
        .iter()
        .map(move |&p| Vec3::from(p).normalize() * radius)
}

/// The tetrahedron: alternating cube corners on the unit sphere.
pub fn tetrahedron() -> Solid {
    Solid::from_tables(
        SolidKind::Tetrahedron,
        normalized(&tables::TETRAHEDRON_VERTICES, 1.0),
        &tables::TETRAHEDRON_EDGES,
    )
}

/// The cube: `(±1, ±1, ±1)` scaled by 0.6.
pub fn cube() -> Solid {
    Solid::from_tables(
        SolidKind::Cube,
        tables::CUBE_VERTICES.iter().map(|&p| Vec3::from(p) * 0.6),
        &tables::CUBE_EDGES,
    )
}

/// The octahedron: the six signed unit axes.
pub fn octahedron() -> Solid {
    Solid::from_tables(
        SolidKind::Octahedron,
        tables::OCTAHEDRON_VERTICES.iter().map(|&p| Vec3::from(p)),
        &tables::OCTAHEDRON_EDGES,
    )
}

/// The dodecahedron: cube corners plus golden-ratio rectangle points,
/// radius 0.85.
pub fn dodecahedron() -> Solid {
    let raw = tables::dodecahedron_vertices();
    Solid::from_tables(
        SolidKind::Dodecahedron,
        normalized(&raw, SolidKind::Dodecahedron.radius()).collect::<Vec<_>>(),
        &tables::DODECAHEDRON_EDGES,
    )
}

/// The icosahedron: golden-ratio rectangle permutations, radius 0.9.
pub fn icosahedron() -> Solid {
    let raw = tables::icosahedron_vertices();
    Solid::from_tables(
        SolidKind::Icosahedron,
        normalized(&raw, SolidKind::Icosahedron.radius()).collect::<Vec<_>>(),
        &tables::ICOSAHEDRON_EDGES,
    )
}

/// All five solids in [`SolidKind::ALL`] order.
pub fn platonic_solids() -> [Solid; SOLID_COUNT] {
    [
        tetrahedron(),
        cube(),
        octahedron(),
        dodecahedron(),
        icosahedron(),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn counts_match_topology() {
        let expected = [(4, 6), (8, 12), (6, 12), (20, 30), (12, 30)];
        for (solid, (v, e)) in platonic_solids().iter().zip(expected) {
            assert_eq!(solid.vertices.len(), v, "{}", solid.name());
            assert_eq!(solid.edges.len(), e, "{}", solid.name());
            assert_eq!(solid.kind.vertex_count(), v);
            assert_eq!(solid.kind.edge_count(), e);
        }
    }

    #[test]
    fn catalog_order_matches_kinds() {
        let kinds: Vec<_> = platonic_solids().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, SolidKind::ALL);
    }

    #[test]
    fn edge_indices_in_range_and_unique() {
        for solid in platonic_solids() {
            let n = solid.vertices.len();
            let mut seen = HashSet::new();
            for edge in &solid.edges {
                assert!(edge.a < n && edge.b < n, "{}: {edge:?}", solid.name());
                assert_ne!(edge.a, edge.b);
                let key = (edge.a.min(edge.b), edge.a.max(edge.b));
                assert!(
                    seen.insert(key),
                    "{}: duplicate {key:?}",
                    solid.name()
                );
            }
        }
    }

    #[test]
    fn vertices_are_unique() {
        for solid in platonic_solids() {
            for (i, a) in solid.vertices.iter().enumerate() {
                for b in &solid.vertices[i + 1..] {
                    assert!((*a - *b).length() > 1e-3, "{}", solid.name());
                }
            }
        }
    }

    #[test]
    fn vertices_lie_on_documented_radius() {
        for solid in platonic_solids() {
            let r = solid.kind.radius();
            for v in &solid.vertices {
                assert!(
                    (v.length() - r).abs() < 1e-5,
                    "{}: {} vs {r}",
                    solid.name(),
                    v.length()
                );
            }
        }
    }

    #[test]
    fn solids_are_regular() {
        let degree = [3, 3, 4, 3, 5];
        for (solid, deg) in platonic_solids().iter().zip(degree) {
            let lengths: Vec<f32> = solid
                .edges
                .iter()
                .map(|&e| {
                    let (a, b) = solid.endpoints(e);
                    (a - b).length()
                })
                .collect();
            let first = lengths[0];
            assert!(
                lengths.iter().all(|l| (l - first).abs() < 1e-4),
                "{}: unequal edges {lengths:?}",
                solid.name()
            );

            for i in 0..solid.vertices.len() {
                let d = solid
                    .edges
                    .iter()
                    .filter(|e| e.a == i || e.b == i)
                    .count();
                assert_eq!(d, deg, "{}: vertex {i}", solid.name());
            }
        }
    }
}
