//! Raw coordinate and adjacency tables.

pub(super) const TETRAHEDRON_VERTICES: [[f32; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
];

pub(super) const TETRAHEDRON_EDGES: [[usize; 2]; 6] =
    [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];

pub(super) const CUBE_VERTICES: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
];

pub(super) const CUBE_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [2, 3],
    [4, 5],
    [6, 7],
    [0, 2],
    [1, 3],
    [4, 6],
    [5, 7],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

pub(super) const OCTAHEDRON_VERTICES: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

pub(super) const OCTAHEDRON_EDGES: [[usize; 2]; 12] = [
    [0, 2],
    [0, 3],
    [0, 4],
    [0, 5],
    [1, 2],
    [1, 3],
    [1, 4],
    [1, 5],
    [2, 4],
    [2, 5],
    [3, 4],
    [3, 5],
];

/// Golden ratio.
fn phi() -> f32 {
    (1.0 + 5.0_f32.sqrt()) / 2.0
}

pub(super) fn dodecahedron_vertices() -> [[f32; 3]; 20] {
    let p = phi();
    let ip = 1.0 / p;
    [
        [1.0, 1.0, 1.0],
        [1.0, 1.0, -1.0],
        [1.0, -1.0, 1.0],
        [1.0, -1.0, -1.0],
        [-1.0, 1.0, 1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, -1.0, -1.0],
        [0.0, p, ip],
        [0.0, p, -ip],
        [0.0, -p, ip],
        [0.0, -p, -ip],
        [ip, 0.0, p],
        [-ip, 0.0, p],
        [ip, 0.0, -p],
        [-ip, 0.0, -p],
        [p, ip, 0.0],
        [p, -ip, 0.0],
        [-p, ip, 0.0],
        [-p, -ip, 0.0],
    ]
}

pub(super) const DODECAHEDRON_EDGES: [[usize; 2]; 30] = [
    [0, 12],
    [0, 16],
    [0, 8],
    [1, 14],
    [1, 16],
    [1, 9],
    [2, 12],
    [2, 17],
    [2, 10],
    [3, 14],
    [3, 17],
    [3, 11],
    [4, 13],
    [4, 18],
    [4, 8],
    [5, 15],
    [5, 18],
    [5, 9],
    [6, 13],
    [6, 19],
    [6, 10],
    [7, 15],
    [7, 19],
    [7, 11],
    [8, 9],
    [10, 11],
    [12, 13],
    [14, 15],
    [16, 17],
    [18, 19],
];

pub(super) fn icosahedron_vertices() -> [[f32; 3]; 12] {
    let p = phi();
    [
        [0.0, 1.0, p],
        [0.0, -1.0, p],
        [0.0, 1.0, -p],
        [0.0, -1.0, -p],
        [1.0, p, 0.0],
        [-1.0, p, 0.0],
        [1.0, -p, 0.0],
        [-1.0, -p, 0.0],
        [p, 0.0, 1.0],
        [-p, 0.0, 1.0],
        [p, 0.0, -1.0],
        [-p, 0.0, -1.0],
    ]
}

pub(super) const ICOSAHEDRON_EDGES: [[usize; 2]; 30] = [
    [0, 1],
    [0, 4],
    [0, 5],
    [0, 8],
    [0, 9],
    [1, 6],
    [1, 7],
    [1, 8],
    [1, 9],
    [2, 3],
    [2, 4],
    [2, 5],
    [2, 10],
    [2, 11],
    [3, 6],
    [3, 7],
    [3, 10],
    [3, 11],
    [4, 5],
    [4, 8],
    [4, 10],
    [5, 9],
    [5, 11],
    [6, 7],
    [6, 8],
    [6, 10],
    [7, 9],
    [7, 11],
    [8, 10],
    [9, 11],
];
