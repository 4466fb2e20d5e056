//! Column-major 4x4 matrix operations.
//!
//! Matrices are plain `[f32; 16]` arrays laid out column by column, the same
//! layout the uniform block hands to the shader, so a matrix can be copied
//! into a [`SolidUniform`](crate::gpu::instances::SolidUniform) without any
//! transposition. Element `(row, col)` lives at index `col * 4 + row`.

use glam::Vec3;

/// Column-major 4x4 matrix.
pub type Mat4 = [f32; 16];

/// The identity matrix.
pub const IDENTITY: Mat4 = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Matrix product `a · b`.
///
/// Not commutative: `multiply(a, b)` applies `b` first when the result
/// transforms a column vector.
#[must_use]
pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut r = [0.0; 16];
    for col in 0..4 {
        for row in 0..4 {
            r[col * 4 + row] = a[row] * b[col * 4]
                + a[row + 4] * b[col * 4 + 1]
                + a[row + 8] * b[col * 4 + 2]
                + a[row + 12] * b[col * 4 + 3];
        }
    }
    r
}

/// Right-handed perspective projection with a `[0, 1]` depth range.
///
/// A view-space point at `z = -near` lands on depth 0 and one at `z = -far`
/// on depth 1, matching a depth buffer cleared to 1.0 and compared with
/// `Less`.
#[must_use]
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let range_inv = 1.0 / (near - far);
    [
        f / aspect,
        0.0,
        0.0,
        0.0,
        0.0,
        f,
        0.0,
        0.0,
        0.0,
        0.0,
        far * range_inv,
        -1.0,
        0.0,
        0.0,
        near * far * range_inv,
        0.0,
    ]
}

/// Translation by `(tx, ty, tz)`.
#[must_use]
pub fn translate(tx: f32, ty: f32, tz: f32) -> Mat4 {
    let mut m = IDENTITY;
    m[12] = tx;
    m[13] = ty;
    m[14] = tz;
    m
}

/// Rotation of `angle` radians about `axis` (Rodrigues' formula).
///
/// `axis` must already be unit length.
#[must_use]
pub fn rotate_axis_angle(axis: Vec3, angle: f32) -> Mat4 {
    let Vec3 { x, y, z } = axis;
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    [
        x * x * t + c,
        y * x * t + z * s,
        z * x * t - y * s,
        0.0,
        x * y * t - z * s,
        y * y * t + c,
        z * y * t + x * s,
        0.0,
        x * z * t + y * s,
        y * z * t - x * s,
        z * z * t + c,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
    ]
}

/// Transform a point (`w = 1`) and perform the perspective divide.
#[must_use]
pub fn transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    let x = m[0] * p.x + m[4] * p.y + m[8] * p.z + m[12];
    let y = m[1] * p.x + m[5] * p.y + m[9] * p.z + m[13];
    let z = m[2] * p.x + m[6] * p.y + m[10] * p.z + m[14];
    let w = m[3] * p.x + m[7] * p.y + m[11] * p.z + m[15];
    if w == 0.0 || w == 1.0 {
        Vec3::new(x, y, z)
    } else {
        Vec3::new(x / w, y / w, z / w)
    }
}

/// Transform a direction (`w = 0`); translation is ignored.
#[must_use]
pub fn transform_vector(m: &Mat4, v: Vec3) -> Vec3 {
    Vec3::new(
        m[0] * v.x + m[4] * v.y + m[8] * v.z,
        m[1] * v.x + m[5] * v.y + m[9] * v.z,
        m[2] * v.x + m[6] * v.y + m[10] * v.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::lcg::Lcg;

    fn random_matrix(rng: &mut Lcg) -> Mat4 {
        let mut m = [0.0; 16];
        for v in &mut m {
            *v = rng.next_f32() * 2.0 - 1.0;
        }
        m
    }

    fn assert_mat_close(a: &Mat4, b: &Mat4, tol: f32) {
        for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            let scale = x.abs().max(y.abs()).max(1.0);
            assert!(
                (x - y).abs() <= tol * scale,
                "element {i} differs: {x} vs {y}"
            );
        }
    }

    #[test]
    fn multiply_by_identity_is_noop() {
        let mut rng = Lcg::new(7);
        let m = random_matrix(&mut rng);
        assert_eq!(multiply(&IDENTITY, &m), m);
        assert_eq!(multiply(&m, &IDENTITY), m);
    }

    #[test]
    fn multiply_is_associative() {
        let mut rng = Lcg::new(99);
        for _ in 0..50 {
            let a = random_matrix(&mut rng);
            let b = random_matrix(&mut rng);
            let c = random_matrix(&mut rng);
            let left = multiply(&multiply(&a, &b), &c);
            let right = multiply(&a, &multiply(&b, &c));
            assert_mat_close(&left, &right, 1e-5);
        }
    }

    #[test]
    fn multiply_matches_glam() {
        let mut rng = Lcg::new(3);
        let a = random_matrix(&mut rng);
        let b = random_matrix(&mut rng);
        let expected = glam::Mat4::from_cols_array(&a)
            * glam::Mat4::from_cols_array(&b);
        assert_mat_close(&multiply(&a, &b), &expected.to_cols_array(), 1e-6);
    }

    #[test]
    fn multiply_is_not_commutative() {
        let t = translate(1.0, 0.0, 0.0);
        let r = rotate_axis_angle(Vec3::Z, std::f32::consts::FRAC_PI_2);
        let tr = transform_point(&multiply(&t, &r), Vec3::X);
        let rt = transform_point(&multiply(&r, &t), Vec3::X);
        assert!((tr - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
        assert!((rt - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn rotation_at_zero_is_identity() {
        let axis = Vec3::new(0.3, -0.5, 0.8).normalize();
        assert_mat_close(&rotate_axis_angle(axis, 0.0), &IDENTITY, 1e-7);
    }

    #[test]
    fn rotation_preserves_length() {
        let mut rng = Lcg::new(2024);
        for _ in 0..100 {
            let axis = rng.unit_vector();
            let angle = rng.next_f32() * 20.0 - 10.0;
            let v = Vec3::new(
                rng.next_f32() * 4.0 - 2.0,
                rng.next_f32() * 4.0 - 2.0,
                rng.next_f32() * 4.0 - 2.0,
            );
            let rotated = transform_vector(&rotate_axis_angle(axis, angle), v);
            assert!(
                (rotated.length() - v.length()).abs() < 1e-5,
                "{} vs {}",
                rotated.length(),
                v.length()
            );
        }
    }

    #[test]
    fn rotation_matches_glam_axis_angle() {
        let axis = Vec3::new(1.0, 2.0, -0.5).normalize();
        let expected = glam::Mat4::from_axis_angle(axis, 1.3);
        assert_mat_close(
            &rotate_axis_angle(axis, 1.3),
            &expected.to_cols_array(),
            1e-6,
        );
    }

    #[test]
    fn rotation_leaves_axis_fixed() {
        let axis = Vec3::new(-0.2, 0.9, 0.4).normalize();
        let rotated = transform_vector(&rotate_axis_angle(axis, 2.1), axis);
        assert!((rotated - axis).length() < 1e-6);
    }

    #[test]
    fn translate_moves_points_not_vectors() {
        let m = translate(1.0, -2.0, 3.0);
        assert_eq!(transform_point(&m, Vec3::ZERO), Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(transform_vector(&m, Vec3::X), Vec3::X);
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth() {
        let (near, far) = (0.1, 100.0);
        let proj = perspective(std::f32::consts::FRAC_PI_4, 1.5, near, far);
        let at_near = transform_point(&proj, Vec3::new(0.0, 0.0, -near));
        let at_far = transform_point(&proj, Vec3::new(0.0, 0.0, -far));
        assert!(at_near.z.abs() < 1e-5, "near depth {}", at_near.z);
        assert!((at_far.z - 1.0).abs() < 1e-5, "far depth {}", at_far.z);

        let mid = transform_point(&proj, Vec3::new(0.0, 0.0, -8.0));
        assert!(mid.z > 0.0 && mid.z < 1.0);
    }

    #[test]
    fn perspective_matches_glam_rh() {
        let proj = perspective(0.9, 16.0 / 9.0, 0.1, 100.0);
        let expected = glam::Mat4::perspective_rh(0.9, 16.0 / 9.0, 0.1, 100.0);
        assert_mat_close(&proj, &expected.to_cols_array(), 1e-5);
    }
}
