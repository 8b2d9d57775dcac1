use super::*;
use crate::cfg::SATURATED_INVERSE;
use nalgebra::{matrix, vector, Matrix3, Matrix4, Vector2, Vector3, Vector4};
use proptest::prelude::*;

fn close2(a: Vector2<f64>, b: Vector2<f64>, tol: f64) -> bool {
    (a - b).norm() < tol
}

fn skewed() -> Affine2 {
    Affine2::from_coeffs(1.5, 0.3, -2.0, -0.4, 0.8, 1.25)
}

#[test]
fn compose_applies_right_operand_first() {
    let a = Affine2::translation(vector![1.0, 0.0]);
    let b = Affine2::scale(2.0, 3.0);
    let p = vector![1.0, 1.0];
    // scale then translate
    assert!(close2((a * b) * p, vector![3.0, 3.0], 1e-12));
    // translate then scale
    assert!(close2((b * a) * p, vector![4.0, 3.0], 1e-12));
}

#[test]
fn coeffs_round_trip_layout() {
    let a = skewed();
    assert_eq!(a.coeffs(), [1.5, 0.3, -2.0, -0.4, 0.8, 1.25]);
    let p = a * vector![2.0, -1.0];
    assert!((p.x - (1.5 * 2.0 - 0.3 - 2.0)).abs() < 1e-12);
    assert!((p.y - (-0.8 - 0.8 + 1.25)).abs() < 1e-12);
}

#[test]
fn general_inverse_undoes_map() {
    let a = skewed();
    assert!((a * a.inv()).is_identity(1e-20));
    assert!((a.inv() * a).is_identity(1e-20));
    let checked = a.try_inverse().unwrap();
    for (x, y) in checked.coeffs().iter().zip(a.inv().coeffs().iter()) {
        assert!((x - y).abs() < 1e-12);
    }
}

#[test]
fn diagonal_inverse_saturates_zero_terms() {
    let a = Affine2::from_coeffs(0.0, 0.0, 1.0, 0.0, 4.0, 2.0);
    let inv = a.inv();
    let [i11, i12, _, i21, i22, i23] = inv.coeffs();
    assert_eq!(i11, SATURATED_INVERSE);
    assert!(i11.is_finite());
    assert_eq!(i12, 0.0);
    assert_eq!(i21, 0.0);
    assert_eq!(i22, 0.25);
    assert_eq!(i23, -0.5);
    assert!(a.try_inverse().is_none());
}

#[test]
fn anti_diagonal_inverse_is_exact() {
    // x' = 2y + 1, y' = 4x - 3
    let a = Affine2::from_coeffs(0.0, 2.0, 1.0, 4.0, 0.0, -3.0);
    let inv = a.inv();
    assert_eq!(inv.coeffs(), [0.0, 0.25, 0.75, 0.5, 0.0, -0.5]);
    let p = vector![0.7, -1.9];
    assert!(close2(inv * (a * p), p, 1e-12));
}

#[test]
fn quarter_turns_are_exact() {
    let r90 = Affine2::rotation_degrees(90.0);
    assert_eq!(r90.coeffs(), [0.0, -1.0, 0.0, 1.0, 0.0, 0.0]);
    let r180 = Affine2::rotation_degrees(180.0);
    assert_eq!(r180.coeffs(), [-1.0, -0.0, 0.0, 0.0, -1.0, 0.0]);
    let r270 = Affine2::rotation_degrees(-90.0);
    assert_eq!(r270.coeffs(), [0.0, 1.0, 0.0, -1.0, 0.0, 0.0]);
    assert_eq!(Affine2::rotation_degrees(450.0), r90);
    assert_eq!(Affine2::rotation_degrees(720.0), Affine2::identity());
    let r30 = Affine2::rotation_degrees(30.0);
    assert!((r30.m[(1, 0)] - 0.5).abs() < 1e-15);
}

#[test]
fn rotation_and_scale_about_center_fix_center() {
    let c = vector![3.0, -2.0];
    let r = Affine2::rotation_about(c, 37.0);
    assert!(close2(r * c, c, 1e-12));
    let s = Affine2::scale_about(c, 2.0, 0.5);
    assert!(close2(s * c, c, 1e-12));
    assert!(close2(s * vector![4.0, -2.0], vector![5.0, -2.0], 1e-12));
    assert!(r.is_isotropic(1e-12));
    assert!(!s.is_isotropic(1e-6));
}

#[test]
fn place_pins_local_point() {
    let a = skewed().place(1.0, 2.0, 10.0, 20.0);
    assert!(close2(a * vector![1.0, 2.0], vector![10.0, 20.0], 1e-12));
    assert_eq!(a.m, skewed().m);
}

#[test]
fn rect_transform_is_bounding_box() {
    let r = Rect2::new(0.0, 0.0, 2.0, 1.0);
    let out = Affine2::rotation_degrees(90.0) * r;
    assert_eq!(out, Rect2::new(-1.0, 0.0, 0.0, 2.0));
    assert_eq!(skewed() * Rect2::INFINITE, Rect2::INFINITE);
}

#[test]
fn predicates_use_squared_metrics() {
    assert!(Affine2::identity().is_identity(1e-12));
    assert!(Affine2::translation(vector![5.0, 1.0]).is_translation(1e-12));
    assert!(!Affine2::translation(vector![5.0, 1.0]).is_identity(1e-12));
    assert!(Affine2::from_coeffs(0.0, 0.0, 0.0, 0.0, 0.0, 0.0).is_zero(0.0));
    assert!(Affine2::from_coeffs(1e-4, 0.0, 0.0, 0.0, 0.0, 0.0).is_zero(1e-7));
    assert!(!skewed().is_translation(1e-3));
}

#[test]
fn rect_emptiness() {
    assert!(Rect2::new(1.0, 1.0, 1.0, 1.0).is_empty());
    assert!(Rect2::new(1.0, 0.0, 0.0, 1.0).is_empty());
    assert!(!Rect2::new(0.0, 0.0, 0.0, 1.0).is_empty());
    assert!(!Rect2::UNIT_CLIP.is_empty());
    let clipped = Rect2::UNIT_CLIP.intersection(&Rect2::new(2.0, 2.0, 3.0, 3.0));
    assert!(clipped.is_empty());
}

#[test]
fn affine3_inverse_and_projection() {
    let a = Affine3::translation2d(1.0, -2.0)
        * Affine3::rotation2d(0.3)
        * Affine3::scale2d(2.0, 0.5);
    let prod = a * a.inv();
    assert!((prod.m - Matrix3::identity()).norm() < 1e-12);
    assert!((a.determinant() - 1.0).abs() < 1e-12);
    let flat = a.get2d();
    let p = vector![0.4, 1.1];
    let h = a * Vector3::new(p.x, p.y, 1.0);
    assert!(close2(flat * p, vector![h.x, h.y], 1e-12));
    assert_eq!(Affine3::from_affine2(&flat).get2d(), flat);
}

#[test]
fn affine3_singular_inverse_is_zero() {
    let a = Affine3::new(matrix![1.0, 2.0, 3.0; 2.0, 4.0, 6.0; 0.0, 1.0, 1.0]);
    assert_eq!(a.determinant(), 0.0);
    assert_eq!(a.inv(), Affine3::zero());
}

#[test]
fn affine4_inverse_round_trip() {
    let a = Affine4::translation(1.0, 2.0, -3.0)
        * Affine4::rotation(Vector3::new(1.0, 1.0, 0.5), 0.7)
        * Affine4::scale(2.0, 0.5, 1.5);
    let prod = a * a.inv();
    assert!((prod.m - Matrix4::identity()).norm() < 1e-12);
    assert!((a.determinant() - 1.5).abs() < 1e-12);
    let mut persp = a;
    persp.m[(3, 0)] = 0.1;
    persp.m[(3, 2)] = -0.2;
    let prod = persp * persp.inv();
    assert!((prod.m - Matrix4::identity()).norm() < 1e-10);
    let flat = Affine4::scale(0.0, 1.0, 1.0);
    assert_eq!(flat.inv(), Affine4::zero());
}

#[test]
fn affine4_axis_rotations_agree() {
    let z = Affine4::rotation(Vector3::new(0.0, 0.0, 2.0), 0.4);
    assert!((z.m - Affine4::rotation_z(0.4).m).norm() < 1e-12);
    let x = Affine4::rotation(Vector3::new(3.0, 0.0, 0.0), -1.1);
    assert!((x.m - Affine4::rotation_x(-1.1).m).norm() < 1e-12);
    let y = Affine4::rotation(Vector3::new(0.0, 0.5, 0.0), 2.0);
    assert!((y.m - Affine4::rotation_y(2.0).m).norm() < 1e-12);
    assert_eq!(Affine4::rotation(Vector3::zeros(), 1.0), Affine4::identity());
    // rotation_x maps y to z
    let v = Affine4::rotation_x(std::f64::consts::FRAC_PI_2) * Vector4::new(0.0, 1.0, 0.0, 1.0);
    assert!((v - Vector4::new(0.0, 0.0, 1.0, 1.0)).norm() < 1e-12);
}

#[test]
fn affine4_projects_to_plane() {
    let a = Affine4::translation(1.0, 2.0, 3.0) * Affine4::rotation_z(0.25);
    let flat = a.get2d(0.0);
    let r = Affine2::translation(vector![1.0, 2.0]) * Affine2::rotation(0.25);
    for (x, y) in flat.coeffs().iter().zip(r.coeffs().iter()) {
        assert!((x - y).abs() < 1e-12);
    }
    // a z offset moves through the z column
    let mut tilted = Affine4::identity();
    tilted.m[(0, 2)] = 0.5;
    assert!(close2(tilted.get2d(2.0) * vector![0.0, 0.0], vector![1.0, 0.0], 1e-12));
    let mut persp = Affine4::identity();
    persp.m[(3, 2)] = 1.0;
    persp.m[(3, 3)] = 0.0;
    let h = persp.get2d_persp(4.0);
    assert_eq!(h.m[(2, 2)], 4.0);
    assert_eq!(h.m[(0, 0)], 1.0);
    assert_eq!(
        Affine4::from_affine2(&skewed()).get2d(7.0),
        skewed(),
        "embedded 2D map ignores depth"
    );
}

fn well_conditioned() -> impl Strategy<Value = Affine2> {
    (
        -3.2f64..3.2,
        0.2f64..5.0,
        0.2f64..5.0,
        -0.5f64..0.5,
        -10.0f64..10.0,
        -10.0f64..10.0,
    )
        .prop_map(|(angle, sx, sy, shear, tx, ty)| {
            Affine2::translation(vector![tx, ty])
                * Affine2::rotation(angle)
                * Affine2::from_coeffs(sx, shear, 0.0, 0.0, sy, 0.0)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn composition_matches_sequential_application(
        a in well_conditioned(),
        b in well_conditioned(),
        x in -50.0f64..50.0,
        y in -50.0f64..50.0,
    ) {
        let p = vector![x, y];
        let lhs = (a * b) * p;
        let rhs = a * (b * p);
        prop_assert!((lhs - rhs).norm() <= 1e-9 * (1.0 + rhs.norm()));
    }

    #[test]
    fn inverse_is_two_sided(a in well_conditioned()) {
        prop_assert!((a * a.inv()).is_identity(1e-16));
        let back = a.inv().inv();
        for (x, y) in back.coeffs().iter().zip(a.coeffs().iter()) {
            prop_assert!((x - y).abs() <= 1e-9 * (1.0 + y.abs()));
        }
    }

    #[test]
    fn infinite_rect_is_fixpoint(a in well_conditioned()) {
        prop_assert_eq!(a * Rect2::INFINITE, Rect2::INFINITE);
    }
}
