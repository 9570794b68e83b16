use karst::geometry::{lower_dim_rotation_matrix, scale_factor, ElementGeometry, VertexElement};
use matrixcompare::assert_matrix_eq;
use nalgebra::{Matrix3, Point3, Vector3};

#[test]
fn characteristic_lengths_are_pairwise_extrema() {
    let triangle = crate::unit_triangle();
    assert!((triangle.hmin() - 1.0).abs() < 1e-14);
    assert!((triangle.hmax() - 1.0).abs() < 1e-14);

    let cube = crate::unit_cube();
    assert!((cube.hmin() - 1.0).abs() < 1e-14);
    assert!((cube.hmax() - 3.0f64.sqrt()).abs() < 1e-14);
}

#[test]
fn one_dimensional_volume_is_the_endpoint_distance() {
    let segment = VertexElement::new(
        1,
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.5, 0.0, 0.0),
        ],
    );
    assert_eq!(segment.dim(), 1);
    assert_eq!(segment.hmin(), 1.0);
    assert_eq!(segment.volume(), 2.5);
}

#[test]
fn higher_dimensional_volume_defaults_to_zero() {
    let triangle = crate::unit_triangle();
    assert_eq!(triangle.volume(), 0.0);
    let triangle = triangle.with_volume(0.25);
    assert_eq!(triangle.volume(), 0.25);
}

#[test]
fn well_elements_carry_an_orthonormal_frame() {
    // axis-aligned well along x
    let vertices = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
    let r = lower_dim_rotation_matrix(1, &vertices);

    assert_matrix_eq!(r * r.transpose(), Matrix3::identity(), comp = abs, tol = 1e-14);
    // the tangential axis is the first column
    assert_matrix_eq!(
        r.column(0).into_owned(),
        Vector3::new(1.0, 0.0, 0.0),
        comp = abs,
        tol = 1e-14
    );

    // oblique well
    let vertices = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)];
    let r = lower_dim_rotation_matrix(1, &vertices);
    assert_matrix_eq!(r * r.transpose(), Matrix3::identity(), comp = abs, tol = 1e-14);
    let tangent = Vector3::new(1.0, 1.0, 1.0).normalize();
    assert_matrix_eq!(r.column(0).into_owned(), tangent, comp = abs, tol = 1e-14);
}

#[test]
fn horizontal_fractures_keep_the_global_frame() {
    let vertices = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let r = lower_dim_rotation_matrix(2, &vertices);
    assert_matrix_eq!(r, Matrix3::identity(), comp = abs, tol = 1e-14);
}

#[test]
fn inclined_fractures_get_a_horizontal_tangential_axis() {
    // vertical fracture in the x-z plane
    let vertices: [Point3<f64>; 3] = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ];
    let r = lower_dim_rotation_matrix(2, &vertices);

    assert_matrix_eq!(r * r.transpose(), Matrix3::identity(), comp = abs, tol = 1e-14);
    // tangential axis stays horizontal
    assert!(r[(2, 0)].abs() < 1e-14);
    // the normal is the y axis, up to sign
    assert!(r.column(2).dot(&Vector3::y()).abs() > 1.0 - 1e-14);
}

#[test]
fn scale_factor_depends_on_the_dimension_pairing() {
    // fracture aperture in a 3D mesh passes through
    assert_eq!(scale_factor(3, 2, 1e-3), 1e-3);
    // well diameter becomes the circular cross-section area
    let d = 0.2;
    assert!((scale_factor(3, 1, d) - std::f64::consts::PI * d * d / 4.0).abs() < 1e-15);
    // matrix elements in a 3D mesh are unscaled
    assert_eq!(scale_factor(3, 3, 7.0), 1.0);
    // lower-dimensional meshes pass the raw value through
    assert_eq!(scale_factor(2, 2, 5.0), 5.0);
    assert_eq!(scale_factor(2, 1, 5.0), 5.0);
    assert_eq!(scale_factor(1, 1, 5.0), 5.0);
}

#[test]
#[should_panic(expected = "element dimension must be 1, 2 or 3")]
fn element_dimension_is_validated() {
    let _ = VertexElement::new(
        4,
        vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
    );
}
