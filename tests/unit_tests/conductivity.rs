use karst::conductivity::{mixture_conductivity, mixture_conductivity_rotated, MeanMode};
use karst::tensor::DistributionMode;
use karst::Error;
use matrixcompare::assert_matrix_eq;
use nalgebra::{Matrix3, Vector3};
use proptest::prelude::*;

use DistributionMode::{Anisotropic, Isotropic, Orthotropic};
use MeanMode::{Arithmetic, Geometric};

#[test]
fn arithmetic_mean_is_a_porosity_weighted_blend() {
    let n = 0.3;
    let lambda_s = 2.5;
    let lambda_f = 0.6;

    let lambda = mixture_conductivity(3, n, lambda_f, &[lambda_s], Isotropic, Arithmetic).unwrap();
    let expected = (1.0 - n) * lambda_s + n * lambda_f;
    assert_matrix_eq!(
        lambda,
        Matrix3::from_diagonal_element(expected),
        comp = abs,
        tol = 1e-14
    );

    // In 2D the third axis stays inactive, for the fluid part too
    let lambda = mixture_conductivity(2, n, lambda_f, &[lambda_s], Isotropic, Arithmetic).unwrap();
    assert_matrix_eq!(
        lambda,
        Matrix3::from_diagonal(&Vector3::new(expected, expected, 0.0)),
        comp = abs,
        tol = 1e-14
    );
}

#[test]
fn arithmetic_orthotropic_blends_per_axis() {
    let n = 0.25;
    let lambda_f = 0.5;
    let solid = [3.0, 2.0];

    let lambda = mixture_conductivity(2, n, lambda_f, &solid, Orthotropic, Arithmetic).unwrap();
    let expected = Vector3::new(
        (1.0 - n) * solid[0] + n * lambda_f,
        (1.0 - n) * solid[1] + n * lambda_f,
        0.0,
    );
    assert_matrix_eq!(
        lambda,
        Matrix3::from_diagonal(&expected),
        comp = abs,
        tol = 1e-14
    );
}

#[test]
fn arithmetic_anisotropic_adds_fluid_on_the_diagonal_only() {
    let n = 0.1;
    let lambda_f = 1.0;
    let solid = [1.0, 2.0, 3.0, 4.0];

    let lambda = mixture_conductivity(2, n, lambda_f, &solid, Anisotropic, Arithmetic).unwrap();
    #[rustfmt::skip]
    let expected = Matrix3::new(
        0.9 * 1.0 + 0.1, 0.9 * 2.0,       0.0,
        0.9 * 3.0,       0.9 * 4.0 + 0.1, 0.0,
        0.0,             0.0,             0.0,
    );
    assert_matrix_eq!(lambda, expected, comp = abs, tol = 1e-14);
}

#[test]
fn geometric_mean_combines_exponentially() {
    let n = 0.4;
    let lambda_s: f64 = 2.0;
    let lambda_f: f64 = 0.6;

    let lambda = mixture_conductivity(3, n, lambda_f, &[lambda_s], Isotropic, Geometric).unwrap();
    let expected = lambda_f.powf(n) * lambda_s.powf(1.0 - n);
    assert_matrix_eq!(
        lambda,
        Matrix3::from_diagonal_element(expected),
        comp = abs,
        tol = 1e-14
    );

    let solid = [3.0, 2.0, 1.5];
    let lambda = mixture_conductivity(3, n, lambda_f, &solid, Orthotropic, Geometric).unwrap();
    for i in 0..3 {
        let expected = lambda_f.powf(n) * solid[i].powf(1.0 - n);
        assert!((lambda[(i, i)] - expected).abs() < 1e-14);
    }
}

#[test]
fn geometric_anisotropic_is_unsupported() {
    let solid = [1.0; 9];
    let result = mixture_conductivity(3, 0.3, 0.6, &solid, Anisotropic, Geometric);
    assert!(matches!(result, Err(Error::UnsupportedCombination { .. })));
}

#[test]
fn one_dimensional_elements_must_be_isotropic() {
    for mean in [Arithmetic, Geometric] {
        let result = mixture_conductivity(1, 0.3, 0.6, &[1.0, 2.0], Orthotropic, mean);
        assert!(matches!(result, Err(Error::UnsupportedCombination { .. })));
    }
}

#[test]
fn solid_arity_is_checked() {
    let result = mixture_conductivity(3, 0.3, 0.6, &[1.0, 2.0], Orthotropic, Arithmetic);
    assert_eq!(
        result,
        Err(Error::InvalidArity {
            dim: 3,
            mode: Orthotropic,
            expected: 3,
            provided: 2,
        })
    );
}

#[test]
fn lower_dimensional_elements_are_rotated() {
    // 90 degree rotation about z
    #[rustfmt::skip]
    let rotation = Matrix3::new(
        0.0, -1.0, 0.0,
        1.0,  0.0, 0.0,
        0.0,  0.0, 1.0,
    );
    let solid = [3.0, 2.0];

    let unrotated =
        mixture_conductivity(2, 0.0, 0.0, &solid, Orthotropic, Arithmetic).unwrap();
    let lambda = mixture_conductivity_rotated(
        2, 0.0, 0.0, &solid, Orthotropic, Arithmetic, 3, &rotation,
    )
    .unwrap();
    assert_matrix_eq!(
        lambda,
        rotation * unrotated * rotation.transpose(),
        comp = abs,
        tol = 1e-14
    );

    // Same intrinsic and mesh dimension: no rotation applied
    let lambda = mixture_conductivity_rotated(
        2, 0.0, 0.0, &solid, Orthotropic, Arithmetic, 2, &rotation,
    )
    .unwrap();
    assert_matrix_eq!(lambda, unrotated, comp = abs, tol = 1e-14);
}

proptest! {
    #[test]
    fn both_means_interpolate_between_the_phases(
        n in 0.0f64..=1.0,
        lambda_s in 0.1f64..10.0,
        lambda_f in 0.1f64..10.0,
    ) {
        let lo = lambda_s.min(lambda_f);
        let hi = lambda_s.max(lambda_f);
        for mean in [Arithmetic, Geometric] {
            let lambda =
                mixture_conductivity(3, n, lambda_f, &[lambda_s], Isotropic, mean).unwrap();
            let value = lambda[(0, 0)];
            prop_assert!(value >= lo - 1e-12 && value <= hi + 1e-12);
        }
    }
}
