//! Permeability models: constant, cubic-law fracture and Kozeny-Carman.
use crate::error::{Error, Result};
use crate::porosity::check_porosity;
use crate::tensor::{distribution_tensor, DistributionMode};
use crate::Real;
use log::debug;
use nalgebra::Matrix3;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// Maps element state to a permeability tensor.
///
/// Models are immutable configuration objects: constructed once per
/// simulation from user-supplied coefficients and then evaluated many
/// times, so a model can be shared read-only across concurrent element
/// evaluations. A non-empty `k_override` substitutes an externally computed
/// component vector (spatially or temporally varying permeability) for the
/// stored one; an empty slice selects the stored vector.
pub trait PermeabilityModel<T: Real> {
    fn permeability(
        &self,
        dim: usize,
        porosity: T,
        scale_factor: T,
        k_override: &[T],
    ) -> Result<Matrix3<T>>;
}

/// Permeability from a fixed component vector, valid for any element
/// dimension. Ignores porosity and the scale factor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstantPermeability<T> {
    k0: Vec<T>,
    mode: DistributionMode,
}

impl<T: Real> ConstantPermeability<T> {
    pub fn new(k0: Vec<T>, mode: DistributionMode) -> Self {
        Self { k0, mode }
    }
}

impl<T: Real> PermeabilityModel<T> for ConstantPermeability<T> {
    fn permeability(
        &self,
        dim: usize,
        _porosity: T,
        _scale_factor: T,
        k_override: &[T],
    ) -> Result<Matrix3<T>> {
        let values = if k_override.is_empty() {
            &self.k0[..]
        } else {
            k_override
        };
        distribution_tensor(dim, values, self.mode)
    }
}

/// Fracture permeability from the cubic law, for lower-dimensional (1D and
/// 2D) elements only. The result is always a single-value isotropic tensor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicLawPermeability<T> {
    aperture: T,
    reservoir_thickness: T,
}

impl<T: Real> CubicLawPermeability<T> {
    /// An `aperture` of zero means "derive the aperture from the element
    /// scale factor"; `reservoir_thickness` corrects the scale factor of 1D
    /// fractures (one for 2D fractures).
    pub fn new(aperture: T, reservoir_thickness: T) -> Self {
        Self {
            aperture,
            reservoir_thickness,
        }
    }

    /// The aperture entering the cubic law: the configured one if nonzero,
    /// otherwise the element scale factor corrected by the reservoir
    /// thickness.
    pub fn effective_aperture(&self, scale_factor: T) -> T {
        if self.aperture == T::zero() {
            scale_factor / self.reservoir_thickness
        } else {
            self.aperture
        }
    }
}

impl<T: Real> Default for CubicLawPermeability<T> {
    fn default() -> Self {
        Self::new(T::zero(), T::one())
    }
}

impl<T: Real> PermeabilityModel<T> for CubicLawPermeability<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn permeability(
        &self,
        dim: usize,
        _porosity: T,
        scale_factor: T,
        _k_override: &[T],
    ) -> Result<Matrix3<T>> {
        if dim == 3 {
            return Err(Error::DimensionNotSupported {
                model: "cubic-law",
                dim,
            });
        }

        // TODO: the tensor is built from the raw scale factor, not from
        // `effective_aperture`; revisit against the cubic-law literature
        // before changing either.
        let k = scale_factor * scale_factor / 12.0;
        distribution_tensor(dim, &[k], DistributionMode::Isotropic)
    }
}

/// Porosity-dependent permeability after Kozeny-Carman, for 3D elements
/// only.
///
/// The stored component vector is pre-scaled by `(1 - n0)^m / n0^n` once at
/// construction; every evaluation then applies `n^n / (1 - n)^m` with the
/// current porosity to a fresh copy of the stored (or overriding) values,
/// so the returned permeability grows monotonically with the porosity ratio
/// and evaluating at `n = n0` recovers the initial permeability exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KozenyCarmanPermeability<T> {
    k0: Vec<T>,
    exponent_m: T,
    exponent_n: T,
    mode: DistributionMode,
}

impl<T: Real> KozenyCarmanPermeability<T> {
    /// Constructs the model with the classical Kozeny-Carman exponents
    /// `m = 2`, `n = 3`.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn new(k0: Vec<T>, initial_porosity: T, mode: DistributionMode) -> Result<Self> {
        Self::with_exponents(k0, initial_porosity, 2.0, 3.0, mode)
    }

    /// Fails with [`Error::DegeneratePorosity`] if `initial_porosity` does
    /// not lie strictly between 0 and 1.
    pub fn with_exponents(
        mut k0: Vec<T>,
        initial_porosity: T,
        exponent_m: T,
        exponent_n: T,
        mode: DistributionMode,
    ) -> Result<Self> {
        check_porosity(initial_porosity)?;
        let c = (T::one() - initial_porosity).powf(exponent_m) / initial_porosity.powf(exponent_n);
        debug!("pre-scaling Kozeny-Carman permeability components by {:?}", c);
        for k in &mut k0 {
            *k *= c;
        }
        Ok(Self {
            k0,
            exponent_m,
            exponent_n,
            mode,
        })
    }
}

impl<T: Real> PermeabilityModel<T> for KozenyCarmanPermeability<T> {
    fn permeability(
        &self,
        dim: usize,
        porosity: T,
        _scale_factor: T,
        k_override: &[T],
    ) -> Result<Matrix3<T>> {
        if dim != 3 {
            return Err(Error::DimensionNotSupported {
                model: "Kozeny-Carman",
                dim,
            });
        }
        check_porosity(porosity)?;

        let c = porosity.powf(self.exponent_n) / (T::one() - porosity).powf(self.exponent_m);
        let values = if k_override.is_empty() {
            &self.k0[..]
        } else {
            k_override
        };
        let scaled: Vec<T> = values.iter().map(|&k| c * k).collect();
        distribution_tensor(dim, &scaled, self.mode)
    }
}
