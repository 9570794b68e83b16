//! Effective thermal conductivity of a fluid-saturated porous solid.
use crate::error::{Error, Result};
use crate::tensor::{self, distribution_tensor, DistributionMode};
use crate::Real;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How fluid and solid conductivities combine into a mixture value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeanMode {
    Arithmetic,
    Geometric,
}

impl fmt::Display for MeanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MeanMode::Arithmetic => "arithmetic",
            MeanMode::Geometric => "geometric",
        })
    }
}

/// Mixture thermal conductivity tensor for porosity `n`.
///
/// The arithmetic mean weighs the solid conductivity tensor by `1 - n` and
/// adds the isotropic fluid contribution `n·λf` on the active diagonal
/// entries. The geometric mean combines the diagonal entries as
/// `λf^n · λs^(1-n)` and has no tensor generalization, so requesting it
/// with an anisotropic distribution is an [`Error::UnsupportedCombination`].
///
/// The arity of `solid_conductivity` follows
/// [`distribution_tensor`](crate::tensor::distribution_tensor).
pub fn mixture_conductivity<T: Real>(
    dim: usize,
    porosity: T,
    fluid_conductivity: T,
    solid_conductivity: &[T],
    mode: DistributionMode,
    mean: MeanMode,
) -> Result<Matrix3<T>> {
    match mean {
        MeanMode::Arithmetic => {
            let solid = distribution_tensor(dim, solid_conductivity, mode)?;
            let fluid = tensor::active_identity(dim) * (porosity * fluid_conductivity);
            Ok(solid * (T::one() - porosity) + fluid)
        }
        MeanMode::Geometric => {
            if mode == DistributionMode::Anisotropic {
                return Err(Error::UnsupportedCombination {
                    what: "the geometric mean is not defined for an anisotropic conductivity distribution",
                });
            }
            let complement = T::one() - porosity;
            let powered: Vec<T> = solid_conductivity
                .iter()
                .map(|&lambda| lambda.powf(complement))
                .collect();
            let solid = distribution_tensor(dim, &powered, mode)?;
            Ok(solid * fluid_conductivity.powf(porosity))
        }
    }
}

/// Same as [`mixture_conductivity`], but rotates the result into the local
/// frame when the element's intrinsic dimension is lower than the mesh
/// dimension.
#[allow(clippy::too_many_arguments)]
pub fn mixture_conductivity_rotated<T: Real>(
    dim: usize,
    porosity: T,
    fluid_conductivity: T,
    solid_conductivity: &[T],
    mode: DistributionMode,
    mean: MeanMode,
    mesh_dim: usize,
    rotation: &Matrix3<T>,
) -> Result<Matrix3<T>> {
    let lambda = mixture_conductivity(dim, porosity, fluid_conductivity, solid_conductivity, mode, mean)?;
    if dim < mesh_dim {
        Ok(tensor::rotated(&lambda, rotation))
    } else {
        Ok(lambda)
    }
}
