//! Construction of rank-2 tensors from scalar or per-axis components.
use crate::error::{Error, Result};
use crate::Real;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How scalar inputs are distributed over the axes of a rank-2 tensor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistributionMode {
    /// A single value on every active diagonal entry.
    Isotropic,
    /// One independent value per active axis, diagonal only.
    Orthotropic,
    /// A full (possibly non-symmetric) tensor, row by row.
    Anisotropic,
}

impl DistributionMode {
    /// The exact number of scalar components required for an element of the
    /// given topological dimension.
    pub fn required_components(&self, dim: usize) -> usize {
        match self {
            DistributionMode::Isotropic => 1,
            DistributionMode::Orthotropic => dim,
            DistributionMode::Anisotropic => dim * dim,
        }
    }
}

impl fmt::Display for DistributionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DistributionMode::Isotropic => "isotropic",
            DistributionMode::Orthotropic => "orthotropic",
            DistributionMode::Anisotropic => "anisotropic",
        };
        f.write_str(name)
    }
}

fn check_arity<T: Real>(dim: usize, values: &[T], mode: DistributionMode) -> Result<()> {
    let expected = mode.required_components(dim);
    if values.len() != expected {
        return Err(Error::InvalidArity {
            dim,
            mode,
            expected,
            provided: values.len(),
        });
    }
    Ok(())
}

/// Builds a rank-2 tensor in the fixed 3D ambient space from per-axis
/// components.
///
/// Axes beyond `dim` are zero-padded, so 1D and 2D elements embed into 3D.
/// The length of `values` must match the dimension/mode pair exactly
/// (1 for isotropic, `dim` for orthotropic, `dim²` for anisotropic, row by
/// row); anything else is an [`Error::InvalidArity`]. One-dimensional
/// elements only admit an isotropic distribution.
///
/// # Panics
///
/// Panics if `dim` is not 1, 2 or 3.
pub fn distribution_tensor<T>(dim: usize, values: &[T], mode: DistributionMode) -> Result<Matrix3<T>>
where
    T: Real,
{
    assert!((1..=3).contains(&dim), "element dimension must be 1, 2 or 3");

    if dim == 1 && mode != DistributionMode::Isotropic {
        return Err(Error::UnsupportedCombination {
            what: "one-dimensional elements cannot have a non-isotropic distribution",
        });
    }
    check_arity(dim, values, mode)?;

    let mut tensor = Matrix3::zeros();
    match mode {
        DistributionMode::Isotropic => {
            for i in 0..dim {
                tensor[(i, i)] = values[0];
            }
        }
        DistributionMode::Orthotropic => {
            for i in 0..dim {
                tensor[(i, i)] = values[i];
            }
        }
        DistributionMode::Anisotropic => {
            for i in 0..dim {
                for j in 0..dim {
                    tensor[(i, j)] = values[dim * i + j];
                }
            }
        }
    }
    Ok(tensor)
}

/// Identity restricted to the first `dim` axes.
pub(crate) fn active_identity<T: Real>(dim: usize) -> Matrix3<T> {
    let mut eye = Matrix3::zeros();
    for i in 0..dim {
        eye[(i, i)] = T::one();
    }
    eye
}

/// Rotates a tensor by the given rotation matrix, returning `R·A·Rᵀ`.
///
/// Used to express the tensor of a lower-dimensional element (fracture or
/// well) in its local frame; see
/// [`geometry::lower_dim_rotation_matrix`](crate::geometry::lower_dim_rotation_matrix).
pub fn rotated<T: Real>(tensor: &Matrix3<T>, rotation: &Matrix3<T>) -> Matrix3<T> {
    rotation * tensor * rotation.transpose()
}

/// Transforms a global vector into the local element frame, `Rᵀ·v`.
pub fn to_local<T: Real>(vector: &Vector3<T>, rotation: &Matrix3<T>) -> Vector3<T> {
    rotation.transpose() * vector
}
