//! Library-wide error type.
use crate::tensor::DistributionMode;
use thiserror::Error;

/// Convenience alias for results carrying [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared by all tensor-construction and evolution routines.
///
/// Every variant signals a structural configuration mistake rather than a
/// transient numeric fault, so callers are expected to abort the current
/// evaluation instead of retrying. Note that an infinite Peclet number from
/// zero diffusivity is a well-defined value, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The number of supplied components does not match what the selected
    /// dimension/distribution pair requires.
    #[error("{mode} distribution in {dim}D requires exactly {expected} value(s), but {provided} were provided")]
    InvalidArity {
        dim: usize,
        mode: DistributionMode,
        expected: usize,
        provided: usize,
    },

    /// A structurally disallowed pairing of options, such as a non-isotropic
    /// distribution on a one-dimensional element.
    #[error("unsupported combination: {what}")]
    UnsupportedCombination { what: &'static str },

    /// A permeability model was invoked on an element dimension it does not
    /// support.
    #[error("the {model} permeability model cannot be used for {dim}D elements")]
    DimensionNotSupported { model: &'static str, dim: usize },

    /// A porosity outside the open interval (0, 1) reached an evolution law
    /// that divides by the porosity or its complement.
    #[error("porosity must lie strictly between 0 and 1")]
    DegeneratePorosity,

    /// Rock and fluid densities coincide, or the mixture density vanished,
    /// so the void mass fraction is undefined.
    #[error("rock and fluid densities are either equal or the mixture density is zero")]
    DegenerateDensity,
}
