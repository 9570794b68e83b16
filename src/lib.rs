//! Numerical stabilization and transport-coefficient kernels for
//! porous-media finite element simulation.
//!
//! This crate provides the element-local numerics that a
//! thermo-hydro-mechanical-chemical simulator needs between mesh traversal
//! and residual assembly, both of which remain with the host code:
//!
//! - construction of permeability, thermal-conductivity and dispersion
//!   tensors from scalar or per-axis inputs ([`tensor`], [`permeability`],
//!   [`conductivity`], [`dispersion`]),
//! - porosity evolution laws and mixture densities ([`porosity`]),
//! - the SU/PG (Streamline-Upwind/Petrov-Galerkin) stabilization engine,
//!   including Peclet/Courant diagnostics ([`stabilization`]).
//!
//! All components are pure functions of their arguments plus immutable
//! configuration: they are invoked once per quadrature point per element and
//! may be evaluated concurrently across elements without synchronization.
//! Tensors live in a fixed three-dimensional ambient space; 1D and 2D
//! elements embed into it with zero-padded axes.

pub mod conductivity;
pub mod dispersion;
pub mod error;
pub mod geometry;
pub mod permeability;
pub mod porosity;
pub mod stabilization;
pub mod tensor;

pub use error::{Error, Result};

pub extern crate nalgebra;

use nalgebra::RealField;

/// Scalar type used throughout `karst`.
///
/// A trait alias for the traits every numerical routine in this crate needs.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}
