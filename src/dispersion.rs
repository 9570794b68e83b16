//! Molecular-diffusion / mechanical-dispersion tensors for solute
//! transport.
use crate::Real;
use nalgebra::{Matrix3, Vector3};
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// Combined molecular-diffusion and mechanical-dispersion tensor.
///
/// `velocity_local` is the advective velocity expressed in the local
/// element frame (see [`tensor::to_local`](crate::tensor::to_local)). With
/// zero velocity the result degenerates to pure molecular diffusion,
/// `diffusion_factor` on the full diagonal. Otherwise each entry follows
/// the classical dispersion formula with longitudinal and transverse
/// dispersivities `αL` and `αT`; diagonal entries beyond the active axes of
/// the element/mesh pairing receive no contribution at all, while the
/// off-diagonal couplings are always populated symmetrically.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn dispersion_tensor<T: Real>(
    velocity_local: &Vector3<T>,
    dispersivity_longitudinal: T,
    dispersivity_transverse: T,
    dim: usize,
    mesh_dim: usize,
    diffusion_factor: T,
) -> Matrix3<T> {
    let v = velocity_local;
    let v_n = v.norm();
    if v_n == 0.0 {
        return Matrix3::from_diagonal(&Vector3::repeat(diffusion_factor));
    }

    let al = dispersivity_longitudinal;
    let at = dispersivity_transverse;

    let mut d00 = (at * (v.y * v.y + v.z * v.z) + al * v.x * v.x) / v_n;
    d00 += diffusion_factor;

    let d01 = (al - at) * v.x * v.y / v_n;
    let d02 = (al - at) * v.x * v.z / v_n;

    let mut d11 = 0.0;
    if mesh_dim >= dim && dim > 1 {
        d11 += (at * (v.x * v.x + v.z * v.z) + al * v.y * v.y) / v_n;
        d11 += diffusion_factor;
    }

    let d12 = (al - at) * v.y * v.z / v_n;

    let mut d22 = 0.0;
    if dim == mesh_dim && dim > 2 {
        d22 += (at * (v.x * v.x + v.y * v.y) + al * v.z * v.z) / v_n;
        d22 += diffusion_factor;
    }

    Matrix3::new(d00, d01, d02, d01, d11, d12, d02, d12, d22)
}

/// Solute transport configuration: molecular diffusion, dispersivities and
/// the tortuosity correction. Immutable after construction.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoluteTransport<T> {
    /// Molecular diffusion of the component in water (m²/s), e.g. 2e-9.
    pub diffusion_molecular: T,
    /// Longitudinal dispersivity (m).
    pub dispersivity_longitudinal: T,
    /// Transverse dispersivity (m).
    pub dispersivity_transverse: T,
    /// Formation factor accounting for the tortuosity of the porous medium
    /// (0.1 for clays, 0.7 for sand).
    pub formation_factor: T,
}

impl<T: Real> SoluteTransport<T> {
    /// Pure molecular diffusion: zero dispersivities, unit formation
    /// factor.
    pub fn new(diffusion_molecular: T) -> Self {
        Self {
            diffusion_molecular,
            dispersivity_longitudinal: T::zero(),
            dispersivity_transverse: T::zero(),
            formation_factor: T::one(),
        }
    }

    pub fn with_dispersivities(mut self, longitudinal: T, transverse: T) -> Self {
        self.dispersivity_longitudinal = longitudinal;
        self.dispersivity_transverse = transverse;
        self
    }

    pub fn with_formation_factor(mut self, formation_factor: T) -> Self {
        self.formation_factor = formation_factor;
        self
    }

    /// Porosity- and tortuosity-corrected molecular diffusion entering the
    /// diagonal of the dispersion tensor.
    pub fn diffusion_factor(&self, porosity: T) -> T {
        self.diffusion_molecular * porosity * self.formation_factor
    }

    /// The combined diffusion-dispersion tensor for the current local
    /// velocity and porosity.
    pub fn dispersion_tensor(
        &self,
        velocity_local: &Vector3<T>,
        dim: usize,
        mesh_dim: usize,
        porosity: T,
    ) -> Matrix3<T> {
        dispersion_tensor(
            velocity_local,
            self.dispersivity_longitudinal,
            self.dispersivity_transverse,
            dim,
            mesh_dim,
            self.diffusion_factor(porosity),
        )
    }

    /// Grid Neumann number `D·Δt/h²`, a diffusive stability diagnostic.
    pub fn neumann_number(&self, dt: T, h: T) -> T {
        self.diffusion_molecular * dt / (h * h)
    }
}
