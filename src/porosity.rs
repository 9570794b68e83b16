//! Porosity evolution laws and mixture densities.
use crate::error::{Error, Result};
use crate::Real;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// Rejects porosities for which evolution laws dividing by `n` or `1 - n`
/// are undefined.
pub(crate) fn check_porosity<T: Real>(porosity: T) -> Result<()> {
    if porosity <= T::zero() || porosity >= T::one() {
        Err(Error::DegeneratePorosity)
    } else {
        Ok(())
    }
}

/// Strain-driven porosity evolution law.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PorosityEvolution {
    /// Exponential evolution after Chen, Zhou & Jing (2009),
    /// `n = b + (n0 - b)·exp(c·(1 - e^{-ε/c}))` with `c = ln(b/(b - n0))`.
    Exponential,
    /// Linearized evolution `n = n0 + ε_fluid + ε_thermal - ε_mech`; a
    /// negative result is fatal.
    Fractional,
}

/// Per-quadrature-point inputs to [`PorosityModel::update`].
///
/// The coupling terms (`biot`, `solid_bulk`, `vol_total_strain`, the
/// temperature and pressure pairs) are only read when an evolution law is
/// configured.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PorosityInputs<T> {
    pub initial_porosity: T,
    pub fluid_density: T,
    pub biot: T,
    pub solid_bulk: T,
    /// Total volumetric strain from the mechanics solution.
    pub vol_total_strain: T,
    pub temperature: T,
    pub stress_free_temperature: T,
    pub pressure: T,
    pub reference_pressure: T,
}

/// Result of a porosity update: the evolved porosity plus the derived
/// densities of the fluid-solid mixture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PorosityState<T> {
    pub porosity: T,
    /// `(1 - n)·ρ_rock`.
    pub bulk_density: T,
    /// `n·ρ_fluid + (1 - n)·ρ_rock`.
    pub mixture_density: T,
    /// Mass fraction of the pore fluid in the mixture.
    pub void_mass_fraction: T,
}

/// Porosity and mixture-density model. Immutable configuration; the
/// per-call state arrives through [`PorosityInputs`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PorosityModel<T> {
    /// Specific density of the rock matrix (kg/m³).
    pub rock_density: T,
    /// Linear thermal expansion coefficient of the mixture.
    pub linear_thermal_expansion: T,
    /// Evolution law; `None` keeps the porosity at its initial value.
    pub evolution: Option<PorosityEvolution>,
}

impl<T: Real> PorosityModel<T> {
    /// A non-evolving porosity model.
    pub fn constant(rock_density: T) -> Self {
        Self {
            rock_density,
            linear_thermal_expansion: T::zero(),
            evolution: None,
        }
    }

    /// Evolves the porosity (if configured) and derives the mixture
    /// densities and the void mass fraction.
    ///
    /// Fails with [`Error::DegeneratePorosity`] when the fractional law
    /// produces a negative porosity, and with [`Error::DegenerateDensity`]
    /// when the void mass fraction is undefined because rock and fluid
    /// densities coincide or the mixture density vanishes.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn update(&self, inputs: &PorosityInputs<T>) -> Result<PorosityState<T>> {
        let n0 = inputs.initial_porosity;

        let porosity = match self.evolution {
            None => n0,
            Some(law) => {
                let volumetric_expansion = 3.0 * self.linear_thermal_expansion;
                let fluid_coeff = (inputs.biot - 1.0) / inputs.solid_bulk;
                let mech_component = -inputs.vol_total_strain;
                let thermal_component =
                    volumetric_expansion * (inputs.temperature - inputs.stress_free_temperature);
                let fluid_component =
                    fluid_coeff * (inputs.pressure - inputs.reference_pressure);
                let strain_components = fluid_component + thermal_component + mech_component;

                match law {
                    PorosityEvolution::Exponential => {
                        let c = (inputs.biot / (inputs.biot - n0)).ln();
                        let expo = (-strain_components / c).exp();
                        inputs.biot + (n0 - inputs.biot) * (c * (1.0 - expo)).exp()
                    }
                    PorosityEvolution::Fractional => {
                        let n = n0 + fluid_component + thermal_component - mech_component;
                        if n < 0.0 {
                            return Err(Error::DegeneratePorosity);
                        }
                        n
                    }
                }
            }
        };

        let bulk_density = (1.0 - porosity) * self.rock_density;
        let mixture_density = porosity * inputs.fluid_density + bulk_density;

        let void_mass_fraction = if porosity == 0.0 || porosity == 1.0 {
            porosity
        } else if self.rock_density - inputs.fluid_density == 0.0 || mixture_density == 0.0 {
            return Err(Error::DegenerateDensity);
        } else {
            (self.rock_density - mixture_density) * inputs.fluid_density
                / mixture_density
                / (self.rock_density - inputs.fluid_density)
        };

        Ok(PorosityState {
            porosity,
            bulk_density,
            mixture_density,
            void_mass_fraction,
        })
    }
}
