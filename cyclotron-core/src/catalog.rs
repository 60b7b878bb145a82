//! The fixed catalog of particle species the accelerator can be loaded with.

use crate::error::EngineError;

/// A species of charged particle.
///
/// Only the charge magnitude is stored; the force law treats every species
/// as positively charged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpecies {
    pub name: &'static str,
    /// Rest mass in kg
    pub mass: f64,
    /// Charge magnitude in C
    pub charge: f64,
    /// Display color as `0xRRGGBB`
    pub color: u32,
    pub description: &'static str,
}

impl ParticleSpecies {
    /// Charge-to-mass ratio q/m in C/kg
    pub fn charge_to_mass(&self) -> f64 {
        self.charge / self.mass
    }

    /// Display color split into its red, green and blue channels
    pub fn rgb(&self) -> [u8; 3] {
        [
            ((self.color >> 16) & 0xff) as u8,
            ((self.color >> 8) & 0xff) as u8,
            (self.color & 0xff) as u8,
        ]
    }
}

pub const PROTON: ParticleSpecies = ParticleSpecies {
    name: "Proton",
    mass: 1.67e-27,
    charge: 1.60e-19,
    color: 0x1f77b4,
    description: "Light, charge +1",
};

pub const ALPHA: ParticleSpecies = ParticleSpecies {
    name: "Alpha",
    mass: 6.64e-27,
    charge: 3.20e-19,
    color: 0xd62728,
    description: "Heavy, charge +2",
};

pub const CARBON_12: ParticleSpecies = ParticleSpecies {
    name: "Carbon-12 Ion",
    mass: 1.99e-26,
    charge: 9.61e-19,
    color: 0x2ca02c,
    description: "Very heavy, positive ion",
};

static SPECIES: [ParticleSpecies; 3] = [PROTON, ALPHA, CARBON_12];

/// All species in catalog order. The first entry is the default selection.
pub fn list_species() -> &'static [ParticleSpecies] {
    &SPECIES
}

/// Find a species by its exact name
pub fn lookup(name: &str) -> Result<&'static ParticleSpecies, EngineError> {
    SPECIES
        .iter()
        .find(|species| species.name == name)
        .ok_or_else(|| EngineError::UnknownSpecies {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        for (i, a) in SPECIES.iter().enumerate() {
            for b in &SPECIES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn rgb_splits_channels() {
        assert_eq!(PROTON.rgb(), [0x1f, 0x77, 0xb4]);
    }
}
