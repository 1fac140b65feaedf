use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::errors::Result;

use super::airport::Airport;
use super::profile::AircraftProfile;

/// Read-only set of aircraft types and airports a flight can be built from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub aircraft: Vec<AircraftProfile>,
    #[serde(default)]
    pub airports: Vec<Airport>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Catalog {
            aircraft: vec![AircraftProfile::cessna_172(), AircraftProfile::airbus_a320()],
            airports: vec![Airport::paris_orly(), Airport::toulouse_blagnac()],
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&raw)?;
        debug!(
            path = %path.display(),
            aircraft = catalog.aircraft.len(),
            airports = catalog.airports.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses a catalog and rejects it if any aircraft profile is invalid.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(raw)?;
        for profile in &catalog.aircraft {
            profile.validate()?;
        }
        Ok(catalog)
    }

    pub fn aircraft(&self, id: &str) -> Option<&AircraftProfile> {
        self.aircraft.iter().find(|profile| profile.id == id)
    }

    pub fn airport(&self, icao: &str) -> Option<&Airport> {
        self.airports
            .iter()
            .find(|airport| airport.icao.eq_ignore_ascii_case(icao))
    }
}
