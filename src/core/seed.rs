use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::models::{Bay, Booking, Company, Technician, Vehicle};
use crate::errors::Result;

/// On-disk snapshot of reference data and bookings for the in-memory port.
/// Every section is optional so partial fixtures stay loadable.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub bays: Vec<Bay>,
    #[serde(default)]
    pub technicians: Vec<Technician>,
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

pub fn load_seed(path: &Path) -> Result<SeedFile> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn save_seed(seed: &SeedFile, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let contents = serde_json::to_string_pretty(seed)?;
    fs::write(path, contents)?;
    Ok(path.to_path_buf())
}
