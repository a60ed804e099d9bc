//! Resource economy — nutrient and energy reserves.
//!
//! Intake only ever adds to a reserve. The self-repair levels in
//! [`CellConfig`] gate growth: a cell grows only while both reserves are
//! strictly above their levels. A new cell starts one intake above each
//! level, the smallest surplus that still permits a growth step.

use crate::config::CellConfig;
use serde::{Deserialize, Serialize};

/// Nutrient and energy reserves of one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEconomy {
    nutrients: f64,
    energy: f64,
}

impl ResourceEconomy {
    /// Reserves of a freshly created cell.
    pub fn new(config: &CellConfig) -> Self {
        Self {
            nutrients: config.nutrient_self_repair_level() + config.nutrient_intake(),
            energy: config.energy_self_repair_level() + config.energy_intake(),
        }
    }

    /// Ingestion of nutrients.
    pub fn nutrients_intake(&mut self, config: &CellConfig) {
        self.nutrients += config.nutrient_intake();
    }

    /// Acquisition of energy.
    pub fn energy_intake(&mut self, config: &CellConfig) {
        self.energy += config.energy_intake();
    }

    /// Both reserves strictly exceed their self-repair levels.
    pub fn permits_growth(&self, config: &CellConfig) -> bool {
        self.nutrients > config.nutrient_self_repair_level()
            && self.energy > config.energy_self_repair_level()
    }

    pub fn nutrients(&self) -> f64 {
        self.nutrients
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }
}
