//! Population-wide cell parameters.
//!
//! One `CellConfig` is owned by the aggregate and lent to every cell on
//! every tick, so a change made between ticks is seen by all cells on
//! their next tick. Independent aggregates carry independent configs.

use crate::error::{ConfigError, MorphoError, Result};
use crate::types::Color;
use serde::{Deserialize, Serialize};

/// Parameters shared by all cells of a population.
///
/// Fields are only written through the validating setters or through
/// deserialization, which runs the same checks, so a `CellConfig` in hand
/// always holds finite, non-negative values with the default radius within
/// the growth limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CellConfigFile")]
pub struct CellConfig {
    default_radius: f64,
    growth_radius_increment: f64,
    growth_radius_limit: f64,
    nutrient_self_repair_level: f64,
    energy_self_repair_level: f64,
    nutrient_intake: f64,
    energy_intake: f64,
    default_color: Color,
}

/// On-disk form of [`CellConfig`], checked before conversion.
#[derive(Deserialize)]
struct CellConfigFile {
    /// Radius of a freshly created cell (microns, default: 10).
    #[serde(default = "default_radius")]
    default_radius: f64,
    /// Radius gained per successful growth step (default: 0.01).
    #[serde(default = "default_growth_radius_increment")]
    growth_radius_increment: f64,
    /// Upper bound on the radius of any cell (default: 20).
    #[serde(default = "default_growth_radius_limit")]
    growth_radius_limit: f64,
    /// Nutrient reserve at or below which growth is disallowed (default: 0).
    #[serde(default)]
    nutrient_self_repair_level: f64,
    /// Energy reserve at or below which growth is disallowed (default: 0).
    #[serde(default)]
    energy_self_repair_level: f64,
    /// Nutrients gained per intake (default: 1).
    #[serde(default = "default_intake")]
    nutrient_intake: f64,
    /// Energy gained per intake (default: 1).
    #[serde(default = "default_intake")]
    energy_intake: f64,
    /// Color of a freshly created cell.
    #[serde(default)]
    default_color: Color,
}

fn default_radius() -> f64 { 10.0 }
fn default_growth_radius_increment() -> f64 { 0.01 }
fn default_growth_radius_limit() -> f64 { 20.0 }
fn default_intake() -> f64 { 1.0 }

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            default_radius: default_radius(),
            growth_radius_increment: default_growth_radius_increment(),
            growth_radius_limit: default_growth_radius_limit(),
            nutrient_self_repair_level: 0.0,
            energy_self_repair_level: 0.0,
            nutrient_intake: default_intake(),
            energy_intake: default_intake(),
            default_color: Color::default(),
        }
    }
}

impl TryFrom<CellConfigFile> for CellConfig {
    type Error = MorphoError;

    fn try_from(file: CellConfigFile) -> Result<Self> {
        let config = Self {
            default_radius: file.default_radius,
            growth_radius_increment: file.growth_radius_increment,
            growth_radius_limit: file.growth_radius_limit,
            nutrient_self_repair_level: file.nutrient_self_repair_level,
            energy_self_repair_level: file.energy_self_repair_level,
            nutrient_intake: file.nutrient_intake,
            energy_intake: file.energy_intake,
            default_color: file.default_color,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Reject NaN, infinities and negative values.
fn non_negative(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field, value }.into());
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value }.into());
    }
    Ok(value)
}

/// The default radius may not exceed the growth limit.
fn radius_within_limit(default_radius: f64, limit: f64) -> Result<()> {
    if default_radius > limit {
        return Err(ConfigError::Inconsistent {
            field: "default_radius",
            value: default_radius,
            reason: format!("exceeds growth_radius_limit {limit}"),
        }
        .into());
    }
    Ok(())
}

impl CellConfig {
    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        non_negative("default_radius", self.default_radius)?;
        non_negative("growth_radius_increment", self.growth_radius_increment)?;
        non_negative("growth_radius_limit", self.growth_radius_limit)?;
        non_negative("nutrient_self_repair_level", self.nutrient_self_repair_level)?;
        non_negative("energy_self_repair_level", self.energy_self_repair_level)?;
        non_negative("nutrient_intake", self.nutrient_intake)?;
        non_negative("energy_intake", self.energy_intake)?;
        radius_within_limit(self.default_radius, self.growth_radius_limit)
    }

    pub fn default_radius(&self) -> f64 {
        self.default_radius
    }

    pub fn growth_radius_increment(&self) -> f64 {
        self.growth_radius_increment
    }

    pub fn growth_radius_limit(&self) -> f64 {
        self.growth_radius_limit
    }

    pub fn nutrient_self_repair_level(&self) -> f64 {
        self.nutrient_self_repair_level
    }

    pub fn energy_self_repair_level(&self) -> f64 {
        self.energy_self_repair_level
    }

    pub fn nutrient_intake(&self) -> f64 {
        self.nutrient_intake
    }

    pub fn energy_intake(&self) -> f64 {
        self.energy_intake
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Cells already larger than a lowered limit are clamped on their next growth step.
    pub fn set_growth_radius_limit(&mut self, value: f64) -> Result<()> {
        let value = non_negative("growth_radius_limit", value)?;
        radius_within_limit(self.default_radius, value)?;
        self.growth_radius_limit = value;
        Ok(())
    }

    pub fn set_growth_radius_increment(&mut self, value: f64) -> Result<()> {
        self.growth_radius_increment = non_negative("growth_radius_increment", value)?;
        Ok(())
    }

    pub fn set_default_radius(&mut self, value: f64) -> Result<()> {
        let value = non_negative("default_radius", value)?;
        radius_within_limit(value, self.growth_radius_limit)?;
        self.default_radius = value;
        Ok(())
    }

    pub fn set_nutrient_self_repair_level(&mut self, value: f64) -> Result<()> {
        self.nutrient_self_repair_level = non_negative("nutrient_self_repair_level", value)?;
        Ok(())
    }

    pub fn set_energy_self_repair_level(&mut self, value: f64) -> Result<()> {
        self.energy_self_repair_level = non_negative("energy_self_repair_level", value)?;
        Ok(())
    }

    pub fn set_nutrient_intake(&mut self, value: f64) -> Result<()> {
        self.nutrient_intake = non_negative("nutrient_intake", value)?;
        Ok(())
    }

    pub fn set_energy_intake(&mut self, value: f64) -> Result<()> {
        self.energy_intake = non_negative("energy_intake", value)?;
        Ok(())
    }

    pub fn set_default_color(&mut self, color: Color) {
        self.default_color = color;
    }
}
