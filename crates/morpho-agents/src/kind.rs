//! Config-selectable cell variants.

use crate::contact::ContactInhibitedCell;
use crate::senescent::SenescentCell;
use crate::size_gated::SizeGatedCell;
use morpho_core::error::{ConfigError, Result};
use morpho_core::types::Tick;
use morpho_core::variant::{BaseCell, CellVariant};
use serde::{Deserialize, Serialize};

/// Which variant to build, with its parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum VariantKind {
    /// Default checkpoints.
    #[default]
    Base,
    ContactInhibited {
        #[serde(default = "default_pressure_threshold")]
        pressure_threshold: f64,
    },
    Senescent {
        #[serde(default = "default_hayflick_limit")]
        hayflick_limit: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lifespan: Option<Tick>,
    },
    SizeGated {
        division_radius: f64,
        #[serde(default)]
        min_reserve: f64,
    },
}

fn default_pressure_threshold() -> f64 { 1.0 }
fn default_hayflick_limit() -> u32 { 50 }

impl VariantKind {
    /// Reject parameters that are NaN, infinite or negative.
    pub fn validate(&self) -> Result<()> {
        let params = match self {
            VariantKind::Base | VariantKind::Senescent { .. } => vec![],
            VariantKind::ContactInhibited { pressure_threshold } => {
                vec![("pressure_threshold", *pressure_threshold)]
            }
            VariantKind::SizeGated { division_radius, min_reserve } => vec![
                ("division_radius", *division_radius),
                ("min_reserve", *min_reserve),
            ],
        };
        for (field, value) in params {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value }.into());
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value }.into());
            }
        }
        Ok(())
    }

    pub fn build(&self) -> Box<dyn CellVariant> {
        match self {
            VariantKind::Base => Box::new(BaseCell),
            VariantKind::ContactInhibited { pressure_threshold } => {
                Box::new(ContactInhibitedCell::new(*pressure_threshold))
            }
            VariantKind::Senescent { hayflick_limit, lifespan } => {
                let variant = SenescentCell::new(*hayflick_limit);
                Box::new(match lifespan {
                    Some(lifespan) => variant.with_lifespan(*lifespan),
                    None => variant,
                })
            }
            VariantKind::SizeGated { division_radius, min_reserve } => {
                Box::new(SizeGatedCell::new(*division_radius).with_min_reserve(*min_reserve))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_each_kind() {
        let kinds = [
            (VariantKind::Base, "cell"),
            (VariantKind::ContactInhibited { pressure_threshold: 2.0 }, "contact-inhibited"),
            (VariantKind::Senescent { hayflick_limit: 4, lifespan: Some(100) }, "senescent"),
            (VariantKind::SizeGated { division_radius: 15.0, min_reserve: 0.0 }, "size-gated"),
        ];
        for (kind, name) in kinds {
            assert_eq!(kind.build().kind(), name);
        }
    }

    #[test]
    fn rejects_unusable_parameters() {
        let rejected = [
            VariantKind::SizeGated {
                division_radius: f64::NAN,
                min_reserve: 0.0,
            },
            VariantKind::SizeGated {
                division_radius: 15.0,
                min_reserve: -1.0,
            },
            VariantKind::ContactInhibited {
                pressure_threshold: f64::INFINITY,
            },
        ];
        for kind in rejected {
            assert!(kind.validate().is_err(), "{kind:?} was accepted");
        }

        let usable = VariantKind::SizeGated {
            division_radius: 15.0,
            min_reserve: 0.5,
        };
        assert!(usable.validate().is_ok());
        assert!(VariantKind::default().validate().is_ok());
    }

    #[test]
    fn deserializes_tagged_with_defaults() {
        let kind: VariantKind =
            serde_json::from_str(r#"{ "kind": "senescent", "lifespan": 40 }"#).unwrap();
        assert_eq!(
            kind,
            VariantKind::Senescent { hayflick_limit: 50, lifespan: Some(40) }
        );

        let kind: VariantKind = serde_json::from_str(r#"{ "kind": "base" }"#).unwrap();
        assert_eq!(kind, VariantKind::Base);
    }
}
