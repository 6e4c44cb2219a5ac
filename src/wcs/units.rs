use crate::foundation::error::{CubeAnimError, CubeAnimResult};
use std::fmt;
use std::str::FromStr;

/// Angular unit the world-coordinate header values are rescaled into.
///
/// Header `cdelt` values are degrees per pixel; the factor converts them into the target unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngularUnit {
    /// Degrees (factor 1).
    #[default]
    Degrees,
    /// Arc minutes (factor 60).
    Arcmin,
    /// Arc seconds (factor 3600).
    Arcsec,
    /// Radians (factor π/180).
    #[serde(rename = "rad")]
    Radians,
}

impl AngularUnit {
    /// Multiplier applied to a value in degrees.
    pub fn factor(self) -> f64 {
        match self {
            Self::Degrees => 1.0,
            Self::Arcmin => 60.0,
            Self::Arcsec => 3600.0,
            Self::Radians => std::f64::consts::PI / 180.0,
        }
    }

    /// Canonical label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Degrees => "degrees",
            Self::Arcmin => "arcmin",
            Self::Arcsec => "arcsec",
            Self::Radians => "rad",
        }
    }

    /// Parse `label`, falling back to [`AngularUnit::Degrees`] for anything unrecognized.
    ///
    /// Unknown labels are logged at `warn` level since a typo and an intended default are
    /// otherwise indistinguishable.
    pub fn from_label_lenient(label: &str) -> Self {
        match label.parse() {
            Ok(unit) => unit,
            Err(_) => {
                tracing::warn!(label, "unrecognized units label, using degrees (factor 1.0)");
                Self::Degrees
            }
        }
    }
}

impl FromStr for AngularUnit {
    type Err = CubeAnimError;

    fn from_str(s: &str) -> CubeAnimResult<Self> {
        match s {
            "degrees" | "degree" | "deg" => Ok(Self::Degrees),
            "arcmin" => Ok(Self::Arcmin),
            "arcsec" => Ok(Self::Arcsec),
            "rad" => Ok(Self::Radians),
            other => Err(CubeAnimError::config(format!(
                "unknown units '{other}' (expected one of: degrees, arcmin, arcsec, rad)"
            ))),
        }
    }
}

impl fmt::Display for AngularUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a units label from configuration is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitPolicy {
    /// Unknown labels are configuration errors.
    #[default]
    Strict,
    /// Unknown labels resolve to degrees with a warning.
    Lenient,
}

impl UnitPolicy {
    /// Resolve `label` under this policy.
    pub fn resolve(self, label: &str) -> CubeAnimResult<AngularUnit> {
        match self {
            Self::Strict => label.parse(),
            Self::Lenient => Ok(AngularUnit::from_label_lenient(label)),
        }
    }
}

/// Scale factor for a units label: `arcmin` 60, `arcsec` 3600, `rad` π/180, anything else 1.
pub fn units_factor(label: &str) -> f64 {
    AngularUnit::from_label_lenient(label).factor()
}

#[cfg(test)]
#[path = "../../tests/unit/wcs/units.rs"]
mod tests;
