use crate::foundation::error::{CubeAnimError, CubeAnimResult};

/// Required header keys, in the order they are reported when missing.
pub const REQUIRED_KEYS: [&str; 4] = ["cdelt1", "cdelt2", "crpix1", "crpix2"];

/// World-coordinate pixel scaling for the two image axes.
///
/// `cdelt` is the pixel size (degrees per pixel) and `crpix` the 1-based reference pixel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Header {
    /// Pixel size along the first (x) axis.
    pub cdelt1: f64,
    /// Pixel size along the second (y) axis.
    pub cdelt2: f64,
    /// Reference pixel along the first (x) axis.
    pub crpix1: f64,
    /// Reference pixel along the second (y) axis.
    pub crpix2: f64,
}

impl Header {
    /// Build a header from explicit values.
    pub fn new(cdelt1: f64, cdelt2: f64, crpix1: f64, crpix2: f64) -> CubeAnimResult<Self> {
        let h = Self {
            cdelt1,
            cdelt2,
            crpix1,
            crpix2,
        };
        h.validate()?;
        Ok(h)
    }

    /// Extract the four required keys from a JSON object.
    ///
    /// Key lookup ignores ASCII case so FITS-style `CDELT1` cards work, and a key given in two
    /// spellings is an error. Other keys are ignored.
    pub fn from_json_map(map: &serde_json::Map<String, serde_json::Value>) -> CubeAnimResult<Self> {
        let lookup = |key: &str| -> CubeAnimResult<f64> {
            let mut matches = map.iter().filter(|(k, _)| k.eq_ignore_ascii_case(key));
            let value = matches.next().map(|(_, v)| v);
            let spellings: Vec<&str> = matches.map(|(k, _)| k.as_str()).collect();
            if !spellings.is_empty() {
                return Err(CubeAnimError::config(format!(
                    "header key '{key}' appears more than once (also as {})",
                    spellings.join(", ")
                )));
            }
            match value {
                None => Err(CubeAnimError::config(format!(
                    "header is missing required key '{key}' (required: {})",
                    REQUIRED_KEYS.join(", ")
                ))),
                Some(v) => v.as_f64().ok_or_else(|| {
                    CubeAnimError::config(format!("header key '{key}' must be numeric, got {v}"))
                }),
            }
        };

        Self::new(
            lookup("cdelt1")?,
            lookup("cdelt2")?,
            lookup("crpix1")?,
            lookup("crpix2")?,
        )
    }

    /// Check that every value is finite.
    pub fn validate(&self) -> CubeAnimResult<()> {
        for (key, v) in REQUIRED_KEYS.iter().zip(self.values()) {
            if !v.is_finite() {
                return Err(CubeAnimError::config(format!(
                    "header key '{key}' must be finite, got {v}"
                )));
            }
        }
        Ok(())
    }

    fn values(&self) -> [f64; 4] {
        [self.cdelt1, self.cdelt2, self.crpix1, self.crpix2]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wcs/header.rs"]
mod tests;
