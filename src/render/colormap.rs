use crate::foundation::error::{CubeAnimError, CubeAnimResult};
use std::fmt;
use std::str::FromStr;

/// Colormap names offered to users, in display order.
pub const COLORMAP_NAMES: [&str; 17] = [
    "magma",
    "inferno",
    "inferno_r",
    "plasma",
    "viridis",
    "bone",
    "afmhot",
    "gist_heat",
    "CMRmap",
    "gnuplot",
    "Blues_r",
    "Purples_r",
    "ocean",
    "hot",
    "seismic_r",
    "ocean_r",
    "Spectral",
];

/// Name of the colormap used when a job does not set one.
pub const DEFAULT_COLORMAP: &str = "Spectral";

/// List the user-facing colormap names.
pub fn colormap_names() -> &'static [&'static str] {
    &COLORMAP_NAMES
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Base {
    Magma,
    Inferno,
    Plasma,
    Viridis,
    Bone,
    Afmhot,
    GistHeat,
    Cmrmap,
    Gnuplot,
    Blues,
    Purples,
    Ocean,
    Hot,
    Seismic,
    Spectral,
}

const BASES: [(&str, Base); 15] = [
    ("magma", Base::Magma),
    ("inferno", Base::Inferno),
    ("plasma", Base::Plasma),
    ("viridis", Base::Viridis),
    ("bone", Base::Bone),
    ("afmhot", Base::Afmhot),
    ("gist_heat", Base::GistHeat),
    ("CMRmap", Base::Cmrmap),
    ("gnuplot", Base::Gnuplot),
    ("Blues", Base::Blues),
    ("Purples", Base::Purples),
    ("ocean", Base::Ocean),
    ("hot", Base::Hot),
    ("seismic", Base::Seismic),
    ("Spectral", Base::Spectral),
];

// Piecewise-linear channel tables as (x, value) knots.
const HOT: [&[(f64, f64)]; 3] = [
    &[(0.0, 0.0416), (0.365079, 1.0), (1.0, 1.0)],
    &[(0.0, 0.0), (0.365079, 0.0), (0.746032, 1.0), (1.0, 1.0)],
    &[(0.0, 0.0), (0.746032, 0.0), (1.0, 1.0)],
];

const BONE: [&[(f64, f64)]; 3] = [
    &[(0.0, 0.0), (0.746032, 0.652778), (1.0, 1.0)],
    &[
        (0.0, 0.0),
        (0.365079, 0.319444),
        (0.746032, 0.777778),
        (1.0, 1.0),
    ],
    &[(0.0, 0.0), (0.365079, 0.444444), (1.0, 1.0)],
];

// Evenly spaced RGB stops.
const SEISMIC: [[f64; 3]; 5] = [
    [0.0, 0.0, 0.3],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.5, 0.0, 0.0],
];

const CMRMAP: [[f64; 3]; 9] = [
    [0.0, 0.0, 0.0],
    [0.15, 0.15, 0.5],
    [0.3, 0.15, 0.75],
    [0.6, 0.2, 0.5],
    [1.0, 0.25, 0.15],
    [0.9, 0.5, 0.0],
    [0.9, 0.75, 0.1],
    [0.9, 0.9, 0.5],
    [1.0, 1.0, 1.0],
];

/// A named colormap from the allow-list, optionally reversed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colormap {
    base: Base,
    reversed: bool,
}

impl Colormap {
    /// Look up a colormap by name. Every base map also accepts the `_r` reversed form.
    pub fn from_name(name: &str) -> CubeAnimResult<Self> {
        let (stem, reversed) = match name.strip_suffix("_r") {
            Some(stem) => (stem, true),
            None => (name, false),
        };
        BASES
            .iter()
            .find(|(n, _)| *n == stem)
            .map(|&(_, base)| Self { base, reversed })
            .ok_or_else(|| {
                CubeAnimError::config(format!(
                    "unknown colormap '{name}' (available: {})",
                    COLORMAP_NAMES.join(", ")
                ))
            })
    }

    /// Canonical name, including the `_r` suffix when reversed.
    pub fn name(&self) -> String {
        let stem = BASES
            .iter()
            .find(|(_, b)| *b == self.base)
            .map(|(n, _)| *n)
            .unwrap_or("?");
        if self.reversed {
            format!("{stem}_r")
        } else {
            stem.to_string()
        }
    }

    /// Colour at `t` in `[0, 1]` (clamped).
    pub fn eval(&self, t: f64) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed { 1.0 - t } else { t };

        let gradient = match self.base {
            Base::Magma => Some(colorous::MAGMA),
            Base::Inferno => Some(colorous::INFERNO),
            Base::Plasma => Some(colorous::PLASMA),
            Base::Viridis => Some(colorous::VIRIDIS),
            Base::Blues => Some(colorous::BLUES),
            Base::Purples => Some(colorous::PURPLES),
            Base::Spectral => Some(colorous::SPECTRAL),
            _ => None,
        };
        if let Some(g) = gradient {
            let c = g.eval_continuous(t);
            return [c.r, c.g, c.b];
        }

        let rgb = match self.base {
            Base::Bone => segments(&BONE, t),
            Base::Hot => segments(&HOT, t),
            Base::Seismic => stops(&SEISMIC, t),
            Base::Cmrmap => stops(&CMRMAP, t),
            Base::Gnuplot => [t.sqrt(), t.powi(3), (2.0 * std::f64::consts::PI * t).sin()],
            Base::Ocean => [3.0 * t - 2.0, ((3.0 * t - 1.0) / 2.0).abs(), t],
            Base::Afmhot => [2.0 * t, 2.0 * t - 0.5, 2.0 * t - 1.0],
            Base::GistHeat => [1.5 * t, 2.0 * t - 1.0, 4.0 * t - 3.0],
            _ => [0.0; 3],
        };
        rgb.map(unit_to_u8)
    }

    /// 256-entry lookup table, index `i` holds `eval(i / 255)`.
    pub fn lut(&self) -> Vec<[u8; 3]> {
        (0..256).map(|i| self.eval(f64::from(i) / 255.0)).collect()
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self {
            base: Base::Spectral,
            reversed: false,
        }
    }
}

impl FromStr for Colormap {
    type Err = CubeAnimError;

    fn from_str(s: &str) -> CubeAnimResult<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn interp(knots: &[(f64, f64)], t: f64) -> f64 {
    for w in knots.windows(2) {
        let (x0, y0) = w[0];
        let (x1, y1) = w[1];
        if t <= x1 {
            if x1 <= x0 {
                return y1;
            }
            return y0 + (y1 - y0) * (t - x0) / (x1 - x0);
        }
    }
    knots.last().map(|&(_, y)| y).unwrap_or(0.0)
}

fn segments(channels: &[&[(f64, f64)]; 3], t: f64) -> [f64; 3] {
    [
        interp(channels[0], t),
        interp(channels[1], t),
        interp(channels[2], t),
    ]
}

fn stops(colors: &[[f64; 3]], t: f64) -> [f64; 3] {
    let last = colors.len() - 1;
    let pos = t * last as f64;
    let i = (pos.floor() as usize).min(last.saturating_sub(1));
    let frac = pos - i as f64;
    let a = colors[i];
    let b = colors[(i + 1).min(last)];
    [
        a[0] + (b[0] - a[0]) * frac,
        a[1] + (b[1] - a[1]) * frac,
        a[2] + (b[2] - a[2]) * frac,
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/colormap.rs"]
mod tests;
