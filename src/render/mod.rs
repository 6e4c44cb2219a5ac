//! Figure rendering: layout, colormaps, the image axes, the colorbar and text overlays.

/// Spines, ticks and axis labels for the image axes.
pub mod axes;
/// Colour-scale legend.
pub mod colorbar;
/// Allow-listed colormaps.
pub mod colormap;
/// Explicit figure context and axes focus.
pub mod context;
/// Rendered frame buffers.
pub mod frame;
/// Colour-mapped image placement and painting.
pub mod heatmap;
/// Pixel layout of the figure.
pub mod layout;
/// SVG decorations and font handling.
pub mod overlay;
/// Tick placement and formatting.
pub mod ticks;
