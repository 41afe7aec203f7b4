pub mod area_series;
pub mod line_series;
pub mod scale;
pub mod types;

pub use area_series::{BandGeometry, BandPoint, project_band_geometry};
pub use line_series::{LinePath, PathCommand, defined_runs, project_line_path};
pub use scale::{LinearScale, nice_ticks};
pub use types::{DataPoint, Margins, PlotArea, SeriesPoint, Viewport};
