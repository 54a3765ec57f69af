mod dataset;
pub use dataset::{inspect, load_array, ArrayInfo, Dataset};
mod slice;
pub use slice::{Grid, Slice, LOG_OFFSET};
pub mod contour;
mod colormap;
pub use colormap::Colorbar;
mod plot;
pub use plot::{render, render_all, PlotKind};
mod config;
pub use config::{Config, ContourLevels};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to read npz data file")]
    Read(#[from] std::io::Error),
    #[error("array {0:?} not found in dataset")]
    MissingKey(String),
    #[error("array {key:?} has unsupported dtype {dtype}")]
    Dtype { key: String, dtype: String },
    #[error("array {key:?} has shape {shape:?}, expected {expected}")]
    ArrayShape {
        key: String,
        shape: Vec<u64>,
        expected: &'static str,
    },
    #[error("density {key:?} has {len} values for {n_point} points")]
    DensityLength {
        key: String,
        len: usize,
        n_point: usize,
    },
    #[error("slice has {distinct} distinct {axis} values but shape declares {expected}")]
    ShapeMismatch {
        axis: char,
        distinct: usize,
        expected: usize,
    },
    #[error("slice has {n_point} points, expected {expected} for a {nx}x{ny} grid")]
    GridSize {
        n_point: usize,
        expected: usize,
        nx: usize,
        ny: usize,
    },
    #[error("no point of the dataset lies in plane z={0}")]
    EmptySlice(f64),
    #[error("unknown plot kind {0:?}")]
    PlotKind(String),
    #[error("failed to draw plot: {0}")]
    Plot(String),
    #[error("failed to parse configuration")]
    Config(#[from] serde_yaml::Error),
}

impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for Error
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::Plot(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
