use super::{Dataset, Error, Result};
use nalgebra::DMatrix;
use std::collections::HashSet;

/// Offset added to the density before taking its logarithm
pub const LOG_OFFSET: f64 = 1e-10;

/// Density samples of a plane of constant z
///
/// The samples are kept in the order of the dataset points, that is the row-major
/// flattening of the `shape[0] x shape[1]` grid of the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    key: String,
    x: Vec<f64>,
    y: Vec<f64>,
    density: Vec<f64>,
    shape: [usize; 3],
}

/// A [Slice] reshaped into `shape[0] x shape[1]` matrices
///
/// Element `(i,j)` is the sample `i * shape[1] + j` of the slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub x: DMatrix<f64>,
    pub y: DMatrix<f64>,
    pub density: DMatrix<f64>,
}

impl Slice {
    /// Extracts the z=0 plane of the density `key`
    pub fn extract(dataset: &Dataset, key: &str) -> Result<Self> {
        Self::extract_at(dataset, key, 0f64)
    }
    /// Extracts the plane `z` of the density `key`
    ///
    /// The points are selected with an exact comparison of their z coordinate to `z`.
    /// The number of distinct x and y coordinates in the plane must match the first two
    /// dimensions of the dataset shape and the plane must hold as many points as the
    /// 2D grid, otherwise the dataset is rejected.
    pub fn extract_at(dataset: &Dataset, key: &str, z: f64) -> Result<Self> {
        let density = dataset.density(key)?;
        let points = dataset.points();
        let mask: Vec<bool> = points.column(2).iter().map(|&pz| pz == z).collect();

        let plane: Vec<_> = points
            .row_iter()
            .zip(&mask)
            .filter_map(|(row, &m)| m.then(|| (row[0], row[1])))
            .collect();
        let density: Vec<f64> = density
            .iter()
            .zip(&mask)
            .filter_map(|(&d, &m)| m.then(|| d))
            .collect();
        if plane.len() != density.len() {
            return Err(Error::DensityLength {
                key: key.into(),
                len: density.len(),
                n_point: plane.len(),
            });
        }
        let (x, y): (Vec<f64>, Vec<f64>) = plane.into_iter().unzip();

        let shape = dataset.shape();
        let [nx, ny, _] = shape;
        for (axis, values, expected) in [('x', &x, nx), ('y', &y, ny)] {
            let distinct = distinct(values);
            if distinct != expected {
                return Err(Error::ShapeMismatch {
                    axis,
                    distinct,
                    expected,
                });
            }
        }
        if x.len() != nx * ny {
            return Err(Error::GridSize {
                n_point: x.len(),
                expected: nx * ny,
                nx,
                ny,
            });
        }
        if x.is_empty() {
            return Err(Error::EmptySlice(z));
        }
        log::debug!("{key}: {} points in plane z={z}", x.len());

        Ok(Self {
            key: key.into(),
            x,
            y,
            density,
            shape,
        })
    }
    /// Returns the name of the density array
    pub fn key(&self) -> &str {
        &self.key
    }
    /// Returns the x coordinates
    pub fn x(&self) -> &[f64] {
        &self.x
    }
    /// Returns the y coordinates
    pub fn y(&self) -> &[f64] {
        &self.y
    }
    /// Returns the density values
    pub fn density(&self) -> &[f64] {
        &self.density
    }
    /// Returns the 3D grid dimensions of the dataset
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }
    /// Returns the number of samples in the plane
    pub fn len(&self) -> usize {
        self.density.len()
    }
    pub fn is_empty(&self) -> bool {
        self.density.is_empty()
    }
    /// Reshapes the slice into the 2D grid of the plane
    pub fn grid(&self) -> Grid {
        let [nx, ny, _] = self.shape;
        Grid {
            x: DMatrix::from_row_slice(nx, ny, &self.x),
            y: DMatrix::from_row_slice(nx, ny, &self.y),
            density: DMatrix::from_row_slice(nx, ny, &self.density),
        }
    }
}

impl Grid {
    /// Returns the grid dimensions
    pub fn dim(&self) -> (usize, usize) {
        self.density.shape()
    }
    /// Flattens the density grid back into the slice order
    pub fn flatten_density(&self) -> Vec<f64> {
        self.density.transpose().as_slice().to_vec()
    }
    /// Returns `ln(density + offset)`
    pub fn log_density(&self, offset: f64) -> DMatrix<f64> {
        self.density.map(|d| (d + offset).ln())
    }
    /// Returns the range of the density values
    pub fn density_range(&self) -> (f64, f64) {
        range(self.density.iter())
    }
}

pub(crate) fn range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
        (min.min(v), max.max(v))
    })
}

// -0.0 and 0.0 are counted once
fn distinct(values: &[f64]) -> usize {
    values
        .iter()
        .map(|&v| (v + 0f64).to_bits())
        .collect::<HashSet<u64>>()
        .len()
}
