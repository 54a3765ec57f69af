use super::{Error, Result};
use nalgebra::DMatrix;
use npyz::{npz::NpzArchive, DType, NpyFile, Order};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Volumetric density samples
///
/// The points are the N rows of a `N x 3` matrix of (x,y,z) coordinates, `shape` is the
/// dimension of the 3D sampling grid the points were flattened from and every density
/// array has one value per point.
#[derive(Debug, Clone)]
pub struct Dataset {
    points: DMatrix<f64>,
    shape: [usize; 3],
    densities: BTreeMap<String, Vec<f64>>,
}

/// Name, shape and dtype of an array in a npz archive
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayInfo {
    pub name: String,
    pub shape: Vec<u64>,
    pub dtype: String,
}

impl Dataset {
    /// Creates a dataset from data already in memory
    pub fn new<I, K>(points: DMatrix<f64>, shape: [usize; 3], densities: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Vec<f64>)>,
        K: Into<String>,
    {
        if points.ncols() != 3 {
            return Err(Error::ArrayShape {
                key: "points".into(),
                shape: vec![points.nrows() as u64, points.ncols() as u64],
                expected: "N x 3",
            });
        }
        let n_point = points.nrows();
        let densities = densities
            .into_iter()
            .map(|(key, values)| {
                let key: String = key.into();
                if values.len() != n_point {
                    return Err(Error::DensityLength {
                        key,
                        len: values.len(),
                        n_point,
                    });
                }
                Ok((key, values))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self {
            points,
            shape,
            densities,
        })
    }
    /// Loads `points`, `shape` and the density arrays `keys` from a Numpy npz data file
    pub fn from_npz<P: AsRef<Path>>(path: P, keys: &[&str]) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading {:?} from {}", keys, path.display());
        let mut archive = NpzArchive::open(path)?;

        let data = archive
            .by_name("points")?
            .ok_or_else(|| Error::MissingKey("points".into()))?;
        let dims = data.shape().to_vec();
        let points = match dims.as_slice() {
            &[n, 3] => {
                let order = data.order();
                let values = read_floats("points", data)?;
                match order {
                    Order::C => DMatrix::from_row_slice(n as usize, 3, &values),
                    Order::Fortran => DMatrix::from_column_slice(n as usize, 3, &values),
                }
            }
            _ => {
                return Err(Error::ArrayShape {
                    key: "points".into(),
                    shape: dims.clone(),
                    expected: "N x 3",
                })
            }
        };

        let data = archive
            .by_name("shape")?
            .ok_or_else(|| Error::MissingKey("shape".into()))?;
        let grid = read_integers("shape", data)?;
        let shape: [usize; 3] = grid
            .as_slice()
            .try_into()
            .map_err(|_| Error::ArrayShape {
                key: "shape".into(),
                shape: vec![grid.len() as u64],
                expected: "3",
            })?;

        let mut densities = Vec::with_capacity(keys.len());
        for &key in keys {
            let data = archive
                .by_name(key)?
                .ok_or_else(|| Error::MissingKey(key.into()))?;
            densities.push((key, read_floats(key, data)?));
        }
        let dataset = Self::new(points, shape, densities)?;
        log::info!(
            "{}: {} points on a {:?} grid",
            path.display(),
            dataset.n_point(),
            dataset.shape
        );
        Ok(dataset)
    }
    /// Returns the `N x 3` matrix of point coordinates
    pub fn points(&self) -> &DMatrix<f64> {
        &self.points
    }
    /// Returns the number of points
    pub fn n_point(&self) -> usize {
        self.points.nrows()
    }
    /// Returns the 3D grid dimensions
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }
    /// Returns the density values of array `key`
    pub fn density(&self, key: &str) -> Result<&[f64]> {
        self.densities
            .get(key)
            .map(|values| values.as_slice())
            .ok_or_else(|| Error::MissingKey(key.into()))
    }
    /// Iterates over the names of the loaded density arrays
    pub fn density_keys(&self) -> impl Iterator<Item = &str> {
        self.densities.keys().map(|key| key.as_str())
    }
}

/// Loads the floating point array `key` from a Numpy npz data file
pub fn load_array<P: AsRef<Path>>(path: P, key: &str) -> Result<Vec<f64>> {
    let mut archive = NpzArchive::open(path)?;
    let data = archive
        .by_name(key)?
        .ok_or_else(|| Error::MissingKey(key.into()))?;
    read_floats(key, data)
}

/// Lists the arrays of a Numpy npz data file
pub fn inspect<P: AsRef<Path>>(path: P) -> Result<Vec<ArrayInfo>> {
    let mut archive = NpzArchive::open(path)?;
    let names: Vec<_> = archive.array_names().map(|x| x.to_owned()).collect();
    let mut infos = Vec::with_capacity(names.len());
    for name in names.into_iter() {
        if let Some(data) = archive.by_name(&name)? {
            infos.push(ArrayInfo {
                shape: data.shape().to_vec(),
                dtype: descr(&data.dtype()),
                name,
            });
        }
    }
    Ok(infos)
}

fn descr(dtype: &DType) -> String {
    match dtype {
        DType::Plain(type_str) => type_str.to_string(),
        other => format!("{:?}", other),
    }
}

// dtype descriptor without its byte order character
fn kind(dtype: &str) -> &str {
    dtype.trim_start_matches(|c| matches!(c, '<' | '>' | '|' | '='))
}

fn read_floats<R: Read>(key: &str, data: NpyFile<R>) -> Result<Vec<f64>> {
    let dtype = descr(&data.dtype());
    match kind(&dtype) {
        "f8" => Ok(data.into_vec::<f64>()?),
        "f4" => Ok(data
            .into_vec::<f32>()?
            .into_iter()
            .map(f64::from)
            .collect()),
        _ => Err(Error::Dtype {
            key: key.into(),
            dtype,
        }),
    }
}

fn read_integers<R: Read>(key: &str, data: NpyFile<R>) -> Result<Vec<usize>> {
    let dtype = descr(&data.dtype());
    let values: Vec<i64> = match kind(&dtype) {
        "i8" => data.into_vec::<i64>()?,
        "i4" => data.into_vec::<i32>()?.into_iter().map(i64::from).collect(),
        "u8" => data
            .into_vec::<u64>()?
            .into_iter()
            .map(|x| x as i64)
            .collect(),
        "u4" => data.into_vec::<u32>()?.into_iter().map(i64::from).collect(),
        _ => {
            return Err(Error::Dtype {
                key: key.into(),
                dtype,
            })
        }
    };
    values
        .into_iter()
        .map(|x| usize::try_from(x).map_err(|_| Error::Dtype {
            key: key.into(),
            dtype: dtype.clone(),
        }))
        .collect()
}
