use density_slice::{inspect, load_array, render_all, Config, Dataset, Error, PlotKind, Slice};
use ndarray::{array, Array1, Array2};
use ndarray_npy::NpzWriter;
use std::{fs::File, path::PathBuf};
use tempfile::TempDir;

// points of a nx x ny x nz grid flattened in row-major order
fn grid_points(nx: usize, ny: usize, nz: usize) -> Array2<f64> {
    let mut points = Array2::zeros((nx * ny * nz, 3));
    let mut k = 0;
    for i in 0..nx {
        for j in 0..ny {
            for l in 0..nz {
                points[[k, 0]] = i as f64 * 0.25 - 1.;
                points[[k, 1]] = j as f64 * 0.5 - 1.;
                points[[k, 2]] = l as f64 - (nz / 2) as f64;
                k += 1;
            }
        }
    }
    points
}

fn write_npz(dir: &TempDir, name: &str, shape: Array1<i64>, points: &Array2<f64>) -> PathBuf {
    let path = dir.path().join(name);
    let mut npz = NpzWriter::new(File::create(&path).unwrap());
    let n = points.nrows();
    let density = Array1::from_iter((0..n).map(|k| k as f64));
    let isolated_density = Array1::from_iter((0..n).map(|k| (k as f32).sqrt()));
    npz.add_array("points.npy", points).unwrap();
    npz.add_array("shape.npy", &shape).unwrap();
    npz.add_array("density.npy", &density).unwrap();
    npz.add_array("isolated_density.npy", &isolated_density).unwrap();
    npz.finish().unwrap();
    path
}

fn benzene(dir: &TempDir) -> PathBuf {
    write_npz(dir, "qm_data.npz", array![4, 3, 3], &grid_points(4, 3, 3))
}

#[test]
fn load_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let path = benzene(&dir);
    let dataset = Dataset::from_npz(&path, &["density", "isolated_density"]).unwrap();
    assert_eq!(dataset.n_point(), 36);
    assert_eq!(dataset.shape(), [4, 3, 3]);
    assert_eq!(dataset.points()[(1, 2)], 0.);
    assert_eq!(dataset.points()[(3, 1)], -0.5);
    assert_eq!(dataset.density("isolated_density").unwrap()[4], 2.);
}

#[test]
fn z0_slice_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = benzene(&dir);
    let dataset = Dataset::from_npz(&path, &["density"]).unwrap();
    let slice = Slice::extract(&dataset, "density").unwrap();
    assert_eq!(slice.len(), 4 * 3);
    // middle z layer of every (x,y) column
    let expected: Vec<f64> = (0..12).map(|k| (3 * k + 1) as f64).collect();
    assert_eq!(slice.density(), expected.as_slice());
    let grid = slice.grid();
    assert_eq!(grid.dim(), (4, 3));
    assert_eq!(grid.density[(1, 0)], 10.);
    assert_eq!(grid.x[(3, 2)], -1. + 3. * 0.25);
    assert_eq!(grid.flatten_density(), expected);
}

#[test]
fn load_single_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = benzene(&dir);
    let density = load_array(&path, "density").unwrap();
    assert_eq!(density.len(), 36);
    assert_eq!(density[35], 35.);
    assert!(matches!(
        load_array(&path, "spin_density"),
        Err(Error::MissingKey(_))
    ));
    assert!(matches!(load_array(&path, "shape"), Err(Error::Dtype { .. })));
}

#[test]
fn list_arrays() {
    let dir = tempfile::tempdir().unwrap();
    let path = benzene(&dir);
    let mut infos = inspect(&path).unwrap();
    infos.sort_by(|a, b| a.name.cmp(&b.name));
    let names: Vec<_> = infos.iter().map(|info| info.name.as_str()).collect();
    assert_eq!(names, vec!["density", "isolated_density", "points", "shape"]);
    assert_eq!(infos[2].shape, vec![36, 3]);
    assert_eq!(infos[1].dtype, "<f4");
}

#[test]
fn missing_density_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = benzene(&dir);
    let err = Dataset::from_npz(&path, &["spin_density"]).unwrap_err();
    assert!(matches!(err, Error::MissingKey(key) if key == "spin_density"));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Dataset::from_npz(dir.path().join("none.npz"), &["density"]).unwrap_err();
    assert!(matches!(err, Error::Read(_)));
}

#[test]
fn wrong_shape_length() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_npz(&dir, "bad.npz", array![4, 3], &grid_points(4, 3, 1));
    let err = Dataset::from_npz(&path, &["density"]).unwrap_err();
    assert!(matches!(err, Error::ArrayShape { key, .. } if key == "shape"));
}

#[test]
fn mismatched_shape_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_npz(&dir, "bad.npz", array![5, 3, 3], &grid_points(4, 3, 3));
    let dataset = Dataset::from_npz(&path, &["density"]).unwrap();
    let err = Slice::extract(&dataset, "density").unwrap_err();
    assert!(matches!(
        err,
        Error::ShapeMismatch {
            axis: 'x',
            distinct: 4,
            expected: 5
        }
    ));

    let out = tempfile::tempdir().unwrap();
    let config = Config::new(&path)
        .keys(["density"])
        .output_dir(out.path());
    assert!(render_all(&dataset, &config).is_err());
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn render_every_plot() {
    let dir = tempfile::tempdir().unwrap();
    let path = benzene(&dir);
    let dataset = Dataset::from_npz(&path, &["density", "isolated_density"]).unwrap();
    let out = tempfile::tempdir().unwrap();
    let config = Config::new(&path)
        .plots(PlotKind::ALL)
        .output_dir(out.path())
        .prefix("");
    let paths = render_all(&dataset, &config).unwrap();
    assert_eq!(paths.len(), 8);
    for name in [
        "scatter_density.svg",
        "colorscatter_density.svg",
        "matshow_isolated_density.svg",
        "contour_isolated_density.svg",
    ] {
        assert!(out.path().join(name).is_file(), "{name}");
    }
}
