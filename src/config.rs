use super::{PlotKind, Result, LOG_OFFSET};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contour levels, `count` values evenly spaced from `start` to `stop`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ContourLevels {
    pub start: f64,
    pub stop: f64,
    pub count: usize,
}
impl Default for ContourLevels {
    fn default() -> Self {
        Self {
            start: 0f64,
            stop: 25f64,
            count: 2000,
        }
    }
}

/// Slice plotting configuration
///
/// Every field may be omitted from a YAML configuration file, e.g.
/// ```yaml
/// dataset: qm_data_c6h6.npz
/// keys: [density]
/// plots: [matshow, contour]
/// contour:
///   start: 0.0
///   stop: 1.0
///   count: 50
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: PathBuf,
    pub keys: Vec<String>,
    pub plots: Vec<PlotKind>,
    pub output_dir: PathBuf,
    pub prefix: String,
    pub log_offset: f64,
    pub contour: ContourLevels,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("qm_data_c6h6.npz"),
            keys: vec!["density".into(), "isolated_density".into()],
            plots: vec![PlotKind::Scatter, PlotKind::Matshow, PlotKind::Contour],
            output_dir: PathBuf::from("."),
            prefix: String::from("c6h6_"),
            log_offset: LOG_OFFSET,
            contour: Default::default(),
        }
    }
}

impl Config {
    /// Creates a default configuration for the data file `dataset`
    pub fn new<P: Into<PathBuf>>(dataset: P) -> Self {
        Self {
            dataset: dataset.into(),
            ..Default::default()
        }
    }
    /// Loads the configuration from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_yaml::from_reader(file)?)
    }
    /// Sets the density keys
    pub fn keys<S: Into<String>>(self, keys: impl IntoIterator<Item = S>) -> Self {
        Self {
            keys: keys.into_iter().map(|key| key.into()).collect(),
            ..self
        }
    }
    /// Sets the plot kinds
    pub fn plots(self, plots: impl IntoIterator<Item = PlotKind>) -> Self {
        Self {
            plots: plots.into_iter().collect(),
            ..self
        }
    }
    /// Sets the directory the plots are written to
    pub fn output_dir<P: Into<PathBuf>>(self, output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..self
        }
    }
    /// Sets the prefix of the plot file names
    pub fn prefix<S: Into<String>>(self, prefix: S) -> Self {
        Self {
            prefix: prefix.into(),
            ..self
        }
    }
    /// Sets the contour levels
    pub fn contour(self, contour: ContourLevels) -> Self {
        Self { contour, ..self }
    }
    /// Returns the path of the plot of `kind` for the density `key`
    ///
    /// Plots are written as SVG, `{prefix}{kind}_{key}.svg`, plotters having no PDF backend.
    pub fn plot_path(&self, kind: PlotKind, key: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{}_{}.svg", self.prefix, kind, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.keys, vec!["density", "isolated_density"]);
        assert_eq!(config.contour.count, 2000);
        assert_eq!(
            config.plot_path(PlotKind::Scatter, "density"),
            Path::new("./c6h6_scatter_density.svg")
        );
    }

    #[test]
    fn builder() {
        let config = Config::new("data.npz")
            .keys(["isolated_density"])
            .plots([PlotKind::Contour])
            .output_dir("plots")
            .prefix("");
        assert_eq!(config.dataset, Path::new("data.npz"));
        assert_eq!(
            config.plot_path(PlotKind::Contour, "isolated_density"),
            Path::new("plots/contour_isolated_density.svg")
        );
    }

    #[test]
    fn contour_levels() {
        let levels = ContourLevels {
            start: 0.1,
            stop: 2.,
            count: 20,
        };
        let config = Config::default().contour(levels);
        assert_eq!(config.contour, levels);
        assert_eq!(config.keys.len(), 2);
    }

    #[test]
    fn partial_yaml() {
        let config: Config = serde_yaml::from_str(
            "keys: [density]\nplots: [matshow, colorscatter]\ncontour: {start: 0.0, stop: 1.0, count: 5}\n",
        )
        .unwrap();
        assert_eq!(config.keys, vec!["density"]);
        assert_eq!(config.plots, vec![PlotKind::Matshow, PlotKind::ColorScatter]);
        assert_eq!(config.contour.count, 5);
        assert_eq!(config.prefix, "c6h6_");
        assert_eq!(config.log_offset, LOG_OFFSET);
    }
}
