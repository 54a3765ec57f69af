use clap::Parser;
use density_slice::{render_all, Config, ContourLevels, Dataset, PlotKind};
use std::{path::PathBuf, time::Instant};

/// Plots the z=0 slice of electron density datasets
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Numpy npz data file with `points`, `shape` and density arrays
    dataset: Option<PathBuf>,
    /// Density arrays to plot [default: density, isolated_density]
    #[arg(short, long = "key")]
    keys: Vec<String>,
    /// Plots to render: scatter, colorscatter, matshow or contour [default: scatter, matshow, contour]
    #[arg(short, long = "plot")]
    plots: Vec<PlotKind>,
    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Prefix of the plot file names [default: c6h6_]
    #[arg(long)]
    prefix: Option<String>,
    /// Contour levels [default: 0 25 2000]
    #[arg(long, num_args = 3, value_names = ["START", "STOP", "COUNT"])]
    levels: Vec<f64>,
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_yaml(path)?,
        None => Config::default(),
    };
    if let Some(dataset) = cli.dataset {
        config.dataset = dataset;
    }
    if !cli.keys.is_empty() {
        config = config.keys(cli.keys);
    }
    if !cli.plots.is_empty() {
        config = config.plots(cli.plots);
    }
    if let Some(output) = cli.output {
        config = config.output_dir(output);
    }
    if let Some(prefix) = cli.prefix {
        config = config.prefix(prefix);
    }
    if let [start, stop, count] = cli.levels[..] {
        config = config.contour(ContourLevels {
            start,
            stop,
            count: count as usize,
        });
    }
    log::debug!("{:?}", config);

    let now = Instant::now();
    let keys: Vec<&str> = config.keys.iter().map(|key| key.as_str()).collect();
    let dataset = Dataset::from_npz(&config.dataset, &keys)?;
    log::info!("dataset loaded in {}ms", now.elapsed().as_millis());

    let now = Instant::now();
    let paths = render_all(&dataset, &config)?;
    log::info!("{} plots in {}ms", paths.len(), now.elapsed().as_millis());

    Ok(())
}
