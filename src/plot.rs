use super::{contour, slice::range, Colorbar, Config, Dataset, Error, Result, Slice};
use plotters::{coord::Shift, prelude::*};
use serde::Deserialize;
use std::{fmt, path::PathBuf, str::FromStr};

/// Slice plot types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    /// Points with a marker area proportional to the density
    Scatter,
    /// Points colored by the density
    ColorScatter,
    /// Logarithm of the density grid
    Matshow,
    /// Iso-density lines
    Contour,
}
impl PlotKind {
    pub const ALL: [PlotKind; 4] = [
        PlotKind::Scatter,
        PlotKind::ColorScatter,
        PlotKind::Matshow,
        PlotKind::Contour,
    ];
    /// Image size in pixels
    fn size(&self) -> (u32, u32) {
        match self {
            PlotKind::Scatter | PlotKind::Contour => (400, 400),
            PlotKind::ColorScatter => (500, 400),
            PlotKind::Matshow => (600, 400),
        }
    }
}
impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotKind::Scatter => write!(f, "scatter"),
            PlotKind::ColorScatter => write!(f, "colorscatter"),
            PlotKind::Matshow => write!(f, "matshow"),
            PlotKind::Contour => write!(f, "contour"),
        }
    }
}
impl FromStr for PlotKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PlotKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s.to_lowercase())
            .ok_or_else(|| Error::PlotKind(s.into()))
    }
}

/// Renders the slice plot of `kind`, returning the path of the image
pub fn render(slice: &Slice, kind: PlotKind, config: &Config) -> Result<PathBuf> {
    std::fs::create_dir_all(&config.output_dir)?;
    let path = config.plot_path(kind, slice.key());
    log::info!("{} plot of {:?} -> {}", kind, slice.key(), path.display());
    {
        let root = SVGBackend::new(&path, kind.size()).into_drawing_area();
        root.fill(&WHITE)?;
        match kind {
            PlotKind::Scatter => scatter(slice, &root)?,
            PlotKind::ColorScatter => color_scatter(slice, &root)?,
            PlotKind::Matshow => matshow(slice, config.log_offset, &root)?,
            PlotKind::Contour => contour_lines(slice, config, &root)?,
        }
        root.present()?;
    }
    Ok(path)
}

/// Renders all the plots of the configuration
///
/// The slice of each density is validated before any of its plots is written.
pub fn render_all(dataset: &Dataset, config: &Config) -> Result<Vec<PathBuf>> {
    #[cfg(feature = "progress")]
    let mut progress = linya::Progress::new();
    #[cfg(feature = "progress")]
    let bar = progress.bar(config.keys.len() * config.plots.len(), "Rendering slices");

    let mut paths = Vec::with_capacity(config.keys.len() * config.plots.len());
    for key in &config.keys {
        let slice = Slice::extract(dataset, key)?;
        for &kind in &config.plots {
            paths.push(render(&slice, kind, config)?);
            #[cfg(feature = "progress")]
            progress.inc_and_draw(&bar, 1);
        }
    }
    Ok(paths)
}

// axis range with 5% margins
fn padded((min, max): (f64, f64)) -> std::ops::Range<f64> {
    if max > min {
        let pad = 0.05 * (max - min);
        (min - pad)..(max + pad)
    } else {
        (min - 0.5)..(max + 0.5)
    }
}

// marker radius in pixels of a marker with an area equal to the density
fn marker_radius(density: f64) -> u32 {
    (0.5 * density.max(0f64).sqrt()).round() as u32
}

fn scatter<DB: DrawingBackend>(slice: &Slice, root: &DrawingArea<DB, Shift>) -> Result<()> {
    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(40)
        .build_cartesian_2d(
            padded(range(slice.x().iter())),
            padded(range(slice.y().iter())),
        )?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("X")
        .y_desc("Y")
        .draw()?;
    chart.draw_series(
        slice
            .x()
            .iter()
            .zip(slice.y())
            .zip(slice.density())
            .map(|((&x, &y), &d)| Circle::new((x, y), marker_radius(d), BLUE.filled())),
    )?;
    Ok(())
}

fn color_scatter<DB: DrawingBackend>(
    slice: &Slice,
    root: &DrawingArea<DB, Shift>,
) -> Result<()> {
    let (width, _) = root.dim_in_pixel();
    let (main, right) = root.split_horizontally(width - 100);
    let (min, max) = range(slice.density().iter());
    let colorbar = Colorbar::new(min, max);
    colorbar.draw("Electron Density", ChartBuilder::on(&right))?;

    let mut chart = ChartBuilder::on(&main)
        .caption("Electron Density Distribution at Z=0", ("sans-serif", 16))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(40)
        .build_cartesian_2d(
            padded(range(slice.x().iter())),
            padded(range(slice.y().iter())),
        )?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("X Coordinate")
        .y_desc("Y Coordinate")
        .draw()?;
    chart.draw_series(
        slice
            .x()
            .iter()
            .zip(slice.y())
            .zip(slice.density())
            .map(|((&x, &y), &d)| Circle::new((x, y), 3, colorbar.color(d).filled())),
    )?;
    Ok(())
}

fn matshow<DB: DrawingBackend>(
    slice: &Slice,
    offset: f64,
    root: &DrawingArea<DB, Shift>,
) -> Result<()> {
    let log_density = slice.grid().log_density(offset);
    let (n_row, n_col) = log_density.shape();
    let (min, max) = range(log_density.iter());
    let colorbar = Colorbar::new(min, max);

    let (width, _) = root.dim_in_pixel();
    let (main, right) = root.split_horizontally(width - 110);
    colorbar.draw(
        &format!("log(rho(x,y,z=0) + {:e})", offset),
        ChartBuilder::on(&right),
    )?;

    // row 0 at the top
    let top = n_row as f64;
    let mut chart = ChartBuilder::on(&main)
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(40)
        .build_cartesian_2d(0f64..n_col as f64, 0f64..top)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("X-axis")
        .y_desc("Y-axis")
        .y_label_formatter(&|v| format!("{:.0}", top - v))
        .draw()?;
    chart.draw_series((0..n_row).flat_map(|i| {
        let log_density = &log_density;
        let colorbar = &colorbar;
        (0..n_col).map(move |j| {
            let (x, y) = (j as f64, top - i as f64);
            Rectangle::new(
                [(x, y), (x + 1f64, y - 1f64)],
                colorbar.color(log_density[(i, j)]).filled(),
            )
        })
    }))?;
    Ok(())
}

fn contour_lines<DB: DrawingBackend>(
    slice: &Slice,
    config: &Config,
    root: &DrawingArea<DB, Shift>,
) -> Result<()> {
    let grid = slice.grid();
    let levels = contour::levels(
        config.contour.start,
        config.contour.stop,
        config.contour.count,
    );
    let colorbar = Colorbar::new(config.contour.start, config.contour.stop);

    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(40)
        .build_cartesian_2d(range_of(grid.x.iter()), range_of(grid.y.iter()))?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x-axis")
        .y_desc("y-axis")
        .draw()?;

    let (d_min, d_max) = grid.density_range();
    let mut n_line = 0;
    for level in levels.into_iter().filter(|l| (d_min..=d_max).contains(l)) {
        let segments = contour::iso_segments(&grid, level);
        n_line += segments.len();
        let style = colorbar.color(level).stroke_width(1);
        chart.draw_series(
            segments
                .into_iter()
                .map(|[p0, p1]| PathElement::new(vec![p0, p1], style)),
        )?;
    }
    log::debug!("{}: {} contour segments", slice.key(), n_line);
    Ok(())
}

fn range_of<'a>(values: impl Iterator<Item = &'a f64>) -> std::ops::Range<f64> {
    match range(values) {
        (min, max) if max > min => min..max,
        (min, max) => padded((min, max)),
    }
}
