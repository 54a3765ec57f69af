//! Iso-lines of a density [Grid](crate::Grid) with the marching squares algorithm

use super::Grid;

/// Line segment between two (x,y) points
pub type Segment = [(f64, f64); 2];

/// Returns `n` evenly spaced values from `start` to `stop`, both included
pub fn levels(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// Returns the segments of the iso-line `level` of the grid density
///
/// Each cell of the grid is cut by 0, 1 or 2 segments whose end points are linearly
/// interpolated along the cell edges. Ambiguous saddle cells are resolved with the
/// average of the cell corners.
pub fn iso_segments(grid: &Grid, level: f64) -> Vec<Segment> {
    let (nx, ny) = grid.dim();
    let mut segments = vec![];
    if nx < 2 || ny < 2 {
        return segments;
    }
    for i in 0..nx - 1 {
        for j in 0..ny - 1 {
            // corners counter-clockwise in (i,j) index space
            let corners = [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)];
            let values = corners.map(|ij| grid.density[ij]);
            let above = values.map(|v| v > level);
            let crossings: Vec<Option<(f64, f64)>> = (0..4)
                .map(|e| {
                    let (a, b) = (e, (e + 1) % 4);
                    (above[a] != above[b]).then(|| {
                        let t = (level - values[a]) / (values[b] - values[a]);
                        let (pa, pb) = (corners[a], corners[b]);
                        (
                            grid.x[pa] + t * (grid.x[pb] - grid.x[pa]),
                            grid.y[pa] + t * (grid.y[pb] - grid.y[pa]),
                        )
                    })
                })
                .collect();
            let edges: Vec<(f64, f64)> = crossings.iter().filter_map(|p| *p).collect();
            match edges.len() {
                2 => segments.push([edges[0], edges[1]]),
                4 => {
                    let center = values.iter().sum::<f64>() / 4f64;
                    let pairs = if (center > level) == above[0] {
                        // corners 1 and 3 are isolated
                        [(0, 1), (2, 3)]
                    } else {
                        // corners 0 and 2 are isolated
                        [(3, 0), (1, 2)]
                    };
                    for (e0, e1) in pairs {
                        if let (Some(p0), Some(p1)) = (crossings[e0], crossings[e1]) {
                            segments.push([p0, p1]);
                        }
                    }
                }
                _ => (),
            }
        }
    }
    segments
}
