use super::Result;
use colorous::{Gradient, VIRIDIS};
use plotters::prelude::*;

/// Continuous color bar mapping `[min,max]` onto a gradient
#[derive(Clone, Copy)]
pub struct Colorbar {
    min: f64,
    max: f64,
    gradient: Gradient,
}

impl Colorbar {
    /// Creates a viridis color bar
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            gradient: VIRIDIS,
        }
    }
    /// Returns the color of `value`, values out of range are clamped
    pub fn color(&self, value: f64) -> RGBColor {
        let &Self { min, max, gradient } = self;
        let t = if max > min {
            (value.max(min).min(max) - min) / (max - min)
        } else {
            0.5
        };
        let (r, g, b) = gradient.eval_continuous(t).as_tuple();
        RGBColor(r, g, b)
    }
    /// Draws the color bar with its label on the right hand side
    pub fn draw<DB: DrawingBackend>(
        &self,
        label: &str,
        mut chart_builder: ChartBuilder<DB>,
    ) -> Result<()> {
        let &Self { min, max, .. } = self;
        let (min, max) = if max > min { (min, max) } else { (min - 0.5, min + 0.5) };
        let mut chart_context = chart_builder
            .margin_top(10)
            .margin_bottom(10)
            .x_label_area_size(30)
            .y_label_area_size(0)
            .right_y_label_area_size(60)
            .build_cartesian_2d(0f64..1f64, min..max)?
            .set_secondary_coord(0f64..1f64, min..max);

        chart_context
            .configure_mesh()
            .set_all_tick_mark_size(0)
            .disable_x_axis()
            .disable_y_axis()
            .disable_x_mesh()
            .disable_y_mesh()
            .draw()?;

        chart_context
            .configure_secondary_axes()
            .y_desc(label)
            .label_style(("sans-serif", 12))
            .draw()?;

        let step = (max - min) / 256f64;
        chart_context.draw_series((0..256).map(|k| {
            let value = min + k as f64 * step;
            Rectangle::new(
                [(0f64, value), (1f64, value + step)],
                self.color(value + step / 2f64).filled(),
            )
        }))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_ends() {
        let colorbar = Colorbar::new(0., 1.);
        assert_eq!(colorbar.color(-3.), colorbar.color(0.));
        assert_eq!(colorbar.color(7.), colorbar.color(1.));
        assert_ne!(colorbar.color(0.), colorbar.color(1.));
    }

    #[test]
    fn flat_range() {
        let colorbar = Colorbar::new(2., 2.);
        assert_eq!(colorbar.color(2.), colorbar.color(100.));
    }
}
