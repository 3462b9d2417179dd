//! Line-chart model and its `plotters` rendering.
//!
//! A [`LineChart`] holds plain data (axis descriptions, the x range and one
//! labelled [`ChartSeries`] per sender), so chart construction can be checked
//! without decoding pixels. [`LineChart::draw`] renders it through
//! [`BitMapBackend`] with a mesh, labelled ticks and a legend of sender names.

use std::error::Error;
use std::path::Path;

use chrono::{NaiveDate, TimeDelta};
use plotters::prelude::*;

/// One series: polyline runs of `(x, y)` points. A new run starts after a gap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    /// Legend entry, the sender name
    pub label: String,
    pub runs: Vec<Vec<(f64, f64)>>,
}

impl ChartSeries {
    /// A series drawn as one unbroken line.
    pub fn continuous(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            runs: vec![points],
        }
    }

    fn max_y(&self) -> f64 {
        self.runs
            .iter()
            .flatten()
            .map(|&(_, y)| y)
            .fold(0.0, f64::max)
    }
}

/// A line chart over a fixed x range with y starting at zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineChart {
    pub caption: String,
    pub x_desc: String,
    pub y_desc: String,
    pub x_min: f64,
    pub x_max: f64,
    /// Upper bound on the number of x tick labels
    pub x_labels: usize,
    /// When set, x is a day offset from this date and ticks show dates
    pub x_origin: Option<NaiveDate>,
    pub series: Vec<ChartSeries>,
}

impl LineChart {
    /// Largest y value over all series.
    pub fn max_y(&self) -> f64 {
        self.series.iter().map(ChartSeries::max_y).fold(0.0, f64::max)
    }

    fn x_tick_label(&self, x: f64) -> String {
        match self.x_origin {
            Some(origin) => (origin + TimeDelta::days(x.round() as i64))
                .format("%Y-%m-%d")
                .to_string(),
            None => format!("{x:.0}"),
        }
    }

    /// Renders the chart as a `width` x `height` PNG at `path`.
    pub fn draw(&self, path: &Path, (width, height): (u32, u32)) -> Result<(), Box<dyn Error>> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        // A zero-width range cannot be mapped onto pixels
        let x_max = if self.x_max > self.x_min {
            self.x_max
        } else {
            self.x_min + 1.0
        };
        let y_max = match self.max_y() {
            y if y > 0.0 => y * 1.05,
            _ => 1.0,
        };

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.caption, ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(self.x_min..x_max, 0f64..y_max)?;

        let x_formatter = |x: &f64| self.x_tick_label(*x);
        chart
            .configure_mesh()
            .x_labels(self.x_labels.max(2))
            .x_label_formatter(&x_formatter)
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .draw()?;

        for (index, series) in self.series.iter().enumerate() {
            let color = Palette99::pick(index).to_rgba();
            for (run_index, run) in series.runs.iter().enumerate() {
                let anno = if run.len() == 1 {
                    chart.draw_series(run.iter().map(|&p| Circle::new(p, 3, color.filled())))?
                } else {
                    chart.draw_series(LineSeries::new(run.iter().copied(), color.stroke_width(2)))?
                };
                // One legend entry per sender
                if run_index == 0 {
                    anno.label(series.label.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                }
            }
        }

        if !self.series.is_empty() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}
