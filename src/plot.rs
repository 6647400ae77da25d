// SPDX-License-Identifier: AGPL-3.0-only

//! SVG charts of phonon frequency against mode index.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::error::{PhononError, Result};
use crate::spectral::PhononSpectrum;
use crate::sweep::SweepPanel;

const CHART_SIZE: (u32, u32) = (1200, 800);

fn plot_err(err: impl Display) -> PhononError {
    PhononError::Plot(err.to_string())
}

fn y_upper(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0_f64, f64::max).max(f64::MIN_POSITIVE) * 1.05
}

/// Scatter the sorted frequencies against mode index, with an optional
/// analytical line overlay.
///
/// # Errors
/// `Plot` on any backend failure.
pub fn render_spectrum(
    path: &Path,
    spectrum: &PhononSpectrum,
    analytical: Option<&[f64]>,
) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let x_max = spectrum.modes.len().max(1) as f64;
    let y_max = y_upper(
        spectrum
            .frequencies
            .iter()
            .chain(analytical.unwrap_or_default())
            .copied(),
    );
    let caption = if analytical.is_some() {
        "Phonon frequency in a quasicrystal"
    } else {
        "Quasicrystal phonon frequency"
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Mode")
        .y_desc("Phonon frequency")
        .label_style(("sans-serif", 20))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(
            spectrum
                .modes
                .iter()
                .zip(&spectrum.frequencies)
                .map(|(&n, &w)| Circle::new((n as f64, w), 3, BLUE.filled())),
        )
        .map_err(plot_err)?
        .label("Calculated")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, BLUE.filled()));

    if let Some(reference) = analytical {
        let line: Vec<(f64, f64)> = spectrum
            .modes
            .iter()
            .zip(reference)
            .map(|(&n, &w)| (n as f64, w))
            .collect();
        chart
            .draw_series(LineSeries::new(line, &RED))
            .map_err(plot_err)?
            .label("Analytical")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(("sans-serif", 20))
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// One chart for one generation count, one colored series per mass ratio.
///
/// # Errors
/// `Plot` on any backend failure.
pub fn render_sweep_panel(path: &Path, panel: &SweepPanel) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let x_max = panel
        .points
        .iter()
        .map(|p| p.frequencies.len())
        .max()
        .unwrap_or(1)
        .max(1) as f64;
    let y_max = y_upper(
        panel
            .points
            .iter()
            .flat_map(|p| p.frequencies.iter().copied()),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Phonon frequency in a quasicrystal ({} generations)",
                panel.generations
            ),
            ("sans-serif", 28),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Mode")
        .y_desc("Phonon frequency")
        .label_style(("sans-serif", 20))
        .draw()
        .map_err(plot_err)?;

    for (idx, point) in panel.points.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(
                point
                    .frequencies
                    .iter()
                    .enumerate()
                    .map(move |(n, &w)| Circle::new((n as f64, w), 2, color.filled())),
            )
            .map_err(plot_err)?
            .label(format!("Mass ratio {}", point.ratio))
            .legend(move |(x, y)| Circle::new((x + 10, y), 3, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(("sans-serif", 20))
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Render every panel into `dir` as `sweep_g{generations}.svg`.
///
/// # Errors
/// `Io` if `dir` cannot be created, `Plot` on backend failure.
pub fn render_sweep(dir: &Path, panels: &[SweepPanel]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    panels
        .iter()
        .map(|panel| {
            let path = dir.join(format!("sweep_g{}.svg", panel.generations));
            render_sweep_panel(&path, panel)?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_upper_never_zero() {
        assert!(y_upper(std::iter::empty()) > 0.0);
        assert!((y_upper([1.0, 2.0].into_iter()) - 2.1).abs() < 1e-12);
    }
}
