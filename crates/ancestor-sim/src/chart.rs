//! Two-panel SVG chart of a run.
//!
//! The top panel plots each episode's score against the acceptance
//! threshold; the bottom panel plots the 0/1 acceptance decision.

use std::fmt::Display;
use std::path::Path;

use plotters::prelude::*;

use ancestor_contracts::{
    citation::ScoreResult,
    error::{AncestorError, AncestorResult},
};

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 800;

/// Render `results` to an SVG file at `path`.
pub fn render_chart(results: &[ScoreResult], threshold: f64, path: &Path) -> AncestorResult<()> {
    let x_max = results.last().map_or(2, |r| r.episode.max(2));

    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;
    let (upper, lower) = root.split_vertically(HEIGHT / 2);

    let mut scores = ChartBuilder::on(&upper)
        .caption("Trust Scores Over Episodes", ("sans-serif", 22).into_font())
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(1u32..x_max, 0f64..100f64)
        .map_err(render_error)?;

    scores
        .configure_mesh()
        .x_desc("Episode")
        .y_desc("Trust Score")
        .draw()
        .map_err(render_error)?;

    scores
        .draw_series(LineSeries::new(
            results.iter().map(|r| (r.episode, r.rounded_score())),
            &BLUE,
        ))
        .map_err(render_error)?
        .label("Trust Score")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    scores
        .draw_series(LineSeries::new(
            [(1u32, threshold), (x_max, threshold)],
            RED.stroke_width(2),
        ))
        .map_err(render_error)?
        .label(format!("Threshold ({threshold})"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    scores
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_error)?;

    let mut decisions = ChartBuilder::on(&lower)
        .caption("Acceptance Decisions", ("sans-serif", 22).into_font())
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(1u32..x_max, -0.1f64..1.1f64)
        .map_err(render_error)?;

    decisions
        .configure_mesh()
        .x_desc("Episode")
        .y_desc("Accepted (1) / Rejected (0)")
        .draw()
        .map_err(render_error)?;

    decisions
        .draw_series(
            AreaSeries::new(
                results
                    .iter()
                    .map(|r| (r.episode, if r.accepted { 1.0 } else { 0.0 })),
                0.0,
                GREEN.mix(0.3),
            )
            .border_style(GREEN),
        )
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    Ok(())
}

fn render_error<E: Display>(e: E) -> AncestorError {
    AncestorError::Render {
        reason: e.to_string(),
    }
}
