//! Output formatting for route rendering.
//!
//! This module provides formatters for rendering route summaries
//! in the formats selectable with `--format`.

mod enhanced;

pub use enhanced::EnhancedRenderer;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;

use evroute_lib::{RouteRenderMode, RouteSummary};

use crate::terminal::ColorPalette;

/// Output formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one line per route step.
    #[default]
    Text,
    /// Markdown-flavoured text.
    Rich,
    /// Pretty-printed JSON summary.
    Json,
    /// Tagged steps with colored battery readings.
    Enhanced,
}

impl OutputFormat {
    /// Write `summary` to stdout in this format.
    ///
    /// `capacity_kwh` is only used to color battery readings.
    pub fn render_route_result(self, summary: &RouteSummary, capacity_kwh: f64) -> Result<()> {
        match self {
            OutputFormat::Text => render_with_mode(summary, RouteRenderMode::PlainText),
            OutputFormat::Rich => render_with_mode(summary, RouteRenderMode::RichText),
            OutputFormat::Json => render_json(summary).context("failed to write JSON output"),
            OutputFormat::Enhanced => {
                render_enhanced(summary, capacity_kwh);
                Ok(())
            }
        }
    }
}

fn render_with_mode(summary: &RouteSummary, mode: RouteRenderMode) -> Result<()> {
    let rendered = summary
        .render(mode)
        .context("failed to render route summary")?;
    print!("{rendered}");
    Ok(())
}

/// Render a route summary in JSON format.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json(summary: &RouteSummary) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, summary).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Render a route summary with step tags, using ANSI colors when available.
pub fn render_enhanced(summary: &RouteSummary, capacity_kwh: f64) {
    EnhancedRenderer::new(ColorPalette::detect(), capacity_kwh).render(summary);
}
