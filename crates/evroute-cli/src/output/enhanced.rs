//! Enhanced renderer with colored step tags and battery readings.

use crate::terminal::ColorPalette;
use evroute_lib::{RouteStep, RouteSummary};

/// Renderer for the enhanced output format.
pub struct EnhancedRenderer {
    palette: ColorPalette,
    capacity_kwh: f64,
}

impl EnhancedRenderer {
    /// `capacity_kwh` scales the battery coloring.
    #[must_use]
    pub const fn new(palette: ColorPalette, capacity_kwh: f64) -> Self {
        Self {
            palette,
            capacity_kwh,
        }
    }

    /// Print a route summary to stdout.
    pub fn render(&self, summary: &RouteSummary) {
        for line in self.render_lines(summary) {
            println!("{line}");
        }
    }

    pub fn render_lines(&self, summary: &RouteSummary) -> Vec<String> {
        let p = &self.palette;
        let mut lines = Vec::with_capacity(summary.steps.len() + 4);
        lines.push(format!(
            "Route from {}{}{} to {}{}{} ({} hops):",
            p.white_bold,
            summary.origin,
            p.reset,
            p.white_bold,
            summary.destination,
            p.reset,
            summary.hops
        ));

        let len = summary.steps.len();
        for (i, step) in summary.steps.iter().enumerate() {
            lines.push(self.build_step_line(step, i == 0, i + 1 == len));
        }

        lines.push(String::new());
        lines.push(format!(
            "Energy used: {:.2} kWh over {:.2} km ({:.1} min)",
            summary.total_energy_kwh, summary.distance_km, summary.travel_time_min
        ));
        lines.push(format!(
            "Recharges: {}  {}Expanded {} states in {:.2} ms ({}){}",
            summary.recharges,
            p.gray,
            summary.nodes_expanded,
            summary.elapsed_ms,
            summary.algorithm,
            p.reset
        ));
        lines
    }

    pub(crate) fn build_step_line(
        &self,
        step: &RouteStep,
        is_first: bool,
        is_last: bool,
    ) -> String {
        let p = &self.palette;
        let (tag_color, tag_text) = self.step_tag(step, is_first, is_last);
        let mut line = format!(
            "{}{}{} {}{}{}",
            tag_color, tag_text, p.reset, p.white_bold, step.node, p.reset
        );
        if let Some(battery) = step.battery_kwh {
            line.push_str(&format!(
                " {}{:.2} kWh{}",
                p.battery(battery, self.capacity_kwh),
                battery,
                p.reset
            ));
        }
        line
    }

    fn step_tag(
        &self,
        step: &RouteStep,
        is_first: bool,
        is_last: bool,
    ) -> (&'static str, &'static str) {
        let p = &self.palette;
        if is_first {
            (p.tag_start, "[STRT]")
        } else if step.recharged {
            (p.tag_charge, "[CHRG]")
        } else if is_last {
            (p.tag_goal, "[GOAL]")
        } else {
            (p.tag_drive, "[DRVE]")
        }
    }
}
