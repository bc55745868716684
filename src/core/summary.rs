use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Float;

use super::Bounds;

/// A struct that holds the results of a swarm optimization run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SwarmSummary {
    /// The bounds of the search space. This is `None` if no bounds were set.
    pub bounds: Option<Bounds>,
    /// The best cost found by the swarm.
    pub best_cost: Float,
    /// The position of the best cost, `None` if the swarm was never evaluated.
    pub best_pos: Option<Vec<Float>>,
    /// The number of iterations executed in the last run.
    pub n_iters: usize,
    /// The number of objective evaluations (one per particle per iteration).
    pub cost_evals: usize,
    /// Whether the run stopped early on the fractional tolerance.
    pub converged: bool,
    /// The final message of the run.
    pub message: String,
}

impl Display for SwarmSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use tabled::{
            builder::Builder,
            settings::{
                object::Row, style::HorizontalLine, themes::BorderCorrection, Alignment, Color,
                Padding, Span, Style, Theme,
            },
        };
        let mut builder = Builder::default();
        builder.push_record(["SWARM RESULTS"]);
        builder.push_record(["Status", "Best Cost", "", "Iterations", "#f(x)"]);
        builder.push_record([
            if self.converged {
                "Converged"
            } else {
                "Not Converged"
            },
            &format!("{:.5}", self.best_cost),
            "",
            &self.n_iters.to_string(),
            &self.cost_evals.to_string(),
        ]);
        builder.push_record(["Message", &self.message]);

        let best_pos = self.best_pos.as_deref().unwrap_or_default();
        if !best_pos.is_empty() {
            builder.push_record(["Parameter", "", "Bound", "", "At Limit?"]);
            builder.push_record(["", "=", "-", "+", ""]);
        }
        for (i, v) in best_pos.iter().enumerate() {
            let bound = self.bounds.as_ref().and_then(|b| b.get(i));
            let (lower, upper) = bound.map_or((Float::NEG_INFINITY, Float::INFINITY), |b| {
                (b.lower(), b.upper())
            });
            builder.push_record([
                format!("x_{}", i),
                format!("{:.5}", v),
                format!("{:.5}", lower),
                format!("{:.5}", upper),
                if bound.map_or(false, |b| b.at_bound(*v)) {
                    "Yes"
                } else {
                    "No"
                }
                .to_string(),
            ]);
        }
        let mut table = builder.build();
        let mut style = Theme::from_style(Style::rounded().remove_horizontals());
        let n_lines = if best_pos.is_empty() { 3 } else { 5 };
        for line in 1..=n_lines {
            style.insert_horizontal_line(line, HorizontalLine::inherit(Style::modern()));
        }

        table
            .with(style)
            .modify(
                Row::from(0),
                (Padding::new(1, 1, 1, 1), Alignment::center(), Color::BOLD),
            )
            .modify((0, 0), Span::column(5))
            .modify(Row::from(1), Color::BOLD)
            .modify((1, 1), Span::column(2))
            .modify((2, 1), Span::column(2))
            .modify(Row::from(3), Padding::new(1, 1, 1, 1))
            .modify((3, 0), Color::BOLD)
            .modify((3, 1), Span::column(4));
        if !best_pos.is_empty() {
            table
                .modify(Row::from(4), Color::BOLD)
                .modify((4, 0), Span::column(2))
                .modify((4, 2), Span::column(2))
                .modify(Row::from(5), Color::BOLD);
        }
        table.with(BorderCorrection::span());
        f.write_str(&table.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Bound;

    #[test]
    fn test_display() {
        let summary = SwarmSummary {
            bounds: Some(vec![Bound::new(-1.0, 1.0), Bound::new(0.0, 2.0)].into()),
            best_cost: 0.25,
            best_pos: Some(vec![1.0, 0.5]),
            n_iters: 10,
            cost_evals: 50,
            converged: true,
            message: "ftol reached".to_string(),
        };
        let text = summary.to_string();
        assert!(text.contains("SWARM RESULTS"));
        assert!(text.contains("Converged"));
        assert!(text.contains("0.25000"));
        assert!(text.contains("#f(x)"));
        assert!(text.contains("50"));
        assert!(text.contains("ftol reached"));
        assert!(text.contains("At Limit?"));
        let rows: Vec<&str> = text.lines().filter(|l| l.contains("x_")).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("x_0") && rows[0].contains("1.00000") && rows[0].contains("Yes"));
        assert!(rows[1].contains("x_1") && rows[1].contains("2.00000") && rows[1].contains("No"));
    }

    #[test]
    fn test_display_unbounded() {
        let summary = SwarmSummary {
            best_cost: 3.0,
            best_pos: Some(vec![0.5]),
            ..Default::default()
        };
        let text = summary.to_string();
        let row = text.lines().find(|l| l.contains("x_0")).unwrap();
        assert!(row.contains("-inf") && row.contains("inf") && row.contains("No"));
    }

    #[test]
    fn test_display_without_position() {
        let summary = SwarmSummary {
            best_cost: Float::INFINITY,
            ..Default::default()
        };
        let text = summary.to_string();
        assert!(text.contains("Not Converged"));
        assert!(text.contains("inf"));
        assert!(!text.contains("At Limit?"));
        assert!(!text.contains("x_"));
    }
}
