//! Report builder — turns one evaluation into display-ready output.
//!
//! Produces the headline metric cards, the unprofitable warning and the
//! operational summary shown by the dashboard and printed by the CLI.
//! Pure: the same inputs always yield the same report.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::catalog::MinerCatalog;
use crate::error::InputError;
use crate::types::{CalculationResult, MinerSpec, SiteInputs};

pub const UNPROFITABLE_WARNING: &str = "Unprofitable at current Grid Rates";

pub const UPTIME_NOTE: &str = "100% (Assume Grid Fallback)";

pub const MODEL_NOTE: &str = "Note: This V1 version assumes 100% grid uptime. \
     Solar generation curves and battery storage are not yet modeled.";

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Which way a metric delta should be coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaColor {
    /// Positive is good (green up).
    Normal,
    /// Flipped, used when the operation is losing money.
    Inverse,
}

/// A headline metric card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
    pub delta_color: DeltaColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

/// Everything the boundary needs to render one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub inputs: SiteInputs,
    pub spec: MinerSpec,
    pub result: CalculationResult,
    pub efficiency_j_per_th: f64,
    pub total_power_kw: f64,
    pub profitable: bool,
    pub metrics: Vec<Metric>,
    pub warning: Option<String>,
    pub summary: Vec<SummaryLine>,
    pub note: &'static str,
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Validate `inputs`, run the engine against `catalog`, and build the report.
pub fn evaluate(catalog: &MinerCatalog, inputs: &SiteInputs) -> Result<Report, InputError> {
    inputs.validate()?;

    let calc = inputs.calculation_input(catalog);
    let result = calc.evaluate();
    let profitable = result.is_profitable();

    debug!(
        model = %inputs.miner_model,
        quantity = inputs.miner_qty,
        net_profit = format!("${:.2}", result.net_profit),
        profitable,
        "Evaluation complete"
    );

    Ok(build_report(inputs.clone(), calc.miner, result))
}

fn build_report(inputs: SiteInputs, spec: MinerSpec, result: CalculationResult) -> Report {
    let efficiency = spec.efficiency_j_per_th();
    let total_power_kw = result.total_power_kw();
    let profitable = result.is_profitable();
    let delta_color = if profitable {
        DeltaColor::Normal
    } else {
        DeltaColor::Inverse
    };

    let metrics = vec![
        Metric {
            label: "Daily Revenue",
            value: format_usd(result.daily_revenue),
            delta: None,
            delta_color: DeltaColor::Normal,
        },
        Metric {
            label: "Daily Power Cost",
            value: format_usd(result.daily_cost),
            delta: None,
            delta_color: DeltaColor::Normal,
        },
        Metric {
            label: "Net Profit",
            value: format_usd(result.net_profit),
            delta: Some(format_usd(result.net_profit)),
            delta_color,
        },
    ];

    let summary = vec![
        SummaryLine {
            label: "Hardware",
            value: format!("{}x {}", inputs.miner_qty, inputs.miner_model),
        },
        SummaryLine {
            label: "Total Hashrate",
            value: format!("{} TH/s", format_grouped(result.total_hashrate_th, 0)),
        },
        SummaryLine {
            label: "Efficiency",
            value: format!("{efficiency:.2} J/TH"),
        },
        SummaryLine {
            label: "Power Draw",
            value: format!(
                "{} Watts ({:.2} kW)",
                format_grouped(result.total_power_watts, 0),
                total_power_kw
            ),
        },
        SummaryLine {
            label: "Solar Capacity",
            value: format!("{} kWp", format_grouped(inputs.solar_size_kw, 2)),
        },
        SummaryLine {
            label: "Uptime",
            value: UPTIME_NOTE.to_string(),
        },
    ];

    Report {
        inputs,
        spec,
        result,
        efficiency_j_per_th: efficiency,
        total_power_kw,
        profitable,
        metrics,
        warning: (!profitable).then(|| UNPROFITABLE_WARNING.to_string()),
        summary,
        note: MODEL_NOTE,
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Fixed-point with `,` thousands separators, e.g. `1234.5` → `1,234.50`.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut out = String::with_capacity(raw.len() + int_part.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Dollar amount with two decimals. Negative values render as `$-5.92`.
pub fn format_usd(value: f64) -> String {
    format!("${}", format_grouped(value, 2))
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solar Bitcoin Mining Economics")?;
        writeln!(f, "{}", "-".repeat(40))?;
        for m in &self.metrics {
            write!(f, "{:<20} {:>14}", m.label, m.value)?;
            if let Some(delta) = &m.delta {
                let arrow = match m.delta_color {
                    DeltaColor::Normal => "▲",
                    DeltaColor::Inverse => "▼",
                };
                write!(f, "  {arrow} {delta}")?;
            }
            writeln!(f)?;
        }
        if let Some(warning) = &self.warning {
            writeln!(f, "\n⚠️  {warning}")?;
        }

        writeln!(f, "\nOperational Summary")?;
        writeln!(f, "{}", "-".repeat(40))?;
        for line in &self.summary {
            writeln!(f, "{:<16} {}", format!("{}:", line.label), line.value)?;
        }
        write!(f, "\n{}", self.note)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
