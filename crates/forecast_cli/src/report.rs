//! Report rendering for forecast results
//!
//! Turns a completed session and its summary into human-readable text or
//! JSON. Nothing here feeds back into the simulation.

use forecast_engine::summary::format_percentile_key;
use forecast_engine::{SamplingScheme, SimulationSession, SummaryStatistics};
use serde::Serialize;

/// Format a value as dollars with thousands separators: `$1,234,567.89`
///
/// Non-finite values print as `inf`, `-inf` or `NaN`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    let cents = (value.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc() as u128;
    let fraction = (cents % 100.0) as u32;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0.0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

/// Ordinal label for a percentile: `5` → `5th`, `1` → `1st`, `97.5` → `97.5th`
pub fn percentile_label(p: f64) -> String {
    let key = format_percentile_key(p);
    if p.fract() != 0.0 {
        return format!("{}th", key);
    }

    let n = p as u64;
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", key, suffix)
}

/// Render the plain-text summary
pub fn render_table(session: &SimulationSession, summary: &SummaryStatistics) -> String {
    let config = session.config();
    let mut lines = vec![
        format!(
            "Monte Carlo forecast: {} paths over {} years (seed {}, {})",
            config.simulation_count(),
            config.years(),
            session.seed(),
            config.sampling()
        ),
        format!(
            "Initial investment: {}  Return: {:.2}%  Volatility: {:.2}%",
            format_currency(config.initial_investment()),
            config.annual_return() * 100.0,
            config.annual_volatility() * 100.0
        ),
        format!("Mean: {}", format_currency(summary.mean())),
    ];

    for (p, value) in summary.percentiles() {
        lines.push(format!(
            "{} Percentile: {}",
            percentile_label(*p),
            format_currency(*value)
        ));
    }

    lines.push(format!("Std Dev: {}", format_currency(summary.std_dev())));
    lines.push(format!(
        "Range: {} to {}",
        format_currency(summary.min()),
        format_currency(summary.max())
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Machine-readable forecast report
#[derive(Debug, Serialize)]
pub struct ForecastReport<'a> {
    pub initial_investment: f64,
    pub annual_return: f64,
    pub annual_volatility: f64,
    pub years: usize,
    pub simulations: usize,
    pub seed: u64,
    pub sampling: SamplingScheme,
    pub summary: &'a SummaryStatistics,
}

impl<'a> ForecastReport<'a> {
    /// Collect the report fields from a session
    pub fn new(session: &SimulationSession, summary: &'a SummaryStatistics) -> Self {
        let config = session.config();
        Self {
            initial_investment: config.initial_investment(),
            annual_return: config.annual_return(),
            annual_volatility: config.annual_volatility(),
            years: config.years(),
            simulations: config.simulation_count(),
            seed: session.seed(),
            sampling: config.sampling(),
            summary,
        }
    }
}

/// Render the JSON report
pub fn render_json(
    session: &SimulationSession,
    summary: &SummaryStatistics,
) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(&ForecastReport::new(session, summary))?;
    out.push('\n');
    Ok(out)
}
