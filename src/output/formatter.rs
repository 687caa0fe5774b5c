use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{PriorityBand, ScoredPlanet};
use crate::validation::{CheckStatus, OverallStatus, ValidationRecord, ValidationReport};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Scores are shown with three decimals ("0.927")
pub fn format_score(score: f64) -> String {
    format!("{:.3}", score)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a planet name to fit available width, counting chars not bytes
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn colored_band(band: PriorityBand, width: usize) -> String {
    let padded = format!("{:<width$}", band.label(), width = width);
    match band {
        PriorityBand::HighPriority => padded.green().bold().to_string(),
        PriorityBand::FollowUp => padded.yellow().to_string(),
        PriorityBand::Context => padded.dimmed().to_string(),
    }
}

/// Ranked table of the best `limit` planets, one line each:
/// index, score, band, name, host.
/// Index column: 3 chars (fits "99."), score column 5 chars, band column 13.
pub fn format_ranked_table(scored: &[ScoredPlanet], limit: usize, use_colors: bool) -> String {
    if scored.is_empty() {
        return "No planets scored.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 4;
    let score_width = 5;
    let band_width = 13;
    let separator = "  ";

    scored
        .iter()
        .take(limit)
        .enumerate()
        .map(|(idx, planet)| {
            let index_str = format!("{:>width$}.", idx + 1, width = index_width - 1);
            let score_str = format_score(planet.priority_score);
            let host = &planet.input.host;

            let fixed_width =
                index_width + 1 + score_width + band_width + separator.len() * 3 + host.chars().count();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&planet.input.name, width - fixed_width)
                }
                // Very narrow terminal, show truncated
                Some(_) => truncate_name(&planet.input.name, 20),
                // No terminal (pipe), don't truncate
                None => planet.input.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    colored_band(planet.priority_band, band_width),
                    separator,
                    name,
                    separator,
                    host.cyan()
                )
            } else {
                format!(
                    "{} {}{}{:<band_width$}{}{}{}{}",
                    index_str,
                    score_str,
                    separator,
                    planet.priority_band.label(),
                    separator,
                    name,
                    separator,
                    host,
                    band_width = band_width
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// "N planets evaluated; K high-priority candidates"
pub fn format_summary(evaluated: usize, high_priority: usize) -> String {
    format!(
        "{} planets evaluated; {} high-priority candidates",
        evaluated, high_priority
    )
}

/// One harness check as "[PASS] name: details"
pub fn format_check_line(record: &ValidationRecord, use_colors: bool) -> String {
    let tag = format!("[{}]", record.status.to_string().to_uppercase());
    if use_colors {
        let tag = match record.status {
            CheckStatus::Pass => tag.green().to_string(),
            CheckStatus::Warn => tag.yellow().to_string(),
            CheckStatus::Fail => tag.red().bold().to_string(),
        };
        format!("{} {}: {}", tag, record.name.bold(), record.details)
    } else {
        format!("{} {}: {}", tag, record.name, record.details)
    }
}

/// All check lines followed by the overall status.
pub fn format_validation_report(report: &ValidationReport, use_colors: bool) -> String {
    let mut lines: Vec<String> = report
        .checks()
        .iter()
        .map(|record| format_check_line(record, use_colors))
        .collect();
    let overall = report.overall().to_string();
    let overall = if !use_colors {
        overall
    } else if report.overall() == OverallStatus::Pass {
        overall.green().bold().to_string()
    } else {
        overall.yellow().bold().to_string()
    };
    lines.push(format!("Overall: {}", overall));
    lines.join("\n")
}
