use std::io::IsTerminal;

use owo_colors::OwoColorize;

use crate::error::DependentCounts;
use crate::league::DeletionSummary;
use crate::scoring::StandingEntry;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format points without a trailing ".0" (6, -1.5, 12.25)
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 && points.abs() < 1e15 {
        format!("{:.0}", points)
    } else {
        let formatted = format!("{:.2}", points);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Truncate a name to fit a column, accounting for Unicode
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

/// Format standings as a table with columns: Rank, Player, Points, Rounds
///
/// Rank column: 3 chars (fits "99."), right-aligned. Tied players repeat the rank.
/// A trailing "*" marks totals that skipped a category with no weight.
pub fn format_standings_table(entries: &[StandingEntry], use_colors: bool) -> String {
    if entries.is_empty() {
        return "No players in this league.".to_string();
    }

    let name_width = entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(6, 32);
    let points_width = entries
        .iter()
        .map(|e| format_points(e.total).len() + 1)
        .max()
        .unwrap_or(0)
        .max(6);
    let separator = "  ";

    let header = format!(
        "{:>4} {:<name_width$}{}{:>points_width$}{}{:>6}",
        "#",
        "Player",
        separator,
        "Points",
        separator,
        "Rounds",
        name_width = name_width,
        points_width = points_width
    );

    let rows = entries.iter().map(|entry| {
        let rank_str = format!("{:>3}.", entry.rank);
        let name = format!(
            "{:<width$}",
            truncate_name(&entry.name, name_width),
            width = name_width
        );
        let marker = if entry.warnings.is_empty() { "" } else { "*" };
        let points = format!(
            "{:>width$}",
            format!("{}{}", format_points(entry.total), marker),
            width = points_width
        );
        let rounds = format!("{:>6}", entry.rounds);

        if use_colors {
            let name = if entry.rank == 1 {
                name.bold().yellow().to_string()
            } else {
                name
            };
            format!(
                "{} {}{}{}{}{}",
                rank_str.dimmed(),
                name,
                separator,
                points.bold(),
                separator,
                rounds.dimmed()
            )
        } else {
            format!(
                "{} {}{}{}{}{}",
                rank_str, name, separator, points, separator, rounds
            )
        }
    });

    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format standings as tab-separated values for scripting
/// Columns: rank, total, rounds, player id, name (no headers, no colors)
pub fn format_tsv(entries: &[StandingEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                e.rank,
                format_points(e.total),
                e.rounds,
                e.player,
                e.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line listing of what still references a league
pub fn format_dependents(dependents: &DependentCounts) -> String {
    format!(
        "{} players, {} rounds, {} point weights, {} point allocations",
        dependents.players,
        dependents.rounds,
        dependents.point_weights,
        dependents.point_allocations
    )
}

pub fn format_deletion_summary(summary: &DeletionSummary, use_colors: bool) -> String {
    let removed = format_dependents(&DependentCounts {
        players: summary.players,
        rounds: summary.rounds,
        point_weights: summary.point_weights,
        point_allocations: summary.point_allocations,
    });
    if use_colors {
        format!("Deleted league {} ({})", summary.league.red(), removed)
    } else {
        format!("Deleted league {} ({})", summary.league, removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoreWarning;

    fn entry(rank: usize, name: &str, total: f64) -> StandingEntry {
        StandingEntry {
            rank,
            player: format!("id-{}", name.to_lowercase()),
            name: name.to_string(),
            total,
            rounds: 2,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(6.0), "6");
        assert_eq!(format_points(-1.5), "-1.5");
        assert_eq!(format_points(12.25), "12.25");
        assert_eq!(format_points(0.0), "0");
        assert_eq!(format_points(1.0 / 3.0), "0.33");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_standings_table(&[], false), "No players in this league.");
    }

    #[test]
    fn test_table_rows_in_order() {
        let entries = vec![entry(1, "Egwene", 10.0), entry(1, "Nynaeve", 10.0), entry(3, "Elayne", -2.0)];
        let table = format_standings_table(&entries, false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Player"));
        assert!(lines[1].trim_start().starts_with("1. Egwene"));
        assert!(lines[2].trim_start().starts_with("1. Nynaeve"));
        assert!(lines[3].trim_start().starts_with("3. Elayne"));
        assert!(lines[3].contains("-2"));
    }

    #[test]
    fn test_warning_marker() {
        let mut flagged = entry(1, "Moiraine", 4.0);
        flagged.warnings.push(ScoreWarning::MissingWeight {
            round: "r1".to_string(),
            category: "ace".to_string(),
            count: 1,
        });
        let table = format_standings_table(&[flagged], false);
        assert!(table.contains("4*"));
    }

    #[test]
    fn test_long_name_truncated() {
        let long = "A".repeat(50);
        let table = format_standings_table(&[entry(1, &long, 1.0)], false);
        assert!(table.contains(&format!("{}...", "A".repeat(29))));
    }

    #[test]
    fn test_format_tsv() {
        let tsv = format_tsv(&[entry(1, "Lan", 7.5)]);
        assert_eq!(tsv, "1\t7.5\t2\tid-lan\tLan");
    }

    #[test]
    fn test_deletion_summary() {
        let summary = DeletionSummary {
            league: "l1".to_string(),
            players: 2,
            rounds: 1,
            point_weights: 3,
            point_allocations: 2,
        };
        assert_eq!(
            format_deletion_summary(&summary, false),
            "Deleted league l1 (2 players, 1 rounds, 3 point weights, 2 point allocations)"
        );
    }
}
