use std::io::IsTerminal;
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{Width, terminal_size};

use crate::ranking::{IntegratedRanking, Platform, RawRanking, Summary};
use crate::selection::Selection;
use crate::session::BoardView;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a count with comma thousands separators (1234567 -> "1,234,567")
pub fn format_views(views: u64) -> String {
    let digits = views.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format views in millions with one decimal ("12.3M")
pub fn format_millions(views: u64) -> String {
    format!("{:.1}M", views as f64 / 1_000_000.0)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn platform_list(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(|p| p.id())
        .collect::<Vec<_>>()
        .join(",")
}

/// One-line KPI header: platforms, title count, top score, total views
pub fn format_summary(summary: &Summary, use_colors: bool) -> String {
    let platforms = match summary.selected_platforms {
        Some(n) => format!("{}개", n),
        None => "전체".to_string(),
    };
    let line = format!(
        "선택된 플랫폼: {}  |  총 타이틀 수: {}개  |  최고 점수: {}점  |  총 조회수: {}",
        platforms,
        format_views(summary.total_titles as u64),
        summary.top_score,
        format_millions(summary.total_views)
    );
    if use_colors {
        line.bold().to_string()
    } else {
        line
    }
}

/// Format the integrated ranking as a table.
///
/// Columns: position, score, title, main platform, total views, platforms.
/// Index column is right-aligned with a trailing dot, 1-based.
pub fn format_ranking_table(rankings: &[IntegratedRanking], use_colors: bool) -> String {
    if rankings.is_empty() {
        return "데이터가 없습니다".to_string();
    }

    let term_width = get_terminal_width();
    let score_width = 4;
    let views_width = 13;
    let separator = "  ";

    rankings
        .iter()
        .enumerate()
        .map(|(idx, ranking)| {
            let index_str = format!("{:>3}.", idx + 1);
            let score_str = format!("{:>width$}", ranking.score, width = score_width);
            let views_str = format!("{:>width$}", format_views(ranking.total_views), width = views_width);
            let main = format!("{:<7}", ranking.main_platform.id());
            let platforms = platform_list(&ranking.platforms);

            let fixed_width = 4 + 1 + score_width + views_width + 7 + platforms.len() + separator.len() * 4;
            let title = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_title(&ranking.title, width - fixed_width),
                Some(_) => truncate_title(&ranking.title, 20),
                None => ranking.title.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{sep}{}{sep}{}{sep}{}{sep}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    title,
                    main.cyan(),
                    views_str,
                    platforms.dimmed(),
                    sep = separator
                )
            } else {
                format!(
                    "{} {}{sep}{}{sep}{}{sep}{}{sep}{}",
                    index_str,
                    score_str,
                    title,
                    main,
                    views_str,
                    platforms,
                    sep = separator
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one platform's own top list under a heading
pub fn format_platform_top(
    platform: Platform,
    records: &[RawRanking],
    limit: usize,
    use_colors: bool,
) -> String {
    let heading = format!("{} TOP {}", platform.display_name(), limit);
    let heading = if use_colors {
        heading.bold().yellow().to_string()
    } else {
        heading
    };

    if records.is_empty() {
        return format!("{}\n  데이터가 없습니다", heading);
    }

    let rows = records
        .iter()
        .map(|r| {
            format!(
                "{:>4}  {}  [{}]  {}",
                r.rank,
                r.title,
                r.genre,
                format_views(r.weekly_views)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n{}", heading, rows)
}

/// Format facet choices: weeks (most recent first) then genres
pub fn format_facets(weeks: &[String], genres: &[String]) -> String {
    let weeks = if weeks.is_empty() {
        "-".to_string()
    } else {
        weeks.iter().map(|w| format!("{} 주차", w)).collect::<Vec<_>>().join(", ")
    };
    let genres = if genres.is_empty() {
        "-".to_string()
    } else {
        genres.join(", ")
    };
    format!("Weeks:  {}\nGenres: {}", weeks, genres)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    week: Option<&'a str>,
    generated_at: DateTime<Utc>,
    selection: &'a Selection,
    summary: &'a Summary,
    rankings: &'a [IntegratedRanking],
}

/// Pretty JSON document for scripting: week, timestamp, selection, summary
/// and the (optionally truncated) rankings
pub fn format_json(view: &BoardView, limit: Option<usize>) -> serde_json::Result<String> {
    let shown = limit.unwrap_or(view.rankings.len()).min(view.rankings.len());
    let report = JsonReport {
        week: view.selection.week(),
        generated_at: Utc::now(),
        selection: &view.selection,
        summary: &view.summary,
        rankings: &view.rankings[..shown],
    };
    serde_json::to_string_pretty(&report)
}
