use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use super::formatter::format_views;
use crate::ranking::IntegratedRanking;
use crate::selection::Selection;

/// Byte-order mark so spreadsheet tools detect UTF-8
const BOM: char = '\u{FEFF}';

const HEADERS: [&str; 8] = [
    "통합순위",
    "제목",
    "점수",
    "대표플랫폼",
    "장르",
    "총조회수",
    "등장플랫폼수",
    "등장플랫폼",
];

/// Render rankings as CSV text (BOM, header row, one row per ranking).
///
/// Titles and genres are written verbatim: a comma inside one shifts that
/// row's columns. Total views carry thousands separators and are quoted.
pub fn to_csv(rankings: &[IntegratedRanking]) -> String {
    let mut lines = Vec::with_capacity(rankings.len() + 1);
    lines.push(HEADERS.join(","));

    for (idx, ranking) in rankings.iter().enumerate() {
        let platforms: Vec<&str> = ranking.platforms.iter().map(|p| p.id()).collect();
        lines.push(
            [
                (idx + 1).to_string(),
                ranking.title.clone(),
                ranking.score.to_string(),
                ranking.main_platform.id().to_string(),
                ranking.genre.clone(),
                format!("\"{}\"", format_views(ranking.total_views)),
                ranking.platform_count.to_string(),
                platforms.join(";"),
            ]
            .join(","),
        );
    }

    format!("{}{}", BOM, lines.join("\n"))
}

/// Suggested download name: `liverank_mini_<week>_<platforms>_<genres>.csv`,
/// with `all` standing in for an unrestricted facet.
pub fn export_filename(selection: &Selection) -> String {
    let week = selection.week().unwrap_or("all");
    let platforms = if selection.platforms.is_empty() {
        "all".to_string()
    } else {
        selection
            .platforms
            .iter()
            .map(|p| p.id())
            .collect::<Vec<_>>()
            .join("-")
    };
    let genres = if selection.genres.is_empty() {
        "all".to_string()
    } else {
        selection.genres.join("-")
    };
    format!("liverank_mini_{}_{}_{}.csv", week, platforms, genres)
}

/// Write the CSV export atomically, so a reader never sees a partial file
pub fn write_export(path: &Path, rankings: &[IntegratedRanking]) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    file.write_all(to_csv(rankings).as_bytes())
        .context("Failed to write export")?;

    file.commit()
        .with_context(|| format!("Failed to save export to {}", path.display()))?;

    Ok(())
}
