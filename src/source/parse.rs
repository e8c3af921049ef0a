use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::ranking::{Platform, RawRanking};

const FIELD_COUNT: usize = 7;

/// What to do with a data line that fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Log the line and continue with the rest
    #[default]
    Skip,
    /// Reject the whole platform batch
    Abort,
}

/// Parse one data line (fields: platform, title, rank, genre, weekly_views,
/// region, week). `line` is the 1-based line number for error reporting.
pub fn parse_line(text: &str, line: usize) -> Result<RawRanking, RecordError> {
    let fields: Vec<&str> = text.split(',').collect();
    if fields.len() != FIELD_COUNT {
        return Err(RecordError::FieldCount {
            line,
            found: fields.len(),
        });
    }

    let platform = fields[0]
        .parse::<Platform>()
        .map_err(|value| RecordError::UnknownPlatform { line, value })?;
    let rank = fields[2]
        .trim()
        .parse::<i32>()
        .map_err(|_| RecordError::InvalidRank {
            line,
            value: fields[2].to_string(),
        })?;
    let weekly_views = fields[4]
        .trim()
        .parse::<u64>()
        .map_err(|_| RecordError::InvalidViews {
            line,
            value: fields[4].to_string(),
        })?;

    Ok(RawRanking {
        platform,
        title: fields[1].to_string(),
        rank,
        genre: fields[3].to_string(),
        weekly_views,
        region: fields[5].to_string(),
        week: fields[6].to_string(),
    })
}

/// Parse a whole per-platform CSV body.
///
/// The first line is a header and is skipped without inspection. Quoting is
/// not supported; fields must not contain commas.
pub fn parse_rankings(text: &str, policy: MalformedPolicy) -> Result<Vec<RawRanking>, RecordError> {
    let mut records = Vec::new();

    for (idx, raw_line) in text.trim().split('\n').enumerate().skip(1) {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line, idx + 1) {
            Ok(record) => records.push(record),
            Err(e) => match policy {
                MalformedPolicy::Skip => tracing::warn!(error = %e, "skipping malformed record"),
                MalformedPolicy::Abort => return Err(e),
            },
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "platform,title,rank,genre,weekly_views,region,week";

    #[test]
    fn test_parse_valid_body() {
        let body = format!(
            "{}\nnetflix,오징어 게임,1,드라마,1500000,KR,2024-03\nnetflix,더 글로리,2,스릴러,900000,KR,2024-03\n",
            HEADER
        );
        let records = parse_rankings(&body, MalformedPolicy::Abort).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].platform, Platform::Netflix);
        assert_eq!(records[0].title, "오징어 게임");
        assert_eq!(records[0].rank, 1);
        assert_eq!(records[0].genre, "드라마");
        assert_eq!(records[0].weekly_views, 1_500_000);
        assert_eq!(records[0].region, "KR");
        assert_eq!(records[0].week, "2024-03");
        assert_eq!(records[1].title, "더 글로리");
    }

    #[test]
    fn test_header_only() {
        assert!(parse_rankings(HEADER, MalformedPolicy::Abort).unwrap().is_empty());
        assert!(parse_rankings("", MalformedPolicy::Abort).unwrap().is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let body = format!("{}\r\nwavve,A,3,예능,10,KR,2024-03\r\nwavve,B,4,예능,20,KR,2024-03\r\n", HEADER);
        let records = parse_rankings(&body, MalformedPolicy::Abort).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].week, "2024-03");
        assert_eq!(records[1].week, "2024-03");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let body = format!("{}\ntving,A,1,g,1,KR,w\n\ntving,B,2,g,1,KR,w", HEADER);
        assert_eq!(parse_rankings(&body, MalformedPolicy::Abort).unwrap().len(), 2);
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_line("netflix,A,1,g,1,KR", 2).unwrap_err();
        assert_eq!(err, RecordError::FieldCount { line: 2, found: 6 });

        let err = parse_line("netflix,A, B,1,g,1,KR,w", 3).unwrap_err();
        assert_eq!(err, RecordError::FieldCount { line: 3, found: 8 });
    }

    #[test]
    fn test_non_numeric_rank() {
        let err = parse_line("netflix,A,1st,g,1,KR,w", 5).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidRank {
                line: 5,
                value: "1st".to_string()
            }
        );
    }

    #[test]
    fn test_negative_views_rejected() {
        let err = parse_line("netflix,A,1,g,-5,KR,w", 2).unwrap_err();
        assert!(matches!(err, RecordError::InvalidViews { line: 2, .. }));
    }

    #[test]
    fn test_unknown_platform() {
        let err = parse_line("hulu,A,1,g,5,US,w", 2).unwrap_err();
        assert_eq!(
            err,
            RecordError::UnknownPlatform {
                line: 2,
                value: "hulu".to_string()
            }
        );
    }

    #[test]
    fn test_numeric_fields_tolerate_padding() {
        let record = parse_line("disney,A, 12 ,g, 7 ,KR,w", 2).unwrap();
        assert_eq!(record.rank, 12);
        assert_eq!(record.weekly_views, 7);
    }

    #[test]
    fn test_skip_policy_keeps_good_lines() {
        let body = format!("{}\nnetflix,A,1,g,1,KR,w\nnetflix,B,x,g,1,KR,w\nnetflix,C,3,g,1,KR,w", HEADER);
        let records = parse_rankings(&body, MalformedPolicy::Skip).unwrap();
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_abort_policy_reports_line() {
        let body = format!("{}\nnetflix,A,1,g,1,KR,w\nnetflix,B,x,g,1,KR,w", HEADER);
        let err = parse_rankings(&body, MalformedPolicy::Abort).unwrap_err();
        assert!(matches!(err, RecordError::InvalidRank { line: 3, .. }));
    }
}
