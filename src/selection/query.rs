use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::Selection;
use crate::error::SelectionError;
use crate::ranking::Platform;

/// Characters left bare in a query value. `,` is encoded inside items so it
/// stays unambiguous as the list separator.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn decode(key: &str, raw: &str) -> Result<String, SelectionError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|v| v.into_owned())
        .map_err(|_| SelectionError::InvalidEncoding {
            key: key.to_string(),
        })
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

fn decode_list(key: &str, raw: &str) -> Result<Vec<String>, SelectionError> {
    raw.split(',')
        .filter(|item| !item.is_empty())
        .map(|item| decode(key, item))
        .collect()
}

impl Selection {
    /// Parse `platforms=a,b&genres=x,y&week=w` into a selection.
    ///
    /// A leading `?` is accepted. Unknown keys are ignored; an empty or
    /// missing key leaves that facet unrestricted.
    pub fn from_query(query: &str) -> Result<Selection, SelectionError> {
        let mut selection = Selection::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "platforms" => {
                    selection.platforms = decode_list(key, value)?
                        .into_iter()
                        .map(|id| {
                            id.parse::<Platform>()
                                .map_err(SelectionError::UnknownPlatform)
                        })
                        .collect::<Result<_, _>>()?;
                }
                "genres" => selection.genres = decode_list(key, value)?,
                "week" => {
                    let week = decode(key, value)?;
                    selection.week = (!week.is_empty()).then_some(week);
                }
                _ => {}
            }
        }

        Ok(selection)
    }

    /// Inverse of [`Selection::from_query`]; unrestricted facets are omitted.
    pub fn to_query(&self) -> String {
        let mut pairs = Vec::new();
        if !self.platforms.is_empty() {
            let ids: Vec<&str> = self.platforms.iter().map(|p| p.id()).collect();
            pairs.push(format!("platforms={}", ids.join(",")));
        }
        if !self.genres.is_empty() {
            let genres: Vec<String> = self.genres.iter().map(|g| encode(g)).collect();
            pairs.push(format!("genres={}", genres.join(",")));
        }
        if let Some(week) = self.week() {
            pairs.push(format!("week={}", encode(week)));
        }
        pairs.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_query() {
        let selection =
            Selection::from_query("platforms=netflix,wavve&genres=drama,comedy&week=2024-03")
                .unwrap();
        assert_eq!(selection.platforms, vec![Platform::Netflix, Platform::Wavve]);
        assert_eq!(selection.genres, vec!["drama", "comedy"]);
        assert_eq!(selection.week(), Some("2024-03"));
    }

    #[test]
    fn test_parse_empty_query() {
        assert_eq!(Selection::from_query("").unwrap(), Selection::default());
        assert_eq!(Selection::from_query("?").unwrap(), Selection::default());
    }

    #[test]
    fn test_parse_drops_empty_items_and_unknown_keys() {
        let selection = Selection::from_query("?platforms=,tving,&week=&sort=desc").unwrap();
        assert_eq!(selection.platforms, vec![Platform::Tving]);
        assert!(selection.genres.is_empty());
        assert_eq!(selection.week, None);
    }

    #[test]
    fn test_parse_percent_encoded_hangul() {
        let selection = Selection::from_query("genres=%EB%93%9C%EB%9D%BC%EB%A7%88").unwrap();
        assert_eq!(selection.genres, vec!["드라마"]);
    }

    #[test]
    fn test_parse_plus_as_space() {
        let selection = Selection::from_query("genres=sci+fi").unwrap();
        assert_eq!(selection.genres, vec!["sci fi"]);
    }

    #[test]
    fn test_unknown_platform_is_error() {
        let err = Selection::from_query("platforms=netflix,hulu").unwrap_err();
        assert_eq!(err, SelectionError::UnknownPlatform("hulu".to_string()));
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let err = Selection::from_query("genres=%FF").unwrap_err();
        assert!(matches!(err, SelectionError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_to_query_omits_unrestricted() {
        assert_eq!(Selection::default().to_query(), "");
        let selection = Selection::new(vec![], vec![], Some("2024-03".to_string()));
        assert_eq!(selection.to_query(), "week=2024-03");
    }

    #[test]
    fn test_query_roundtrip_with_special_characters() {
        let selection = Selection::new(
            vec![Platform::Disney, Platform::Netflix],
            vec!["로맨스, 코미디".to_string(), "SF&판타지".to_string()],
            Some("2024 W03".to_string()),
        );
        let parsed = Selection::from_query(&selection.to_query()).unwrap();
        assert_eq!(parsed, selection);
    }
}
