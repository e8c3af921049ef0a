use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use std::cmp::Ordering;

/// Orders titles the way a Korean-locale reader expects.
///
/// Falls back to code point order if the collation data cannot be loaded.
/// Strings the collator considers equal are further ordered by code point so
/// distinct titles never compare `Equal`.
pub struct TitleOrder {
    collator: Option<Collator>,
}

impl TitleOrder {
    pub fn korean() -> Self {
        let collator = match Collator::try_new(&locale!("ko").into(), CollatorOptions::new()) {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!(error = %e, "Korean collation unavailable, using code point order");
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => Ordering::Equal,
        };
        primary.then_with(|| a.cmp(b))
    }
}

impl Default for TitleOrder {
    fn default() -> Self {
        Self::korean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(titles: &[&str]) -> Vec<String> {
        let order = TitleOrder::korean();
        let mut v: Vec<String> = titles.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| order.compare(a, b));
        v
    }

    #[test]
    fn test_hangul_dictionary_order() {
        assert_eq!(sorted(&["하루", "나의 아저씨", "가면", "다시"]), vec!["가면", "나의 아저씨", "다시", "하루"]);
    }

    #[test]
    fn test_latin_is_case_insensitive_at_primary_level() {
        // Plain byte order would put "Banana" before "apple"
        assert_eq!(sorted(&["Banana", "apple"]), vec!["apple", "Banana"]);
    }

    #[test]
    fn test_distinct_titles_never_equal() {
        let order = TitleOrder::korean();
        assert_ne!(order.compare("a", "A"), Ordering::Equal);
        assert_eq!(order.compare("같은", "같은"), Ordering::Equal);
    }
}
