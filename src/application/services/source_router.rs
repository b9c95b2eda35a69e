//! Trigger text to source routing.

use crate::domain::entities::Source;

/// Picks the source a trigger text belongs to.
pub struct SourceRouter;

impl SourceRouter {
    /// Picks the first source with a keyword matching the trigger text.
    ///
    /// A keyword matches when the trimmed text equals it or starts with it
    /// followed by a space. Blank keywords never match.
    pub fn route<'a>(sources: &'a [Source], text: &str) -> Option<&'a Source> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        sources.iter().find(|source| {
            source
                .keywords
                .iter()
                .map(|kw| kw.trim())
                .filter(|kw| !kw.is_empty())
                .any(|kw| {
                    text == kw
                        || text
                            .strip_prefix(kw)
                            .is_some_and(|rest| rest.starts_with(' '))
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sources() -> Vec<Source> {
        vec![
            Source::new(
                "cats",
                vec!["cat".to_string(), " ".to_string()],
                vec!["https://cats.test".to_string()],
            ),
            Source::new(
                "dogs",
                vec!["dog".to_string(), "puppy".to_string()],
                vec!["https://dogs.test".to_string()],
            ),
        ]
    }

    #[test_case("cat", Some("cats") ; "exact_keyword")]
    #[test_case("  dog  ", Some("dogs") ; "trimmed_text")]
    #[test_case("puppy please", Some("dogs") ; "keyword_with_argument")]
    #[test_case("category", None ; "prefix_without_space")]
    #[test_case("a cat", None ; "keyword_not_at_start")]
    #[test_case("", None ; "empty_text")]
    #[test_case(" ", None ; "blank_text")]
    fn test_route(text: &str, expected: Option<&str>) {
        let sources = sources();
        let routed = SourceRouter::route(&sources, text).map(Source::display_name);
        assert_eq!(routed, expected);
    }

    #[test]
    fn test_first_configured_source_wins() {
        let sources = vec![
            Source::new("first", vec!["pic".to_string()], vec![]),
            Source::new("second", vec!["pic".to_string()], vec![]),
        ];
        let routed = SourceRouter::route(&sources, "pic").map(Source::display_name);
        assert_eq!(routed, Some("first"));
    }
}
