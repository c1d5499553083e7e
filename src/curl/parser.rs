use std::{collections::HashMap, ops::Range};

use log::trace;
use winnow::{
    LocatingSlice, ModalResult, Parser,
    combinator::{delimited, preceded, separated_pair},
    token::{rest, take_till, take_until},
};

type Input<'a> = LocatingSlice<&'a str>;

/// A single-quoted span found in the command text.
#[derive(Debug, PartialEq, Clone)]
pub struct QuotedSpan<'a> {
    /// Text between the quotes.
    pub content: &'a str,
    /// Byte range of the span in the searched text, quotes included.
    pub span: Range<usize>,
}

fn parse_single_quoted_data<'a>(s: &mut Input<'a>) -> ModalResult<&'a str> {
    delimited('\'', take_until(0.., '\''), '\'').parse_next(s)
}

fn parse_first_quoted_span<'a>(s: &mut Input<'a>) -> ModalResult<QuotedSpan<'a>> {
    preceded(
        take_till(0.., '\''),
        parse_single_quoted_data.with_span(),
    )
    .map(|(content, span)| QuotedSpan { content, span })
    .parse_next(s)
}

/// The leftmost complete `'...'` span, or `None` when the text has no pair of
/// single quotes. The content may be empty.
pub fn first_quoted_span(input: &str) -> Option<QuotedSpan<'_>> {
    let mut input = LocatingSlice::new(input);
    parse_first_quoted_span(&mut input).ok()
}

fn parse_cookie_pair<'a>(s: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    separated_pair(take_till(0.., '='), '=', rest).parse_next(s)
}

/// Merge the pairs of a `Cookie` header value into `jar`.
///
/// Pieces are separated by `;` and split on their first `=`. A piece without
/// `=` is skipped; a repeated name overwrites the earlier value.
pub fn parse_cookies_into(header_value: &str, jar: &mut HashMap<String, String>) {
    for piece in header_value.split(';') {
        let piece = piece.trim();
        let mut input = piece;
        match parse_cookie_pair(&mut input) {
            Ok((name, value)) => {
                trace!("cookie {name}={value}");
                jar.insert(name.to_string(), value.to_string());
            }
            Err(_) => trace!("skipping cookie piece without '=': {piece:?}"),
        }
    }
}

pub fn parse_cookies(header_value: &str) -> HashMap<String, String> {
    let mut jar = HashMap::new();
    parse_cookies_into(header_value, &mut jar);
    jar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::generic_parse;
    use rstest::*;

    fn jar(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[rstest]
    #[case(r#"'rakudo star' "#, "rakudo star")]
    #[case(r#"'rakulang "rocks"'"#, r#"rakulang "rocks""#)]
    #[case("''", "")]
    fn test_parse_single_quoted_data(#[case] input: &str, #[case] expected: &str) {
        let mut input = LocatingSlice::new(input);
        let single_quoted_data = parse_single_quoted_data(&mut input).unwrap();
        assert_eq!(single_quoted_data, expected)
    }

    #[rstest]
    #[case("'http://x.test/a'", Some(("http://x.test/a", 0..17)))]
    #[case("-X POST 'u' -H 'A: b'", Some(("u", 8..11)))]
    #[case("-H 'A: b' 'http://x.test'", Some(("A: b", 3..9)))]
    #[case("'' 'http://x.test'", Some(("", 0..2)))]
    #[case("http://x.test/a", None)]
    #[case("don't stop", None)]
    #[case("", None)]
    fn test_first_quoted_span(
        #[case] input: &str,
        #[case] expected: Option<(&str, Range<usize>)>,
    ) {
        let expected = expected.map(|(content, span)| QuotedSpan { content, span });
        generic_parse(first_quoted_span, input, expected);
    }

    #[rstest]
    #[case("a=1; b=2", &[("a", "1"), ("b", "2")])]
    #[case("a=1; b; c=3", &[("a", "1"), ("c", "3")])]
    #[case("token=abc=def", &[("token", "abc=def")])]
    #[case("  a=1 ;a=2;", &[("a", "2")])]
    #[case("=orphan; empty=", &[("", "orphan"), ("empty", "")])]
    #[case("", &[])]
    #[case("novalue", &[])]
    fn test_parse_cookies(#[case] input: &str, #[case] expected: &[(&str, &str)]) {
        assert_eq!(parse_cookies(input), jar(expected));
    }

    #[test]
    fn test_parse_cookies_into_merges() {
        let mut cookies = jar(&[("a", "old"), ("keep", "1")]);
        parse_cookies_into("a=new; b=2", &mut cookies);
        assert_eq!(cookies, jar(&[("a", "new"), ("keep", "1"), ("b", "2")]));
    }
}
