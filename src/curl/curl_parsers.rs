use std::collections::HashMap;

use log::{debug, trace};
use nom::{
    IResult,
    bytes::complete::{is_not, tag, take_till1, take_while1},
    character::complete::{char, multispace0, multispace1},
    error::{Error, context},
    sequence::{delimited, preceded, separated_pair, tuple},
};

use crate::{
    curl::{
        Request,
        normalize::normalize,
        parser::{first_quoted_span, parse_cookies_into},
    },
    error::{self, Result},
};

pub const DEFAULT_METHOD: &str = "GET";

const METHOD_FLAG: &str = "-X";
const METHOD_LONG_FLAG: &str = "--request";
const HEADER_FLAG: &str = "-H";
const DATA_FLAG: &str = "--data";

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Non-empty data between single quotes.
fn single_quoted_data_parse(input: &str) -> IResult<&str, &str> {
    context(
        "Single quoted data parse",
        delimited(char('\''), is_not("'"), char('\'')),
    )(input)
}

/// Header value: leading whitespace is dropped unless the value is nothing
/// but whitespace, in which case its last character is the value.
fn header_value_parse(input: &str) -> IResult<&str, &str> {
    let (rest, spaces) = multispace0::<_, Error<&str>>(input)?;
    match is_not::<_, _, Error<&str>>("'")(rest) {
        Ok(parsed) => Ok(parsed),
        Err(e) => match spaces.char_indices().last() {
            Some((idx, _)) => Ok((rest, &spaces[idx..])),
            None => Err(e),
        },
    }
}

/// `-X <word>`
pub fn method_parse(input: &str) -> IResult<&str, &str> {
    context(
        "method parse",
        preceded(tuple((tag(METHOD_FLAG), multispace1)), take_while1(is_word_char)),
    )(input)
}

/// `-H '<name>: <value>'`
pub fn header_parse(input: &str) -> IResult<&str, (&str, &str)> {
    context(
        "header parse",
        preceded(
            tuple((tag(HEADER_FLAG), multispace1)),
            delimited(
                char('\''),
                separated_pair(take_till1(|c: char| c == ':'), char(':'), header_value_parse),
                char('\''),
            ),
        ),
    )(input)
}

/// `--data '<body>'`
pub fn data_parse(input: &str) -> IResult<&str, &str> {
    context(
        "data parse",
        preceded(tuple((tag(DATA_FLAG), multispace1)), single_quoted_data_parse),
    )(input)
}

/// Try `parser` at each occurrence of `flag` from byte `pos` on. Returns the
/// end offset of the first match together with its output.
fn next_match<'a, O, F>(input: &'a str, mut pos: usize, flag: &str, parser: &mut F) -> Option<(usize, O)>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    while let Some(offset) = input[pos..].find(flag) {
        let start = pos + offset;
        match parser(&input[start..]) {
            Ok((rest, out)) => return Some((input.len() - rest.len(), out)),
            Err(_) => pos = start + flag.len(),
        }
    }
    None
}

/// Leftmost match of `parser` anchored at `flag`.
pub fn scan_first<'a, O, F>(input: &'a str, flag: &str, mut parser: F) -> Option<O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    next_match(input, 0, flag, &mut parser).map(|(_, out)| out)
}

/// Every non-overlapping match of `parser` anchored at `flag`, left to right.
pub fn scan_all<'a, O, F>(input: &'a str, flag: &str, mut parser: F) -> Vec<O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some((end, out)) = next_match(input, pos, flag, &mut parser) {
        found.push(out);
        pos = end;
    }
    found
}

fn extract_url(input: &str) -> Result<String> {
    match first_quoted_span(input) {
        Some(quoted) if !quoted.content.is_empty() => {
            debug!("url taken from quoted span at {:?}", quoted.span);
            Ok(quoted.content.to_string())
        }
        _ => Err(error::Error::UrlNotFound),
    }
}

fn extract_method(input: &str) -> String {
    if input.contains(METHOD_FLAG) || input.contains(METHOD_LONG_FLAG) {
        if let Some(method) = scan_first(input, METHOD_FLAG, method_parse) {
            return method.to_string();
        }
    }
    DEFAULT_METHOD.to_string()
}

fn extract_headers(input: &str) -> (HashMap<String, String>, HashMap<String, String>) {
    let mut headers = HashMap::new();
    let mut cookies = HashMap::new();
    for (name, value) in scan_all(input, HEADER_FLAG, header_parse) {
        if name.eq_ignore_ascii_case("cookie") {
            parse_cookies_into(value, &mut cookies);
        } else {
            trace!("header {name}: {value}");
            headers.insert(name.to_string(), value.to_string());
        }
    }
    (headers, cookies)
}

/// Build a [`Request`] out of a normalized command.
///
/// The url is the first single-quoted span, whatever flag it belongs to.
/// Method, headers, cookies and body are optional.
pub fn extract(normalized: &str) -> Result<Request> {
    if normalized.trim().is_empty() {
        return Err(error::Error::EmptyCommand);
    }

    let url = extract_url(normalized)?;
    let method = extract_method(normalized);
    let (headers, cookies) = extract_headers(normalized);
    let body = scan_first(normalized, DATA_FLAG, data_parse)
        .unwrap_or_default()
        .to_string();

    Ok(Request {
        method,
        url,
        headers,
        cookies,
        body,
    })
}

/// Normalize and extract in one go.
pub fn curl_cmd_parse(input: &str) -> Result<Request> {
    let normalized = normalize(input);
    debug!("normalized curl command: {normalized}");
    extract(&normalized)
}
