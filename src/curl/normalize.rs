const CURL_CMD: &str = "curl";

/// A standalone `\`, i.e. a shell line continuation once whitespace is collapsed.
const LINE_CONTINUATION: &str = "\\";

/// True when the command starts with a standalone, lowercase `curl` token.
pub fn is_curl(input: &str) -> bool {
    input
        .trim_start()
        .strip_prefix(CURL_CMD)
        .is_some_and(|rest| rest.chars().next().is_none_or(char::is_whitespace))
}

/// Drop every leading `curl` token together with the whitespace around it.
pub fn remove_curl_cmd_header(input: &str) -> &str {
    let mut input = input.trim_start();
    while is_curl(input) {
        input = input[CURL_CMD.len()..].trim_start();
    }
    input
}

/// Canonical single-line form of a curl command.
///
/// Every run of whitespace becomes one space, standalone `\` tokens (line
/// continuations) are dropped and leading `curl` tokens are removed. Never
/// fails: blank input gives an empty string, which the extractor rejects.
pub fn normalize(raw: &str) -> String {
    let collapsed = raw
        .split_whitespace()
        .filter(|token| *token != LINE_CONTINUATION)
        .collect::<Vec<_>>()
        .join(" ");
    remove_curl_cmd_header(&collapsed).to_string()
}
