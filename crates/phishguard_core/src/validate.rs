use once_cell::sync::Lazy;
use regex::Regex;

/// Syntactic URL shape: optional http(s) scheme, then either a dotted
/// hostname with a final label of at least two letters or a dotted-quad
/// address (digit groups are not range-checked), then optional port, path,
/// query and fragment.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(https?://)?((([a-z\d]([a-z\d-]*[a-z\d])*)\.)+[a-z]{2,}|((\d{1,3}\.){3}\d{1,3}))(:\d+)?(/[-a-z\d%_.~+]*)*(\?[;&a-z\d%_.~+=-]*)?(#[-a-z\d_]*)?$",
    )
    .expect("url pattern compiles")
});

/// Checks whether a string is syntactically a plausible URL.
///
/// Purely syntactic: no DNS lookup, no reachability check. Callers must
/// reject blank input themselves before asking.
pub fn is_valid_url(candidate: &str) -> bool {
    URL_PATTERN.is_match(candidate)
}
