use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{Props, Value};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("placeholder pattern is valid"));

/// Resolves a dotted key path against a mapping.
///
/// Each `.`-separated segment indexes into the current value. Mappings are indexed by key
/// and lists by decimal position; indexing anything else, or a missing key, yields `None`.
/// The walk never fails.
///
/// ```
/// use waypoint_value::{Value, lookup, props};
///
/// let data = props! {
///     "foo" => props! { "bar" => props! { "baz" => "Hello, world!" } },
/// };
/// assert_eq!(lookup(&data, "foo.bar.baz").and_then(Value::as_str), Some("Hello, world!"));
/// assert!(lookup(&data, "foo.missing.baz").is_none());
/// ```
#[must_use]
pub fn lookup<'a>(root: &'a Props, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    segments.try_fold(root.get(first)?, step)
}

/// Same as [`lookup`], starting from an arbitrary value.
#[must_use]
pub fn lookup_value<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, step)
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Map(map) => map.get(segment),
        Value::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Expands every `{{ key.path }}` placeholder in `template` using [`lookup`].
///
/// Whitespace around the key is ignored. Placeholders that resolve to nothing render as
/// `undefined`.
///
/// ```
/// use waypoint_value::{interpolate, props};
///
/// let animal = props! { "type" => props! { "name" => "dog" } };
/// assert_eq!(interpolate("Type of animal: {{ type.name }}", &animal), "Type of animal: dog");
/// ```
#[must_use]
pub fn interpolate(template: &str, data: &Props) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            lookup(data, caps[1].trim()).map_or_else(|| "undefined".to_owned(), ToString::to_string)
        })
        .into_owned()
}
