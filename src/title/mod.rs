//! Human-readable step titles.
//!
//! Titles come from one of two places. Self-reporting methods supply their
//! own (resolved by the scanner); every other step derives its title from
//! the method name. Name-derived titles are humanised, cleaned up so
//! `AndGiven`/`AndWhen` read as plain "and" steps, and then combined with
//! the parameter set: either substituted into its template or appended as a
//! flat, comma-separated list.
//!
//! ```
//! use stepscan::{ParameterSet, step_args, title};
//!
//! assert_eq!(title::from_method_name("GivenAUser"), "Given a user");
//! let set = ParameterSet::new(step_args![100, "USD"]);
//! assert_eq!(
//!     title::from_method_name_with("GivenAccountBalance", Some(&set))?,
//!     "Given account balance 100, USD"
//! );
//! # Ok::<(), stepscan::title::TemplateError>(())
//! ```

mod template;

pub use template::{TemplateError, format_template};

use crate::arg::{flatten, join_flattened};
use crate::method::ParameterSet;
use itertools::Itertools;

const AND: &str = "and ";
const PRONOUN: &str = "I";
const COLLAPSED_PREFIXES: [&str; 2] = ["and given ", "and when "];

/// Convert an identifier into space-separated words.
///
/// Names containing underscores are split on them with casing preserved.
/// Otherwise words start at lower-to-upper transitions, before the last
/// capital of an acronym run, and around digit runs. The first word keeps
/// its casing, acronyms and the pronoun "I" stay upper case, and every
/// other word is lowered.
#[must_use]
pub fn humanize(name: &str) -> String {
    if name.contains('_') {
        return name.split('_').filter(|word| !word.is_empty()).join(" ");
    }

    split_words(name)
        .into_iter()
        .enumerate()
        .map(|(index, word)| {
            if index == 0 || word == PRONOUN || is_acronym(&word) {
                word
            } else {
                word.to_lowercase()
            }
        })
        .join(" ")
}

fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (index, &ch) in chars.iter().enumerate() {
        let previous = index.checked_sub(1).and_then(|prev| chars.get(prev)).copied();
        let next = chars.get(index + 1).copied();
        if previous.is_some_and(|prev| starts_word(prev, ch, next)) && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn starts_word(previous: char, ch: char, next: Option<char>) -> bool {
    let lower_to_upper = ch.is_uppercase() && !previous.is_uppercase();
    let acronym_end =
        ch.is_uppercase() && previous.is_uppercase() && next.is_some_and(char::is_lowercase);
    let digit_edge = ch.is_ascii_digit() != previous.is_ascii_digit();
    lower_to_upper || acronym_end || digit_edge
}

fn is_acronym(word: &str) -> bool {
    word.chars().count() > 1 && word.chars().all(|ch| ch.is_uppercase() || ch.is_ascii_digit())
}

/// Collapse `and given ` and `and when ` prefixes to `and `.
///
/// The comparison ignores ASCII case; the original spelling of "and" is
/// kept.
#[must_use]
pub fn cleanup(text: &str) -> String {
    for prefix in COLLAPSED_PREFIXES {
        let matched = text
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        if matched {
            let kept = text.get(..AND.len()).unwrap_or_default();
            let rest = text.get(prefix.len()..).unwrap_or_default();
            return format!("{kept}{rest}");
        }
    }
    text.to_owned()
}

/// Derive a title from a method name alone.
#[must_use]
pub fn from_method_name(name: &str) -> String {
    cleanup(&humanize(name))
}

/// Derive a title from a method name and an optional parameter set.
///
/// # Errors
///
/// Returns [`TemplateError`] when the set's template cannot be filled.
pub fn from_method_name_with(
    name: &str,
    set: Option<&ParameterSet>,
) -> Result<String, TemplateError> {
    set.map_or_else(
        || Ok(from_method_name(name)),
        |parameters| {
            parameters.template().map_or_else(
                || {
                    let base = from_method_name(name);
                    Ok(format!("{base} {}", join_flattened(parameters.args())))
                },
                |template| format_template(template, &flatten(parameters.args())),
            )
        },
    )
}
