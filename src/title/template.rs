//! Positional title templates.
//!
//! Templates use `{N}` slots that refer to the N-th flattened argument.
//! Literal braces are written as `{{` and `}}`.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use crate::arg::StepArg;
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while substituting arguments into a title template.
#[derive(Debug, Clone, Error, Diagnostic, PartialEq, Eq)]
pub enum TemplateError {
    /// A slot refers past the end of the argument list.
    #[error("template slot {{{index}}} has no matching argument ({available} supplied)")]
    #[diagnostic(code(stepscan::title::missing_argument))]
    MissingArgument {
        /// Slot index found in the template.
        index: usize,
        /// Number of flattened arguments supplied.
        available: usize,
    },
    /// The template contains an unbalanced brace or a non-numeric slot.
    #[error("malformed template at byte {position}: {reason}")]
    #[diagnostic(
        code(stepscan::title::malformed),
        help("slots take the form {{0}}; write literal braces as {{{{ and }}}}")
    )]
    Malformed {
        /// Byte offset of the offending brace.
        position: usize,
        /// What was wrong.
        reason: &'static str,
    },
}

/// Substitute `args` into `template`.
///
/// # Errors
///
/// Returns [`TemplateError`] when a slot is malformed or refers to a missing
/// argument.
///
/// # Examples
///
/// ```
/// use stepscan::{StepArg, title::format_template};
///
/// let alice = StepArg::from("alice");
/// let admin = StepArg::from("admin");
/// let title = format_template("the user {0} logs in as {1}", &[&alice, &admin])?;
/// assert_eq!(title, "the user alice logs in as admin");
/// # Ok::<(), stepscan::title::TemplateError>(())
/// ```
pub fn format_template(template: &str, args: &[&StepArg]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    while let Some((position, ch)) = chars.next() {
        match ch {
            '{' if chars.next_if(|&(_, next)| next == '{').is_some() => out.push('{'),
            '}' if chars.next_if(|&(_, next)| next == '}').is_some() => out.push('}'),
            '{' => {
                let mut digits = String::new();
                let mut closed = false;
                for (_, slot_ch) in chars.by_ref() {
                    if slot_ch == '}' {
                        closed = true;
                        break;
                    }
                    digits.push(slot_ch);
                }
                if !closed {
                    return Err(TemplateError::Malformed {
                        position,
                        reason: "unclosed slot",
                    });
                }
                let index: usize = digits.trim().parse().map_err(|_| TemplateError::Malformed {
                    position,
                    reason: "slot is not an argument index",
                })?;
                let arg = args.get(index).ok_or(TemplateError::MissingArgument {
                    index,
                    available: args.len(),
                })?;
                out.push_str(&arg.to_string());
            }
            '}' => {
                return Err(TemplateError::Malformed {
                    position,
                    reason: "unmatched closing brace",
                });
            }
            other => out.push(other),
        }
    }
    Ok(out)
}
