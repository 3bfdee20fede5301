//! Dynamically typed step arguments.
//!
//! Scenario methods receive their arguments as a slice of [`StepArg`]
//! values. Arguments may nest: a [`StepArg::List`] groups several values that
//! titles render as a flat, comma-separated list.
//!
//! ```
//! use stepscan::{StepArg, step_args};
//!
//! let args = step_args![step_args!["a", "b"], "c"];
//! assert_eq!(stepscan::arg::join_flattened(&args), "a, b, c");
//! assert_eq!(args.get(1).and_then(StepArg::as_str), Some("c"));
//! ```

use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

/// A single argument value passed to a scenario method.
#[derive(Debug, Clone, PartialEq)]
pub enum StepArg {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A text value.
    Text(String),
    /// A nested group of arguments, flattened when rendered in titles.
    List(Vec<Self>),
}

impl StepArg {
    /// Borrow the value as text when it is [`StepArg::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Return the value when it is [`StepArg::Int`].
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Return the value when it is numeric, widening integers.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "integers are widened for convenience; precision loss beyond 2^53 is accepted"
    )]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Return the value when it is [`StepArg::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrow the nested values when this is a [`StepArg::List`].
    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl Display for StepArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::List(items) => write!(f, "{}", items.iter().join(", ")),
        }
    }
}

macro_rules! impl_from {
    ($($source:ty => $variant:ident via $conv:expr),* $(,)?) => {
        $(
            impl From<$source> for StepArg {
                fn from(value: $source) -> Self {
                    Self::$variant($conv(value))
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool via std::convert::identity,
    i64 => Int via std::convert::identity,
    i32 => Int via i64::from,
    u32 => Int via i64::from,
    f64 => Float via std::convert::identity,
    String => Text via std::convert::identity,
    &str => Text via str::to_owned,
    Vec<StepArg> => List via std::convert::identity,
}

/// Build a `Vec<StepArg>` from heterogeneous values.
///
/// Each element is converted with [`StepArg::from`], so nested invocations
/// produce [`StepArg::List`] groups.
#[macro_export]
macro_rules! step_args {
    () => {
        ::std::vec::Vec::<$crate::StepArg>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::StepArg::from($value)),+]
    };
}

/// Expand nested argument lists into their elements, preserving order.
#[must_use]
pub fn flatten(args: &[StepArg]) -> Vec<&StepArg> {
    let mut flat = Vec::with_capacity(args.len());
    push_flattened(args, &mut flat);
    flat
}

fn push_flattened<'a>(args: &'a [StepArg], flat: &mut Vec<&'a StepArg>) {
    for arg in args {
        match arg {
            StepArg::List(items) => push_flattened(items, flat),
            other => flat.push(other),
        }
    }
}

/// Render flattened arguments as a comma-separated list.
#[must_use]
pub fn join_flattened(args: &[StepArg]) -> String {
    flatten(args).into_iter().join(", ")
}
