//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type returned by fallible algebra operations.

use ariadne::{Color, Label, Report, ReportKind};
use std::{any::Any, fmt::{self, Debug, Display}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
///
/// This trait is usually derived with `cas_attrs::ErrorKind`.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns this error kind as [`Any`], so that callers can inspect the concrete kind.
    fn as_any(&self) -> &dyn Any;

    /// The message displayed at the top of the error.
    fn message(&self) -> String;

    /// Optional help text for the error, describing what the user can do to fix it.
    fn help(&self) -> Option<String> {
        None
    }
}

/// An error produced by an algebraic operation.
///
/// Operations either succeed with a complete result or fail with one of these; no partial result
/// is ever returned alongside an error.
#[derive(Debug)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: impl ErrorKind + 'static) -> Self {
        Self { kind: Box::new(kind) }
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns a reference to the kind of this error if it is `K`.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report for this error. The span points into the source identified by `src_id`,
    /// which is usually the printed form of the expression that caused the error.
    pub fn build_report<'a>(
        &self,
        src_id: &'a str,
        span: Range<usize>,
    ) -> Report<(&'a str, Range<usize>)> {
        let mut builder = Report::build(ReportKind::Error, src_id, span.start)
            .with_message(self.kind.message())
            .with_label(
                Label::new((src_id, span))
                    .with_color(EXPR)
                    .with_message("while operating on this expression"),
            );

        if let Some(help) = self.kind.help() {
            builder.set_help(help);
        }

        builder.finish()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

impl<K: ErrorKind + 'static> From<K> for Error {
    fn from(kind: K) -> Self {
        Self::new(kind)
    }
}
