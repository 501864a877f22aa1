use std::error::Error;
use std::io::{self, Write};

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::WriteColor;
use kalkc::CompileError;
use kalkspan::{Span, Spand};

use crate::cli::Format;
use crate::editor::PROMPT;

/// A located error that can be shown against the line it came from.
pub trait Report {
    fn span(&self) -> Span;

    fn message(&self) -> String;

    fn diagnose(&self) -> Diagnostic<()> {
        Diagnostic::error()
            .with_message(self.message())
            .with_label(Label::primary((), self.span()))
    }

    fn report(&self, writer: &mut dyn WriteColor, input: &str, format: Format) -> io::Result<()> {
        match format {
            Format::Caret => {
                let lexeme = self.span().slice(input).unwrap_or_default();
                print_error(writer, input, lexeme, &self.message())
            }
            Format::Rich => {
                let file = SimpleFile::new("<stdin>", input);
                let config = term::Config::default();
                term::emit(writer, &config, &file, &self.diagnose()).map_err(io::Error::other)
            }
        }
    }
}

impl<T: Error> Report for Spand<T> {
    fn span(&self) -> Span {
        self.span
    }

    fn message(&self) -> String {
        self.kind().to_string()
    }
}

impl Report for CompileError {
    fn span(&self) -> Span {
        match self {
            Self::Lex(err) => err.span,
            Self::Parse(err) => err.span,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Lex(err) => err.message(),
            Self::Parse(err) => err.message(),
        }
    }
}

/// Writes the caret diagnostic for `lexeme`, a view borrowed from `input`.
///
/// ```text
///   ^~ error occurred here
///     reason: integer literal out of bounds
/// ```
///
/// The indent is the prompt width plus the byte offset of the lexeme. Empty
/// lexemes, and views that do not point into `input`, print only `error` and
/// the reason.
pub fn print_error<W: Write + ?Sized>(
    out: &mut W,
    input: &str,
    lexeme: &str,
    message: &str,
) -> io::Result<()> {
    let Some(span) = Span::of(lexeme, input).filter(|span| !span.is_empty()) else {
        return write!(out, "error\nreason: {message}\n");
    };

    let begin = span.lo() as usize + PROMPT.len();
    let end = span.hi() as usize + PROMPT.len();
    writeln!(
        out,
        "{:begin$}^{} error occurred here",
        "",
        "~".repeat(span.len() as usize - 1)
    )?;
    writeln!(out, "{:end$}reason: {message}", "")
}
