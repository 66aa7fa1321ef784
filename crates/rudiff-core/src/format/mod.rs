//! Output formats for the edit script.
//!
//! Normal, ed, forward ed, context, and unified. All five consume the
//! canonical script together with the original (display) line sequences
//! and write bytes directly; nothing is decoded or re-encoded.

pub mod context;
pub mod ed;
pub mod normal;
pub mod unified;

use std::io::{self, Write};
use std::time::SystemTime;

use bstr::BString;
use chrono::{DateTime, Local, Utc};

use crate::script::Change;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// POSIX default output, one block per change.
    Normal,
    /// Ed script, changes in reverse order.
    Ed,
    /// Forward ed script: command letter first, space-separated ranges.
    AltEd,
    /// Copied context with the given radius.
    Context(usize),
    /// Unified context with the given radius.
    Unified(usize),
}

/// Display metadata for one side of a comparison. The label is a byte
/// string so non-UTF-8 paths survive into the headers.
#[derive(Debug, Clone)]
pub struct SideInfo {
    pub label: BString,
    pub mtime: SystemTime,
}

/// Emit the canonical script in the selected format.
#[allow(clippy::too_many_arguments)]
pub fn emit<W: Write>(
    out: &mut W,
    format: OutputFormat,
    script: &[Change],
    a: &[&[u8]],
    b: &[&[u8]],
    a_info: &SideInfo,
    b_info: &SideInfo,
    utc: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Normal => normal::print(out, script, a, b),
        OutputFormat::Ed => ed::print(out, script, b),
        OutputFormat::AltEd => ed::print_alt(out, script, b),
        OutputFormat::Context(radius) => {
            context::print(out, script, a, b, a_info, b_info, utc, radius)
        }
        OutputFormat::Unified(radius) => {
            unified::print(out, script, a, b, a_info, b_info, utc, radius)
        }
    }
}

/// Write one prefixed line. A line missing its terminator is closed with a
/// newline and followed by the "no newline" annotation.
fn put_line<W: Write>(out: &mut W, prefix: &[u8], line: &[u8]) -> io::Result<()> {
    out.write_all(prefix)?;
    out.write_all(line)?;
    if !line.ends_with(b"\n") {
        out.write_all(b"\n\\ No newline at end of file\n")?;
    }
    Ok(())
}

/// Write one line ensuring a terminator, without the annotation. Ed script
/// bodies must stay consumable by ed.
fn put_line_terminated<W: Write>(out: &mut W, line: &[u8]) -> io::Result<()> {
    out.write_all(line)?;
    if !line.ends_with(b"\n") {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// `Mon Jan _2 15:04:05 2006` stamp for context headers (two-character,
/// space-padded day field).
fn context_stamp(mtime: SystemTime, utc: bool) -> String {
    if utc {
        DateTime::<Utc>::from(mtime)
            .format("%a %b %e %H:%M:%S %Y")
            .to_string()
    } else {
        DateTime::<Local>::from(mtime)
            .format("%a %b %e %H:%M:%S %Y")
            .to_string()
    }
}

/// ISO stamp with nanoseconds and offset for unified headers.
fn unified_stamp(mtime: SystemTime, utc: bool) -> String {
    if utc {
        DateTime::<Utc>::from(mtime)
            .format("%Y-%m-%d %H:%M:%S%.9f %z")
            .to_string()
    } else {
        DateTime::<Local>::from(mtime)
            .format("%Y-%m-%d %H:%M:%S%.9f %z")
            .to_string()
    }
}
