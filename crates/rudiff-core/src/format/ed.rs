//! Ed script output: `-e` (reverse order) and its `-f` forward variant.

use std::io::{self, Write};

use super::put_line_terminated;
use crate::script::Change;

/// Print an ed script, last change first, so earlier line numbers stay
/// valid while the script is applied.
pub fn print<W: Write>(out: &mut W, script: &[Change], b: &[&[u8]]) -> io::Result<()> {
    for change in script.iter().rev() {
        if change.del == 0 {
            writeln!(out, "{}a", range(change.a, change.del, ","))?;
            body(out, change, b)?;
        } else if change.ins == 0 {
            writeln!(out, "{}d", range(change.a, change.del, ","))?;
        } else {
            writeln!(out, "{}c", range(change.a, change.del, ","))?;
            body(out, change, b)?;
        }
    }
    Ok(())
}

/// Print the forward variant: first to last, command letter in front,
/// ranges separated by a space. Not valid ed input.
pub fn print_alt<W: Write>(out: &mut W, script: &[Change], b: &[&[u8]]) -> io::Result<()> {
    for change in script {
        if change.del == 0 {
            writeln!(out, "a{}", range(change.a, change.del, " "))?;
            body(out, change, b)?;
        } else if change.ins == 0 {
            writeln!(out, "d{}", range(change.a, change.del, " "))?;
        } else {
            writeln!(out, "c{}", range(change.a, change.del, " "))?;
            body(out, change, b)?;
        }
    }
    Ok(())
}

/// Inserted lines followed by the `.` terminator.
fn body<W: Write>(out: &mut W, change: &Change, b: &[&[u8]]) -> io::Result<()> {
    for pos in change.b..change.b + change.ins {
        put_line_terminated(out, b[pos])?;
    }
    out.write_all(b".\n")
}

/// A-side range: 1-based inclusive, empty ranges print the 0-based
/// pre-index, single lines collapse to one number.
fn range(start: usize, count: usize, sep: &str) -> String {
    if count == 0 {
        start.to_string()
    } else if count == 1 {
        (start + 1).to_string()
    } else {
        format!("{}{}{}", start + 1, sep, start + count)
    }
}
