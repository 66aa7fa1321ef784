//! Canonical comparison sequences for -b and -i.
//!
//! The returned sequence is index-parallel to the input and used only for
//! equality testing; the original lines are kept for display. When no
//! transform is active the canonical sequence borrows the originals.

use std::borrow::Cow;

use crate::DiffOptions;

/// Build the comparison sequence for one side.
pub fn canonicalize<'a>(lines: &[&'a [u8]], opts: &DiffOptions) -> Vec<Cow<'a, [u8]>> {
    if !opts.ignore_space_change && !opts.ignore_case {
        return lines.iter().map(|line| Cow::Borrowed(*line)).collect();
    }
    lines
        .iter()
        .map(|line| Cow::Owned(canon_line(line, opts)))
        .collect()
}

fn canon_line(line: &[u8], opts: &DiffOptions) -> Vec<u8> {
    let mut out = if opts.ignore_space_change {
        squeeze_blanks(line)
    } else {
        line.to_vec()
    };
    if opts.ignore_case {
        out.make_ascii_lowercase();
    }
    out
}

/// Collapse each run of blanks into one space and replace a trailing blank
/// run (up to and including the terminator) with a single newline.
fn squeeze_blanks(line: &[u8]) -> Vec<u8> {
    let (content, had_newline) = match line.split_last() {
        Some((b'\n', rest)) => (rest, true),
        _ => (line, false),
    };
    let trimmed_len = content
        .iter()
        .rposition(|&byte| !is_blank(byte))
        .map_or(0, |pos| pos + 1);
    let had_trailing_blanks = trimmed_len != content.len();

    let mut out = Vec::with_capacity(line.len());
    let mut in_run = false;
    for &byte in &content[..trimmed_len] {
        if is_blank(byte) {
            if !in_run {
                out.push(b' ');
            }
            in_run = true;
        } else {
            out.push(byte);
            in_run = false;
        }
    }
    if had_newline || had_trailing_blanks {
        out.push(b'\n');
    }
    out
}

fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r')
}
