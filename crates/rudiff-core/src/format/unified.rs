//! Unified output (`-u`, `-U n`).

use std::io::{self, Write};

use bstr::ByteSlice;

use super::{put_line, unified_stamp, SideInfo};
use crate::hunk;
use crate::script::Change;

#[allow(clippy::too_many_arguments)]
pub fn print<W: Write>(
    out: &mut W,
    script: &[Change],
    a: &[&[u8]],
    b: &[&[u8]],
    a_info: &SideInfo,
    b_info: &SideInfo,
    utc: bool,
    radius: usize,
) -> io::Result<()> {
    writeln!(out, "--- {}\t{}", a_info.label.as_bstr(), unified_stamp(a_info.mtime, utc))?;
    writeln!(out, "+++ {}\t{}", b_info.label.as_bstr(), unified_stamp(b_info.mtime, utc))?;

    for hunk in hunk::build(script, a.len(), b.len(), radius) {
        writeln!(
            out,
            "@@ -{} +{} @@",
            range(hunk.a_start, hunk.a_count),
            range(hunk.b_start, hunk.b_count)
        )?;
        let mut pos = hunk.a_start;
        for change in &script[hunk.first..=hunk.last] {
            while pos < change.a {
                put_line(out, b" ", a[pos])?;
                pos += 1;
            }
            while pos < change.a + change.del {
                put_line(out, b"-", a[pos])?;
                pos += 1;
            }
            for bpos in change.b..change.b + change.ins {
                put_line(out, b"+", b[bpos])?;
            }
        }
        while pos < hunk.a_start + hunk.a_count {
            put_line(out, b" ", a[pos])?;
            pos += 1;
        }
    }
    Ok(())
}

/// Unified range: `0,0` only when both start and count are zero, a single
/// line collapses to the 1-based start, otherwise `start,count`.
fn range(start: usize, count: usize) -> String {
    if start == 0 && count == 0 {
        "0,0".to_string()
    } else if count == 1 {
        (start + 1).to_string()
    } else {
        format!("{},{}", start + 1, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn render(script: &[Change], a: &[&[u8]], b: &[&[u8]], radius: usize) -> String {
        let info = SideInfo {
            label: "f".into(),
            mtime: SystemTime::UNIX_EPOCH,
        };
        let mut out = Vec::new();
        print(&mut out, script, a, b, &info, &info, true, radius).unwrap();
        let text = String::from_utf8(out).unwrap();
        text.splitn(3, '\n').nth(2).unwrap().to_string()
    }

    #[test]
    fn interleaved_hunk_body() {
        let a: Vec<&[u8]> = vec![b"1\n", b"2\n", b"3\n", b"4\n", b"5\n"];
        let b: Vec<&[u8]> = vec![b"1\n", b"2\n", b"3x\n", b"4\n", b"5\n"];
        let script = vec![Change { a: 2, del: 1, b: 2, ins: 1 }];
        assert_eq!(
            render(&script, &a, &b, 3),
            "@@ -1,5 +1,5 @@\n 1\n 2\n-3\n+3x\n 4\n 5\n"
        );
    }

    #[test]
    fn single_line_range_prints_start_only() {
        let a: Vec<&[u8]> = vec![b"old\n"];
        let b: Vec<&[u8]> = vec![b"new\n"];
        let script = vec![Change { a: 0, del: 1, b: 0, ins: 1 }];
        assert_eq!(render(&script, &a, &b, 3), "@@ -1 +1 @@\n-old\n+new\n");
    }

    #[test]
    fn empty_file_range_is_zero_zero() {
        let a: Vec<&[u8]> = vec![];
        let b: Vec<&[u8]> = vec![b"n\n"];
        let script = vec![Change { a: 0, del: 0, b: 0, ins: 1 }];
        assert_eq!(render(&script, &a, &b, 3), "@@ -0,0 +1 @@\n+n\n");
    }

    #[test]
    fn empty_range_past_start_keeps_position() {
        // Insertion with zero context: the A range is empty but anchored
        // after line 2, rendered as 3,0.
        let a: Vec<&[u8]> = vec![b"1\n", b"2\n", b"3\n"];
        let b: Vec<&[u8]> = vec![b"1\n", b"2\n", b"n\n", b"3\n"];
        let script = vec![Change { a: 2, del: 0, b: 2, ins: 1 }];
        assert_eq!(render(&script, &a, &b, 0), "@@ -3,0 +3 @@\n+n\n");
    }

    #[test]
    fn two_hunks_with_distant_changes() {
        let a: Vec<&[u8]> = vec![
            b"1\n", b"2\n", b"3\n", b"4\n", b"5\n", b"6\n", b"7\n", b"8\n", b"9\n", b"10\n",
        ];
        let b: Vec<&[u8]> = vec![
            b"1x\n", b"2\n", b"3\n", b"4\n", b"5\n", b"6\n", b"7\n", b"8\n", b"9\n", b"10x\n",
        ];
        let script = vec![
            Change { a: 0, del: 1, b: 0, ins: 1 },
            Change { a: 9, del: 1, b: 9, ins: 1 },
        ];
        assert_eq!(
            render(&script, &a, &b, 1),
            "@@ -1,2 +1,2 @@\n-1\n+1x\n 2\n\
             @@ -9,2 +9,2 @@\n 9\n-10\n+10x\n"
        );
    }

    #[test]
    fn context_line_missing_newline_is_annotated() {
        let a: Vec<&[u8]> = vec![b"a\n", b"tail"];
        let b: Vec<&[u8]> = vec![b"b\n", b"tail"];
        let script = vec![Change { a: 0, del: 1, b: 0, ins: 1 }];
        assert_eq!(
            render(&script, &a, &b, 3),
            "@@ -1,2 +1,2 @@\n-a\n+b\n tail\n\\ No newline at end of file\n"
        );
    }
}
