//! Copied-context output (`-c`, `-C n`).

use std::io::{self, Write};

use bstr::ByteSlice;

use super::{context_stamp, put_line, SideInfo};
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
    writeln!(out, "*** {}\t{}", a_info.label.as_bstr(), context_stamp(a_info.mtime, utc))?;
    writeln!(out, "--- {}\t{}", b_info.label.as_bstr(), context_stamp(b_info.mtime, utc))?;

    for hunk in hunk::build(script, a.len(), b.len(), radius) {
        let changes = &script[hunk.first..=hunk.last];
        out.write_all(b"***************\n")?;

        writeln!(out, "*** {} ****", range(hunk.a_start, hunk.a_count))?;
        if changes.iter().any(|c| c.del > 0) {
            let mut pos = hunk.a_start;
            for change in changes {
                while pos < change.a {
                    put_line(out, b"  ", a[pos])?;
                    pos += 1;
                }
                let prefix: &[u8] = if change.ins == 0 { b"- " } else { b"! " };
                while pos < change.a + change.del {
                    put_line(out, prefix, a[pos])?;
                    pos += 1;
                }
            }
            while pos < hunk.a_start + hunk.a_count {
                put_line(out, b"  ", a[pos])?;
                pos += 1;
            }
        }

        writeln!(out, "--- {} ----", range(hunk.b_start, hunk.b_count))?;
        if changes.iter().any(|c| c.ins > 0) {
            let mut pos = hunk.b_start;
            for change in changes {
                while pos < change.b {
                    put_line(out, b"  ", b[pos])?;
                    pos += 1;
                }
                let prefix: &[u8] = if change.del == 0 { b"+ " } else { b"! " };
                while pos < change.b + change.ins {
                    put_line(out, prefix, b[pos])?;
                    pos += 1;
                }
            }
            while pos < hunk.b_start + hunk.b_count {
                put_line(out, b"  ", b[pos])?;
                pos += 1;
            }
        }
    }
    Ok(())
}

/// 1-based inclusive range; an empty range prints the 0-based pre-index.
fn range(start: usize, count: usize) -> String {
    if count == 0 {
        start.to_string()
    } else if count == 1 {
        (start + 1).to_string()
    } else {
        format!("{},{}", start + 1, start + count)
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
        // Drop the two mtime header lines.
        text.splitn(3, '\n').nth(2).unwrap().to_string()
    }

    #[test]
    fn change_marks_both_sides_with_bang() {
        let a: Vec<&[u8]> = vec![b"1\n", b"2\n", b"3\n", b"4\n", b"5\n"];
        let b: Vec<&[u8]> = vec![b"1\n", b"2\n", b"3x\n", b"4\n", b"5\n"];
        let script = vec![Change { a: 2, del: 1, b: 2, ins: 1 }];
        assert_eq!(
            render(&script, &a, &b, 3),
            "***************\n\
             *** 1,5 ****\n  1\n  2\n! 3\n  4\n  5\n\
             --- 1,5 ----\n  1\n  2\n! 3x\n  4\n  5\n"
        );
    }

    #[test]
    fn pure_insert_omits_a_body() {
        let a: Vec<&[u8]> = vec![b"1\n", b"2\n"];
        let b: Vec<&[u8]> = vec![b"1\n", b"n\n", b"2\n"];
        let script = vec![Change { a: 1, del: 0, b: 1, ins: 1 }];
        assert_eq!(
            render(&script, &a, &b, 3),
            "***************\n\
             *** 1,2 ****\n\
             --- 1,3 ----\n  1\n+ n\n  2\n"
        );
    }

    #[test]
    fn pure_delete_omits_b_body() {
        let a: Vec<&[u8]> = vec![b"1\n", b"g\n", b"2\n"];
        let b: Vec<&[u8]> = vec![b"1\n", b"2\n"];
        let script = vec![Change { a: 1, del: 1, b: 1, ins: 0 }];
        assert_eq!(
            render(&script, &a, &b, 3),
            "***************\n\
             *** 1,3 ****\n  1\n- g\n  2\n\
             --- 1,2 ----\n"
        );
    }

    #[test]
    fn empty_a_range_prints_zero() {
        let a: Vec<&[u8]> = vec![];
        let b: Vec<&[u8]> = vec![b"n\n"];
        let script = vec![Change { a: 0, del: 0, b: 0, ins: 1 }];
        assert_eq!(
            render(&script, &a, &b, 3),
            "***************\n\
             *** 0 ****\n\
             --- 1 ----\n+ n\n"
        );
    }

    #[test]
    fn two_changes_in_one_hunk_interleave_context() {
        let a: Vec<&[u8]> = vec![b"1\n", b"x\n", b"3\n", b"y\n", b"5\n"];
        let b: Vec<&[u8]> = vec![b"1\n", b"X\n", b"3\n", b"Y\n", b"5\n"];
        let script = vec![
            Change { a: 1, del: 1, b: 1, ins: 1 },
            Change { a: 3, del: 1, b: 3, ins: 1 },
        ];
        assert_eq!(
            render(&script, &a, &b, 1),
            "***************\n\
             *** 1,5 ****\n  1\n! x\n  3\n! y\n  5\n\
             --- 1,5 ----\n  1\n! X\n  3\n! Y\n  5\n"
        );
    }
}
