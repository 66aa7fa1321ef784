//! Normal (POSIX default) output.

use std::io::{self, Write};

use super::put_line;
use crate::script::Change;

/// Print one `a`/`d`/`c` block per change.
pub fn print<W: Write>(
    out: &mut W,
    script: &[Change],
    a: &[&[u8]],
    b: &[&[u8]],
) -> io::Result<()> {
    for change in script {
        if change.del == 0 {
            writeln!(
                out,
                "{}a{}",
                range(change.a, change.del),
                range(change.b, change.ins)
            )?;
            for pos in change.b..change.b + change.ins {
                put_line(out, b"> ", b[pos])?;
            }
        } else if change.ins == 0 {
            writeln!(
                out,
                "{}d{}",
                range(change.a, change.del),
                range(change.b, change.ins)
            )?;
            for pos in change.a..change.a + change.del {
                put_line(out, b"< ", a[pos])?;
            }
        } else {
            writeln!(
                out,
                "{}c{}",
                range(change.a, change.del),
                range(change.b, change.ins)
            )?;
            for pos in change.a..change.a + change.del {
                put_line(out, b"< ", a[pos])?;
            }
            out.write_all(b"---\n")?;
            for pos in change.b..change.b + change.ins {
                put_line(out, b"> ", b[pos])?;
            }
        }
    }
    Ok(())
}

/// 1-based inclusive range. An empty range prints the 0-based pre-index,
/// a single line collapses to one number.
fn range(start: usize, count: usize) -> String {
    if count == 0 {
        start.to_string()
    } else if count == 1 {
        (start + 1).to_string()
    } else {
        format!("{},{}", start + 1, start + count)
    }
}
