//! Edit-script canonicalization.
//!
//! Two correct scripts for the same input pair can place a change group
//! anywhere within a run of equal lines. Each group is slid fully up and
//! then fully down across equal context, merging with neighboring groups
//! on the way, until a pass leaves the marks unchanged. Groups therefore
//! rest at the highest indices equality allows, and scripts from any
//! engine coincide wherever the slide direction determines placement.

use crate::script::{self, Change};

/// Canonicalize `raw` against the comparison sequences it was computed on.
pub fn slide(raw: &[Change], a: &[&[u8]], b: &[&[u8]]) -> Vec<Change> {
    let mut ad = vec![0i8; a.len()];
    let mut bd = vec![0i8; b.len()];
    for change in raw {
        ad[change.a..change.a + change.del].fill(-1);
        bd[change.b..change.b + change.ins].fill(1);
    }
    slide_marks(&mut ad, a);
    slide_marks(&mut bd, b);
    script::from_marks(&ad, &bd)
}

fn slide_marks(marks: &mut [i8], lines: &[&[u8]]) {
    loop {
        let before = marks.to_vec();
        one_pass(marks, lines);
        if marks[..] == before[..] {
            return;
        }
    }
}

/// Slide every maximal nonzero run once: up as far as equality allows,
/// then down as far as equality allows.
fn one_pass(marks: &mut [i8], lines: &[&[u8]]) {
    let mut start = 0;
    while start < marks.len() {
        if marks[start] == 0 {
            start += 1;
            continue;
        }
        let mut end = start + 1;
        while end < marks.len() && marks[end] != 0 {
            end += 1;
        }

        // Slide up: the last marked line equals the line above the run, so
        // the mark moves there; absorb any run this merges with.
        while start > 0 && lines[start - 1] == lines[end - 1] {
            marks[start - 1] = marks[end - 1];
            marks[end - 1] = 0;
            start -= 1;
            end -= 1;
            while start > 0 && marks[start - 1] != 0 {
                start -= 1;
            }
        }

        // Slide down: the first marked line equals the line below the run.
        while end < marks.len() && lines[start] == lines[end] {
            marks[end] = marks[start];
            marks[start] = 0;
            start += 1;
            end += 1;
            while end < marks.len() && marks[end] != 0 {
                end += 1;
            }
        }

        start = end;
    }
}
