//! Patience diff.
//!
//! Finds the longest common subsequence over lines that occur exactly once
//! on both sides, using patience sorting for the longest increasing
//! subsequence, then recurses on the gaps between the matched anchors.
//! Windows without unique common lines fall back to Myers.

use std::collections::HashMap;

use super::myers;
use crate::script::Change;

/// A matched unique line. `prev` is an index into the record arena, linking
/// back through the piles; the arena is dropped after LCS recovery.
struct Record {
    aline: usize,
    bline: usize,
    prev: Option<usize>,
}

/// Compute an edit script transforming `a` into `b`.
pub fn diff(a: &[&[u8]], b: &[&[u8]]) -> Vec<Change> {
    let mut script = Vec::new();
    recurse(a, 0, a.len(), b, 0, b.len(), &mut script);
    script
}

fn recurse(
    a: &[&[u8]],
    mut astart: usize,
    mut aend: usize,
    b: &[&[u8]],
    mut bstart: usize,
    mut bend: usize,
    script: &mut Vec<Change>,
) {
    while astart < aend && bstart < bend && a[astart] == b[bstart] {
        astart += 1;
        bstart += 1;
    }
    while astart < aend && bstart < bend && a[aend - 1] == b[bend - 1] {
        aend -= 1;
        bend -= 1;
    }
    if astart == aend && bstart == bend {
        return;
    }
    if astart == aend || bstart == bend {
        script.push(Change {
            a: astart,
            del: aend - astart,
            b: bstart,
            ins: bend - bstart,
        });
        return;
    }

    let mut records = unique_common(a, astart, aend, b, bstart, bend);
    if records.is_empty() {
        fallback(a, astart, aend, b, bstart, bend, script);
        return;
    }
    for (aline, bline) in lcs(&mut records) {
        recurse(a, astart, aline, b, bstart, bline, script);
        astart = aline + 1;
        bstart = bline + 1;
    }
    if astart < aend || bstart < bend {
        recurse(a, astart, aend, b, bstart, bend, script);
    }
}

fn fallback(
    a: &[&[u8]],
    astart: usize,
    aend: usize,
    b: &[&[u8]],
    bstart: usize,
    bend: usize,
    script: &mut Vec<Change>,
) {
    for mut change in myers::diff(&a[astart..aend], &b[bstart..bend]) {
        change.a += astart;
        change.b += bstart;
        script.push(change);
    }
}

/// Lines occurring exactly once in both windows, matched by content and
/// sorted by A position.
fn unique_common<'a>(
    a: &[&'a [u8]],
    astart: usize,
    aend: usize,
    b: &[&[u8]],
    bstart: usize,
    bend: usize,
) -> Vec<Record> {
    struct Occurrence {
        aline: usize,
        acount: usize,
        bline: usize,
        bcount: usize,
    }

    let mut seen: HashMap<&'a [u8], Occurrence> = HashMap::new();
    for pos in astart..aend {
        let entry = seen.entry(a[pos]).or_insert(Occurrence {
            aline: pos,
            acount: 0,
            bline: 0,
            bcount: 0,
        });
        entry.acount += 1;
    }
    for pos in bstart..bend {
        if let Some(entry) = seen.get_mut(b[pos]) {
            if entry.acount == 1 {
                entry.bline = pos;
                entry.bcount += 1;
            }
        }
    }

    let mut records: Vec<Record> = seen
        .values()
        .filter(|occ| occ.acount == 1 && occ.bcount == 1)
        .map(|occ| Record {
            aline: occ.aline,
            bline: occ.bline,
            prev: None,
        })
        .collect();
    records.sort_by_key(|r| r.aline);
    records
}

/// Longest increasing subsequence by `bline` via patience sorting.
///
/// Each pile keeps only its top record (an arena index); placing a record
/// links it to the top of the previous pile, and the subsequence is read
/// back from the top of the last pile.
fn lcs(records: &mut [Record]) -> Vec<(usize, usize)> {
    let mut piles: Vec<usize> = Vec::new();
    for idx in 0..records.len() {
        let bline = records[idx].bline;
        let pile = piles.partition_point(|&top| records[top].bline < bline);
        if pile > 0 {
            records[idx].prev = Some(piles[pile - 1]);
        }
        if pile == piles.len() {
            piles.push(idx);
        } else {
            piles[pile] = idx;
        }
    }

    let mut anchors = Vec::with_capacity(piles.len());
    let mut cursor = piles.last().copied();
    while let Some(idx) = cursor {
        anchors.push((records[idx].aline, records[idx].bline));
        cursor = records[idx].prev;
    }
    anchors.reverse();
    anchors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical() {
        let a: Vec<&[u8]> = vec![b"a\n", b"b\n", b"c\n"];
        assert!(diff(&a, &a).is_empty());
    }

    #[test]
    fn simple_insert() {
        let a: Vec<&[u8]> = vec![b"a\n", b"c\n"];
        let b: Vec<&[u8]> = vec![b"a\n", b"b\n", b"c\n"];
        assert_eq!(diff(&a, &b), vec![Change { a: 1, del: 0, b: 1, ins: 1 }]);
    }

    #[test]
    fn one_side_empty_is_single_replace() {
        let a: Vec<&[u8]> = vec![b"a\n", b"b\n"];
        let empty: Vec<&[u8]> = vec![];
        assert_eq!(diff(&a, &empty), vec![Change { a: 0, del: 2, b: 0, ins: 0 }]);
        assert_eq!(diff(&empty, &a), vec![Change { a: 0, del: 0, b: 0, ins: 2 }]);
    }

    #[test]
    fn unique_lines_anchor_the_split() {
        // The unique "  b" pins the second block; the insertion lands in
        // the first block instead of being matched across blocks.
        let a: Vec<&[u8]> = vec![b"{\n", b"  a\n", b"}\n", b"{\n", b"  b\n", b"}\n"];
        let b: Vec<&[u8]> =
            vec![b"{\n", b"  a\n", b"  x\n", b"}\n", b"{\n", b"  b\n", b"}\n"];
        let script = diff(&a, &b);
        assert_eq!(script, vec![Change { a: 2, del: 0, b: 2, ins: 1 }]);
    }

    #[test]
    fn no_unique_lines_falls_back_to_myers() {
        // "x" repeats on both sides and "q"/"p" are one-sided, so no line
        // is unique-common and the window goes to Myers.
        let a: Vec<&[u8]> = vec![b"x\n", b"x\n", b"q\n"];
        let b: Vec<&[u8]> = vec![b"p\n", b"x\n", b"x\n"];
        let script = diff(&a, &b);
        assert_eq!(script, myers::diff(&a, &b));
        assert!(!script.is_empty());
    }

    #[test]
    fn lis_is_increasing_in_both_coordinates() {
        let mut records = vec![
            Record { aline: 0, bline: 2, prev: None },
            Record { aline: 1, bline: 0, prev: None },
            Record { aline: 2, bline: 3, prev: None },
            Record { aline: 3, bline: 1, prev: None },
        ];
        let anchors = lcs(&mut records);
        assert_eq!(anchors.len(), 2);
        for pair in anchors.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1 < pair[1].1);
        }
    }

    #[test]
    fn crossing_unique_lines_keep_longest_chain() {
        // "b" and "c" stay in order; "a" moves behind them.
        let a: Vec<&[u8]> = vec![b"a\n", b"b\n", b"c\n"];
        let b: Vec<&[u8]> = vec![b"b\n", b"c\n", b"a\n"];
        let script = diff(&a, &b);
        assert_eq!(
            script,
            vec![
                Change { a: 0, del: 1, b: 0, ins: 0 },
                Change { a: 3, del: 0, b: 2, ins: 1 },
            ]
        );
    }
}
