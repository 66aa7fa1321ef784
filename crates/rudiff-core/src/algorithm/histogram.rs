//! Histogram diff.
//!
//! Indexes the occurrence positions of every line in the A window, then
//! scans the B window for the common region with the lowest occurrence
//! count, preferring rare lines as split anchors. The region is removed
//! and both sides are diffed recursively. Lines occurring more than
//! `MAX_OCCURRENCE` times are never anchors; if only such lines are
//! common, the window falls back to Myers.

use std::collections::HashMap;

use super::myers;
use crate::script::Change;

/// Chain-length cap: lines with more occurrences in the A window are
/// skipped as LCS anchors.
pub const MAX_OCCURRENCE: usize = 64;

#[derive(Debug, Default, Clone, Copy)]
struct Region {
    astart: usize,
    aend: usize,
    bstart: usize,
    bend: usize,
}

/// Mutable state of one LCS search over a window.
struct Search {
    lcs: Region,
    count: usize,
    has_common: bool,
    has_lcs: bool,
}

/// Compute an edit script transforming `a` into `b`.
pub fn diff(a: &[&[u8]], b: &[&[u8]]) -> Vec<Change> {
    let mut script = Vec::new();
    recurse(a, 0, a.len(), b, 0, b.len(), &mut script);
    script
}

fn recurse(
    a: &[&[u8]],
    astart: usize,
    aend: usize,
    b: &[&[u8]],
    bstart: usize,
    bend: usize,
    script: &mut Vec<Change>,
) {
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

    let search = find_lcs(a, astart, aend, b, bstart, bend);
    if !search.has_lcs {
        if search.has_common {
            fallback(a, astart, aend, b, bstart, bend, script);
        } else {
            script.push(Change {
                a: astart,
                del: aend - astart,
                b: bstart,
                ins: bend - bstart,
            });
        }
        return;
    }
    recurse(a, astart, search.lcs.astart, b, bstart, search.lcs.bstart, script);
    recurse(a, search.lcs.aend, aend, b, search.lcs.bend, bend, script);
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

fn find_lcs<'a>(
    a: &[&'a [u8]],
    astart: usize,
    aend: usize,
    b: &[&'a [u8]],
    bstart: usize,
    bend: usize,
) -> Search {
    let mut records: HashMap<&'a [u8], Vec<usize>> = HashMap::new();
    for pos in astart..aend {
        records.entry(a[pos]).or_default().push(pos);
    }

    let mut search = Search {
        lcs: Region::default(),
        count: MAX_OCCURRENCE,
        has_common: false,
        has_lcs: false,
    };
    let mut bpos = bstart;
    while bpos < bend {
        bpos = try_lcs(&records, &mut search, bpos, a, astart, aend, b, bstart, bend);
    }
    search
}

/// Consider every A occurrence of `b[bpos]` as an anchor, extending each
/// match as far as the surrounding lines stay equal. Returns the next B
/// position to scan.
#[allow(clippy::too_many_arguments)]
fn try_lcs(
    records: &HashMap<&[u8], Vec<usize>>,
    search: &mut Search,
    bpos: usize,
    a: &[&[u8]],
    astart: usize,
    aend: usize,
    b: &[&[u8]],
    bstart: usize,
    bend: usize,
) -> usize {
    let mut next = bpos + 1;
    let Some(positions) = records.get(b[bpos]) else {
        return next;
    };
    search.has_common = true;
    if positions.len() > search.count {
        return next;
    }

    let mut prev_aend = 0;
    for &apos in positions {
        // Already covered by the previous extension.
        if apos < prev_aend {
            continue;
        }
        let mut region = Region {
            astart: apos,
            aend: apos + 1,
            bstart: bpos,
            bend: bpos + 1,
        };
        let mut rc = positions.len();
        while astart < region.astart
            && bstart < region.bstart
            && a[region.astart - 1] == b[region.bstart - 1]
        {
            region.astart -= 1;
            region.bstart -= 1;
            rc = rc.min(records[a[region.astart]].len());
        }
        while region.aend < aend && region.bend < bend && a[region.aend] == b[region.bend] {
            region.aend += 1;
            region.bend += 1;
            rc = rc.min(records[a[region.aend - 1]].len());
        }
        if next < region.bend {
            next = region.bend;
        }
        // Longer regions win; ties and shorter regions still win when they
        // sit on rarer lines.
        if search.lcs.aend - search.lcs.astart < region.aend - region.astart
            || rc < search.count
        {
            search.lcs = region;
            search.count = rc;
            search.has_lcs = true;
        }
        prev_aend = region.aend;
    }
    next
}
