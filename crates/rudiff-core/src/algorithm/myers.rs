//! Myers shortest-edit-script search.
//!
//! The greedy O((N+M)D) algorithm from "An O(ND) Difference Algorithm and
//! Its Variations" (1986), run on the window left after trimming the common
//! prefix and suffix. The backtracked path is recorded in per-line mark
//! vectors and rebuilt into a change script.

use crate::script::{self, Change};

/// Compute an edit script transforming `a` into `b`.
pub fn diff(a: &[&[u8]], b: &[&[u8]]) -> Vec<Change> {
    let prefix = a
        .iter()
        .zip(b.iter())
        .take_while(|(x, y)| x == y)
        .count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    let mut ad = vec![0i8; a.len()];
    let mut bd = vec![0i8; b.len()];
    mark_edits(
        &a[prefix..a.len() - suffix],
        &b[prefix..b.len() - suffix],
        &mut ad[prefix..a.len() - suffix],
        &mut bd[prefix..b.len() - suffix],
    );
    script::from_marks(&ad, &bd)
}

/// Run the search on the trimmed window, marking deleted lines in `ad`
/// and inserted lines in `bd`.
fn mark_edits(a: &[&[u8]], b: &[&[u8]], ad: &mut [i8], bd: &mut [i8]) {
    let n = a.len();
    let m = b.len();
    if n == 0 || m == 0 {
        ad.fill(-1);
        bd.fill(1);
        return;
    }

    // v[k + offset] holds the furthest-reaching x on diagonal k; one
    // snapshot per depth is kept for the backtrack.
    let max = n + m;
    let offset = max as isize;
    let mut v = vec![0usize; 2 * max + 1];
    let mut trace: Vec<Vec<usize>> = Vec::new();

    'search: for d in 0..=max {
        trace.push(v.clone());
        let mut k = -(d as isize);
        while k <= d as isize {
            let idx = (k + offset) as usize;
            let mut x = if k == -(d as isize) || (k != d as isize && v[idx - 1] < v[idx + 1]) {
                v[idx + 1]
            } else {
                v[idx - 1] + 1
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && a[x] == b[y] {
                x += 1;
                y += 1;
            }
            v[idx] = x;
            if x >= n && y >= m {
                break 'search;
            }
            k += 2;
        }
    }

    // Walk the trace back from (n, m), undoing one vertical or horizontal
    // move per depth; snake segments in between are equal lines.
    let mut x = n;
    let mut y = m;
    for d in (1..trace.len()).rev() {
        let prev = &trace[d];
        let k = x as isize - y as isize;
        let down = k == -(d as isize)
            || (k != d as isize
                && prev[(k - 1 + offset) as usize] < prev[(k + 1 + offset) as usize]);
        let prev_k = if down { k + 1 } else { k - 1 };
        let prev_x = prev[(prev_k + offset) as usize];
        let prev_y = (prev_x as isize - prev_k) as usize;
        while x > prev_x && y > prev_y {
            x -= 1;
            y -= 1;
        }
        if down {
            y -= 1;
            bd[y] = 1;
        } else {
            x -= 1;
            ad[x] = -1;
        }
    }
}
