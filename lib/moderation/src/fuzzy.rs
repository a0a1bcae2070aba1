//! Indel-based fuzzy string scores on a 0-100 scale.
//!
//! `ratio` is the normalized Indel similarity `2 * LCS / (|a| + |b|)`.
//! `partial_ratio` slides the shorter string over the longer one and keeps
//! the best `ratio`, including partially overlapping windows at both ends.

use rapidfuzz::fuzz;

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    100.0 * fuzz::ratio(a.iter().copied(), b.iter().copied())
}

pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best alignment of `needle` inside `haystack`, where `needle` is not longer
fn best_window(needle: &[char], haystack: &[char]) -> f64 {
    let n = needle.len();
    let h = haystack.len();
    let mut best = 0.0f64;

    let windows = (1..n)
        .map(|end| &haystack[..end.min(h)])
        .chain((0..=h - n).map(|start| &haystack[start..start + n]))
        .chain((h - n + 1..h).map(|start| &haystack[start..]));

    for window in windows {
        let score = ratio_chars(needle, window);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a.len() < b.len() {
        best_window(&a, &b)
    } else if a.len() > b.len() {
        best_window(&b, &a)
    } else {
        best_window(&a, &b).max(best_window(&b, &a))
    }
}
