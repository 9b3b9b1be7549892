// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance with an early-exit optimization.
//!
//! Plain Levenshtein: insert, delete, substitute, each costing one. No
//! transpositions, so "form" and "from" are two edits apart here even though
//! the spell corrector's edit generator reaches one from the other in one step.
//!
//! `|len(a) - len(b)|` is a lower bound on the distance, and so is the minimum
//! of any DP row. The bounded variant uses both to bail out before finishing
//! the table, which is what makes scanning a whole vocabulary per query term
//! affordable.

/// Levenshtein distance over Unicode scalar values.
///
/// Single-row Wagner-Fischer: O(|a|·|b|) time, O(|b|) memory.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ac) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &bc) in b_chars.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ac != bc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }

    row[b_chars.len()]
}

/// Distance between `a` and `b` if it is at most `max`, `None` otherwise.
///
/// Two early-exit paths:
/// 1. Length difference exceeds `max`: no DP at all
/// 2. Minimum row value exceeds `max`: abandon the DP
///
/// Both are sound, they never reject a pair whose true distance is within `max`.
pub fn bounded_distance(a: &str, b: &str, max: usize) -> Option<usize> {
    // Character counts, not byte lengths
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len.abs_diff(b_len) > max {
        return None;
    }

    let b_chars: Vec<char> = b.chars().collect();
    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, &bc) in b_chars.iter().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            min_row = min_row.min(dp[j + 1]);
        }

        if min_row > max {
            return None;
        }
    }

    let distance = dp[b_len];
    (distance <= max).then_some(distance)
}

/// Are these strings within `max` edits of each other?
#[inline]
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    bounded_distance(a, b, max).is_some()
}
