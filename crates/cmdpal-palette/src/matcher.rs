//! Fuzzy matching of a search term against command titles.
//!
//! A term matches a title when its characters appear in order
//! (case-insensitively). Matches are scored so that contiguous runs, word
//! starts, and matches near the beginning of the title rank first. The
//! score is a pure function of `(term, title)`, and [`filter`] sorts
//! stably, so every candidate list has exactly one output ordering.

use crate::command::Command;

const MATCH: i64 = 16;
const CONSECUTIVE: i64 = 24;
const WORD_START: i64 = 20;
const FIRST_CHAR: i64 = 12;
const FULL_TITLE: i64 = 40;
const GAP_PENALTY: i64 = 2;
const LEADING_PENALTY: i64 = 1;
const MAX_LEADING_PENALTY: i64 = 20;

/// A successful match of a term against one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    /// Higher is better.
    pub score: i64,
    /// Char indices of the title that matched, ascending. Used for
    /// highlighting.
    pub positions: Vec<usize>,
}

/// Rank `candidates` against `term`.
///
/// An empty term returns the candidates unchanged. Otherwise only matching
/// candidates are returned, best first; equal scores keep input order.
pub fn filter(term: &str, candidates: &[Command]) -> Vec<Command> {
    if term.is_empty() {
        return candidates.to_vec();
    }

    let mut scored: Vec<(i64, usize)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(index, command)| {
            fuzzy_match(term, &command.title).map(|m| (m.score, index))
        })
        .collect();

    // `sort_by` is stable, so ties stay in candidate order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .map(|(_, index)| candidates[index].clone())
        .collect()
}

/// Match `term` against `title`, returning `None` when some character of
/// the term cannot be found in order.
pub fn fuzzy_match(term: &str, title: &str) -> Option<FuzzyMatch> {
    let needle: Vec<char> = term.chars().map(fold).collect();
    if needle.is_empty() {
        return Some(FuzzyMatch {
            score: 0,
            positions: Vec::new(),
        });
    }

    let original: Vec<char> = title.chars().collect();
    let haystack: Vec<char> = original.iter().copied().map(fold).collect();

    let mut best: Option<FuzzyMatch> = None;
    for start in 0..haystack.len() {
        if haystack[start] != needle[0] {
            continue;
        }
        // If the term cannot be completed from here it cannot be completed
        // from any later start either.
        let Some(positions) = greedy_positions(&needle, &haystack, start) else {
            break;
        };
        let score = score_positions(&positions, &original);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(FuzzyMatch { score, positions });
        }
    }
    best
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn greedy_positions(needle: &[char], haystack: &[char], start: usize) -> Option<Vec<usize>> {
    let mut positions = Vec::with_capacity(needle.len());
    positions.push(start);
    let mut cursor = start + 1;
    for &wanted in &needle[1..] {
        let offset = haystack.get(cursor..)?.iter().position(|&c| c == wanted)?;
        positions.push(cursor + offset);
        cursor += offset + 1;
    }
    Some(positions)
}

fn score_positions(positions: &[usize], title: &[char]) -> i64 {
    let mut score = 0;
    let mut previous: Option<usize> = None;

    for &pos in positions {
        score += MATCH;
        if is_word_start(title, pos) {
            score += WORD_START;
        }
        match previous {
            Some(prev) if pos == prev + 1 => score += CONSECUTIVE,
            Some(prev) => score -= GAP_PENALTY * (pos - prev - 1) as i64,
            None => {}
        }
        previous = Some(pos);
    }

    let first = positions[0];
    if first == 0 {
        score += FIRST_CHAR;
    }
    score -= (LEADING_PENALTY * first as i64).min(MAX_LEADING_PENALTY);

    if positions.len() == title.len() {
        score += FULL_TITLE;
    }
    score
}

fn is_word_start(title: &[char], pos: usize) -> bool {
    if pos == 0 {
        return true;
    }
    let prev = title[pos - 1];
    let cur = title[pos];
    !prev.is_alphanumeric() || (prev.is_lowercase() && cur.is_uppercase())
}
