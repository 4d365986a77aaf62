//! Permutation catalogue for the suggest engine (spec.md §4.4 table).
//!
//! Ported from `spylls.hunspell.algo.permutations`; the function names
//! mirror Hunspell's own `suggest.cxx` naming so the two stay easy to
//! cross-reference.

use crate::affix::RepRule;

const MAX_CHAR_DISTANCE: usize = 4;

/// A `rep_table` replacement, plus (if the replacement introduced a space)
/// the two-word split hypothesis.
pub(crate) fn replchars(word: &str, reptable: &[RepRule]) -> Vec<String> {
    let mut out = Vec::new();
    if word.chars().count() < 2 || reptable.is_empty() {
        return out;
    }
    for rule in reptable {
        for m in rule.regex.find_iter(word) {
            let replacement = rule.replacement.replace('_', " ");
            let suggestion = format!("{}{}{}", &word[..m.start()], replacement, &word[m.end()..]);
            out.push(suggestion);
        }
    }
    out
}

/// Two-word hypotheses produced by a `rep_table` replacement whose
/// replacement text contains `_` (i.e. a space).
pub(crate) fn replchars_two_word(word: &str, reptable: &[RepRule]) -> Vec<(String, String)> {
    let mut out = Vec::new();
    if word.chars().count() < 2 || reptable.is_empty() {
        return out;
    }
    for rule in reptable {
        if !rule.replacement.contains('_') {
            continue;
        }
        for m in rule.regex.find_iter(word) {
            let replacement = rule.replacement.replace('_', " ");
            let suggestion = format!("{}{}{}", &word[..m.start()], replacement, &word[m.end()..]);
            if let Some((a, b)) = suggestion.split_once(' ') {
                out.push((a.to_owned(), b.to_owned()));
            }
        }
    }
    out
}

/// Recursively replace interchangeable grapheme groups from `MAP`.
pub(crate) fn mapchars(word: &str, maptable: &[Vec<char>]) -> Vec<String> {
    let mut out = Vec::new();
    if word.chars().count() < 2 || maptable.is_empty() {
        return out;
    }
    mapchars_internal(word, 0, maptable, &mut out);
    out
}

fn mapchars_internal(word: &str, start: usize, maptable: &[Vec<char>], out: &mut Vec<String>) {
    let chars: Vec<char> = word.chars().collect();
    if start >= chars.len() {
        return;
    }
    for group in maptable {
        for &option in group {
            let Some(pos) = chars[start..].iter().position(|&c| c == option).map(|p| p + start) else {
                continue;
            };
            for &other in group {
                if other == option {
                    continue;
                }
                let mut replaced = chars.clone();
                replaced[pos] = other;
                let replaced_str: String = replaced.iter().collect();
                out.push(replaced_str.clone());
                mapchars_internal(&replaced_str, pos + 1, maptable, out);
            }
        }
    }
}

/// Adjacent-char swaps, plus double-swaps for 4-5 letter words.
pub(crate) fn swapchar(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    if chars.len() < 2 {
        return out;
    }
    for i in 0..chars.len() - 1 {
        let mut v = chars.clone();
        v.swap(i, i + 1);
        out.push(v.into_iter().collect());
    }
    if chars.len() == 4 || chars.len() == 5 {
        let n = chars.len();
        let mut v1 = vec![chars[1], chars[0]];
        if n == 5 {
            v1.push(chars[2]);
        }
        v1.push(chars[n - 1]);
        v1.push(chars[n - 2]);
        out.push(v1.into_iter().collect());
        if n == 5 {
            let v2 = vec![chars[0], chars[2], chars[1], chars[n - 1], chars[n - 2]];
            out.push(v2.into_iter().collect());
        }
    }
    out
}

/// Non-adjacent swaps, distance <= 4.
pub(crate) fn longswapchar(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    if chars.len() < 3 {
        return out;
    }
    for first in 0..chars.len() - 2 {
        for second in (first + 2)..(first + MAX_CHAR_DISTANCE).min(chars.len()) {
            let mut v = chars.clone();
            v.swap(first, second);
            out.push(v.into_iter().collect());
        }
    }
    out
}

/// Keyboard-adjacent replace plus single-char case toggle.
pub(crate) fn badcharkey(word: &str, layout: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    for (i, &c) in chars.iter().enumerate() {
        if c.to_uppercase().next() != Some(c) {
            let mut v = chars.clone();
            v[i] = c.to_ascii_uppercase();
            out.push(v.into_iter().collect());
        }
        if layout.is_empty() {
            continue;
        }
        let layout_chars: Vec<char> = layout.chars().collect();
        let mut search_from = 0;
        while let Some(rel) = layout_chars[search_from..].iter().position(|&l| l == c) {
            let pos = search_from + rel;
            if pos > 0 && layout_chars[pos - 1] != '|' {
                let mut v = chars.clone();
                v[i] = layout_chars[pos - 1];
                out.push(v.into_iter().collect());
            }
            if pos + 1 < layout_chars.len() && layout_chars[pos + 1] != '|' {
                let mut v = chars.clone();
                v[i] = layout_chars[pos + 1];
                out.push(v.into_iter().collect());
            }
            search_from = pos + 1;
            if search_from >= layout_chars.len() {
                break;
            }
        }
    }
    out
}

/// Delete each character in turn.
pub(crate) fn extrachar(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    if chars.len() < 2 {
        return out;
    }
    for i in 0..chars.len() {
        let mut v = chars.clone();
        v.remove(i);
        out.push(v.into_iter().collect());
    }
    out
}

/// Insert each `TRY` character at every position.
pub(crate) fn forgotchar(word: &str, trystring: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    if trystring.is_empty() {
        return out;
    }
    for c in trystring.chars() {
        for i in 0..=chars.len() {
            let mut v = chars.clone();
            v.insert(i, c);
            out.push(v.into_iter().collect());
        }
    }
    out
}

/// Move one character forward or backward by 2-4 positions.
pub(crate) fn movechar(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    if chars.len() < 2 {
        return out;
    }

    for frompos in 0..chars.len() {
        let upper = (frompos + MAX_CHAR_DISTANCE + 1).min(chars.len());
        for topos in (frompos + 3)..upper {
            let mut v: Vec<char> = chars[..frompos].to_vec();
            v.extend_from_slice(&chars[frompos + 1..topos]);
            v.push(chars[frompos]);
            v.extend_from_slice(&chars[topos..]);
            out.push(v.into_iter().collect());
        }
    }

    for frompos in (0..chars.len()).rev() {
        let lower = frompos.saturating_sub(MAX_CHAR_DISTANCE - 1);
        for topos in (lower..frompos.saturating_sub(1)).rev() {
            let mut v: Vec<char> = chars[..topos].to_vec();
            v.push(chars[frompos]);
            v.extend_from_slice(&chars[topos..frompos]);
            v.extend_from_slice(&chars[frompos + 1..]);
            out.push(v.into_iter().collect());
        }
    }

    out
}

/// Replace each character with every `TRY` character.
pub(crate) fn badchar(word: &str, trystring: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    if trystring.is_empty() {
        return out;
    }
    for c in trystring.chars() {
        for i in (0..chars.len()).rev() {
            if chars[i] == c {
                continue;
            }
            let mut v = chars.clone();
            v[i] = c;
            out.push(v.into_iter().collect());
        }
    }
    out
}

/// Un-double an accidental two-letter doubling (`vacacation` -> `vacation`).
pub(crate) fn doubletwochars(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    if chars.len() < 5 {
        return out;
    }
    for i in 2..chars.len() {
        if chars[i - 2] == chars[i] && chars[i - 3] == chars[i - 1] {
            let mut v: Vec<char> = chars[..i - 1].to_vec();
            v.extend_from_slice(&chars[i + 1..]);
            out.push(v.into_iter().collect());
        }
    }
    out
}

/// Every two-word split of `word`.
pub(crate) fn twowords(word: &str) -> Vec<(String, String)> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    for i in 1..chars.len() {
        out.push((chars[..i].iter().collect(), chars[i..].iter().collect()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swapchar_produces_adjacent_swaps() {
        let out = swapchar("ab");
        assert_eq!(out, vec!["ba".to_owned()]);
    }

    #[test]
    fn extrachar_deletes_each_position() {
        let out = extrachar("abc");
        assert_eq!(out, vec!["bc", "ac", "ab"]);
    }

    #[test]
    fn twowords_splits_everywhere() {
        let out = twowords("alot");
        assert!(out.contains(&("a".to_owned(), "lot".to_owned())));
    }

    #[test]
    fn doubletwochars_fixes_doubling() {
        let out = doubletwochars("vacacation");
        assert!(out.iter().any(|s| s == "vacation"));
    }
}
