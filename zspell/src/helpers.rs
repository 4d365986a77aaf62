//! Small free-standing utilities shared across parser and engine modules.

/// Fallible `usize -> u32` conversion used throughout the line-counting parsers.
///
/// Source files we accept are always small enough that this cannot realistically
/// overflow; panicking here would indicate a multi-billion-line input file.
pub(crate) fn convertu32(v: usize) -> u32 {
    u32::try_from(v).expect("line count exceeds u32::MAX")
}

/// Longest-match, left-to-right, non-overlapping table replace used by `ICONV`/`OCONV`.
///
/// Walks `s` left to right; at each position tries every `(from, to)` pair in
/// `table` and applies the longest `from` that matches, then advances past it.
/// Positions with no match are copied through unchanged.
pub(crate) fn longest_match_replace(s: &str, table: &[(String, String)]) -> String {
    let mut out = String::with_capacity(s.len());
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;
    'outer: while i < chars.len() {
        let rest: String = chars[i..].iter().collect();
        let mut best: Option<&(String, String)> = None;
        for pair in table {
            if rest.starts_with(pair.0.as_str())
                && best.as_ref().map_or(true, |b| pair.0.len() > b.0.len())
            {
                best = Some(pair);
            }
        }
        if let Some((from, to)) = best {
            out.push_str(to);
            i += from.chars().count();
            continue 'outer;
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}
