//! `.dic` lexicon parser.
//!
//! Ported from `spylls.hunspell.readers.dic.read_dic`: each line is
//! `stem[/flags][ TAG:value ...]`; the header line (word count) is skipped.
//! `ph:` data tags both become an `alt_spelling` and augment `aff.rep_table`
//! — the one place the affix configuration is mutated after its own parse.

use crate::affix::{Aff, MorphInfo, RepRule};
use crate::dict::{Dic, Word};
use crate::error::DictParseError;
use crate::morph::CasingVariant;

/// Parse a complete `.dic` file's contents into a [`Dic`], mutating `aff`'s
/// `rep_table` with any `ph:` pairs encountered.
pub(crate) fn parse_dict(s: &str, aff: &mut Aff) -> Result<Dic, DictParseError> {
    let casing = CasingVariant::select(aff.lang.as_deref(), aff.check_sharps);
    let mut dic = Dic::default();
    let mut lines = s.lines().enumerate();

    // First non-empty line is the entry-count header; validated but not
    // otherwise relied on (we grow the word vector as we go).
    if let Some((i, first)) = lines.next() {
        if first.trim().parse::<u32>().is_err() {
            return Err(DictParseError::HeaderCount {
                line: i as u32 + 1,
                found: first.to_owned(),
            });
        }
    }

    for (i, raw_line) in lines {
        let line = raw_line.trim_end();
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let line_no = i as u32 + 1;

        let (word_flags, data_text) = split_entry(line);
        let (mut word, flags_raw) = split_flags(word_flags);
        word = word.replace("\\/", "/");

        if !aff.ignore_chars.is_empty() {
            word.retain(|c| !aff.ignore_chars.contains(&c));
        }

        let flags = aff.intern_flag_set(&flags_raw);
        let data_tags = parse_data_tags(data_text, line_no)?;

        let mut alt_spellings = Vec::new();
        for tag in &data_tags {
            if let MorphInfo::Phonetic(pattern) = tag {
                apply_phonetic_tag(aff, pattern, &word, &mut alt_spellings);
            }
        }

        let captype = casing.classify(&word);

        dic.push(Word {
            stem: word,
            flags,
            data_tags,
            captype,
            alt_spellings,
        });
    }

    Ok(dic)
}

/// Split `stem/flags TAG:value...` into the `stem/flags` half and the
/// trailing data-tag text. The boundary is the first run of whitespace
/// followed by a two-letter-tag-colon pattern, or a literal tab, whichever
/// comes first — mirroring spylls' `TAG_REGEXP`/tab-based split.
fn split_entry(line: &str) -> (&str, &str) {
    if let Some(tab_pos) = line.find('\t') {
        return (&line[..tab_pos], &line[tab_pos..]);
    }

    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b' ' || bytes[i] == b'\t' {
            let rest = &line[i..];
            let trimmed = rest.trim_start();
            if is_tag_start(trimmed) {
                return (&line[..i], rest);
            }
        }
        i += 1;
    }
    (line, "")
}

fn is_tag_start(s: &str) -> bool {
    let mut chars = s.chars();
    let a = chars.next();
    let b = chars.next();
    let c = chars.next();
    matches!((a, b, c), (Some(a), Some(b), Some(':')) if a.is_alphanumeric() && b.is_alphanumeric())
}

/// Split `stem/flags` into `(stem, flags)`. A leading `/` means the stem
/// itself starts with a slash (no flags), matching Hunspell's special case.
fn split_flags(word: &str) -> (String, String) {
    if word.starts_with('/') {
        return (word.to_owned(), String::new());
    }
    match find_unescaped_slash(word) {
        Some(idx) => (word[..idx].to_owned(), word[idx + 1..].to_owned()),
        None => (word.to_owned(), String::new()),
    }
}

fn find_unescaped_slash(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'/' && (i == 0 || bytes[i - 1] != b'\\') {
            return Some(i);
        }
        i += 1;
    }
    None
}

fn parse_data_tags(text: &str, line_no: u32) -> Result<Vec<MorphInfo>, DictParseError> {
    let mut out = Vec::new();
    for part in text.split_whitespace() {
        if let Some((tag, value)) = part.split_once(':') {
            if value.is_empty() {
                continue;
            }
            out.push(MorphInfo::try_from(part).map_err(|_| DictParseError::Entry {
                line: line_no,
                entry: part.to_owned(),
                reason: format!("malformed data tag '{tag}'"),
            })?);
        }
    }
    Ok(out)
}

/// Fold one `ph:` value into `aff.rep_table` and `alt_spellings` per the
/// three forms spec.md §6 documents.
fn apply_phonetic_tag(aff: &mut Aff, pattern: &str, word: &str, alt_spellings: &mut Vec<String>) {
    if let Some(stripped) = pattern.strip_suffix('*') {
        let from = stripped.trim_end_matches('*');
        let to: String = word.chars().take(word.chars().count().saturating_sub(1)).collect();
        let from_trunc: String = from.chars().take(from.chars().count().saturating_sub(1)).collect();
        push_rep(aff, &from_trunc, &to);
    } else if let Some((from, to)) = pattern.split_once("->") {
        push_rep(aff, from, to);
    } else {
        push_rep(aff, pattern, word);
        alt_spellings.push(pattern.to_owned());
    }
}

fn push_rep(aff: &mut Aff, from: &str, to: &str) {
    let Ok(regex) = regex::Regex::new(&regex::escape(from)) else {
        return;
    };
    aff.rep_table.push(RepRule {
        regex,
        replacement: to.to_owned(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affix::{consolidate, parser_affix::parse_affix};

    fn empty_aff() -> Aff {
        consolidate(parse_affix("SET UTF-8\n").unwrap()).unwrap()
    }

    #[test]
    fn parses_simple_entries() {
        let mut aff = empty_aff();
        let dic = parse_dict("2\nhello\nworld/S\n", &mut aff).unwrap();
        assert_eq!(dic.len(), 2);
        assert_eq!(dic.words[0].stem, "hello");
        assert_eq!(dic.words[1].stem, "world");
    }

    #[test]
    fn ph_tag_feeds_rep_table() {
        let mut aff = empty_aff();
        let dic = parse_dict("1\nwednesday\tph:wensday\n", &mut aff).unwrap();
        assert_eq!(dic.words[0].alt_spellings, vec!["wensday".to_owned()]);
        assert_eq!(aff.rep_table.len(), 1);
    }

    #[test]
    fn escaped_slash_kept_in_stem() {
        let mut aff = empty_aff();
        let dic = parse_dict("1\nand\\/or\n", &mut aff).unwrap();
        assert_eq!(dic.words[0].stem, "and/or");
    }
}
