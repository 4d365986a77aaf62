//! Phonetic ("metaphone") suggestion scorer (spec.md §4.6).
//!
//! Ported from `spylls.hunspell.algo.phonet_suggest`. Only exercised when the
//! `.aff` file carries a `PHONE` table, which is rare; Hunspell folds this
//! into the same pass as the n-gram scorer, but we keep it a separate stage
//! for clarity, same as the reference implementation does.

use hashbrown::HashMap;

use crate::affix::{Aff, Phonetic};
use crate::dict::Dic;
use crate::morph::string_metrics::{lcs_length, left_common_substring, ngram, NgramOpts};
use crate::suggest::ngram::root_score;

const MAX_ROOTS: usize = 100;

/// Score dictionary stems by phonetic similarity to `misspelling`. Returns an
/// empty list when the affix config carries no `PHONE` table.
pub(crate) fn phonet_suggest(aff: &Aff, dic: &Dic, misspelling: &str) -> Vec<String> {
    if aff.phonet_table.is_empty() {
        return Vec::new();
    }

    let misspelling = misspelling.to_lowercase();
    let groups = group_by_first_char(&aff.phonet_table);
    let misspelling_ph = metaphone(&groups, &misspelling);

    let mut scores: Vec<(i32, String)> = Vec::new();

    for word in dic.iter() {
        let len_diff =
            (word.stem.chars().count() as i32 - misspelling.chars().count() as i32).abs();
        if len_diff > 3 {
            continue;
        }

        let mut nscore = root_score(&misspelling, &word.stem);
        for alt in &word.alt_spellings {
            nscore = nscore.max(root_score(&misspelling, alt));
        }
        if nscore <= 2 {
            continue;
        }

        let word_ph = metaphone(&groups, &word.stem);
        let score = 2 * ngram(
            3,
            &misspelling_ph,
            &word_ph,
            NgramOpts { longer_worse: true, ..Default::default() },
        );
        scores.push((score, word.stem.clone()));
    }

    scores.sort_by(|a, b| b.0.cmp(&a.0));
    scores.truncate(MAX_ROOTS);

    let mut guesses: Vec<(i32, String)> = scores
        .into_iter()
        .map(|(score, stem)| {
            (score + final_score(&misspelling, &stem.to_lowercase()), stem)
        })
        .collect();
    guesses.sort_by(|a, b| b.0.cmp(&a.0));

    guesses.into_iter().map(|(_, s)| s).collect()
}

fn final_score(word1: &str, word2: &str) -> i32 {
    let len1 = word1.chars().count() as i32;
    let len2 = word2.chars().count() as i32;
    2 * lcs_length(word1, word2) as i32 - (len1 - len2).abs() + left_common_substring(word1, word2) as i32
}

/// Group `PHONE` entries by the first literal character of their pattern
/// (ignoring a leading `^` anchor), mirroring `PhonetTable.rules`'s
/// `defaultdict(list)` keyed by `search[0]`.
fn group_by_first_char(table: &[Phonetic]) -> HashMap<char, Vec<&Phonetic>> {
    let mut map: HashMap<char, Vec<&Phonetic>> = HashMap::new();
    for rule in table {
        let first = rule.pattern.trim_start_matches('^').chars().next();
        if let Some(c) = first {
            map.entry(c.to_ascii_uppercase()).or_default().push(rule);
        }
    }
    map
}

/// Greedy left-to-right metaphone key: at each position, try every rule
/// whose first pattern character matches the current character; on a match
/// emit its replacement and jump past the match, else advance one char.
fn metaphone(groups: &HashMap<char, Vec<&Phonetic>>, word: &str) -> String {
    let upper = word.to_uppercase();
    let mut res = String::new();
    let mut pos = 0usize;

    while pos < upper.len() {
        let c = upper[pos..].chars().next().expect("pos is a char boundary");
        let mut advanced = false;

        if let Some(rules) = groups.get(&c) {
            for rule in rules {
                if let Some(m) = rule.regex.find_at(&upper, pos) {
                    if m.start() == pos {
                        res.push_str(&rule.replacement);
                        pos = m.end();
                        advanced = true;
                        break;
                    }
                }
            }
        }

        if !advanced {
            pos += c.len_utf8();
        }
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affix::{consolidate, parser_affix::parse_affix};

    fn aff_with_phone(src: &str) -> Aff {
        consolidate(parse_affix(src).unwrap()).unwrap()
    }

    #[test]
    fn empty_phonet_table_yields_no_suggestions() {
        let aff = aff_with_phone("SET UTF-8\n");
        let dic = Dic::default();
        assert!(phonet_suggest(&aff, &dic, "hello").is_empty());
    }

    #[test]
    fn metaphone_replaces_known_pattern() {
        let aff = aff_with_phone("SET UTF-8\nPHONE 1\nPHONE AA A\n");
        let groups = group_by_first_char(&aff.phonet_table);
        // unmatched characters contribute nothing to the key; only the "AA" -> "A"
        // rule fires anywhere in "aardvark".
        assert_eq!(metaphone(&groups, "aardvark"), "A");
    }
}
