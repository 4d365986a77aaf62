//! N-gram suggestion scorer (spec.md §4.5).
//!
//! Ported from `spylls.hunspell.algo.ngram_suggest`: three phases (stem
//! scan, form expansion, precise ranking) followed by a score-bucket filter
//! that decides how many "questionable" suggestions to let through.

use crate::affix::Aff;
use crate::dict::{Dic, Word};
use crate::morph::string_metrics::{
    common_character_positions, lcs_length, left_common_substring, ngram, NgramOpts,
};

const MAX_ROOTS: usize = 100;
const MAX_GUESSES: usize = 200;

/// Produce n-gram-scored suggestions for `misspelling`, skipping any value
/// already present in `known` (suppresses near-duplicate morphological
/// neighbours per spec.md §4.4).
pub(crate) fn ngram_suggest(aff: &Aff, dic: &Dic, misspelling: &str, known: &[String]) -> Vec<String> {
    let mut root_scores: Vec<(i32, String, &Word)> = Vec::new();

    for word in dic.iter() {
        if let Some(nosuggest) = aff.nosuggest_flag {
            if word.has_flag(nosuggest) {
                continue;
            }
        }
        if let Some(forbidden) = aff.forbidden_word_flag {
            if word.has_flag(forbidden) {
                continue;
            }
        }
        if let Some(only) = aff.compound_only_flag {
            if word.has_flag(only) {
                continue;
            }
        }

        let len_diff = (word.stem.chars().count() as i32 - misspelling.chars().count() as i32).abs();
        if len_diff > 4 {
            continue;
        }

        let mut score = root_score(misspelling, &word.stem);
        for alt in &word.alt_spellings {
            score = score.max(root_score(misspelling, alt));
        }
        root_scores.push((score, word.stem.clone(), word));
    }

    root_scores.sort_by(|a, b| b.0.cmp(&a.0));
    root_scores.truncate(MAX_ROOTS);

    let threshold = detect_threshold(misspelling);
    let mut guess_scores: Vec<(i32, String, String)> = Vec::new();

    for (_, _, root) in &root_scores {
        for alt in &root.alt_spellings {
            let score = rough_affix_score(misspelling, alt);
            if score > threshold {
                guess_scores.push((score, alt.clone(), root.stem.clone()));
            }
        }

        for form in forms_for(aff, root, misspelling) {
            let score = rough_affix_score(misspelling, &form.to_lowercase());
            if score > threshold {
                guess_scores.push((score, form.clone(), form));
            }
        }
    }

    guess_scores.sort_by(|a, b| b.0.cmp(&a.0));
    guess_scores.truncate(MAX_GUESSES);

    let factor = if aff.max_ngram_diff >= 0 {
        f64::from(10 - aff.max_ngram_diff) / 5.0
    } else {
        1.0
    };

    let mut precise: Vec<(i32, String)> = guess_scores
        .iter()
        .map(|(score, compared, real)| {
            (
                precise_affix_score(misspelling, &compared.to_lowercase(), factor, *score),
                real.clone(),
            )
        })
        .collect();
    precise.sort_by(|a, b| b.0.cmp(&a.0));

    filter_guesses(&precise, known, aff.only_max_diff)
}

pub(crate) fn root_score(word1: &str, word2: &str) -> i32 {
    ngram(3, word1, &word2.to_lowercase(), NgramOpts { longer_worse: true, ..Default::default() })
        + left_common_substring(word1, &word2.to_lowercase()) as i32
}

fn rough_affix_score(word1: &str, word2: &str) -> i32 {
    ngram(word1.chars().count(), word1, word2, NgramOpts { any_mismatch: true, ..Default::default() })
        + left_common_substring(word1, word2) as i32
}

fn precise_affix_score(word1: &str, word2: &str, diff_factor: f64, base: i32) -> i32 {
    let lcs = lcs_length(word1, word2) as i32;
    let len1 = word1.chars().count() as i32;
    let len2 = word2.chars().count() as i32;

    if len1 == len2 && lcs == len1 {
        return base + 2000;
    }

    let mut result = 2 * lcs - (len1 - len2).abs();
    result += left_common_substring(word1, word2) as i32;

    let (cps, is_swap) = common_character_positions(word1, &word2.to_lowercase());
    if cps > 0 {
        result += 1;
    }
    if is_swap {
        result += 10;
    }

    result += ngram(4, word1, word2, NgramOpts { any_mismatch: true, ..Default::default() });

    let bigram_opts = NgramOpts { any_mismatch: true, weighted: true, ..Default::default() };
    let bigrams = ngram(2, word1, word2, bigram_opts) + ngram(2, word2, word1, bigram_opts);
    result += bigrams;

    if f64::from(bigrams) < f64::from(len1 + len2) * diff_factor {
        result -= 1000;
    }

    result
}

fn detect_threshold(word: &str) -> i32 {
    let chars: Vec<char> = word.chars().collect();
    let mut total = 0i32;

    for start_pos in 1..4 {
        let mut mangled = chars.clone();
        let mut pos = start_pos;
        while pos < mangled.len() {
            mangled[pos] = '*';
            pos += 4;
        }
        let mangled_word: String = mangled.into_iter().collect();
        total += ngram(
            chars.len(),
            word,
            &mangled_word,
            NgramOpts { any_mismatch: true, ..Default::default() },
        );
    }

    total.div_euclid(3) - 1
}

/// All affixed forms of `word` that are plausible given `similar_to`
/// (the misspelling): the bare stem, each suffixed form whose `append`
/// matches the misspelling's tail, each prefixed form similarly, and their
/// cross-products.
fn forms_for(aff: &Aff, word: &Word, similar_to: &str) -> Vec<String> {
    let mut out = vec![word.stem.clone()];

    let suffixes: Vec<_> = word
        .flags
        .iter()
        .filter_map(|f| aff.suffixes.get(&f))
        .flatten()
        .filter(|s| s.stem_satisfies(&word.stem) && similar_to.ends_with(s.append.as_str()))
        .collect();
    let prefixes: Vec<_> = word
        .flags
        .iter()
        .filter_map(|f| aff.prefixes.get(&f))
        .flatten()
        .filter(|p| p.stem_satisfies(&word.stem) && similar_to.starts_with(p.append.as_str()))
        .collect();

    for suf in &suffixes {
        let root = strip_end(&word.stem, suf.strip.chars().count());
        out.push(format!("{root}{}", suf.append));
    }

    for pref in &prefixes {
        let root = strip_start(&word.stem, pref.strip.chars().count());
        out.push(format!("{}{root}", pref.append));
    }

    for pref in &prefixes {
        for suf in &suffixes {
            if !pref.can_combine || !suf.can_combine {
                continue;
            }
            let root = strip_start(&word.stem, pref.strip.chars().count());
            let root = strip_end(&root, suf.strip.chars().count());
            out.push(format!("{}{root}{}", pref.append, suf.append));
        }
    }

    out
}

fn strip_end(s: &str, n: usize) -> String {
    let len = s.chars().count();
    s.chars().take(len.saturating_sub(n)).collect()
}

fn strip_start(s: &str, n: usize) -> String {
    s.chars().skip(n).collect()
}

/// Decide how many suggestions from the three score bags ("very good" >1000,
/// normal, "questionable" <-100) to actually emit.
fn filter_guesses(guesses: &[(i32, String)], known: &[String], only_max_diff: bool) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen_cutoff = false;
    let mut found = 0;

    for (score, value) in guesses {
        if seen_cutoff && *score <= 1000 {
            break;
        }
        if *score > 1000 {
            seen_cutoff = true;
        } else if *score < -100 {
            if found > 0 || only_max_diff {
                break;
            }
            seen_cutoff = true;
        }

        if !known.iter().any(|k| value.contains(k.as_str())) {
            found += 1;
            out.push(value.clone());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_threshold_is_deterministic() {
        assert_eq!(detect_threshold("spylls"), detect_threshold("spylls"));
    }

    #[test]
    fn filter_guesses_stops_after_single_questionable() {
        let guesses = vec![(5, "a".to_owned()), (-150, "b".to_owned()), (-200, "c".to_owned())];
        let out = filter_guesses(&guesses, &[], false);
        assert_eq!(out, vec!["a".to_owned(), "b".to_owned()]);
    }
}
