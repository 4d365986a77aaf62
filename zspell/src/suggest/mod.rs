//! Suggest engine: §4.4 of the spec — casing expansion, the permutation
//! catalogue, and the n-gram/phonet fallbacks.
//!
//! Ported from `spylls.hunspell.algo.suggest.Suggest.suggest_internal`: one
//! difference from the reference noted there is kept here too — permutation
//! candidates are checked against the lookup engine once, including
//! compounding, rather than twice (plain word first, then compound).

mod ngram;
mod permutations;
mod phonet;

use std::collections::VecDeque;

use hashbrown::HashSet;

use crate::affix::Aff;
use crate::dict::Dic;
use crate::lookup::{apply_conversion, lookup, LookupOptions};
use crate::morph::casing::CasingVariant;
use crate::morph::Captype;

const MAX_NGRAM_SUGGESTIONS_DEFAULT: u32 = 100;
const MAX_PHONET_SUGGESTIONS: usize = 2;

/// Produce `word`'s ranked suggestion list lazily: nothing past the
/// forced-uppercase shortcut is computed until polled, each permutation's
/// lookup runs only as the caller pulls another item, and the n-gram/phonet
/// fallback stages never run at all once a good/very-good match is found or
/// once a caller stops asking for more.
pub(crate) fn suggest<'a>(aff: &'a Aff, dic: &'a Dic, word: &'a str) -> impl Iterator<Item = String> + 'a {
    SuggestIter::new(aff, dic, word)
}

/// One step of the §4.4 pipeline. Each variant holds whatever sub-iterator
/// (and loop index) that step is currently draining; `advance` pulls one
/// item from it, stages 0..2 candidates into `SuggestIter::pending`, and
/// transitions to the next stage once its sub-iterator is exhausted.
enum Stage {
    ForcedUpper(std::vec::IntoIter<String>),
    Top(usize),
    GoodPerms(usize, std::vec::IntoIter<String>),
    VeryGood(usize, std::vec::IntoIter<(String, String)>),
    Questionable(usize, std::vec::IntoIter<String>),
    Split(usize, std::vec::IntoIter<(String, String)>),
    NgramPrep,
    Ngram(std::vec::IntoIter<String>),
    PhonetPrep,
    Phonet(std::vec::IntoIter<String>),
    Done,
}

struct SuggestIter<'a> {
    aff: &'a Aff,
    dic: &'a Dic,
    word: &'a str,
    casing: CasingVariant,
    captype: Captype,
    variants: Vec<String>,
    handled: HashSet<String>,
    good: bool,
    very_good: bool,
    use_dash: bool,
    max_ngram: u32,
    ngram_emitted: u32,
    phonet_emitted: usize,
    pending: VecDeque<String>,
    stage: Stage,
}

impl<'a> SuggestIter<'a> {
    fn new(aff: &'a Aff, dic: &'a Dic, word: &'a str) -> Self {
        let casing = CasingVariant::select(aff.lang.as_deref(), aff.check_sharps);
        let use_dash = aff.try_chars.contains('-') || aff.try_chars.contains('a');

        let forced_candidates = if aff.force_ucase_flag.is_some() && casing.classify(word) == Captype::No {
            casing.capitalize(word)
        } else {
            Vec::new()
        };

        let (captype, variants) = casing.corrections(word);

        Self {
            aff,
            dic,
            word,
            casing,
            captype,
            variants,
            handled: HashSet::new(),
            good: false,
            very_good: false,
            use_dash,
            max_ngram: if aff.max_ngram_suggestions == 0 {
                MAX_NGRAM_SUGGESTIONS_DEFAULT
            } else {
                aff.max_ngram_suggestions
            },
            ngram_emitted: 0,
            phonet_emitted: 0,
            pending: VecDeque::new(),
            stage: Stage::ForcedUpper(forced_candidates.into_iter()),
        }
    }

    fn is_good(&self, candidate: &str, allow_break: bool) -> bool {
        lookup(
            self.aff,
            self.dic,
            candidate,
            LookupOptions { check_capitalization: false, allow_nosuggest: false, allow_break },
        )
    }

    fn handle(&mut self, candidate: &str, check_inclusion: bool) -> Option<String> {
        let aff = self.aff;
        let dic = self.dic;
        let is_forbidden = |c: &str| {
            aff.forbidden_word_flag.is_some_and(|flag| dic.homonyms(c).next().is_some_and(|w| w.has_flag(flag)))
        };
        handle_found(
            aff,
            dic,
            &self.casing,
            self.word,
            self.captype,
            candidate,
            &mut self.handled,
            &is_forbidden,
            check_inclusion,
        )
    }

    /// Pull one item through the current stage's sub-iterator, staging 0+
    /// results into `pending`. Returns `false` once the whole pipeline is
    /// exhausted.
    fn advance(&mut self) -> bool {
        match std::mem::replace(&mut self.stage, Stage::Done) {
            Stage::ForcedUpper(mut iter) => match iter.next() {
                Some(candidate) => {
                    if self.is_good(&candidate, true) {
                        if let Some(text) = self.handle(&candidate, false) {
                            self.pending.push_back(text);
                        }
                        self.stage = Stage::Done;
                    } else {
                        self.stage = Stage::ForcedUpper(iter);
                    }
                    true
                }
                None => {
                    self.stage = Stage::Top(0);
                    true
                }
            },

            Stage::Top(idx) => {
                if idx >= self.variants.len() {
                    self.stage = if self.good { Stage::Done } else { Stage::NgramPrep };
                    return true;
                }
                let variant = self.variants[idx].clone();
                if idx > 0 && self.is_good(&variant, true) {
                    if let Some(text) = self.handle(&variant, false) {
                        self.pending.push_back(text);
                    }
                }
                self.stage = Stage::GoodPerms(idx, good_permutations(self.aff, &variant).into_iter());
                true
            }

            Stage::GoodPerms(idx, mut iter) => {
                match iter.next() {
                    Some(candidate) => {
                        if self.is_good(&candidate, true) {
                            if let Some(text) = self.handle(&candidate, false) {
                                self.good = true;
                                self.pending.push_back(text);
                            }
                        }
                        self.stage = Stage::GoodPerms(idx, iter);
                    }
                    None => {
                        let variant = self.variants[idx].clone();
                        self.stage = Stage::VeryGood(idx, permutations::twowords(&variant).into_iter());
                    }
                }
                true
            }

            Stage::VeryGood(idx, mut iter) => {
                match iter.next() {
                    Some((a, b)) => {
                        if self.is_good(&a, false) && self.is_good(&b, false) {
                            let spaced = format!("{a} {b}");
                            if let Some(text) = self.handle(&spaced, false) {
                                self.very_good = true;
                                self.pending.push_back(text);
                            }
                            if self.use_dash {
                                let dashed = format!("{a}-{b}");
                                if let Some(text) = self.handle(&dashed, false) {
                                    self.very_good = true;
                                    self.pending.push_back(text);
                                }
                            }
                        }
                        self.stage = Stage::VeryGood(idx, iter);
                    }
                    None => {
                        if self.very_good {
                            self.stage = Stage::Done;
                        } else {
                            let variant = self.variants[idx].clone();
                            self.stage =
                                Stage::Questionable(idx, questionable_permutations(self.aff, &variant).into_iter());
                        }
                    }
                }
                true
            }

            Stage::Questionable(idx, mut iter) => {
                match iter.next() {
                    Some(candidate) => {
                        if self.is_good(&candidate, true) {
                            if let Some(text) = self.handle(&candidate, false) {
                                self.pending.push_back(text);
                            }
                        }
                        self.stage = Stage::Questionable(idx, iter);
                    }
                    None => {
                        if self.aff.no_split_suggestions {
                            self.stage = Stage::Top(idx + 1);
                        } else {
                            let variant = self.variants[idx].clone();
                            self.stage = Stage::Split(idx, permutations::twowords(&variant).into_iter());
                        }
                    }
                }
                true
            }

            Stage::Split(idx, mut iter) => {
                match iter.next() {
                    Some((a, b)) => {
                        let spaced = format!("{a} {b}");
                        if let Some(text) = self.handle(&spaced, false) {
                            self.pending.push_back(text);
                        }
                        if self.use_dash {
                            let dashed = format!("{a}-{b}");
                            if let Some(text) = self.handle(&dashed, false) {
                                self.pending.push_back(text);
                            }
                        }
                        self.stage = Stage::Split(idx, iter);
                    }
                    None => {
                        self.stage = Stage::Top(idx + 1);
                    }
                }
                true
            }

            Stage::NgramPrep => {
                let known: Vec<String> = self.handled.iter().map(|s| s.to_lowercase()).collect();
                let candidates = ngram::ngram_suggest(self.aff, self.dic, &self.word.to_lowercase(), &known);
                self.stage = Stage::Ngram(candidates.into_iter());
                true
            }

            Stage::Ngram(mut iter) => {
                if self.ngram_emitted >= self.max_ngram {
                    self.stage = Stage::PhonetPrep;
                    return true;
                }
                match iter.next() {
                    Some(candidate) => {
                        if let Some(text) = self.handle(&candidate, true) {
                            self.ngram_emitted += 1;
                            self.pending.push_back(text);
                        }
                        self.stage = Stage::Ngram(iter);
                    }
                    None => {
                        self.stage = Stage::PhonetPrep;
                    }
                }
                true
            }

            Stage::PhonetPrep => {
                self.stage = if self.aff.phonet_table.is_empty() {
                    Stage::Done
                } else {
                    Stage::Phonet(phonet::phonet_suggest(self.aff, self.dic, self.word).into_iter())
                };
                true
            }

            Stage::Phonet(mut iter) => {
                if self.phonet_emitted >= MAX_PHONET_SUGGESTIONS {
                    self.stage = Stage::Done;
                    return true;
                }
                match iter.next() {
                    Some(candidate) => {
                        if let Some(text) = self.handle(&candidate, true) {
                            self.phonet_emitted += 1;
                            self.pending.push_back(text);
                        }
                        self.stage = Stage::Phonet(iter);
                    }
                    None => {
                        self.stage = Stage::Done;
                    }
                }
                true
            }

            Stage::Done => false,
        }
    }
}

impl<'a> Iterator for SuggestIter<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(text) = self.pending.pop_front() {
                return Some(text);
            }
            if !self.advance() {
                return None;
            }
        }
    }
}

/// Good permutations: uppercase the word, plus `REP`-table replacements.
fn good_permutations(aff: &Aff, word: &str) -> Vec<String> {
    let casing = CasingVariant::select(aff.lang.as_deref(), aff.check_sharps);
    let mut out = vec![casing.upper(word)];
    out.extend(permutations::replchars(word, &aff.rep_table));
    out
}

/// Questionable permutations: every entry in the spec.md §4.4 table except
/// the two "very good" two-word variants, which the caller handles directly
/// (they need independent lookup of each half, not a single candidate).
fn questionable_permutations(aff: &Aff, word: &str) -> Vec<String> {
    let mut out = Vec::new();
    out.extend(permutations::mapchars(word, &aff.map_table));
    out.extend(permutations::swapchar(word));
    out.extend(permutations::longswapchar(word));
    out.extend(permutations::badcharkey(word, &aff.neighbor_keys.join("|")));
    out.extend(permutations::extrachar(word));
    out.extend(permutations::forgotchar(word, &aff.try_chars));
    out.extend(permutations::movechar(word));
    out.extend(permutations::badchar(word, &aff.try_chars));
    out.extend(permutations::doubletwochars(word));
    out
}

/// Finalize a found candidate: coerce casing (unless `KEEPCASE` forbids it),
/// re-check forbidden-ness, de-duplicate, optionally suppress near-duplicate
/// substrings, and apply output conversion.
#[allow(clippy::too_many_arguments)]
fn handle_found(
    aff: &Aff,
    dic: &Dic,
    casing: &CasingVariant,
    original_word: &str,
    captype: Captype,
    candidate: &str,
    handled: &mut HashSet<String>,
    is_forbidden: &dyn Fn(&str) -> bool,
    check_inclusion: bool,
) -> Option<String> {
    let mut text = candidate.to_owned();

    let skip_coercion = aff
        .keep_case_flag
        .is_some_and(|flag| dic.homonyms(&text).any(|w| w.has_flag(flag)))
        && !(aff.check_sharps && text.contains('ß'));

    if !skip_coercion {
        let coerced = casing.coerce(&text, captype);
        if coerced != text && is_forbidden(&coerced) {
            // leave text as-is
        } else {
            text = coerced;
        }

        if matches!(captype, Captype::Huh | Captype::HuhInit) {
            if let Some(pos) = text.find(' ') {
                let orig_chars: Vec<char> = original_word.chars().collect();
                let text_chars: Vec<char> = text.chars().collect();
                if pos + 1 < text_chars.len() && pos < orig_chars.len() {
                    let after_space = text_chars[pos + 1];
                    let orig_char = orig_chars[pos];
                    if after_space != orig_char && after_space.to_ascii_uppercase() == orig_char {
                        let mut rebuilt: Vec<char> = text_chars[..=pos].to_vec();
                        rebuilt.push(orig_char);
                        rebuilt.extend_from_slice(&text_chars[pos + 2..]);
                        text = rebuilt.into_iter().collect();
                    }
                }
            }
        }
    }

    if is_forbidden(&text) {
        return None;
    }
    if handled.contains(&text) {
        return None;
    }
    if check_inclusion && handled.iter().any(|prev| text.to_lowercase().contains(&prev.to_lowercase())) {
        return None;
    }

    handled.insert(text.clone());
    Some(apply_conversion(&aff.conv_out, &text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affix::{consolidate, parser_affix::parse_affix};
    use crate::dict::parser_dict::parse_dict;

    fn build(aff_src: &str, dic_src: &str) -> (Aff, Dic) {
        let mut aff = consolidate(parse_affix(aff_src).unwrap()).unwrap();
        let dic = parse_dict(dic_src, &mut aff).unwrap();
        (aff, dic)
    }

    #[test]
    fn suggests_simple_suffix_form() {
        let (aff, dic) = build("SFX S Y 1\nSFX S 0 s .\n", "1\ncat/S\n");
        let out: Vec<String> = suggest(&aff, &dic, "cets").collect();
        assert!(out.iter().any(|s| s == "cats"));
    }

    #[test]
    fn twoword_split_is_very_good() {
        let (aff, dic) = build("SET UTF-8\n", "2\na\nlot\n");
        let out: Vec<String> = suggest(&aff, &dic, "alot").collect();
        assert!(out.iter().any(|s| s == "a lot"));
    }

    #[test]
    fn suggest_iterator_can_be_taken_partially() {
        let (aff, dic) = build("SFX S Y 1\nSFX S 0 s .\n", "1\ncat/S\n");
        let first = suggest(&aff, &dic, "cets").next();
        assert_eq!(first.as_deref(), Some("cats"));
    }
}
