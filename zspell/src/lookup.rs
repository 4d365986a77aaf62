//! Lookup engine: §4.3 of the spec — affix-form generation, compounding by
//! flags and by rules, and the break-decomposition fallback.

use regex::Regex;

use crate::affix::{Aff, Affix, AffixKind, CompoundPos};
use crate::dict::{Dic, Word};
use crate::flag::{Flag, FlagSet};
use crate::morph::casing::CasingVariant;
use crate::morph::form::{AffixForm, CompoundForm};

lazy_static::lazy_static! {
    static ref RE_NUMERIC: Regex = Regex::new(r"^\d+(\.\d+)?$").unwrap();
}

/// Options controlling one `lookup` call (spec.md §4.3).
#[derive(Debug, Clone, Copy, Default)]
pub struct LookupOptions {
    pub check_capitalization: bool,
    pub allow_nosuggest: bool,
    pub allow_break: bool,
}

/// Restrictions passed down to affix-form generation when called from
/// compound context (spec.md §4.3.1).
#[derive(Debug, Clone, Copy, Default)]
struct AffixRestrict {
    required_prefix: Option<Flag>,
    required_suffix: Option<Flag>,
    forbidden: Option<Flag>,
}

const MAX_BREAK_DEPTH: u32 = 10;

/// Top-level entry point: is `word` accepted by the loaded dictionary?
pub fn lookup(aff: &Aff, dic: &Dic, word: &str, opts: LookupOptions) -> bool {
    // 1. Forbidden dominance: every homonym bears FORBIDDENWORD.
    if let Some(forbid) = aff.forbidden_word_flag {
        let mut homonyms = dic.homonyms(word).peekable();
        if homonyms.peek().is_some() && homonyms.clone().all(|w| w.has_flag(forbid)) {
            return false;
        }
    }

    // 2. Input conversion.
    let converted = apply_conversion(&aff.conv_in, word);

    // 3. Strip IGNORE characters.
    let stripped: String = if aff.ignore_chars.is_empty() {
        converted
    } else {
        converted.chars().filter(|c| !aff.ignore_chars.contains(c)).collect()
    };

    if check_core(aff, dic, &stripped, opts) {
        return true;
    }

    // 6. Break decomposition.
    if opts.allow_break {
        return try_break(aff, dic, &stripped, opts, MAX_BREAK_DEPTH);
    }

    false
}

/// The `AffixForm`s that made `word` valid, for [`crate::DictionaryEntry::stems`]/
/// `::analyze`. Tries the plain affix-form search first, then compounding by
/// flags; returns empty for words only accepted via `COMPOUNDRULE` or break
/// decomposition, which have no single-form stem to report.
pub(crate) fn matching_forms<'a>(aff: &'a Aff, dic: &'a Dic, word: &str) -> Vec<AffixForm<'a>> {
    let opts = LookupOptions { check_capitalization: true, allow_nosuggest: true, allow_break: true };
    let converted = apply_conversion(&aff.conv_in, word);
    let stripped: String = if aff.ignore_chars.is_empty() {
        converted
    } else {
        converted.chars().filter(|c| !aff.ignore_chars.contains(c)).collect()
    };
    if stripped.is_empty() {
        return Vec::new();
    }

    let casing = CasingVariant::select(aff.lang.as_deref(), aff.check_sharps);
    let (captype, variants) = casing.variants(&stripped);

    for variant in &variants {
        let forms: Vec<AffixForm<'a>> = generate_affix_forms(aff, dic, variant, AffixRestrict::default())
            .into_iter()
            .filter(|f| form_is_valid(aff, f, captype, opts, false, None))
            .collect();
        if !forms.is_empty() {
            return forms;
        }
        if let Some(compound) = compound_by_flags(aff, dic, variant, 0, captype, opts) {
            return compound.parts;
        }
    }

    Vec::new()
}

/// Steps 4–5 of `lookup`: numeric shortcut, then casing-variant affix/compound search.
fn check_core(aff: &Aff, dic: &Dic, word: &str, opts: LookupOptions) -> bool {
    if word.is_empty() {
        return true;
    }
    if RE_NUMERIC.is_match(word) {
        return true;
    }

    let casing = CasingVariant::select(aff.lang.as_deref(), aff.check_sharps);
    let (captype, variants) = casing.variants(word);

    for variant in &variants {
        if word_accepted(aff, dic, variant, captype, opts) {
            return true;
        }
    }

    // Case-insensitive fallback: an ALL-caps input may match a mixed-case
    // lexicon entry (e.g. "OPENOFFICE.ORG" -> "OpenOffice.org").
    if captype == crate::morph::Captype::All {
        for w in dic.homonyms_lower(&word.to_lowercase()) {
            if affix_form_valid_for_word(aff, word, &w.stem, w, captype, opts, true) {
                return true;
            }
        }
    }

    false
}

fn word_accepted(
    aff: &Aff,
    dic: &Dic,
    variant: &str,
    captype: crate::morph::Captype,
    opts: LookupOptions,
) -> bool {
    for form in generate_affix_forms(aff, dic, variant, AffixRestrict::default()) {
        if form_is_valid(aff, &form, captype, opts, false, None) {
            return true;
        }
    }
    compound_accepted(aff, dic, variant, captype, opts)
}

fn affix_form_valid_for_word(
    aff: &Aff,
    _word: &str,
    stem: &str,
    entry: &Word,
    captype: crate::morph::Captype,
    opts: LookupOptions,
    case_insensitive_fallback: bool,
) -> bool {
    let form = AffixForm::trivial(stem, Some(entry));
    form_is_valid(aff, &form, captype, opts, case_insensitive_fallback, None)
}

pub(crate) fn apply_conversion(table: &[crate::affix::Conversion], word: &str) -> String {
    let mut out = word.to_owned();
    for conv in table {
        out = conv.regex.replace_all(&out, conv.to.as_str()).into_owned();
    }
    out
}

/// §4.3.1 affix-form generation: trivial + de-suffix + de-prefix +
/// cross-product, depth <= 2.
pub(crate) fn generate_affix_forms<'a>(
    aff: &'a Aff,
    dic: &'a Dic,
    word: &str,
    restrict: AffixRestrict,
) -> Vec<AffixForm<'a>> {
    let mut out = Vec::new();
    push_dict_forms(dic, word, None, None, None, None, &mut out);

    // De-suffix (depth 1), with optional chained second suffix (depth 2).
    for (flag, idx) in aff.suffix_trie.lookup(&reverse(word)) {
        if let Some(req) = restrict.required_suffix {
            if req != flag {
                continue;
            }
        }
        if restrict.forbidden == Some(flag) {
            continue;
        }
        let affix = &aff.suffixes[&flag][idx];
        let Some(stem) = affix.strip_from(word) else { continue };

        push_dict_forms(dic, &stem, None, None, Some(affix), None, &mut out);

        for (flag2, idx2) in aff.suffix_trie.lookup(&reverse(&stem)) {
            let affix2 = &aff.suffixes[&flag2][idx2];
            if !affix2.flags.contains(flag) {
                continue;
            }
            let Some(stem2) = affix2.strip_from(&stem) else { continue };
            push_dict_forms(dic, &stem2, None, None, Some(affix), Some(affix2), &mut out);
        }

        if affix.can_combine {
            for (pflag, pidx) in aff.prefix_trie.lookup(&stem) {
                let paffix = &aff.prefixes[&pflag][pidx];
                if !paffix.can_combine {
                    continue;
                }
                let Some(pstem) = paffix.strip_from(&stem) else { continue };
                push_dict_forms(dic, &pstem, Some(paffix), None, Some(affix), None, &mut out);
            }
        }
    }

    // De-prefix (depth 1), with optional chained second prefix if complex
    // prefixes are enabled.
    for (flag, idx) in aff.prefix_trie.lookup(word) {
        if let Some(req) = restrict.required_prefix {
            if req != flag {
                continue;
            }
        }
        if restrict.forbidden == Some(flag) {
            continue;
        }
        let affix = &aff.prefixes[&flag][idx];
        let Some(stem) = affix.strip_from(word) else { continue };

        push_dict_forms(dic, &stem, Some(affix), None, None, None, &mut out);

        if aff.complex_prefixes {
            for (flag2, idx2) in aff.prefix_trie.lookup(&stem) {
                let affix2 = &aff.prefixes[&flag2][idx2];
                if !affix2.flags.contains(flag) {
                    continue;
                }
                let Some(stem2) = affix2.strip_from(&stem) else { continue };
                push_dict_forms(dic, &stem2, Some(affix), Some(affix2), None, None, &mut out);
            }
        }

        if affix.can_combine {
            for (sflag, sidx) in aff.suffix_trie.lookup(&reverse(&stem)) {
                let saffix = &aff.suffixes[&sflag][sidx];
                if !saffix.can_combine {
                    continue;
                }
                let Some(sstem) = saffix.strip_from(&stem) else { continue };
                push_dict_forms(dic, &sstem, Some(affix), None, Some(saffix), None, &mut out);
            }
        }
    }

    out
}

#[allow(clippy::too_many_arguments)]
fn push_dict_forms<'a>(
    dic: &'a Dic,
    stem: &str,
    prefix: Option<&'a Affix>,
    secondary_prefix: Option<&'a Affix>,
    suffix: Option<&'a Affix>,
    secondary_suffix: Option<&'a Affix>,
    out: &mut Vec<AffixForm<'a>>,
) {
    let surface_text = surface_text_of(stem, prefix, secondary_prefix, suffix, secondary_suffix);
    let mut any = false;
    for entry in dic.homonyms(stem) {
        any = true;
        out.push(AffixForm {
            surface_text: surface_text.clone(),
            stem: stem.to_owned(),
            prefix,
            secondary_prefix,
            suffix,
            secondary_suffix,
            dictionary_entry: Some(entry),
        });
    }
    if !any && prefix.is_none() && secondary_prefix.is_none() && suffix.is_none() && secondary_suffix.is_none() {
        out.push(AffixForm::trivial(stem, None));
    }
}

fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

/// Reconstruct the surface string implied by a stem plus its affixes
/// (spec.md §3's `AffixForm` invariant: `prefix.append · secondary_prefix.append
/// · stem · secondary_suffix.append · suffix.append`).
fn surface_text_of(
    stem: &str,
    prefix: Option<&Affix>,
    secondary_prefix: Option<&Affix>,
    suffix: Option<&Affix>,
    secondary_suffix: Option<&Affix>,
) -> String {
    let mut out = String::new();
    if let Some(p) = prefix {
        out.push_str(&p.append);
    }
    if let Some(p) = secondary_prefix {
        out.push_str(&p.append);
    }
    out.push_str(stem);
    if let Some(s) = secondary_suffix {
        out.push_str(&s.append);
    }
    if let Some(s) = suffix {
        out.push_str(&s.append);
    }
    out
}

/// §4.3.2 validity predicate for an affix form bound to a dictionary entry.
///
/// `compoundpos` is `None` when checking the word as a standalone entry and
/// `Some(_)` when checking it as one part of a compound; `ONLYINCOMPOUND`
/// only rejects in the standalone case (spylls `lookup.py:707-722`), since
/// the flag's entire purpose is to mark stems usable only inside compounds.
fn form_is_valid(
    aff: &Aff,
    form: &AffixForm<'_>,
    input_captype: crate::morph::Captype,
    opts: LookupOptions,
    case_insensitive_fallback: bool,
    compoundpos: Option<CompoundPos>,
) -> bool {
    let Some(entry) = form.dictionary_entry else {
        return false;
    };

    if !opts.allow_nosuggest {
        if let Some(flag) = aff.nosuggest_flag {
            if entry.has_flag(flag) {
                return false;
            }
        }
    }

    let casing = CasingVariant::select(aff.lang.as_deref(), aff.check_sharps);
    let dict_captype = entry.captype;
    let is_sharp_s_case = aff.check_sharps && entry.stem.contains('ß');
    if dict_captype != input_captype {
        if let Some(flag) = aff.keep_case_flag {
            if entry.has_flag(flag) && !is_sharp_s_case {
                return false;
            }
        }
        if case_insensitive_fallback
            && !matches!(dict_captype, crate::morph::Captype::No | crate::morph::Captype::All)
            && input_captype != crate::morph::Captype::All
        {
            return false;
        }
    }
    let _ = casing;

    if let Some(flag) = aff.needaffix_flag {
        if entry.has_flag(flag) {
            if !form.has_affixes() {
                return false;
            }
            if form.affixes().all(|a| a.flags.contains(flag)) {
                return false;
            }
        }
    }

    if let Some(prefix) = form.prefix.or(form.secondary_prefix) {
        let union = union_flags(entry, form);
        if !union.contains(prefix.flag) {
            return false;
        }
    }
    if let Some(suffix) = form.suffix.or(form.secondary_suffix) {
        let union = union_flags(entry, form);
        if !union.contains(suffix.flag) {
            return false;
        }
    }

    if let Some(circumfix) = aff.circumfix_flag {
        let prefix_has = form.prefix.is_some_and(|p| p.flags.contains(circumfix));
        let suffix_has = form.suffix.is_some_and(|s| s.flags.contains(circumfix));
        if prefix_has != suffix_has {
            return false;
        }
    }

    if compoundpos.is_none() {
        if let Some(only) = aff.compound_only_flag {
            if entry.has_flag(only) {
                return false;
            }
        }
    }

    true
}

fn union_flags(entry: &Word, form: &AffixForm<'_>) -> FlagSet {
    let mut out = entry.flags.clone();
    for a in form.affixes() {
        out = out.union_with(&a.flags);
    }
    out
}

/// Is this form valid when occupying compound position `pos`?
fn form_is_valid_in_compound(
    aff: &Aff,
    form: &AffixForm<'_>,
    pos: CompoundPos,
    input_captype: crate::morph::Captype,
    opts: LookupOptions,
) -> bool {
    if !form_is_valid(aff, form, input_captype, opts, false, Some(pos)) {
        return false;
    }
    let Some(entry) = form.dictionary_entry else { return false };
    let union = union_flags(entry, form);
    if let Some(flag) = aff.compound_flag {
        if union.contains(flag) {
            return true;
        }
    }
    if let Some(flag) = aff.position_flag(pos) {
        return union.contains(flag);
    }
    false
}

/// §4.3.3 compounding by flags: recursive left-to-right splitter.
fn compound_by_flags<'a>(
    aff: &'a Aff,
    dic: &'a Dic,
    word: &str,
    depth: u32,
    captype: crate::morph::Captype,
    opts: LookupOptions,
) -> Option<CompoundForm<'a>> {
    if depth > 0 {
        let restrict = AffixRestrict {
            required_prefix: aff.compound_permit_flag,
            forbidden: aff.compound_forbid_flag,
            ..AffixRestrict::default()
        };
        for form in generate_affix_forms(aff, dic, word, restrict) {
            if form_is_valid_in_compound(aff, &form, CompoundPos::End, captype, opts) {
                return Some(CompoundForm { parts: vec![form] });
            }
        }
    }

    let within_budget = aff
        .compound_word_max
        .map_or(true, |max| depth < max);
    let min = aff.compound_min as usize;
    if word.chars().count() < 2 * min || !within_budget {
        return None;
    }

    let chars: Vec<char> = word.chars().collect();
    for split in min..=(chars.len() - min) {
        let left: String = chars[..split].iter().collect();
        let right: String = chars[split..].iter().collect();
        let pos = if depth == 0 { CompoundPos::Begin } else { CompoundPos::Middle };

        let restrict = AffixRestrict {
            required_suffix: aff.compound_permit_flag,
            required_prefix: (depth > 0).then_some(aff.compound_permit_flag).flatten(),
            forbidden: aff.compound_forbid_flag,
        };

        let mut left_forms = generate_affix_forms(aff, dic, &left, restrict);
        // SIMPLIFIEDTRIPLE: a triple at the junction (e.g. "glass" + "ship")
        // may have been simplified to two letters in the compound's surface
        // form, so also try the stem with its boundary letter doubled back.
        if aff.simplified_triple {
            if let (Some(lc), Some(rc)) = (left.chars().last(), right.chars().next()) {
                if lc == rc {
                    let tripled = format!("{left}{lc}");
                    left_forms.extend(generate_affix_forms(aff, dic, &tripled, restrict));
                }
            }
        }

        for left_form in left_forms {
            if !form_is_valid_in_compound(aff, &left_form, pos, captype, opts) {
                continue;
            }
            if let Some(mut rest) = compound_by_flags(aff, dic, &right, depth + 1, captype, opts) {
                if bad_compound_pair(aff, dic, opts, &left_form, &rest.parts[0], captype) {
                    continue;
                }
                let mut parts = vec![left_form];
                parts.append(&mut rest.parts);
                return Some(CompoundForm { parts });
            }
        }
    }

    None
}

/// §4.3.5 bad-compound predicate, checked on every adjacent pair.
fn bad_compound_pair(
    aff: &Aff,
    dic: &Dic,
    opts: LookupOptions,
    left: &AffixForm<'_>,
    right: &AffixForm<'_>,
    captype: crate::morph::Captype,
) -> bool {
    let (Some(le), Some(re)) = (left.dictionary_entry, right.dictionary_entry) else {
        return false;
    };

    if let Some(flag) = aff.force_ucase_flag {
        if !matches!(captype, crate::morph::Captype::All | crate::morph::Captype::Init)
            && re.has_flag(flag)
        {
            return true;
        }
    }

    if let Some(flag) = aff.compound_forbid_flag {
        if le.has_flag(flag) {
            return true;
        }
    }

    // The pair is itself a listed space-separated entry (e.g. "foo bar").
    let spaced = format!("{} {}", left.surface_text, right.surface_text);
    if generate_affix_forms(aff, dic, &spaced, AffixRestrict::default())
        .iter()
        .any(|f| form_is_valid(aff, f, captype, opts, false, None))
    {
        return true;
    }

    if aff.check_compound_rep {
        let joined = format!("{}{}", left.surface_text, right.surface_text);
        for rule in &aff.rep_table {
            if !rule.regex.is_match(&joined) {
                continue;
            }
            let candidate = rule.regex.replace_all(&joined, rule.replacement.as_str()).into_owned();
            if generate_affix_forms(aff, dic, &candidate, AffixRestrict::default())
                .iter()
                .any(|f| form_is_valid(aff, f, captype, opts, false, None))
            {
                return true;
            }
        }
    }

    if aff.check_compound_triple {
        if let (Some(lc), Some(rc)) = (left.stem.chars().last(), right.stem.chars().next()) {
            if lc == rc {
                let mut tail = left.stem.chars().rev();
                let a = tail.next();
                let b = tail.next();
                if a == b && a == Some(rc) {
                    return true;
                }
                let mut head = right.stem.chars();
                let a = head.next();
                let b = head.next();
                if a == Some(lc) && b == Some(lc) {
                    return true;
                }
            }
        }
    }

    if aff.check_compound_case {
        let l_upper = left.stem.chars().last().is_some_and(char::is_uppercase);
        let r_upper = right.stem.chars().next().is_some_and(char::is_uppercase);
        if l_upper || r_upper {
            return true;
        }
    }

    for pattern in &aff.compound_patterns {
        if left.stem.ends_with(pattern.left_tail.as_str())
            && right.stem.starts_with(pattern.right_head.as_str())
        {
            return true;
        }
    }

    if aff.check_compound_dup && le.stem.eq_ignore_ascii_case(&re.stem) {
        return true;
    }

    false
}

fn compound_accepted(
    aff: &Aff,
    dic: &Dic,
    word: &str,
    captype: crate::morph::Captype,
    opts: LookupOptions,
) -> bool {
    if aff.compound_flag.is_none()
        && aff.compound_begin_flag.is_none()
        && aff.compound_rules.is_empty()
    {
        return false;
    }
    if let Some(form) = compound_by_flags(aff, dic, word, 0, captype, opts) {
        let _ = form;
        return true;
    }
    compound_by_rules(aff, dic, word).is_some()
}

/// §4.3.4 compounding by rules: split on every position, check whether any
/// `COMPOUNDRULE` regex can still match the accumulated flag-character
/// sequence, prune when none can.
fn compound_by_rules(aff: &Aff, dic: &Dic, word: &str) -> Option<Vec<String>> {
    if aff.compound_rules.is_empty() {
        return None;
    }
    rules_recurse(aff, dic, word, &mut Vec::new())
}

fn rules_recurse(aff: &Aff, dic: &Dic, rest: &str, acc: &mut Vec<Flag>) -> Option<Vec<String>> {
    if rest.is_empty() {
        if aff.compound_rules.iter().any(|r| r.regex.is_match(&flags_to_key(aff, acc))) {
            return Some(Vec::new());
        }
        return None;
    }

    let chars: Vec<char> = rest.chars().collect();
    for split in 1..=chars.len() {
        let piece: String = chars[..split].iter().collect();
        let remainder: String = chars[split..].iter().collect();

        for entry in dic.homonyms(&piece) {
            for flag in entry.flags.iter() {
                acc.push(flag);
                if let Some(mut tail) = rules_recurse(aff, dic, &remainder, acc) {
                    let mut out = vec![piece.clone()];
                    out.append(&mut tail);
                    acc.pop();
                    return Some(out);
                }
                acc.pop();
            }
        }
    }

    None
}

fn flags_to_key(aff: &Aff, flags: &[Flag]) -> String {
    flags.iter().map(|f| aff.flag_alphabet.token_of(*f)).collect()
}

/// §4.8 break handling: recursively try every decomposition reachable by
/// `BREAK` patterns, up to `MAX_BREAK_DEPTH`.
fn try_break(aff: &Aff, dic: &Dic, word: &str, opts: LookupOptions, depth: u32) -> bool {
    if depth == 0 {
        return false;
    }
    let patterns: Vec<&str> = if aff.break_patterns.is_empty() {
        vec!["-", "^-", "-$"]
    } else {
        aff.break_patterns.iter().map(String::as_str).collect()
    };

    for pat in patterns {
        for (left, right) in split_candidates(word, pat) {
            let left_ok = left.is_empty() || check_core(aff, dic, &left, opts) || try_break(aff, dic, &left, opts, depth - 1);
            if !left_ok {
                continue;
            }
            let right_ok = right.is_empty() || check_core(aff, dic, &right, opts) || try_break(aff, dic, &right, opts, depth - 1);
            if right_ok {
                return true;
            }
        }
    }
    false
}

fn split_candidates(word: &str, pattern: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    if let Some(lit) = pattern.strip_prefix('^') {
        if let Some(rest) = word.strip_prefix(lit) {
            out.push((String::new(), rest.to_owned()));
        }
        return out;
    }
    if let Some(lit) = pattern.strip_suffix('$') {
        if let Some(rest) = word.strip_suffix(lit) {
            out.push((rest.to_owned(), String::new()));
        }
        return out;
    }
    let mut start = 0;
    while let Some(pos) = word[start..].find(pattern) {
        let idx = start + pos;
        out.push((word[..idx].to_owned(), word[idx + pattern.len()..].to_owned()));
        start = idx + pattern.len().max(1);
        if start > word.len() {
            break;
        }
    }
    out
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
    fn accepts_exact_stem() {
        let (aff, dic) = build("SET UTF-8\n", "1\nhello\n");
        assert!(lookup(&aff, &dic, "hello", LookupOptions::default()));
        assert!(!lookup(&aff, &dic, "goodbye", LookupOptions::default()));
    }

    #[test]
    fn accepts_numeric_strings() {
        let (aff, dic) = build("SET UTF-8\n", "1\nhello\n");
        assert!(lookup(&aff, &dic, "123", LookupOptions::default()));
        assert!(lookup(&aff, &dic, "12.5", LookupOptions::default()));
    }

    #[test]
    fn accepts_simple_suffix_form() {
        let (aff, dic) = build("SFX S Y 1\nSFX S 0 s .\n", "1\ncat/S\n");
        assert!(lookup(&aff, &dic, "cats", LookupOptions::default()));
    }

    #[test]
    fn forbidden_word_is_rejected() {
        let (aff, dic) = build("FORBIDDENWORD X\n", "1\nbadword/X\n");
        assert!(!lookup(&aff, &dic, "badword", LookupOptions::default()));
    }
}
