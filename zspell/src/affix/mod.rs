//! Compiled affix configuration: the immutable bundle every lookup and
//! suggest query reads from. [`parser_affix::parse_affix`] produces a
//! `Vec<AffixNode>`; [`consolidate`] folds that into the `Aff` this module
//! exposes.

pub(crate) mod condition;
pub(crate) mod parser_affix;
pub(crate) mod trie;
pub(crate) mod types;

use hashbrown::HashMap;
use regex::Regex;

use self::condition::Condition;
use self::parser_affix::types::AffixNode;
use self::trie::AffixTrie;
pub use self::types::{
    AffixKind, Conversion, CompoundPattern, CompoundSyllable, Encoding, MorphInfo, Phonetic,
};
use crate::error::{ParseError, ParseErrorType};
use crate::flag::{Flag, FlagAlphabet, FlagEncoding, FlagSet};

/// One compiled prefix or suffix rule: the raw table row plus the derived
/// matcher for "does a candidate stem satisfy this rule's condition".
#[derive(Debug, Clone)]
pub struct Affix {
    pub kind: AffixKind,
    pub flag: Flag,
    pub can_combine: bool,
    pub strip: String,
    pub append: String,
    pub condition: Condition,
    pub flags: FlagSet,
    pub morph_info: Vec<MorphInfo>,
}

impl Affix {
    /// Does `stem` (the text left over after stripping `self.strip` from the
    /// appropriate end) satisfy `self.condition`?
    pub fn stem_satisfies(&self, stem: &str) -> bool {
        match self.kind {
            AffixKind::Suffix => self.condition.matches_suffix_side(stem),
            AffixKind::Prefix => self.condition.matches_prefix_side(stem),
        }
    }

    /// Attempt to strip this affix from `word`, returning the resulting stem
    /// if `word` ends/begins with `append` and the remaining text satisfies
    /// `condition`.
    pub fn strip_from(&self, word: &str) -> Option<String> {
        match self.kind {
            AffixKind::Suffix => {
                let body = word.strip_suffix(self.append.as_str())?;
                let stem = format!("{body}{}", self.strip);
                self.stem_satisfies(&stem).then_some(stem)
            }
            AffixKind::Prefix => {
                let body = word.strip_prefix(self.append.as_str())?;
                let stem = format!("{}{body}", self.strip);
                self.stem_satisfies(&stem).then_some(stem)
            }
        }
    }
}

/// A single `REP`-table (or `ph:`-derived) rewrite: `from` compiled as a
/// regex so anchors (`^`, `$`) work, `to` substituted literally.
#[derive(Debug, Clone)]
pub struct RepRule {
    pub regex: Regex,
    pub replacement: String,
}

/// A compiled `COMPOUNDRULE` expression: the original flag-pattern text plus
/// the regex run over a one-character-per-part encoding (see
/// [`crate::lookup::compound_rule_regex`]).
#[derive(Debug, Clone)]
pub struct CompoundRule {
    pub pattern: String,
    pub regex: Regex,
}

/// Which position in a compound a part occupies; governs which
/// position-specific flag (`COMPOUNDBEGIN`/`MIDDLE`/`END`) is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundPos {
    Begin,
    Middle,
    End,
}

/// The complete, immutable affix configuration: scalar options plus every
/// compiled table. `Dictionary` owns one of these behind an `Arc`; queries
/// never mutate it.
#[derive(Debug, Default)]
pub struct Aff {
    pub encoding: Encoding,
    pub flag_alphabet: FlagAlphabet,
    pub lang: Option<String>,
    pub ignore_chars: Vec<char>,
    pub word_chars: Option<String>,
    pub check_sharps: bool,
    pub complex_prefixes: bool,
    pub full_strip: bool,

    pub prefixes: HashMap<Flag, Vec<Affix>>,
    pub suffixes: HashMap<Flag, Vec<Affix>>,
    pub prefix_trie: AffixTrie<(Flag, usize)>,
    pub suffix_trie: AffixTrie<(Flag, usize)>,

    pub try_chars: String,
    pub neighbor_keys: Vec<String>,
    pub nosuggest_flag: Option<Flag>,
    pub warn_rare_flag: Option<Flag>,
    pub keep_case_flag: Option<Flag>,
    pub needaffix_flag: Option<Flag>,
    pub circumfix_flag: Option<Flag>,
    pub forbidden_word_flag: Option<Flag>,
    pub no_split_suggestions: bool,
    pub keep_term_dots: bool,

    pub rep_table: Vec<RepRule>,
    pub map_table: Vec<Vec<char>>,
    pub conv_in: Vec<Conversion>,
    pub conv_out: Vec<Conversion>,
    pub phonet_table: Vec<Phonetic>,

    pub break_patterns: Vec<String>,
    pub compound_rules: Vec<CompoundRule>,
    pub compound_min: u32,
    pub compound_word_max: Option<u32>,
    pub compound_flag: Option<Flag>,
    pub compound_begin_flag: Option<Flag>,
    pub compound_middle_flag: Option<Flag>,
    pub compound_end_flag: Option<Flag>,
    pub compound_only_flag: Option<Flag>,
    pub compound_permit_flag: Option<Flag>,
    pub compound_forbid_flag: Option<Flag>,
    pub compound_more_suffixes: bool,
    pub compound_patterns: Vec<CompoundPattern>,
    pub force_ucase_flag: Option<Flag>,
    pub check_compound_case: bool,
    pub check_compound_dup: bool,
    pub check_compound_rep: bool,
    pub check_compound_triple: bool,
    pub simplified_triple: bool,
    pub compound_syllable: Option<CompoundSyllable>,

    pub max_compound_suggestions: u32,
    pub max_ngram_suggestions: u32,
    pub max_ngram_diff: i32,
    pub only_max_diff: bool,

    pub affix_aliases: Vec<Vec<String>>,
    pub morph_aliases: Vec<Vec<String>>,
}

impl Aff {
    /// Compound position a part occupies given its index and total count.
    pub fn compound_position(idx: usize, len: usize) -> CompoundPos {
        if idx == 0 {
            CompoundPos::Begin
        } else if idx + 1 == len {
            CompoundPos::End
        } else {
            CompoundPos::Middle
        }
    }

    pub fn position_flag(&self, pos: CompoundPos) -> Option<Flag> {
        match pos {
            CompoundPos::Begin => self.compound_begin_flag,
            CompoundPos::Middle => self.compound_middle_flag,
            CompoundPos::End => self.compound_end_flag,
        }
    }

    /// Intern a raw flag token, growing the alphabet if necessary. Used both
    /// during consolidation and while folding in dictionary-entry flags.
    pub fn intern_flag(&mut self, token: &str) -> Flag {
        self.flag_alphabet.intern(token)
    }

    pub fn intern_flag_set(&mut self, raw: &str) -> FlagSet {
        self.flag_alphabet.intern_set(raw)
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::Utf8
    }
}

/// Fold the flat `Vec<AffixNode>` produced by the directive parser into a
/// compiled [`Aff`], building the prefix/suffix tries and compiling
/// conditions, compound rules, and rep/phonet tables as it goes.
pub(crate) fn consolidate(nodes: Vec<AffixNode>) -> Result<Aff, ParseError> {
    let mut encoding = Encoding::Utf8;
    let mut flag_encoding = FlagEncoding::Short;

    // FLAG/SET may appear anywhere but govern how every other flag-bearing
    // directive is interned, so resolve them first.
    for node in &nodes {
        match node {
            AffixNode::Encoding(e) => encoding = e.clone(),
            AffixNode::FlagEncoding(fe) => flag_encoding = *fe,
            _ => {}
        }
    }

    let mut aff = Aff {
        encoding,
        flag_alphabet: FlagAlphabet::new(flag_encoding),
        compound_min: 3,
        ..Aff::default()
    };

    // PFX/SFX rule groups, collected before trie construction so the trie
    // can store a stable `(flag, index-into-vec)` payload.
    let mut prefix_groups: Vec<types::RuleGroup> = Vec::new();
    let mut suffix_groups: Vec<types::RuleGroup> = Vec::new();

    for node in nodes {
        match node {
            AffixNode::Comment
            | AffixNode::Encoding(_)
            | AffixNode::FlagEncoding(_)
            | AffixNode::Name(_)
            | AffixNode::HomePage(_)
            | AffixNode::Version(_) => {}
            AffixNode::ComplexPrefixes => aff.complex_prefixes = true,
            AffixNode::Language(l) => aff.lang = Some(l),
            AffixNode::IgnoreChars(cs) => aff.ignore_chars = cs,
            AffixNode::AffixAlias(v) => aff.affix_aliases.push(v),
            AffixNode::MorphAlias(v) => aff.morph_aliases.push(v),
            AffixNode::NeighborKeys(v) => aff.neighbor_keys = v,
            AffixNode::TryCharacters(s) => aff.try_chars = s,
            AffixNode::NoSuggestFlag(c) => aff.nosuggest_flag = Some(aff.intern_flag(&c.to_string())),
            AffixNode::CompoundSugMax(n) => aff.max_compound_suggestions = n,
            AffixNode::NGramSugMax(n) => aff.max_ngram_suggestions = n,
            AffixNode::NGramDiffMax(n) => aff.max_ngram_diff = n,
            AffixNode::NGramLimitToDiffMax => aff.only_max_diff = true,
            AffixNode::NoSplitSuggestions => aff.no_split_suggestions = true,
            AffixNode::KeepTermDots => aff.keep_term_dots = true,
            AffixNode::Replacement(v) => {
                for c in v {
                    aff.rep_table.push(RepRule {
                        regex: c.regex,
                        replacement: c.to,
                    });
                }
            }
            AffixNode::Mapping(v) => {
                // Each MAP entry declares exactly one interchangeable pair;
                // merge pairs that share a character into one group.
                for (a, b) in v {
                    if let Some(group) = aff
                        .map_table
                        .iter_mut()
                        .find(|g| g.contains(&a) || g.contains(&b))
                    {
                        if !group.contains(&a) {
                            group.push(a);
                        }
                        if !group.contains(&b) {
                            group.push(b);
                        }
                    } else {
                        aff.map_table.push(vec![a, b]);
                    }
                }
            }
            AffixNode::Phonetic(v) => aff.phonet_table = v,
            AffixNode::WarnRareFlag(c) => aff.warn_rare_flag = Some(aff.intern_flag(&c.to_string())),
            AffixNode::ForbidWarnWords => {}
            AffixNode::BreakSeparator(v) => aff.break_patterns = v,
            AffixNode::CompoundRule(v) => {
                for pat in v {
                    let regex = compound_rule_to_regex(&pat)
                        .map_err(|e| ParseError::new_nospan(ParseErrorType::AffixBody(e)))?;
                    aff.compound_rules.push(CompoundRule { pattern: pat, regex });
                }
            }
            AffixNode::CompoundMinLen(n) => aff.compound_min = n,
            AffixNode::CompoundFlag(c) => aff.compound_flag = Some(aff.intern_flag(&c.to_string())),
            AffixNode::CompoundBeginFlag(c) => {
                aff.compound_begin_flag = Some(aff.intern_flag(&c.to_string()));
            }
            AffixNode::CompoundEndFlag(c) => {
                aff.compound_end_flag = Some(aff.intern_flag(&c.to_string()));
            }
            AffixNode::CompoundMiddleFlag(c) => {
                aff.compound_middle_flag = Some(aff.intern_flag(&c.to_string()));
            }
            AffixNode::CompoundOnlyFlag(c) => {
                aff.compound_only_flag = Some(aff.intern_flag(&c.to_string()));
            }
            AffixNode::CompoundPermitFlag(c) => {
                aff.compound_permit_flag = Some(aff.intern_flag(&c.to_string()));
            }
            AffixNode::CompoundForbidFlag(c) => {
                aff.compound_forbid_flag = Some(aff.intern_flag(&c.to_string()));
            }
            AffixNode::CompoundMoreSuffixes => aff.compound_more_suffixes = true,
            AffixNode::CompoundRoot(_) => {}
            AffixNode::CompoundWordMax(n) => aff.compound_word_max = Some(n),
            AffixNode::CompoundForbidDup => aff.check_compound_dup = true,
            AffixNode::CompoundForbidRepeat => aff.check_compound_rep = true,
            AffixNode::CompoundCheckCase => aff.check_compound_case = true,
            AffixNode::CompoundCheckTriple => aff.check_compound_triple = true,
            AffixNode::CompoundSimplifyTriple => aff.simplified_triple = true,
            AffixNode::CompoundForbidPats(v) => aff.compound_patterns = v,
            AffixNode::CompoundForceUpper(c) => aff.force_ucase_flag = Some(aff.intern_flag(&c.to_string())),
            AffixNode::CompoundSyllable(cs) => aff.compound_syllable = Some(cs),
            AffixNode::SyllableNum(_) => {}
            AffixNode::Prefix(g) => prefix_groups.push(g),
            AffixNode::Suffix(g) => suffix_groups.push(g),
            AffixNode::AfxCircumfixFlag(c) => aff.circumfix_flag = Some(aff.intern_flag(&c.to_string())),
            AffixNode::ForbiddenWordFlag(c) => {
                aff.forbidden_word_flag = Some(aff.intern_flag(&c.to_string()));
            }
            AffixNode::AfxFullStrip => aff.full_strip = true,
            AffixNode::AfxKeepCaseFlag(c) => aff.keep_case_flag = Some(aff.intern_flag(&c.to_string())),
            AffixNode::AfxInputConversion(v) => aff.conv_in = v,
            AffixNode::AfxOutputConversion(v) => aff.conv_out = v,
            AffixNode::AfxLemmaPresentFlag(_) => {}
            AffixNode::AfxNeededFlag(c) => aff.needaffix_flag = Some(aff.intern_flag(&c.to_string())),
            AffixNode::AfxPseudoRootFlag(_) | AffixNode::AfxSubstandardFlag(_) => {}
            AffixNode::AfxWordChars(s) => aff.word_chars = Some(s),
            AffixNode::AfxCheckSharps => aff.check_sharps = true,
        }
    }

    for group in prefix_groups {
        compile_rule_group(&mut aff, group, AffixKind::Prefix)?;
    }
    for group in suffix_groups {
        compile_rule_group(&mut aff, group, AffixKind::Suffix)?;
    }

    Ok(aff)
}

fn compile_rule_group(aff: &mut Aff, group: types::RuleGroup, kind: AffixKind) -> Result<(), ParseError> {
    let flag = aff.intern_flag(&group.flag);
    let mut compiled = Vec::with_capacity(group.rules.len());

    for rule in group.rules {
        let strip = rule.stripping_chars.unwrap_or_default();
        let condition = rule
            .condition
            .as_deref()
            .map(Condition::new)
            .unwrap_or_else(Condition::any);

        // An affix's `append` field may carry a `/flags` suffix: flags the
        // resulting surface form additionally inherits, enabling chained
        // affixation (e.g. `SFX M 0 s/XY .`).
        let (append, flags) = match rule.affix.split_once('/') {
            Some((a, f)) => (a.to_owned(), aff.intern_flag_set(f)),
            None => (rule.affix, FlagSet::default()),
        };
        let append = if append == "0" { String::new() } else { append };

        compiled.push(Affix {
            kind,
            flag,
            can_combine: group.can_combine,
            strip,
            append,
            condition,
            flags,
            morph_info: rule.morph_info.unwrap_or_default(),
        });
    }

    let table = match kind {
        AffixKind::Prefix => &mut aff.prefixes,
        AffixKind::Suffix => &mut aff.suffixes,
    };
    let entry = table.entry(flag).or_default();
    let start = entry.len();
    entry.extend(compiled);

    let trie = match kind {
        AffixKind::Prefix => &mut aff.prefix_trie,
        AffixKind::Suffix => &mut aff.suffix_trie,
    };
    for (i, affix) in table[&flag][start..].iter().enumerate() {
        let key: String = match kind {
            AffixKind::Prefix => affix.append.clone(),
            AffixKind::Suffix => affix.append.chars().rev().collect(),
        };
        trie.insert(&key, (flag, start + i));
    }

    Ok(())
}

/// Compile a `COMPOUNDRULE` flag-pattern (`*`/`?` over flag tokens, possibly
/// grouped in parens) into a regex over one-character-per-part strings. Each
/// flag token is mapped to its own private-use code point so the regex
/// engine never confuses a flag character with a literal regex metachar.
pub(crate) fn compound_rule_to_regex(pattern: &str) -> Result<Regex, String> {
    let mut out = String::from("^");
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '(' | ')' | '*' | '?' => out.push(c),
            _ => {
                out.push_str(&regex::escape(&c.to_string()));
            }
        }
    }
    out.push('$');
    Regex::new(&out).map_err(|e| format!("bad COMPOUNDRULE pattern '{pattern}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(src: &str) -> Aff {
        let nodes = parser_affix::parse_affix(src).expect("parse");
        consolidate(nodes).expect("consolidate")
    }

    #[test]
    fn compiles_prefix_table() {
        let aff = build("PFX A Y 1\nPFX A 0 re .\n");
        let flag = aff.flag_alphabet.get("A").unwrap();
        let rules = &aff.prefixes[&flag];
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].append, "re");
        assert!(rules[0].can_combine);
    }

    #[test]
    fn compound_rule_regex_matches_pattern() {
        let aff = build("COMPOUNDRULE 1\nCOMPOUNDRULE A*B\n");
        let rule = &aff.compound_rules[0];
        assert!(rule.regex.is_match("AAAB"));
        assert!(!rule.regex.is_match("BA"));
    }

    #[test]
    fn compound_min_defaults_to_three() {
        let aff = build("SET UTF-8\n");
        assert_eq!(aff.compound_min, 3);
    }
}
