//! The parse-tree node type produced by each directive muncher in
//! [`super`]. `AffixNode` is transient: [`crate::affix::consolidate`] folds a
//! `Vec<AffixNode>` into the final, immutable [`crate::affix::Aff`] and
//! nothing downstream of parsing ever sees an `AffixNode` again.

use crate::affix::types::{
    CompoundPattern, CompoundSyllable, Conversion, Encoding, Phonetic, RuleGroup,
};
use crate::flag::FlagEncoding;

#[derive(Debug, Clone)]
pub enum AffixNode {
    Comment,
    Encoding(Encoding),
    FlagEncoding(FlagEncoding),
    ComplexPrefixes,
    Language(String),
    IgnoreChars(Vec<char>),
    AffixAlias(Vec<String>),
    MorphAlias(Vec<String>),
    NeighborKeys(Vec<String>),
    TryCharacters(String),
    NoSuggestFlag(char),
    CompoundSugMax(u32),
    NGramSugMax(u32),
    NGramDiffMax(i32),
    NGramLimitToDiffMax,
    NoSplitSuggestions,
    KeepTermDots,
    Replacement(Vec<Conversion>),
    Mapping(Vec<(char, char)>),
    Phonetic(Vec<Phonetic>),
    WarnRareFlag(char),
    ForbidWarnWords,
    BreakSeparator(Vec<String>),
    CompoundRule(Vec<String>),
    CompoundMinLen(u32),
    CompoundFlag(char),
    CompoundBeginFlag(char),
    CompoundEndFlag(char),
    CompoundMiddleFlag(char),
    CompoundOnlyFlag(char),
    CompoundPermitFlag(char),
    CompoundForbidFlag(char),
    CompoundMoreSuffixes,
    CompoundRoot(char),
    CompoundWordMax(u32),
    CompoundForbidDup,
    CompoundForbidRepeat,
    CompoundCheckCase,
    CompoundCheckTriple,
    CompoundSimplifyTriple,
    CompoundForbidPats(Vec<CompoundPattern>),
    CompoundForceUpper(char),
    CompoundSyllable(CompoundSyllable),
    SyllableNum(String),
    Prefix(RuleGroup),
    Suffix(RuleGroup),
    AfxCircumfixFlag(char),
    ForbiddenWordFlag(char),
    AfxFullStrip,
    AfxKeepCaseFlag(char),
    AfxInputConversion(Vec<Conversion>),
    AfxOutputConversion(Vec<Conversion>),
    AfxLemmaPresentFlag(char),
    AfxNeededFlag(char),
    AfxPseudoRootFlag(char),
    AfxSubstandardFlag(char),
    AfxWordChars(String),
    AfxCheckSharps,
    Name(String),
    HomePage(String),
    Version(String),
}
