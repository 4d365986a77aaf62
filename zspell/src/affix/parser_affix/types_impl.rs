//! Small trait impls for [`super::types::AffixNode`] kept separate from its
//! definition, matching the split this crate uses elsewhere between a data
//! type and its behavior.

use std::fmt;

use super::types::AffixNode;

impl AffixNode {
    /// Directive name, for trace logging during parsing.
    pub(crate) fn directive_name(&self) -> &'static str {
        match self {
            Self::Comment => "#",
            Self::Encoding(_) => "SET",
            Self::FlagEncoding(_) => "FLAG",
            Self::ComplexPrefixes => "COMPLEXPREFIXES",
            Self::Language(_) => "LANG",
            Self::IgnoreChars(_) => "IGNORE",
            Self::AffixAlias(_) => "AF",
            Self::MorphAlias(_) => "AM",
            Self::NeighborKeys(_) => "KEY",
            Self::TryCharacters(_) => "TRY",
            Self::NoSuggestFlag(_) => "NOSUGGEST",
            Self::CompoundSugMax(_) => "MAXCPDSUGS",
            Self::NGramSugMax(_) => "MAXNGRAMSUGS",
            Self::NGramDiffMax(_) => "MAXDIFF",
            Self::NGramLimitToDiffMax => "ONLYMAXDIFF",
            Self::NoSplitSuggestions => "NOSPLITSUGS",
            Self::KeepTermDots => "SUGSWITHDOTS",
            Self::Replacement(_) => "REP",
            Self::Mapping(_) => "MAP",
            Self::Phonetic(_) => "PHONE",
            Self::WarnRareFlag(_) => "WARN",
            Self::ForbidWarnWords => "FORBIDWARN",
            Self::BreakSeparator(_) => "BREAK",
            Self::CompoundRule(_) => "COMPOUNDRULE",
            Self::CompoundMinLen(_) => "COMPOUNDMIN",
            Self::CompoundFlag(_) => "COMPOUNDFLAG",
            Self::CompoundBeginFlag(_) => "COMPOUNDBEGIN",
            Self::CompoundEndFlag(_) => "COMPOUNDEND",
            Self::CompoundMiddleFlag(_) => "COMPOUNDMIDDLE",
            Self::CompoundOnlyFlag(_) => "ONLYINCOMPOUND",
            Self::CompoundPermitFlag(_) => "COMPOUNDPERMITFLAG",
            Self::CompoundForbidFlag(_) => "COMPOUNDFORBIDFLAG",
            Self::CompoundMoreSuffixes => "COMPOUNDMORESUFFIXES",
            Self::CompoundRoot(_) => "COMPOUNDROOT",
            Self::CompoundWordMax(_) => "COMPOUNDWORDMAX",
            Self::CompoundForbidDup => "CHECKCOMPOUNDDUP",
            Self::CompoundForbidRepeat => "CHECKCOMPOUNDREP",
            Self::CompoundCheckCase => "CHECKCOMPOUNDCASE",
            Self::CompoundCheckTriple => "CHECKCOMPOUNDTRIPLE",
            Self::CompoundSimplifyTriple => "SIMPLIFIEDTRIPLE",
            Self::CompoundForbidPats(_) => "CHECKCOMPOUNDPATTERN",
            Self::CompoundForceUpper(_) => "FORCEUCASE",
            Self::CompoundSyllable(_) => "COMPOUNDSYLLABLE",
            Self::SyllableNum(_) => "SYLLABLENUM",
            Self::Prefix(_) => "PFX",
            Self::Suffix(_) => "SFX",
            Self::AfxCircumfixFlag(_) => "CIRCUMFIX",
            Self::ForbiddenWordFlag(_) => "FORBIDDENWORD",
            Self::AfxFullStrip => "FULLSTRIP",
            Self::AfxKeepCaseFlag(_) => "KEEPCASE",
            Self::AfxInputConversion(_) => "ICONV",
            Self::AfxOutputConversion(_) => "OCONV",
            Self::AfxLemmaPresentFlag(_) => "LEMMA_PRESENT",
            Self::AfxNeededFlag(_) => "NEEDAFFIX",
            Self::AfxPseudoRootFlag(_) => "PSEUDOROOT",
            Self::AfxSubstandardFlag(_) => "SUBSTANDARD",
            Self::AfxWordChars(_) => "WORDCHARS",
            Self::AfxCheckSharps => "CHECKSHARPS",
            Self::Name(_) => "NAME",
            Self::HomePage(_) => "HOME",
            Self::Version(_) => "VERSION",
        }
    }
}

impl fmt::Display for AffixNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.directive_name())
    }
}
