//! Translation target languages.
//!
//! The front-end offers a fixed menu of nine targets. The display name is
//! what the user picks and what the download file is named after
//! (`translate_French.txt`); the code is what the translator receives.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language the translate mode can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TargetLanguage {
    #[default]
    English,
    Telugu,
    Hindi,
    Urdu,
    Arabic,
    French,
    Spanish,
    Tamil,
    Chinese,
}

impl TargetLanguage {
    /// Every target in menu order.
    pub const ALL: [TargetLanguage; 9] = [
        TargetLanguage::English,
        TargetLanguage::Telugu,
        TargetLanguage::Hindi,
        TargetLanguage::Urdu,
        TargetLanguage::Arabic,
        TargetLanguage::French,
        TargetLanguage::Spanish,
        TargetLanguage::Tamil,
        TargetLanguage::Chinese,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Telugu => "Telugu",
            TargetLanguage::Hindi => "Hindi",
            TargetLanguage::Urdu => "Urdu",
            TargetLanguage::Arabic => "Arabic",
            TargetLanguage::French => "French",
            TargetLanguage::Spanish => "Spanish",
            TargetLanguage::Tamil => "Tamil",
            TargetLanguage::Chinese => "Chinese",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TargetLanguage::English => "en",
            TargetLanguage::Telugu => "te",
            TargetLanguage::Hindi => "hi",
            TargetLanguage::Urdu => "ur",
            TargetLanguage::Arabic => "ar",
            TargetLanguage::French => "fr",
            TargetLanguage::Spanish => "es",
            TargetLanguage::Tamil => "ta",
            TargetLanguage::Chinese => "zh-CN",
        }
    }

    /// Look up a target by language code, ignoring case.
    ///
    /// Bare `zh` and the detector-style `zh-cn` both map to Chinese.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.eq_ignore_ascii_case("zh") {
            return Some(TargetLanguage::Chinese);
        }
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code))
    }

    /// Look up a target by display name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).or_else(|| Self::from_code(s)).ok_or_else(|| {
            let names: Vec<&str> = Self::ALL.iter().map(|l| l.name()).collect();
            format!(
                "Unknown target language '{}'. Expected one of: {}",
                s,
                names.join(", ")
            )
        })
    }
}

/// Human-readable label for a detected language code.
///
/// Known codes map to their menu name; anything else is shown as the raw code.
pub fn describe_language_code(code: &str) -> String {
    match TargetLanguage::from_code(code) {
        Some(lang) => lang.name().to_string(),
        None => code.to_string(),
    }
}
