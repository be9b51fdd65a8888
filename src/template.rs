//! Template selectors.
//!
//! Strict parsing goes through [`FromStr`]; the `*_or_default` resolvers fail
//! closed to the default variant and log the rejected tag.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BrandifyError;

/// Hiring post layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobLayout {
    #[default]
    Single,
    Multiple,
}

/// Hiring post background. Multiple-openings always draws [`JobBackground::Dotted`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobBackground {
    #[default]
    Dotted,
    Classic,
}

/// Benefits list arrangement on the single posting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenefitsLayout {
    #[default]
    Horizontal,
    Vertical,
}

/// Welcome and work-milestone templates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WelcomeTemplate {
    #[default]
    Corporate,
    Creative,
    Modern,
    Elegant,
    Probation,
    Anniversary,
    Promotion,
}

impl WelcomeTemplate {
    pub const ALL: [WelcomeTemplate; 7] = [
        Self::Corporate,
        Self::Creative,
        Self::Modern,
        Self::Elegant,
        Self::Probation,
        Self::Anniversary,
        Self::Promotion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Corporate => "corporate",
            Self::Creative => "creative",
            Self::Modern => "modern",
            Self::Elegant => "elegant",
            Self::Probation => "probation",
            Self::Anniversary => "anniversary",
            Self::Promotion => "promotion",
        }
    }

    /// Probation, anniversary and promotion share the milestone layout.
    pub fn is_milestone(self) -> bool {
        matches!(self, Self::Probation | Self::Anniversary | Self::Promotion)
    }
}

impl JobLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }
}

impl JobBackground {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dotted => "dotted",
            Self::Classic => "classic",
        }
    }
}

impl BenefitsLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

fn unknown_selector(kind: &str, value: &str) -> BrandifyError {
    BrandifyError::new(
        "TEMPLATE_UNKNOWN",
        format!("unknown {} template '{}'", kind, value),
    )
    .with_source(kind)
}

macro_rules! selector_str_impls {
    ($ty:ty, $kind:literal, [$($variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = BrandifyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase();
                [$($variant),+]
                    .into_iter()
                    .find(|candidate: &$ty| candidate.as_str() == normalized)
                    .ok_or_else(|| unknown_selector($kind, s))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

selector_str_impls!(JobLayout, "job layout", [JobLayout::Single, JobLayout::Multiple]);
selector_str_impls!(
    JobBackground,
    "job background",
    [JobBackground::Dotted, JobBackground::Classic]
);
selector_str_impls!(
    BenefitsLayout,
    "benefits layout",
    [BenefitsLayout::Horizontal, BenefitsLayout::Vertical]
);
selector_str_impls!(
    WelcomeTemplate,
    "welcome",
    [
        WelcomeTemplate::Corporate,
        WelcomeTemplate::Creative,
        WelcomeTemplate::Modern,
        WelcomeTemplate::Elegant,
        WelcomeTemplate::Probation,
        WelcomeTemplate::Anniversary,
        WelcomeTemplate::Promotion,
    ]
);

/// Parse a selector, falling back to its default variant on unknown tags.
pub fn resolve_or_default<T>(value: &str) -> T
where
    T: FromStr<Err = BrandifyError> + Default + fmt::Display,
{
    match value.parse::<T>() {
        Ok(parsed) => parsed,
        Err(err) => {
            let fallback = T::default();
            log::warn!("{}; using '{}'", err, fallback);
            fallback
        }
    }
}
