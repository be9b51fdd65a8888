use serde::{Deserialize, Serialize};

use crate::export::{hiring_post_file_name, welcome_post_file_name};
use crate::model::{JobPosting, OpeningList, WelcomeProfile};
use crate::template::{BenefitsLayout, JobBackground, JobLayout, WelcomeTemplate};

/// Everything needed to compose one image, minus the pixels of its images.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderDocument {
    Job(JobDocument),
    Welcome(WelcomeDocument),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDocument {
    pub posting: JobPosting,
    pub openings: OpeningList,
    pub layout: JobLayout,
    pub background: JobBackground,
    pub benefits_layout: BenefitsLayout,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WelcomeDocument {
    pub profile: WelcomeProfile,
    pub template: WelcomeTemplate,
    /// Footer text for the non-milestone templates.
    pub website: String,
}

impl Default for WelcomeDocument {
    fn default() -> Self {
        Self {
            profile: WelcomeProfile::default(),
            template: WelcomeTemplate::default(),
            website: "www.officefield.com".to_string(),
        }
    }
}

impl RenderDocument {
    /// File name the exported PNG should be saved under.
    pub fn output_file_name(&self) -> String {
        match self {
            Self::Job(doc) => hiring_post_file_name(&doc.posting.title),
            Self::Welcome(doc) => welcome_post_file_name(&doc.profile.name),
        }
    }

    /// Whether a photo slot participates in this document's layout.
    pub fn uses_photo(&self) -> bool {
        matches!(self, Self::Welcome(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names_follow_document_kind() {
        let job = RenderDocument::Job(JobDocument::default());
        assert_eq!(job.output_file_name(), "AI_Engineer_hiring_post.png");
        let welcome = RenderDocument::Welcome(WelcomeDocument {
            profile: WelcomeProfile {
                name: "Sam Doe".to_string(),
                ..WelcomeProfile::default()
            },
            ..WelcomeDocument::default()
        });
        assert_eq!(welcome.output_file_name(), "Sam_Doe_welcome_post.png");
        assert!(welcome.uses_photo());
        assert!(!job.uses_photo());
    }
}
