//! Form data snapshots consumed by the template compositors.

use serde::{Deserialize, Serialize};

use crate::error::BrandifyError;
use crate::markup::list_items_from_markup;

/// Ordered list items for a posting section (responsibilities, benefits, ...).
///
/// Items may carry a title and subtitle separated by `\n`. Whitespace-only
/// items are kept here and skipped at layout time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ListSource", into = "ListSource")]
pub struct ListContent {
    items: Vec<String>,
}

/// Serialized form of [`ListContent`]: an item array or an editor HTML fragment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListSource {
    Items(Vec<String>),
    Markup(String),
}

impl ListContent {
    /// Build list content from plain item strings.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Build list content from a rich-text editor fragment (`<ul><li>..</li></ul>`).
    pub fn from_markup(html: &str) -> Result<Self, BrandifyError> {
        Ok(Self {
            items: list_items_from_markup(html)?,
        })
    }

    /// All items in document order, including blank ones.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// `true` when no item has visible text.
    pub fn is_blank(&self) -> bool {
        self.items.iter().all(|item| item.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl TryFrom<ListSource> for ListContent {
    type Error = BrandifyError;

    fn try_from(value: ListSource) -> Result<Self, Self::Error> {
        match value {
            ListSource::Items(items) => Ok(Self { items }),
            ListSource::Markup(html) => Self::from_markup(&html),
        }
    }
}

impl From<ListContent> for ListSource {
    fn from(value: ListContent) -> Self {
        ListSource::Items(value.items)
    }
}

/// Job listing fields for the hiring templates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    /// Free text; any markup tags are turned into line breaks before layout.
    pub description: String,
    /// Large heading, typically "HIRING".
    pub hiring_title: String,
    /// Badge text for the multiple-openings layout.
    pub subtitle: String,
    pub responsibilities: ListContent,
    pub requirements: ListContent,
    pub benefits: ListContent,
    pub location: String,
    pub email: String,
    pub website: String,
}

impl Default for JobPosting {
    fn default() -> Self {
        Self {
            title: "AI Engineer".to_string(),
            company: "OFFICEFIELD".to_string(),
            description: "Office Field is looking for a skilled AI Engineer to build, optimize, \
and deploy high-performance Generative AI and LLM systems serving real users at millisecond \
latencies."
                .to_string(),
            hiring_title: "HIRING".to_string(),
            subtitle: "MULTIPLE OPENINGS".to_string(),
            responsibilities: ListContent::default(),
            requirements: ListContent::default(),
            benefits: ListContent::from_items([
                "Medical coverage",
                "Yearly benefits",
                "Market competitive salary",
                "Picnic and other team building activities",
                "Quarterly rewards",
            ]),
            location: "KARACHI".to_string(),
            email: "JOBS@OFFICEFIELD.COM".to_string(),
            website: "www.Officefield.com".to_string(),
        }
    }
}

/// One vacancy on the multiple-openings layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opening {
    pub id: u32,
    pub title: String,
    pub experience: String,
}

impl Opening {
    /// List item text: title on the first line, experience below it.
    pub fn list_item(&self) -> String {
        format!("{}\nExperience: {}", self.title, self.experience)
    }
}

/// Ordered openings with monotonically assigned ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningList {
    openings: Vec<Opening>,
}

impl OpeningList {
    pub fn new() -> Self {
        Self {
            openings: Vec::new(),
        }
    }

    /// Append an opening, assigning `max(id) + 1`.
    pub fn push(&mut self, title: impl Into<String>, experience: impl Into<String>) -> u32 {
        let id = self
            .openings
            .iter()
            .map(|opening| opening.id)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        self.openings.push(Opening {
            id,
            title: title.into(),
            experience: experience.into(),
        });
        id
    }

    /// Remove an opening by id. Returns `false` when the id is unknown.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.openings.len();
        self.openings.retain(|opening| opening.id != id);
        self.openings.len() != before
    }

    /// Replace the fields of an existing opening.
    pub fn update(
        &mut self,
        id: u32,
        title: impl Into<String>,
        experience: impl Into<String>,
    ) -> bool {
        match self.openings.iter_mut().find(|opening| opening.id == id) {
            Some(opening) => {
                opening.title = title.into();
                opening.experience = experience.into();
                true
            }
            None => false,
        }
    }

    pub fn as_slice(&self) -> &[Opening] {
        &self.openings
    }

    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }

    /// List items in insertion order.
    pub fn list_items(&self) -> Vec<String> {
        self.openings.iter().map(Opening::list_item).collect()
    }
}

impl Default for OpeningList {
    fn default() -> Self {
        let mut list = Self::new();
        list.push(
            "Senior Software Engineer - Full Stack [VueJS/NestJS]",
            "Experience 4+ Years",
        );
        list.push("DevOps Engineer", "Experience 2+ Years");
        list.push("Senior Software Engineer - iOS", "Experience 3+ Years");
        list.push("Data Architect", "Experience 6+ Years");
        list.push("Engineering Manager", "Experience 8+ Years");
        list
    }
}

/// Employee details for the welcome and milestone templates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WelcomeProfile {
    pub name: String,
    pub designation: String,
    /// Caller-side reference (path or URL) to the photo; pixels arrive separately.
    pub image: Option<String>,
    pub years: Option<String>,
    pub new_designation: Option<String>,
    pub message: Option<String>,
}

impl WelcomeProfile {
    /// Optional fields treat empty strings as absent.
    pub fn years(&self) -> Option<&str> {
        non_blank(self.years.as_deref())
    }

    pub fn new_designation(&self) -> Option<&str> {
        non_blank(self.new_designation.as_deref())
    }

    pub fn message(&self) -> Option<&str> {
        non_blank(self.message.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Photo drag offset in logical pixels. Applied unclamped by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImagePosition {
    pub x: f32,
    pub y: f32,
}

impl ImagePosition {
    /// Range of the position sliders in the editing UI.
    pub const UI_RANGE: (f32, f32) = (-50.0, 50.0);

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp to the slider range; the renderer itself never calls this.
    pub fn clamped_for_ui(self) -> Self {
        let (lo, hi) = Self::UI_RANGE;
        Self {
            x: self.x.clamp(lo, hi),
            y: self.y.clamp(lo, hi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_ids_are_max_plus_one() {
        let mut list = OpeningList::new();
        assert_eq!(list.push("A", "1y"), 1);
        assert_eq!(list.push("B", "2y"), 2);
        assert!(list.remove(1));
        assert_eq!(list.push("C", "3y"), 3);
        let ids: Vec<u32> = list.as_slice().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn opening_list_item_has_experience_subtitle() {
        let opening = Opening {
            id: 1,
            title: "DevOps Engineer".to_string(),
            experience: "Experience 2+ Years".to_string(),
        };
        assert_eq!(
            opening.list_item(),
            "DevOps Engineer\nExperience: Experience 2+ Years"
        );
    }

    #[test]
    fn update_and_remove_unknown_id() {
        let mut list = OpeningList::default();
        assert!(!list.remove(99));
        assert!(!list.update(99, "x", "y"));
        assert!(list.update(2, "SRE", "Experience 5+ Years"));
        assert_eq!(list.as_slice()[1].title, "SRE");
    }

    #[test]
    fn blank_list_content_detects_placeholder_item() {
        let list = ListContent::from_items(["\n", "   "]);
        assert!(list.is_blank());
        assert!(!list.is_empty());
        assert!(JobPosting::default().responsibilities.is_blank());
        assert!(!JobPosting::default().benefits.is_blank());
    }

    #[test]
    fn optional_profile_fields_ignore_blank_strings() {
        let profile = WelcomeProfile {
            years: Some(String::new()),
            message: Some("  ".to_string()),
            new_designation: Some("Lead".to_string()),
            ..WelcomeProfile::default()
        };
        assert_eq!(profile.years(), None);
        assert_eq!(profile.message(), None);
        assert_eq!(profile.new_designation(), Some("Lead"));
    }

    #[test]
    fn ui_clamp_is_opt_in() {
        let pos = ImagePosition::new(120.0, -80.0);
        assert_eq!(pos.x, 120.0);
        assert_eq!(pos.clamped_for_ui(), ImagePosition::new(50.0, -50.0));
    }
}
