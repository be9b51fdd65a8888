//! Data model, template selectors, and list-markup extraction for `brandify`
//! hiring and welcome images.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod document;
mod error;
pub mod export;
pub mod markup;
mod model;
pub mod template;

pub use document::{JobDocument, RenderDocument, WelcomeDocument};
pub use error::BrandifyError;
pub use markup::{list_items_from_markup, strip_markup};
pub use model::{
    ImagePosition, JobPosting, ListContent, ListSource, Opening, OpeningList, WelcomeProfile,
};
pub use template::{
    resolve_or_default, BenefitsLayout, JobBackground, JobLayout, WelcomeTemplate,
};
