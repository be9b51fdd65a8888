use brandify::{WelcomeDocument, WelcomeProfile};

use super::{line_shape, translucent_white, ComposeContext, Compositor, Cursor};
use crate::cover::draw_cover;
use crate::decor;
use crate::render_engine::ImageStatus;
use crate::render_ir::{
    ImageSlot, PointF, RectF, Rgba, Shape, TextAlign, TextCommand, TextStyle,
};

const OLD_GOLD: Rgba = Rgba::hex(0xd4af37);
const PHOTO_CENTER: PointF = PointF::new(240.0, 540.0);
const PHOTO_RADIUS: f32 = 140.0;
/// Left edge of the text column, right of the photo and separator.
const TEXT_START_X: f32 = PHOTO_CENTER.x + PHOTO_RADIUS + 100.0;
const TEXT_RIGHT_PADDING: f32 = 40.0;

/// Work milestone being celebrated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MilestoneKind {
    Probation,
    Anniversary,
    Promotion,
}

/// Photo-left, text-right layout shared by the milestone templates.
#[derive(Clone, Copy, Debug)]
pub struct MilestoneCompositor {
    kind: MilestoneKind,
}

impl MilestoneCompositor {
    pub const fn new(kind: MilestoneKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> MilestoneKind {
        self.kind
    }
}

/// Copy drawn for a milestone: hero title, gold event line, designation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MilestoneCopy {
    pub title: String,
    pub event: &'static str,
    pub designation: String,
}

impl MilestoneKind {
    pub fn copy_for(self, profile: &WelcomeProfile) -> MilestoneCopy {
        match self {
            Self::Promotion => MilestoneCopy {
                title: "Congratulations".to_string(),
                event: "ON YOUR PROMOTION",
                designation: profile
                    .new_designation()
                    .unwrap_or(profile.designation.as_str())
                    .to_uppercase(),
            },
            Self::Anniversary => {
                let title = match profile.years() {
                    Some(years) => {
                        let years = years.trim();
                        format!("Happy {}{} Work", years, ordinal_suffix_for(years))
                    }
                    None => "Happy Work".to_string(),
                };
                MilestoneCopy {
                    title,
                    event: "ANNIVERSARY",
                    designation: profile.designation.to_uppercase(),
                }
            }
            Self::Probation => MilestoneCopy {
                title: "Congratulations".to_string(),
                event: "ON COMPLETING YOUR PROBATION",
                designation: profile.designation.to_uppercase(),
            },
        }
    }
}

/// English ordinal suffix: 1st, 2nd, 3rd, 4th, 11th-13th, 21st, ...
pub fn ordinal_suffix(n: u64) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Suffix for the leading integer of `years` ("5+" -> "th"); "th" when none parses.
pub fn ordinal_suffix_for(years: &str) -> &'static str {
    let digits: String = years
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse::<u64>().map_or("th", ordinal_suffix)
}

impl Compositor for MilestoneCompositor {
    type Input = WelcomeDocument;

    fn name(&self) -> &'static str {
        match self.kind {
            MilestoneKind::Probation => "probation",
            MilestoneKind::Anniversary => "anniversary",
            MilestoneKind::Promotion => "promotion",
        }
    }

    fn compose(&self, doc: &WelcomeDocument, ctx: &mut ComposeContext<'_>) {
        decor::milestone_background(ctx.scene);
        draw_brand_header(ctx);
        decor::milestone_flourishes(ctx.scene);
        draw_photo(ctx, &doc.profile);

        let separator_x = PHOTO_CENTER.x + PHOTO_RADIUS + 60.0;
        ctx.scene.stroke(
            line_shape(
                PointF::new(separator_x, 370.0),
                PointF::new(separator_x, 770.0),
            ),
            Rgba::rgb(212, 175, 55).with_alpha(0.4),
            1.0,
        );

        let copy = self.kind.copy_for(&doc.profile);
        draw_text_column(ctx, &copy, &doc.profile);

        let website = ctx.options.milestone_website.clone();
        let x = ctx.page_width() / 2.0;
        let y = ctx.page_height() - 40.0;
        ctx.text(
            TextCommand::new(x, y, website, &TextStyle::sans(500, 20.0), Rgba::WHITE)
                .with_align(TextAlign::Center),
        );
    }
}

fn draw_brand_header(ctx: &mut ComposeContext<'_>) {
    let ImageStatus::Loaded(info) = ctx.logo() else {
        return;
    };
    let width = 90.0;
    let height = info.height as f32 * (width / info.width.max(1) as f32);
    ctx.scene
        .image(ImageSlot::Logo, RectF::new(50.0, 40.0, width, height));
    let brand = ctx.options.brand_name.clone();
    ctx.text(TextCommand::new(
        155.0,
        40.0 + height / 2.0 + 8.0,
        brand,
        &TextStyle::sans(700, 30.0),
        Rgba::WHITE,
    ));
}

fn draw_photo(ctx: &mut ComposeContext<'_>, profile: &WelcomeProfile) {
    let circle = Shape::Circle {
        center: PHOTO_CENTER,
        radius: PHOTO_RADIUS,
    };
    match ctx.photo_size(profile.image.is_some()) {
        Some(size) => {
            let frame = RectF::new(
                PHOTO_CENTER.x - PHOTO_RADIUS,
                PHOTO_CENTER.y - PHOTO_RADIUS,
                PHOTO_RADIUS * 2.0,
                PHOTO_RADIUS * 2.0,
            );
            draw_cover(
                ctx.scene,
                ImageSlot::Photo,
                size,
                circle.clone(),
                frame,
                ctx.image_position,
            );
        }
        None => ctx.scene.fill(circle.clone(), Rgba::hex(0x333333)),
    }
    ctx.scene.stroke(circle.clone(), OLD_GOLD, 6.0);
    ctx.scene.stroke(circle, translucent_white(0.1), 12.0);
}

/// Hero title (right-aligned), event, name, designation, message.
fn draw_text_column(ctx: &mut ComposeContext<'_>, copy: &MilestoneCopy, profile: &WelcomeProfile) {
    let text_end_x = ctx.page_width() - TEXT_RIGHT_PADDING;
    let max_width = text_end_x - TEXT_START_X;
    let cursor = Cursor::at(400.0);

    ctx.text(
        TextCommand::new(
            text_end_x,
            cursor.y,
            copy.title.as_str(),
            &TextStyle::serif(400, 55.0).italic(),
            Rgba::WHITE,
        )
        .with_align(TextAlign::Right),
    );
    let cursor = cursor.advance(55.0);

    let cursor = wrapped_block(
        ctx,
        copy.event,
        &TextStyle::sans(700, 22.0),
        OLD_GOLD,
        28.0,
        max_width,
        cursor,
    )
    .advance(80.0 - 28.0);

    ctx.text(TextCommand::new(
        TEXT_START_X,
        cursor.y,
        profile.name.to_uppercase(),
        &TextStyle::sans(700, 42.0),
        Rgba::WHITE,
    ));
    let cursor = cursor.advance(40.0);

    let cursor = wrapped_block(
        ctx,
        &copy.designation,
        &TextStyle::sans(500, 22.0),
        Rgba::hex(0xcccccc),
        26.0,
        max_width,
        cursor,
    )
    .advance(34.0);

    if let Some(message) = profile.message() {
        wrapped_block(
            ctx,
            message,
            &TextStyle::sans(400, 16.0),
            Rgba::hex(0xdddddd),
            22.0,
            max_width,
            cursor,
        );
    }
}

/// Wrapped lines from `cursor`; returns the cursor below the block.
fn wrapped_block(
    ctx: &mut ComposeContext<'_>,
    text: &str,
    style: &TextStyle,
    color: Rgba,
    line_height: f32,
    max_width: f32,
    cursor: Cursor,
) -> Cursor {
    let lines = ctx.wrap(text, style, max_width);
    for (index, line) in lines.iter().enumerate() {
        ctx.text(TextCommand::new(
            TEXT_START_X,
            cursor.y + index as f32 * line_height,
            line.as_str(),
            style,
            color,
        ));
    }
    cursor.advance(lines.len() as f32 * line_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_suffixes() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (101, "st"),
            (111, "th"),
            (112, "th"),
        ];
        for (n, suffix) in cases {
            assert_eq!(ordinal_suffix(n), suffix, "n={n}");
        }
    }

    #[test]
    fn suffix_uses_leading_integer() {
        assert_eq!(ordinal_suffix_for("2"), "nd");
        assert_eq!(ordinal_suffix_for("23 years"), "rd");
        assert_eq!(ordinal_suffix_for("five"), "th");
    }

    #[test]
    fn promotion_prefers_new_designation() {
        let profile = WelcomeProfile {
            designation: "Engineer".to_string(),
            new_designation: Some("Senior Engineer".to_string()),
            ..WelcomeProfile::default()
        };
        let copy = MilestoneKind::Promotion.copy_for(&profile);
        assert_eq!(copy.designation, "SENIOR ENGINEER");
        let fallback = MilestoneKind::Promotion.copy_for(&WelcomeProfile {
            new_designation: Some(String::new()),
            ..profile
        });
        assert_eq!(fallback.designation, "ENGINEER");
    }

    #[test]
    fn anniversary_title_includes_ordinal() {
        let profile = WelcomeProfile {
            years: Some("3".to_string()),
            ..WelcomeProfile::default()
        };
        let copy = MilestoneKind::Anniversary.copy_for(&profile);
        assert_eq!(copy.title, "Happy 3rd Work");
        assert_eq!(copy.event, "ANNIVERSARY");
        let no_years = MilestoneKind::Anniversary.copy_for(&WelcomeProfile::default());
        assert_eq!(no_years.title, "Happy Work");
    }
}
