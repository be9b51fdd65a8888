use brandify::{strip_markup, JobBackground, JobDocument, JobPosting, ListContent};

use super::{line_shape, ComposeContext, Compositor, Cursor};
use crate::decor;
use crate::list_layout::{layout_list, ListOptions, ListOrientation, SubtitleOptions};
use crate::render_engine::ImageStatus;
use crate::render_ir::{
    ImageSlot, PointF, RectF, Rgba, Shape, TextAlign, TextBaseline, TextCommand, TextStyle,
};

const NAVY: Rgba = Rgba::hex(0x1e3a8a);
const BODY_GRAY: Rgba = Rgba::hex(0x374151);
const INK: Rgba = Rgba::hex(0x111827);
const MUTED: Rgba = Rgba::hex(0x6b7280);
const SEPARATOR_GRAY: Rgba = Rgba::hex(0xe5e7eb);

const MARGIN_X: f32 = 50.0;
const LOGO_WIDTH: f32 = 100.0;
const HEADER_BAND: f32 = 120.0;
const FOOTER_HEIGHT: f32 = 50.0;
const BADGE_PADDING: f32 = 20.0;
const BADGE_HEIGHT: f32 = 40.0;

/// One role: description, responsibilities, requirements, benefits.
#[derive(Clone, Copy, Debug, Default)]
pub struct SinglePostingCompositor;

/// Several roles as a list with experience subtitles, plus benefits.
#[derive(Clone, Copy, Debug, Default)]
pub struct MultipleOpeningsCompositor;

impl Compositor for SinglePostingCompositor {
    type Input = JobDocument;

    fn name(&self) -> &'static str {
        "single"
    }

    fn compose(&self, doc: &JobDocument, ctx: &mut ComposeContext<'_>) {
        let posting = &doc.posting;
        decor::job_background(ctx.scene, doc.background);
        draw_header(ctx, &posting.company);

        ctx.text(TextCommand::new(
            MARGIN_X,
            150.0,
            "HIRING",
            &TextStyle::sans(900, 48.0),
            NAVY,
        ));
        draw_badge(
            ctx,
            &posting.title,
            &TextStyle::sans(700, 24.0),
            RectF::new(MARGIN_X, 175.0, 0.0, BADGE_HEIGHT),
        );

        let cursor = Cursor::at(245.0);
        let cursor = description_stage(ctx, posting, cursor);
        let cursor = section_stage(
            ctx,
            "RESPONSIBILITIES:",
            &posting.responsibilities,
            cursor,
            20.0,
        );
        let cursor = section_stage(ctx, "REQUIREMENTS:", &posting.requirements, cursor, 30.0);
        let cursor = single_benefits_stage(ctx, doc, cursor);
        log::trace!("single posting content ends at y={}", cursor.y);

        draw_footer(ctx, posting, &posting.location);
    }
}

impl Compositor for MultipleOpeningsCompositor {
    type Input = JobDocument;

    fn name(&self) -> &'static str {
        "multiple"
    }

    fn compose(&self, doc: &JobDocument, ctx: &mut ComposeContext<'_>) {
        let posting = &doc.posting;
        if doc.background != JobBackground::Dotted {
            log::debug!("multiple-openings layout ignores background '{}'", doc.background);
        }
        decor::job_background(ctx.scene, JobBackground::Dotted);
        draw_header(ctx, &posting.company);

        let hiring_y = 150.0;
        ctx.text(
            TextCommand::new(
                MARGIN_X,
                hiring_y,
                posting.hiring_title.as_str(),
                &TextStyle::sans(900, 36.0),
                NAVY,
            )
            .with_baseline(TextBaseline::Middle),
        );
        let badge_y = hiring_y + 12.0;
        draw_badge(
            ctx,
            &posting.subtitle,
            &TextStyle::sans(700, 20.0),
            RectF::new(MARGIN_X, badge_y, 0.0, BADGE_HEIGHT),
        );

        let cursor = Cursor::at(badge_y + BADGE_HEIGHT + 50.0);
        let cursor = openings_stage(ctx, doc, cursor);
        let cursor = multiple_benefits_stage(ctx, doc, cursor);
        log::trace!("multiple openings content ends at y={}", cursor.y);

        draw_footer(ctx, posting, &posting.location.to_uppercase());
    }
}

/// Logo, separator and company name in the 120px header band.
fn draw_header(ctx: &mut ComposeContext<'_>, company: &str) {
    match ctx.logo() {
        ImageStatus::Loaded(info) => {
            let height = info.height.max(1) as f32 / info.width.max(1) as f32 * LOGO_WIDTH;
            ctx.scene.image(
                ImageSlot::Logo,
                RectF::new(MARGIN_X, (HEADER_BAND - height) / 2.0, LOGO_WIDTH, height),
            );
        }
        ImageStatus::Failed => {
            ctx.scene
                .fill(Shape::Rect(RectF::new(40.0, 30.0, 80.0, 50.0)), Rgba::hex(0xff0000));
            ctx.text(
                TextCommand::new(50.0, 55.0, "Logo", &TextStyle::sans(400, 16.0), Rgba::WHITE)
                    .with_baseline(TextBaseline::Middle),
            );
        }
        ImageStatus::Pending => {}
    }

    let separator_x = MARGIN_X + LOGO_WIDTH + 20.0;
    ctx.scene.stroke(
        line_shape(PointF::new(separator_x, 40.0), PointF::new(separator_x, 80.0)),
        SEPARATOR_GRAY,
        1.0,
    );
    ctx.text(
        TextCommand::new(
            separator_x + 20.0,
            60.0,
            company,
            &TextStyle::sans(700, 24.0),
            NAVY,
        )
        .with_baseline(TextBaseline::Middle),
    );
}

/// Navy box sized to the measured text plus padding, text vertically centered.
///
/// `frame.width` is ignored; the box width comes from the text.
fn draw_badge(ctx: &mut ComposeContext<'_>, text: &str, style: &TextStyle, frame: RectF) {
    let width = ctx.measure(text, style) + BADGE_PADDING * 2.0;
    ctx.scene.fill(
        Shape::Rect(RectF::new(frame.x, frame.y, width, frame.height)),
        NAVY,
    );
    ctx.text(
        TextCommand::new(
            frame.x + BADGE_PADDING,
            frame.y + frame.height / 2.0,
            text,
            style,
            Rgba::WHITE,
        )
        .with_baseline(TextBaseline::Middle),
    );
}

fn description_stage(ctx: &mut ComposeContext<'_>, posting: &JobPosting, cursor: Cursor) -> Cursor {
    if posting.description.trim().is_empty() {
        return cursor;
    }
    let style = TextStyle::sans(500, 16.0);
    let text = strip_markup(&posting.description);
    let wrap_width = ctx.page_width() - MARGIN_X * 2.0;
    let lines = ctx.wrap(&text, &style, wrap_width);
    for (index, line) in lines.iter().enumerate() {
        ctx.text(
            TextCommand::new(
                MARGIN_X,
                cursor.y + index as f32 * 20.0,
                line.as_str(),
                &style,
                BODY_GRAY,
            )
            .with_baseline(TextBaseline::Middle),
        );
    }
    cursor.advance(lines.len() as f32 * 20.0 + 20.0)
}

fn heading(ctx: &mut ComposeContext<'_>, text: &str, style: &TextStyle, color: Rgba, y: f32) {
    ctx.text(
        TextCommand::new(MARGIN_X, y, text, style, color).with_baseline(TextBaseline::Middle),
    );
}

fn section_stage(
    ctx: &mut ComposeContext<'_>,
    title: &str,
    items: &ListContent,
    cursor: Cursor,
    gap_after: f32,
) -> Cursor {
    if items.is_blank() {
        return cursor;
    }
    heading(ctx, title, &TextStyle::sans(900, 24.0), NAVY, cursor.y);
    let cursor = cursor.advance(40.0);
    let options = ListOptions::new(TextStyle::sans(500, 14.0), BODY_GRAY, NAVY)
        .with_page_width(ctx.page_width());
    let height = layout_list(ctx.scene, ctx.measurer, items.items(), cursor.y, &options);
    cursor.advance(height + gap_after)
}

fn single_benefits_stage(ctx: &mut ComposeContext<'_>, doc: &JobDocument, cursor: Cursor) -> Cursor {
    let benefits = &doc.posting.benefits;
    if benefits.is_blank() {
        return cursor;
    }
    heading(
        ctx,
        "BENEFITS OFFERED:",
        &TextStyle::sans(900, 18.0),
        NAVY,
        cursor.y,
    );
    let cursor = cursor.advance(35.0);
    let options = ListOptions::new(TextStyle::sans(500, 16.0), BODY_GRAY, NAVY)
        .with_orientation(ListOrientation::from(doc.benefits_layout))
        .with_item_spacing(15.0)
        .with_columns(ctx.options.benefit_columns)
        .with_page_width(ctx.page_width());
    let height = layout_list(ctx.scene, ctx.measurer, benefits.items(), cursor.y, &options);
    cursor.advance(height + 30.0)
}

fn openings_stage(ctx: &mut ComposeContext<'_>, doc: &JobDocument, cursor: Cursor) -> Cursor {
    if doc.openings.is_empty() {
        return cursor;
    }
    let options = ListOptions::new(TextStyle::sans(700, 22.0), INK, NAVY)
        .with_bullet_radius(8.0)
        .with_line_height(30.0)
        .with_item_spacing(25.0)
        .with_subtitle(SubtitleOptions {
            style: TextStyle::sans(400, 18.0),
            color: MUTED,
            line_height: 25.0,
            top_margin: 8.0,
        })
        .with_page_width(ctx.page_width());
    let items = doc.openings.list_items();
    let height = layout_list(ctx.scene, ctx.measurer, &items, cursor.y, &options);
    cursor.advance(height + 40.0)
}

fn multiple_benefits_stage(
    ctx: &mut ComposeContext<'_>,
    doc: &JobDocument,
    cursor: Cursor,
) -> Cursor {
    let benefits = &doc.posting.benefits;
    if benefits.is_blank() {
        return cursor;
    }
    heading(
        ctx,
        "BENEFITS OFFERED:",
        &TextStyle::sans(700, 20.0),
        INK,
        cursor.y,
    );
    let cursor = cursor.advance(40.0);
    let options = ListOptions::new(TextStyle::sans(400, 16.0), BODY_GRAY, INK)
        .with_orientation(ListOrientation::from(doc.benefits_layout))
        .with_item_spacing(15.0)
        .with_columns(ctx.options.benefit_columns)
        .with_page_width(ctx.page_width());
    let height = layout_list(ctx.scene, ctx.measurer, benefits.items(), cursor.y, &options);
    cursor.advance(height)
}

/// Navy contact bar: email left, location centered, website right.
fn draw_footer(ctx: &mut ComposeContext<'_>, posting: &JobPosting, location: &str) {
    let width = ctx.page_width();
    let top = ctx.page_height() - FOOTER_HEIGHT;
    ctx.scene
        .fill(Shape::Rect(RectF::new(0.0, top, width, FOOTER_HEIGHT)), NAVY);
    ctx.scene.stroke(
        line_shape(PointF::new(0.0, top), PointF::new(width, top)),
        Rgba::WHITE,
        4.0,
    );

    let y = top + 28.0;
    let style = TextStyle::sans(700, 16.0);
    let contact = |x: f32, text: String, align: TextAlign| {
        TextCommand::new(x, y, text, &style, Rgba::WHITE)
            .with_align(align)
            .with_baseline(TextBaseline::Middle)
    };
    ctx.text(contact(MARGIN_X, posting.email.clone(), TextAlign::Left));
    ctx.text(contact(
        width / 2.0,
        format!("LOCATION: {}", location),
        TextAlign::Center,
    ));
    ctx.text(contact(
        width - MARGIN_X,
        posting.website.clone(),
        TextAlign::Right,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_engine::{ImageInfo, RenderImages, RenderOptions};
    use crate::render_ir::{DrawCommand, Scene};
    use crate::text_layout::{HeuristicTextMeasurer, TextMeasurer};
    use brandify::{ImagePosition, OpeningList};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn compose_job(compositor: &dyn Compositor<Input = JobDocument>, doc: &JobDocument) -> Scene {
        let mut scene = Scene::new(800, 1000, 2.0, Rgba::WHITE);
        let mut rng = StdRng::seed_from_u64(1);
        let images = RenderImages {
            logo: ImageStatus::Loaded(ImageInfo::new(200, 100)),
            photo: ImageStatus::Pending,
        };
        let options = RenderOptions::default();
        let mut ctx = ComposeContext {
            scene: &mut scene,
            measurer: &HeuristicTextMeasurer,
            rng: &mut rng,
            images: &images,
            image_position: ImagePosition::default(),
            options: &options,
        };
        compositor.compose(doc, &mut ctx);
        scene
    }

    #[test]
    fn blank_sections_skip_headings() {
        let doc = JobDocument::default();
        let scene = compose_job(&SinglePostingCompositor, &doc);
        assert!(scene.find_text("RESPONSIBILITIES:").is_none());
        assert!(scene.find_text("REQUIREMENTS:").is_none());
        assert!(scene.find_text("BENEFITS OFFERED:").is_some());
    }

    #[test]
    fn header_logo_is_centered_in_band() {
        let scene = compose_job(&SinglePostingCompositor, &JobDocument::default());
        let logo = scene.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::Image(img) if img.slot == ImageSlot::Logo => Some(img.dest),
            _ => None,
        });
        assert_eq!(logo, Some(RectF::new(50.0, 35.0, 100.0, 50.0)));
        let company = scene.find_text("OFFICEFIELD").unwrap();
        assert_eq!((company.x, company.y), (190.0, 60.0));
    }

    #[test]
    fn title_bar_width_tracks_measured_title() {
        let scene = compose_job(&SinglePostingCompositor, &JobDocument::default());
        let expected = HeuristicTextMeasurer
            .measure_text_px("AI Engineer", &TextStyle::sans(700, 24.0))
            + 40.0;
        let bar = scene.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::Fill {
                shape: Shape::Rect(rect),
                ..
            } if rect.y == 175.0 => Some(*rect),
            _ => None,
        });
        assert_eq!(bar.map(|r| r.width), Some(expected));
    }

    #[test]
    fn empty_openings_keep_benefits_below_badge() {
        let doc = JobDocument {
            openings: OpeningList::new(),
            layout: brandify::JobLayout::Multiple,
            ..JobDocument::default()
        };
        let scene = compose_job(&MultipleOpeningsCompositor, &doc);
        let heading = scene.find_text("BENEFITS OFFERED:").unwrap();
        assert_eq!(heading.y, 252.0);
        let location = scene.find_text("LOCATION: KARACHI").unwrap();
        assert_eq!(location.align, TextAlign::Center);
    }
}
