use brandify::BenefitsLayout;

use crate::render_ir::{PointF, Rgba, Scene, Shape, TextAlign, TextBaseline, TextCommand, TextStyle};
use crate::text_layout::{wrap_text, TextMeasurer};

/// Items per row in the horizontal arrangement.
pub const HORIZONTAL_COLUMNS: usize = 3;

/// Horizontal gap reserved between a column's text and the next column.
const COLUMN_GUTTER: f32 = 20.0;
/// Right margin for vertical item text.
const VERTICAL_RIGHT_MARGIN: f32 = 40.0;
/// Text indent from the bullet center in vertical lists.
const VERTICAL_TEXT_INDENT: f32 = 25.0;
/// Text indent from the bullet center in horizontal lists.
const HORIZONTAL_TEXT_INDENT: f32 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListOrientation {
    #[default]
    Vertical,
    Horizontal,
}

impl From<BenefitsLayout> for ListOrientation {
    fn from(value: BenefitsLayout) -> Self {
        match value {
            BenefitsLayout::Horizontal => Self::Horizontal,
            BenefitsLayout::Vertical => Self::Vertical,
        }
    }
}

/// Column sizing for horizontal lists.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ColumnWidth {
    /// `(page_width - start_x) / 3`.
    #[default]
    Even,
    /// Fixed pixel width per column.
    Fixed(f32),
}

/// Styling for the lines after an item's first `\n`.
#[derive(Clone, Debug, PartialEq)]
pub struct SubtitleOptions {
    pub style: TextStyle,
    pub color: Rgba,
    pub line_height: f32,
    pub top_margin: f32,
}

/// Bulleted list styling and geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct ListOptions {
    pub orientation: ListOrientation,
    pub bullet_radius: f32,
    pub style: TextStyle,
    pub color: Rgba,
    pub bullet_color: Rgba,
    pub line_height: f32,
    pub item_spacing: f32,
    pub start_x: f32,
    /// Vertical lists only; without it subtitle text is not drawn.
    pub subtitle: Option<SubtitleOptions>,
    pub columns: ColumnWidth,
    pub page_width: f32,
}

impl ListOptions {
    pub fn new(style: TextStyle, color: Rgba, bullet_color: Rgba) -> Self {
        Self {
            orientation: ListOrientation::Vertical,
            bullet_radius: 5.0,
            style,
            color,
            bullet_color,
            line_height: 20.0,
            item_spacing: 8.0,
            start_x: 60.0,
            subtitle: None,
            columns: ColumnWidth::Even,
            page_width: 800.0,
        }
    }

    pub fn with_orientation(mut self, orientation: ListOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_bullet_radius(mut self, radius: f32) -> Self {
        self.bullet_radius = radius;
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_item_spacing(mut self, spacing: f32) -> Self {
        self.item_spacing = spacing;
        self
    }

    pub fn with_start_x(mut self, start_x: f32) -> Self {
        self.start_x = start_x;
        self
    }

    pub fn with_subtitle(mut self, subtitle: SubtitleOptions) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    pub fn with_columns(mut self, columns: ColumnWidth) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_page_width(mut self, page_width: f32) -> Self {
        self.page_width = page_width;
        self
    }

    fn column_width(&self) -> f32 {
        match self.columns {
            ColumnWidth::Even => (self.page_width - self.start_x) / HORIZONTAL_COLUMNS as f32,
            ColumnWidth::Fixed(width) => width,
        }
    }
}

/// Layout summary for one list.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ListLayoutReport {
    /// Vertical space consumed from the start cursor.
    pub consumed_height: f32,
    /// Horizontal rows (or vertical items) laid out.
    pub rows: usize,
    /// Bullets drawn, one per non-blank item.
    pub bullets: usize,
}

/// Lay out `items` from `start_y` and return the consumed height.
pub fn layout_list(
    scene: &mut Scene,
    measurer: &dyn TextMeasurer,
    items: &[String],
    start_y: f32,
    options: &ListOptions,
) -> f32 {
    layout_list_report(scene, measurer, items, start_y, options).consumed_height
}

/// Like [`layout_list`], also reporting rows and bullet counts.
pub fn layout_list_report(
    scene: &mut Scene,
    measurer: &dyn TextMeasurer,
    items: &[String],
    start_y: f32,
    options: &ListOptions,
) -> ListLayoutReport {
    let visible = items.iter().filter(|item| !item.trim().is_empty());
    match options.orientation {
        ListOrientation::Vertical => layout_vertical(scene, measurer, visible, start_y, options),
        ListOrientation::Horizontal => {
            layout_horizontal(scene, measurer, visible, start_y, options)
        }
    }
}

fn layout_vertical<'i>(
    scene: &mut Scene,
    measurer: &dyn TextMeasurer,
    items: impl Iterator<Item = &'i String>,
    start_y: f32,
    options: &ListOptions,
) -> ListLayoutReport {
    let wrap_width = options.page_width - options.start_x - VERTICAL_RIGHT_MARGIN;
    let text_x = options.start_x + VERTICAL_TEXT_INDENT;
    let mut report = ListLayoutReport::default();
    let mut y = start_y;

    for item in items {
        let (title, subtitle) = split_item(item);
        let title_lines = wrap_text(measurer, &options.style, title, wrap_width);
        let title_block = title_lines.len() as f32 * options.line_height;

        draw_bullet(
            scene,
            PointF::new(options.start_x, y + options.line_height / 2.0),
            options.bullet_radius,
            options.bullet_color,
        );
        draw_lines(
            scene,
            &title_lines,
            text_x,
            y,
            options.line_height,
            &options.style,
            options.color,
        );

        let mut item_height = title_block;
        if let (Some(subtitle), Some(sub)) = (subtitle, options.subtitle.as_ref()) {
            let sub_lines = wrap_text(measurer, &sub.style, subtitle, wrap_width);
            draw_lines(
                scene,
                &sub_lines,
                text_x,
                y + title_block + sub.top_margin,
                sub.line_height,
                &sub.style,
                sub.color,
            );
            item_height += sub.top_margin + sub_lines.len() as f32 * sub.line_height;
        }

        y += item_height + options.item_spacing;
        report.rows += 1;
        report.bullets += 1;
    }

    report.consumed_height = y - start_y;
    report
}

fn layout_horizontal<'i>(
    scene: &mut Scene,
    measurer: &dyn TextMeasurer,
    items: impl Iterator<Item = &'i String>,
    start_y: f32,
    options: &ListOptions,
) -> ListLayoutReport {
    let column_width = options.column_width();
    let mut report = ListLayoutReport::default();
    let mut y = start_y;
    let mut row_max = 0.0f32;

    for (index, item) in items.enumerate() {
        let col = index % HORIZONTAL_COLUMNS;
        if col == 0 {
            if index > 0 {
                y += row_max + options.item_spacing;
                row_max = 0.0;
            }
            report.rows += 1;
        }
        let x = options.start_x + col as f32 * column_width;
        let lines = wrap_text(measurer, &options.style, item, column_width - COLUMN_GUTTER);
        row_max = row_max.max(lines.len() as f32 * options.line_height);

        draw_bullet(
            scene,
            PointF::new(x, y + options.line_height / 2.0),
            options.bullet_radius,
            options.bullet_color,
        );
        draw_lines(
            scene,
            &lines,
            x + HORIZONTAL_TEXT_INDENT,
            y,
            options.line_height,
            &options.style,
            options.color,
        );
        report.bullets += 1;
    }

    report.consumed_height = if report.bullets == 0 {
        0.0
    } else {
        (y + row_max) - start_y
    };
    report
}

/// First line is the title; the rest, re-joined, is the subtitle.
fn split_item(item: &str) -> (&str, Option<&str>) {
    match item.split_once('\n') {
        Some((title, rest)) if !rest.trim().is_empty() => (title, Some(rest)),
        Some((title, _)) => (title, None),
        None => (item, None),
    }
}

fn draw_bullet(scene: &mut Scene, center: PointF, radius: f32, color: Rgba) {
    scene.fill(Shape::Circle { center, radius }, color);
}

fn draw_lines(
    scene: &mut Scene,
    lines: &[String],
    x: f32,
    top: f32,
    line_height: f32,
    style: &TextStyle,
    color: Rgba,
) {
    for (index, line) in lines.iter().enumerate() {
        scene.text(TextCommand {
            x,
            y: top + index as f32 * line_height + line_height / 2.0,
            text: line.clone(),
            style: style.clone(),
            color,
            align: TextAlign::Left,
            baseline: TextBaseline::Middle,
        });
    }
}
