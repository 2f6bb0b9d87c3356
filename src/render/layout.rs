//! Paystub page layout.
//!
//! Computes where every piece of text, rule and the branding image goes on
//! a single A4 page. The result is plain data, so it can be inspected
//! without reading PDF output. Coordinates are PDF points with the origin
//! at the bottom-left corner; text positions are baselines.

use crate::models::PayrollRecord;

use super::labels::{LabelKey, LabelSet};
use super::metrics::text_width;
use super::money::format_money;

/// A4 width in points.
pub const PAGE_WIDTH: f32 = 595.28;
/// A4 height in points.
pub const PAGE_HEIGHT: f32 = 841.89;
/// Page margin on all four sides (half an inch).
pub const MARGIN: f32 = 36.0;
/// The box a branding image is scaled to fit, in points.
pub const LOGO_BOX: (f32, f32) = (140.0, 60.0);

/// Header for the discounts column. Not localized.
pub const DISCOUNTS_HEADING: &str = "Descuentos";
/// Label of the discount total row. Not localized.
pub const TOTAL_LABEL: &str = "Total";

const BAND_PADDING: f32 = 10.0;
const HEADER_CELL_PADDING: f32 = 10.0;
const INFO_CELL_PADDING: f32 = 5.0;
const BODY_CELL_PADDING: f32 = 8.0;
const FOOTER_CELL_PADDING: f32 = 10.0;
const ASCENT: f32 = 0.8;
const LEADING: f32 = 1.2;
/// Text is never shrunk below this size; longer runs are cut instead.
const MIN_FONT_SIZE: f32 = 6.0;
const ELLIPSIS: &str = "...";

/// Helvetica face used for a text item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
}

/// Horizontal alignment inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Flush with the left padding.
    Left,
    /// Centred between the cell edges.
    Center,
    /// Flush with the right padding.
    Right,
}

/// A positioned run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    /// The text to draw.
    pub text: String,
    /// Left edge of the run.
    pub x: f32,
    /// Baseline.
    pub baseline: f32,
    /// Font size in points.
    pub size: f32,
    /// Face.
    pub weight: FontWeight,
}

impl TextItem {
    /// Right edge of the run.
    pub fn right(&self) -> f32 {
        self.x + text_width(&self.text, self.size, self.weight)
    }
}

/// A horizontal rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    /// Start x.
    pub x1: f32,
    /// End x.
    pub x2: f32,
    /// Height of the rule.
    pub y: f32,
}

/// Where the scaled branding image is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSlot {
    /// Left edge.
    pub x: f32,
    /// Bottom edge.
    pub y: f32,
    /// Drawn width.
    pub width: f32,
    /// Drawn height.
    pub height: f32,
}

/// The top-left branding region.
#[derive(Debug, Clone, PartialEq)]
pub enum Logo {
    /// A decoded image scaled into [`LOGO_BOX`].
    Image(ImageSlot),
    /// The entity name, drawn when there is no image.
    Placeholder(TextItem),
}

/// Everything drawn on a paystub page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
    /// The branding region.
    pub logo: Logo,
    /// Text items, in reading order.
    pub texts: Vec<TextItem>,
    /// Band separators, top to bottom.
    pub rules: Vec<Rule>,
}

impl PageLayout {
    /// Returns the first text item whose content is exactly `text`.
    pub fn text(&self, text: &str) -> Option<&TextItem> {
        self.texts.iter().find(|item| item.text == text)
    }
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    left: f32,
    right: f32,
    top: f32,
    padding: f32,
}

impl Cell {
    fn height(size: f32, padding: f32) -> f32 {
        size * LEADING + 2.0 * padding
    }

    /// Places `text` on the cell's first line, shrinking and then cutting
    /// it until it fits between the paddings.
    fn place(&self, text: &str, size: f32, weight: FontWeight, align: Align) -> TextItem {
        let baseline = self.top - self.padding - size * ASCENT;
        let (text, size) = fit_text(text, size, weight, self.right - self.left - 2.0 * self.padding);
        let width = text_width(&text, size, weight);
        let x = match align {
            Align::Left => self.left + self.padding,
            Align::Center => self.left + (self.right - self.left - width) / 2.0,
            Align::Right => self.right - self.padding - width,
        };

        TextItem {
            text,
            x,
            baseline,
            size,
            weight,
        }
    }
}

/// Returns `text` and a size at which it is at most `available` wide.
fn fit_text(text: &str, size: f32, weight: FontWeight, available: f32) -> (String, f32) {
    let width = text_width(text, size, weight);
    if width <= available {
        return (text.to_string(), size);
    }

    // Rounded down to a tenth of a point so the result stays inside.
    let shrunk = ((size * available / width * 10.0).floor() / 10.0).max(MIN_FONT_SIZE.min(size));
    if text_width(text, shrunk, weight) <= available {
        return (text.to_string(), shrunk);
    }

    let mut kept = text.to_string();
    while !kept.is_empty() && text_width(&format!("{}{}", kept, ELLIPSIS), shrunk, weight) > available {
        kept.pop();
    }
    (format!("{}{}", kept.trim_end(), ELLIPSIS), shrunk)
}

/// One cell in the body grid.
struct GridCell {
    column: usize,
    span: usize,
    text: String,
    size: f32,
    weight: FontWeight,
    align: Align,
}

impl GridCell {
    fn new(column: usize, text: impl Into<String>, weight: FontWeight) -> Self {
        Self {
            column,
            span: 1,
            text: text.into(),
            size: 10.0,
            weight,
            align: Align::Left,
        }
    }
}

/// Scales `pixels` to fit [`LOGO_BOX`] at one point per pixel, keeping
/// the aspect ratio.
pub fn fit_to_logo_box(pixels: (u32, u32)) -> (f32, f32) {
    let width = pixels.0.max(1) as f32;
    let height = pixels.1.max(1) as f32;
    let scale = (LOGO_BOX.0 / width).min(LOGO_BOX.1 / height);
    (width * scale, height * scale)
}

/// Lays out one paystub.
///
/// `logo_pixels` is the decoded image size, or `None` to draw `entity` as
/// a text placeholder.
pub fn compose_layout(
    record: &PayrollRecord,
    entity: &str,
    logo_pixels: Option<(u32, u32)>,
    labels: &LabelSet,
) -> PageLayout {
    let left = MARGIN + BAND_PADDING;
    let right = PAGE_WIDTH - MARGIN - BAND_PADDING;
    let mut texts = Vec::new();
    let mut rules = Vec::new();

    // Header band: logo on the left third, title block on the right.
    let header_top = PAGE_HEIGHT - MARGIN - BAND_PADDING;
    let split = left + (right - left) / 3.0;

    let title = format!("{} {}", labels.get(LabelKey::PaystubTitle), record.period);
    let info_lines = [
        (title.as_str(), 14.0, FontWeight::Bold),
        (record.full_name.as_str(), 12.0, FontWeight::Bold),
        (record.position.as_str(), 10.0, FontWeight::Regular),
    ];

    let mut info_header = Vec::with_capacity(info_lines.len());
    let mut y = header_top;
    for (text, size, weight) in info_lines {
        let cell = Cell {
            left: split,
            right,
            top: y,
            padding: INFO_CELL_PADDING,
        };
        info_header.push(cell.place(text, size, weight, Align::Right));
        y -= Cell::height(size, INFO_CELL_PADDING);
    }
    let info_height = header_top - y;

    let logo_height = match logo_pixels {
        Some(pixels) => fit_to_logo_box(pixels).1 + 2.0 * HEADER_CELL_PADDING,
        None => Cell::height(24.0, HEADER_CELL_PADDING),
    };
    let row_height = info_height.max(logo_height);
    let logo_top = header_top - (row_height - logo_height) / 2.0;

    let logo = match logo_pixels {
        Some(pixels) => {
            let (width, height) = fit_to_logo_box(pixels);
            Logo::Image(ImageSlot {
                x: left + HEADER_CELL_PADDING,
                y: logo_top - HEADER_CELL_PADDING - height,
                width,
                height,
            })
        }
        None => {
            let cell = Cell {
                left,
                right: left + LOGO_BOX.0 + 2.0 * HEADER_CELL_PADDING,
                top: logo_top,
                padding: HEADER_CELL_PADDING,
            };
            Logo::Placeholder(cell.place(entity, 24.0, FontWeight::Bold, Align::Left))
        }
    };
    texts.extend(info_header);

    let header_bottom = header_top - row_height - BAND_PADDING;
    rules.push(Rule {
        x1: MARGIN,
        x2: PAGE_WIDTH - MARGIN,
        y: header_bottom,
    });

    // Body band: four equal columns, salary on the left, discounts on the right.
    let body_top = header_bottom - BAND_PADDING;
    let column_width = (right - left) / 4.0;

    let mut heading = GridCell::new(2, DISCOUNTS_HEADING, FontWeight::Bold);
    heading.span = 2;
    heading.size = 12.0;
    heading.align = Align::Center;

    let discount_row = |label: &str, amount| {
        vec![
            GridCell::new(2, label, FontWeight::Regular),
            GridCell::new(3, format_money(amount), FontWeight::Regular),
        ]
    };

    let grid = vec![
        vec![
            GridCell::new(0, labels.get(LabelKey::GrossSalary), FontWeight::Bold),
            GridCell::new(1, format_money(record.gross_salary), FontWeight::Regular),
            heading,
        ],
        vec![
            GridCell::new(0, labels.get(LabelKey::GrossPayment), FontWeight::Bold),
            GridCell::new(1, format_money(record.gross_payment), FontWeight::Regular),
            GridCell::new(2, "SFS", FontWeight::Regular),
            GridCell::new(3, format_money(record.social_discount_amount), FontWeight::Regular),
        ],
        discount_row("AFP", record.health_discount_amount),
        discount_row("ISR", record.taxes_discount_amount),
        discount_row("Otros", record.other_discount_amount),
        vec![
            GridCell::new(2, TOTAL_LABEL, FontWeight::Bold),
            GridCell::new(3, format_money(record.total_discounts()), FontWeight::Bold),
        ],
    ];

    let mut y = body_top;
    for row in &grid {
        let height = row
            .iter()
            .map(|cell| Cell::height(cell.size, BODY_CELL_PADDING))
            .fold(0.0, f32::max);

        for cell in row {
            let cell_left = left + column_width * cell.column as f32;
            let placed = Cell {
                left: cell_left,
                right: cell_left + column_width * cell.span as f32,
                top: y,
                padding: BODY_CELL_PADDING,
            };
            texts.push(placed.place(&cell.text, cell.size, cell.weight, cell.align));
        }
        y -= height;
    }

    let body_bottom = y - BAND_PADDING;
    rules.push(Rule {
        x1: MARGIN,
        x2: PAGE_WIDTH - MARGIN,
        y: body_bottom,
    });

    // Footer band: net payment, unruled.
    let footer_top = body_bottom - BAND_PADDING;
    let half = (right - left) / 2.0;
    let footer = [
        (labels.get(LabelKey::NetPayment).to_string(), left),
        (format_money(record.net_payment), left + half),
    ];
    for (text, cell_left) in footer {
        let cell = Cell {
            left: cell_left,
            right: cell_left + half,
            top: footer_top,
            padding: FOOTER_CELL_PADDING,
        };
        texts.push(cell.place(&text, 12.0, FontWeight::Bold, Align::Left));
    }

    PageLayout {
        width: PAGE_WIDTH,
        height: PAGE_HEIGHT,
        logo,
        texts,
        rules,
    }
}
