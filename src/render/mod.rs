//! Paystub rendering.
//!
//! Rendering happens in two stages: [`compose_layout`] computes a
//! [`PageLayout`] from a record and its labels, then [`PdfRenderer`] draws
//! that layout with `printpdf`. The fixed layout is:
//!
//! ```text
//! +--------------------------------------------------------------+
//! | [logo | entity name]        <title> <period>                 |
//! |                                           <full name>        |
//! |                                            <position>        |
//! +--------------------------------------------------------------+
//! | <gross salary>  $x        |        Descuentos                |
//! | <gross payment> $x        | SFS    $x                        |
//! |                           | AFP    $x                        |
//! |                           | ISR    $x                        |
//! |                           | Otros  $x                        |
//! |                           | Total  $x                        |
//! +--------------------------------------------------------------+
//! | <net payment>                 $x                             |
//! +--------------------------------------------------------------+
//! ```

mod labels;
mod layout;
mod metrics;
mod money;
mod pdf;

use crate::assets::BrandingAsset;
use crate::error::EngineResult;
use crate::models::PayrollRecord;

pub use labels::{LabelKey, LabelSet, labels};
pub use layout::{
    Align, DISCOUNTS_HEADING, FontWeight, ImageSlot, LOGO_BOX, Logo, MARGIN, PAGE_HEIGHT,
    PAGE_WIDTH, PageLayout, Rule, TOTAL_LABEL, TextItem, compose_layout, fit_to_logo_box,
};
pub use metrics::text_width;
pub use money::format_money;
pub use pdf::PdfRenderer;

/// Turns one payroll record into a document.
pub trait DocumentRenderer {
    /// Renders `record` for `entity`.
    ///
    /// `asset` is the batch's branding image; `None` draws the entity name
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AssetDecode`](crate::error::EngineError::AssetDecode)
    /// if `asset` is present but not an image.
    fn render(
        &self,
        record: &PayrollRecord,
        entity: &str,
        asset: Option<&BrandingAsset>,
        labels: &LabelSet,
    ) -> EngineResult<Vec<u8>>;
}
