//! PDF output for paystub layouts, backed by `printpdf`.

use image::{DynamicImage, GenericImageView, Rgb, RgbImage, Rgba};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference,
    Point,
};
use tracing::debug;

use crate::assets::BrandingAsset;
use crate::error::{EngineError, EngineResult};
use crate::models::PayrollRecord;

use super::DocumentRenderer;
use super::labels::{LabelKey, LabelSet};
use super::layout::{FontWeight, Logo, PageLayout, TextItem, compose_layout};

const RULE_THICKNESS: f32 = 0.75;

fn mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

/// Renders paystubs as single-page A4 PDFs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    /// Creates a new renderer.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(
        &self,
        record: &PayrollRecord,
        entity: &str,
        asset: Option<&BrandingAsset>,
        labels: &LabelSet,
    ) -> EngineResult<Vec<u8>> {
        let logo = asset.map(decode_asset).transpose()?;
        let layout = compose_layout(
            record,
            entity,
            logo.as_ref().map(|img| img.dimensions()),
            labels,
        );

        let title = format!("{} {}", labels.get(LabelKey::PaystubTitle), record.period);
        let bytes =
            write_pdf(&title, &layout, logo).map_err(|message| EngineError::RenderFailed {
                recipient: record.email.clone(),
                message,
            })?;

        debug!(recipient = %record.email, bytes = bytes.len(), "Rendered paystub");
        Ok(bytes)
    }
}

/// Decodes asset bytes, compositing any alpha channel onto the white page.
fn decode_asset(asset: &BrandingAsset) -> EngineResult<DynamicImage> {
    let decoded = image::load_from_memory(asset.bytes()).map_err(|e| EngineError::AssetDecode {
        message: e.to_string(),
    })?;
    if !decoded.color().has_alpha() {
        return Ok(DynamicImage::ImageRgb8(decoded.to_rgb8()));
    }

    let rgba = decoded.to_rgba8();
    let flattened = RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        Rgb([over_white(r, a), over_white(g, a), over_white(b, a)])
    });
    Ok(DynamicImage::ImageRgb8(flattened))
}

/// Blends one channel with coverage `alpha` over white.
fn over_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (u32::from(channel), u32::from(alpha));
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

fn draw_text(layer: &PdfLayerReference, fonts: &Fonts, item: &TextItem) {
    layer.use_text(
        item.text.clone(),
        item.size,
        mm(item.x),
        mm(item.baseline),
        fonts.get(item.weight),
    );
}

fn write_pdf(
    title: &str,
    layout: &PageLayout,
    logo: Option<DynamicImage>,
) -> Result<Vec<u8>, String> {
    let (doc, page, layer) =
        PdfDocument::new(title, mm(layout.width), mm(layout.height), "Paystub");
    let layer = doc.get_page(page).get_layer(layer);

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| e.to_string())?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| e.to_string())?,
    };

    match (&layout.logo, logo) {
        (Logo::Image(slot), Some(image)) => {
            let (width, height) = image.dimensions();
            Image::from_dynamic_image(&image).add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(mm(slot.x)),
                    translate_y: Some(mm(slot.y)),
                    scale_x: Some(slot.width / width.max(1) as f32),
                    scale_y: Some(slot.height / height.max(1) as f32),
                    dpi: Some(72.0),
                    ..Default::default()
                },
            );
        }
        (Logo::Placeholder(item), _) => {
            draw_text(&layer, &fonts, item);
        }
        (Logo::Image(_), None) => {
            return Err("layout expects an image that was not decoded".to_string());
        }
    }

    for item in &layout.texts {
        draw_text(&layer, &fonts, item);
    }

    layer.set_outline_thickness(RULE_THICKNESS);
    for rule in &layout.rules {
        layer.add_line(Line {
            points: vec![
                (Point::new(mm(rule.x1), mm(rule.y)), false),
                (Point::new(mm(rule.x2), mm(rule.y)), false),
            ],
            is_closed: false,
        });
    }

    doc.save_to_bytes().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetTier;
    use crate::models::LocaleSelection;
    use crate::render::labels;
    use image::{ImageBuffer, ImageOutputFormat};
    use rust_decimal::Decimal;
    use std::io::Cursor;

    fn create_test_record() -> PayrollRecord {
        PayrollRecord {
            full_name: "Jane Smith".to_string(),
            email: "jane@x.com".to_string(),
            position: "Manager".to_string(),
            health_discount_amount: Decimal::new(15000, 2),
            social_discount_amount: Decimal::new(25000, 2),
            taxes_discount_amount: Decimal::new(40000, 2),
            other_discount_amount: Decimal::new(7500, 2),
            gross_salary: Decimal::new(700000, 2),
            gross_payment: Decimal::new(650000, 2),
            net_payment: Decimal::new(562500, 2),
            period: "2024-01".to_string(),
        }
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let buffer = ImageBuffer::from_pixel(width, height, Rgba([200u8, 30, 30, 128]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(buffer)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_renders_pdf_without_asset() {
        let bytes = PdfRenderer::new()
            .render(
                &create_test_record(),
                "Acme",
                None,
                &labels(LocaleSelection::Domestic),
            )
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_renders_pdf_with_png_asset() {
        let asset = BrandingAsset::new(png_bytes(40, 20), AssetTier::EntitySpecific);
        let bytes = PdfRenderer::new()
            .render(
                &create_test_record(),
                "Acme",
                Some(&asset),
                &labels(LocaleSelection::English),
            )
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_undecodable_asset_is_decode_error() {
        let asset = BrandingAsset::new(b"company-logo-data".to_vec(), AssetTier::BatchDefault);
        let result = PdfRenderer::new().render(
            &create_test_record(),
            "Acme",
            Some(&asset),
            &labels(LocaleSelection::Domestic),
        );
        assert!(matches!(result, Err(EngineError::AssetDecode { .. })));
    }

    #[test]
    fn test_transparent_pixels_become_white() {
        let buffer = ImageBuffer::from_pixel(4, 4, Rgba([0u8, 0, 0, 0]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(buffer)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        let asset = BrandingAsset::new(bytes, AssetTier::EntitySpecific);

        let decoded = decode_asset(&asset).unwrap().to_rgb8();
        assert!(decoded.pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn test_alpha_is_blended_over_white() {
        assert_eq!(over_white(0, 255), 0);
        assert_eq!(over_white(200, 255), 200);
        assert_eq!(over_white(0, 0), 255);
        assert_eq!(over_white(0, 128), 127);
        assert_eq!(over_white(255, 128), 255);
    }

    #[test]
    fn test_half_transparent_png_is_lightened() {
        let asset = BrandingAsset::new(png_bytes(2, 2), AssetTier::EntitySpecific);
        // png_bytes draws (200, 30, 30) at alpha 128.
        let pixel = *decode_asset(&asset).unwrap().to_rgb8().get_pixel(0, 0);
        assert_eq!(pixel, Rgb([227, 142, 142]));
    }

    #[test]
    fn test_bundled_default_decodes() {
        let asset = BrandingAsset::new(crate::assets::BUNDLED_DEFAULT.to_vec(), AssetTier::Bundled);
        assert!(decode_asset(&asset).is_ok());
    }
}
