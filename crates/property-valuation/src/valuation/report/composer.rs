use std::io::Cursor;

use chrono::{Local, NaiveDate};
use image::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};
use tracing::debug;

use super::layout::{centered_x, wrap, Face};
use super::template::ReportTemplate;
use crate::valuation::chart::ChartArtifact;
use crate::valuation::domain::ValuationRequest;
use crate::valuation::engine::ValuationResult;
use crate::valuation::money::{format_rupee_range, format_rupees};

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
const LAYER_NAME: &str = "Report";
/// Baseline drop as a fraction of the line height.
const BASELINE_RATIO: f32 = 0.72;

/// Serialized PDF report.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub file_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("{field} contains {character:?}, which the report font cannot encode")]
    UnsupportedCharacter {
        field: &'static str,
        character: char,
    },
    #[error("chart image has no pixels")]
    EmptyChart,
    #[error("chart image could not be decoded: {0}")]
    ChartImage(#[from] image::ImageError),
    #[error("PDF serialization failed: {0}")]
    Serialize(String),
}

fn serialize_error<E: std::fmt::Display>(err: E) -> ComposeError {
    ComposeError::Serialize(err.to_string())
}

/// Lays out request fields, the valuation, and the chart on A4 pages.
#[derive(Debug, Clone)]
pub struct ReportComposer {
    template: ReportTemplate,
}

impl Default for ReportComposer {
    fn default() -> Self {
        Self::new(ReportTemplate::standard())
    }
}

impl ReportComposer {
    pub fn new(template: ReportTemplate) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &ReportTemplate {
        &self.template
    }

    /// Composes a report stamped with today's local date.
    pub fn compose(
        &self,
        request: &ValuationRequest,
        result: &ValuationResult,
        chart: &ChartArtifact,
    ) -> Result<ReportDocument, ComposeError> {
        self.compose_on(request, result, chart, Local::now().date_naive())
    }

    pub fn compose_on(
        &self,
        request: &ValuationRequest,
        result: &ValuationResult,
        chart: &ChartArtifact,
        report_date: NaiveDate,
    ) -> Result<ReportDocument, ComposeError> {
        ensure_encodable("title", &self.template.title)?;
        ensure_encodable("disclaimer", &self.template.disclaimer)?;
        ensure_encodable("name", &request.name)?;
        ensure_encodable("contact", &request.contact)?;
        ensure_encodable("city", &request.city)?;
        ensure_encodable("area", &request.area)?;

        if chart.width_px == 0 || chart.height_px == 0 {
            return Err(ComposeError::EmptyChart);
        }

        let lines = self.body_lines(request, result, report_date);
        let template = &self.template;
        let (doc, page, layer) = PdfDocument::new(
            template.title.as_str(),
            Mm(template.page_width),
            Mm(template.page_height),
            LAYER_NAME,
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(serialize_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(serialize_error)?;

        let pages = {
            // The decoded chart lives only for this block.
            let image = Image::try_from(PngDecoder::new(Cursor::new(chart.bytes.as_slice()))?)?;
            let first_layer = doc.get_page(page).get_layer(layer);
            let mut writer = PageWriter::start(&doc, template, first_layer, regular, bold);
            for line in &lines {
                writer.text_line(line);
            }
            writer.chart(image, chart);
            writer.pages
        };

        let bytes = doc.save_to_bytes().map_err(serialize_error)?;
        debug!(bytes = bytes.len(), pages, "valuation report composed");

        Ok(ReportDocument {
            bytes,
            pages,
            file_name: format!("valuation-report-{}.pdf", report_date.format("%Y-%m-%d")),
        })
    }

    /// Body text, top to bottom. An empty string is a blank line.
    pub fn body_lines(
        &self,
        request: &ValuationRequest,
        result: &ValuationResult,
        report_date: NaiveDate,
    ) -> Vec<String> {
        vec![
            format!(
                "Report Date: {}",
                report_date.format(self.template.date_format)
            ),
            format!("Name: {}", request.name),
            format!("Contact: {}", request.contact),
            format!("City: {}", request.city),
            format!("Area: {}", request.area),
            format!("BHK/Type: {}", request.property_type.label()),
            format!("Furnishing: {}", request.furnishing.label()),
            format!("Amenities: {}", request.amenities_text()),
            format!("Size (sq.ft.): {}", request.size_text()),
            String::new(),
            format!("Estimated Value: {}", format_rupees(result.average)),
            format!(
                "Price Range: {}",
                format_rupee_range(result.low, result.high)
            ),
        ]
    }
}

/// Built-in PDF fonts use WinAnsi; only its printable Latin-1 range is accepted.
fn ensure_encodable(field: &'static str, value: &str) -> Result<(), ComposeError> {
    match value
        .chars()
        .find(|c| !matches!(u32::from(*c), 0x20..=0x7e | 0xa0..=0xff))
    {
        Some(character) => Err(ComposeError::UnsupportedCharacter { field, character }),
        None => Ok(()),
    }
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    template: &'a ReportTemplate,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor: f32,
    pages: usize,
}

impl<'a> PageWriter<'a> {
    fn start(
        doc: &'a PdfDocumentReference,
        template: &'a ReportTemplate,
        layer: PdfLayerReference,
        regular: IndirectFontRef,
        bold: IndirectFontRef,
    ) -> Self {
        let mut writer = Self {
            doc,
            template,
            layer,
            regular,
            bold,
            cursor: template.body_top(),
            pages: 1,
        };
        writer.decorate_page();
        writer
    }

    fn decorate_page(&mut self) {
        let template = self.template;
        let left = template.margin;
        let width = template.text_width();

        let title_baseline =
            template.page_height - template.margin - template.title_line_height * BASELINE_RATIO;
        self.layer.use_text(
            template.title.as_str(),
            template.title_size,
            Mm(centered_x(&template.title, template.title_size, Face::Bold, left, width)),
            Mm(title_baseline),
            &self.bold,
        );

        let mut top = template.footer_offset;
        for line in wrap(&template.disclaimer, template.footer_size, Face::Regular, width) {
            let x = centered_x(&line, template.footer_size, Face::Regular, left, width);
            let baseline = top - template.footer_line_height * BASELINE_RATIO;
            self.layer
                .use_text(line, template.footer_size, Mm(x), Mm(baseline), &self.regular);
            top -= template.footer_line_height;
        }

        self.cursor = template.body_top();
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            Mm(self.template.page_width),
            Mm(self.template.page_height),
            LAYER_NAME,
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.pages += 1;
        self.decorate_page();
    }

    fn ensure_room(&mut self, height: f32) {
        if self.cursor - height < self.template.body_floor() {
            self.new_page();
        }
    }

    fn text_line(&mut self, text: &str) {
        let template = self.template;
        for line in wrap(text, template.body_size, Face::Regular, template.text_width()) {
            self.ensure_room(template.body_line_height);
            if !line.is_empty() {
                let baseline = self.cursor - template.body_line_height * BASELINE_RATIO;
                self.layer.use_text(
                    line,
                    template.body_size,
                    Mm(template.margin),
                    Mm(baseline),
                    &self.regular,
                );
            }
            self.cursor -= template.body_line_height;
        }
    }

    fn chart(&mut self, image: Image, chart: &ChartArtifact) {
        let template = self.template;
        let height = template.chart_width * chart.height_px as f32 / chart.width_px as f32;
        self.ensure_room(height);

        let dpi = chart.width_px as f32 * 25.4 / template.chart_width;
        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(template.chart_inset)),
                translate_y: Some(Mm(self.cursor - height)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        self.cursor -= height;
    }
}
