/// Fixed report content and page geometry. All lengths are millimetres, font sizes points.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTemplate {
    pub title: String,
    pub disclaimer: String,
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub title_size: f32,
    pub title_line_height: f32,
    pub title_gap: f32,
    pub body_size: f32,
    pub body_line_height: f32,
    pub footer_size: f32,
    pub footer_line_height: f32,
    /// Distance of the footer's first line above the bottom edge.
    pub footer_offset: f32,
    pub chart_inset: f32,
    pub chart_width: f32,
    pub date_format: &'static str,
}

impl ReportTemplate {
    pub fn standard() -> Self {
        Self::with_market_date("Aug 2025")
    }

    /// Standard layout with the disclaimer naming when the rates were collected.
    pub fn with_market_date(as_of: &str) -> Self {
        Self {
            title: "ClearDeals Property Valuation Report".to_string(),
            disclaimer: format!(
                "Disclaimer: This report is indicative based on market data as of {as_of}. \
                 Please consult licensed valuers. Powered by ClearDeals"
            ),
            page_width: 210.0,
            page_height: 297.0,
            margin: 10.0,
            title_size: 14.0,
            title_line_height: 10.0,
            title_gap: 5.0,
            body_size: 11.0,
            body_line_height: 8.0,
            footer_size: 8.0,
            footer_line_height: 4.5,
            footer_offset: 25.0,
            chart_inset: 20.0,
            chart_width: 170.0,
            date_format: "%d %b %Y",
        }
    }

    pub fn text_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Top of the body area, below the header.
    pub fn body_top(&self) -> f32 {
        self.page_height - self.margin - self.title_line_height - self.title_gap
    }

    /// Lowest point body content may reach before the footer.
    pub fn body_floor(&self) -> f32 {
        self.footer_offset + 2.0
    }
}
