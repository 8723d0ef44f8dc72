mod composer;
mod layout;
mod template;

pub use composer::{ComposeError, ReportComposer, ReportDocument, PDF_MEDIA_TYPE};
pub use template::ReportTemplate;
