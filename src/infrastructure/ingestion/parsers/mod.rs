//! Document parser implementations

mod html;
mod pdf;
mod plain_text;

pub use html::HtmlParser;
pub use pdf::PdfParser;
pub use plain_text::PlainTextParser;

#[cfg(test)]
pub use pdf::fixture;
