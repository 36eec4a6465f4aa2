mod composite_file_loader;
mod pdf_adapter;
mod plain_text_adapter;

pub use composite_file_loader::CompositeFileLoader;
pub use pdf_adapter::{PdfAdapter, assemble_page_text};
pub use plain_text_adapter::PlainTextAdapter;
