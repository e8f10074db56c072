pub mod document_loader;
pub mod toml_loader;

pub use document_loader::{decode_base64, list_documents, load_document, DocumentSource};
pub use toml_loader::load_metadata_file;
