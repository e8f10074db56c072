pub mod generated;
pub mod loaders;
pub mod metadata;
pub mod question;
pub mod report;

pub use generated::GeneratedQuestion;
pub use loaders::{load_document, load_metadata_file, DocumentSource};
pub use metadata::ExamMetadata;
pub use question::{AnswerKey, Difficulty, OptionLabel, OptionSet, QuestionBlock, QuestionRecord};
pub use report::{ExtractionReport, Strategy};
