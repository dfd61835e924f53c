mod batch_writer;
mod ingestion_pipeline;
mod parallel_parser;
mod record_parser;
mod source_lines;

pub use batch_writer::{BatchStats, BatchWriter};
pub use ingestion_pipeline::{IngestionPipeline, LoadReport, PipelineState};
pub use parallel_parser::{ParallelSourceParser, ParsedSource};
pub use record_parser::RecordParser;
pub use source_lines::SourceLines;
