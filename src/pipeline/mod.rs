//! Pipeline components: locators, decompressor, parser, worker pool, sink and the orchestrator
//! that sequences them.

pub mod context;
pub mod decompress;
pub mod error_handler;
pub mod orchestrator;
pub mod parser;
pub mod sink;
pub mod walk;
pub mod workers;

pub use context::{CancelToken, PipelineTuning, PoolChannels, create_pool_channels};
pub use decompress::{DecompressStats, decompress, uncompressed_size};
pub use error_handler::{log_summary, report_skipped};
pub use orchestrator::{Pipeline, PipelineState, delete_documents};
pub use parser::{StructuredDocument, parse_document, read_document};
pub use sink::OutputSink;
pub use walk::{WalkOutcome, WalkResult, ensure_root, find_archives, find_documents, run_walk_loop};
pub use workers::{PoolReport, TaskOutcome, WorkerPool};
