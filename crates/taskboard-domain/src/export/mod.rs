//! Board import/export.
//!
//! Serializes boards with their tasks for backup and sharing, and reads the
//! same format back.

pub mod exporter;
pub mod importer;
pub mod models;

pub use exporter::BoardExporter;
pub use importer::BoardImporter;
pub use models::{AllBoardsExport, BoardExport};
