//! # Collaborators
//!
//! The reader that yields a scanner header and the writer that stores the
//! final mesh. Concrete formats live outside this crate.

use crate::error::ScannerMeshResult;
use crate::header::ScannerHeader;
use crate::mesh::Mesh;

/// A list-mode reader: one header followed by a stream of time blocks.
pub trait ScannerSource {
    /// Reads the header. Called once, before the time blocks.
    fn read_header(&mut self) -> ScannerMeshResult<ScannerHeader>;

    /// Drains every remaining time block and returns how many were read.
    fn read_time_blocks(&mut self) -> ScannerMeshResult<usize>;
}

/// Destination for the rendered mesh.
pub trait MeshSink {
    /// Writes the mesh.
    fn write_mesh(&mut self, mesh: &Mesh) -> ScannerMeshResult<()>;
}

/// Reads the header, then drains the event stream as the reader protocol
/// requires before the header may be used.
pub fn load_header<S: ScannerSource + ?Sized>(source: &mut S) -> ScannerMeshResult<ScannerHeader> {
    let header = source.read_header()?;
    let blocks = source.read_time_blocks()?;
    log::info!(
        "Read header for '{}' and drained {blocks} time blocks",
        header.scanner.model_name
    );
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScannerMeshError;

    #[derive(Default)]
    struct RecordingSource {
        calls: Vec<&'static str>,
        fail_blocks: bool,
    }

    impl ScannerSource for RecordingSource {
        fn read_header(&mut self) -> ScannerMeshResult<ScannerHeader> {
            self.calls.push("header");
            Ok(ScannerHeader::default())
        }

        fn read_time_blocks(&mut self) -> ScannerMeshResult<usize> {
            self.calls.push("blocks");
            if self.fail_blocks {
                Err(ScannerMeshError::source("truncated stream"))
            } else {
                Ok(3)
            }
        }
    }

    #[test]
    fn test_header_then_drain() {
        let mut source = RecordingSource::default();
        load_header(&mut source).unwrap();
        assert_eq!(source.calls, vec!["header", "blocks"]);
    }

    #[test]
    fn test_drain_failure_propagates() {
        let mut source = RecordingSource {
            fail_blocks: true,
            ..RecordingSource::default()
        };
        let err = load_header(&mut source).unwrap_err();
        assert!(matches!(err, ScannerMeshError::Source(_)));
        assert!(!err.is_configuration_error());
    }
}
