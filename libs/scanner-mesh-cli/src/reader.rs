//! JSON scanner descriptions.
//!
//! A document holds the header and the time blocks that follow it:
//!
//! ```json
//! { "header": { "scanner": { ... } }, "time_blocks": [ ... ] }
//! ```
//!
//! Time blocks are kept opaque; they are only counted when drained.

use std::io::Read;

use scanner_mesh::{ScannerHeader, ScannerMeshError, ScannerMeshResult, ScannerSource};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ScannerDocument {
    header: ScannerHeader,
    #[serde(default)]
    time_blocks: Vec<Value>,
}

/// Reads a scanner description from a JSON document.
#[derive(Debug)]
pub struct JsonScannerSource {
    header: Option<ScannerHeader>,
    time_blocks: Vec<Value>,
}

impl JsonScannerSource {
    /// Parses the whole document from `reader`.
    pub fn from_reader<R: Read>(reader: R) -> ScannerMeshResult<Self> {
        let document: ScannerDocument = serde_json::from_reader(reader)
            .map_err(|e| ScannerMeshError::source(format!("invalid scanner document: {e}")))?;
        Ok(Self {
            header: Some(document.header),
            time_blocks: document.time_blocks,
        })
    }
}

impl ScannerSource for JsonScannerSource {
    fn read_header(&mut self) -> ScannerMeshResult<ScannerHeader> {
        self.header
            .take()
            .ok_or_else(|| ScannerMeshError::source("header was already read"))
    }

    fn read_time_blocks(&mut self) -> ScannerMeshResult<usize> {
        if self.header.is_some() {
            return Err(ScannerMeshError::source(
                "time blocks requested before the header",
            ));
        }
        Ok(self.time_blocks.drain(..).count())
    }
}
