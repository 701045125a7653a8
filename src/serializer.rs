//! Document encoding. Compact JSON by default, pretty on request.

use crate::error::{Error, Result};
use crate::Document;

/// Converts the document to/from bytes for persistence.
#[derive(Clone, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Compact JSON, everything on one line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented JSON for databases you want to read in an editor.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Encode the document to bytes.
    pub fn serialize(&self, doc: &Document) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(doc)
        } else {
            serde_json::to_vec(doc)
        };
        bytes.map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Decode bytes back into a document. Anything that isn't a JSON
    /// object at the top level is rejected.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<Document> {
        serde_json::from_slice(bytes).map_err(Error::from)
    }
}
