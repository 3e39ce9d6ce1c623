//! Content units handed over by the build pipeline.

use super::digest::ContentDigest;

/// An immutable unit of emitted content: the bytes plus the logical
/// naming metadata the pipeline knows about them.
///
/// The digest depends on the bytes alone, never on the metadata, so two
/// units with byte-identical content always fingerprint identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUnit {
    bytes: Vec<u8>,
    name: String,
    ext: String,
    id: Option<String>,
}

impl ContentUnit {
    /// Create a unit from its logical name, extension and content bytes.
    pub fn new(
        name: impl Into<String>,
        ext: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            name: name.into(),
            ext: ext.into(),
            id: None,
        }
    }

    /// Attach a logical identifier (e.g. a chunk or group id).
    ///
    /// Only needed when the naming template references `[id]`.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Content bytes.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Logical name (filename stem as the pipeline knows it).
    #[inline]
    pub fn logical_name(&self) -> &str {
        &self.name
    }

    /// Logical extension, without a leading dot.
    #[inline]
    pub fn logical_ext(&self) -> &str {
        &self.ext
    }

    /// Logical identifier, if one was attached.
    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Compute the content digest of this unit's bytes.
    #[inline]
    pub fn digest(&self) -> ContentDigest {
        ContentDigest::of(&self.bytes)
    }
}
