/// A marker that was replaced by a live widget.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MountRecord {
    /// Position among all markers in the document, in document order.
    pub ordinal: usize,
    /// Registry key.
    pub key: String,
    /// Instance number written on the mount point.
    pub instance_id: usize,
}

/// A marker whose key is missing or not registered.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct UnknownEmbed {
    /// Position among all markers in the document.
    pub ordinal: usize,
    /// Requested key; `None` when the marker carried no usable key.
    pub type_key: Option<String>,
}

/// A registered widget whose construction panicked.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FaultedEmbed {
    /// Position among all markers in the document.
    pub ordinal: usize,
    /// Registry key.
    pub key: String,
    /// Panic message.
    pub message: String,
}

/// Operator-facing diagnostics for one render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderReport {
    /// Total markers encountered.
    pub markers_seen: usize,
    /// Markers replaced by live widgets.
    pub mounted: Vec<MountRecord>,
    /// Markers dropped because their key could not be resolved.
    pub unknown: Vec<UnknownEmbed>,
    /// Markers dropped because their widget failed to construct.
    pub faulted: Vec<FaultedEmbed>,
    /// Parse errors the HTML parser recovered from.
    pub recovered_parse_errors: usize,
}

impl RenderReport {
    /// No embed was lost.
    pub fn is_clean(&self) -> bool {
        self.unknown.is_empty() && self.faulted.is_empty()
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "{} embed(s): {} mounted, {} unknown, {} faulted",
            self.markers_seen,
            self.mounted.len(),
            self.unknown.len(),
            self.faulted.len()
        )
    }
}
