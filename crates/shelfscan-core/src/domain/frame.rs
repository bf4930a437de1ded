//! One pass of recognized text from the camera pipeline

/// An ordered list of raw text blocks from a single recognition pass.
///
/// Frames are ephemeral: produced by the recognition collaborator, consumed
/// once by [`crate::scan::ScanSession::frame_detected`], never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTextFrame {
    pub blocks: Vec<String>,
}

impl DetectedTextFrame {
    pub fn new(blocks: Vec<String>) -> Self {
        Self { blocks }
    }
}

impl<S: Into<String>> FromIterator<S> for DetectedTextFrame {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().map(Into::into).collect(),
        }
    }
}
