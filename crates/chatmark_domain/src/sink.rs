use crate::Document;

/// Receives every document produced while a message streams.
///
/// The sink owns diffing and redrawing. It is called once per reparse with
/// `still_streaming = true` and a final time with `still_streaming = false`
/// carrying the same document as the terminal reparse.
pub trait DocumentSink {
    fn on_document(&mut self, document: &Document, still_streaming: bool) -> anyhow::Result<()>;
}

impl<T: DocumentSink + ?Sized> DocumentSink for &mut T {
    fn on_document(&mut self, document: &Document, still_streaming: bool) -> anyhow::Result<()> {
        (**self).on_document(document, still_streaming)
    }
}
