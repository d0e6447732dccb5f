/// Maps span roles to their presentation. Implementations decide colors and
/// fonts; the parser never does.
pub trait SpanStyler {
    fn plain(&self, text: &str) -> String;
    fn heading(&self, level: u8, text: &str) -> String;
    fn list_item(&self, text: &str) -> String;
    fn quote(&self, text: &str) -> String;
    fn inline_code(&self, text: &str) -> String;
    fn block_code(&self, code: &str, language: Option<&str>) -> String;
    fn bold(&self, text: &str) -> String;
    fn italic(&self, text: &str) -> String;
    fn caption(&self, text: &str) -> String;
}
