use super::decode_utf8;

/// Markdown is indexed as written; heading markers stay in the text.
pub fn extract_md(bytes: &[u8]) -> String {
    decode_utf8(bytes)
}
