use super::decode_utf8;

pub fn extract_txt(bytes: &[u8]) -> String {
    decode_utf8(bytes)
}
