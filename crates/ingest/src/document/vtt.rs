use super::decode_utf8;

/// Keep only cue payload lines from a WebVTT subtitle file.
///
/// Drops blank lines, the `WEBVTT` header, cue timings (`-->`) and numeric
/// cue identifiers, then joins what is left with single spaces.
pub fn extract_vtt(bytes: &[u8]) -> String {
    let content = decode_utf8(bytes);

    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !is_cue_noise(line))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_cue_noise(line: &str) -> bool {
    line.is_empty()
        || line.starts_with("WEBVTT")
        || line.contains("-->")
        || line.chars().all(|c| c.is_ascii_digit())
}
