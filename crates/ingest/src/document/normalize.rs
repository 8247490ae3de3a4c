/// Collapse whitespace runs to one space, strip control characters, trim.
///
/// Whitespace is collapsed before control characters are removed, so tabs,
/// newlines and carriage returns become spaces instead of disappearing.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
            continue;
        }
        in_space = false;
        if !is_stripped_control(c) {
            out.push(c);
        }
    }

    out.trim().to_string()
}

fn is_stripped_control(c: char) -> bool {
    matches!(c,
        '\u{00}'..='\u{08}'
        | '\u{0B}'
        | '\u{0C}'
        | '\u{0E}'..='\u{1F}'
        | '\u{7F}'..='\u{9F}')
}
