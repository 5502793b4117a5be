//! Instruction markup stripping
//!
//! The Directions service emits `html_instructions` with inline markup
//! (`<b>`, `<div style="...">`, entities). The normalized model stores plain
//! text, so tags are removed here at the adapter boundary.

/// Strip HTML tags and entities from an instruction string.
///
/// `<div>` and `<br>` boundaries become spaces so that sentences glued
/// together by block markup ("Turn left<div>Destination will be on the
/// right</div>") stay separated. Whitespace is collapsed afterwards.
pub(crate) fn strip_instruction_html(input: &str) -> String {
    let mut text = String::with_capacity(input.len());
    let mut tag = String::new();
    let mut in_tag = false;

    for c in input.chars() {
        if in_tag {
            if c == '>' {
                in_tag = false;
                if is_block_boundary(&tag) {
                    text.push(' ');
                }
                tag.clear();
            } else {
                tag.push(c);
            }
        } else if c == '<' {
            in_tag = true;
        } else {
            text.push(c);
        }
    }

    let decoded = decode_entities(&text);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_block_boundary(tag: &str) -> bool {
    let name = tag
        .trim_start_matches('/')
        .split([' ', '\t'])
        .next()
        .unwrap_or("")
        .trim_end_matches('/');
    matches!(name, "div" | "br" | "p")
}

fn decode_entities(input: &str) -> String {
    // `&amp;` last, so "&amp;lt;" stays "&lt;"
    input
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
