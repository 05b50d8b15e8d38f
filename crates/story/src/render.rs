use manos_shortcuts::{
    ContentBlock, ContentState, StyleSet, TextDecoration, block_style_class, custom_style,
};

const RESET: &str = "\x1b[0m";

fn color_code(color: &str) -> Option<&'static str> {
    match color {
        "red" => Some("31"),
        _ => None,
    }
}

fn sgr_codes(style: StyleSet, heading: bool) -> Vec<&'static str> {
    let mut codes = Vec::new();
    if style.bold || heading {
        codes.push("1");
    }
    for inline in style.iter() {
        let Some(rule) = custom_style(inline) else {
            continue;
        };
        if let Some(code) = rule.color.and_then(color_code) {
            codes.push(code);
        }
        if let Some(TextDecoration::Underline) = rule.text_decoration {
            codes.push("4");
        }
    }
    codes
}

pub fn render_block(block: &ContentBlock) -> String {
    let heading = block_style_class(block) == Some("header-one");
    let mut out = String::new();
    if heading {
        out.push_str("\x1b[1m▌ ");
        out.push_str(RESET);
    }

    let chars: Vec<char> = block.text().chars().collect();
    for (range, style) in block.styles().iter_runs() {
        let text: String = chars[range].iter().collect();
        let codes = sgr_codes(style, heading);
        if codes.is_empty() {
            out.push_str(&text);
        } else {
            out.push_str(&format!("\x1b[{}m{text}{RESET}", codes.join(";")));
        }
    }
    out
}

pub fn render(content: &ContentState) -> String {
    content
        .blocks()
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}
