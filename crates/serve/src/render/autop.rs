// crates/serve/src/render/autop.rs

//! Paragraph formatting for rich-text bodies: blank lines split paragraphs,
//! single newlines become `<br>`. Raw HTML passes through untouched and is
//! expected to go through the sanitizer afterwards.

fn autop_options() -> comrak::Options<'static> {
    let mut opt = comrak::Options::default();
    opt.extension.strikethrough = true;
    opt.extension.autolink = true;
    opt.render.hardbreaks = true;
    opt.render.r#unsafe = true;
    opt
}

pub fn autop(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    if text.trim().is_empty() {
        return String::new();
    }
    comrak::markdown_to_html(&text, &autop_options())
}
