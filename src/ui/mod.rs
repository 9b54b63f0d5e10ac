//! Server-rendered HTML.
//!
//! Pages are plain strings assembled with `format!` from small component
//! functions. Anything that came from a visitor goes through [`escape`].
//!
//! # Structure
//!
//! - [`components`]: buttons, icons and badges
//! - [`layout`]: document shell, sidebar, header, bottom nav and toast
//! - [`views`]: one module per screen

pub mod components;
pub mod layout;
pub mod views;

pub use layout::{Chrome, render_page};

/// Escape text for use in HTML content and quoted attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#x27;y&#x27;&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("¿Cómo estás?"), "¿Cómo estás?");
    }
}
