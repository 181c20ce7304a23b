use regex::Regex;

/// Convert a small Markdown subset to the HTML the Postiz editor stores.
///
/// Only bold emphasis and paragraph-per-line are handled: text containing
/// `**...**` pairs is rewritten line by line into `<p>` paragraphs with
/// `<strong>` tags, empty lines become empty paragraphs. Text that already
/// starts with a recognized HTML tag, or contains no bold marker, passes
/// through untouched.
pub fn format_content(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with("<p") || trimmed.starts_with("<div") || trimmed.starts_with("<span") {
        return text.to_string();
    }

    if !text.contains("**") {
        return text.to_string();
    }

    let bold = Regex::new(r"\*\*(.*?)\*\*").unwrap();

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                "<p></p>".to_string()
            } else {
                format!("<p>{}</p>", bold.replace_all(line, "<strong>$1</strong>"))
            }
        })
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_identity() {
        assert_eq!(format_content("hello world"), "hello world");
    }

    #[test]
    fn test_multiline_without_bold_is_identity() {
        let text = "line one\nline two";
        assert_eq!(format_content(text), text);
    }

    #[test]
    fn test_bold_becomes_strong_in_paragraph() {
        assert_eq!(
            format_content("hello **world**"),
            "<p>hello <strong>world</strong></p>"
        );
    }

    #[test]
    fn test_multiple_bold_pairs_on_one_line() {
        assert_eq!(
            format_content("**a** and **b**"),
            "<p><strong>a</strong> and <strong>b</strong></p>"
        );
    }

    #[test]
    fn test_each_line_becomes_a_paragraph() {
        assert_eq!(
            format_content("**title**\nbody text"),
            "<p><strong>title</strong></p><p>body text</p>"
        );
    }

    #[test]
    fn test_empty_lines_become_empty_paragraphs() {
        assert_eq!(
            format_content("**a**\n\nb"),
            "<p><strong>a</strong></p><p></p><p>b</p>"
        );
    }

    #[test]
    fn test_existing_html_passes_through() {
        let html = "<p>already <strong>formatted</strong></p>";
        assert_eq!(format_content(html), html);
        let div = "<div>**not touched**</div>";
        assert_eq!(format_content(div), div);
    }

    #[test]
    fn test_unpaired_marker_is_left_alone() {
        // A lone ** still triggers the line-to-paragraph pass, but the
        // marker itself survives because it never closes.
        assert_eq!(format_content("hello **world"), "<p>hello **world</p>");
    }
}
