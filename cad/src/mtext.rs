//! MTEXT inline formatting.

/// Returns `raw` MTEXT content without formatting codes.
///
/// Paragraph breaks (`\P`) become newlines. Font, height, color and
/// similar `\X...;` codes are dropped along with grouping braces.
pub fn plain_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '{' | '}' => {}
            '\\' => match chars.next() {
                Some('P' | 'X') => out.push('\n'),
                Some('~') => out.push(' '),
                Some(escaped @ ('\\' | '{' | '}')) => out.push(escaped),
                Some('L' | 'l' | 'O' | 'o' | 'K' | 'k') | None => {}
                Some(_) => {
                    // Parameterised code, runs up to the next ';'.
                    for c in chars.by_ref() {
                        if c == ';' {
                            break;
                        }
                    }
                }
            },
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::plain_text;

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("1.235"), "1.235");
        assert_eq!(plain_text("1.235\\Pnear tree"), "1.235\nnear tree");
        assert_eq!(
            plain_text("{\\fArial|b0|i0|c0|p34;1.40}\\P{\\H0.7x;BM}"),
            "1.40\nBM"
        );
        assert_eq!(plain_text("\\C1;2.5\\~m"), "2.5 m");
        assert_eq!(plain_text("a\\\\b\\{c\\}"), "a\\b{c}");
        assert_eq!(plain_text("\\Lunderlined\\l"), "underlined");
    }
}
