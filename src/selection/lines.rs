/// Splits file content on `\n`, dropping the single empty element left by
/// a trailing newline.
pub fn split_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
}

/// Joins lines with `\n`, terminating with a newline unless there are none.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut content = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_drops_one_trailing_newline() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\n\n"), vec!["a", ""]);
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("\n"), vec![""]);
    }

    #[test]
    fn test_split_keeps_carriage_returns() {
        assert_eq!(split_lines("a\r\nb\r\n"), vec!["a\r", "b\r"]);
    }

    #[test]
    fn test_join() {
        assert_eq!(join_lines(&["c", "d", "e"]), "c\nd\ne\n");
        assert_eq!(join_lines::<&str>(&[]), "");
        assert_eq!(join_lines(&[""]), "\n");
    }
}
