//! Step-by-step derivation text attached to every conversion result.

use std::fmt;

/// Ordered lines of a derivation. Rendered with `Display`, one line per step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Explanation {
    lines: Vec<String>,
}

impl Explanation {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            lines: vec![title.into()],
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn append(&mut self, mut other: Explanation) {
        self.lines.append(&mut other.lines);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Splits the rendered text into pieces of at most `max_chars`
    /// characters, for transports with a message size limit. Never splits a
    /// character. A `max_chars` of zero yields the whole text as one piece.
    pub fn chunks(&self, max_chars: usize) -> Vec<String> {
        let text = self.to_string();
        if max_chars == 0 || text.is_empty() {
            return vec![text];
        }

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut count = 0;
        for c in text.chars() {
            if count == max_chars {
                chunks.push(std::mem::take(&mut current));
                count = 0;
            }
            current.push(c);
            count += 1;
        }
        chunks.push(current);
        chunks
    }
}

impl<S: Into<String>> Extend<S> for Explanation {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.lines.extend(iter.into_iter().map(Into::into));
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// A converted value together with the derivation that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion<T> {
    pub value: T,
    pub explanation: Explanation,
}

impl<T> Conversion<T> {
    pub fn new(value: T, explanation: Explanation) -> Self {
        Self { value, explanation }
    }

    pub fn into_parts(self) -> (T, Explanation) {
        (self.value, self.explanation)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_display_joins_lines() {
        let mut explanation = Explanation::new("title");
        explanation.push("step 1");
        explanation.extend(["step 2", "step 3"]);
        assert_eq!(explanation.to_string(), "title\nstep 1\nstep 2\nstep 3");
        assert_eq!(explanation.lines().len(), 4);
    }

    #[rstest]
    fn test_append() {
        let mut first = Explanation::new("a");
        let second = Explanation::new("b");
        first.append(second);
        assert_eq!(first.to_string(), "a\nb");
    }

    #[rstest]
    #[case(4, vec!["abcd", "\nefg"])]
    #[case(3, vec!["abc", "d\ne", "fg"])]
    #[case(100, vec!["abcd\nefg"])]
    #[case(0, vec!["abcd\nefg"])]
    fn test_chunks(#[case] max_chars: usize, #[case] expected: Vec<&str>) {
        let mut explanation = Explanation::new("abcd");
        explanation.push("efg");
        assert_eq!(explanation.chunks(max_chars), expected);
    }

    #[rstest]
    fn test_chunks_respect_char_boundaries() {
        let explanation = Explanation::new("×××××");
        let chunks = explanation.chunks(2);
        assert_eq!(chunks, vec!["××", "××", "×"]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 2));
    }
}
