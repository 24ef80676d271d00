use std::ops::Range;

/// A wrapped line together with the source words it covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrappedLine {
    pub text: String,
    /// Indices into the word sequence the wrapper was built from.
    pub words: Range<usize>,
}

/// Lazy greedy word wrapper.
///
/// Words are appended to the current line, joined by one space, for as long
/// as the measured line stays within `max_width`. A word that is too wide on
/// its own still gets its own line; words are never split.
///
/// The words come from `split(' ')` on the caller side, so repeated spaces
/// show up as empty words and are kept verbatim.
pub struct WordWrap<'a, F> {
    words: &'a [&'a str],
    next_word: usize,
    max_width: f32,
    measure: F,
}

impl<'a, F> WordWrap<'a, F>
where
    F: FnMut(&str) -> f32,
{
    pub fn new(words: &'a [&'a str], max_width: f32, measure: F) -> Self {
        Self {
            words,
            next_word: 0,
            max_width,
            measure,
        }
    }

    /// Index of the first word that has not been placed on a line yet.
    pub fn position(&self) -> usize {
        self.next_word
    }
}

impl<F> Iterator for WordWrap<'_, F>
where
    F: FnMut(&str) -> f32,
{
    type Item = WrappedLine;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_word;
        let mut line = String::new();
        let mut end = start;

        while let Some(word) = self.words.get(end) {
            if line.is_empty() {
                line.push_str(word);
            } else {
                let candidate = format!("{line} {word}");
                if (self.measure)(&candidate) > self.max_width {
                    break;
                }
                line = candidate;
            }
            end += 1;
        }

        self.next_word = end;

        // only trailing empty words can leave the line blank
        if line.is_empty() {
            return None;
        }

        Some(WrappedLine {
            text: line,
            words: start..end,
        })
    }
}

/// Wraps `text` eagerly and returns the line strings.
pub fn wrap_text(text: &str, max_width: f32, measure: impl FnMut(&str) -> f32) -> Vec<String> {
    let words: Vec<&str> = text.split(' ').collect();
    WordWrap::new(&words, max_width, measure)
        .map(|line| line.text)
        .collect()
}
