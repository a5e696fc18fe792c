//! Word entry form: one text field per pair.

use arrayvec::ArrayVec;

/// Largest game size.
pub const MAX_FIELDS: usize = 10;
/// Characters accepted per word.
pub const MAX_WORD_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordForm {
    fields: ArrayVec<String, MAX_FIELDS>,
    focus: usize,
}

impl WordForm {
    pub fn new(count: usize) -> Self {
        Self::with_words(count, &[])
    }

    /// Form with `count` fields, prefilled from `words` where available.
    pub fn with_words(count: usize, words: &[String]) -> Self {
        let fields = (0..count.min(MAX_FIELDS))
            .map(|i| words.get(i).cloned().unwrap_or_default())
            .collect();
        Self { fields, focus: 0 }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn insert(&mut self, ch: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.chars().count() < MAX_WORD_LEN {
                field.push(ch);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.pop();
        }
    }

    /// Focus the next field, wrapping around.
    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Fields with text after trimming.
    pub fn filled(&self) -> usize {
        self.fields.iter().filter(|f| !f.trim().is_empty()).count()
    }

    pub fn is_complete(&self) -> bool {
        !self.fields.is_empty() && self.filled() == self.fields.len()
    }

    /// Focus the first blank field, if any.
    pub fn focus_first_blank(&mut self) -> bool {
        match self.fields.iter().position(|f| f.trim().is_empty()) {
            Some(i) => {
                self.focus = i;
                true
            }
            None => false,
        }
    }

    pub fn words(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.trim().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = WordForm::new(4);
        for ch in "cat".chars() {
            form.insert(ch);
        }
        form.next_field();
        form.insert('d');
        form.backspace();
        form.insert('o');

        assert_eq!(form.fields()[0], "cat");
        assert_eq!(form.fields()[1], "o");
        assert_eq!(form.filled(), 2);
        assert!(!form.is_complete());
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = WordForm::new(4);
        form.prev_field();
        assert_eq!(form.focus(), 3);
        form.next_field();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn test_prefill_and_complete() {
        let words: Vec<String> = ["cat", "dog", "owl", " fox "]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let form = WordForm::with_words(4, &words);
        assert!(form.is_complete());
        assert_eq!(form.words()[3], "fox");

        let partial = WordForm::with_words(6, &words);
        assert_eq!(partial.len(), 6);
        assert_eq!(partial.filled(), 4);
    }

    #[test]
    fn test_focus_first_blank() {
        let mut form = WordForm::with_words(3, &["a".to_string(), " ".to_string()]);
        assert!(form.focus_first_blank());
        assert_eq!(form.focus(), 1);
    }

    #[test]
    fn test_word_length_is_capped() {
        let mut form = WordForm::new(1);
        for _ in 0..40 {
            form.insert('x');
        }
        assert_eq!(form.fields()[0].len(), MAX_WORD_LEN);
    }

    #[test]
    fn test_field_count_is_capped() {
        assert_eq!(WordForm::new(12).len(), MAX_FIELDS);
    }
}
