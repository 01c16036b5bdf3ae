/// The element a picker is bound to: either an editable text input whose value
/// is parsed on every keystroke, or a read-only display whose text is replaced
/// on commit.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Input,
    Display,
}

/// A single keyboard edit applied to a text input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

pub trait HostField: Send + Sync {
    fn kind(&self) -> HostKind;

    /// Current value (input) or text content (display)
    fn value(&self) -> String;

    fn set_value(&mut self, value: &str);

    /// Apply a keystroke, returning whether the value changed.
    /// Read-only hosts ignore every edit.
    fn edit(&mut self, _edit: Edit) -> bool {
        false
    }

    /// Cursor position in characters, for hosts that have one
    fn cursor(&self) -> Option<usize> {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Position of cursor in characters
    character_index: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let character_index = value.chars().count();
        Self {
            value,
            character_index,
        }
    }

    fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.character_index.saturating_sub(1);
        self.character_index = self.clamp_cursor(cursor_moved_left);
    }

    fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.character_index.saturating_add(1);
        self.character_index = self.clamp_cursor(cursor_moved_right);
    }

    fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index();
        self.value.insert(index, new_char);
        self.move_cursor_right();
    }

    /// Returns the byte index based on the character position.
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.character_index)
            .unwrap_or(self.value.len())
    }

    /// Remove the character at `index` (in characters), rebuilding the string
    /// so multi-byte characters are never split.
    fn remove_char_at(&mut self, index: usize) {
        let before = self.value.chars().take(index);
        let after = self.value.chars().skip(index + 1);
        self.value = before.chain(after).collect();
    }

    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.value.chars().count())
    }
}

impl HostField for TextInput {
    fn kind(&self) -> HostKind {
        HostKind::Input
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.character_index = self.value.chars().count();
    }

    fn edit(&mut self, edit: Edit) -> bool {
        match edit {
            Edit::Insert(c) => {
                self.enter_char(c);
                true
            }
            Edit::Backspace => {
                if self.character_index == 0 {
                    return false;
                }
                self.remove_char_at(self.character_index - 1);
                self.move_cursor_left();
                true
            }
            Edit::Delete => {
                if self.character_index >= self.value.chars().count() {
                    return false;
                }
                self.remove_char_at(self.character_index);
                true
            }
            Edit::Left => {
                self.move_cursor_left();
                false
            }
            Edit::Right => {
                self.move_cursor_right();
                false
            }
            Edit::Home => {
                self.character_index = 0;
                false
            }
            Edit::End => {
                self.character_index = self.value.chars().count();
                false
            }
        }
    }

    fn cursor(&self) -> Option<usize> {
        Some(self.character_index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayElement {
    text: String,
}

impl DisplayElement {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl HostField for DisplayElement {
    fn kind(&self) -> HostKind {
        HostKind::Display
    }

    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.text = value.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::new("02/15/202");
        assert_eq!(input.cursor(), Some(9));
        assert!(input.edit(Edit::Insert('4')));
        assert_eq!(input.value(), "02/15/2024");

        input.edit(Edit::Home);
        input.edit(Edit::Right);
        assert!(input.edit(Edit::Backspace));
        assert_eq!(input.value(), "2/15/2024");
        assert_eq!(input.cursor(), Some(0));
        assert!(!input.edit(Edit::Backspace));

        assert!(input.edit(Edit::Delete));
        assert_eq!(input.value(), "/15/2024");
    }

    #[test]
    fn test_text_input_multibyte() {
        let mut input = TextInput::new("2024年");
        assert!(input.edit(Edit::Backspace));
        assert_eq!(input.value(), "2024");
        input.edit(Edit::Left);
        input.edit(Edit::Insert('é'));
        assert_eq!(input.value(), "202é4");
    }

    #[test]
    fn test_set_value_moves_cursor_to_end() {
        let mut input = TextInput::new("");
        input.set_value("2024-02-15");
        assert_eq!(input.cursor(), Some(10));
    }

    #[test]
    fn test_display_is_read_only() {
        let mut display = DisplayElement::new("02/15/2024");
        assert_eq!(display.kind(), HostKind::Display);
        assert!(!display.edit(Edit::Insert('x')));
        assert_eq!(display.value(), "02/15/2024");
        display.set_value("03/01/2024");
        assert_eq!(display.value(), "03/01/2024");
        assert_eq!(display.cursor(), None);
    }
}
