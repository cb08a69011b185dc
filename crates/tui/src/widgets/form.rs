//! Text input fields and the per-skill configuration form.
//!
//! `TextField` is a single-line editor with cursor movement, a character
//! limit, optional masking for secrets, and a placeholder shown while the
//! field is empty. `SkillForm` builds one field per manifest variable plus
//! the two deploy fields (Skills Folder and Skill Name) and owns focus.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use sk_protocol::manifest::{Manifest, VariableKind};
use std::collections::BTreeMap;

/// Character used in place of secret input.
const MASK_CHAR: char = '*';

/// Single-line text input.
///
/// The cursor is a character index, not a byte index, so editing stays
/// correct for multibyte input.
#[derive(Debug, Clone)]
pub struct TextField {
    label: String,
    value: String,
    cursor: usize,
    placeholder: String,
    char_limit: usize,
    masked: bool,
    required: bool,
}

impl TextField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            cursor: 0,
            placeholder: String::new(),
            char_limit: 200,
            masked: false,
            required: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Pre-fills the field and puts the cursor at the end.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor = self.value.chars().count();
        self
    }

    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit;
        self
    }

    /// Show mask characters instead of the typed value.
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// What the field shows: the value, or mask characters for secrets.
    pub fn display_value(&self) -> String {
        if self.masked {
            MASK_CHAR.to_string().repeat(self.char_count())
        } else {
            self.value.clone()
        }
    }

    /// Routes one key press into the field.
    ///
    /// Focus movement and submit keys never reach here; the app consumes
    /// them first.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                // Control chords are commands, not input.
                if !key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.insert_char(c);
                }
            }
            KeyCode::Backspace => self.delete_back(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_start(),
            KeyCode::End => self.move_end(),
            _ => {}
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, c: char) {
        if self.char_count() >= self.char_limit {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Insert pasted text at the cursor, dropping control characters.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_offset(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character under the cursor.
    pub fn delete_forward(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }

    fn label_line(&self, focused: bool) -> Line<'static> {
        let style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(Span::styled(self.label.clone(), style))
    }

    fn input_line(&self, focused: bool) -> Line<'static> {
        let prompt = Span::styled("> ".to_string(), Style::default().fg(Color::DarkGray));
        let display = self.display_value();
        let muted = Style::default().fg(Color::DarkGray);

        if display.is_empty() && !self.placeholder.is_empty() {
            let mut spans = vec![prompt];
            if focused {
                spans.push(Span::styled(
                    " ".to_string(),
                    Style::default().add_modifier(Modifier::REVERSED),
                ));
            }
            spans.push(Span::styled(self.placeholder.clone(), muted));
            return Line::from(spans);
        }

        if !focused {
            return Line::from(vec![prompt, Span::raw(display)]);
        }

        // Block cursor drawn by reversing the character under it.
        let before: String = display.chars().take(self.cursor).collect();
        let under: String = display
            .chars()
            .nth(self.cursor)
            .map(String::from)
            .unwrap_or_else(|| " ".to_string());
        let after: String = display.chars().skip(self.cursor + 1).collect();

        Line::from(vec![
            prompt,
            Span::raw(before),
            Span::styled(under, Style::default().add_modifier(Modifier::REVERSED)),
            Span::raw(after),
        ])
    }
}

/// The Configure screen's form: one field per manifest variable, then
/// Skills Folder and Skill Name.
#[derive(Debug, Clone)]
pub struct SkillForm {
    fields: Vec<TextField>,
    /// Manifest variable names, index-aligned with the leading fields.
    variable_names: Vec<String>,
    focus: usize,
}

impl SkillForm {
    /// Builds the form for a manifest.
    ///
    /// Previously entered values are restored from `saved_values`; variable
    /// defaults only ever appear as placeholders. The Skills Folder field is
    /// pre-filled from settings, the Skill Name field with the remembered
    /// folder name or the skill name itself.
    pub fn from_manifest(
        manifest: &Manifest,
        saved_values: Option<&BTreeMap<String, String>>,
        skills_folder: Option<&str>,
        folder_name: Option<&str>,
    ) -> Self {
        let mut fields = Vec::with_capacity(manifest.variables.len() + 2);
        let mut variable_names = Vec::with_capacity(manifest.variables.len());

        for variable in &manifest.variables {
            let placeholder = if variable.placeholder.is_empty() {
                variable.default.clone()
            } else {
                variable.placeholder.clone()
            };

            let mut field = TextField::new(variable.display_label()).with_placeholder(placeholder);
            if variable.kind == VariableKind::Secret {
                field = field.masked();
            }
            if variable.required {
                field = field.required();
            }
            if let Some(value) = saved_values.and_then(|values| values.get(&variable.name)) {
                field = field.with_value(value.clone());
            }

            fields.push(field);
            variable_names.push(variable.name.clone());
        }

        let mut folder_field = TextField::new("Skills Folder")
            .with_placeholder("/path/to/.claude/skills/")
            .required();
        if let Some(folder) = skills_folder.filter(|f| !f.is_empty()) {
            folder_field = folder_field.with_value(folder);
        }
        fields.push(folder_field);

        let name_field = TextField::new("Skill Name")
            .with_placeholder(manifest.name.clone())
            .with_char_limit(100)
            .with_value(folder_name.unwrap_or(&manifest.name))
            .required();
        fields.push(name_field);

        Self {
            fields,
            variable_names,
            focus: 0,
        }
    }

    pub fn focus_first(&mut self) {
        self.focus = 0;
    }

    /// Move focus to the next field, wrapping at the end.
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Move focus to the previous field, wrapping at the start.
    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            0 => self.fields.len() - 1,
            n => n - 1,
        };
    }

    pub fn focused_index(&self) -> usize {
        self.focus
    }

    /// Sends the key to the focused field.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.fields[self.focus].handle_key(key);
    }

    /// Pasted text goes into the focused field.
    pub fn insert_paste(&mut self, text: &str) {
        self.fields[self.focus].insert_str(text);
    }

    /// Label of the first required field that is still empty.
    pub fn first_missing(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.is_required() && field.is_empty())
            .map(TextField::label)
    }

    /// Variable values keyed by manifest variable name.
    pub fn variable_values(&self) -> BTreeMap<String, String> {
        self.variable_names
            .iter()
            .zip(&self.fields)
            .map(|(name, field)| (name.clone(), field.value().to_string()))
            .collect()
    }

    pub fn skills_folder(&self) -> &str {
        self.fields[self.fields.len() - 2].value()
    }

    pub fn skill_name(&self) -> &str {
        self.fields[self.fields.len() - 1].value()
    }

    /// Renders the form, scrolling so the focused field stays visible.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::with_capacity(self.fields.len() * 3);
        for (i, field) in self.fields.iter().enumerate() {
            let focused = i == self.focus;
            lines.push(field.label_line(focused));
            lines.push(field.input_line(focused));
            lines.push(Line::default());
        }

        let focused_bottom = self.focus * 3 + 2;
        let height = area.height as usize;
        let scroll = focused_bottom.saturating_sub(height.saturating_sub(1));

        let paragraph = Paragraph::new(lines).scroll((scroll as u16, 0));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn manifest(yaml: &str) -> Manifest {
        serde_yaml::from_str(yaml).expect("manifest yaml")
    }

    const WIRED_MANIFEST: &str = r#"
name: wired
description: A wired-up skill
variables:
  - name: API_URL
    label: API URL
    required: true
    placeholder: https://example.com
  - name: API_TOKEN
    label: API Token
    required: true
    type: secret
  - name: REGION
    label: Region
    default: eu-central
"#;

    #[test]
    fn test_text_field_insert_and_move() {
        let mut field = TextField::new("Name");
        for c in "abc".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.value(), "abc");

        field.move_left();
        field.insert_char('X');
        assert_eq!(field.value(), "abXc");

        field.move_start();
        field.delete_forward();
        assert_eq!(field.value(), "bXc");

        field.move_end();
        field.delete_back();
        assert_eq!(field.value(), "bX");
    }

    #[test]
    fn test_text_field_respects_char_limit() {
        let mut field = TextField::new("Name").with_char_limit(3);
        for c in "abcdef".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.value(), "abc");
    }

    #[test]
    fn test_text_field_cursor_is_char_based() {
        let mut field = TextField::new("Name");
        for c in "héllo".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.value(), "héllo");

        // Three backspaces remove three characters, not three bytes.
        field.delete_back();
        field.delete_back();
        field.delete_back();
        assert_eq!(field.value(), "hé");

        field.delete_back();
        assert_eq!(field.value(), "h");
    }

    #[test]
    fn test_text_field_masks_display_but_not_value() {
        let mut field = TextField::new("Token").masked();
        field.insert_str("hunter2");

        assert_eq!(field.value(), "hunter2");
        assert_eq!(field.display_value(), "*******");
    }

    #[test]
    fn test_text_field_paste_drops_control_characters() {
        let mut field = TextField::new("URL");
        field.insert_str("https://example.com\n\ttoken");
        assert_eq!(field.value(), "https://example.comtoken");
    }

    #[test]
    fn test_text_field_ignores_control_chords() {
        let mut field = TextField::new("Name");
        field.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        field.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(field.value(), "a");
    }

    #[test]
    fn test_form_built_from_manifest() {
        let manifest = manifest(WIRED_MANIFEST);
        let form = SkillForm::from_manifest(&manifest, None, None, None);

        // Three variables plus the two deploy fields.
        assert_eq!(form.fields.len(), 5);
        assert_eq!(form.fields[0].label(), "API URL");
        assert_eq!(form.fields[1].label(), "API Token");
        assert_eq!(form.fields[3].label(), "Skills Folder");
        assert_eq!(form.fields[4].label(), "Skill Name");

        // Skill Name is pre-filled, the folder field is not.
        assert_eq!(form.skill_name(), "wired");
        assert_eq!(form.skills_folder(), "");
    }

    #[test]
    fn test_form_defaults_are_placeholders_not_values() {
        let manifest = manifest(WIRED_MANIFEST);
        let form = SkillForm::from_manifest(&manifest, None, None, None);

        // REGION has a default but starts empty.
        assert_eq!(form.fields[2].value(), "");
        assert_eq!(form.fields[2].placeholder, "eu-central");
    }

    #[test]
    fn test_form_restores_saved_values_and_folder() {
        let manifest = manifest(WIRED_MANIFEST);
        let mut saved = BTreeMap::new();
        saved.insert("API_TOKEN".to_string(), "secret".to_string());

        let form = SkillForm::from_manifest(
            &manifest,
            Some(&saved),
            Some("/home/u/.claude/skills"),
            Some("wired-dev"),
        );

        assert_eq!(form.fields[1].value(), "secret");
        assert_eq!(form.skills_folder(), "/home/u/.claude/skills");
        assert_eq!(form.skill_name(), "wired-dev");
    }

    #[test]
    fn test_form_focus_wraps_both_directions() {
        let manifest = manifest(WIRED_MANIFEST);
        let mut form = SkillForm::from_manifest(&manifest, None, None, None);

        assert_eq!(form.focused_index(), 0);
        form.focus_prev();
        assert_eq!(form.focused_index(), 4);
        form.focus_next();
        assert_eq!(form.focused_index(), 0);

        for _ in 0..5 {
            form.focus_next();
        }
        assert_eq!(form.focused_index(), 0);
    }

    #[test]
    fn test_form_first_missing_walks_required_fields() {
        let manifest = manifest(WIRED_MANIFEST);
        let mut form = SkillForm::from_manifest(&manifest, None, None, None);

        assert_eq!(form.first_missing(), Some("API URL"));

        form.fields[0].insert_str("https://example.com");
        assert_eq!(form.first_missing(), Some("API Token"));

        form.fields[1].insert_str("tok");
        // REGION is optional and stays empty; the folder field is next.
        assert_eq!(form.first_missing(), Some("Skills Folder"));

        form.fields[3].insert_str("/tmp/skills");
        assert_eq!(form.first_missing(), None);
    }

    #[test]
    fn test_form_collects_variable_values_by_name() {
        let manifest = manifest(WIRED_MANIFEST);
        let mut form = SkillForm::from_manifest(&manifest, None, None, None);

        form.fields[0].insert_str("https://example.com");
        form.fields[1].insert_str("tok");

        let values = form.variable_values();
        assert_eq!(values.len(), 3);
        assert_eq!(values["API_URL"], "https://example.com");
        assert_eq!(values["API_TOKEN"], "tok");
        assert_eq!(values["REGION"], "");
    }

    #[test]
    fn test_form_paste_goes_to_focused_field() {
        let manifest = manifest(WIRED_MANIFEST);
        let mut form = SkillForm::from_manifest(&manifest, None, None, None);

        form.focus_next();
        form.insert_paste("pasted-token");
        assert_eq!(form.fields[1].value(), "pasted-token");
        assert_eq!(form.fields[0].value(), "");
    }

    #[test]
    fn test_form_render_masks_secrets() {
        let manifest = manifest(WIRED_MANIFEST);
        let mut saved = BTreeMap::new();
        saved.insert("API_TOKEN".to_string(), "hunter2".to_string());
        let form = SkillForm::from_manifest(&manifest, Some(&saved), None, None);

        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| form.render(frame, frame.area()))
            .unwrap();

        let content = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();

        assert!(content.contains("API URL"));
        assert!(content.contains("*******"));
        assert!(!content.contains("hunter2"));
        // Placeholder for the empty URL field.
        assert!(content.contains("https://example.com"));
    }
}
