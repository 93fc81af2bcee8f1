use crate::claude_sync;
use crate::config::AppContext;
use crate::probe::ProviderStatus;
use crate::schema::{self, ConfigMap, FieldDef, FieldKind, TabDef};
use crate::store::SettingsStore;

/// Single-line text buffer with a char-based cursor. All edits are
/// char-boundary safe; the cursor stays within `0..=value.chars().count()`.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        let len = self.value.chars().count();
        self.cursor = (self.cursor + 1).min(len);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = Self::byte_index(&self.value, self.cursor);
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 || self.value.is_empty() {
            return;
        }
        let start = Self::byte_index(&self.value, self.cursor - 1);
        let end = Self::byte_index(&self.value, self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor -= 1;
    }

    pub fn delete(&mut self) {
        let len = self.value.chars().count();
        if self.value.is_empty() || self.cursor >= len {
            return;
        }
        let start = Self::byte_index(&self.value, self.cursor);
        let end = Self::byte_index(&self.value, self.cursor + 1);
        self.value.replace_range(start..end, "");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigating,
    EditingText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Ok,
    Warn,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub message: String,
    pub severity: Severity,
}

impl StatusLine {
    fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// Abstract inputs shared by both renderers; raw key/widget events are
/// translated into these before they reach the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputIntent {
    NextTab,
    PrevTab,
    MoveUp,
    MoveDown,
    CycleLeft,
    CycleRight,
    Activate,
    ToggleRevealSecrets,
    Save,
    TestProviders,
    Quit,
    Confirm,
    Cancel,
    InsertChar(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    Home,
    End,
}

/// Work the shell must run outside the state machine after a transition.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Run the provider probe batch and feed the outcome back through
    /// [`FormEditor::apply_probe_results`].
    RunProbe,
}

/// The field-navigation-and-editing state machine. Owns the live ConfigMap,
/// the last-persisted snapshot, and all cursor/mode state; renderers only
/// read it and feed intents in, one at a time, each processed to completion.
///
/// Destructive text mutation is confined to the edit buffer and committed
/// only on an explicit Confirm, so canceling an edit is always a true no-op
/// on the map. Choice fields never enter the edit mode; their value space is
/// closed and cycling is always reversible.
pub struct FormEditor {
    ctx: AppContext,
    store: SettingsStore,
    cfg: ConfigMap,
    saved: ConfigMap,
    tab_idx: usize,
    field_idx: usize,
    mode: Mode,
    input: TextInput,
    reveal_secrets: bool,
    status: Option<StatusLine>,
    last_probe: Option<Vec<ProviderStatus>>,
    should_quit: bool,
}

impl FormEditor {
    pub fn new(ctx: AppContext) -> Self {
        let store = SettingsStore::new(&ctx);
        let cfg = store.load();
        let saved = cfg.clone();
        Self {
            ctx,
            store,
            cfg,
            saved,
            tab_idx: 0,
            field_idx: 0,
            mode: Mode::Navigating,
            input: TextInput::default(),
            reveal_secrets: false,
            status: None,
            last_probe: None,
            should_quit: false,
        }
    }

    pub fn tab_idx(&self) -> usize {
        self.tab_idx
    }

    pub fn field_idx(&self) -> usize {
        self.field_idx
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn reveal_secrets(&self) -> bool {
        self.reveal_secrets
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn cfg(&self) -> &ConfigMap {
        &self.cfg
    }

    pub fn dirty(&self) -> bool {
        self.cfg != self.saved
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn probe_results(&self) -> Option<&[ProviderStatus]> {
        self.last_probe.as_deref()
    }

    pub fn current_tab(&self) -> &'static TabDef {
        &schema::tabs()[self.tab_idx]
    }

    pub fn current_field(&self) -> Option<&'static FieldDef> {
        self.current_tab().fields.get(self.field_idx)
    }

    /// Current value of a field, falling back to its schema default.
    pub fn field_value(&self, field: &FieldDef) -> &str {
        self.cfg
            .get(field.key)
            .map(String::as_str)
            .unwrap_or(field.default)
    }

    /// Presentation form of a field's value: choice labels for choices,
    /// masking for unrevealed secrets, `(not set)` for empty text.
    pub fn display_value(&self, field: &FieldDef) -> String {
        let value = self.field_value(field);
        match field.kind {
            FieldKind::Choice => field
                .choices
                .iter()
                .find(|c| c.value == value)
                .map(|c| c.label.to_string())
                .unwrap_or_else(|| value.to_string()),
            FieldKind::Secret if !self.reveal_secrets => masked_secret(value),
            FieldKind::Secret | FieldKind::Text => {
                if value.is_empty() {
                    "(not set)".to_string()
                } else {
                    value.to_string()
                }
            }
        }
    }

    pub fn handle(&mut self, intent: InputIntent) -> Effect {
        if self.should_quit {
            return Effect::None;
        }
        match self.mode {
            Mode::Navigating => self.handle_nav(intent),
            Mode::EditingText => {
                self.handle_edit(intent);
                Effect::None
            }
        }
    }

    fn handle_nav(&mut self, intent: InputIntent) -> Effect {
        let kind = self.current_field().map(|f| f.kind);
        match intent {
            InputIntent::NextTab => self.switch_tab(1),
            InputIntent::PrevTab => self.switch_tab(-1),
            InputIntent::MoveUp => {
                self.field_idx = self.field_idx.saturating_sub(1);
            }
            InputIntent::MoveDown => {
                let last = self.current_tab().fields.len().saturating_sub(1);
                self.field_idx = (self.field_idx + 1).min(last);
            }
            InputIntent::CycleLeft => match kind {
                Some(FieldKind::Choice) => self.cycle_choice(-1),
                _ => self.switch_tab(-1),
            },
            InputIntent::CycleRight => match kind {
                Some(FieldKind::Choice) => self.cycle_choice(1),
                _ => self.switch_tab(1),
            },
            InputIntent::Activate => match kind {
                Some(FieldKind::Choice) => self.cycle_choice(1),
                Some(FieldKind::Text) | Some(FieldKind::Secret) => self.begin_edit(),
                None => {}
            },
            InputIntent::ToggleRevealSecrets => {
                self.reveal_secrets = !self.reveal_secrets;
            }
            InputIntent::Save => self.do_save(),
            InputIntent::TestProviders => return self.begin_probe(),
            InputIntent::Quit => self.do_quit(),
            // Editing intents are meaningless while navigating.
            _ => {}
        }
        Effect::None
    }

    fn handle_edit(&mut self, intent: InputIntent) {
        let Some(field) = self.current_field() else {
            self.mode = Mode::Navigating;
            return;
        };
        match intent {
            InputIntent::Confirm => {
                let new_value = std::mem::take(&mut self.input).value;
                if self.field_value(field) != new_value {
                    self.cfg.insert(field.key.to_string(), new_value);
                }
                self.mode = Mode::Navigating;
            }
            InputIntent::Cancel => {
                self.input = TextInput::default();
                self.mode = Mode::Navigating;
            }
            InputIntent::InsertChar(c) => {
                if !c.is_control() {
                    self.input.insert_char(c);
                }
            }
            InputIntent::Backspace => self.input.backspace(),
            InputIntent::Delete => self.input.delete(),
            InputIntent::CursorLeft => self.input.move_left(),
            InputIntent::CursorRight => self.input.move_right(),
            InputIntent::Home => self.input.move_home(),
            InputIntent::End => self.input.move_end(),
            // Navigation intents are ignored until the edit is resolved.
            _ => {}
        }
    }

    fn switch_tab(&mut self, delta: isize) {
        let count = schema::tabs().len();
        self.tab_idx = (self.tab_idx as isize + delta).rem_euclid(count as isize) as usize;
        let last = self.current_tab().fields.len().saturating_sub(1);
        self.field_idx = self.field_idx.min(last);
        self.status = None;
    }

    fn cycle_choice(&mut self, direction: isize) {
        let Some(field) = self.current_field() else {
            return;
        };
        if field.choices.is_empty() {
            return;
        }
        let current = self.field_value(field);
        // An unknown stored value counts as the first entry before cycling.
        let idx = field
            .choices
            .iter()
            .position(|c| c.value == current)
            .unwrap_or(0);
        let count = field.choices.len() as isize;
        let next = (idx as isize + direction).rem_euclid(count) as usize;
        self.cfg
            .insert(field.key.to_string(), field.choices[next].value.to_string());
    }

    fn begin_edit(&mut self) {
        let Some(field) = self.current_field() else {
            return;
        };
        self.input = TextInput::new(self.field_value(field));
        self.mode = Mode::EditingText;
    }

    fn do_save(&mut self) {
        match self.store.save(&self.cfg) {
            Ok(()) => {
                self.saved = self.cfg.clone();
                let synced = claude_sync::sync_claude_config(&self.ctx, &self.cfg);
                let message = if synced {
                    "Saved! (Claude Code config updated)"
                } else {
                    "Saved!"
                };
                self.status = Some(StatusLine::new(message, Severity::Ok));
            }
            Err(err) => {
                self.status = Some(StatusLine::new(
                    format!("Save failed: {err}"),
                    Severity::Warn,
                ));
            }
        }
    }

    /// Persist first so the probe reflects in-progress edits, then hand the
    /// batch to the shell. Results come back via [`apply_probe_results`].
    ///
    /// [`apply_probe_results`]: FormEditor::apply_probe_results
    fn begin_probe(&mut self) -> Effect {
        match self.store.save(&self.cfg) {
            Ok(()) => self.saved = self.cfg.clone(),
            Err(err) => log::warn!("failed to persist settings before probe: {err}"),
        }
        self.status = Some(StatusLine::new("Testing providers...", Severity::Info));
        Effect::RunProbe
    }

    fn do_quit(&mut self) {
        if self.dirty() {
            match self.store.save(&self.cfg) {
                Ok(()) => {
                    self.saved = self.cfg.clone();
                    claude_sync::sync_claude_config(&self.ctx, &self.cfg);
                }
                Err(err) => log::warn!("failed to persist settings on exit: {err}"),
            }
        }
        self.should_quit = true;
    }

    /// Fold a completed probe batch into the status line and keep it around
    /// for the status-dot display.
    pub fn apply_probe_results(&mut self, results: Vec<ProviderStatus>) {
        let (message, severity) = summarize(&results);
        self.status = Some(StatusLine::new(message, severity));
        self.last_probe = Some(results);
    }

    /// Display-only overlay refresh (startup dots); leaves the status line
    /// alone.
    pub fn set_probe_results(&mut self, results: Vec<ProviderStatus>) {
        self.last_probe = Some(results);
    }
}

/// Combined one-line probe summary; `Ok` only when every provider is healthy.
pub fn summarize(results: &[ProviderStatus]) -> (String, Severity) {
    let parts: Vec<String> = results
        .iter()
        .map(|r| {
            let mark = if r.healthy { "OK" } else { "!!" };
            format!("{}: {} {}", r.provider, mark, r.detail)
        })
        .collect();
    let severity = if results.iter().all(|r| r.healthy) {
        Severity::Ok
    } else {
        Severity::Warn
    };
    (parts.join("  |  "), severity)
}

/// Display form of an unrevealed secret. Never applied to stored or buffered
/// values.
pub fn masked_secret(value: &str) -> String {
    if value.is_empty() {
        return "(not set)".to_string();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 8))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> (tempfile::TempDir, FormEditor) {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = AppContext::new(
            dir.path().join("settings.json"),
            dir.path().join("claude.json"),
        );
        (dir, FormEditor::new(ctx))
    }

    fn status(provider: &'static str, healthy: bool) -> ProviderStatus {
        ProviderStatus {
            provider,
            detail: if healthy { "API key set" } else { "Not reachable" }.to_string(),
            healthy,
        }
    }

    #[test]
    fn starts_navigating_at_origin_and_clean() {
        let (_dir, ed) = editor();
        assert_eq!(ed.tab_idx(), 0);
        assert_eq!(ed.field_idx(), 0);
        assert_eq!(ed.mode(), Mode::Navigating);
        assert!(!ed.dirty());
    }

    #[test]
    fn tab_switch_wraps_and_clamps_field_index() {
        let (_dir, mut ed) = editor();
        // Providers has 6 fields; move to the last one.
        for _ in 0..5 {
            let _ = ed.handle(InputIntent::MoveDown);
        }
        assert_eq!(ed.field_idx(), 5);

        // LM Studio only has 2 fields, so the index clamps.
        let _ = ed.handle(InputIntent::NextTab);
        assert_eq!(ed.tab_idx(), 1);
        assert_eq!(ed.field_idx(), 1);

        // Back to Providers: the clamped index is kept, not restored.
        let _ = ed.handle(InputIntent::PrevTab);
        assert_eq!(ed.tab_idx(), 0);
        assert_eq!(ed.field_idx(), 1);

        // Cyclic wrap in both directions.
        let _ = ed.handle(InputIntent::PrevTab);
        assert_eq!(ed.tab_idx(), 2);
        let _ = ed.handle(InputIntent::NextTab);
        assert_eq!(ed.tab_idx(), 0);
    }

    #[test]
    fn field_moves_clamp_without_wrapping() {
        let (_dir, mut ed) = editor();
        let _ = ed.handle(InputIntent::MoveUp);
        assert_eq!(ed.field_idx(), 0);

        for _ in 0..20 {
            let _ = ed.handle(InputIntent::MoveDown);
        }
        assert_eq!(ed.field_idx(), 5);
    }

    #[test]
    fn cycling_a_choice_is_a_cyclic_group() {
        let (_dir, mut ed) = editor();
        // anthropic_model, 3 choices.
        let _ = ed.handle(InputIntent::MoveDown);
        let field = ed.current_field().expect("field");
        assert_eq!(field.key, "anthropic_model");
        let start = ed.field_value(field).to_string();

        for _ in 0..field.choices.len() {
            let _ = ed.handle(InputIntent::CycleRight);
        }
        assert_eq!(ed.field_value(field), start);

        let _ = ed.handle(InputIntent::CycleRight);
        let moved = ed.field_value(field).to_string();
        assert_ne!(moved, start);
        let _ = ed.handle(InputIntent::CycleLeft);
        assert_eq!(ed.field_value(field), start);
    }

    #[test]
    fn unknown_choice_value_cycles_from_the_first_entry() {
        let (_dir, mut ed) = editor();
        let _ = ed.handle(InputIntent::MoveDown);
        ed.cfg
            .insert("anthropic_model".to_string(), "no-such-model".to_string());

        let _ = ed.handle(InputIntent::CycleRight);
        let field = ed.current_field().expect("field");
        assert_eq!(ed.field_value(field), field.choices[1].value);
    }

    #[test]
    fn activate_cycles_choices_and_never_enters_edit_mode() {
        let (_dir, mut ed) = editor();
        let _ = ed.handle(InputIntent::MoveDown);
        let field = ed.current_field().expect("field");
        let start = ed.field_value(field).to_string();

        let _ = ed.handle(InputIntent::Activate);
        assert_eq!(ed.mode(), Mode::Navigating);
        assert_ne!(ed.field_value(field), start);
    }

    #[test]
    fn cycle_on_a_text_field_is_lateral_tab_navigation() {
        let (_dir, mut ed) = editor();
        // deepseek_base_url is a Text field.
        for _ in 0..4 {
            let _ = ed.handle(InputIntent::MoveDown);
        }
        assert_eq!(ed.current_field().expect("field").key, "deepseek_base_url");

        let _ = ed.handle(InputIntent::CycleRight);
        assert_eq!(ed.tab_idx(), 1);
        let _ = ed.handle(InputIntent::CycleLeft);
        assert_eq!(ed.tab_idx(), 0);
    }

    #[test]
    fn activate_on_text_enters_edit_with_cursor_at_end() {
        let (_dir, mut ed) = editor();
        for _ in 0..4 {
            let _ = ed.handle(InputIntent::MoveDown);
        }
        let _ = ed.handle(InputIntent::Activate);

        assert_eq!(ed.mode(), Mode::EditingText);
        assert_eq!(ed.input().value, "https://api.deepseek.com/v1");
        assert_eq!(ed.input().cursor, ed.input().value.chars().count());
    }

    #[test]
    fn cancel_is_a_true_noop_on_the_map() {
        let (_dir, mut ed) = editor();
        for _ in 0..4 {
            let _ = ed.handle(InputIntent::MoveDown);
        }
        let before = ed.cfg().clone();

        let _ = ed.handle(InputIntent::Activate);
        let _ = ed.handle(InputIntent::InsertChar('x'));
        let _ = ed.handle(InputIntent::Backspace);
        let _ = ed.handle(InputIntent::InsertChar('y'));
        let _ = ed.handle(InputIntent::Cancel);

        assert_eq!(ed.mode(), Mode::Navigating);
        assert_eq!(ed.cfg(), &before);
        assert!(!ed.dirty());
    }

    #[test]
    fn confirm_updates_exactly_the_targeted_field() {
        let (_dir, mut ed) = editor();
        for _ in 0..4 {
            let _ = ed.handle(InputIntent::MoveDown);
        }
        let mut expected = ed.cfg().clone();

        let _ = ed.handle(InputIntent::Activate);
        let _ = ed.handle(InputIntent::Home);
        let _ = ed.handle(InputIntent::InsertChar('x'));
        let _ = ed.handle(InputIntent::Confirm);

        expected.insert(
            "deepseek_base_url".to_string(),
            "xhttps://api.deepseek.com/v1".to_string(),
        );
        assert_eq!(ed.cfg(), &expected);
        assert!(ed.dirty());
    }

    #[test]
    fn confirm_without_changes_stays_clean() {
        let (_dir, mut ed) = editor();
        for _ in 0..4 {
            let _ = ed.handle(InputIntent::MoveDown);
        }
        let _ = ed.handle(InputIntent::Activate);
        let _ = ed.handle(InputIntent::Confirm);
        assert!(!ed.dirty());
    }

    #[test]
    fn editing_restricts_input_to_printable_characters() {
        let (_dir, mut ed) = editor();
        let _ = ed.handle(InputIntent::Activate); // anthropic_api_key (secret)
        assert_eq!(ed.mode(), Mode::EditingText);

        let _ = ed.handle(InputIntent::InsertChar('\u{7}'));
        let _ = ed.handle(InputIntent::InsertChar('k'));
        assert_eq!(ed.input().value, "k");
    }

    #[test]
    fn cursor_moves_clamp_to_buffer_bounds() {
        let (_dir, mut ed) = editor();
        let _ = ed.handle(InputIntent::Activate);
        let _ = ed.handle(InputIntent::InsertChar('a'));
        let _ = ed.handle(InputIntent::InsertChar('b'));

        let _ = ed.handle(InputIntent::Home);
        let _ = ed.handle(InputIntent::CursorLeft);
        assert_eq!(ed.input().cursor, 0);

        let _ = ed.handle(InputIntent::End);
        let _ = ed.handle(InputIntent::CursorRight);
        assert_eq!(ed.input().cursor, 2);

        let _ = ed.handle(InputIntent::Home);
        let _ = ed.handle(InputIntent::Delete);
        assert_eq!(ed.input().value, "b");
        assert_eq!(ed.input().cursor, 0);
    }

    #[test]
    fn save_persists_clears_dirty_and_reports_ok() {
        let (_dir, mut ed) = editor();
        let _ = ed.handle(InputIntent::Activate);
        let _ = ed.handle(InputIntent::InsertChar('k'));
        let _ = ed.handle(InputIntent::Confirm);
        assert!(ed.dirty());

        let _ = ed.handle(InputIntent::Save);
        assert!(!ed.dirty());
        let status = ed.status().expect("status line");
        assert_eq!(status.severity, Severity::Ok);
        assert!(status.message.starts_with("Saved!"));

        let reloaded = ed.store.load();
        assert_eq!(reloaded.get("anthropic_api_key").map(String::as_str), Some("k"));
    }

    #[test]
    fn status_line_clears_on_tab_change() {
        let (_dir, mut ed) = editor();
        let _ = ed.handle(InputIntent::Save);
        assert!(ed.status().is_some());

        let _ = ed.handle(InputIntent::NextTab);
        assert!(ed.status().is_none());
    }

    #[test]
    fn quit_persists_unsaved_changes_and_terminates() {
        let (_dir, mut ed) = editor();
        let _ = ed.handle(InputIntent::Activate);
        let _ = ed.handle(InputIntent::InsertChar('z'));
        let _ = ed.handle(InputIntent::Confirm);

        let _ = ed.handle(InputIntent::Quit);
        assert!(ed.should_quit());
        assert!(!ed.dirty());

        let reloaded = ed.store.load();
        assert_eq!(reloaded.get("anthropic_api_key").map(String::as_str), Some("z"));

        // Terminal state: further input is not accepted.
        let _ = ed.handle(InputIntent::NextTab);
        assert_eq!(ed.tab_idx(), 0);
    }

    #[test]
    fn test_providers_persists_first_and_requests_a_probe() {
        let (_dir, mut ed) = editor();
        let _ = ed.handle(InputIntent::Activate);
        let _ = ed.handle(InputIntent::InsertChar('k'));
        let _ = ed.handle(InputIntent::Confirm);

        let effect = ed.handle(InputIntent::TestProviders);
        assert_eq!(effect, Effect::RunProbe);
        assert!(!ed.dirty(), "probe persists the in-progress edits");
        assert_eq!(ed.status().expect("status").severity, Severity::Info);
    }

    #[test]
    fn probe_summary_is_warn_unless_every_provider_is_healthy() {
        let (_dir, mut ed) = editor();
        ed.apply_probe_results(vec![
            status("Anthropic", true),
            status("DeepSeek", true),
            status("LM Studio", false),
        ]);
        let line = ed.status().expect("status");
        assert_eq!(line.severity, Severity::Warn);
        assert!(line.message.contains("LM Studio: !!"));

        ed.apply_probe_results(vec![status("Anthropic", true), status("DeepSeek", true)]);
        assert_eq!(ed.status().expect("status").severity, Severity::Ok);
        assert_eq!(ed.probe_results().expect("cached batch").len(), 2);
    }

    #[test]
    fn masking_follows_the_length_policy() {
        assert_eq!(masked_secret(""), "(not set)");
        assert_eq!(masked_secret("abc"), "***");
        assert_eq!(masked_secret("12345678"), "********");
        assert_eq!(masked_secret("abcd5678efgh"), "abcd****efgh");
    }

    #[test]
    fn reveal_toggle_changes_display_only() {
        let (_dir, mut ed) = editor();
        ed.cfg
            .insert("anthropic_api_key".to_string(), "sk-ant-secret-key".to_string());
        let field = schema::field_by_key("anthropic_api_key").expect("field");

        let masked = ed.display_value(field);
        assert!(masked.starts_with("sk-a"));
        assert!(masked.contains('*'));

        let _ = ed.handle(InputIntent::ToggleRevealSecrets);
        assert_eq!(ed.display_value(field), "sk-ant-secret-key");
        assert_eq!(
            ed.cfg().get("anthropic_api_key").map(String::as_str),
            Some("sk-ant-secret-key")
        );
    }
}
