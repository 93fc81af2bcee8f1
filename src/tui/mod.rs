mod terminal;
mod theme;
mod ui;

use std::time::Duration;

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::AppContext;
use crate::editor::{Effect, FormEditor, InputIntent, Mode};
use crate::error::AppError;
use crate::probe::{ProbeMsg, ProbeSystem, ProviderProbe, StatusProber};
use crate::schema::FieldKind;

use terminal::{PanicRestoreHookGuard, TuiTerminal};

const TICK_RATE: Duration = Duration::from_millis(200);

pub fn run(ctx: AppContext) -> Result<(), AppError> {
    let _panic_hook = PanicRestoreHookGuard::install();
    let mut terminal = TuiTerminal::new()?;
    let mut editor = FormEditor::new(ctx);

    let probe = match ProbeSystem::start() {
        Ok(system) => Some(system),
        Err(err) => {
            log::warn!("probe worker unavailable, checks will run inline: {err}");
            None
        }
    };
    // Populate the status dots without blocking the first frame.
    if let Some(probe) = probe.as_ref() {
        probe.request(editor.cfg().clone());
    }
    let mut awaiting_summary = false;

    loop {
        terminal.draw(|f| ui::render(f, &editor))?;

        // Fold finished probe batches back in (non-blocking).
        if let Some(probe) = probe.as_ref() {
            while let Some(ProbeMsg::Finished { result }) = probe.try_recv() {
                if awaiting_summary {
                    editor.apply_probe_results(result);
                    awaiting_summary = false;
                } else {
                    editor.set_probe_results(result);
                }
            }
        }

        if event::poll(TICK_RATE).map_err(|e| AppError::Message(e.to_string()))? {
            match event::read().map_err(|e| AppError::Message(e.to_string()))? {
                event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(intent) = map_key(&editor, key) {
                        match editor.handle(intent) {
                            Effect::RunProbe => match probe.as_ref() {
                                Some(probe) => {
                                    awaiting_summary = true;
                                    probe.request(editor.cfg().clone());
                                }
                                None => {
                                    // No worker: the batch is still bounded by
                                    // the slowest single timeout.
                                    let results =
                                        StatusProber::default().probe(editor.cfg());
                                    editor.apply_probe_results(results);
                                }
                            },
                            Effect::None => {}
                        }
                    }
                }
                event::Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if editor.should_quit() {
            break;
        }
    }

    Ok(())
}

fn map_key(editor: &FormEditor, key: KeyEvent) -> Option<InputIntent> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputIntent::Quit);
    }
    match editor.mode() {
        Mode::Navigating => map_nav_key(editor, key),
        Mode::EditingText => map_edit_key(key),
    }
}

fn map_nav_key(editor: &FormEditor, key: KeyEvent) -> Option<InputIntent> {
    let on_choice = editor
        .current_field()
        .map(|f| f.kind == FieldKind::Choice)
        .unwrap_or(false);

    Some(match key.code {
        KeyCode::Tab => InputIntent::NextTab,
        KeyCode::BackTab => InputIntent::PrevTab,
        KeyCode::Up => InputIntent::MoveUp,
        KeyCode::Down => InputIntent::MoveDown,
        KeyCode::Left => InputIntent::CycleLeft,
        KeyCode::Right => InputIntent::CycleRight,
        KeyCode::Enter => InputIntent::Activate,
        KeyCode::Char(' ') if on_choice => InputIntent::Activate,
        KeyCode::Char('s') => InputIntent::Save,
        KeyCode::Char('t') => InputIntent::TestProviders,
        KeyCode::Char('*') => InputIntent::ToggleRevealSecrets,
        KeyCode::Char('q') | KeyCode::Esc => InputIntent::Quit,
        _ => return None,
    })
}

fn map_edit_key(key: KeyEvent) -> Option<InputIntent> {
    Some(match key.code {
        KeyCode::Enter => InputIntent::Confirm,
        KeyCode::Esc => InputIntent::Cancel,
        KeyCode::Backspace => InputIntent::Backspace,
        KeyCode::Delete => InputIntent::Delete,
        KeyCode::Left => InputIntent::CursorLeft,
        KeyCode::Right => InputIntent::CursorRight,
        KeyCode::Home => InputIntent::Home,
        KeyCode::End => InputIntent::End,
        KeyCode::Char(c) => InputIntent::InsertChar(c),
        _ => return None,
    })
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

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn space_cycles_only_on_choice_fields() {
        let (_dir, mut ed) = editor();
        // anthropic_api_key (secret) is selected first: space is a no-op.
        assert_eq!(map_key(&ed, press(KeyCode::Char(' '))), None);

        let _ = ed.handle(InputIntent::MoveDown); // anthropic_model (choice)
        assert_eq!(
            map_key(&ed, press(KeyCode::Char(' '))),
            Some(InputIntent::Activate)
        );
    }

    #[test]
    fn keymap_depends_on_mode() {
        let (_dir, mut ed) = editor();
        assert_eq!(map_key(&ed, press(KeyCode::Esc)), Some(InputIntent::Quit));
        assert_eq!(
            map_key(&ed, press(KeyCode::Char('s'))),
            Some(InputIntent::Save)
        );

        let _ = ed.handle(InputIntent::Activate); // secret field: edit mode
        assert_eq!(ed.mode(), Mode::EditingText);
        assert_eq!(map_key(&ed, press(KeyCode::Esc)), Some(InputIntent::Cancel));
        assert_eq!(
            map_key(&ed, press(KeyCode::Char('s'))),
            Some(InputIntent::InsertChar('s'))
        );
    }
}
