//! Raw keystroke capture.
//!
//! [`ChordCapture`] turns a stream of terminal key events into one chord:
//! modifier presses are remembered until the first non-modifier key arrives,
//! at which point the chord is assembled as `Ctrl, Cmd, Alt, Shift` followed
//! by the main key. Terminals that do not report bare modifier presses still
//! work, because the modifier flags on the final key event are merged in.

use crate::keys::{normalize_key_name, KeySequence, MODIFIER_ORDER};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    ModifierKeyCode, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement};
use std::io;
use tracing::{debug, warn};

/// Capture progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Waiting for a non-modifier key; modifiers seen so far are held
    AwaitingKey,
    /// A chord has been assembled; further events are ignored
    Complete,
}

/// Modifier flags accumulated during capture, indexed like [`MODIFIER_ORDER`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldModifiers([bool; 4]);

impl HeldModifiers {
    const CTRL: usize = 0;
    const CMD: usize = 1;
    const ALT: usize = 2;
    const SHIFT: usize = 3;

    fn hold(&mut self, index: usize) {
        self.0[index] = true;
    }

    fn merge_flags(&mut self, flags: KeyModifiers) {
        if flags.contains(KeyModifiers::CONTROL) {
            self.hold(Self::CTRL);
        }
        if flags.intersects(KeyModifiers::SUPER | KeyModifiers::META | KeyModifiers::HYPER) {
            self.hold(Self::CMD);
        }
        if flags.contains(KeyModifiers::ALT) {
            self.hold(Self::ALT);
        }
        if flags.contains(KeyModifiers::SHIFT) {
            self.hold(Self::SHIFT);
        }
    }

    fn tokens(self) -> impl Iterator<Item = String> {
        MODIFIER_ORDER
            .into_iter()
            .zip(self.0)
            .filter(|(_, held)| *held)
            .map(|(name, _)| name.to_string())
    }
}

/// State machine assembling one chord from key events.
#[derive(Debug, Clone)]
pub struct ChordCapture {
    state: CaptureState,
    held: HeldModifiers,
    chord: Option<KeySequence>,
}

impl Default for ChordCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl ChordCapture {
    /// Starts a new capture in [`CaptureState::AwaitingKey`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: CaptureState::AwaitingKey,
            held: HeldModifiers::default(),
            chord: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// The assembled chord, once complete.
    #[must_use]
    pub fn chord(&self) -> Option<&KeySequence> {
        self.chord.as_ref()
    }

    /// Feeds one event. Returns the chord when this event completes it.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<KeySequence> {
        if self.state == CaptureState::Complete || key.kind != KeyEventKind::Press {
            return None;
        }

        if let KeyCode::Modifier(modifier) = key.code {
            if let Some(index) = modifier_index(modifier) {
                self.held.hold(index);
            }
            return None;
        }

        let (main, implied) = main_key_token(key.code)?;
        self.held.merge_flags(key.modifiers | implied);

        let chord: KeySequence = self.held.tokens().chain(std::iter::once(main)).collect();
        debug!("Captured chord {}", chord);

        self.state = CaptureState::Complete;
        self.chord = Some(chord.clone());
        Some(chord)
    }
}

fn modifier_index(modifier: ModifierKeyCode) -> Option<usize> {
    match modifier {
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => Some(HeldModifiers::CTRL),
        ModifierKeyCode::LeftSuper
        | ModifierKeyCode::RightSuper
        | ModifierKeyCode::LeftMeta
        | ModifierKeyCode::RightMeta
        | ModifierKeyCode::LeftHyper
        | ModifierKeyCode::RightHyper => Some(HeldModifiers::CMD),
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => Some(HeldModifiers::ALT),
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => Some(HeldModifiers::SHIFT),
        _ => None,
    }
}

/// Canonical token for a non-modifier key, plus modifiers the key implies.
///
/// Returns `None` for keys that cannot end a chord (media keys, lock keys, ...).
fn main_key_token(code: KeyCode) -> Option<(String, KeyModifiers)> {
    let token = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(ch) => ch.to_uppercase().collect(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => return Some(("Tab".to_string(), KeyModifiers::SHIFT)),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => normalize_key_name("delete"),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => normalize_key_name("home"),
        KeyCode::End => normalize_key_name("end"),
        KeyCode::PageUp => normalize_key_name("pageup"),
        KeyCode::PageDown => normalize_key_name("pagedown"),
        KeyCode::Insert => normalize_key_name("insert"),
        _ => return None,
    };
    Some((token, KeyModifiers::NONE))
}

/// Source of key events for capture.
pub trait KeySource {
    /// Blocks until the next key event is available.
    fn next_key(&mut self) -> io::Result<KeyEvent>;
}

/// Reads key events from the terminal in raw mode.
///
/// Raw mode (and keyboard enhancement, where supported) is enabled on
/// creation and restored on drop.
pub struct TerminalKeySource {
    enhanced: bool,
}

impl TerminalKeySource {
    /// Puts the terminal into raw mode.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            let flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_EVENT_TYPES;
            if let Err(e) = execute!(io::stdout(), PushKeyboardEnhancementFlags(flags)) {
                disable_raw_mode()?;
                return Err(e);
            }
        }

        debug!("Raw key capture started (enhanced: {enhanced})");
        Ok(Self { enhanced })
    }
}

impl KeySource for TerminalKeySource {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()? {
                return Ok(key);
            }
        }
    }
}

impl Drop for TerminalKeySource {
    fn drop(&mut self) {
        if self.enhanced {
            if let Err(e) = execute!(io::stdout(), PopKeyboardEnhancementFlags) {
                warn!("Failed to restore keyboard flags: {e}");
            }
        }
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {e}");
        }
    }
}

/// Runs a capture to completion against `source`.
pub fn capture_chord<S: KeySource + ?Sized>(source: &mut S) -> io::Result<KeySequence> {
    let mut capture = ChordCapture::new();
    loop {
        let key = source.next_key()?;
        if let Some(chord) = capture.handle_key(key) {
            return Ok(chord);
        }
    }
}

/// Replays a fixed list of events, then reports end of input.
#[cfg(test)]
pub(crate) struct ScriptedKeys(std::collections::VecDeque<KeyEvent>);

#[cfg(test)]
impl ScriptedKeys {
    pub(crate) fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self(keys.into_iter().collect())
    }
}

#[cfg(test)]
impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        self.0
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more keys"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind_and_state(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        )
    }

    fn tokens(seq: &KeySequence) -> Vec<&str> {
        seq.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_modifier_presses_are_held_until_main_key() {
        let mut capture = ChordCapture::new();

        let shift = press(KeyCode::Modifier(ModifierKeyCode::LeftShift), KeyModifiers::SHIFT);
        assert!(capture.handle_key(shift).is_none());
        assert_eq!(capture.state(), CaptureState::AwaitingKey);

        let ctrl = press(
            KeyCode::Modifier(ModifierKeyCode::RightControl),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        assert!(capture.handle_key(ctrl).is_none());

        let chord = capture
            .handle_key(press(KeyCode::Char('P'), KeyModifiers::CONTROL | KeyModifiers::SHIFT))
            .unwrap();
        assert_eq!(tokens(&chord), ["Ctrl", "Shift", "P"]);
        assert_eq!(capture.state(), CaptureState::Complete);
    }

    #[test]
    fn test_fixed_modifier_order() {
        let mut capture = ChordCapture::new();
        let all = KeyModifiers::SHIFT | KeyModifiers::ALT | KeyModifiers::SUPER | KeyModifiers::CONTROL;
        let chord = capture.handle_key(press(KeyCode::Char('k'), all)).unwrap();
        assert_eq!(tokens(&chord), ["Ctrl", "Cmd", "Alt", "Shift", "K"]);
    }

    #[test]
    fn test_flags_only_terminal() {
        // Without keyboard enhancement only the final event carries modifiers
        let mut capture = ChordCapture::new();
        let chord = capture
            .handle_key(press(KeyCode::Char('s'), KeyModifiers::SUPER))
            .unwrap();
        assert_eq!(tokens(&chord), ["Cmd", "S"]);
    }

    #[test]
    fn test_named_keys() {
        let mut capture = ChordCapture::new();
        let chord = capture.handle_key(press(KeyCode::Esc, KeyModifiers::NONE)).unwrap();
        assert_eq!(tokens(&chord), ["Esc"]);

        let mut capture = ChordCapture::new();
        let chord = capture.handle_key(press(KeyCode::F(5), KeyModifiers::NONE)).unwrap();
        assert_eq!(tokens(&chord), ["F5"]);

        let mut capture = ChordCapture::new();
        let chord = capture.handle_key(press(KeyCode::BackTab, KeyModifiers::NONE)).unwrap();
        assert_eq!(tokens(&chord), ["Shift", "Tab"]);

        let mut capture = ChordCapture::new();
        let chord = capture
            .handle_key(press(KeyCode::Char(' '), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(tokens(&chord), ["Ctrl", "Space"]);
    }

    #[test]
    fn test_releases_and_unknown_keys_are_ignored() {
        let mut capture = ChordCapture::new();
        assert!(capture.handle_key(release(KeyCode::Char('a'))).is_none());
        assert!(capture
            .handle_key(press(KeyCode::CapsLock, KeyModifiers::NONE))
            .is_none());
        assert_eq!(capture.state(), CaptureState::AwaitingKey);
    }

    #[test]
    fn test_events_after_completion_are_ignored() {
        let mut capture = ChordCapture::new();
        capture.handle_key(press(KeyCode::Char('z'), KeyModifiers::CONTROL));
        assert!(capture
            .handle_key(press(KeyCode::Char('y'), KeyModifiers::CONTROL))
            .is_none());
        assert_eq!(tokens(capture.chord().unwrap()), ["Ctrl", "Z"]);
    }

    #[test]
    fn test_capture_chord_from_source() {
        let mut source = ScriptedKeys::new([
            press(KeyCode::Modifier(ModifierKeyCode::LeftAlt), KeyModifiers::ALT),
            release(KeyCode::Modifier(ModifierKeyCode::LeftAlt)),
            press(KeyCode::Up, KeyModifiers::NONE),
        ]);
        let chord = capture_chord(&mut source).unwrap();
        assert_eq!(tokens(&chord), ["Alt", "Up"]);
    }

    #[test]
    fn test_capture_chord_reports_closed_source() {
        let mut source = ScriptedKeys::new([press(
            KeyCode::Modifier(ModifierKeyCode::LeftShift),
            KeyModifiers::SHIFT,
        )]);
        let err = capture_chord(&mut source).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
