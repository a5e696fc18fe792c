//! Key mapping from terminal events to per-stage commands.

use crate::types::{GameSize, Stage, GAME_SIZES};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Enter: pick size, submit words, start game, begin play after setup.
    Confirm,
    /// Space on the board.
    Flip,
    Regenerate,
    PlayAgain,
    ChooseSize(GameSize),
    Type(char),
    Erase,
    NextField,
    PrevField,
    Back,
    HistoryBack,
    HistoryForward,
}

/// Map keyboard input for the current stage.
pub fn handle_key_event(stage: Stage, key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Esc => return Some(Command::Back),
        KeyCode::Enter => return Some(Command::Confirm),
        _ => {}
    }

    if stage == Stage::Input {
        return match key.code {
            KeyCode::Tab | KeyCode::Down => Some(Command::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(Command::PrevField),
            KeyCode::Backspace => Some(Command::Erase),
            KeyCode::Char(c) if !c.is_control() => Some(Command::Type(c)),
            _ => None,
        };
    }

    let common = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Move(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::Move(Direction::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::Move(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::Move(Direction::Right)),
        KeyCode::Char('[') => Some(Command::HistoryBack),
        KeyCode::Char(']') => Some(Command::HistoryForward),
        _ => None,
    };
    if common.is_some() {
        return common;
    }

    match (stage, key.code) {
        (Stage::Home, KeyCode::Char(c @ '1'..='4')) => {
            let index = c as usize - '1' as usize;
            GAME_SIZES.get(index).copied().map(Command::ChooseSize)
        }
        (Stage::Review | Stage::Play, KeyCode::Char('r') | KeyCode::Char('R')) => {
            Some(Command::Regenerate)
        }
        (Stage::Play, KeyCode::Char(' ')) => Some(Command::Flip),
        (Stage::Play, KeyCode::Char('n') | KeyCode::Char('N')) => Some(Command::PlayAgain),
        _ => None,
    }
}

/// Check if key should quit the app.
///
/// While typing words only `Ctrl-C` quits.
pub fn should_quit(stage: Stage, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }
    stage != Stage::Input && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
}
