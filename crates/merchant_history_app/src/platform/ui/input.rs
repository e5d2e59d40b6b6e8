use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use crate::platform::app::AppInput;

pub const HELP: &str = "commands: toggle | select <number|tracking number> | home | logout | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectTarget {
    /// 1-based position in the loaded parcel list.
    Index(usize),
    Identifier(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Toggle,
    Select(SelectTarget),
    Home,
    Logout,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let command = match parts.next()?.to_ascii_lowercase().as_str() {
        "toggle" | "t" => Command::Toggle,
        "select" | "s" => {
            let target = parts.next()?;
            match target.parse::<usize>() {
                Ok(index) if index > 0 => Command::Select(SelectTarget::Index(index)),
                _ => Command::Select(SelectTarget::Identifier(target.to_string())),
            }
        }
        "home" => Command::Home,
        "logout" => Command::Logout,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Reads stdin lines on a background thread; end of input counts as quit.
pub fn spawn_reader(input_tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            let input = match parse_command(&line) {
                Some(command) => AppInput::Command(command),
                None => AppInput::Unknown(line),
            };
            if input_tx.send(input).is_err() {
                return;
            }
        }
        let _ = input_tx.send(AppInput::Command(Command::Quit));
    });
}
