use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::{Color, Stylize},
    terminal::{disable_raw_mode, enable_raw_mode},
    tty::IsTty,
};

use crate::ui::{render_board_lines, BoardView};

/// How a notice should be presented
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

/// Line-oriented presentation boundary used by the game runtime.
///
/// Reads return the line without its trailing newline. End of input is
/// reported as [`io::ErrorKind::UnexpectedEof`].
pub trait Console {
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
    /// Like `read_line` but the typed characters are not echoed.
    fn read_hidden_line(&mut self, prompt: &str) -> io::Result<String>;
    fn say(&mut self, text: &str) -> io::Result<()>;
    fn notice(&mut self, tone: Tone, text: &str) -> io::Result<()>;
    fn show_board(&mut self, view: &BoardView<'_>) -> io::Result<()>;
}

fn eof() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "input closed")
}

fn strip_newline(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}

/// Console over the process stdin/stdout
pub struct TerminalConsole {
    color: bool,
    width: u16,
}

impl TerminalConsole {
    pub fn new(color: bool) -> Self {
        let width = crossterm::terminal::size()
            .map(|(w, _)| w)
            .unwrap_or(80)
            .clamp(40, 100);
        Self {
            color: color && io::stdout().is_tty(),
            width,
        }
    }

    fn prompt(&self, prompt: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        if self.color {
            write!(stdout, "{}", prompt.bold())?;
        } else {
            write!(stdout, "{prompt}")?;
        }
        stdout.flush()
    }

    fn read_raw_hidden(&self) -> io::Result<String> {
        enable_raw_mode()?;
        let result = read_keys_until_enter();
        disable_raw_mode()?;
        println!();
        result
    }
}

fn read_keys_until_enter() -> io::Result<String> {
    let mut line = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => return Ok(line),
                KeyCode::Backspace => {
                    line.pop();
                }
                KeyCode::Char('c') | KeyCode::Char('d')
                    if key.modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    return Err(eof());
                }
                KeyCode::Char(c) => line.push(c),
                _ => {}
            }
        }
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompt(prompt)?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(eof());
        }
        Ok(strip_newline(line))
    }

    fn read_hidden_line(&mut self, prompt: &str) -> io::Result<String> {
        if !io::stdin().is_tty() {
            return self.read_line(prompt);
        }
        self.prompt(prompt)?;
        self.read_raw_hidden()
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{text}")?;
        stdout.flush()
    }

    fn notice(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        if !self.color {
            return self.say(text);
        }
        let color = match tone {
            Tone::Info => Color::Cyan,
            Tone::Success => Color::Green,
            Tone::Warning => Color::Yellow,
            Tone::Error => Color::Red,
        };
        self.say(&text.with(color).bold().to_string())
    }

    fn show_board(&mut self, view: &BoardView<'_>) -> io::Result<()> {
        let lines = render_board_lines(view, self.width);
        self.say(&lines.join("\n"))
    }
}

/// Console fed from a fixed list of input lines, recording everything shown.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub output: Vec<String>,
    pub hidden_prompts: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Everything shown so far, one entry per line
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.output.iter().any(|l| l.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.output.push(prompt.to_string());
        self.inputs.pop_front().map(strip_newline).ok_or_else(eof)
    }

    fn read_hidden_line(&mut self, prompt: &str) -> io::Result<String> {
        self.hidden_prompts += 1;
        self.read_line(prompt)
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.extend(text.lines().map(str::to_string));
        Ok(())
    }

    fn notice(&mut self, _tone: Tone, text: &str) -> io::Result<()> {
        self.say(text)
    }

    fn show_board(&mut self, view: &BoardView<'_>) -> io::Result<()> {
        let lines = render_board_lines(view, 60);
        self.output.extend(lines);
        Ok(())
    }
}
