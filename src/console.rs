// 🖥️ Console - the line-based I/O the session talks through
//
// Console: read a line, write a styled line, clear the screen
// Presenter: error / info / success / plain on top of any Console
// TerminalConsole: stdin/stdout backend, coloured through crossterm when the
//                  `tui` feature is on and styling is enabled

use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// How a line should look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    /// Bright blue header
    Info,
    /// Bright green
    Success,
    /// Bright red
    Error,
}

pub trait Console {
    /// Show `prompt` and wait for one line. `None` means the input is closed.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn write_line(&mut self, text: &str, tone: Tone) -> io::Result<()>;

    fn clear_screen(&mut self) -> io::Result<()>;
}

// ============================================================================
// PRESENTER
// ============================================================================

pub trait Presenter {
    fn error(&mut self, text: &str) -> io::Result<()>;
    fn info(&mut self, text: &str) -> io::Result<()>;
    fn success(&mut self, text: &str) -> io::Result<()>;
    fn plain(&mut self, text: &str) -> io::Result<()>;
}

impl<C: Console + ?Sized> Presenter for C {
    fn error(&mut self, text: &str) -> io::Result<()> {
        self.write_line(text, Tone::Error)
    }

    /// Section header: `-- text --` and a blank line
    fn info(&mut self, text: &str) -> io::Result<()> {
        self.write_line(&format!("-- {} --", text), Tone::Info)?;
        self.write_line("", Tone::Plain)
    }

    fn success(&mut self, text: &str) -> io::Result<()> {
        self.write_line(text, Tone::Success)
    }

    fn plain(&mut self, text: &str) -> io::Result<()> {
        self.write_line(text, Tone::Plain)
    }
}

// ============================================================================
// TERMINAL CONSOLE
// ============================================================================

pub struct TerminalConsole<R, W> {
    reader: R,
    writer: W,
    styled: bool,
}

impl TerminalConsole<StdinLock<'static>, Stdout> {
    /// Console on the process stdin/stdout
    pub fn stdio(styled: bool) -> Self {
        TerminalConsole::new(io::stdin().lock(), io::stdout(), styled)
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    /// `styled` is ignored without the `tui` feature
    pub fn new(reader: R, writer: W, styled: bool) -> Self {
        TerminalConsole {
            reader,
            writer,
            styled: styled && cfg!(feature = "tui"),
        }
    }

    pub fn is_styled(&self) -> bool {
        self.styled
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    #[cfg(feature = "tui")]
    fn write_styled(&mut self, text: &str, tone: Tone) -> io::Result<()> {
        use crossterm::queue;
        use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};

        // crossterm's Red/Blue/Green are the bright variants
        let color = match tone {
            Tone::Plain => return writeln!(self.writer, "{}", text),
            Tone::Info => Color::Blue,
            Tone::Success => Color::Green,
            Tone::Error => Color::Red,
        };

        queue!(
            self.writer,
            SetForegroundColor(color),
            SetAttribute(Attribute::Bold),
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
        writeln!(self.writer)
    }

    #[cfg(not(feature = "tui"))]
    fn write_styled(&mut self, text: &str, _tone: Tone) -> io::Result<()> {
        writeln!(self.writer, "{}", text)
    }

    #[cfg(feature = "tui")]
    fn clear_styled(&mut self) -> io::Result<()> {
        use crossterm::cursor::MoveTo;
        use crossterm::queue;
        use crossterm::terminal::{Clear, ClearType};

        queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        self.writer.flush()
    }

    #[cfg(not(feature = "tui"))]
    fn clear_styled(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn write_line(&mut self, text: &str, tone: Tone) -> io::Result<()> {
        if self.styled {
            self.write_styled(text, tone)?;
        } else {
            writeln!(self.writer, "{}", text)?;
        }
        self.writer.flush()
    }

    /// No-op for plain output
    fn clear_screen(&mut self) -> io::Result<()> {
        if self.styled {
            self.clear_styled()
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// SCRIPTED CONSOLE (tests)
// ============================================================================
