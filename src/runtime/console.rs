//! Player-facing text I/O as seen by the interpreter.
//!
//! Window management, wrapping and paging belong to the embedding
//! application; the runtime only writes text and asks for input.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

pub trait Console {
    fn write(&mut self, text: &str);
    fn newline(&mut self);
    /// Next input line without its terminator, `None` at end of input.
    fn read_line(&mut self) -> Option<String>;
    fn read_key(&mut self) -> Option<char>;
}

/// In-memory console with scripted input.
///
/// Clones share one buffer, so a caller can keep a handle to read what the
/// interpreter wrote after handing it a clone.
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    state: Rc<RefCell<Buffers>>,
}

#[derive(Debug, Default)]
struct Buffers {
    output: String,
    input: VecDeque<String>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let console = Self::new();
        console.state.borrow_mut().input = lines.into_iter().map(Into::into).collect();
        console
    }

    pub fn push_input(&self, line: impl Into<String>) {
        self.state.borrow_mut().input.push_back(line.into());
    }

    pub fn output(&self) -> String {
        self.state.borrow().output.clone()
    }

    pub fn take_output(&self) -> String {
        std::mem::take(&mut self.state.borrow_mut().output)
    }
}

impl Console for BufferConsole {
    fn write(&mut self, text: &str) {
        self.state.borrow_mut().output.push_str(text);
    }

    fn newline(&mut self) {
        self.state.borrow_mut().output.push('\n');
    }

    fn read_line(&mut self) -> Option<String> {
        self.state.borrow_mut().input.pop_front()
    }

    fn read_key(&mut self) -> Option<char> {
        let mut state = self.state.borrow_mut();
        let line = state.input.front_mut()?;
        match line.chars().next() {
            Some(ch) => {
                line.replace_range(..ch.len_utf8(), "");
                if line.is_empty() {
                    state.input.pop_front();
                }
                Some(ch)
            }
            None => {
                state.input.pop_front();
                Some('\n')
            }
        }
    }
}

/// Console on the process's stdin/stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        if let Err(err) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            log::error!("console write failed: {}", err);
        }
    }

    fn newline(&mut self) {
        self.write("\n");
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                log::error!("console read failed: {}", err);
                None
            }
        }
    }

    fn read_key(&mut self) -> Option<char> {
        self.read_line().map(|line| line.chars().next().unwrap_or('\n'))
    }
}
