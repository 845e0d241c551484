use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::warn;

/// The capabilities a running program may use from the outside world.
///
/// The evaluator only talks to its host: `#` reads a line, `$` writes one
/// and `@` draws a random integer. Swapping the host makes evaluation fully
/// deterministic.
pub trait Host {
    /// Reads one line of input without its line terminator, or `None` when
    /// input is exhausted.
    ///
    /// # Errors
    /// Any I/O error of the underlying input source.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Writes `text` followed by a line break.
    fn write_line(&mut self, text: &str);

    /// Returns an integer drawn uniformly from `low..=high`.
    ///
    /// Callers guarantee `low <= high`.
    fn random_int(&mut self, low: i64, high: i64) -> i64;
}

/// A host backed by the process's standard input and output.
#[derive(Debug)]
pub struct StdHost {
    rng: StdRng,
}

impl StdHost {
    /// Creates a host whose random numbers are seeded from the operating
    /// system.
    #[must_use]
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Creates a host with a reproducible random sequence.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for StdHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for StdHost {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(strip_line_ending(line))),
        }
    }

    fn write_line(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{text}").and_then(|()| stdout.flush()) {
            warn!(error = %e, "failed to write to stdout");
        }
    }

    fn random_int(&mut self, low: i64, high: i64) -> i64 {
        self.rng.gen_range(low..=high)
    }
}

/// An in-memory host: input lines are queued up front and every written
/// line is recorded.
///
/// # Example
/// ```
/// use funke::interpreter::host::{BufferedHost, Host};
///
/// let mut host = BufferedHost::new(7).with_input(["hello"]);
/// assert_eq!(host.read_line().unwrap().as_deref(), Some("hello"));
/// assert_eq!(host.read_line().unwrap(), None);
///
/// host.write_line("out");
/// assert_eq!(host.output(), ["out"]);
/// ```
#[derive(Debug)]
pub struct BufferedHost {
    input:  VecDeque<String>,
    output: Vec<String>,
    rng:    StdRng,
}

impl BufferedHost {
    /// Creates a host with no input and a random sequence seeded by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { input:  VecDeque::new(),
               output: Vec::new(),
               rng:    StdRng::seed_from_u64(seed), }
    }

    /// Queues `lines` to be returned by `read_line`, in order.
    #[must_use]
    pub fn with_input<I, S>(mut self, lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.input.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Lines written so far.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }
}

impl Host for BufferedHost {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front().map(strip_line_ending))
    }

    fn write_line(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn random_int(&mut self, low: i64, high: i64) -> i64 {
        self.rng.gen_range(low..=high)
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
