//! Cycle-tagged simulation trace.
//!
//! Every line has the form `Cycle @<N>.00: [<Stage>] <message>`. The write-back
//! stage's `WB: Write x<rd> <= 0x<hex>` lines define the program's observable
//! behavior; test parsers key on them. The sink is stdout for the CLI, an
//! in-memory buffer for tests, or off.

use std::fmt;
use std::io::Write;

/// Pipeline stage names as they appear in trace lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Instruction fetch.
    If,
    /// Decode.
    Id,
    /// Execute.
    Ex,
    /// Memory access.
    Mem,
    /// Write-back.
    Wb,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::If => write!(f, "IF"),
            Self::Id => write!(f, "ID"),
            Self::Ex => write!(f, "EX"),
            Self::Mem => write!(f, "MEM"),
            Self::Wb => write!(f, "WB"),
        }
    }
}

#[derive(Debug)]
enum Sink {
    Off,
    Stdout,
    Buffer(Vec<String>),
}

/// Trace sink with the current cycle number stamped on every line.
#[derive(Debug)]
pub struct Trace {
    cycle: u64,
    sink: Sink,
}

impl Trace {
    /// A disabled trace; `emit` is a no-op.
    pub fn off() -> Self {
        Self {
            cycle: 0,
            sink: Sink::Off,
        }
    }

    /// A trace writing lines to stdout.
    pub fn stdout() -> Self {
        Self {
            cycle: 0,
            sink: Sink::Stdout,
        }
    }

    /// A trace collecting lines in memory, for tests.
    pub fn buffer() -> Self {
        Self {
            cycle: 0,
            sink: Sink::Buffer(Vec::new()),
        }
    }

    /// Whether emitting does anything; callers guard their `format!` on this.
    pub fn enabled(&self) -> bool {
        !matches!(self.sink, Sink::Off)
    }

    /// Stamps the cycle number used by subsequent lines.
    pub fn set_cycle(&mut self, cycle: u64) {
        self.cycle = cycle;
    }

    /// Emits one stage-tagged line.
    pub fn emit(&mut self, stage: Stage, msg: &str) {
        match &mut self.sink {
            Sink::Off => {}
            Sink::Stdout => println!("Cycle @{}.00: [{stage}] {msg}", self.cycle),
            Sink::Buffer(lines) => lines.push(format!("Cycle @{}.00: [{stage}] {msg}", self.cycle)),
        }
    }

    /// Collected lines (empty unless this is a buffer trace).
    pub fn lines(&self) -> &[String] {
        match &self.sink {
            Sink::Buffer(lines) => lines,
            _ => &[],
        }
    }

    /// Flushes stdout, for a clean cut at halt.
    pub fn flush(&mut self) {
        if matches!(self.sink, Sink::Stdout) {
            let _ = std::io::stdout().flush();
        }
    }
}
