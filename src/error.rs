/*!
Error types for configuration and routing failures.

The teacher's own library leans on `.expect(...)` panics inside its config
parser (`match_object_panic!` in `lib.rs`) because a malformed experiment file
is treated as an operator mistake to fix before rerunning. The CLI surface
here is different: flags come from a human typing at a shell, so invalid
input must produce a clean diagnostic on stderr and a non-zero exit code, not
a panic with a Rust backtrace. `ConfigError` is the hand-rolled enum that
carries that diagnostic; there is no `thiserror`/`anyhow` anywhere in the
teacher's dependency tree and none is introduced here.
*/

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A flag's value failed to parse as the expected type.
    InvalidValue { flag: &'static str, value: String },
    /// A flag's value parsed fine but is out of the accepted range.
    OutOfRange { flag: &'static str, value: String, reason: &'static str },
    /// `getopts` itself rejected the argument list (unknown flag, missing
    /// operand, ...).
    ArgumentParsing(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { flag, value } => {
                write!(f, "invalid value for --{}: '{}'", flag, value)
            }
            ConfigError::OutOfRange { flag, value, reason } => {
                write!(f, "value for --{} out of range: '{}' ({})", flag, value, reason)
            }
            ConfigError::ArgumentParsing(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A non-fatal diagnostic recorded while the network runs, e.g. a packet
/// that hit a routing dead-end. The engine keeps these instead of panicking
/// so a run always finishes and prints statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDiagnostic {
    pub tick: u64,
    pub router: usize,
    pub message: String,
}

impl fmt::Display for RoutingDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[tick {}] router {}: {}", self.tick, self.router, self.message)
    }
}
