// src/action/mod.rs

//! Units of work a task performs when it is out of date.
//!
//! - [`Action`] is the seam the task talks to; tests plug in their own
//!   implementations that don't spawn processes.
//! - [`command`] holds [`CmdAction`], which runs a shell command.

use std::fmt::Debug;

use thiserror::Error;

pub mod command;

pub use command::CmdAction;

/// Failure of a single action.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("command `{cmd}` exited with {}", describe_code(.code))]
    Failed {
        cmd: String,
        /// Exit code, `None` if the process was terminated by a signal.
        code: Option<i32>,
        /// Captured standard output of the failed run.
        stdout: Vec<u8>,
    },

    #[error("failed to spawn command `{cmd}`")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// A unit of work with side effects only.
///
/// An instance may be run many times, one run at a time; each run resets
/// whatever transient state the previous run left behind.
pub trait Action: Debug {
    fn run(&mut self) -> Result<(), ActionError>;
}
