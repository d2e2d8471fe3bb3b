//! Domain-specific errors.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuruError {
    #[error("invalid window id in ${var}: {value:?}")]
    InvalidWindowId { var: String, value: Option<String> },

    #[error("acme refused window {id}")]
    WindowOpen {
        id: u32,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {what}")]
    Io {
        what: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("cannot get filename from tag")]
    MalformedTag,

    #[error("address protocol failed while {step}")]
    AddressProtocol {
        step: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("rune offset {requested} out of range: body holds {available} runes")]
    OffsetOutOfRange { requested: usize, available: usize },

    #[error("{program} error: {failure}")]
    Subprocess {
        program: String,
        failure: SubprocessFailure,
    },
}

/// Ways the analysis tool can fail once we try to run it.
#[derive(Debug, Error)]
pub enum SubprocessFailure {
    #[error("failed to start: {0}")]
    Spawn(io::Error),
    #[error("failed to write standard input: {0}")]
    Stdin(io::Error),
    #[error("failed to wait: {0}")]
    Wait(io::Error),
    #[error("{0}")]
    Status(ExitStatus),
}

impl GuruError {
    pub(crate) fn address(step: &'static str, source: io::Error) -> Self {
        Self::AddressProtocol { step, source }
    }

    pub(crate) fn io(what: &'static str, source: io::Error) -> Self {
        Self::Io { what, source }
    }
}
