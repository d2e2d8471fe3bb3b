//! Running the external analysis tool.

use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};

use crate::domain::errors::{GuruError, SubprocessFailure};
use crate::domain::model::BufferSnapshot;

/// A prepared run of the analysis tool over one buffer snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Vec<u8>,
}

impl Invocation {
    /// Position and replace-set flags for `snapshot`, then `passthrough` verbatim.
    pub fn new(
        program: impl Into<String>,
        snapshot: BufferSnapshot,
        passthrough: &[String],
    ) -> Self {
        let mut args = position_args(&snapshot);
        args.extend(passthrough.iter().cloned());
        Self {
            program: program.into(),
            args,
            stdin: snapshot.into_body(),
        }
    }

    /// Run the tool with both of its output streams sent to our stderr.
    pub fn run(&self) -> Result<(), GuruError> {
        self.run_with_output(Stdio::from(io::stderr()), Stdio::from(io::stderr()))
    }

    pub fn run_with_output(&self, stdout: Stdio, stderr: Stdio) -> Result<(), GuruError> {
        tracing::info!(program = %self.program, args = ?self.args, "running analysis tool");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(stdout)
            .stderr(stderr)
            .spawn()
            .map_err(|err| self.failed(SubprocessFailure::Spawn(err)))?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&self.stdin) {
                Ok(()) => {}
                // the tool is free to stop reading early; its status decides
                Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                    tracing::debug!(program = %self.program, "tool closed its input early");
                }
                Err(err) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(self.failed(SubprocessFailure::Stdin(err)));
                }
            }
        }

        let status = child
            .wait()
            .map_err(|err| self.failed(SubprocessFailure::Wait(err)))?;
        tracing::debug!(program = %self.program, %status, "analysis tool exited");
        check_status(status).map_err(|failure| self.failed(failure))
    }

    fn failed(&self, failure: SubprocessFailure) -> GuruError {
        GuruError::Subprocess {
            program: self.program.clone(),
            failure,
        }
    }
}

/// `-pos <file>:#<start>,#<end> -replaceset <file>,-`
pub fn position_args(snapshot: &BufferSnapshot) -> Vec<String> {
    let (start, end) = snapshot.byte_range();
    let name = snapshot.name();
    vec![
        "-pos".to_owned(),
        format!("{name}:#{start},#{end}"),
        "-replaceset".to_owned(),
        format!("{name},-"),
    ]
}

fn check_status(status: ExitStatus) -> Result<(), SubprocessFailure> {
    if status.success() {
        Ok(())
    } else {
        Err(SubprocessFailure::Status(status))
    }
}
