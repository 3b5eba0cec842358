//! Delivery of serialized messages: sendmail subprocess or debug sink.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::errors::Error;

/// Default path to the sendmail binary.
pub const DEFAULT_SENDMAIL: &str = "/usr/sbin/sendmail";

/// How to invoke the MTA: the binary plus any extra arguments that go in
/// front of the recipient mailboxes.
#[derive(Debug, Clone)]
pub struct SendmailCommand {
    pub binary: PathBuf,
    pub extra_args: Vec<String>,
}

impl Default for SendmailCommand {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_SENDMAIL),
            extra_args: Vec::new(),
        }
    }
}

/// Where serialized message bytes go.
///
/// Exactly one target is active per transport; a sink entirely replaces
/// process delivery and receives byte-identical output to what the
/// subprocess would have read on stdin.
pub enum Transport {
    /// Pipe the message to an MTA subprocess.
    Sendmail(SendmailCommand),
    /// Write the message to a byte sink. No process is spawned and the
    /// recipient list is ignored.
    Sink(Box<dyn Write + Send>),
}

impl Default for Transport {
    fn default() -> Self {
        Self::Sendmail(SendmailCommand::default())
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sendmail(cmd) => f.debug_tuple("Sendmail").field(cmd).finish(),
            Self::Sink(_) => f.write_str("Sink"),
        }
    }
}

impl Transport {
    /// Subprocess transport for the given binary, no extra arguments.
    pub fn sendmail(binary: impl Into<PathBuf>) -> Self {
        Self::Sendmail(SendmailCommand {
            binary: binary.into(),
            ..SendmailCommand::default()
        })
    }

    /// Subprocess transport with extra arguments placed before the
    /// recipient mailboxes.
    pub fn sendmail_with_args<I, S>(binary: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Sendmail(SendmailCommand {
            binary: binary.into(),
            extra_args: args.into_iter().map(Into::into).collect(),
        })
    }

    /// Sink transport around any writer.
    pub fn sink(sink: impl Write + Send + 'static) -> Self {
        Self::Sink(Box::new(sink))
    }

    /// Hands one serialized message to the delivery target.
    ///
    /// One attempt, no retries. For the subprocess target the recipients'
    /// bare mailboxes become positional arguments, the message bytes go to
    /// stdin, and stderr is drained before waiting on the child. Any
    /// stderr output is a failure regardless of the exit code; this is
    /// stricter than most MTA integrations (some write warnings to stderr
    /// on success), so confirm it against the target MTA before relaxing.
    pub fn deliver(&mut self, message: &[u8], recipients: &[String]) -> Result<(), Error> {
        match self {
            Self::Sendmail(command) => deliver_to_process(command, message, recipients),
            Self::Sink(sink) => {
                sink.write_all(message).map_err(Error::Write)?;
                sink.flush().map_err(Error::Write)?;
                log::debug!("wrote {} message bytes to debug sink", message.len());
                Ok(())
            }
        }
    }
}

fn deliver_to_process(
    command: &SendmailCommand,
    message: &[u8],
    recipients: &[String],
) -> Result<(), Error> {
    let mut child = Command::new(&command.binary)
        .args(&command.extra_args)
        .args(recipients)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| Error::Launch {
            binary: command.binary.clone(),
            source,
        })?;
    log::debug!(
        "spawned {} for {} recipient(s)",
        command.binary.display(),
        recipients.len()
    );

    // Both handles exist: stdin and stderr were requested as pipes above.
    let mut stdin = child.stdin.take().expect("child stdin is piped");
    let mut stderr = child.stderr.take().expect("child stderr is piped");

    // Closing stdin signals end-of-input to the MTA.
    stdin.write_all(message).map_err(Error::Write)?;
    drop(stdin);

    // Drain stderr fully before the blocking wait; waiting first can
    // deadlock when the child blocks on a full stderr pipe.
    let mut diagnostics = Vec::new();
    stderr
        .read_to_end(&mut diagnostics)
        .map_err(Error::Write)?;

    if !diagnostics.is_empty() {
        // Reap the child, but its exit status does not change the outcome.
        let _ = child.wait();
        return Err(Error::MtaReported {
            stderr: diagnostics,
        });
    }

    let status = child.wait().map_err(Error::Write)?;
    if !status.success() {
        return Err(Error::ProcessExit(status));
    }
    log::debug!("message accepted by {}", command.binary.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_receives_exact_bytes() {
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Shared(Arc<Mutex<Vec<u8>>>);

        impl Write for Shared {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let shared = Shared::default();
        let mut transport = Transport::sink(shared.clone());
        transport
            .deliver(b"Subject: hi\r\n\r\n:)", &["info@example.com".to_string()])
            .unwrap();
        assert_eq!(&*shared.0.lock().unwrap(), b"Subject: hi\r\n\r\n:)");
    }

    #[test]
    fn missing_binary_is_a_launch_error() {
        let mut transport = Transport::sendmail("/nonexistent/sendmail-test-binary");
        let err = transport
            .deliver(b"x", &["info@example.com".to_string()])
            .unwrap_err();
        assert!(matches!(err, Error::Launch { .. }), "got {err:?}");
    }

    #[test]
    fn default_transport_points_at_sendmail() {
        match Transport::default() {
            Transport::Sendmail(cmd) => {
                assert_eq!(cmd.binary, PathBuf::from(DEFAULT_SENDMAIL));
                assert!(cmd.extra_args.is_empty());
            }
            Transport::Sink(_) => panic!("default transport should be sendmail"),
        }
    }
}
