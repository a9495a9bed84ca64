//! Receiving side of a channel: decode line-delimited envelopes and hand the
//! resulting messages to a [`Dispatcher`].
//!
//! A line that fails to decode is reported and dropped; it never affects the
//! lines after it.

use kip_types::{Family, KernelCommand, KernelEvent};
use std::io::{self, BufRead, Read};
use tracing::{debug, warn};

use crate::{Codec, EnvelopeError, ReceiveConfig};

/// Consumer of decoded messages.
pub trait Dispatcher {
    fn dispatch_command(&mut self, command: KernelCommand);
    fn dispatch_event(&mut self, event: KernelEvent);
}

impl<D: Dispatcher + ?Sized> Dispatcher for &mut D {
    fn dispatch_command(&mut self, command: KernelCommand) {
        (**self).dispatch_command(command);
    }

    fn dispatch_event(&mut self, event: KernelEvent) {
        (**self).dispatch_event(event);
    }
}

#[derive(Debug)]
pub struct LineFailure {
    /// 1-based line number within the input.
    pub line: usize,
    pub error: EnvelopeError,
}

#[derive(Debug, Default)]
pub struct ReceiveSummary {
    pub dispatched: usize,
    pub skipped: usize,
    pub failed: Vec<LineFailure>,
}

impl ReceiveSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Decodes envelopes of one family and forwards them.
#[derive(Debug, Clone)]
pub struct Receiver<'r> {
    codec: Codec<'r>,
    family: Family,
    config: ReceiveConfig,
}

impl Receiver<'static> {
    pub fn builtin(family: Family) -> Self {
        Self::new(Codec::builtin(), family)
    }
}

impl<'r> Receiver<'r> {
    pub fn new(codec: Codec<'r>, family: Family) -> Self {
        Self {
            codec,
            family,
            config: ReceiveConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReceiveConfig) -> Self {
        self.config = config;
        self
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn config(&self) -> &ReceiveConfig {
        &self.config
    }

    /// Decode one line and dispatch it. On error nothing is dispatched.
    pub fn receive_line<D: Dispatcher + ?Sized>(
        &self,
        line: &str,
        dispatcher: &mut D,
    ) -> Result<(), EnvelopeError> {
        if line.len() > self.config.max_line_bytes {
            return Err(self.oversized());
        }
        match self.family {
            Family::Command => {
                let envelope = self.codec.decode_command(line)?;
                dispatcher.dispatch_command(envelope.into_command());
            }
            Family::Event => {
                let envelope = self.codec.decode_event(line)?;
                dispatcher.dispatch_event(envelope.into_event());
            }
        }
        Ok(())
    }

    /// Drive `reader` to the end, one envelope per line. Only I/O failures of
    /// the reader itself abort the loop. At most `max_line_bytes` plus the
    /// line ending is buffered per line.
    pub fn receive_lines<R, D>(
        &self,
        mut reader: R,
        dispatcher: &mut D,
    ) -> io::Result<ReceiveSummary>
    where
        R: BufRead,
        D: Dispatcher + ?Sized,
    {
        let mut summary = ReceiveSummary::default();
        let mut buf = Vec::new();
        let mut number = 0;
        loop {
            let read = read_bounded_line(&mut reader, &mut buf, self.config.max_line_bytes)?;
            if read == LineRead::Eof {
                break;
            }
            number += 1;

            let result = match (read, std::str::from_utf8(&buf)) {
                (LineRead::Oversized, _) => Err(self.oversized()),
                (_, Ok(line)) if self.config.skip_blank_lines && line.trim().is_empty() => {
                    summary.skipped += 1;
                    continue;
                }
                (_, Ok(line)) => self.receive_line(line, dispatcher),
                (_, Err(err)) => Err(EnvelopeError::malformed(
                    self.family,
                    format!("line is not valid UTF-8: {err}"),
                )),
            };
            match result {
                Ok(()) => summary.dispatched += 1,
                Err(error) => {
                    warn!(line = number, family = %self.family, %error, "dropping received line");
                    summary.failed.push(LineFailure {
                        line: number,
                        error,
                    });
                }
            }
        }
        debug!(
            family = %self.family,
            dispatched = summary.dispatched,
            failed = summary.failed.len(),
            "receive finished"
        );
        Ok(summary)
    }

    fn oversized(&self) -> EnvelopeError {
        EnvelopeError::malformed(
            self.family,
            format!("line exceeds the {}-byte limit", self.config.max_line_bytes),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineRead {
    Eof,
    Line,
    Oversized,
}

/// Read one line into `buf` without its line ending. A line longer than
/// `max` is consumed through its newline but never held in `buf`.
fn read_bounded_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max: usize,
) -> io::Result<LineRead> {
    buf.clear();
    // Room for a CRLF ending after a line of exactly `max` bytes.
    let cap = max.saturating_add(2) as u64;
    let read = (&mut *reader).take(cap).read_until(b'\n', buf)?;
    if read == 0 {
        return Ok(LineRead::Eof);
    }
    if buf.last() != Some(&b'\n') && read as u64 == cap {
        buf.clear();
        reader.skip_until(b'\n')?;
        return Ok(LineRead::Oversized);
    }
    trim_line_ending(buf);
    if buf.len() > max {
        buf.clear();
        return Ok(LineRead::Oversized);
    }
    Ok(LineRead::Line)
}

fn trim_line_ending(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegistryError;
    use kip_types::{CommandType, EventType, MessageFamily};
    use std::io::Cursor;

    #[derive(Default)]
    struct Collected {
        commands: Vec<KernelCommand>,
        events: Vec<KernelEvent>,
    }

    impl Dispatcher for Collected {
        fn dispatch_command(&mut self, command: KernelCommand) {
            self.commands.push(command);
        }

        fn dispatch_event(&mut self, event: KernelEvent) {
            self.events.push(event);
        }
    }

    #[test]
    fn bad_line_does_not_affect_the_next() {
        let input = concat!(
            r#"{"kind":"SubmitCode","payload":{"code":"1"},"token":"t-1"}"#,
            "\n",
            r#"{"kind":"SubmitCode","payload":"#,
            "\n",
            r#"{"kind":"LaunchRocket","payload":{}}"#,
            "\r\n",
            "\n",
            r#"{"kind":"DisplayError","payload":{"message":"oops!"}}"#,
            "\n",
        );
        let receiver = Receiver::builtin(Family::Command);
        let mut collected = Collected::default();
        let summary = receiver
            .receive_lines(Cursor::new(input), &mut collected)
            .unwrap();

        assert_eq!(summary.dispatched, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(
            summary.failed.iter().map(|f| f.line).collect::<Vec<_>>(),
            vec![2, 3]
        );
        assert!(matches!(summary.failed[0].error, EnvelopeError::Malformed { .. }));
        assert!(matches!(
            summary.failed[1].error,
            EnvelopeError::Registry(RegistryError::UnknownDiscriminator { .. })
        ));

        let kinds: Vec<_> = collected.commands.iter().map(|c| c.command.tag()).collect();
        assert_eq!(kinds, vec![CommandType::SubmitCode, CommandType::DisplayError]);
        assert_eq!(collected.commands[0].token.as_ref().map(|t| t.as_str()), Some("t-1"));
        assert!(collected.events.is_empty());
    }

    #[test]
    fn events_carry_their_causing_command() {
        let line = concat!(
            r#"{"kind":"CommandSucceeded","payload":{},"#,
            r#""causingCommandEnvelope":{"kind":"SubmitCode","payload":{"code":"123"}}}"#,
        );
        let receiver = Receiver::builtin(Family::Event);
        let mut collected = Collected::default();
        receiver.receive_line(line, &mut collected).unwrap();

        let event = &collected.events[0];
        assert_eq!(event.event_type(), EventType::CommandSucceeded);
        let cause = event.command.as_ref().unwrap();
        assert_eq!(cause.command.tag(), CommandType::SubmitCode);
        assert!(cause.handler().is_none());
        assert!(cause.properties().is_empty());
    }

    #[test]
    fn oversized_and_non_utf8_lines_are_malformed() {
        let receiver = Receiver::builtin(Family::Event).with_config(ReceiveConfig {
            max_line_bytes: 32,
            skip_blank_lines: false,
        });
        let mut input =
            br#"{"kind":"CommandSucceeded","payload":{},"extra":"padding"}"#.to_vec();
        input.extend_from_slice(b"\n\xff\xfe\n\n");
        let mut collected = Collected::default();
        let summary = receiver
            .receive_lines(Cursor::new(input), &mut collected)
            .unwrap();

        assert_eq!(summary.dispatched, 0);
        assert_eq!(summary.failed.len(), 3);
        let reasons: Vec<_> = summary.failed.iter().map(|f| f.error.to_string()).collect();
        assert!(reasons[0].contains("32-byte limit"), "{}", reasons[0]);
        assert!(reasons[1].contains("not valid UTF-8"), "{}", reasons[1]);
        assert!(reasons[2].contains("invalid JSON"), "{}", reasons[2]);
        assert!(!summary.is_clean());
    }

    #[test]
    fn line_at_the_limit_is_accepted_one_over_is_not() {
        let line = r#"{"kind":"CommandSucceeded","payload":{}}"#;
        let receiver = Receiver::builtin(Family::Event).with_config(ReceiveConfig {
            max_line_bytes: line.len(),
            skip_blank_lines: true,
        });
        assert_eq!(receiver.family(), Family::Event);
        let input = format!("{line}\r\n{line} \n{line}\n{line}");
        let mut collected = Collected::default();
        let summary = receiver
            .receive_lines(Cursor::new(input), &mut collected)
            .unwrap();

        assert_eq!(summary.dispatched, 3);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].line, 2);
        assert!(matches!(summary.failed[0].error, EnvelopeError::Malformed { .. }));
        assert_eq!(collected.events.len(), 3);
    }

    #[test]
    fn oversized_line_is_never_buffered_whole() {
        let limit = 32;
        let mut input = vec![b'x'; 8 << 20];
        input.push(b'\n');
        input.extend_from_slice(br#"{"kind":"CommandSucceeded","payload":{}}"#);
        input.push(b'\n');
        let mut reader = Cursor::new(input);
        let mut buf = Vec::new();

        let read = read_bounded_line(&mut reader, &mut buf, limit).unwrap();
        assert_eq!(read, LineRead::Oversized);
        assert!(buf.capacity() <= 4 * limit, "capacity {}", buf.capacity());

        let read = read_bounded_line(&mut reader, &mut buf, 64).unwrap();
        assert_eq!(read, LineRead::Line);
        assert!(buf.starts_with(br#"{"kind""#));
        assert_eq!(read_bounded_line(&mut reader, &mut buf, 64).unwrap(), LineRead::Eof);
    }

    #[test]
    fn oversized_line_does_not_affect_the_next() {
        let mut input = vec![b'x'; 1 << 20];
        input.extend_from_slice(b"\n");
        input.extend_from_slice(br#"{"kind":"CommandSucceeded","payload":{}}"#);
        let receiver = Receiver::builtin(Family::Event).with_config(ReceiveConfig {
            max_line_bytes: 64,
            skip_blank_lines: true,
        });
        let mut collected = Collected::default();
        let summary = receiver
            .receive_lines(Cursor::new(input), &mut collected)
            .unwrap();

        assert_eq!(summary.dispatched, 1);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].line, 1);
        assert_eq!(collected.events[0].event_type(), EventType::CommandSucceeded);
    }
}
