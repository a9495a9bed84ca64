//! `kip decode` command.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use kip_protocol::{Codec, Dispatcher, ReceiveConfig, Receiver};
use kip_types::{Family, KernelCommand, KernelEvent};
use serde_json::{Value, json};
use tracing::debug;

use crate::opts::GlobalOpts;
use crate::output::print_success;

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// File with one envelope per line (default: stdin)
    pub file: Option<PathBuf>,
}

/// Keeps decoded messages in arrival order.
#[derive(Default)]
struct Collector {
    messages: Vec<Received>,
}

enum Received {
    Command(KernelCommand),
    Event(KernelEvent),
}

impl Received {
    fn to_value(&self, codec: &Codec<'_>) -> Result<Value> {
        Ok(match self {
            Received::Command(command) => codec.command_to_value(&codec.create_command(command)?)?,
            Received::Event(event) => codec.event_to_value(&codec.create_event(event)?)?,
        })
    }

    /// Wire text again, one line each unless `pretty`.
    fn encode(&self, codec: &Codec<'_>, pretty: bool) -> Result<String> {
        Ok(match self {
            Received::Command(command) => {
                let envelope = codec.create_command(command)?;
                if pretty {
                    codec.encode_command_pretty(&envelope)?
                } else {
                    codec.encode_command(&envelope)?
                }
            }
            Received::Event(event) => {
                let envelope = codec.create_event(event)?;
                if pretty {
                    codec.encode_event_pretty(&envelope)?
                } else {
                    codec.encode_event(&envelope)?
                }
            }
        })
    }
}

impl Dispatcher for Collector {
    fn dispatch_command(&mut self, command: KernelCommand) {
        self.messages.push(Received::Command(command));
    }

    fn dispatch_event(&mut self, event: KernelEvent) {
        self.messages.push(Received::Event(event));
    }
}

pub fn cmd_decode(opts: &GlobalOpts, args: &DecodeArgs) -> Result<()> {
    let Some(family) = opts.family.map(Family::from) else {
        bail!("decode requires --family command|event");
    };
    let config = ReceiveConfig::from_env()?;
    let codec = Codec::builtin();
    let receiver = Receiver::new(codec, family).with_config(config);
    debug!(
        family = %receiver.family(),
        file = ?args.file,
        max_line_bytes = receiver.config().max_line_bytes,
        "decoding"
    );

    let reader: Box<dyn BufRead> = match &args.file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut collector = Collector::default();
    let summary = receiver
        .receive_lines(reader, &mut collector)
        .context("read envelopes")?;

    let failed: Vec<_> = summary
        .failed
        .iter()
        .map(|failure| json!({ "line": failure.line, "error": failure.error.to_string() }))
        .collect();

    if opts.json {
        let decoded = collector
            .messages
            .iter()
            .map(|message| message.to_value(&codec))
            .collect::<Result<Vec<_>>>()?;
        print_success(opts, json!({ "decoded": decoded, "failed": failed }), vec![])?;
    } else {
        let lines = collector
            .messages
            .iter()
            .map(|message| message.encode(&codec, opts.pretty).map(Value::String))
            .collect::<Result<Vec<_>>>()?;
        let notices = summary
            .failed
            .iter()
            .map(|failure| format!("line {}: {}", failure.line, failure.error))
            .collect();
        print_success(opts, Value::Array(lines), notices)?;
    }

    if !summary.is_clean() {
        bail!(
            "{} of {} lines failed to decode",
            summary.failed.len(),
            summary.dispatched + summary.failed.len()
        );
    }
    Ok(())
}
