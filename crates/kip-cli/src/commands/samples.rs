//! `kip samples` command.

use anyhow::{Context, Result};
use clap::Args;
use kip_protocol::{CommandEnvelope, EnvelopeError, EventEnvelope};
use kip_testkit::corpus;
use kip_types::Family;
use serde_json::Value;

use crate::opts::GlobalOpts;
use crate::output::print_success;

#[derive(Args, Debug)]
pub struct SamplesArgs {
    /// Only print samples of this variant
    #[arg(long)]
    pub kind: Option<String>,
}

enum Sample {
    Command(CommandEnvelope),
    Event(EventEnvelope),
}

impl Sample {
    fn kind(&self) -> &str {
        match self {
            Sample::Command(envelope) => &envelope.kind,
            Sample::Event(envelope) => &envelope.kind,
        }
    }

    fn to_value(&self) -> Result<Value, EnvelopeError> {
        match self {
            Sample::Command(envelope) => envelope.to_value(),
            Sample::Event(envelope) => envelope.to_value(),
        }
    }

    fn encode(&self, pretty: bool) -> Result<String, EnvelopeError> {
        match (self, pretty) {
            (Sample::Command(envelope), false) => envelope.encode(),
            (Sample::Command(envelope), true) => envelope.encode_pretty(),
            (Sample::Event(envelope), false) => envelope.encode(),
            (Sample::Event(envelope), true) => envelope.encode_pretty(),
        }
    }
}

pub fn cmd_samples(opts: &GlobalOpts, args: &SamplesArgs) -> Result<()> {
    let mut envelopes = Vec::new();
    for family in opts.families() {
        match family {
            Family::Command => {
                for command in corpus::commands() {
                    let envelope = CommandEnvelope::create(&command)
                        .context("create sample command envelope")?;
                    envelopes.push(Sample::Command(envelope));
                }
            }
            Family::Event => {
                for event in corpus::events() {
                    let envelope =
                        EventEnvelope::create(&event).context("create sample event envelope")?;
                    envelopes.push(Sample::Event(envelope));
                }
            }
        }
    }
    envelopes.retain(|sample| wanted(args, sample.kind()));

    let mut warnings = vec![];
    if envelopes.is_empty() {
        if let Some(kind) = &args.kind {
            warnings.push(format!("no samples of kind '{kind}'"));
        }
    }

    let data = if opts.json {
        envelopes
            .iter()
            .map(Sample::to_value)
            .collect::<Result<Vec<_>, _>>()?
    } else {
        envelopes
            .iter()
            .map(|sample| sample.encode(opts.pretty).map(Value::String))
            .collect::<Result<Vec<_>, _>>()?
    };
    print_success(opts, Value::Array(data), warnings)
}

fn wanted(args: &SamplesArgs, kind: &str) -> bool {
    args.kind.as_deref().is_none_or(|wanted| wanted == kind)
}
