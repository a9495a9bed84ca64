//! `kip catalog` command.

use anyhow::Result;
use clap::Args;
use kip_protocol::{Registry, command_registry, event_registry};
use kip_types::{Family, MessageFamily};
use serde_json::{Map, Value, json};

use crate::opts::GlobalOpts;
use crate::output::print_success;

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Also list the payload variant each discriminator decodes to
    #[arg(long)]
    pub variants: bool,
}

pub fn cmd_catalog(opts: &GlobalOpts, args: &CatalogArgs) -> Result<()> {
    let mut lines = Vec::new();
    let mut data = Map::new();
    for family in opts.families() {
        let entries = match family {
            Family::Command => entries(command_registry()),
            Family::Event => entries(event_registry()),
        };
        for (discriminator, variant) in &entries {
            lines.push(if args.variants {
                format!("{family}\t{discriminator}\t{variant}")
            } else {
                format!("{family}\t{discriminator}")
            });
        }
        data.insert(
            family.as_str().to_string(),
            entries
                .iter()
                .map(|(discriminator, variant)| {
                    if args.variants {
                        json!({ "discriminator": discriminator, "variant": variant })
                    } else {
                        json!(discriminator)
                    }
                })
                .collect(),
        );
    }

    if opts.json {
        print_success(opts, Value::Object(data), vec![])
    } else {
        print_success(opts, lines.into_iter().map(Value::String).collect(), vec![])
    }
}

fn entries<M: MessageFamily>(registry: &Registry<M>) -> Vec<(&'static str, &'static str)> {
    registry
        .discriminators()
        .zip(registry.variants())
        .map(|(discriminator, tag)| (discriminator, M::tag_name(tag)))
        .collect()
}
