//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings

use clap::Args;
use threeverb_config::resolve_preset;
use threeverb_processor::{PROCESSOR_NAME, ReverbShared};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show the values a preset would set
    #[arg(short, long, value_name = "NAME|PATH")]
    preset: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let shared = ReverbShared::new(None);
    if let Some(name) = &args.preset {
        let preset = resolve_preset(name)?;
        preset.apply(&shared)?;
        println!("{} parameters ({})", PROCESSOR_NAME, preset.name);
    } else {
        println!("{} parameters", PROCESSOR_NAME);
    }
    println!();

    println!(
        "  {:>4}  {:8}  {:10}  {:10}  {:8}  {}",
        "ID", "Key", "Name", "Range", "Default", "Value"
    );
    println!(
        "  {:>4}  {:8}  {:10}  {:10}  {:8}  {}",
        "--", "---", "----", "-----", "-------", "-----"
    );

    for (index, desc) in shared.descriptors().iter().enumerate() {
        let range = format!("{:.1}-{:.1}", desc.min, desc.max);
        let value = shared
            .get_value(index)
            .map(|v| desc.format_value(v))
            .unwrap_or_default();
        println!(
            "  {:>4}  {:8}  {:10}  {:10}  {:8}  {}",
            desc.id.0,
            desc.string_id,
            desc.name,
            range,
            desc.format_value(desc.default),
            value
        );
    }

    println!();
    println!("Set values with: threeverb render in.wav out.wav --param size=0.8 --param freeze=on");
    Ok(())
}
