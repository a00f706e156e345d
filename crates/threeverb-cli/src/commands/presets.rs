//! `threeverb presets`: list what is available or print one preset.

use std::path::Path;

use clap::Args;
use threeverb_config::{
    Preset, factory_presets, list_user_presets, preset_name_from_path, resolve_preset,
    user_presets_dir,
};
use threeverb_core::{ParameterInfo, ReverbParameters};
use threeverb_processor::BusVariant;

#[derive(Args)]
pub struct PresetsArgs {
    /// Preset to show (factory name, user preset name or file path)
    #[arg(value_name = "NAME")]
    name: Option<String>,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    if let Some(name) = args.name.as_deref() {
        return show(name);
    }
    list(&user_presets_dir());
    Ok(())
}

fn summary_line(label: &str, preset: &Preset) -> String {
    match preset.description.as_deref() {
        Some(text) => format!("  {label:<16}{text}"),
        None => format!("  {label}"),
    }
}

fn list(user_dir: &Path) {
    println!("factory:");
    for preset in factory_presets() {
        println!("{}", summary_line(&preset.name, &preset));
    }

    println!();
    println!("user ({}):", user_dir.display());
    let files = list_user_presets();
    if files.is_empty() {
        println!("  (none)");
        return;
    }
    for path in files {
        let label = preset_name_from_path(&path).unwrap_or_default();
        match Preset::load(&path) {
            Ok(preset) => println!("{}", summary_line(&label, &preset)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable preset");
                println!("  {label:<16}(unreadable)");
            }
        }
    }
}

fn show(name: &str) -> anyhow::Result<()> {
    let preset = resolve_preset(name)?;
    let params = preset.to_parameters()?;

    println!("{}", preset.name);
    if let Some(text) = &preset.description {
        println!("  {text}");
    }
    if let Some(variant) = preset.variant {
        println!("  for {} buses", BusVariant::from(variant));
    }
    println!();

    for (index, desc) in (0..params.param_count()).filter_map(|i| Some((i, params.param_info(i)?))) {
        let value = desc.format_value(params.get_param(index));
        if preset.params.contains_key(desc.string_id) {
            println!("  {:<8}{value}", desc.string_id);
        } else {
            println!("  {:<8}{value} (default)", desc.string_id);
        }
    }

    if params == ReverbParameters::default() {
        println!();
        println!("identical to the defaults");
    }
    Ok(())
}
