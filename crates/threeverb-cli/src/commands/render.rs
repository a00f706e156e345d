//! Offline rendering of a WAV file through the reverb.

use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use threeverb_config::{Settings, resolve_preset, settings_path};
use threeverb_core::AudioBuffer;
use threeverb_processor::{BusVariant, ReverbProcessor};

use super::common::{apply_param_overrides, linear_to_db, parse_key_val, peak};
use crate::wav::{PlanarAudio, read_wav, write_wav};

#[derive(Args)]
pub struct RenderArgs {
    /// Input WAV file (1, 2 or 4 channels)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or TOML file
    #[arg(short, long, value_name = "NAME|PATH")]
    preset: Option<String>,

    /// Parameter override, applied after the preset (e.g. "size=0.8")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Processing block size
    #[arg(long)]
    block_size: Option<usize>,

    /// Output bit depth (16, 24, or 32)
    #[arg(long)]
    bit_depth: Option<u16>,

    /// Seconds of silence appended so the tail can ring out
    #[arg(long)]
    tail: Option<f32>,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let defaults = Settings::load_or_default(settings_path())?;
    let settings = Settings {
        block_size: args.block_size.unwrap_or(defaults.block_size),
        bit_depth: args.bit_depth.unwrap_or(defaults.bit_depth),
        tail_seconds: args.tail.unwrap_or(defaults.tail_seconds),
    };
    settings.validate()?;
    let Settings {
        block_size,
        bit_depth,
        tail_seconds,
    } = settings;

    println!("Reading {}...", args.input.display());
    let mut audio = read_wav(&args.input)?;
    let num_channels = audio.channels.len();
    println!(
        "  {} channel(s), {} Hz, {:.2}s",
        num_channels,
        audio.sample_rate,
        audio.duration_secs()
    );

    let variant = BusVariant::for_channel_count(num_channels).with_context(|| {
        format!("unsupported channel count {num_channels} (expected 1, 2 or 4)")
    })?;
    let layout = variant
        .layout_for_channels(num_channels)
        .with_context(|| format!("no {variant} layout for {num_channels} channels"))?;

    let mut processor = ReverbProcessor::new(variant);
    processor.set_buses_layout(layout)?;

    if let Some(name) = &args.preset {
        let preset = resolve_preset(name)?;
        if let Some(preset_variant) = preset.variant
            && BusVariant::from(preset_variant) != variant
        {
            tracing::warn!(
                preset = %preset.name,
                "preset targets the {} variant, rendering as {}",
                BusVariant::from(preset_variant),
                variant
            );
        }
        preset.apply(processor.shared())?;
        println!("Preset: {}", preset.name);
    }
    apply_param_overrides(processor.shared(), &args.param)?;

    let input_peak = peak(&audio.channels);
    let tail_frames = usize::try_from(
        (f64::from(tail_seconds) * f64::from(audio.sample_rate)).round() as u64,
    )?;
    let total_frames = audio
        .num_frames()
        .checked_add(tail_frames)
        .context("input plus tail is too long")?;
    for channel in &mut audio.channels {
        channel.resize(total_frames, 0.0);
    }

    processor.prepare_to_play(f64::from(audio.sample_rate), block_size)?;
    println!("Rendering ({variant}, {layout}, block size {block_size})...");
    render_blocks(&mut processor, &mut audio, block_size)?;
    processor.release_resources();

    println!();
    println!("Stats:");
    println!("  Input:  Peak {:.1} dB", linear_to_db(input_peak));
    println!("  Output: Peak {:.1} dB", linear_to_db(peak(&audio.channels)));

    println!();
    println!("Writing {} ({}-bit)...", args.output.display(), bit_depth);
    write_wav(&args.output, &audio, bit_depth)?;
    println!("Done!");
    Ok(())
}

/// Run the whole file through the processor in place, block by block.
fn render_blocks(
    processor: &mut ReverbProcessor,
    audio: &mut PlanarAudio,
    block_size: usize,
) -> anyhow::Result<()> {
    let total = audio.num_frames();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut start = 0;
    while start < total {
        let end = (start + block_size).min(total);
        let mut block: Vec<&mut [f32]> = audio
            .channels
            .iter_mut()
            .map(|c| &mut c[start..end])
            .collect();
        let mut buffer = AudioBuffer::new(&mut block)?;
        processor.process_block(&mut buffer)?;
        pb.set_position(end as u64);
        start = end;
    }

    pb.finish_with_message("done");
    Ok(())
}
