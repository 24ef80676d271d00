use std::{
    io::{BufRead, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use edict::{
    Assets, Generator, RenderState, TextFitter, TextStyle,
    export::DEFAULT_FILE_NAME,
    text::{SingleColumnConfig, TwoColumnConfig},
    typeface::BlockTypeface,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// Overflow from the first column continues in a second one
    TwoColumn,
    /// One taller column, nothing overflows
    SingleColumn,
}

/// edict: fit text into skewed columns on a template image and save it as PNG
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text to render. Read from stdin when neither --text nor --text-file is given
    #[arg(short, long, conflicts_with = "text_file")]
    text: Option<String>,

    /// File containing the text to render
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Background image; its size becomes the output size
    #[arg(short, long)]
    base: PathBuf,

    /// Image drawn over the text, e.g. hands holding the page
    #[arg(long)]
    overlay: PathBuf,

    /// Column layout
    #[arg(long, value_enum, default_value_t = Variant::TwoColumn)]
    variant: Variant,

    /// Output file, or a directory to write executive-order.png into
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    output: PathBuf,

    /// Font family to look up, falling back to any serif face
    #[arg(long, default_value = "Times New Roman")]
    font_family: String,

    /// Font files to use instead of the system fonts
    #[arg(long)]
    font_file: Vec<PathBuf>,

    /// Draw placeholder boxes instead of glyphs
    #[arg(long)]
    blocks: bool,

    /// Re-render on every line read from stdin
    #[arg(short, long)]
    watch: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let fitter: TextFitter = match args.variant {
        Variant::TwoColumn => TwoColumnConfig::EXECUTIVE_ORDER.into(),
        Variant::SingleColumn => SingleColumnConfig::EXECUTIVE_ORDER.into(),
    };
    let style = TextStyle {
        font_family: args.font_family.clone(),
        ..TextStyle::default()
    };
    let generator = Generator::new(fitter, style);

    if args.blocks {
        generator.set_typeface(BlockTypeface::default());
    } else {
        if args.font_file.is_empty() {
            generator.load_system_fonts();
        }
        for path in &args.font_file {
            generator
                .load_font_file(path)
                .with_context(|| format!("Failed to load font file {}", path.display()))?;
        }
        generator
            .select_style_family()
            .context("No usable font found")?;
    }

    let assets = Assets::load(&args.base, &args.overlay).context("Failed to load images")?;
    let mut state = RenderState::new();

    if args.watch {
        state.images_loaded(assets, &generator);
        for line in std::io::stdin().lock().lines() {
            let line = line.context("Failed to read stdin")?;
            state.set_text(line, &generator);
            write_frame(&state, &args.output)?;
        }
        return Ok(());
    }

    let text = read_text(&args)?;
    state.set_text(text, &generator);
    state.images_loaded(assets, &generator);
    write_frame(&state, &args.output)
}

fn read_text(args: &Args) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    let mut text = match &args.text_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    // a file or pipe almost always ends with a newline nobody typed on purpose
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}

fn write_frame(state: &RenderState, output: &Path) -> anyhow::Result<()> {
    let written = if output.is_dir() {
        state.export_in(output)?
    } else {
        state.export(output)?
    };

    match (written, state.frame()) {
        (Some(path), Some(frame)) => {
            let outcome = &frame.outcome;
            if outcome.fits() {
                log::info!(
                    "Wrote {} at font size {}",
                    path.display(),
                    outcome.font_size()
                );
            } else {
                log::warn!(
                    "Wrote {} at font size {}; dropped: \"{}\"",
                    path.display(),
                    outcome.font_size(),
                    outcome.attempt.remainder
                );
            }
        }
        _ => log::warn!("Nothing was drawn; no file written."),
    }
    Ok(())
}
