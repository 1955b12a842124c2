use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use zpl_label::{label, open_image};

/// Convert a raster image into a ZPL ^GFA graphic field.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Input image file (PNG or any format the image crate decodes).
    input: PathBuf,

    /// Output file; writes to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Invert black and white.
    #[arg(long)]
    invert: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}:{}] {} - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();

    let source = open_image(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let field = label(&source, args.invert);

    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            out.write_all(field.as_bytes())?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            out.write_all(field.as_bytes())?;
            out.flush()?;
        }
    }

    Ok(())
}
