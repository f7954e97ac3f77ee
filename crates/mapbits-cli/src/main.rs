//! `mapbits`: batch bin <-> JSON conversion for map grids and tilesets.
//!
//! Output files are written next to their inputs with the extension swapped.
//! A file that fails to convert is logged and skipped; the exit code only
//! reflects argument and descriptor errors.

mod logging;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use mapbits::{
    Domain, FormatDescriptors, Version,
    batch::{self, BatchSummary},
};

#[derive(Parser, Debug)]
#[command(name = "mapbits", version, about = "Convert map and tileset binaries to JSON and back")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Descriptor file for the `custom` version.
    #[arg(long, global = true, env = "MAPBITS_DESCRIPTOR")]
    descriptor: Option<PathBuf>,

    /// Log per-file progress.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode `.bin` files into sibling `.json` documents.
    Bin2json {
        version: VersionArg,
        mode: ModeArg,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Encode `.json` documents back into sibling `.bin` files.
    Json2bin {
        mode: ModeArg,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum VersionArg {
    Rse,
    Frlg,
    Custom,
}

impl From<VersionArg> for Version {
    fn from(arg: VersionArg) -> Self {
        match arg {
            VersionArg::Rse => Version::RubySapphireEmerald,
            VersionArg::Frlg => Version::FireRedLeafGreen,
            VersionArg::Custom => Version::Custom,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ModeArg {
    /// layouts/*/map.bin and border.bin
    Mapgrid,
    /// tilesets/*/*/metatiles.bin
    Metatiles,
    /// tilesets/*/*/metatile_attributes.bin
    #[value(name = "metatile_attributes")]
    MetatileAttributes,
}

impl From<ModeArg> for Domain {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Mapgrid => Domain::Mapgrid,
            ModeArg::Metatiles => Domain::Metatiles,
            ModeArg::MetatileAttributes => Domain::MetatileAttributes,
        }
    }
}

/// Picks the compiled-in descriptors for `version`, or loads the custom file.
fn resolve_descriptors(version: Version, descriptor: Option<&Path>) -> Result<FormatDescriptors> {
    if let Some(builtin) = FormatDescriptors::builtin(version) {
        if descriptor.is_some() {
            tracing::warn!(%version, "--descriptor is only used with the custom version");
        }
        return Ok(builtin.clone());
    }

    let Some(path) = descriptor else {
        bail!("the custom version needs --descriptor <PATH> or MAPBITS_DESCRIPTOR");
    };
    FormatDescriptors::load(path)
        .with_context(|| format!("failed to load descriptor: {}", path.display()))
}

fn run(cli: Cli) -> Result<BatchSummary> {
    let summary = match cli.command {
        Command::Bin2json {
            version,
            mode,
            files,
        } => {
            let version = Version::from(version);
            let descriptors = resolve_descriptors(version, cli.descriptor.as_deref())?;
            let domain = Domain::from(mode);
            tracing::debug!(%version, %domain, files = files.len(), "bin2json");

            batch::convert_all(&files, |path| batch::bin_to_json(path, domain, &descriptors))
        }
        Command::Json2bin { mode, files } => {
            let domain = Domain::from(mode);
            tracing::debug!(%domain, files = files.len(), "json2bin");

            batch::convert_all(&files, |path| batch::json_to_bin(path, domain))
        }
    };

    Ok(summary)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::default_level(cli.verbose));

    run(cli)?;

    Ok(())
}
