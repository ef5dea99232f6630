use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vecmesh", version)]
struct Cli {
    /// Log debug diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Combine an SVG into meshes and print a JSON summary.
    Mesh(MeshArgs),
    /// Print the flattened layers and the frame table of an SVG.
    Frames(FramesArgs),
}

#[derive(Parser, Debug)]
struct ImportArgs {
    /// Input SVG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Curve flattening tolerance.
    #[arg(long)]
    tolerance: Option<f32>,

    /// Skip stroke tessellation.
    #[arg(long)]
    no_strokes: bool,
}

#[derive(Parser, Debug)]
struct MeshArgs {
    #[command(flatten)]
    import: ImportArgs,

    /// Sprite frame to select; all layers are combined when omitted.
    #[arg(long, allow_negative_numbers = true)]
    frame: Option<f32>,

    /// Mesh settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output summary path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    import: ImportArgs,
}

#[derive(serde::Serialize)]
struct MeshReport {
    layers: usize,
    matched_frame: Option<i32>,
    summary: vecmesh::MeshSummary,
}

#[derive(serde::Serialize)]
struct LayerEntry<'a> {
    name: &'a str,
    shapes: usize,
}

#[derive(serde::Serialize)]
struct FrameEntry<'a> {
    key: i32,
    layer: &'a str,
}

#[derive(serde::Serialize)]
struct FramesReport<'a> {
    layers: Vec<LayerEntry<'a>>,
    frames: Vec<FrameEntry<'a>>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Mesh(args) => cmd_mesh(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_document(args: &ImportArgs) -> anyhow::Result<vecmesh::Document> {
    let mut opts = vecmesh::ImportOptions::default();
    if let Some(tolerance) = args.tolerance {
        opts.tolerance = tolerance;
    }
    opts.strokes = !args.no_strokes;
    Ok(vecmesh::load_svg(&args.in_path, &opts)?)
}

fn cmd_mesh(args: MeshArgs) -> anyhow::Result<()> {
    let settings = match &args.settings {
        Some(path) => vecmesh::MeshSettings::from_path(path)?,
        None => vecmesh::MeshSettings::default(),
    };
    settings.validate()?;

    let doc = load_document(&args.import)?;
    let layers = doc.render();

    let (mesh, matched_frame) = match args.frame {
        Some(frame) => {
            let selection = vecmesh::select_frame(&layers, frame, None, true);
            (vecmesh::combine(selection.layers, &settings), selection.matched)
        }
        None => (vecmesh::combine(&layers, &settings), None),
    };
    tracing::info!(
        layers = layers.len(),
        matched_frame = ?matched_frame,
        buffers = mesh.len(),
        "mesh combined"
    );

    let report = MeshReport {
        layers: layers.len(),
        matched_frame,
        summary: mesh.summary(),
    };
    write_json(&report, args.out.as_deref())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.import)?;
    let layers = doc.render();
    let index = vecmesh::FrameIndex::build(&layers);

    let report = FramesReport {
        layers: layers
            .iter()
            .map(|l| LayerEntry {
                name: &l.name,
                shapes: l.len(),
            })
            .collect(),
        frames: index
            .iter()
            .map(|(key, pos)| FrameEntry {
                key,
                layer: &layers[pos].name,
            })
            .collect(),
    };
    write_json(&report, None)
}

fn write_json<T: serde::Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize report")?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json + "\n")
                .with_context(|| format!("write summary '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write stdout")?;
        }
    }
    Ok(())
}
