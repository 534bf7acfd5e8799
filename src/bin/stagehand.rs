use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stagehand", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay scripted pointer gestures and edits against a scene.
    Replay(ReplayArgs),
    /// Print the layer matrix in paint order and any broken invariants.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Replay script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Editor config JSON (defaults when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the resulting scene here.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print every emitted event as a JSON line.
    #[arg(long)]
    trace: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Editor config JSON (defaults when omitted).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Replay(args) => cmd_replay(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<stagehand::EditorConfig> {
    match path {
        Some(p) => stagehand::EditorConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(stagehand::EditorConfig::default()),
    }
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let mut scene = stagehand::Scene::from_path(&args.scene)
        .with_context(|| format!("load scene '{}'", args.scene.display()))?;
    let script = stagehand::ReplayScript::from_path(&args.script)
        .with_context(|| format!("load script '{}'", args.script.display()))?;

    let report = stagehand::replay::run(&mut scene, &script, &cfg);

    if args.trace {
        for ev in &report.events {
            println!("{}", serde_json::to_string(ev).context("serialize event")?);
        }
    }
    println!(
        "{} steps, {} events, {} rejected, capture box {}/{} clip {}/{}",
        report.steps,
        report.events.len(),
        report.rejected(),
        report.box_capture.acquired,
        report.box_capture.released,
        report.clip_capture.acquired,
        report.clip_capture.released,
    );
    for v in &report.violations {
        println!("violation: {v}");
    }

    if let Some(out) = &args.out {
        if let Some(parent) = out.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        scene
            .save(out)
            .with_context(|| format!("write scene '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let scene = stagehand::Scene::from_path(&args.scene)
        .with_context(|| format!("load scene '{}'", args.scene.display()))?;

    let canvas = scene.canvas();
    println!("canvas {}x{}", canvas.w, canvas.h);
    for b in scene.matrix.painter_order() {
        println!(
            "z={:>4} {:<8} {:<10} {:<5} x={:.1} y={:.1} w={:.1} h={:.1}",
            b.z_index, b.id, b.slot_key, b.col_role, b.px.x, b.px.y, b.px.w, b.px.h
        );
    }
    for t in scene.timeline.tracks() {
        let clips = scene
            .timeline
            .clips()
            .iter()
            .filter(|c| c.track_id == t.id)
            .count();
        let flags = [(t.is_main, "main"), (t.is_locked, "locked"), (t.is_hidden, "hidden")]
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(",");
        println!("track {} '{}' clips={clips} [{flags}]", t.id, t.name);
    }

    let violations = scene.violations(cfg.min_box_size_px, cfg.min_clip_duration);
    for v in &violations {
        println!("violation: {v}");
    }
    if violations.is_empty() {
        println!("ok");
    }
    Ok(())
}
