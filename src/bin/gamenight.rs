use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gamenight::{
    BackendKind, EventMoment, FontSource, GameNightConfig, Layer, RenderSession, RenderSettings,
    time::format::{primary_lines, roster_lines},
};

#[derive(Parser, Debug)]
#[command(name = "gamenight", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the card and write it as a PNG.
    Render(RenderArgs),
    /// Print the date card strings without rendering.
    Times(TimesArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// JSON config file; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Template name.
    #[arg(long)]
    template: Option<String>,

    /// Event date, `YYYY-MM-DD`.
    #[arg(long)]
    date: Option<String>,

    /// Event time, `HH:MM` (UTC).
    #[arg(long)]
    time: Option<String>,

    /// Text fill color.
    #[arg(long)]
    color: Option<String>,

    /// Text outline color.
    #[arg(long)]
    outline_color: Option<String>,

    /// Backdrop photo.
    #[arg(long)]
    backdrop: Option<PathBuf>,

    /// Directory that `media/` paths resolve under.
    #[arg(long)]
    media_root: Option<PathBuf>,

    /// Resolve media under the secure-transport mount prefix.
    #[arg(long)]
    secure: bool,

    /// Font file to use instead of a system bold sans-serif.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TimesArgs {
    /// Event date, `YYYY-MM-DD`.
    #[arg(long)]
    date: String,

    /// Event time, `HH:MM` (UTC).
    #[arg(long)]
    time: String,

    /// JSON config file supplying the roster.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_env("GAMENIGHT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Times(args) => cmd_times(args),
    }
}

fn read_config(path: Option<&PathBuf>) -> anyhow::Result<GameNightConfig> {
    match path {
        Some(p) => Ok(GameNightConfig::from_path(p)?),
        None => Ok(GameNightConfig::default()),
    }
}

fn apply_overrides(cfg: &mut GameNightConfig, args: RenderArgs) {
    if let Some(v) = args.template {
        cfg.template = v;
    }
    if let Some(v) = args.date {
        cfg.date = v;
    }
    if let Some(v) = args.time {
        cfg.time = v;
    }
    if let Some(v) = args.color {
        cfg.text_color = v;
    }
    if let Some(v) = args.outline_color {
        cfg.outline_color = v;
    }
    if args.backdrop.is_some() {
        cfg.backdrop = args.backdrop;
    }
    if let Some(v) = args.media_root {
        cfg.media_root = v;
    }
    if args.secure {
        cfg.secure = true;
    }
    if args.font.is_some() {
        cfg.font = args.font;
    }
    if let Some(v) = args.out {
        cfg.out_dir = v;
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = read_config(args.config.as_ref())?;
    apply_overrides(&mut cfg, args);
    cfg.validate()?;

    let font = match &cfg.font {
        Some(p) => FontSource::Face(gamenight::load_font_file(p)?),
        None => FontSource::System,
    };
    let settings = RenderSettings {
        clear_rgba: None,
        font,
    };
    let backend = gamenight::create_backend(BackendKind::Cpu, &settings)?;

    let state = cfg.to_state()?;
    if !state.moment().is_valid() {
        tracing::warn!(date = %cfg.date, time = %cfg.time, "date/time not parseable; date card omitted");
    }

    let mut session = RenderSession::new(state, backend);
    let mut workers = vec![
        session.load_layer(Layer::Template, cfg.template_path()),
        session.load_layer(Layer::Badge, cfg.badge_path()),
    ];
    if let Some(p) = &cfg.backdrop {
        workers.push(session.load_layer(Layer::Backdrop, p.clone()));
    }

    let export = session.pump_until_loaded()?;
    let out_path = cfg.out_dir.join(&export.filename);
    std::fs::create_dir_all(&cfg.out_dir)
        .with_context(|| format!("create output dir '{}'", cfg.out_dir.display()))?;
    std::fs::write(&out_path, &export.png)
        .with_context(|| format!("write png '{}'", out_path.display()))?;

    for w in workers {
        if w.join().is_err() {
            tracing::warn!("layer loader thread panicked");
        }
    }

    let stats = session.stats();
    if stats.failed_loads > 0 {
        eprintln!("{} layer(s) failed to load", stats.failed_loads);
    }
    eprintln!("wrote {}", out_path.display());
    Ok(())
}

fn cmd_times(args: TimesArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_ref())?;
    let roster = cfg.roster()?;

    let moment = EventMoment::parse(&args.date, &args.time);
    let Some(lines) = primary_lines(&moment) else {
        anyhow::bail!("'{} {}' is not a valid date/time", args.date, args.time);
    };

    println!("{}", lines.weekday);
    println!("{}", lines.month_day);
    println!("{}", lines.time);
    for line in roster_lines(&moment, &roster) {
        println!("{line}");
    }
    Ok(())
}
