use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use lesson_render::{
    AuthoredDocument, EmbedInserter, Lesson, LessonContent, UnknownEmbedPolicy,
    VisualizationRegistry, ViewerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "lesson-render", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render lesson content, replacing embed markers with widget mount points.
    Render(RenderArgs),
    /// List the registered visualization keys.
    Keys,
    /// Insert an embed marker into lesson content.
    Insert(InsertArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input lesson JSON or raw content HTML.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render a placeholder where an embed could not be mounted.
    #[arg(long)]
    placeholder: bool,

    /// Print the render report as JSON to stderr.
    #[arg(long)]
    report: bool,

    /// Output HTML path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InsertArgs {
    /// Input lesson JSON or raw content HTML.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Visualization type key.
    #[arg(long = "type")]
    type_key: String,

    /// Block index to insert at (appends when omitted).
    #[arg(long)]
    at: Option<usize>,

    /// Reject keys this build has no widget for.
    #[arg(long)]
    validate: bool,

    /// Viewer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

/// What `--in` pointed at.
enum Source {
    Html(String),
    Lesson(Lesson),
}

impl Source {
    fn content(&self) -> &str {
        match self {
            Source::Html(s) => s,
            Source::Lesson(l) => l.content.as_str(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Keys => cmd_keys(),
        Command::Insert(args) => cmd_insert(args),
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
        .with_target(false)
        .init();
}

fn read_source(path: &Path) -> anyhow::Result<Source> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read input '{}'", path.display()))?;
    let is_json = path.extension().is_some_and(|e| e == "json") || text.trim_start().starts_with('{');
    if is_json {
        let lesson = Lesson::from_json(&text)
            .with_context(|| format!("load lesson '{}'", path.display()))?;
        Ok(Source::Lesson(lesson))
    } else {
        Ok(Source::Html(text))
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<ViewerConfig> {
    match path {
        Some(p) => Ok(ViewerConfig::from_path(p)?),
        None => Ok(ViewerConfig::default()),
    }
}

fn write_output(out: Option<&Path>, body: &str) -> anyhow::Result<()> {
    let Some(path) = out else {
        println!("{body}");
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, body).with_context(|| format!("write output '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let source = read_source(&args.in_path)?;
    let mut config = read_config(args.config.as_deref())?;
    if args.placeholder {
        config.render.unknown_embeds = UnknownEmbedPolicy::Placeholder;
    }

    let mut output = lesson_render::render(
        source.content(),
        VisualizationRegistry::standard(),
        &config.render,
    );
    let html = output.tree.to_html();
    output.tree.unmount_all();

    if args.report {
        let json = serde_json::to_string_pretty(&output.report).context("encode render report")?;
        eprintln!("{json}");
    }
    write_output(args.out.as_deref(), &html)
}

fn cmd_keys() -> anyhow::Result<()> {
    for entry in VisualizationRegistry::standard().entries() {
        println!("{}\t{}\t{}", entry.key, entry.family, entry.title);
    }
    Ok(())
}

fn cmd_insert(args: InsertArgs) -> anyhow::Result<()> {
    let source = read_source(&args.in_path)?;
    let mut config = read_config(args.config.as_deref())?;
    if args.validate {
        config.authoring.validate_keys = true;
    }

    let mut doc = AuthoredDocument::from_html(source.content());
    let cursor = args.at.unwrap_or(doc.len());
    EmbedInserter::new(VisualizationRegistry::standard(), config.authoring)
        .insert(&mut doc, cursor, &args.type_key)
        .with_context(|| format!("insert '{}' at block {cursor}", args.type_key))?;

    let body = match source {
        Source::Html(_) => doc.to_html(),
        Source::Lesson(mut lesson) => {
            lesson.content = LessonContent::new(doc.to_html());
            lesson.to_json_pretty()?
        }
    };
    write_output(args.out.as_deref(), &body)
}
