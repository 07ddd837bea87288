//! Handcast - replay recorded hand-landmark traces through a gesture demo.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use handcast::demo::{DemoApp, FlowEditor, SlideDeck, SpellCaster};
use handcast::dispatch::{CommandDispatcher, GestureCommand};
use handcast::gesture::{GestureConfig, GestureRecognizer, PointerState, Viewport};
use handcast::trace::load_trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Profile {
    Spell,
    Slides,
    Flow,
}

#[derive(Parser, Debug)]
#[command(name = "handcast", about = "Hand-gesture command recognition")]
struct Cli {
    /// Demo to drive: spell, slides, or flow
    #[arg(long, value_enum)]
    profile: Profile,

    /// Landmark trace file (one s-expression frame per line)
    #[arg(long)]
    trace: PathBuf,

    /// Gesture config overrides (s-expression plist)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Initial viewport height in pixels
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Number of slides in the slides demo
    #[arg(long, default_value_t = 10)]
    slides: usize,

    /// Print recognizer and demo status after the replay
    #[arg(long)]
    status: bool,
}

/// Prints every command as an event line before handing it to the demo.
struct EchoDispatcher<'a> {
    demo: &'a mut dyn DemoApp,
}

impl CommandDispatcher for EchoDispatcher<'_> {
    fn on_gesture(&mut self, command: &GestureCommand) {
        println!("{}", command.to_sexp());
        self.demo.on_gesture(command);
    }

    fn on_pointer(&mut self, pointer: &PointerState) {
        self.demo.on_pointer(pointer);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handcast=info".into()),
        )
        .init();

    info!("handcast v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            GestureConfig::from_sexp_str(&raw)
                .with_context(|| format!("in {}", path.display()))?
        }
        None => GestureConfig::default(),
    };

    let mut viewport = Viewport::new(cli.width, cli.height);
    let mut demo: Box<dyn DemoApp> = match cli.profile {
        Profile::Spell => Box::new(SpellCaster::new()),
        Profile::Slides => Box::new(SlideDeck::new(cli.slides)),
        Profile::Flow => Box::new(FlowEditor::new(viewport)),
    };

    let frames = load_trace(&cli.trace)?;
    if frames.is_empty() {
        warn!("Trace {} has no frames", cli.trace.display());
    }

    let mut recognizer = GestureRecognizer::with_config(demo.profile(), config);
    let mut last_t = 0.0;
    for frame in &frames {
        if let Some(vp) = frame.viewport {
            viewport = vp;
            demo.set_viewport(vp);
        }
        let mut echo = EchoDispatcher {
            demo: demo.as_mut(),
        };
        recognizer.process_frame(frame.hand.as_deref(), viewport, frame.timestamp_ms, &mut echo);
        last_t = frame.timestamp_ms;
    }

    if cli.status {
        println!("{}", recognizer.status_sexp(last_t));
        println!("{}", recognizer.config().config_sexp());
        println!("{}", demo.status_sexp(last_t));
    }

    recognizer.shutdown();
    Ok(())
}
