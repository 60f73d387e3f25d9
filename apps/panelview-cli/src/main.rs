use anyhow::Context;
use clap::{Parser, Subcommand};
use panelview_input::Action;
use panelview_render::{DebugTextRenderer, OrbitCamera, RenderView, Renderer};
use panelview_tools::SceneInspector;
use panelview_view::{FileFormat, FixedClock, Scene, SceneConfig, ViewController};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "panelview-cli", about = "CLI driver for the panelview engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config file (.yaml, .yml or .json); the built-in structure when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and scene info
    Info,
    /// List the scene's transitions
    Transitions,
    /// Visit every transition in order and print the resulting frames
    Tour {
        /// Frames to run after each transition
        #[arg(short, long, default_value = "120")]
        frames: u32,
    },
    /// Run a scripted session: a YAML or JSON list of actions
    Run {
        /// Script file
        script: PathBuf,
        /// Print final object states as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective scene config as YAML
    DumpConfig,
}

type View = ViewController<OrbitCamera, FixedClock>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading scene config {}", path.display()))?,
        None => SceneConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            let view = build_view(&config)?;
            println!("panelview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("{}", SceneInspector::summary(&view));
        }
        Commands::Transitions => {
            let view = build_view(&config)?;
            for line in SceneInspector::list_transitions(view.transitions(), view.registry()) {
                println!("{line}");
            }
        }
        Commands::Tour { frames } => {
            let mut view = build_view(&config)?;
            let mut renderer = DebugTextRenderer::new();
            for index in 0..view.transitions().len() {
                view.activate_transition(index)?;
                for _ in 0..frames {
                    view.on_frame_tick();
                }
                print_frame(&mut view, &mut renderer);
            }
        }
        Commands::Run { script, json } => {
            let actions = load_script(&script)?;
            let mut view = build_view(&config)?;
            let mut renderer = DebugTextRenderer::new();
            let mut failures = 0;
            for (step, action) in actions.iter().enumerate() {
                match view.apply(action) {
                    Ok(Some(index)) => tracing::info!(step, index, "transition activated"),
                    Ok(None) => {}
                    Err(e) => {
                        failures += 1;
                        tracing::error!(step, ?action, "action rejected: {e}");
                    }
                }
            }
            if json {
                let objects = SceneInspector::list_objects(view.registry());
                println!("{}", serde_json::to_string_pretty(&objects)?);
            } else {
                print_frame(&mut view, &mut renderer);
            }
            if failures > 0 {
                anyhow::bail!("{failures} of {} actions were rejected", actions.len());
            }
        }
        Commands::DumpConfig => {
            print!("{}", config.to_yaml_string()?);
        }
    }

    Ok(())
}

fn build_view(config: &SceneConfig) -> anyhow::Result<View> {
    let scene = Scene::build(config).context("building scene")?;
    Ok(ViewController::new(
        scene,
        config.camera.build_camera(),
        FixedClock::default(),
    ))
}

fn print_frame(view: &mut View, renderer: &mut DebugTextRenderer) {
    view.flush_visuals(renderer);
    let frame = renderer.render(view.registry(), &RenderView::from(view.camera()));
    println!("{}", SceneInspector::summary(view));
    print!("{frame}");
}

/// Read an action script; the format follows the same extension rules as
/// scene configs.
fn load_script(path: &Path) -> anyhow::Result<Vec<Action>> {
    let format = FileFormat::from_path(path)
        .with_context(|| format!("script {}", path.display()))?;
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    let actions: Vec<Action> = match format {
        FileFormat::Json => serde_json::from_str(&data)?,
        FileFormat::Yaml => serde_yaml::from_str(&data)?,
    };
    Ok(actions)
}
