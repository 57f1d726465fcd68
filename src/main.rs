//! Habitat CLI - planet habitability model.
//!
//! Evaluate the habitability equations, render the planet view to PNG,
//! and manage the saved slider session.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use habitat::export::{export_frame_png, PngExportOptions};
use habitat::model::{validate_order, DependentVar, DependentVariables, IndependentVar, IndependentVariables};
use habitat::render::{palette, render_frame, FrameParams, RenderConfig};
use habitat::session::{Session, DEFAULT_SESSION_FILE};

/// Width of the text bars in the evaluation report.
const BAR_WIDTH: usize = 24;

/// Planet habitability model.
#[derive(Parser)]
#[command(name = "habitat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate all derived variables for a set of inputs.
    Evaluate {
        #[command(flatten)]
        inputs: InputArgs,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Render the planet view to a PNG file.
    Render {
        /// Output PNG path.
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        inputs: InputArgs,

        /// Frame width in pixels.
        #[arg(long, default_value = "1200")]
        width: u32,

        /// Frame height in pixels.
        #[arg(long, default_value = "600")]
        height: u32,

        /// Planet radius in pixels.
        #[arg(long, default_value = "200")]
        radius: u32,

        /// Terrain block size in pixels.
        #[arg(long, default_value = "3")]
        cell: u32,

        /// Seed for terrain, clouds and stars.
        #[arg(short, long, default_value = "42", allow_negative_numbers = true)]
        seed: i32,

        /// Animation frame; advances cloud and star drift.
        #[arg(long, default_value = "0")]
        frame: u32,

        /// Skip the solar shading overlay.
        #[arg(long)]
        no_shading: bool,
    },

    /// Show or edit the saved slider values.
    State {
        /// Session file.
        #[arg(long, default_value = DEFAULT_SESSION_FILE)]
        state: PathBuf,

        #[command(subcommand)]
        action: StateAction,
    },

    /// Display variable ranges and the dependency graph.
    Info,
}

#[derive(Subcommand)]
enum StateAction {
    /// Print the saved values.
    Show,
    /// Set one slider (0-100) and save.
    Set {
        /// Variable name: temperature, humidity, wind_speed or population.
        var: IndependentVar,
        value: f64,
    },
    /// Restore the default values and save.
    Reset,
}

/// Input overrides shared by `evaluate` and `render`.
#[derive(Args, Clone)]
struct InputArgs {
    /// Solar intensity (reported as temperature).
    #[arg(long, visible_alias = "solar-intensity")]
    temperature: Option<f64>,

    #[arg(long)]
    humidity: Option<f64>,

    #[arg(long)]
    wind_speed: Option<f64>,

    #[arg(long)]
    population: Option<f64>,

    /// Start from the values saved in this session file.
    #[arg(long)]
    state: Option<PathBuf>,
}

impl InputArgs {
    /// Saved session (if any) or defaults, with explicit flags applied on top.
    fn resolve(&self) -> Result<IndependentVariables, habitat::SessionError> {
        let mut vars = match &self.state {
            Some(path) => Session::open(path)?.variables,
            None => IndependentVariables::default(),
        };
        let overrides = [
            (IndependentVar::Temperature, self.temperature),
            (IndependentVar::Humidity, self.humidity),
            (IndependentVar::WindSpeed, self.wind_speed),
            (IndependentVar::Population, self.population),
        ];
        for (var, value) in overrides {
            if let Some(v) = value {
                vars.set(var, v);
            }
        }
        Ok(vars)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate { inputs, json } => run_evaluate(&inputs, json),
        Commands::Render {
            output,
            inputs,
            width,
            height,
            radius,
            cell,
            seed,
            frame,
            no_shading,
        } => {
            let config = RenderConfig {
                width,
                height,
                planet_radius: radius,
                cell,
                frame,
                shading: !no_shading,
                ..RenderConfig::seeded(seed)
            };
            run_render(&inputs, &config, &output)
        }
        Commands::State { state, action } => run_state(&state, action),
        Commands::Info => {
            run_info();
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn run_evaluate(inputs: &InputArgs, json: bool) -> CliResult {
    let vars = inputs.resolve()?;
    let outputs = habitat::evaluate(&vars);

    if json {
        let doc = serde_json::json!({
            "inputs": vars,
            "outputs": outputs.to_map(),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print_inputs(&vars);
        println!();
        print_outputs(&outputs);
    }
    Ok(())
}

fn run_render(inputs: &InputArgs, config: &RenderConfig, output: &Path) -> CliResult {
    let vars = inputs.resolve()?;
    let outputs = habitat::evaluate(&vars);
    let params = FrameParams::from_model(&vars, &outputs);

    let start = Instant::now();
    let img = render_frame(&params, config)?;
    info!("Rendered {}x{} in {:.2?}", config.width, config.height, start.elapsed());

    export_frame_png(&img, output, &PngExportOptions::default())?;
    Ok(())
}

fn run_state(path: &Path, action: StateAction) -> CliResult {
    let mut session = Session::open(path)?;

    match action {
        StateAction::Show => {}
        StateAction::Set { var, value } => {
            let applied = session.set(var, value);
            if applied != value {
                info!("{} confined to {:.2}", var, applied);
            }
            session.save()?;
        }
        StateAction::Reset => {
            session.reset();
            session.save()?;
        }
    }

    println!("Session: {}", session.path().display());
    print_inputs(&session.variables);
    Ok(())
}

fn run_info() {
    println!("Habitat - Variable Ranges");
    println!("=========================");
    println!();
    println!("Inputs (sliders 0-100):");
    for var in IndependentVar::ALL {
        println!("  {:<24} default {:>8.2}", var.label(), IndependentVariables::default().get(var));
    }
    println!();
    println!("Derived (evaluation order):");
    println!("  {:<22} {:>12} {:>14}  depends on", "variable", "min", "max");
    for var in DependentVar::ALL {
        let b = var.bounds();
        let deps: Vec<&str> = var
            .inputs()
            .iter()
            .map(|i| i.name())
            .chain(var.dependencies().iter().map(|d| d.name()))
            .collect();
        println!("  {:<22} {:>12.2} {:>14.2}  {}", var.name(), b.min, b.max, deps.join(", "));
        println!("  {:<22} = {}", "", var.formula());
    }
    println!();
    match validate_order(&DependentVar::ALL) {
        Ok(()) => println!("Evaluation order: OK"),
        Err(e) => println!("Evaluation order: {}", e),
    }
}

fn print_inputs(vars: &IndependentVariables) {
    println!("Inputs:");
    for var in IndependentVar::ALL {
        let v = vars.get(var);
        println!("  {:<24} {:>10.2} {}", var.label(), v, bar(v));
    }
}

fn print_outputs(outputs: &DependentVariables) {
    println!("Derived:");
    for (var, v) in outputs.iter() {
        println!("  {:<24} {:>14.4} {}", var.name(), v, bar(v));
    }
}

/// Text bar for a value on a 0-100 scale; larger values fill the bar.
fn bar(value: f64) -> String {
    let filled = (palette::bar_fraction(value) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}
