mod camera;
mod color;
mod controls;
mod gpu;
mod interactive;
mod render;
mod scene;


// Re-export public API
pub use camera::PerspectiveCamera;
pub use color::RGBA;
pub use controls::{OrbitControls, PointerButton};
pub use interactive::{
    ButtonId, CancellationToken, FrameLoop, InteractionState, ViewerConfig, ViewerController,
    ViewerEvent, run_viewer,
};
pub use render::SceneRenderer;
pub use scene::{Material, MaterialSet, ObjectId, RenderOptions, Scene};

/// What the command line asked for
#[derive(Debug)]
enum CliAction {
    Run(ViewerConfig),
    Help,
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match parse_args(&args) {
        Ok(CliAction::Help) => print_usage(),
        Ok(CliAction::Run(config)) => {
            if let Err(e) = run_viewer(config) {
                eprintln!("Error: {}", e);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    println!("Cube Viewer");
    println!("Usage: cube_viewer [--seed <u64>]");
    println!("  --seed <u64>  Seed the initial material and light randomization");
    println!("  --help        Show this message");
}

fn parse_args(args: &[String]) -> Result<CliAction, String> {
    let mut config = ViewerConfig::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliAction::Help),
            "--seed" => {
                let value = iter.next().ok_or("--seed requires a value")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|e| format!("Invalid seed '{}': {}", value, e))?;
                config.seed = Some(seed);
            }
            other => return Err(format!("Unknown argument '{}'", other)),
        }
    }

    Ok(CliAction::Run(config))
}
