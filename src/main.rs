use kinesim::{ScenarioConfig, Scenario};
use kinesim::{bench_collision, bench_gravity_field};

use clap::Parser;
use anyhow::{Context, Result};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, looked up in the crate's `scenarios/` directory unless it exists as given
    #[arg(short, default_value = "gravity_field.yaml")]
    file_name: String,

    /// Override the number of frames from the scenario file
    #[arg(long)]
    frames: Option<usize>,

    /// Run the micro-benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let given = PathBuf::from(file_name);
    let config_path = if given.exists() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_collision();
        bench_gravity_field();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    let frames = args.frames.unwrap_or(scenario.engine.frames);
    let every = scenario.engine.report_every;
    println!("{}: running {} frames at dt = {}", scenario.name(), frames, scenario.engine.dt);

    scenario.run(frames, |s| {
        if every > 0 && s.frame() % every == 0 {
            println!("{}", s.summary());
        }
    });

    if scenario.is_finished() {
        println!("settled after {} frames", scenario.frame());
    }
    println!("{}", scenario.summary());

    Ok(())
}
