use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use navsim_apps::{
    utils::{init_tracing, resolve_navsim_config},
    NavSimConfig, Navigator,
};
use navsim_planner::{create_lattice_planner, LatticePlannerConfig};
use navsim_world::{transform_to_pose, transforms_to_poses, SimWorld, SimWorldConfig};
use schemars::schema_for;
use tracing::{debug, info};

/// Plan and drive a simulated robot toward a goal.
#[derive(Parser, Debug)]
#[clap(name = env!("CARGO_BIN_NAME"))]
struct NavSimArgs {
    /// Path to the setting file.
    #[clap(short, long, value_parser)]
    config_path: Option<PathBuf>,
    /// Prints the default setting as TOML.
    #[clap(long)]
    show_default_config: bool,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan once from the initial pose and print the plan.
    Plan,
    /// Re-plan and execute the first action until the goal is reached.
    Run {
        /// Overrides `run.max_steps` of the setting file.
        #[clap(long)]
        max_steps: Option<usize>,
    },
    /// Generate JSON schema for the specified config.
    Schema {
        /// Kind of config.
        #[clap(value_enum, ignore_case = true)]
        kind: ConfigKind,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ConfigKind {
    NavSimConfig,
    PlannerConfig,
    WorldConfig,
}

fn main() -> Result<()> {
    init_tracing();
    let args = NavSimArgs::parse();
    debug!(?args);

    if args.show_default_config {
        print!("{}", toml::to_string(&NavSimConfig::default())?);
        return Ok(());
    }

    match args.command.unwrap_or(Command::Plan) {
        Command::Plan => plan(&resolve_navsim_config(args.config_path)?),
        Command::Run { max_steps } => run(&resolve_navsim_config(args.config_path)?, max_steps),
        Command::Schema { kind } => {
            let schema = match kind {
                ConfigKind::NavSimConfig => schema_for!(NavSimConfig),
                ConfigKind::PlannerConfig => schema_for!(LatticePlannerConfig),
                ConfigKind::WorldConfig => schema_for!(SimWorldConfig),
            };
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

fn plan(config: &NavSimConfig) -> Result<()> {
    let world = SimWorld::new(config.world.clone())?;
    let planner = create_lattice_planner(&config.planner)?;
    let navigator = Navigator::new(planner, &world, &world, &world, &config.goal);

    let snapshot = navigator.snapshot()?;
    let plan = navigator.plan()?;
    info!(steps = plan.len(), "plan found");
    println!(
        "{} actions, {} turns, length {:.3}",
        plan.len(),
        plan.num_turns(),
        plan.length()
    );
    let poses = transforms_to_poses(&plan.trajectory(&snapshot.transform));
    for (action, pose) in plan.iter().zip(poses.iter().skip(1)) {
        println!(
            "rotation {:+.4} translation {:.4} -> x {:.3} y {:.3} heading {:.4}",
            action.rotation, action.translation, pose.x, pose.y, pose.heading
        );
    }
    Ok(())
}

fn run(config: &NavSimConfig, max_steps: Option<usize>) -> Result<()> {
    let world = SimWorld::new(config.world.clone())?;
    let planner = create_lattice_planner(&config.planner)?;
    let navigator = Navigator::new(planner, &world, &world, &world, &config.goal);

    let report = navigator.run(max_steps.unwrap_or(config.run.max_steps))?;
    let estimate = transform_to_pose(&report.final_transform, 0.0);
    let truth = world.true_pose();
    println!("{:?} after {} actions", report.outcome, report.actions.len());
    println!(
        "estimate x {:.3} y {:.3} heading {:.4}",
        estimate.x, estimate.y, estimate.heading
    );
    println!(
        "truth    x {:.3} y {:.3} heading {:.4}",
        truth.x, truth.y, truth.heading
    );
    Ok(())
}
