use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use baseball_elimination::{DivisionModel, EliminationChecker, LpSolver, Method};

#[derive(Parser)]
#[command(name = "baseball-elimination")]
#[command(version)]
#[command(about = "Report which teams of a division are mathematically eliminated", long_about = None)]
struct Cli {
    /// Division file: a header line, then `name wins losses remaining g_0 .. g_n-1` per team
    file: Option<PathBuf>,

    /// max-flow or linear-programming
    #[arg(short, long, default_value = "linear-programming")]
    method: Method,

    /// Print the teams responsible for each elimination
    #[arg(short, long)]
    certificate: bool,

    /// Slack allowed on the linear program optimum
    #[arg(long, default_value_t = baseball_elimination::lp::TOLERANCE)]
    tolerance: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let Some(path) = cli.file else {
        println!(
            "To run this, please specify an input file name. Example: baseball-elimination data/teams4.txt"
        );
        return Ok(());
    };

    let division = DivisionModel::from_path(&path)
        .with_context(|| format!("failed to load division from {}", path.display()))?;
    info!("checking {} teams with {}", division.len(), cli.method);

    let checker = EliminationChecker::with_lp_solver(
        &division,
        LpSolver::new().with_tolerance(cli.tolerance),
    );
    for team in division.teams() {
        let eliminated = checker
            .is_eliminated(team.id, cli.method)
            .with_context(|| format!("failed to check {}", team.name))?;
        println!("{}: Eliminated? {}", team.name, eliminated);
        if eliminated && cli.certificate {
            if let Some(certificate) = checker.certificate(team.id)? {
                let names: Vec<&str> = certificate
                    .teams()
                    .into_iter()
                    .map(|id| division.team(id).map(|rival| rival.name.as_str()))
                    .collect::<baseball_elimination::Result<_>>()?;
                println!("    eliminated by {{{}}}", names.join(", "));
            }
        }
    }
    Ok(())
}
