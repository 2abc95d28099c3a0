//! Runs Iterated Local Search on a small climate-control parameter set and
//! prints the best setting followed by the trajectory as CSV.
//!
//! ```text
//! RUST_LOG=debug cargo run --example ils_progress --features csv
//! ```

use std::error::Error;
use std::io;

use u_paramopt::ils::{IlsConfig, IlsRunner};
use u_paramopt::model::{Candidate, Parameter};
use u_paramopt::trajectory::Trajectory;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let initial = Candidate::new(vec![
        Parameter::new("temperature", 0.0, 40.0, 30.0, 0.4, 12.0, "min".parse()?)?,
        Parameter::new("humidity", 0.0, 100.0, 30.0, 0.4, 12.0, "min".parse()?)?,
        Parameter::new("pressure", 900.0, 1100.0, 1000.0, 0.2, 5.0, "max".parse()?)?,
    ])?;

    let config = IlsConfig::default()
        .with_max_iterations(20)
        .with_max_descent_iterations(50)
        .with_neighborhood(0.1)
        .with_perturbation_strength(0.5);

    let mut trajectory = Trajectory::new();
    let result = IlsRunner::run(&initial, &config, &mut trajectory)?;

    eprintln!("best objective: {}", result.best_value);
    for c in result.best.objective_detailed().components {
        eprintln!(
            "  {:<12} satisfaction {:.3}  weighted {:.3}  penalty {:.3}",
            c.name, c.satisfaction, c.weighted_satisfaction, c.penalty
        );
    }
    eprint!("{}", result.best);

    trajectory.write_csv(io::stdout())?;
    Ok(())
}
