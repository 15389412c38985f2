use clap::{Parser, Subcommand};
use pm_app::{AppError, AppResult, RunOptions, RunRequest, project_service, query, run_service};
use pm_design::{DesignReport, DesignWarning, checks};
use pm_steel::SteelGrade;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pmsm")]
#[command(about = "Line-start permanent-magnet synchronous motor design tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the reference design to a new design file
    Defaults {
        /// Output path (.yaml, .yml or .json)
        output: PathBuf,
    },
    /// Validate a design file
    Validate {
        /// Path to the design file
        design_path: PathBuf,
    },
    /// Run the design calculation and print the report
    Calc {
        /// Path to the design file
        design_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
        /// Fail if the no-load magnetic circuit does not converge
        #[arg(long)]
        strict: bool,
        /// Also write the full report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Print the asynchronous torque-slip curve as CSV
    Curve {
        /// Path to the design file
        design_path: PathBuf,
        /// Number of slip samples
        #[arg(long, default_value_t = 50)]
        points: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the built-in electrical steel tables
    Steels {
        /// Print the full B-H and loss table for one grade
        #[arg(long)]
        grade: Option<SteelGrade>,
    },
    /// List cached runs for a design file
    Runs {
        /// Path to the design file
        design_path: PathBuf,
    },
    /// Show a cached run
    ShowRun {
        /// Path to the design file
        design_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Defaults { output } => cmd_defaults(&output),
        Commands::Validate { design_path } => cmd_validate(&design_path),
        Commands::Calc {
            design_path,
            no_cache,
            strict,
            json,
        } => cmd_calc(&design_path, !no_cache, strict, json.as_deref()),
        Commands::Curve {
            design_path,
            points,
            output,
        } => cmd_curve(&design_path, points, output.as_deref()),
        Commands::Steels { grade } => cmd_steels(grade),
        Commands::Runs { design_path } => cmd_runs(&design_path),
        Commands::ShowRun {
            design_path,
            run_id,
        } => cmd_show_run(&design_path, &run_id),
    }
}

fn cmd_defaults(output: &Path) -> AppResult<()> {
    let file = project_service::write_reference_design(output)?;
    println!("✓ Wrote design '{}' to {}", file.name, output.display());
    Ok(())
}

fn cmd_validate(design_path: &Path) -> AppResult<()> {
    println!("Validating design: {}", design_path.display());
    let file = project_service::load_design(design_path)?;
    project_service::validate_design(&file)?;
    let o = project_service::overview(&file);
    println!("✓ Design is valid");
    println!(
        "  {}: {} kW, {} poles, {} steel, {} rotor slots",
        o.name,
        o.rated_power_kw,
        2 * o.pole_pairs,
        o.steel_grade,
        o.slot_profile
    );
    if o.has_solver_overrides {
        println!("  Solver settings overridden in file");
    }
    Ok(())
}

fn run(design_path: &Path, use_cache: bool, strict: bool) -> AppResult<run_service::RunResponse> {
    let request = RunRequest {
        design_path,
        options: RunOptions {
            use_cache,
            strict,
            ..RunOptions::default()
        },
    };
    run_service::ensure_run(&request)
}

fn cmd_calc(design_path: &Path, use_cache: bool, strict: bool, json: Option<&Path>) -> AppResult<()> {
    let response = run(design_path, use_cache, strict)?;

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!(
            "✓ Design completed: {} ({:.3}s)",
            response.run_id, response.elapsed_s
        );
    }

    print_report(&response.report);

    if let Some(path) = json {
        let body = serde_json::to_string_pretty(&response.report)
            .map_err(|e| AppError::Results(e.to_string()))?;
        std::fs::write(path, body)?;
        println!("\n✓ Report written to {}", path.display());
    }

    Ok(())
}

fn print_report(report: &DesignReport) {
    for section in query::report_sections(report) {
        println!("\n{}:", section.title);
        for row in section.rows {
            if row.unit.is_empty() {
                println!("  {:<32} {}", row.label, row.value);
            } else {
                println!("  {:<32} {} {}", row.label, row.value, row.unit);
            }
        }
    }

    let targets = checks::evaluate_targets(report);
    if checks::all_passed(&targets) {
        println!("\n✓ All design targets met");
    } else {
        println!("\n✗ Some design targets missed");
    }

    if !report.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &report.warnings {
            match warning {
                DesignWarning::NotConverged {
                    iterations,
                    last_relative_change,
                } => println!(
                    "  no-load circuit not converged after {} rounds (last change {:.3e})",
                    iterations, last_relative_change
                ),
                DesignWarning::PowerAngleUndefined { sine } => println!(
                    "  power angle undefined: arcsine argument {:.4} outside [-1, 1]",
                    sine
                ),
            }
        }
    }
}

fn cmd_curve(design_path: &Path, points: usize, output: Option<&Path>) -> AppResult<()> {
    let response = run(design_path, true, false)?;
    let csv = query::torque_slip_csv(&response.report, points)?;

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} curve points to {}", points, path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_steels(grade: Option<SteelGrade>) -> AppResult<()> {
    match grade {
        None => {
            println!("Steel grades:");
            for grade in SteelGrade::ALL {
                println!("  {} ({})", grade, grade.code());
            }
        }
        Some(grade) => {
            println!("{grade}:");
            println!("  {:>6} {:>12} {:>12}", "B [T]", "H [A/cm]", "p [W/kg]");
            for row in query::steel_table(grade) {
                println!(
                    "  {:>6.2} {:>12.1} {:>12.3}",
                    row.flux_density_t, row.field_strength_a_per_cm, row.specific_loss_w_per_kg
                );
            }
        }
    }
    Ok(())
}

fn cmd_runs(design_path: &Path) -> AppResult<()> {
    let runs = run_service::list_runs(design_path)?;

    if runs.is_empty() {
        println!("No cached runs found for: {}", design_path.display());
    } else {
        println!("Cached runs for '{}':", design_path.display());
        for manifest in runs {
            println!(
                "  {} ({}) η={:.4} converged={}",
                manifest.run_id, manifest.timestamp, manifest.efficiency, manifest.converged
            );
        }
    }
    Ok(())
}

fn cmd_show_run(design_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, report) = run_service::load_run(design_path, run_id)?;
    println!("  Design: {}", manifest.design_name);
    println!("  Created: {}", manifest.timestamp);
    println!("  Engine: {}", manifest.engine_version);
    print_report(&report);
    Ok(())
}
