
use log::{LevelFilter, error, info};
use std::time::Instant;

use vcfsimplify::cli::core::{Commands, SolverSettings, get_cli};
use vcfsimplify::cli::simplify::{SimplifySettings, check_simplify_settings};
use vcfsimplify::cli::view::{ViewSettings, check_view_settings};
use vcfsimplify::data_types::selection::SelectionSnapshot;
use vcfsimplify::data_types::value_enums::Action;
use vcfsimplify::dispatch::{dispatch, resolve_action};
use vcfsimplify::screens::Screen;
use vcfsimplify::screens::simplify::SimplifyScreen;
use vcfsimplify::screens::view::ViewScreen;
use vcfsimplify::solver::subprocess::SubprocessSolver;
use vcfsimplify::util::json_io::save_json;
use vcfsimplify::util::progress_bar::start_spinner;

fn init_logging(verbosity: u8) {
    let filter_level: LevelFilter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();
}

/// Shared tail of every subcommand: resolve, optionally save, dispatch, and report
fn run_screen(screen: &dyn Screen, snapshot: &SelectionSnapshot, action: Action, solver_settings: &SolverSettings) {
    let config = match resolve_action(screen, snapshot, action) {
        Ok(c) => c,
        Err(outcome) => {
            println!("{}", outcome.report());
            std::process::exit(exitcode::CONFIG);
        }
    };

    if let Some(config_fn) = solver_settings.save_config.as_deref() {
        info!("Saving resolved configuration to {config_fn:?}...");
        if let Err(e) = save_json(&config, config_fn) {
            error!("Error while saving resolved configuration: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    let solver_config = match solver_settings.solver_config() {
        Ok(sc) => sc,
        Err(e) => {
            error!("Error while building solver config: {e:#}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };
    let solver = SubprocessSolver::new(solver_config);

    let command = config.solver_command();
    info!("Running {command}...");
    let spinner = start_spinner(format!("Running {}...", command.program_name()));
    let outcome = dispatch(&solver, &config);
    spinner.finish_and_clear();

    println!("{}", outcome.report());
    if !outcome.is_success() {
        std::process::exit(exitcode::SOFTWARE);
    }
}

fn run_simplify(settings: SimplifySettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    init_logging(settings.solver.verbosity);

    let settings = match check_simplify_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    let screen = match SimplifyScreen::new() {
        Ok(s) => s,
        Err(e) => {
            error!("Error while building simplify options: {e}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    run_screen(&screen, &settings.to_snapshot(), Action::Run, &settings.solver);
    info!("Simplify completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn run_view(settings: ViewSettings, action: Action) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    init_logging(settings.solver.verbosity);

    let settings = match check_view_settings(settings, action) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    let screen = match ViewScreen::new() {
        Ok(s) => s,
        Err(e) => {
            error!("Error while building view options: {e}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    run_screen(&screen, &settings.to_snapshot(), action, &settings.solver);
    info!("View {action} completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Simplify(settings) => {
            run_simplify(*settings);
        },
        Commands::View(settings) => {
            run_view(*settings, Action::Run);
        },
        Commands::Inspect(settings) => {
            run_view(*settings, Action::Inspect);
        }
    }

    info!("Process finished successfully.");
}
