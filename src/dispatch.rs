/*!
Dispatch & report: one blocking solver call per user action, with the solver's own output captured verbatim.

# Example usage
```rust
use std::io::Write;
use vcfsimplify::data_types::dispatch_outcome::DispatchStatus;
use vcfsimplify::data_types::resolved_config::ResolvedConfig;
use vcfsimplify::data_types::selection::SelectionSnapshot;
use vcfsimplify::data_types::value_enums::Action;
use vcfsimplify::dispatch::{dispatch, resolve_action};
use vcfsimplify::screens::view::{ViewScreen, METADATA};
use vcfsimplify::solver::{Solver, SolverCommand};

struct ContigCounter;

impl Solver for ContigCounter {
    fn solve(&self, _command: SolverCommand, _config: &ResolvedConfig, diagnostics: &mut dyn Write) -> anyhow::Result<()> {
        write!(diagnostics, "3 contigs found")?;
        Ok(())
    }
}

let screen = ViewScreen::new().unwrap();
let snapshot = SelectionSnapshot::new("sample.vcf", "").with_values(METADATA, ["contig", "samples"]);
let config = resolve_action(&screen, &snapshot, Action::Inspect).unwrap();
let outcome = dispatch(&ContigCounter, &config);
assert_eq!(outcome.status(), DispatchStatus::Success);
assert_eq!(outcome.captured_text(), "3 contigs found");
```
*/

use log::{debug, error, info, warn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

use crate::data_types::dispatch_outcome::DispatchOutcome;
use crate::data_types::resolved_config::ResolvedConfig;
use crate::data_types::selection::SelectionSnapshot;
use crate::data_types::value_enums::Action;
use crate::screens::Screen;
use crate::solver::Solver;

/// Calls the solver exactly once for a resolved configuration.
/// Any failure, including a panic inside the solver, becomes a `BackendFailed` outcome and never escapes.
/// # Arguments
/// * `solver` - the backend to call
/// * `config` - validated configuration
pub fn dispatch(solver: &dyn Solver, config: &ResolvedConfig) -> DispatchOutcome {
    let command = config.solver_command();
    let action = config.action();
    let output_path = config.output_path().map(Path::to_path_buf);
    debug!("Dispatching {command} for {:?}", config.input_path());

    let mut captured: Vec<u8> = vec![];
    // timing covers the solver call and nothing else
    let start_time = Instant::now();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        solver.solve(command, config, &mut captured)
    }));
    let elapsed = start_time.elapsed();
    let captured_text = String::from_utf8_lossy(&captured).into_owned();

    match result {
        Ok(Ok(())) => {
            info!("{command} finished in {:.4} seconds.", elapsed.as_secs_f64());
            DispatchOutcome::success(action, command, output_path, captured_text, elapsed)
        },
        Ok(Err(e)) => {
            error!("Error while running {command}: {e:#}");
            DispatchOutcome::backend_failed(action, command, output_path, captured_text, format!("{e:#}"))
        },
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("Solver panicked while running {command}: {message}");
            DispatchOutcome::backend_failed(action, command, output_path, captured_text, message)
        }
    }
}

/// Resolves a snapshot for a screen ahead of a dispatch, warning about any option groups the command ignores.
/// # Arguments
/// * `screen` - the screen that owns the option model
/// * `snapshot` - the user's selections
/// * `action` - inspect or run
/// # Errors
/// * if validation fails, as a `ValidationFailed` outcome ready to report; the solver must not be called
pub fn resolve_action<S: Screen + ?Sized>(screen: &S, snapshot: &SelectionSnapshot, action: Action) -> Result<ResolvedConfig, DispatchOutcome> {
    match screen.resolve(snapshot, action) {
        Ok(config) => {
            for group in config.ignored_groups() {
                warn!("Option group {group:?} does not apply to {} and was ignored.", config.solver_command());
            }
            Ok(config)
        },
        Err(failure) => {
            warn!("Selections failed validation: {failure}");
            Err(DispatchOutcome::validation_failed(action, failure.detail()))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "solver panicked".to_string()
    }
}
