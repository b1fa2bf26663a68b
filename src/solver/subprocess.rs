/*!
Runs the VCF-Simplify program as a child process.
Both output streams of the child are forwarded to the diagnostic sink as they arrive, one line at a time.
*/

use derive_builder::Builder;
use log::{debug, trace};
use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::data_types::resolved_config::ResolvedConfig;
use crate::solver::arguments::build_arguments;
use crate::solver::{Solver, SolverCommand};

/// Program name used when none is provided
pub const DEFAULT_SOLVER_PROGRAM: &str = "VcfSimplify";

/// How often we wake up to check a deadline while waiting on the child
const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(thiserror::Error, Debug)]
pub enum SolverError {
    #[error("solver program {program:?} was not found: {source}")]
    NotFound {
        program: String,
        #[source]
        source: which::Error
    },
    #[error("failed to start solver {program:?}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error
    },
    #[error("error while relaying solver output: {0}")]
    Io(#[from] io::Error),
    #[error("solver did not finish within {seconds:.1} seconds")]
    Timeout { seconds: f64 },
    #[error("{message}")]
    ProcessFailed { code: Option<i32>, message: String },
}

/// Controls how the solver program gets launched
#[derive(Builder, Clone, Debug)]
#[builder(default)]
pub struct SolverConfig {
    /// Program name or path; bare names are looked up on the PATH
    #[builder(setter(into))]
    program: String,
    /// Arguments placed ahead of the command arguments, e.g. a script for an interpreter
    leading_args: Vec<String>,
    /// Maximum time the solver may run; None waits forever
    timeout: Option<Duration>
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_SOLVER_PROGRAM.to_string(),
            leading_args: vec![],
            timeout: None
        }
    }
}

impl SolverConfig {
    // getters
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn leading_args(&self) -> &[String] {
        &self.leading_args
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Which pipe a chunk of output came from
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Stream {
    Stdout,
    Stderr
}

/// Solver backed by an external program
#[derive(Clone, Debug, Default)]
pub struct SubprocessSolver {
    config: SolverConfig
}

impl SubprocessSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Finds the program to run. Anything that looks like a path is used as-is.
    /// # Errors
    /// * if a bare program name is not on the PATH
    pub fn locate_program(&self) -> Result<PathBuf, SolverError> {
        let program = Path::new(&self.config.program);
        if program.is_absolute() || program.components().count() > 1 {
            return Ok(program.to_path_buf());
        }
        which::which(&self.config.program).map_err(|source| SolverError::NotFound {
            program: self.config.program.clone(),
            source
        })
    }

    /// Runs the solver for a single configuration.
    /// # Arguments
    /// * `config` - the resolved configuration to render into arguments
    /// * `diagnostics` - receives stdout and stderr of the child, line by line, in arrival order
    /// # Errors
    /// * if the program cannot be found or started
    /// * if relaying the output fails
    /// * if the timeout expires, in which case the child is killed
    /// * if the child exits unsuccessfully; the message is the child's stderr
    pub fn run(&self, config: &ResolvedConfig, diagnostics: &mut dyn Write) -> Result<(), SolverError> {
        let program = self.locate_program()?;
        let mut args: Vec<OsString> = self.config.leading_args.iter().map(OsString::from).collect();
        args.extend(build_arguments(config));
        debug!("Solver command: {program:?} {args:?}");

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| SolverError::Spawn { program: program.clone(), source })?;

        let (tx, rx) = mpsc::channel();
        let mut readers = vec![];
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_reader(stdout, Stream::Stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_reader(stderr, Stream::Stderr, tx.clone()));
        }
        // the loop below ends once both readers hang up
        drop(tx);

        // a timeout too far out to represent is the same as no timeout
        let deadline = self.config.timeout.and_then(|t| Instant::now().checked_add(t));
        let mut stderr_text: Vec<u8> = vec![];
        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok((stream, chunk)) => {
                    trace!("{stream:?}: {:?}", String::from_utf8_lossy(&chunk));
                    if let Err(e) = diagnostics.write_all(&chunk) {
                        stop_child(&mut child);
                        return Err(e.into());
                    }
                    if stream == Stream::Stderr {
                        stderr_text.extend_from_slice(&chunk);
                    }
                },
                Err(RecvTimeoutError::Timeout) => {},
                Err(RecvTimeoutError::Disconnected) => break
            };

            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Err(self.timed_out(&mut child));
            }
        }

        // pipes are closed, but the child may still be running
        let status = match deadline {
            None => child.wait()?,
            Some(deadline) => loop {
                if let Some(status) = child.try_wait()? {
                    break status;
                }
                if Instant::now() >= deadline {
                    return Err(self.timed_out(&mut child));
                }
                thread::sleep(POLL_INTERVAL);
            }
        };

        for reader in readers {
            match reader.join() {
                Ok(result) => result?,
                Err(_e) => return Err(io::Error::other("solver output reader panicked").into())
            };
        }

        if status.success() {
            Ok(())
        } else {
            Err(process_failure(status, &stderr_text))
        }
    }

    fn timed_out(&self, child: &mut Child) -> SolverError {
        stop_child(child);
        let seconds = self.config.timeout.unwrap_or_default().as_secs_f64();
        SolverError::Timeout { seconds }
    }
}

impl Solver for SubprocessSolver {
    fn solve(&self, command: SolverCommand, config: &ResolvedConfig, diagnostics: &mut dyn Write) -> anyhow::Result<()> {
        debug!("Dispatching {command} to {:?}", self.config.program);
        Ok(self.run(config, diagnostics)?)
    }
}

/// Forwards one pipe to the channel line by line; stops quietly if the receiver is gone
fn spawn_reader<R: Read + Send + 'static>(source: R, stream: Stream, tx: Sender<(Stream, Vec<u8>)>) -> JoinHandle<io::Result<()>> {
    thread::spawn(move || {
        let mut reader = BufReader::new(source);
        loop {
            let mut line = vec![];
            if reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(());
            }
            if tx.send((stream, line)).is_err() {
                return Ok(());
            }
        }
    })
}

/// Best effort kill and reap; the child may have already exited
fn stop_child(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!("Error while killing solver: {e}");
    }
    if let Err(e) = child.wait() {
        debug!("Error while waiting on solver: {e}");
    }
}

fn process_failure(status: ExitStatus, stderr_text: &[u8]) -> SolverError {
    let stderr_text = String::from_utf8_lossy(stderr_text);
    let message = match stderr_text.trim() {
        "" => format!("solver exited with {status}"),
        text => text.to_string()
    };
    SolverError::ProcessFailed {
        code: status.code(),
        message
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use crate::data_types::selection::SelectionSnapshot;
    use crate::data_types::value_enums::Action;
    use crate::screens::Screen;
    use crate::screens::view::{ViewScreen, METADATA};

    fn inspect_config() -> ResolvedConfig {
        let snapshot = SelectionSnapshot::new("sample.vcf", "")
            .with_values(METADATA, ["contig", "samples"]);
        ViewScreen::new().unwrap().resolve(&snapshot, Action::Inspect).unwrap()
    }

    /// runs a shell script as the solver; the rendered arguments end up in "$@"
    fn shell_solver(script: &str, timeout: Option<Duration>) -> SubprocessSolver {
        let config = SolverConfigBuilder::default()
            .program("sh")
            .leading_args(vec!["-c".to_string(), script.to_string(), "sh".to_string()])
            .timeout(timeout)
            .build().unwrap();
        SubprocessSolver::new(config)
    }

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.program(), DEFAULT_SOLVER_PROGRAM);
        assert!(config.leading_args().is_empty());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_capture() {
        let solver = shell_solver("echo 3 contigs found; echo done", None);
        let mut captured = vec![];
        solver.run(&inspect_config(), &mut captured).unwrap();
        assert_eq!(String::from_utf8(captured).unwrap(), "3 contigs found\ndone\n");
    }

    #[test]
    fn test_arguments_forwarded() {
        let solver = shell_solver("printf '%s\\n' \"$@\"", None);
        let mut captured = vec![];
        solver.run(&inspect_config(), &mut captured).unwrap();
        assert_eq!(
            String::from_utf8(captured).unwrap(),
            "ViewVCF\n-inVCF\nsample.vcf\n-metadata\ncontig\nsamples\n"
        );
    }

    #[test]
    fn test_failure() {
        let solver = shell_solver("echo partial; echo 'boom' >&2; exit 3", None);
        let mut captured = vec![];
        let err = solver.run(&inspect_config(), &mut captured).unwrap_err();
        match err {
            SolverError::ProcessFailed { code, message } => {
                assert_eq!(code, Some(3));
                assert_eq!(message, "boom");
            },
            e => panic!("unexpected error: {e}")
        };

        // both streams are relayed, but their relative order is up to the OS
        let captured = String::from_utf8(captured).unwrap();
        assert!(captured.contains("partial\n"));
        assert!(captured.contains("boom\n"));
    }

    #[test]
    fn test_failure_without_stderr() {
        let solver = shell_solver("exit 2", None);
        let mut captured = vec![];
        let err = solver.run(&inspect_config(), &mut captured).unwrap_err();
        assert!(err.to_string().starts_with("solver exited with"));
    }

    #[test]
    fn test_timeout() {
        let solver = shell_solver("exec sleep 5", Some(Duration::from_millis(200)));
        let mut captured = vec![];
        let start = Instant::now();
        let err = solver.run(&inspect_config(), &mut captured).unwrap_err();
        assert!(matches!(err, SolverError::Timeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_unbounded_timeout() {
        let solver = shell_solver("echo done", Some(Duration::MAX));
        let mut captured = vec![];
        solver.run(&inspect_config(), &mut captured).unwrap();
        assert_eq!(String::from_utf8(captured).unwrap(), "done\n");
    }

    #[test]
    fn test_missing_program() {
        let config = SolverConfigBuilder::default()
            .program("vcfsimplify-test-no-such-program")
            .build().unwrap();
        let solver = SubprocessSolver::new(config);
        let mut captured = vec![];
        let err = solver.run(&inspect_config(), &mut captured).unwrap_err();
        assert!(matches!(err, SolverError::NotFound { .. }));
        assert!(captured.is_empty());
    }

    #[test]
    fn test_solver_trait() {
        let solver = shell_solver("echo via trait", None);
        let mut captured = vec![];
        let config = inspect_config();
        solver.solve(config.solver_command(), &config, &mut captured).unwrap();
        assert_eq!(captured, b"via trait\n");
    }
}
