use std::borrow::Cow;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus};
use std::str;
use tracing::{debug, trace, warn};

use super::{apply_binary_annotations, TestBinaryBuilder};
use crate::binary::BinaryHandle;
use crate::node::{NodeKind, RunState, TestNode, IGNORED_REASON};
use crate::options::DiscoveryOptions;

pub const LIBTEST_BUILDER_NAME: &str = "libtest";

const LIST_ARGS: &[&str] = &["--list", "--format", "terse"];
const IGNORED_ARG: &str = "--ignored";
const EXACT_ARG: &str = "--exact";

pub const OPTION_FILTER: &str = "filter";
pub const OPTION_EXACT: &str = "exact";
pub const OPTION_RUNNER: &str = "runner";
pub const OPTION_BENCHMARKS: &str = "benchmarks";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedTest {
    pub name: String,
    pub kind: NodeKind,
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("test listing exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("test listing produced invalid UTF-8: {0}")]
    InvalidOutput(#[from] str::Utf8Error),
}

/// Builds the tree of a Rust test harness binary from its own
/// `--list --format terse` output.
#[derive(Debug, Default, Clone, Copy)]
pub struct LibtestBuilder;

impl LibtestBuilder {
    pub fn new() -> Self {
        Self
    }

    fn command(&self, handle: &BinaryHandle, options: &DiscoveryOptions, ignored: bool) -> Command {
        let runner = options
            .get_str_list(OPTION_RUNNER)
            .filter(|runner| !runner.is_empty());

        let binary = launch_path(handle.path());
        let mut command = match runner {
            Some(runner) => {
                let mut command = Command::new(&runner[0]);
                command.args(&runner[1..]).arg(&*binary);
                command
            }
            None => Command::new(&*binary),
        };

        command.args(LIST_ARGS);
        if ignored {
            command.arg(IGNORED_ARG);
        }
        if options.get_bool(OPTION_EXACT).unwrap_or(false) {
            command.arg(EXACT_ARG);
        }
        if let Some(filter) = options.get_str(OPTION_FILTER) {
            command.arg(&*filter);
        }
        command
    }

    fn list(
        &self,
        handle: &BinaryHandle,
        options: &DiscoveryOptions,
        ignored: bool,
    ) -> Result<Vec<ListedTest>, ListError> {
        let mut command = self.command(handle, options, ignored);
        trace!(command = ?command, "listing tests");

        let output = command.output().map_err(|source| ListError::Spawn {
            program: program_name(command.get_program().to_owned()),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ListError::Failed {
                status: output.status,
                stderr,
            });
        }

        let stdout = str::from_utf8(&output.stdout)?;
        Ok(parse_terse_listing(stdout))
    }
}

impl TestBinaryBuilder for LibtestBuilder {
    fn name(&self) -> &str {
        LIBTEST_BUILDER_NAME
    }

    fn build(&self, handle: &BinaryHandle, options: &DiscoveryOptions) -> TestNode {
        let location = handle.location();

        let listed = match self.list(handle, options, false) {
            Ok(listed) => listed,
            Err(e) => {
                warn!(binary = %location, error = %e, "failed to list tests");
                return TestNode::not_runnable(&location, e.to_string());
            }
        };

        let ignored: HashSet<String> = match self.list(handle, options, true) {
            Ok(ignored) => ignored.into_iter().map(|t| t.name).collect(),
            Err(e) => {
                warn!(binary = %location, error = %e, "failed to list ignored tests");
                HashSet::new()
            }
        };

        let include_benchmarks = options.get_bool(OPTION_BENCHMARKS).unwrap_or(true);

        let mut root = TestNode::binary(&location);
        apply_binary_annotations(&mut root, handle);

        for test in listed {
            if test.kind == NodeKind::Benchmark && !include_benchmarks {
                continue;
            }
            if ignored.contains(&test.name) {
                root.insert_case(&test.name, test.kind, RunState::Ignored, Some(IGNORED_REASON));
            } else {
                root.insert_case(&test.name, test.kind, RunState::Runnable, None);
            }
        }

        debug!(
            binary = %location,
            tests = root.count_cases(),
            ignored = root.count_in_state(RunState::Ignored),
            "discovered tests"
        );
        root
    }
}

/// Parses `<path>: test` and `<path>: benchmark` lines; anything else is
/// skipped.
pub fn parse_terse_listing(output: &str) -> Vec<ListedTest> {
    output
        .lines()
        .filter_map(|line| {
            let (name, kind) = line.trim_end().rsplit_once(": ")?;
            let kind = match kind {
                "test" => NodeKind::Test,
                "benchmark" => NodeKind::Benchmark,
                _ => return None,
            };
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(ListedTest {
                name: name.to_string(),
                kind,
            })
        })
        .collect()
}

/// A bare file name would be looked up on `PATH` when spawned, so it is
/// anchored to the working directory the loader resolved it against.
fn launch_path(path: &Path) -> Cow<'_, Path> {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Cow::Owned(Path::new(".").join(path)),
        _ => Cow::Borrowed(path),
    }
}

fn program_name(program: OsString) -> String {
    program.to_string_lossy().into_owned()
}
