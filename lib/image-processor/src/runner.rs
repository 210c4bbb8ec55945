use crate::{command::ImCommand, timer::WallTimer};
use derivative::Derivative;
use derive_setters::Setters;
use std::path::{Path, PathBuf};

/// Exit code reported when the program could not be started at all.
pub const SPAWN_FAILED: i32 = 127;

/// Runs one external command.
///
/// Implementations never fail: a non-zero exit code is the only failure
/// signal, and the call's wall-clock time is always added to `timer`.
pub trait CommandRunner {
    fn run(&self, cmd: &ImCommand, timer: &mut WallTimer) -> i32;

    /// Files holding the output of the latest run.
    fn diagnostics(&self) -> Vec<PathBuf> {
        vec![]
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, cmd: &ImCommand, timer: &mut WallTimer) -> i32 {
        (**self).run(cmd, timer)
    }

    fn diagnostics(&self) -> Vec<PathBuf> {
        (**self).diagnostics()
    }
}

/// Spawns the program directly and waits for it.
///
/// Stdout and stderr go to two capture files that are truncated on every run,
/// so only the latest invocation's diagnostics survive.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ProcessRunner {
    #[derivative(Default(value = "std::env::temp_dir().join(\"IM.out\")"))]
    stdout_path: PathBuf,

    #[derivative(Default(value = "std::env::temp_dir().join(\"IM.err\")"))]
    stderr_path: PathBuf,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout_path(&self) -> &Path {
        &self.stdout_path
    }

    pub fn stderr_path(&self) -> &Path {
        &self.stderr_path
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, cmd: &ImCommand, timer: &mut WallTimer) -> i32 {
        log::debug!("run: {cmd}");

        let result = timer.time(|| {
            duct::cmd(cmd.program(), cmd.args())
                .stdin_null()
                .stdout_path(&self.stdout_path)
                .stderr_path(&self.stderr_path)
                .unchecked()
                .run()
        });

        match result {
            // Killed by a signal when there is no code.
            Ok(output) => output.status.code().unwrap_or(-1),
            Err(e) => {
                log::warn!("failed to start `{}`: {e}", cmd.program());
                SPAWN_FAILED
            }
        }
    }

    fn diagnostics(&self) -> Vec<PathBuf> {
        vec![self.stdout_path.clone(), self.stderr_path.clone()]
    }
}
