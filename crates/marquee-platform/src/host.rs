//! Host process services: base path, program launching, quitting.

use std::path::{Path, PathBuf};
use std::process::Command;

use marquee_types::error::{MarqueeError, Result};

/// Environment variable that overrides the base directory.
pub const BASE_PATH_ENV: &str = "MARQUEE_HOME";

/// Requests the launcher core may make of its host.
pub trait HostService {
    /// Directory from which descriptors and assets are resolved.
    fn base_path(&self) -> PathBuf;

    /// Start the program at `path` and return immediately. The host owns
    /// the child process; its outcome is never reported back.
    fn launch(&mut self, path: &str) -> Result<()>;

    /// Ask the host to terminate the application.
    fn quit(&mut self);

    /// Whether `quit` has been requested.
    fn quit_requested(&self) -> bool;
}

/// Pick the base directory for descriptors and assets.
///
/// Priority: explicit CLI argument, `MARQUEE_HOME`, then the working
/// directory for development builds or the executable's directory for
/// installed/portable builds.
pub fn resolve_base_path(
    cli: Option<PathBuf>,
    env_home: Option<PathBuf>,
    exe: Option<&Path>,
    cwd: Option<PathBuf>,
    development: bool,
) -> PathBuf {
    if let Some(p) = cli.filter(|p| !p.as_os_str().is_empty()) {
        return p;
    }
    if let Some(p) = env_home.filter(|p| !p.as_os_str().is_empty()) {
        return p;
    }
    let exe_dir = exe.and_then(Path::parent).map(Path::to_path_buf);
    let chosen = if development {
        cwd.or(exe_dir)
    } else {
        exe_dir.or(cwd)
    };
    chosen.unwrap_or_else(|| PathBuf::from("."))
}

/// Build the command for `program`, run from the program's own directory.
///
/// A relative program is first anchored to `cwd`, otherwise the child's
/// changed working directory would be applied to it a second time.
pub fn launch_command(program: &Path, cwd: Option<&Path>) -> Command {
    let program = match cwd {
        Some(cwd) if program.is_relative() => cwd.join(program),
        _ => program.to_path_buf(),
    };
    let mut cmd = Command::new(&program);
    if let Some(dir) = program.parent().filter(|d| d.is_dir()) {
        cmd.current_dir(dir);
    }
    cmd
}

/// Desktop host: spawns child processes with `std::process`.
#[derive(Debug)]
pub struct DesktopHost {
    base: PathBuf,
    quit: bool,
}

impl DesktopHost {
    /// Create a host, resolving the base path from the process environment.
    pub fn new(cli_base: Option<PathBuf>) -> Self {
        let exe = std::env::current_exe().ok();
        let base = resolve_base_path(
            cli_base,
            std::env::var_os(BASE_PATH_ENV).map(PathBuf::from),
            exe.as_deref(),
            std::env::current_dir().ok(),
            cfg!(debug_assertions),
        );
        log::info!("Base path: {}", base.display());
        Self { base, quit: false }
    }

    /// Create a host with a fixed base path.
    pub fn with_base(base: PathBuf) -> Self {
        Self { base, quit: false }
    }
}

impl HostService for DesktopHost {
    fn base_path(&self) -> PathBuf {
        self.base.clone()
    }

    fn launch(&mut self, path: &str) -> Result<()> {
        if path.is_empty() {
            return Ok(());
        }
        log::info!("Attempting to launch: {path}");

        let cwd = std::env::current_dir().ok();
        let mut child = launch_command(Path::new(path), cwd.as_deref())
            .spawn()
            .map_err(|e| MarqueeError::Platform(format!("launch {path}: {e}")))?;
        log::info!("Launched {path} (pid {})", child.id());

        // Reap the child off the UI thread so it never lingers as a zombie.
        let label = path.to_string();
        let spawned = std::thread::Builder::new()
            .name("marquee-reaper".into())
            .spawn(move || match child.wait() {
                Ok(status) => log::info!("{label} exited with {status}"),
                Err(e) => log::warn!("wait on {label} failed: {e}"),
            });
        if let Err(e) = spawned {
            log::warn!("could not start reaper thread: {e}");
        }
        Ok(())
    }

    fn quit(&mut self) {
        log::info!("Quit requested");
        self.quit = true;
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}
