//! Subprocess plumbing shared by the analyzer-backed parsers

use crate::error::ToolError;
use crate::external::InputMode;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

/// Default wall-clock limit for one tool invocation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Outcome of an availability probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    /// Empty when available
    pub message: String,
}

/// Availability computed once per instance.
///
/// Concurrent first calls may both run the probe; the result is the same
/// either way and only one is stored.
#[derive(Debug, Default)]
pub struct AvailabilityCache {
    cell: OnceLock<Availability>,
}

impl AvailabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_probe(&self, binary: &str) -> &Availability {
        self.cell.get_or_init(|| {
            let availability = probe(binary);
            log::debug!(
                "Probed '{}': available={} {}",
                binary,
                availability.available,
                availability.message
            );
            availability
        })
    }
}

/// Check whether `binary` resolves to an executable file
pub fn probe(binary: &str) -> Availability {
    match find_executable(binary) {
        Some(_) => Availability {
            available: true,
            message: String::new(),
        },
        None if binary.trim().is_empty() => Availability {
            available: false,
            message: "No binary configured".to_string(),
        },
        None if has_path_separator(binary) => Availability {
            available: false,
            message: format!("Binary '{binary}' does not exist or is not executable"),
        },
        None => Availability {
            available: false,
            message: format!("Binary '{binary}' not found in PATH"),
        },
    }
}

/// Resolve `binary` to an executable path.
///
/// Names containing a path separator are checked directly; bare names are
/// searched for in `PATH`.
pub fn find_executable(binary: &str) -> Option<PathBuf> {
    if binary.trim().is_empty() {
        return None;
    }

    if has_path_separator(binary) {
        let path = PathBuf::from(binary);
        return is_executable(&path).then_some(path);
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .flat_map(|dir| candidates(&dir, binary))
        .find(|candidate| is_executable(candidate))
}

fn has_path_separator(binary: &str) -> bool {
    binary.contains('/') || (cfg!(windows) && binary.contains('\\'))
}

#[cfg(not(windows))]
fn candidates(dir: &Path, binary: &str) -> Vec<PathBuf> {
    vec![dir.join(binary)]
}

#[cfg(windows)]
fn candidates(dir: &Path, binary: &str) -> Vec<PathBuf> {
    let mut out = vec![dir.join(binary)];
    if Path::new(binary).extension().is_none() {
        out.extend(["exe", "cmd", "bat"].iter().map(|ext| dir.join(binary).with_extension(ext)));
    }
    out
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// One tool invocation
#[derive(Debug)]
pub(crate) struct ToolInvocation<'a> {
    pub binary: &'a str,
    pub args: &'a [String],
    pub input_mode: InputMode,
    pub timeout: Duration,
}

impl ToolInvocation<'_> {
    /// Feed `text` to the tool and capture its standard output.
    ///
    /// The timeout covers the whole call. A tool that exits but leaves a
    /// background process holding its output open still times out, and the
    /// threads draining its pipes are left behind.
    ///
    /// In file mode the text goes to a temporary file whose path is appended
    /// to the arguments; the file is removed when this returns, whatever the
    /// outcome.
    pub(crate) fn run(&self, text: &str) -> Result<String, ToolError> {
        let deadline = Instant::now() + self.timeout;

        let mut command = Command::new(self.binary);
        command
            .args(self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let _input_file = match self.input_mode {
            InputMode::Stdin => {
                command.stdin(Stdio::piped());
                None
            }
            InputMode::File => {
                let mut file = NamedTempFile::new()?;
                file.write_all(text.as_bytes())?;
                file.flush()?;
                command.arg(file.path()).stdin(Stdio::null());
                Some(file)
            }
        };

        let mut child = command.spawn().map_err(|source| ToolError::Spawn {
            binary: self.binary.to_string(),
            source,
        })?;

        let (events, received) = mpsc::channel();
        let mut pending = 0;

        if let Some(mut stdin) = child.stdin.take() {
            let input = text.to_owned();
            let events = events.clone();
            pending += 1;
            thread::spawn(move || {
                // Dropping stdin at the end of the closure closes the pipe
                let _ = events.send(Event::Written(stdin.write_all(input.as_bytes())));
            });
        }
        if let Some(stdout) = child.stdout.take() {
            pending += 1;
            spawn_reader(stdout, events.clone(), Event::Stdout);
        }
        if let Some(stderr) = child.stderr.take() {
            pending += 1;
            spawn_reader(stderr, events, Event::Stderr);
        }

        let status = wait_until(&mut child, deadline, self.timeout)?;

        let mut output = Vec::new();
        let mut errors = Vec::new();
        let mut written = Ok(());
        while pending > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match received.recv_timeout(remaining) {
                Ok(Event::Stdout(read)) => output = read?,
                Ok(Event::Stderr(read)) => errors = read.unwrap_or_default(),
                Ok(Event::Written(result)) => written = result,
                Err(RecvTimeoutError::Timeout) => {
                    log::debug!(
                        "'{}' exited but its pipes are still open; abandoning them",
                        self.binary
                    );
                    return Err(ToolError::Timeout(self.timeout));
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(ToolError::Io(io::Error::other("pipe thread panicked")));
                }
            }
            pending -= 1;
        }

        if !status.success() {
            return Err(ToolError::Failed {
                status: status.to_string(),
                stderr: String::from_utf8_lossy(&errors).trim().to_string(),
            });
        }

        // A broken pipe after a clean exit means the tool stopped reading
        // early, which is its own business
        match written {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                log::debug!("'{}' closed stdin before reading all input", self.binary);
            }
            Err(e) => return Err(ToolError::Io(e)),
            Ok(()) => {}
        }

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

/// Completion of one of the threads servicing a child's pipes
enum Event {
    Written(io::Result<()>),
    Stdout(io::Result<Vec<u8>>),
    Stderr(io::Result<Vec<u8>>),
}

fn spawn_reader<R: Read + Send + 'static>(
    mut stream: R,
    events: Sender<Event>,
    wrap: fn(io::Result<Vec<u8>>) -> Event,
) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let read = stream.read_to_end(&mut buf).map(|_| buf);
        // The receiver is gone once the call has timed out
        let _ = events.send(wrap(read));
    });
}

fn wait_until(
    child: &mut Child,
    deadline: Instant,
    timeout: Duration,
) -> Result<std::process::ExitStatus, ToolError> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            // The process may exit between the check and the kill
            let _ = child.kill();
            let _ = child.wait();
            return Err(ToolError::Timeout(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    }
}
