//! Masked secret input from the controlling terminal.
//!
//! [`EchoGuard`] owns the saved terminal state: echo is switched off when the
//! guard is created and the saved state is put back when it drops, on every
//! exit path including early returns and unwinding. No terminal state lives
//! in process-wide globals.

use std::io::{self, BufRead, Write};

use zeroize::Zeroizing;

use crate::error::VaultError;

/// RAII guard that keeps stdin echo disabled while alive.
///
/// Inert when stdin is not a terminal or on platforms without termios.
pub struct EchoGuard {
    saved: Option<platform::SavedState>,
}

impl EchoGuard {
    /// Turn off echo on stdin, remembering the previous state.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Terminal`] if stdin is a terminal but its
    /// attributes cannot be read or changed.
    pub fn disable() -> Result<Self, VaultError> {
        let saved = platform::disable_echo()?;
        Ok(Self { saved })
    }

    /// Returns `true` if this guard changed the terminal and will restore it.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.saved.is_some()
    }
}

impl Drop for EchoGuard {
    fn drop(&mut self) {
        if let Some(state) = self.saved.take() {
            platform::restore(&state);
        }
    }
}

/// Print `prompt` and read one line from the terminal.
///
/// When `mask` is set the line is read under an [`EchoGuard`].
///
/// # Errors
///
/// Returns [`VaultError::Terminal`] if echo cannot be disabled or input ends
/// before a line is read, and [`VaultError::Io`] on stream errors.
pub fn read_secret(prompt: &str, mask: bool) -> Result<Zeroizing<String>, VaultError> {
    let _guard = if mask {
        Some(EchoGuard::disable()?)
    } else {
        None
    };
    let stdin = io::stdin();
    let stdout = io::stdout();
    read_secret_from(&mut stdin.lock(), &mut stdout.lock(), prompt)
}

/// Write `prompt` to `output` and read one line from `input`, without the
/// trailing line terminator.
///
/// # Errors
///
/// Returns [`VaultError::Terminal`] if `input` is already at end of stream,
/// and [`VaultError::Io`] on read or write errors.
pub fn read_secret_from<R, W>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Zeroizing<String>, VaultError>
where
    R: BufRead,
    W: Write,
{
    output.write_all(prompt.as_bytes())?;
    output.flush()?;

    let mut line = Zeroizing::new(String::new());
    if input.read_line(&mut line)? == 0 {
        return Err(VaultError::Terminal(
            "input closed before a secret was entered".into(),
        ));
    }

    let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed_len);
    Ok(line)
}

#[cfg(unix)]
mod platform {
    use std::io;
    use std::mem::MaybeUninit;

    use crate::error::VaultError;

    pub(super) struct SavedState {
        fd: libc::c_int,
        termios: libc::termios,
    }

    pub(super) fn disable_echo() -> Result<Option<SavedState>, VaultError> {
        let fd = libc::STDIN_FILENO;
        // SAFETY: isatty only inspects the descriptor.
        if unsafe { libc::isatty(fd) } != 1 {
            return Ok(None);
        }

        let mut original = MaybeUninit::<libc::termios>::uninit();
        // SAFETY: tcgetattr fully initialises `original` when it returns 0.
        if unsafe { libc::tcgetattr(fd, original.as_mut_ptr()) } != 0 {
            return Err(VaultError::Terminal(format!(
                "tcgetattr failed: {}",
                io::Error::last_os_error()
            )));
        }
        // SAFETY: checked the tcgetattr return value above.
        let original = unsafe { original.assume_init() };

        let mut silent = original;
        silent.c_lflag &= !libc::ECHO;
        silent.c_lflag |= libc::ECHONL;
        // SAFETY: `silent` is a valid termios copied from the live terminal.
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw const silent) } != 0 {
            return Err(VaultError::Terminal(format!(
                "tcsetattr failed: {}",
                io::Error::last_os_error()
            )));
        }

        Ok(Some(SavedState {
            fd,
            termios: original,
        }))
    }

    pub(super) fn restore(state: &SavedState) {
        // SAFETY: restores attributes previously read from the same descriptor.
        let ret = unsafe { libc::tcsetattr(state.fd, libc::TCSANOW, &raw const state.termios) };
        if ret != 0 {
            tracing::warn!(
                error = %io::Error::last_os_error(),
                "failed to restore terminal echo"
            );
        }
    }
}

#[cfg(not(unix))]
mod platform {
    use crate::error::VaultError;

    pub(super) struct SavedState;

    pub(super) fn disable_echo() -> Result<Option<SavedState>, VaultError> {
        Ok(None)
    }

    pub(super) fn restore(_state: &SavedState) {}
}
