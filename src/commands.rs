//! Keyboard commands, loop control and screenshot naming for the preview window.

use crate::config::ScreenshotConfig;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

const KEY_ESCAPE: i32 = 27;

/// Action requested from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Stop the processing loop
    Quit,
    /// Save the current annotated frame
    Screenshot,
}

impl KeyCommand {
    /// Map a polled key code to a command
    ///
    /// Only the low byte is considered; `-1` (no key) maps to nothing.
    #[must_use]
    pub fn from_key(key: i32) -> Option<Self> {
        if key < 0 {
            return None;
        }
        match key & 0xFF {
            KEY_ESCAPE => Some(Self::Quit),
            k if k == i32::from(b'q') || k == i32::from(b'Q') => Some(Self::Quit),
            k if k == i32::from(b's') || k == i32::from(b'S') => Some(Self::Screenshot),
            _ => None,
        }
    }
}

/// Why the processing loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Stop flag set from outside the loop, e.g. by Ctrl+C
    Interrupted,
    /// The preview window was closed
    WindowClosed,
    /// The quit key was pressed
    QuitKey,
}

impl StopReason {
    /// Log line for the end of the loop
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Interrupted => "Interrupted by user",
            Self::WindowClosed => "Window closed by user...",
            Self::QuitKey => "Quitting...",
        }
    }
}

/// What the loop does after polling the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStep {
    Continue,
    Screenshot,
    Stop(StopReason),
}

/// Decide the next step from the window events polled after a frame
///
/// Called for every frame, including frames whose detection failed, so the
/// window stays responsive while the provider misbehaves.
#[must_use]
pub fn next_step(window_visible: bool, key: i32) -> LoopStep {
    if !window_visible {
        return LoopStep::Stop(StopReason::WindowClosed);
    }
    match KeyCommand::from_key(key) {
        Some(KeyCommand::Quit) => LoopStep::Stop(StopReason::QuitKey),
        Some(KeyCommand::Screenshot) => LoopStep::Screenshot,
        None => LoopStep::Continue,
    }
}

/// Cooperative stop flag checked by the loop between frames
///
/// Clones share the flag, so one can be handed to a signal handler.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop before its next frame
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Numbered screenshot paths: `<dir>/<prefix>_1.<ext>`, `<dir>/<prefix>_2.<ext>`, ...
#[derive(Debug, Clone)]
pub struct ScreenshotSequence {
    directory: PathBuf,
    prefix: String,
    extension: String,
    count: u32,
}

impl ScreenshotSequence {
    #[must_use]
    pub fn new(config: &ScreenshotConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            prefix: config.prefix.clone(),
            extension: config.extension.trim_start_matches('.').to_string(),
            count: 0,
        }
    }

    /// Path for the next screenshot
    pub fn next_path(&mut self) -> PathBuf {
        self.count += 1;
        self.directory
            .join(format!("{}_{}.{}", self.prefix, self.count, self.extension))
    }

    /// Number of paths handed out so far
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }
}
