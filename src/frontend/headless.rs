//! Headless frame driver.
//!
//! Produces a fixed number of frames at a fixed delta without any display,
//! optionally walking the pointer along a scripted path, and writes every
//! Nth snapshot as one JSON line.

use std::io::Write;

use glam::Vec2;
use log::error;

use crate::engine::{FrameDriver, FrameInput};
use crate::systems::snapshot::FrameSnapshot;

/// Nominal delta of a 60 Hz display.
pub const DEFAULT_DELTA: f32 = 1.0 / 60.0;

pub struct HeadlessDriver<W: Write> {
    frames_left: u64,
    delta: f32,
    every: u64,
    pointer_path: Vec<Vec2>,
    frame_index: usize,
    out: W,
    failed: bool,
}

impl<W: Write> HeadlessDriver<W> {
    /// Run `frames` frames and write every snapshot to `out`.
    pub fn new(frames: u64, out: W) -> Self {
        Self {
            frames_left: frames,
            delta: DEFAULT_DELTA,
            every: 1,
            pointer_path: Vec::new(),
            frame_index: 0,
            out,
            failed: false,
        }
    }

    pub fn with_delta(mut self, delta: f32) -> Self {
        self.delta = delta;
        self
    }

    /// Only write every `every`th snapshot; `0` writes nothing.
    pub fn with_every(mut self, every: u64) -> Self {
        self.every = every;
        self
    }

    /// Move the pointer through `path`, one point per frame, repeating.
    pub fn with_pointer_path(mut self, path: Vec<Vec2>) -> Self {
        self.pointer_path = path;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameDriver for HeadlessDriver<W> {
    fn next_frame(&mut self) -> Option<FrameInput> {
        if self.failed || self.frames_left == 0 {
            return None;
        }
        self.frames_left -= 1;

        let pointer = if self.pointer_path.is_empty() {
            None
        } else {
            Some(self.pointer_path[self.frame_index % self.pointer_path.len()])
        };
        self.frame_index += 1;

        Some(FrameInput {
            delta: self.delta,
            pointer,
            ..FrameInput::default()
        })
    }

    fn present(&mut self, frame: &FrameSnapshot) {
        if self.every == 0 || frame.frame % self.every != 0 {
            return;
        }
        let written = serde_json::to_writer(&mut self.out, frame)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(self.out));
        if let Err(e) = written {
            error!("Failed to write frame {}: {}", frame.frame, e);
            self.failed = true;
        }
    }
}
