//! Input sources for headless sessions.
//!
//! Without a window there is no keyboard or gaze tracker, so the driver pulls
//! [`InputEvent`]s from an [`IntentSource`] once per tick instead:
//!
//! - [`ScriptedInput`]: replays a text script, one event per line
//! - [`RandomWalk`]: a seeded wandering participant
//!
//! # Script Format
//!
//! ```text
//! # tick  action  arguments
//! 0    look    -785.4
//! 0    press   forward
//! 120  release forward
//! 130  gaze    640 360
//! 140  hover   3 2
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Events with the same
//! tick are delivered in file order.

use crate::app::event_handler::InputEvent;
use crate::error::ScriptError;
use crate::game::keys::Intent;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Produces the input events for a given tick.
pub trait IntentSource {
    fn poll(&mut self, tick: u64) -> Vec<InputEvent>;

    /// Whether the source has nothing more to deliver.
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Replays a parsed input script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptedInput {
    events: VecDeque<(u64, InputEvent)>,
}

impl ScriptedInput {
    /// Parses a script, returning the first malformed line as an error.
    pub fn parse(script: &str) -> Result<Self, ScriptError> {
        let mut events = Vec::new();
        for (index, raw) in script.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            events.push(parse_line(line).map_err(|message| ScriptError {
                line: index + 1,
                message,
            })?);
        }
        // Stable sort keeps same-tick events in file order.
        events.sort_by_key(|(tick, _)| *tick);
        Ok(Self {
            events: events.into(),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let script = fs::read_to_string(path)?;
        Ok(Self::parse(&script)?)
    }

    /// Number of events not yet delivered.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

fn parse_line(line: &str) -> Result<(u64, InputEvent), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let tick = parse_field::<u64>(&fields, 0, "tick")?;
    let action = fields.get(1).ok_or("missing action")?;

    let event = match action.to_ascii_lowercase().as_str() {
        "press" => InputEvent::Press(parse_intent(&fields)?),
        "release" => InputEvent::Release(parse_intent(&fields)?),
        "look" => InputEvent::Look(parse_field(&fields, 2, "look delta")?),
        "gaze" => InputEvent::Gaze {
            x: parse_field(&fields, 2, "gaze x")?,
            y: parse_field(&fields, 3, "gaze y")?,
        },
        "hover" => InputEvent::Hover {
            col: parse_field(&fields, 2, "hover column")?,
            row: parse_field(&fields, 3, "hover row")?,
        },
        other => return Err(format!("unknown action {other:?}")),
    };
    Ok((tick, event))
}

fn parse_field<T: FromStr>(fields: &[&str], index: usize, name: &str) -> Result<T, String> {
    let field = fields.get(index).ok_or_else(|| format!("missing {name}"))?;
    field
        .parse()
        .map_err(|_| format!("invalid {name} {field:?}"))
}

fn parse_intent(fields: &[&str]) -> Result<Intent, String> {
    let field = fields.get(2).ok_or("missing intent")?;
    field.parse().map_err(|err: crate::game::keys::UnknownIntent| err.to_string())
}

impl IntentSource for ScriptedInput {
    fn poll(&mut self, tick: u64) -> Vec<InputEvent> {
        let mut due = Vec::new();
        while let Some((at, event)) = self.events.front().copied() {
            if at > tick {
                break;
            }
            self.events.pop_front();
            due.push(event);
        }
        due
    }

    fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}

/// A seeded participant that wanders: it holds one intent for a random
/// stretch of ticks, then picks another, glancing around the screen as it goes.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    rng: StdRng,
    held: Option<Intent>,
    switch_at: u64,
    /// Screen size in pixels for synthetic gaze points.
    pub screen: [f32; 2],
}

impl RandomWalk {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            held: None,
            switch_at: 0,
            screen: [1280.0, 720.0],
        }
    }

    fn choose_intent(&mut self) -> Intent {
        // Mostly forward, with enough turning to explore.
        match self.rng.gen_range(0..10) {
            0..=5 => Intent::Forward,
            6 => Intent::Backward,
            7 | 8 => Intent::RotateLeft,
            _ => Intent::RotateRight,
        }
    }
}

impl IntentSource for RandomWalk {
    fn poll(&mut self, tick: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if tick >= self.switch_at {
            if let Some(previous) = self.held.take() {
                events.push(InputEvent::Release(previous));
            }
            let next = self.choose_intent();
            events.push(InputEvent::Press(next));
            self.held = Some(next);
            self.switch_at = tick + self.rng.gen_range(10..90);
        }
        if self.rng.gen_bool(0.05) {
            events.push(InputEvent::Look(self.rng.gen_range(-40.0..40.0)));
        }
        let [width, height] = self.screen;
        events.push(InputEvent::Gaze {
            x: self.rng.gen_range(0.0..width),
            y: self.rng.gen_range(0.0..height),
        });
        events
    }
}
