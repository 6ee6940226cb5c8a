//! Directional input intents.
//!
//! This module defines the [`Intent`] enum, which abstracts movement actions
//! from the physical device that produced them, and [`KeyState`], the set of
//! intents currently held down.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A directional action the player can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move along the facing direction (W or Up Arrow).
    Forward,
    /// Move against the facing direction (S or Down Arrow).
    Backward,
    /// Turn left (A or Left Arrow).
    RotateLeft,
    /// Turn right (D or Right Arrow).
    RotateRight,
}

impl Intent {
    /// All intents, in the order they are applied within a tick.
    pub const ALL: [Intent; 4] = [
        Intent::Forward,
        Intent::Backward,
        Intent::RotateLeft,
        Intent::RotateRight,
    ];
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::Forward => "forward",
            Intent::Backward => "backward",
            Intent::RotateLeft => "left",
            Intent::RotateRight => "right",
        };
        f.write_str(name)
    }
}

macro_rules! match_key_name {
    ($s:expr, {
        $($($key:literal)|+ => $variant:expr),* $(,)?
    }) => {{
        match $s.to_ascii_lowercase().as_str() {
            $($($key)|+ => Some($variant),)*
            _ => None,
        }
    }};
}

/// Maps a key or intent name to an [`Intent`].
///
/// Accepts WASD characters, arrow key names, and the intent names themselves.
pub fn key_to_intent(key: &str) -> Option<Intent> {
    match_key_name!(key, {
        "w" | "arrowup" | "up" | "forward" => Intent::Forward,
        "s" | "arrowdown" | "down" | "backward" => Intent::Backward,
        "a" | "arrowleft" | "left" | "rotateleft" => Intent::RotateLeft,
        "d" | "arrowright" | "right" | "rotateright" => Intent::RotateRight,
    })
}

/// Error for an unrecognised intent name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intent {0:?}")]
pub struct UnknownIntent(pub String);

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        key_to_intent(s).ok_or_else(|| UnknownIntent(s.to_string()))
    }
}

/// Tracks the set of currently held intents.
///
/// Use [`press`](KeyState::press) and [`release`](KeyState::release) to update
/// the state and [`is_pressed`](KeyState::is_pressed) to query.
#[derive(Debug, Default, Clone)]
pub struct KeyState {
    /// Set of currently held intents.
    pub pressed: HashSet<Intent>,
}

impl KeyState {
    /// Creates a new, empty [`KeyState`]
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
        }
    }

    /// Marks an intent as held.
    pub fn press(&mut self, intent: Intent) {
        self.pressed.insert(intent);
    }

    /// Marks an intent as released.
    pub fn release(&mut self, intent: Intent) {
        self.pressed.remove(&intent);
    }

    pub fn is_pressed(&self, intent: Intent) -> bool {
        self.pressed.contains(&intent)
    }

    /// Releases every held intent.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// Held intents in application order.
    pub fn held(&self) -> Vec<Intent> {
        Intent::ALL
            .into_iter()
            .filter(|intent| self.is_pressed(*intent))
            .collect()
    }
}
