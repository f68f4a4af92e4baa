//! Held-direction input
//!
//! The UI owns key state; the tick only sees an immutable `InputSnapshot`
//! taken when it starts.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::core::types::Vec2;

bitflags! {
    /// Directions currently held down
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct HeldDirections: u8 {
        const UP    = 1 << 0;
        const DOWN  = 1 << 1;
        const LEFT  = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl FromStr for HeldDirections {
    type Err = String;

    /// Parse one direction name or a compound like `up-left`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut held = HeldDirections::empty();
        for part in s.split(|c| c == '-' || c == '+' || c == ',') {
            held |= match part.trim().to_ascii_lowercase().as_str() {
                "up" | "w" | "north" => HeldDirections::UP,
                "down" | "s" | "south" => HeldDirections::DOWN,
                "left" | "a" | "west" => HeldDirections::LEFT,
                "right" | "d" | "east" => HeldDirections::RIGHT,
                other => return Err(format!("unknown direction: {}", other)),
            };
        }
        Ok(held)
    }
}

/// Input state seen by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub held: HeldDirections,
}

impl InputSnapshot {
    pub fn new(held: HeldDirections) -> Self {
        Self { held }
    }

    /// Unit-length movement direction, zero when nothing (or only opposing
    /// keys) is held. Screen coordinates: up is -y.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::default();
        if self.held.contains(HeldDirections::UP) {
            dir.y -= 1.0;
        }
        if self.held.contains(HeldDirections::DOWN) {
            dir.y += 1.0;
        }
        if self.held.contains(HeldDirections::LEFT) {
            dir.x -= 1.0;
        }
        if self.held.contains(HeldDirections::RIGHT) {
            dir.x += 1.0;
        }
        dir.normalize()
    }
}
