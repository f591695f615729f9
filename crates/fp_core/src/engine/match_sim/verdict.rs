//! End-of-match verdict on the referee.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::config::RefereeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Clean,
    Murmurs,
    Scandal,
    Banned,
}

impl Verdict {
    pub fn from_suspicion(suspicion: u32, cfg: &RefereeConfig) -> Self {
        if suspicion >= cfg.banned_threshold {
            Verdict::Banned
        } else if suspicion >= cfg.scandal_threshold {
            Verdict::Scandal
        } else if suspicion >= cfg.murmurs_threshold {
            Verdict::Murmurs
        } else {
            Verdict::Clean
        }
    }

    pub fn flavor_text(self) -> &'static str {
        match self {
            Verdict::Clean => "A fair match. Nobody suspects a thing.",
            Verdict::Murmurs => "The crowd murmurs about a few odd calls.",
            Verdict::Scandal => "The papers call it a scandal. Questions will be asked.",
            Verdict::Banned => "The league bans the referee for life.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Clean => "clean",
            Verdict::Murmurs => "murmurs",
            Verdict::Scandal => "scandal",
            Verdict::Banned => "banned",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
