//! Stdin command parsing.
//!
//! | Input | Command |
//! |-------|---------|
//! | `create` / `start` / `stop` / `destroy` | lifecycle callback |
//! | `config orientation=landscape night=on ...` | configuration change |
//! | `low-memory` | low-memory hint |
//! | `back` | back press |
//! | `respond <id> grant\|deny\|empty` | one permission callback |
//! | `respond-all grant\|deny` | answer every unanswered prompt |
//! | `pending` | list open requests |
//! | `q` / `quit` | exit |

use anyhow::{anyhow, bail, Context, Result};
use gio_surface::{Configuration, Orientation};

/// User verdict for a simulated permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Grant,
    Deny,
    /// Prompt dismissed: empty capability and result lists.
    Empty,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create,
    Start,
    Stop,
    Destroy,
    Config(Vec<ConfigChange>),
    LowMemory,
    Back,
    Respond { id: u32, verdict: Verdict },
    RespondAll { granted: bool },
    Pending,
    Quit,
}

/// One `key=value` pair of a `config` command.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigChange {
    Orientation(Orientation),
    NightMode(bool),
    FontScale(f32),
    DensityDpi(u32),
    Locale(String),
}

impl ConfigChange {
    fn parse(pair: &str) -> Result<Self> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected key=value, got '{pair}'"))?;

        let change = match key {
            "orientation" => Self::Orientation(value.parse().map_err(|e: String| anyhow!(e))?),
            "night" | "night_mode" => Self::NightMode(parse_switch(value)?),
            "font_scale" => Self::FontScale(
                value
                    .parse()
                    .with_context(|| format!("invalid font scale '{value}'"))?,
            ),
            "density" | "density_dpi" => Self::DensityDpi(
                value
                    .parse()
                    .with_context(|| format!("invalid density '{value}'"))?,
            ),
            "locale" => Self::Locale(value.to_string()),
            other => bail!("unknown config key '{other}'"),
        };
        Ok(change)
    }

    /// Applies this change on top of `config`.
    pub fn apply(&self, config: Configuration) -> Configuration {
        match self {
            Self::Orientation(o) => config.with_orientation(*o),
            Self::NightMode(on) => config.with_night_mode(*on),
            Self::FontScale(scale) => config.with_font_scale(*scale),
            Self::DensityDpi(dpi) => config.with_density_dpi(*dpi),
            Self::Locale(locale) => config.with_locale(locale.clone()),
        }
    }
}

fn parse_switch(value: &str) -> Result<bool> {
    match value {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => bail!("expected on/off, got '{other}'"),
    }
}

impl Command {
    /// Parses one line. `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();

        let command = match (head, rest.as_slice()) {
            ("create", []) => Self::Create,
            ("start", []) => Self::Start,
            ("stop", []) => Self::Stop,
            ("destroy", []) => Self::Destroy,
            ("low-memory", []) => Self::LowMemory,
            ("back", []) => Self::Back,
            ("pending", []) => Self::Pending,
            ("q" | "quit", []) => Self::Quit,
            ("config", []) => bail!("usage: config key=value..."),
            ("config", pairs) => Self::Config(
                pairs
                    .iter()
                    .map(|pair| ConfigChange::parse(pair))
                    .collect::<Result<_>>()?,
            ),
            ("respond", [id, verdict]) => Self::Respond {
                id: id
                    .parse()
                    .with_context(|| format!("invalid request id '{id}'"))?,
                verdict: match *verdict {
                    "grant" => Verdict::Grant,
                    "deny" => Verdict::Deny,
                    "empty" => Verdict::Empty,
                    other => bail!("expected grant, deny or empty, got '{other}'"),
                },
            },
            ("respond", _) => bail!("usage: respond <id> grant|deny|empty"),
            ("respond-all", [verdict]) => Self::RespondAll {
                granted: match *verdict {
                    "grant" => true,
                    "deny" => false,
                    other => bail!("expected grant or deny, got '{other}'"),
                },
            },
            ("respond-all", _) => bail!("usage: respond-all grant|deny"),
            (
                word @ ("create" | "start" | "stop" | "destroy" | "low-memory" | "back"
                | "pending" | "q" | "quit"),
                _,
            ) => bail!("'{word}' takes no arguments"),
            (other, _) => bail!("unknown command '{other}'"),
        };
        Ok(Some(command))
    }
}
