use weather_core::WeatherObservation;

use crate::emoji::EmojiTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Text,
    /// Group name plus the provider's longer wording.
    Detailed,
    Emoji,
}

/// Formats observations for the terminal.
#[derive(Debug, Clone)]
pub struct Renderer {
    mode: DisplayMode,
    emoji: EmojiTable,
}

impl Renderer {
    pub fn new(mode: DisplayMode, emoji: EmojiTable) -> Self {
        Self { mode, emoji }
    }

    /// Description or glyph; unknown icons fall back to the description.
    pub fn condition(&self, obs: &WeatherObservation) -> String {
        match self.mode {
            DisplayMode::Emoji => self
                .emoji
                .lookup(&obs.icon_code)
                .map(str::to_owned)
                .unwrap_or_else(|| obs.description.clone()),
            DisplayMode::Detailed if !obs.detail.is_empty() => {
                format!("{} ({})", obs.description, obs.detail)
            }
            DisplayMode::Text | DisplayMode::Detailed => obs.description.clone(),
        }
    }

    pub fn current(&self, obs: &WeatherObservation) -> String {
        self.condition(obs)
    }

    /// One `HH:MM<TAB>condition` line per slot.
    pub fn slots(&self, observations: &[WeatherObservation]) -> Vec<String> {
        observations
            .iter()
            .map(|obs| {
                let time = obs
                    .observed_at
                    .map(|at| at.format("%H:%M").to_string())
                    .unwrap_or_else(|| "--:--".to_string());
                format!("{time}\t{}", self.condition(obs))
            })
            .collect()
    }
}
