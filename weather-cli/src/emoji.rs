use std::collections::HashMap;

/// Provider icon code -> emoji glyph.
///
/// Read-only after construction; handed to the renderer rather than kept global.
#[derive(Debug, Clone)]
pub struct EmojiTable {
    glyphs: HashMap<&'static str, &'static str>,
}

impl EmojiTable {
    pub fn lookup(&self, icon_code: &str) -> Option<&'static str> {
        self.glyphs.get(icon_code).copied()
    }
}

impl Default for EmojiTable {
    fn default() -> Self {
        let glyphs = HashMap::from([
            ("01d", "☀️"),
            ("01n", "🌙"),
            ("02d", "⛅"),
            ("02n", "⛅"),
            ("03d", "☁️"),
            ("03n", "☁️"),
            ("04d", "☁️"),
            ("04n", "☁️"),
            ("09d", "☔"),
            ("09n", "☔"),
            ("10d", "☔"),
            ("10n", "☔"),
            ("11d", "⚡"),
            ("11n", "⚡"),
            ("13d", "❄️"),
            ("13n", "❄️"),
            ("50d", "🌁"),
            ("50n", "🌁"),
        ]);
        Self { glyphs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_and_night_codes_are_covered() {
        let table = EmojiTable::default();
        for group in ["01", "02", "03", "04", "09", "10", "11", "13", "50"] {
            assert!(table.lookup(&format!("{group}d")).is_some(), "{group}d");
            assert!(table.lookup(&format!("{group}n")).is_some(), "{group}n");
        }
    }

    #[test]
    fn clear_sky_differs_by_day_and_night() {
        let table = EmojiTable::default();
        assert_eq!(table.lookup("01d"), Some("☀️"));
        assert_eq!(table.lookup("01n"), Some("🌙"));
    }

    #[test]
    fn unknown_code_has_no_glyph() {
        assert_eq!(EmojiTable::default().lookup("99x"), None);
    }
}
