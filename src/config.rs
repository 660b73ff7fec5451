// Runtime settings, with environment overrides.
//
//   SPOTLIGHT_OVERLAY_COLOR  #AARRGGBB or #RRGGBB   (default #CC000000)
//   SPOTLIGHT_WIDTH          pixels                 (default 800)
//   SPOTLIGHT_HEIGHT         pixels                 (default 600)
//   SPOTLIGHT_FADE_MS        show/hide fade, ms     (default 300)
//   SPOTLIGHT_BACKGROUND     image path             (default: synthetic screen)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::parse_color;

pub const DEFAULT_OVERLAY_COLOR: u32 = 0xCC00_0000;

#[derive(Clone, Debug, PartialEq)]
pub struct SpotlightConfig {
    pub overlay_color: u32,
    pub width: usize,
    pub height: usize,
    pub fade_duration: Duration,
    pub background: Option<PathBuf>,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            overlay_color: DEFAULT_OVERLAY_COLOR,
            width: 800,
            height: 600,
            fade_duration: Duration::from_millis(300),
            background: None,
        }
    }
}

impl SpotlightConfig {
    /// Defaults overridden by whatever `SPOTLIGHT_*` variables are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(v) = lookup("SPOTLIGHT_OVERLAY_COLOR") {
            cfg.overlay_color = parse_color(&v)?;
        }
        if let Some(v) = lookup("SPOTLIGHT_WIDTH") {
            cfg.width = parse_positive("SPOTLIGHT_WIDTH", &v)?;
        }
        if let Some(v) = lookup("SPOTLIGHT_HEIGHT") {
            cfg.height = parse_positive("SPOTLIGHT_HEIGHT", &v)?;
        }
        if let Some(v) = lookup("SPOTLIGHT_FADE_MS") {
            let ms: u64 = parse_value("SPOTLIGHT_FADE_MS", &v)?;
            cfg.fade_duration = Duration::from_millis(ms);
        }
        if let Some(v) = lookup("SPOTLIGHT_BACKGROUND") {
            if !v.trim().is_empty() {
                cfg.background = Some(PathBuf::from(v));
            }
        }
        Ok(cfg)
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| Error::InvalidConfig { key, value: raw.to_string() })
}

fn parse_positive(key: &'static str, raw: &str) -> Result<usize> {
    match parse_value::<usize>(key, raw)? {
        0 => Err(Error::InvalidConfig { key, value: raw.to_string() }),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = SpotlightConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, SpotlightConfig::default());
    }

    #[test]
    fn overrides_apply() {
        let cfg = SpotlightConfig::from_lookup(lookup(&[
            ("SPOTLIGHT_OVERLAY_COLOR", "#80112233"),
            ("SPOTLIGHT_WIDTH", "320"),
            ("SPOTLIGHT_HEIGHT", " 240 "),
            ("SPOTLIGHT_FADE_MS", "0"),
            ("SPOTLIGHT_BACKGROUND", "shot.png"),
        ]))
        .unwrap();
        assert_eq!(cfg.overlay_color, 0x8011_2233);
        assert_eq!((cfg.width, cfg.height), (320, 240));
        assert_eq!(cfg.fade_duration, Duration::ZERO);
        assert_eq!(cfg.background, Some(PathBuf::from("shot.png")));
    }

    #[test]
    fn bad_values_name_their_key() {
        let err = SpotlightConfig::from_lookup(lookup(&[("SPOTLIGHT_WIDTH", "0")])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { key: "SPOTLIGHT_WIDTH", .. }));

        let err = SpotlightConfig::from_lookup(lookup(&[("SPOTLIGHT_FADE_MS", "soon")])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { key: "SPOTLIGHT_FADE_MS", .. }));

        let err = SpotlightConfig::from_lookup(lookup(&[("SPOTLIGHT_OVERLAY_COLOR", "red")])).unwrap_err();
        assert!(matches!(err, Error::InvalidColor(_)));
    }
}
