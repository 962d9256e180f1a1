/*
 *  config.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Layered configuration: defaults, then YAML, then command line
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::display::factory::BackendKind;
use crate::pacer::DEFAULT_FPS;
use crate::settings::{ClockStyle, Settings, SpeedUnit, TemperatureUnit};
use crate::weather::StubWeather;

pub const DEFAULT_TITLE: &str = "BMW OBC";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (800, 480);
pub const DEFAULT_FRAMEBUFFER: &str = "/dev/fb0";

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level configuration. Every field is optional, the accessors
/// supply the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub log_level: Option<String>,     // "info" | "debug" ...
    pub title: Option<String>,         // home page heading
    pub logo: Option<PathBuf>,         // SVG, emblem when absent
    pub state_file: Option<PathBuf>,   // oil timer JSON
    pub sensor_jitter: Option<bool>,
    pub display: Option<DisplayConfig>,
    pub weather: Option<WeatherConfig>,
    pub settings: Option<SettingsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DisplayConfig {
    pub width: Option<u32>,               // windowed size
    pub height: Option<u32>,
    pub fullscreen: Option<bool>,
    pub fps: Option<u32>,
    pub backends: Option<Vec<BackendKind>>,  // probe order
    pub framebuffer: Option<PathBuf>,     // e.g. /dev/fb0
    pub touch_device: Option<PathBuf>,    // e.g. /dev/input/event0
    pub headless_frames: Option<u64>,     // stop after n frames
}

impl DisplayConfig {
    pub fn window_size(&self) -> (u32, u32) {
        (
            self.width.unwrap_or(DEFAULT_WINDOW_SIZE.0),
            self.height.unwrap_or(DEFAULT_WINDOW_SIZE.1),
        )
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen.unwrap_or(false)
    }

    pub fn fps(&self) -> u32 {
        self.fps.unwrap_or(DEFAULT_FPS)
    }

    pub fn backends(&self) -> Vec<BackendKind> {
        self.backends
            .clone()
            .unwrap_or_else(|| vec![BackendKind::Window, BackendKind::Framebuffer, BackendKind::Headless])
    }

    pub fn framebuffer(&self) -> PathBuf {
        self.framebuffer
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FRAMEBUFFER))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WeatherConfig {
    pub city: Option<String>,
    pub temp_f: Option<i32>,
    pub condition: Option<String>,
    pub high_f: Option<i32>,
    pub low_f: Option<i32>,
    pub pop: Option<u8>,
}

/// Start-up values for the in-memory settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SettingsConfig {
    pub temperature_unit: Option<TemperatureUnit>,
    pub speed_unit: Option<SpeedUnit>,
    pub auto_night: Option<bool>,
    pub clock_style: Option<ClockStyle>,
    pub brightness: Option<u8>,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "obc-dash", about = "On-board computer display", version)]
pub struct Cli {
    /// Fill the whole screen
    #[arg(short = 'f', long, action = ArgAction::SetTrue)]
    pub fullscreen: bool,
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Oil timer state file
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub state_file: Option<PathBuf>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn logo(&self) -> Option<&Path> {
        self.logo.as_deref()
    }

    pub fn state_file(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(default_state_file)
    }

    pub fn sensor_jitter(&self) -> bool {
        self.sensor_jitter.unwrap_or(true)
    }

    pub fn display(&self) -> DisplayConfig {
        self.display.clone().unwrap_or_default()
    }

    pub fn weather(&self) -> StubWeather {
        let mut stub = StubWeather::default();
        if let Some(w) = self.weather.as_ref() {
            if let Some(city) = &w.city      { stub.city = city.clone(); }
            if let Some(t) = w.temp_f        { stub.temp_f = t; }
            if let Some(c) = &w.condition    { stub.condition = c.clone(); }
            if let Some(t) = w.high_f        { stub.high_f = t; }
            if let Some(t) = w.low_f         { stub.low_f = t; }
            if let Some(p) = w.pop           { stub.pop = p; }
        }
        stub
    }

    pub fn settings(&self) -> Settings {
        let d = Settings::default();
        let s = self.settings.clone().unwrap_or_default();
        Settings::new(
            s.temperature_unit.unwrap_or(d.temperature_unit),
            s.speed_unit.unwrap_or(d.speed_unit),
            s.auto_night.unwrap_or(d.auto_night),
            s.clock_style.unwrap_or(d.clock_style),
            s.brightness.unwrap_or(d.brightness()),
        )
    }
}

/// `~/.config/obc/state.json`, or the working directory without a home
pub fn default_state_file() -> PathBuf {
    home_dir()
        .map(|home| home.join(".config/obc/state.json"))
        .unwrap_or_else(|| PathBuf::from("obc_state.json"))
}

/// A config file found by the search that could not be used
#[derive(Debug)]
pub struct Skipped {
    pub path: PathBuf,
    pub error: ConfigError,
}

/// The effective config, plus any searched-for file that was passed over.
/// Logging is not up yet while loading, so the caller reports `skipped`.
#[derive(Debug)]
pub struct Loaded {
    pub config: Config,
    pub skipped: Option<Skipped>,
}

/// Build the effective config for already parsed arguments
pub fn load_from(cli: &Cli) -> Result<Loaded, ConfigError> {
    let found = if cli.config.is_none() { find_config_file() } else { None };
    load_with(cli, found)
}

/// Layering: defaults, YAML, CLI overrides, validate. An explicit
/// `--config` must be usable; a file found by the search is skipped when
/// broken so the dashboard still comes up on defaults.
fn load_with(cli: &Cli, found: Option<PathBuf>) -> Result<Loaded, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();
    let mut skipped = None;

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = found {
        let layered = read_yaml(&p).and_then(|y| {
            let mut c = Config::default();
            merge(&mut c, y);
            validate(&c)?;
            Ok(c)
        });
        match layered {
            Ok(c) => cfg = c,
            Err(error) => skipped = Some(Skipped { path: p, error }),
        }
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(Loaded { config: cfg, skipped })
}

/// Pretty YAML of the effective config
pub fn dump(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/obc/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/obc/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/obc.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["obc.yaml", "config/obc.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    // top-level
    if src.log_level.is_some()     { dst.log_level = src.log_level; }
    if src.title.is_some()         { dst.title = src.title; }
    if src.logo.is_some()          { dst.logo = src.logo; }
    if src.state_file.is_some()    { dst.state_file = src.state_file; }
    if src.sensor_jitter.is_some() { dst.sensor_jitter = src.sensor_jitter; }
    // display
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
    match (&mut dst.weather, src.weather) {
        (None, Some(c)) => dst.weather = Some(c),
        (Some(d), Some(s)) => merge_weather(d, s),
        _ => {}
    }
    match (&mut dst.settings, src.settings) {
        (None, Some(c)) => dst.settings = Some(c),
        (Some(d), Some(s)) => merge_settings(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()           { dst.width = src.width; }
    if src.height.is_some()          { dst.height = src.height; }
    if src.fullscreen.is_some()      { dst.fullscreen = src.fullscreen; }
    if src.fps.is_some()             { dst.fps = src.fps; }
    if src.backends.is_some()        { dst.backends = src.backends; }
    if src.framebuffer.is_some()     { dst.framebuffer = src.framebuffer; }
    if src.touch_device.is_some()    { dst.touch_device = src.touch_device; }
    if src.headless_frames.is_some() { dst.headless_frames = src.headless_frames; }
}

fn merge_weather(dst: &mut WeatherConfig, src: WeatherConfig) {
    if src.city.is_some()      { dst.city = src.city; }
    if src.temp_f.is_some()    { dst.temp_f = src.temp_f; }
    if src.condition.is_some() { dst.condition = src.condition; }
    if src.high_f.is_some()    { dst.high_f = src.high_f; }
    if src.low_f.is_some()     { dst.low_f = src.low_f; }
    if src.pop.is_some()       { dst.pop = src.pop; }
}

fn merge_settings(dst: &mut SettingsConfig, src: SettingsConfig) {
    if src.temperature_unit.is_some() { dst.temperature_unit = src.temperature_unit; }
    if src.speed_unit.is_some()       { dst.speed_unit = src.speed_unit; }
    if src.auto_night.is_some()       { dst.auto_night = src.auto_night; }
    if src.clock_style.is_some()      { dst.clock_style = src.clock_style; }
    if src.brightness.is_some()       { dst.brightness = src.brightness; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()  { cfg.log_level = cli.log_level.clone(); }
    if cli.state_file.is_some() { cfg.state_file = cli.state_file.clone(); }
    // -f only ever switches fullscreen on, the YAML can still ask for it
    if cli.fullscreen {
        cfg.display.get_or_insert_with(DisplayConfig::default).fullscreen = Some(true);
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(level) = cfg.log_level.as_deref() {
        if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!("unknown log_level: {level}")));
        }
    }
    if let Some(display) = cfg.display.as_ref() {
        if display.width == Some(0) || display.height == Some(0) {
            return Err(ConfigError::Validation("display width/height must be > 0".into()));
        }
        if let Some(fps) = display.fps {
            if !(1..=240).contains(&fps) {
                return Err(ConfigError::Validation("display fps must be 1..=240".into()));
            }
        }
        if display.backends.as_ref().is_some_and(|b| b.is_empty()) {
            return Err(ConfigError::Validation("display backends must not be empty".into()));
        }
    }
    if let Some(b) = cfg.settings.as_ref().and_then(|s| s.brightness) {
        if b > 100 {
            return Err(ConfigError::Validation("settings brightness must be 0..=100".into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    static SCRATCH: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

    // explicit empty file so the search path never leaks into a test
    fn cli() -> Cli {
        let n = SCRATCH.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Cli {
            config: Some(write_yaml(&format!("empty-{n}"), "{}\n")),
            ..Cli::default()
        }
    }

    fn write_yaml(name: &str, body: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("obc-dash-cfg-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let p = dir.join(format!("{name}.yaml"));
        fs::write(&p, body).unwrap();
        p
    }

    #[test]
    fn test_defaults() {
        let cfg = load_from(&cli()).unwrap().config;
        assert_eq!(cfg.log_level(), "info");
        assert_eq!(cfg.title(), "BMW OBC");
        assert!(cfg.logo().is_none());
        assert_eq!(cfg.settings(), Settings::default());
        let d = cfg.display();
        assert_eq!(d.window_size(), (800, 480));
        assert!(!d.fullscreen());
        assert_eq!(d.fps(), 30);
        assert_eq!(d.backends(), vec![BackendKind::Window, BackendKind::Framebuffer, BackendKind::Headless]);
        assert_eq!(cfg.weather(), StubWeather::default());
    }

    #[test]
    fn test_yaml_sections() {
        let path = write_yaml(
            "full",
            "title: E30 OBC\n\
             display:\n  fps: 20\n  backends: [framebuffer, headless]\n  headless_frames: 5\n\
             weather:\n  city: LEEDS\n  temp_f: 52\n\
             settings:\n  temperature_unit: c\n  clock_style: analog\n  brightness: 40\n",
        );
        let cfg = load_from(&Cli { config: Some(path), ..Cli::default() }).unwrap().config;
        assert_eq!(cfg.title(), "E30 OBC");
        let d = cfg.display();
        assert_eq!(d.fps(), 20);
        assert_eq!(d.backends(), vec![BackendKind::Framebuffer, BackendKind::Headless]);
        assert_eq!(d.headless_frames, Some(5));
        let w = cfg.weather();
        assert_eq!(w.city, "LEEDS");
        assert_eq!(w.temp_f, 52);
        assert_eq!(w.condition, crate::weather::DEFAULT_CONDITION);
        let s = cfg.settings();
        assert_eq!(s.temperature_unit, TemperatureUnit::C);
        assert_eq!(s.clock_style, ClockStyle::Analog);
        assert_eq!(s.speed_unit, SpeedUnit::Mph);
        assert_eq!(s.brightness(), 40);
    }

    #[test]
    fn test_cli_overrides_yaml() {
        let path = write_yaml("override", "log_level: warn\nstate_file: /tmp/a.json\n");
        let cli = Cli {
            config: Some(path),
            fullscreen: true,
            log_level: Some("debug".into()),
            state_file: Some(PathBuf::from("/tmp/b.json")),
            ..Cli::default()
        };
        let cfg = load_from(&cli).unwrap().config;
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.state_file(), PathBuf::from("/tmp/b.json"));
        assert!(cfg.display().fullscreen());
    }

    #[test]
    fn test_short_and_long_fullscreen() {
        assert!(Cli::try_parse_from(["obc-dash", "-f"]).unwrap().fullscreen);
        assert!(Cli::try_parse_from(["obc-dash", "--fullscreen"]).unwrap().fullscreen);
        assert!(!Cli::try_parse_from(["obc-dash"]).unwrap().fullscreen);
    }

    #[test]
    fn test_validation() {
        let bad = [
            ("fps", "display:\n  fps: 0\n"),
            ("size", "display:\n  width: 0\n"),
            ("level", "log_level: loud\n"),
            ("bright", "settings:\n  brightness: 150\n"),
            ("backends", "display:\n  backends: []\n"),
        ];
        for (name, body) in bad {
            let cli = Cli { config: Some(write_yaml(name, body)), ..Cli::default() };
            assert!(matches!(load_from(&cli), Err(ConfigError::Validation(_))), "{name}");
        }
    }

    #[test]
    fn test_missing_explicit_config() {
        let cli = Cli {
            config: Some(std::env::temp_dir().join("obc-dash-no-such.yaml")),
            ..Cli::default()
        };
        assert!(matches!(load_from(&cli), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_broken_searched_config_falls_back() {
        let broken = write_yaml("searched-broken", "display: [unclosed\n");
        let loaded = load_with(&Cli::default(), Some(broken.clone())).unwrap();
        assert_eq!(loaded.config, Config::default());
        let skipped = loaded.skipped.unwrap();
        assert_eq!(skipped.path, broken);
        assert!(matches!(skipped.error, ConfigError::Yaml(_)));

        // parses but fails validation: skipped too, CLI overrides still apply
        let invalid = write_yaml("searched-invalid", "display:\n  fps: 0\n");
        let cli = Cli { fullscreen: true, ..Cli::default() };
        let loaded = load_with(&cli, Some(invalid)).unwrap();
        assert_eq!(loaded.config.display().fps(), DEFAULT_FPS);
        assert!(loaded.config.display().fullscreen());
        assert!(matches!(loaded.skipped, Some(Skipped { error: ConfigError::Validation(_), .. })));
    }

    #[test]
    fn test_broken_explicit_config_is_an_error() {
        let broken = write_yaml("explicit-broken", "display: [unclosed\n");
        let cli = Cli { config: Some(broken), ..Cli::default() };
        assert!(matches!(load_from(&cli), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_searched_config_applies() {
        let found = write_yaml("searched-good", "title: E36 OBC\n");
        let loaded = load_with(&Cli::default(), Some(found)).unwrap();
        assert_eq!(loaded.config.title(), "E36 OBC");
        assert!(loaded.skipped.is_none());
    }

    #[test]
    fn test_bad_yaml() {
        assert!(matches!(parse_yaml("display: [unclosed"), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_dump_round_trips() {
        let mut cfg = Config::default();
        cfg.title = Some("OBC".into());
        let yaml = dump(&cfg).unwrap();
        assert_eq!(parse_yaml(&yaml).unwrap(), cfg);
    }
}
