// Session settings: the severity comes from the command line, the rest are fixed.

use clap::Parser;
use glaucoma_sim::filter::DEFAULT_DARKNESS;
use glaucoma_sim::preset::Severity;

/// Simulate glaucoma visual-field loss on a live webcam feed.
#[derive(Parser, Debug)]
#[command(name = "glaucoma-sim", version)]
pub struct Cli {
    /// Disease stage: MILD, MODERATE, SEVERE or EXTREME.
    #[arg(short, long, default_value = "MILD")]
    pub level: Severity,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub level: Severity,
    /// Camera indices tried in order (1 is usually a USB cam, 0 the built-in one).
    pub camera_indices: Vec<u32>,
    pub requested_width: u32,
    pub requested_height: u32,
    pub fps: u32,
    pub window_title: String,
    pub darkness: f32,
    pub mirror: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Severity::Mild,
            camera_indices: vec![1, 0],
            requested_width: 640,
            requested_height: 480,
            fps: 30,
            window_title: "Glaucoma Simulation".to_string(),
            darkness: DEFAULT_DARKNESS,
            mirror: true,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self { level: cli.level, ..Self::default() }
    }
}
