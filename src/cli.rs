// cli.rs - Command-line interface configuration
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ShowcaseConfig;
use crate::geometry::FragmentProfile;

#[derive(Parser, Debug, Clone)]
#[command(name = "trophy-showcase")]
#[command(about = "Shattered trophy, hologram point cloud and contact endpoint", long_about = None)]
pub struct Cli {
    /// JSON settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render the fragmented trophy (default)
    Trophy(TrophyArgs),
    /// Render the hologram point cloud
    Hologram(HologramArgs),
    /// Validate a contact form submission and print the reply
    Contact(ContactArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct TrophyArgs {
    #[arg(long)]
    pub body: Option<PathBuf>,

    #[arg(long)]
    pub plinth: Option<PathBuf>,

    /// `shatter` or `flat`
    #[arg(long)]
    pub profile: Option<FragmentProfile>,

    #[arg(long)]
    pub seed: Option<u64>,
}

impl TrophyArgs {
    /// Command-line values win over the file
    pub fn apply(&self, config: &mut ShowcaseConfig) {
        if let Some(body) = &self.body {
            config.body_asset = body.clone();
        }
        if let Some(plinth) = &self.plinth {
            config.plinth_asset = plinth.clone();
        }
        if let Some(profile) = self.profile {
            config.fragment_profile = profile;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct HologramArgs {
    /// Directory of video frames (png/jpeg) played in a loop
    #[arg(long)]
    pub frames: Option<PathBuf>,

    #[arg(long)]
    pub fps: Option<f32>,
}

impl HologramArgs {
    pub fn apply(&self, config: &mut ShowcaseConfig) {
        if let Some(frames) = &self.frames {
            config.hologram_frames = Some(frames.clone());
        }
        if let Some(fps) = self.fps {
            config.hologram_fps = fps;
        }
    }
}

#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ContactArgs {
    /// Request body as a JSON string
    #[arg(long)]
    pub json: Option<String>,

    /// Read the request body from a file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["trophy-showcase"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn trophy_overrides_config() {
        let cli = Cli::try_parse_from([
            "trophy-showcase",
            "trophy",
            "--profile",
            "flat",
            "--seed",
            "3",
            "--body",
            "b.glb",
        ])
        .unwrap();
        let Some(Command::Trophy(args)) = cli.command else {
            panic!("expected trophy subcommand");
        };

        let mut config = ShowcaseConfig::default();
        args.apply(&mut config);
        assert_eq!(config.fragment_profile, FragmentProfile::Flat);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.body_asset, PathBuf::from("b.glb"));
        assert_eq!(config.plinth_asset, ShowcaseConfig::default().plinth_asset);
    }

    #[test]
    fn contact_needs_exactly_one_source() {
        assert!(Cli::try_parse_from(["trophy-showcase", "contact"]).is_err());
        assert!(Cli::try_parse_from(["trophy-showcase", "contact", "--json", "{}", "--file", "x"]).is_err());
        assert!(Cli::try_parse_from(["trophy-showcase", "contact", "--json", "{}"]).is_ok());
    }

    #[test]
    fn hologram_frames_override_config() {
        let cli = Cli::try_parse_from(["trophy-showcase", "hologram", "--frames", "clip", "--fps", "24"]).unwrap();
        let Some(Command::Hologram(args)) = cli.command else {
            panic!("expected hologram subcommand");
        };

        let mut config = ShowcaseConfig::default();
        args.apply(&mut config);
        assert_eq!(config.hologram_frames, Some(PathBuf::from("clip")));
        assert_eq!(config.hologram_fps, 24.0);
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["trophy-showcase", "hologram", "--config", "c.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
    }
}
