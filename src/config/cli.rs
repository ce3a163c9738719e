use crate::domain::model::Point3D;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "femoral-head")]
#[command(about = "Femoral head sphere fitting and AR coordinate publishing")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = "femoral-head.toml")]
    pub config: PathBuf,

    /// Override the session file from the config
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines on stderr")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Segment the femur from a CT volume with TotalSegmentator
    Segment {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Fit a sphere from a center point and a surface point ("x,y,z")
    Fit {
        #[arg(long, allow_hyphen_values = true)]
        center: Point3D,

        #[arg(long, allow_hyphen_values = true)]
        surface: Point3D,

        /// Publish right after a successful fit
        #[arg(long)]
        publish: bool,
    },

    /// Send the last fitted sphere to the coordinates endpoint
    Publish,

    /// Print the last fitted sphere and the payload that would be sent
    Show,
}
