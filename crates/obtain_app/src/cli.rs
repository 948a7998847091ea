use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use obtain_core::{OutputFormat, View};

/// Terminal client for the obtain video download and conversion service.
#[derive(Debug, Parser)]
#[command(name = "obtain", version, about)]
pub struct Cli {
    /// Base URL of the obtain server.
    #[arg(long, env = "OBTAIN_SERVER", global = true)]
    pub server: Option<String>,

    /// Config file to use instead of the platform default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive terminal UI (the default).
    Ui {
        #[arg(long, value_enum, default_value_t = StartView::Home)]
        view: StartView,
    },
    /// Print the current job list once.
    List,
    /// Submit a video URL for download or conversion.
    Submit {
        url: String,
        /// Convert to this format instead of downloading directly.
        #[arg(long, value_enum, value_name = "FORMAT")]
        convert: Option<FormatArg>,
    },
    /// Retry a failed job.
    Retry {
        #[arg(value_name = "JOB_ID")]
        job_id: String,
    },
    /// Delete a converted file from the server.
    Delete {
        filename: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Download a converted file to a local directory.
    Save {
        filename: String,
        #[arg(long, short, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Show or flip the stored theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommand>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ThemeCommand {
    Show,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StartView {
    Home,
    Conversions,
}

impl From<StartView> for View {
    fn from(view: StartView) -> Self {
        match view {
            StartView::Home => View::Home,
            StartView::Conversions => View::Conversions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Mpg,
    Avi,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Mpg => OutputFormat::Mpg,
            FormatArg::Avi => OutputFormat::Avi,
        }
    }
}
