use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "portfolio-dashboard")]
#[command(author, version, about = "Multipage data analysis dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Settings file (JSON)
    #[arg(long, global = true, default_value = "settings.json")]
    pub settings: PathBuf,

    /// Directory holding the page datasets, overriding the settings file
    #[arg(long, global = true)]
    pub datasets: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Open the dashboard window
    Gui,
    /// List the registered page titles
    List,
    /// Render one page to the terminal
    Show {
        /// Page title; defaults to the first page
        #[arg(long)]
        page: Option<String>,
        /// Print the rendered blocks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render one page to a directory of markdown and PNG files
    Export {
        /// Page title; defaults to the first page
        #[arg(long)]
        page: Option<String>,
        /// Output directory
        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_command_means_gui() {
        let cli = Cli::try_parse_from(["portfolio-dashboard"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.settings, PathBuf::from("settings.json"));
        assert!(!cli.verbose);
    }

    #[test]
    fn show_with_page_and_global_flags() {
        let cli = Cli::try_parse_from([
            "portfolio-dashboard",
            "show",
            "--page",
            "Profile",
            "--json",
            "--datasets",
            "data",
            "-v",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Show {
                page: Some("Profile".into()),
                json: true
            })
        );
        assert_eq!(cli.datasets, Some(PathBuf::from("data")));
        assert!(cli.verbose);
    }

    #[test]
    fn export_requires_out() {
        assert!(Cli::try_parse_from(["portfolio-dashboard", "export"]).is_err());
    }
}
