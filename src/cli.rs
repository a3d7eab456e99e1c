use clap::Parser;
use std::path::PathBuf;

/// Load a form catalog and mount a selected form into an in-memory page
#[derive(Parser, Debug, Clone)]
#[command(name = "formselect", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "FORMSELECT_CONFIG", default_value = "formselect.toml")]
    pub config: PathBuf,

    /// Catalog source URL
    #[arg(long, env = "FORMSELECT_DATA_URL")]
    pub data_url: Option<String>,

    /// Field holding each form's identifier
    #[arg(long)]
    pub value_property: Option<String>,

    /// Field used as each option's display text
    #[arg(long)]
    pub search_field: Option<String>,

    /// Id of the element the selected form is mounted into
    #[arg(long)]
    pub container: Option<String>,

    /// Form identifier to select after the catalog is loaded
    #[arg(short, long)]
    pub select: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["formselect"]);
        assert_eq!(cli.config, PathBuf::from("formselect.toml"));
        assert!(cli.data_url.is_none());
        assert!(cli.container.is_none());
        assert!(cli.select.is_none());
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "formselect",
            "--config",
            "custom.toml",
            "--data-url",
            "http://localhost:8080/forms",
            "--container",
            "preview",
            "-s",
            "f2",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.data_url.as_deref(), Some("http://localhost:8080/forms"));
        assert_eq!(cli.container.as_deref(), Some("preview"));
        assert_eq!(cli.select.as_deref(), Some("f2"));
    }
}
