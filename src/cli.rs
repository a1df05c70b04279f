//! Command line interface

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "regional-tui",
    version,
    about = "Fill and submit Regional Veículos lead forms from the terminal"
)]
pub struct Cli {
    /// Site address (overrides REGIONAL_BASE_URL and the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Anti-forgery token to send instead of fetching one from the page
    #[arg(long, global = true)]
    pub csrf_token: Option<String>,

    /// Prefill a field, e.g. `--set nome="Ana Souza"` (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", global = true, value_parser = parse_assignment)]
    pub assignments: Vec<(String, String)>,

    /// Validate and submit without opening the terminal UI
    #[arg(long, global = true)]
    pub send: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Contact form (/contato/)
    Contato,
    /// Financing request (/financiamento/)
    Financiamento {
        /// Inventory id of the car being financed
        #[arg(long)]
        car_id: Option<u32>,
        /// Car description to prefill (e.g. "Toyota Corolla 2020")
        #[arg(long)]
        car: Option<String>,
    },
    /// Store defaults in the config file
    Config {
        /// Site address to remember
        #[arg(long)]
        base_url: Option<String>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// How long alerts stay visible, in milliseconds
        #[arg(long)]
        alert_timeout_ms: Option<u64>,
    },
}

/// Parse `NAME=VALUE`; the value may itself contain `=`
fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got `{raw}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contact() {
        let cli = Cli::try_parse_from(["regional-tui", "contato"]).unwrap();
        assert!(matches!(cli.command, Commands::Contato));
        assert!(cli.base_url.is_none());
    }

    #[test]
    fn test_parse_financing_with_car() {
        let cli = Cli::try_parse_from([
            "regional-tui",
            "financiamento",
            "--car-id",
            "7",
            "--car",
            "Honda Civic 2019",
            "--base-url",
            "http://localhost:8000",
        ])
        .unwrap();

        match cli.command {
            Commands::Financiamento { car_id, car } => {
                assert_eq!(car_id, Some(7));
                assert_eq!(car.as_deref(), Some("Honda Civic 2019"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8000"));
    }

    #[test]
    fn test_car_id_must_be_numeric() {
        assert!(Cli::try_parse_from(["regional-tui", "financiamento", "--car-id", "abc"]).is_err());
    }

    #[test]
    fn test_assignments_and_send() {
        let cli = Cli::try_parse_from([
            "regional-tui",
            "contato",
            "--set",
            "nome=Ana Souza",
            "--set",
            "mensagem=a=b",
            "--send",
        ])
        .unwrap();

        assert!(cli.send);
        assert_eq!(
            cli.assignments,
            vec![
                ("nome".to_string(), "Ana Souza".to_string()),
                ("mensagem".to_string(), "a=b".to_string()),
            ]
        );
    }

    #[test]
    fn test_assignment_needs_a_name() {
        assert!(Cli::try_parse_from(["regional-tui", "contato", "--set", "=x"]).is_err());
        assert!(Cli::try_parse_from(["regional-tui", "contato", "--set", "nome"]).is_err());
    }

    #[test]
    fn test_command_is_required() {
        assert!(Cli::try_parse_from(["regional-tui"]).is_err());
    }
}
