//! Command-line and environment configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Args, Parser, Subcommand};

use crate::quiz_engine::{
    ConfigError, DigitLevel, DisplayFormat, GenerationConfig, Operator,
};

#[derive(Debug, Parser)]
#[command(name = "equationator", version, about = "Arithmetic quiz server and equation generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the quiz page and its JSON API
    Serve(ServeArgs),

    /// Print generated questions as JSON
    Drill(DrillArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "EQUATIONATOR_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "EQUATIONATOR_PORT", default_value_t = 3000)]
    pub port: u16,
}

impl ServeArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, Args)]
pub struct DrillArgs {
    /// Digit level: 1, 2, 3 or 4
    #[arg(long, default_value = "2")]
    pub digit_level: DigitLevel,

    /// Operands per equation (division always uses 2)
    #[arg(long, default_value_t = 2)]
    pub param_count: usize,

    /// Operator: + - * /
    #[arg(long, default_value = "+", allow_hyphen_values = true)]
    pub operator: Operator,

    /// Number of questions to print
    #[arg(long, default_value_t = 5)]
    pub count: usize,

    /// Seed for reproducible output; question i uses seed + i
    #[arg(long)]
    pub seed: Option<u64>,

    /// Layout: horizontal, vertical, both
    #[arg(long, default_value = "horizontal", value_parser = parse_display_format)]
    pub format: DisplayFormat,
}

impl DrillArgs {
    pub fn generation_config(&self) -> Result<GenerationConfig, ConfigError> {
        GenerationConfig::new(self.digit_level, self.param_count, self.operator)
    }
}

fn parse_display_format(s: &str) -> Result<DisplayFormat, String> {
    match s {
        "horizontal" => Ok(DisplayFormat::Horizontal),
        "vertical"   => Ok(DisplayFormat::Vertical),
        "both"       => Ok(DisplayFormat::Both),
        other => Err(format!("unknown layout '{other}' (expected horizontal, vertical, both)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["equationator", "serve"]).unwrap();
        let Command::Serve(args) = cli.command else { panic!("expected serve") };
        assert_eq!(args.addr(), "127.0.0.1:3000".parse().unwrap());
    }

    #[test]
    fn drill_parses_closed_enums() {
        let cli = Cli::try_parse_from([
            "equationator", "drill", "--digit-level", "3", "--operator", "-",
            "--param-count", "4", "--format", "both", "--seed", "9",
        ])
        .unwrap();
        let Command::Drill(args) = cli.command else { panic!("expected drill") };
        assert_eq!(args.digit_level, DigitLevel::Large);
        assert_eq!(args.operator, Operator::Subtract);
        assert_eq!(args.format, DisplayFormat::Both);
        assert_eq!(args.seed, Some(9));
        assert!(args.generation_config().is_ok());
    }

    #[test]
    fn drill_rejects_unknown_digit_level() {
        assert!(Cli::try_parse_from(["equationator", "drill", "--digit-level", "5"]).is_err());
    }

    #[test]
    fn drill_division_with_three_operands_is_rejected_before_generation() {
        let cli = Cli::try_parse_from([
            "equationator", "drill", "--operator", "/", "--param-count", "3",
        ])
        .unwrap();
        let Command::Drill(args) = cli.command else { panic!("expected drill") };
        assert_eq!(args.generation_config(), Err(ConfigError::DivisionArity(3)));
    }
}
