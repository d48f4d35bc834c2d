use clap::{Args, Parser, Subcommand};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::{info, warn};

use crate::core::{
    AllocationState, Calculator, DEFAULT_FIXED, DEFAULT_FIXED_RATE, DEFAULT_INCOME_TAX,
    DEFAULT_SAVINGS_RATE, DEFAULT_TOTAL, InputEvent, RateConfig, parse_amount_text,
};

#[derive(Parser, Debug)]
#[command(
    name = "deposit-split",
    about = "Split a sum between a fixed deposit and a savings account and compare net interest income"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the interactive calculator page and its JSON API
    Serve(ServeArgs),
    /// Print the income table for one allocation
    Report(ReportArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,
}

impl ServeArgs {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[arg(
        long,
        default_value_t = DEFAULT_TOTAL,
        value_parser = parse_amount_arg,
        help = "Total amount; separators and other non-digits are ignored"
    )]
    pub total: u64,
    #[arg(
        long,
        default_value_t = DEFAULT_FIXED,
        value_parser = parse_amount_arg,
        help = "Amount placed in the fixed deposit, at most --total"
    )]
    pub fixed: u64,
    #[arg(
        long,
        default_value_t = DEFAULT_FIXED_RATE,
        allow_negative_numbers = true,
        help = "Fixed deposit annual rate in percent"
    )]
    pub fixed_rate: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_SAVINGS_RATE,
        allow_negative_numbers = true,
        help = "Savings account annual rate in percent"
    )]
    pub savings_rate: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_INCOME_TAX,
        allow_negative_numbers = true,
        help = "Income tax on interest in percent"
    )]
    pub income_tax: f64,
    #[arg(
        long,
        value_parser = parse_amount_arg,
        help = "Raw slider position; snaps to 0%, 50% or 100% of the total when close"
    )]
    pub slider: Option<u64>,
}

impl ReportArgs {
    pub fn calculator(&self) -> Calculator {
        if self.fixed > self.total {
            warn!(
                fixed = self.fixed,
                total = self.total,
                "--fixed exceeds --total, clamping"
            );
        }
        let mut calc = Calculator::new(
            AllocationState::new(self.total, self.fixed),
            RateConfig {
                fixed_rate: self.fixed_rate,
                savings_rate: self.savings_rate,
                income_tax: self.income_tax,
            },
        );
        if let Some(value) = self.slider {
            if calc.apply(InputEvent::Slider(value)).is_applied() {
                info!(
                    raw = value,
                    fixed = calc.allocation().fixed(),
                    "slider position applied"
                );
            }
        }
        calc
    }
}

fn parse_amount_arg(raw: &str) -> Result<u64, String> {
    if !raw.bytes().any(|b| b.is_ascii_digit()) {
        return Err(format!("'{raw}' contains no digits"));
    }
    Ok(parse_amount_text(raw))
}
