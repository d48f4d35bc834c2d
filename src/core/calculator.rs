use serde::{Deserialize, Serialize};
use tracing::debug;

use super::income::calc_income;
use super::input::{parse_amount_text, parse_percent_text};
use super::slider::{slider_step, snap_slider_value};
use super::types::{AllocationState, Derived, RateConfig};

/// One user edit. Text variants carry the raw field contents.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum InputEvent {
    TotalText(String),
    FixedText(String),
    SavingsText(String),
    FixedRate(String),
    SavingsRate(String),
    IncomeTax(String),
    Slider(u64),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Outcome {
    Applied,
    Ignored { reason: String },
}

impl Outcome {
    fn ignored(reason: impl Into<String>) -> Self {
        Outcome::Ignored {
            reason: reason.into(),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// View state of the calculator screen.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Calculator {
    allocation: AllocationState,
    rates: RateConfig,
}

impl Calculator {
    pub fn new(allocation: AllocationState, rates: RateConfig) -> Self {
        Self { allocation, rates }
    }

    pub fn allocation(&self) -> AllocationState {
        self.allocation
    }

    pub fn rates(&self) -> RateConfig {
        self.rates
    }

    /// Applies one edit. Out-of-range amounts and unparseable percentages
    /// leave the state untouched.
    pub fn apply(&mut self, event: InputEvent) -> Outcome {
        let outcome = match event {
            InputEvent::TotalText(text) => {
                self.allocation.set_total(parse_amount_text(&text));
                Outcome::Applied
            }
            InputEvent::FixedText(text) => {
                let fixed = parse_amount_text(&text);
                if self.allocation.try_set_fixed(fixed) {
                    Outcome::Applied
                } else {
                    Outcome::ignored(format!(
                        "fixed amount {fixed} exceeds total {}",
                        self.allocation.total()
                    ))
                }
            }
            InputEvent::SavingsText(text) => {
                let savings = parse_amount_text(&text);
                match self.allocation.total().checked_sub(savings) {
                    Some(fixed) if self.allocation.try_set_fixed(fixed) => Outcome::Applied,
                    _ => Outcome::ignored(format!(
                        "savings amount {savings} exceeds total {}",
                        self.allocation.total()
                    )),
                }
            }
            InputEvent::FixedRate(text) => {
                set_percent(&mut self.rates.fixed_rate, "fixedRate", &text)
            }
            InputEvent::SavingsRate(text) => {
                set_percent(&mut self.rates.savings_rate, "savingsRate", &text)
            }
            InputEvent::IncomeTax(text) => {
                set_percent(&mut self.rates.income_tax, "incomeTax", &text)
            }
            InputEvent::Slider(value) => {
                let total = self.allocation.total();
                let fixed = snap_slider_value(value, total, slider_step(total));
                if self.allocation.try_set_fixed(fixed) {
                    Outcome::Applied
                } else {
                    Outcome::ignored(format!("slider value {fixed} exceeds total {total}"))
                }
            }
        };

        if let Outcome::Ignored { reason } = &outcome {
            debug!(%reason, "input ignored");
        }
        outcome
    }

    /// Recomputes every derived figure from the current state.
    pub fn derive(&self) -> Derived {
        let state = &self.allocation;
        let rates = &self.rates;
        let savings = state.savings();
        let fixed_income = calc_income(state.fixed() as f64, rates.fixed_rate, rates.income_tax);
        let savings_income = calc_income(savings as f64, rates.savings_rate, rates.income_tax);

        Derived {
            savings,
            slider_step: slider_step(state.total()),
            fixed_income,
            savings_income,
            total_income: fixed_income + savings_income,
        }
    }
}

fn set_percent(slot: &mut f64, field: &'static str, text: &str) -> Outcome {
    match parse_percent_text(field, text) {
        Ok(value) => {
            *slot = value;
            Outcome::Applied
        }
        Err(err) => Outcome::ignored(err.to_string()),
    }
}
