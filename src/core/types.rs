use std::ops::Add;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOTAL: u64 = 1_000_000;
pub const DEFAULT_FIXED: u64 = 0;
pub const DEFAULT_FIXED_RATE: f64 = 16.5;
pub const DEFAULT_SAVINGS_RATE: f64 = 10.0;
pub const DEFAULT_INCOME_TAX: f64 = 12.0;

/// Split of the total sum between the fixed and savings allocations.
///
/// Always holds `fixed <= total`; savings is derived as `total - fixed`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationState {
    total: u64,
    fixed: u64,
}

impl AllocationState {
    /// Builds a state from untrusted values, clamping `fixed` down to `total`.
    pub fn new(total: u64, fixed: u64) -> Self {
        Self {
            total,
            fixed: fixed.min(total),
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn fixed(&self) -> u64 {
        self.fixed
    }

    pub fn savings(&self) -> u64 {
        self.total - self.fixed
    }

    /// Sets the total and clamps `fixed` if it no longer fits.
    pub(crate) fn set_total(&mut self, total: u64) {
        self.total = total;
        if self.fixed > total {
            self.fixed = total;
        }
    }

    /// Sets `fixed` if it lies within `0..=total`; returns whether it did.
    pub(crate) fn try_set_fixed(&mut self, fixed: u64) -> bool {
        if fixed > self.total {
            return false;
        }
        self.fixed = fixed;
        true
    }
}

impl Default for AllocationState {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL, DEFAULT_FIXED)
    }
}

/// Annual rates and income tax, all in percent.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfig {
    pub fixed_rate: f64,
    pub savings_rate: f64,
    pub income_tax: f64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            fixed_rate: DEFAULT_FIXED_RATE,
            savings_rate: DEFAULT_SAVINGS_RATE,
            income_tax: DEFAULT_INCOME_TAX,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeResult {
    pub daily: f64,
    pub income30: f64,
    pub income31: f64,
}

impl Add for IncomeResult {
    type Output = IncomeResult;

    fn add(self, rhs: Self) -> Self::Output {
        IncomeResult {
            daily: self.daily + rhs.daily,
            income30: self.income30 + rhs.income30,
            income31: self.income31 + rhs.income31,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Allocation {
    Fixed,
    Savings,
}

impl Allocation {
    pub const ALL: [Allocation; 2] = [Allocation::Fixed, Allocation::Savings];

    pub fn label(self) -> &'static str {
        match self {
            Allocation::Fixed => "fixed",
            Allocation::Savings => "savings",
        }
    }
}

/// Everything recomputed from the state after each mutation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Derived {
    pub savings: u64,
    pub slider_step: u64,
    pub fixed_income: IncomeResult,
    pub savings_income: IncomeResult,
    pub total_income: IncomeResult,
}

impl Derived {
    pub fn income(&self, allocation: Allocation) -> IncomeResult {
        match allocation {
            Allocation::Fixed => self.fixed_income,
            Allocation::Savings => self.savings_income,
        }
    }
}
