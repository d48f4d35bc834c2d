use super::types::IncomeResult;

const DAYS_PER_YEAR: f64 = 365.0;

/// Net of tax income for `amount` earning `rate_percent` a year.
///
/// Inputs are not validated: negative amounts or rates pass straight through.
pub fn calc_income(amount: f64, rate_percent: f64, tax_percent: f64) -> IncomeResult {
    let annual = amount * (rate_percent / 100.0);
    let daily = annual / DAYS_PER_YEAR;
    let tax_multiplier = 1.0 - tax_percent / 100.0;

    IncomeResult {
        daily: daily * tax_multiplier,
        income30: daily * 30.0 * tax_multiplier,
        income31: daily * 31.0 * tax_multiplier,
    }
}
