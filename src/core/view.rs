use serde::Serialize;

use super::calculator::Calculator;
use super::format::{AMOUNT_INPUT, MONEY, share_percent_label};
use super::types::{Allocation, IncomeResult};

pub const TABLE_HEADERS: [&str; 6] = [
    "Who",
    "Amount",
    "Rate",
    "Net daily profit (after tax)",
    "30d (after tax)",
    "31d (after tax)",
];

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub total_input: String,
    pub income_tax: f64,
    pub slider: SliderView,
    pub rows: Vec<RowView>,
    pub footer: FooterView,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderView {
    pub min: u64,
    pub max: u64,
    pub step: u64,
    pub value: u64,
    pub fixed_label: String,
    pub savings_label: String,
    pub step_label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub who: Allocation,
    pub amount_input: String,
    pub rate: f64,
    pub daily: String,
    pub income30: String,
    pub income31: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterView {
    pub amount: String,
    pub daily: String,
    pub income30: String,
    pub income31: String,
}

impl SummaryView {
    pub fn build(calc: &Calculator) -> Self {
        let state = calc.allocation();
        let rates = calc.rates();
        let derived = calc.derive();
        let total = state.total();

        let rows = Allocation::ALL
            .into_iter()
            .map(|who| {
                let (amount, rate) = match who {
                    Allocation::Fixed => (state.fixed(), rates.fixed_rate),
                    Allocation::Savings => (derived.savings, rates.savings_rate),
                };
                let [daily, income30, income31] = money_columns(derived.income(who));
                RowView {
                    who,
                    amount_input: AMOUNT_INPUT.format_whole(amount),
                    rate,
                    daily,
                    income30,
                    income31,
                }
            })
            .collect();

        let [daily, income30, income31] = money_columns(derived.total_income);

        SummaryView {
            total_input: AMOUNT_INPUT.format_whole(total),
            income_tax: rates.income_tax,
            slider: SliderView {
                min: 0,
                max: total,
                step: derived.slider_step,
                value: state.fixed(),
                fixed_label: format!(
                    "Fixed: {} ({}%)",
                    MONEY.format_whole(state.fixed()),
                    share_percent_label(state.fixed(), total)
                ),
                savings_label: format!(
                    "Savings: {} ({}%)",
                    MONEY.format_whole(derived.savings),
                    share_percent_label(derived.savings, total)
                ),
                step_label: format!("Step: {}", MONEY.format_whole(derived.slider_step)),
            },
            rows,
            footer: FooterView {
                amount: MONEY.format_whole(total),
                daily,
                income30,
                income31,
            },
        }
    }

    /// Plain-text table for terminals, columns padded to the widest cell.
    pub fn render_text(&self) -> String {
        let mut table: Vec<[String; 6]> = Vec::with_capacity(self.rows.len() + 2);
        table.push(TABLE_HEADERS.map(str::to_string));
        for row in &self.rows {
            table.push([
                row.who.label().to_string(),
                row.amount_input.clone(),
                format!("{} %", row.rate),
                row.daily.clone(),
                row.income30.clone(),
                row.income31.clone(),
            ]);
        }
        table.push([
            "Total".to_string(),
            self.footer.amount.clone(),
            String::new(),
            self.footer.daily.clone(),
            self.footer.income30.clone(),
            self.footer.income31.clone(),
        ]);

        let mut widths = [0usize; 6];
        for line in &table {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&format!(
            "Total amount: {}    Income tax: {} %\n",
            self.total_input, self.income_tax
        ));
        out.push_str(&format!(
            "{}    {}    {}\n\n",
            self.slider.fixed_label, self.slider.savings_label, self.slider.step_label
        ));
        let separator_at = table.len() - 1;
        for (i, line) in table.iter().enumerate() {
            if i == separator_at {
                out.push_str(&rule(&widths));
            }
            out.push_str(&format_line(line, &widths));
            if i == 0 {
                out.push_str(&rule(&widths));
            }
        }
        out
    }
}

fn money_columns(income: IncomeResult) -> [String; 3] {
    [
        MONEY.format(income.daily),
        MONEY.format(income.income30),
        MONEY.format(income.income31),
    ]
}

fn format_line(cells: &[String; 6], widths: &[usize; 6]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(col, (cell, width))| {
            let pad = width - cell.chars().count();
            // Who is left aligned, every number column right aligned.
            if col == 0 {
                format!("{cell}{}", " ".repeat(pad))
            } else {
                format!("{}{cell}", " ".repeat(pad))
            }
        })
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}

fn rule(widths: &[usize; 6]) -> String {
    let len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    format!("{}\n", "-".repeat(len))
}
