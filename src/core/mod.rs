mod calculator;
mod format;
mod income;
mod input;
mod slider;
mod types;
mod view;

pub use calculator::{Calculator, InputEvent, Outcome};
pub use format::{AMOUNT_INPUT, MONEY, NumberFormat, share_percent_label};
pub use income::calc_income;
pub use input::{parse_amount_text, parse_percent_text};
pub use slider::{half_total, slider_step, snap_slider_value};
pub use types::{
    Allocation, AllocationState, DEFAULT_FIXED, DEFAULT_FIXED_RATE, DEFAULT_INCOME_TAX,
    DEFAULT_SAVINGS_RATE, DEFAULT_TOTAL, Derived, IncomeResult, RateConfig,
};
pub use view::{FooterView, RowView, SliderView, SummaryView, TABLE_HEADERS};
