/// Number formatting rules shared by every rendered view.
///
/// Instances are immutable; the two used by the crate live in statics.
/// Rounding is half away from zero on the exact value, as `Intl.NumberFormat`
/// does, not the ties-to-even of `format!`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NumberFormat {
    pub group_separator: char,
    pub decimal_separator: char,
    pub fraction_digits: usize,
}

/// ru-RU style money: `1 000 000,00` with U+00A0 between digit groups.
pub static MONEY: NumberFormat = NumberFormat {
    group_separator: '\u{a0}',
    decimal_separator: ',',
    fraction_digits: 2,
};

/// en-US style whole amounts shown inside the text inputs: `1,000,000`.
pub static AMOUNT_INPUT: NumberFormat = NumberFormat {
    group_separator: ',',
    decimal_separator: '.',
    fraction_digits: 0,
};

/// A finite `f64` never has more fraction digits than this, so printing at
/// this precision gives its exact decimal expansion.
const EXACT_FRACTION_DIGITS: usize = 1074;

impl NumberFormat {
    pub fn format(&self, value: f64) -> String {
        let sign = if value.is_sign_negative() { "-" } else { "" };
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return format!("{sign}\u{221e}");
        }

        let (int_part, frac_part) = round_half_expand(value, self.fraction_digits);
        let mut out = String::with_capacity(int_part.len() * 2 + frac_part.len() + 2);
        out.push_str(sign);
        out.push_str(&group_digits(&int_part, self.group_separator));
        if !frac_part.is_empty() {
            out.push(self.decimal_separator);
            out.push_str(&frac_part);
        }
        out
    }

    /// Exact formatting for whole amounts, without a round trip through `f64`.
    pub fn format_whole(&self, value: u64) -> String {
        let mut out = group_digits(&value.to_string(), self.group_separator);
        if self.fraction_digits > 0 {
            out.push(self.decimal_separator);
            out.extend(std::iter::repeat_n('0', self.fraction_digits));
        }
        out
    }
}

/// Rounds `|value|` to `digits` fraction digits, ties away from zero.
/// Returns the integer and fraction digit strings.
fn round_half_expand(value: f64, digits: usize) -> (String, String) {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let round_up = frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5');

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(digits))
        .collect();
    if round_up {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let frac = kept.split_off(kept.len() - digits);
    (
        kept.into_iter().map(char::from).collect(),
        frac.into_iter().map(char::from).collect(),
    )
}

/// `Number.prototype.toFixed`: plain digits, `.` separator, ties away from zero.
fn to_fixed(value: f64, digits: usize) -> String {
    let (int_part, frac_part) = round_half_expand(value, digits);
    let sign = if value < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Share of `part` in `total` as a percent label without the `%` sign.
///
/// Shares under 0.1% get three decimals so they don't read as zero.
pub fn share_percent_label(part: u64, total: u64) -> String {
    if total == 0 {
        return "0".to_string();
    }
    let pct = (part as f64 / total as f64) * 100.0;
    if pct >= 0.1 {
        to_fixed(pct, 1)
    } else {
        to_fixed(pct, 3)
    }
}
