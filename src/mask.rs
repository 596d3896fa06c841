//! Keystroke mask for `MM:SS` inputs.
//!
//! Two shapes are accepted: `0d:dd` (a fixed leading zero for single-digit
//! minutes) and `dd:dd`. Three typed digits use the first, four the second,
//! so typing `530` shows `05:30` and a fourth digit turns it into `53:01`.

const MAX_DIGITS: usize = 4;

/// Position of the fixed `:` separator, counted in displayed digits.
const SEPARATOR_AT: usize = 2;

/// Format typed digits into the displayed value.
fn format_digits(typed: &str) -> String {
    let shown = if typed.len() == MAX_DIGITS - 1 {
        format!("0{}", typed)
    } else {
        typed.to_string()
    };

    let mut out = String::with_capacity(MAX_DIGITS + 1);
    for (i, c) in shown.chars().enumerate() {
        if i == SEPARATOR_AT {
            out.push(':');
        }
        out.push(c);
    }
    out
}

fn ascii_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Mask a value typed from scratch, e.g. pasted text.
///
/// Non-digits are dropped and at most four digits are kept. The `:` is only
/// inserted once a digit follows it.
pub fn apply_time_mask(raw: &str) -> String {
    TimeMask::default().update(raw)
}

/// Mask state of one input across keystrokes.
///
/// The displayed value may carry a padding zero the user never typed, so the
/// typed digits are tracked separately to tell the two apart on the next
/// keystroke.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeMask {
    typed: String,
}

impl TimeMask {
    fn padded(&self) -> bool {
        self.typed.len() == MAX_DIGITS - 1
    }

    /// Take the input's new raw value and return what it should display.
    pub fn update(&mut self, raw: &str) -> String {
        let mut digits = ascii_digits(raw);
        // Drop the padding zero shown in front of three typed digits
        if self.padded() && digits.starts_with('0') {
            digits.remove(0);
        }
        digits.truncate(MAX_DIGITS);
        self.typed = digits;
        format_digits(&self.typed)
    }
}
