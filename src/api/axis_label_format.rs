use serde::{Deserialize, Serialize};

/// Decimal and grouping separators used for label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelLocale {
    /// `.` decimal point, no grouping; used on the axes.
    #[default]
    EnUs,
    /// `,` decimal comma, `.` thousands grouping; used on end labels.
    NlNl,
}

/// Value formatting of one chart's vertical axis and end labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// Thousands of euros shown as billions (`€5.1mrd`).
    EuroBillions,
    /// Counts shown in thousands on the axis (`640k`).
    Thousands,
    /// Percentages (`25%`).
    Percent,
}

impl ValueFormat {
    /// Text of a vertical-axis tick.
    #[must_use]
    pub fn axis_label(self, value: f64) -> String {
        if !value.is_finite() {
            return "nan".to_owned();
        }
        match self {
            Self::EuroBillions => format!(
                "€{}mrd",
                format_decimal(value / 1_000_000.0, 1, LabelLocale::EnUs)
            ),
            Self::Thousands => {
                format!("{}k", format_decimal(value / 1_000.0, 0, LabelLocale::EnUs))
            }
            Self::Percent => format!("{}%", format_decimal(value, 0, LabelLocale::EnUs)),
        }
    }

    /// Text of a series end label, in the article's Dutch notation.
    #[must_use]
    pub fn end_label(self, value: f64) -> String {
        if !value.is_finite() {
            return "nan".to_owned();
        }
        match self {
            Self::EuroBillions => format!(
                "€{} mrd",
                format_decimal(value / 1_000_000.0, 1, LabelLocale::NlNl)
            ),
            Self::Thousands => format_decimal(value, 0, LabelLocale::NlNl),
            Self::Percent => format!("{}%", format_decimal(value, 1, LabelLocale::NlNl)),
        }
    }
}

/// Year ticks on the horizontal axis (`2015`, never `2,015` or `2015.0`).
#[must_use]
pub fn format_year_label(year: f64) -> String {
    if !year.is_finite() {
        return "nan".to_owned();
    }
    format!("{}", year.round() as i64)
}

#[must_use]
pub fn format_decimal(value: f64, precision: usize, locale: LabelLocale) -> String {
    let text = format!("{value:.precision$}");
    match locale {
        LabelLocale::EnUs => text,
        LabelLocale::NlNl => {
            let (sign, unsigned) = match text.strip_prefix('-') {
                Some(rest) => ("-", rest),
                None => ("", text.as_str()),
            };
            let (integer, fraction) = match unsigned.split_once('.') {
                Some((integer, fraction)) => (integer, Some(fraction)),
                None => (unsigned, None),
            };
            let mut out = String::with_capacity(text.len() + integer.len() / 3);
            out.push_str(sign);
            out.push_str(&group_thousands(integer, '.'));
            if let Some(fraction) = fraction {
                out.push(',');
                out.push_str(fraction);
            }
            out
        }
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}
