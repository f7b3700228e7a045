use chrono::NaiveDate;

/// Documents expiring in fewer days than this are flagged.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

pub const PLACEHOLDER: &str = "\u{2014}";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeVariant {
    Primary,
    Secondary,
    Success,
    Warning,
    Error,
    Neutral,
}

impl BadgeVariant {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeVariant::Primary => "badge badge-primary",
            BadgeVariant::Secondary => "badge badge-secondary",
            BadgeVariant::Success => "badge badge-success",
            BadgeVariant::Warning => "badge badge-warning",
            BadgeVariant::Error => "badge badge-error",
            BadgeVariant::Neutral => "badge badge-neutral",
        }
    }
}

/// Whole days from `today` until `date`; negative once it has passed.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// True when `date` is still ahead of `today` but within the warning window.
/// Already-expired documents are not "expiring soon".
pub fn is_expiring_soon(date: Option<NaiveDate>, today: NaiveDate) -> bool {
    match date {
        Some(d) => {
            let days = days_until(d, today);
            days > 0 && days < EXPIRY_WARNING_DAYS
        }
        None => false,
    }
}

pub fn is_expired(date: Option<NaiveDate>, today: NaiveDate) -> bool {
    date.is_some_and(|d| d < today)
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Rupee amount with thousands separators and two decimals, e.g. `₹12,450.50`.
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "{}\u{20B9}{grouped}.{fraction:02}",
        if negative { "-" } else { "" }
    )
}

/// Quantities drop the fraction when it is zero: `12 KG`, `12.5 KG`.
pub fn format_quantity(value: f64) -> String {
    if value == value.trunc() {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn expiring_soon_window_is_exclusive() {
        let today = day(2026, 3, 1);

        assert!(!is_expiring_soon(Some(today), today));
        assert!(is_expiring_soon(Some(day(2026, 3, 2)), today));
        assert!(is_expiring_soon(Some(day(2026, 3, 30)), today));
        assert!(!is_expiring_soon(Some(day(2026, 3, 31)), today));
        assert!(!is_expiring_soon(Some(day(2026, 2, 20)), today));
        assert!(!is_expiring_soon(None, today));
    }

    #[test]
    fn expired_only_after_the_date() {
        let today = day(2026, 3, 1);
        assert!(is_expired(Some(day(2026, 2, 28)), today));
        assert!(!is_expired(Some(today), today));
        assert!(!is_expired(None, today));
    }

    #[test]
    fn amount_grouping() {
        assert_eq!(format_amount(0.0), "\u{20B9}0.00");
        assert_eq!(format_amount(999.5), "\u{20B9}999.50");
        assert_eq!(format_amount(1234567.891), "\u{20B9}1,234,567.89");
        assert_eq!(format_amount(-1500.0), "-\u{20B9}1,500.00");
    }

    #[test]
    fn placeholder_for_blank_values() {
        assert_eq!(or_placeholder(None), PLACEHOLDER);
        assert_eq!(or_placeholder(Some("  ")), PLACEHOLDER);
        assert_eq!(or_placeholder(Some("MH12AB1234")), "MH12AB1234");
        assert_eq!(format_date(Some(day(2026, 1, 5))), "05 Jan 2026");
    }

    #[test]
    fn quantity_trims_zero_fraction() {
        assert_eq!(format_quantity(12.0), "12");
        assert_eq!(format_quantity(12.5), "12.5");
    }
}
