/// Converts an annual percentage into a simple monthly fraction (annual / 100 / 12).
pub fn monthly_rate(annual_percent: f64) -> f64 {
    annual_percent / 100.0 / 12.0
}

/// Fixed monthly payment that amortizes `balance` over `term_years` at
/// `annual_rate_percent`. Zero-rate and zero-term loans are not amortized and
/// yield a payment of 0.
pub fn monthly_payment(balance: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    let rate = monthly_rate(annual_rate_percent);
    let payments = term_years.saturating_mul(12);
    if rate == 0.0 || payments == 0 {
        return 0.0;
    }

    let growth = (1.0 + rate).powf(payments as f64);
    if growth.is_infinite() {
        // Limit of the annuity formula as the term grows: interest only.
        return balance * rate;
    }
    balance * rate * growth / (growth - 1.0)
}

/// Payment as displayed next to the mortgage inputs, in whole currency units.
pub fn payment_preview(balance: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    round_currency(monthly_payment(balance, annual_rate_percent, term_years))
}

/// Rounds to the nearest whole unit with ties toward positive infinity, so
/// -2.5 becomes -2 and 2.5 becomes 3.
pub fn round_currency(value: f64) -> f64 {
    let rounded = value.round();
    // `f64::round` sends ties away from zero; pull negative ties back up.
    if value - rounded == 0.5 {
        rounded + 1.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    #[test]
    fn monthly_payment_matches_standard_annuity() {
        let payment = monthly_payment(250_000.0, 4.5, 25);
        assert_approx_tol(payment, 1_389.581_194_9, 1e-6);
    }

    #[test]
    fn monthly_payment_for_short_loan_matches_known_value() {
        // 100k at 12% over one year.
        let payment = monthly_payment(100_000.0, 12.0, 1);
        assert_approx_tol(payment, 8_884.88, 0.01);
    }

    #[test]
    fn zero_rate_mortgage_has_no_payment() {
        assert_eq!(monthly_payment(250_000.0, 0.0, 25), 0.0);
    }

    #[test]
    fn zero_term_mortgage_has_no_payment() {
        assert_eq!(monthly_payment(250_000.0, 4.5, 0), 0.0);
    }

    #[test]
    fn zero_balance_has_no_payment() {
        assert_eq!(monthly_payment(0.0, 4.5, 25), 0.0);
    }

    #[test]
    fn preview_is_rounded_payment() {
        assert_eq!(payment_preview(250_000.0, 4.5, 25), 1_390.0);
    }

    #[test]
    fn round_currency_rounds_half_up() {
        assert_eq!(round_currency(2.5), 3.0);
        assert_eq!(round_currency(2.49), 2.0);
        assert_eq!(round_currency(-2.5), -2.0);
        assert_eq!(round_currency(-2.51), -3.0);
        assert_eq!(round_currency(0.0), 0.0);
        assert_eq!(round_currency(-0.5), 0.0);
    }

    #[test]
    fn round_currency_does_not_round_up_just_below_half() {
        assert_eq!(round_currency(0.499_999_999_999_999_94), 0.0);
        assert_eq!(round_currency(-0.499_999_999_999_999_94), 0.0);
        assert_eq!(round_currency(4_503_599_627_370_497.0), 4_503_599_627_370_497.0);
    }

    #[test]
    fn very_long_term_pays_interest_only() {
        let payment = monthly_payment(120_000.0, 6.0, u32::MAX);
        assert!(payment.is_finite());
        assert_approx_tol(payment, 600.0, 1e-9);
    }
}
