/// Rent needed to reach a target gross yield on a purchase price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RentRequirement {
    pub annual: f64,
    pub monthly: f64,
}

/// `annual = price * yield / 100`, `monthly = annual / 12`.
pub fn rent_requirement(price: f64, target_yield_pct: f64) -> RentRequirement {
    let annual = price * target_yield_pct / 100.0;
    RentRequirement {
        annual,
        monthly: annual / 12.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn five_percent_of_hundred_million() {
        let r = rent_requirement(100_000_000.0, 5.0);
        assert_eq!(r.annual, 5_000_000.0);
        assert!((r.monthly - 416_666.67).abs() < 0.01);
    }

    #[rstest]
    #[case(0.0, 5.0)]
    #[case(250_000.0, 0.0)]
    fn zero_inputs_need_no_rent(#[case] price: f64, #[case] pct: f64) {
        assert_eq!(rent_requirement(price, pct), RentRequirement { annual: 0.0, monthly: 0.0 });
    }

    #[test]
    fn repeated_calls_are_identical() {
        let a = rent_requirement(187_300_000.0, 6.25);
        let b = rent_requirement(187_300_000.0, 6.25);
        assert_eq!(a.annual.to_bits(), b.annual.to_bits());
        assert_eq!(a.monthly.to_bits(), b.monthly.to_bits());
    }
}
