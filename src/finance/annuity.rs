/// One year of a level-payment schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashFlow {
    /// 1-based.
    pub year: i32,
    pub nominal_flow: f64,
    /// `(1 + r)^-year`, in `(0, 1]`.
    pub discount_factor: f64,
    pub discounted_flow: f64,
}

/// Nominal total, present value and the year-by-year schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnuitySummary {
    pub total_nominal: f64,
    pub present_value: f64,
    pub flows: Vec<CashFlow>,
}

impl AnnuitySummary {
    fn zero() -> Self {
        AnnuitySummary {
            total_nominal: 0.0,
            present_value: 0.0,
            flows: Vec::new(),
        }
    }
}

/// Present value of `payment` received at the end of each of `years` years,
/// discounted at `annual_rate` (a fraction, `0.1` for 10 %).
///
/// Out-of-range inputs never produce a negative or partial result:
/// * `years <= 0`, or a payment that is not a positive finite number, gives
///   an all-zero summary with no flows.
/// * A rate that is not a positive finite number means no discounting:
///   every factor is 1 and the present value equals the nominal total.
///
/// Otherwise the present value is the closed form
/// `payment * (1 - (1 + r)^-years) / r`, which matches the sum of the
/// discounted flows up to rounding.
pub fn annuity(payment: f64, years: i32, annual_rate: f64) -> AnnuitySummary {
    if years <= 0 || !(payment.is_finite() && payment > 0.0) {
        return AnnuitySummary::zero();
    }

    let total_nominal = payment * years as f64;
    let discounted = annual_rate.is_finite() && annual_rate > 0.0;

    let flows = (1..=years)
        .map(|year| {
            let discount_factor = if discounted {
                (1.0 + annual_rate).powi(-year)
            } else {
                1.0
            };
            CashFlow {
                year,
                nominal_flow: payment,
                discount_factor,
                discounted_flow: payment * discount_factor,
            }
        })
        .collect();

    let present_value = if discounted {
        payment * (1.0 - (1.0 + annual_rate).powi(-years)) / annual_rate
    } else {
        total_nominal
    };

    AnnuitySummary {
        total_nominal,
        present_value,
        flows,
    }
}
