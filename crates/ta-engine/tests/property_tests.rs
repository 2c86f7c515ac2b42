//! Property-based tests for all indicators using proptest.
//!
//! These tests verify invariant properties that must hold for all valid inputs,
//! using randomly generated test data to find edge cases.

#![allow(clippy::float_cmp)]

use proptest::prelude::*;

use ta_engine::indicators::{
    ad, atr, bbands, ema, ma, ma_lookback, ma_min_len, macd, macd_ext, macd_lookback, obv,
    rolling_stddev, rsi, sma, true_range, MaType,
};

// ==================== Test Data Generators ====================

/// Random price series (all positive values)
fn arb_price_series(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, min_len..=max_len)
}

/// Random OHLCV bars with `low <= close <= high`
fn arb_ohlcv_series(
    min_len: usize,
    max_len: usize,
) -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>)> {
    prop::collection::vec(
        (1.0..1000.0_f64, 0.0..0.1_f64, 0.0..0.1_f64, 0.0..1.0_f64, 0.0..1e6_f64),
        min_len..=max_len,
    )
    .prop_map(|bars| {
        let mut high = Vec::with_capacity(bars.len());
        let mut low = Vec::with_capacity(bars.len());
        let mut close = Vec::with_capacity(bars.len());
        let mut volume = Vec::with_capacity(bars.len());
        for (base, high_pct, low_pct, position, vol) in bars {
            let h = base * (1.0 + high_pct);
            let l = base * (1.0 - low_pct);
            high.push(h);
            low.push(l);
            close.push(l + (h - l) * position);
            volume.push(vol);
        }
        (high, low, close, volume)
    })
}

fn arb_implemented_kind() -> impl Strategy<Value = MaType> {
    prop::sample::select(vec![
        MaType::Sma,
        MaType::Ema,
        MaType::Wma,
        MaType::Dema,
        MaType::Tema,
        MaType::Trima,
        MaType::Kama,
        MaType::T3,
    ])
}

fn leading_none(data: &[Option<f64>]) -> usize {
    data.iter().take_while(|x| x.is_none()).count()
}

// ==================== Moving Average Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every MA kind keeps the input length and exactly `lookback` leading `None`s
    #[test]
    fn prop_ma_length_and_warmup(
        data in arb_price_series(1, 120),
        period in 1usize..=12,
        kind in arb_implemented_kind(),
    ) {
        if data.len() >= ma_min_len(period, kind) {
            let result = ma(&data, period, kind).unwrap();
            prop_assert_eq!(result.len(), data.len());
            prop_assert_eq!(leading_none(&result), ma_lookback(period, kind));
            prop_assert!(result.iter().skip(ma_lookback(period, kind)).all(Option::is_some));
        } else {
            prop_assert!(ma(&data, period, kind).is_err());
        }
    }

    /// Every MA of a constant series stays at that constant
    #[test]
    fn prop_ma_constant_input(
        constant in 1.0..1000.0_f64,
        period in 1usize..=8,
        kind in arb_implemented_kind(),
    ) {
        let data = vec![constant; ma_min_len(period, kind) + 10];
        let result = ma(&data, period, kind).unwrap();
        for value in result.into_iter().flatten() {
            prop_assert!((value - constant).abs() < 1e-8 * constant.max(1.0));
        }
    }

    /// SMA stays between the window extremes
    #[test]
    fn prop_sma_within_window_bounds(data in arb_price_series(10, 100), period in 1usize..=10) {
        let result = sma(&data, period).unwrap();
        for i in (period - 1)..data.len() {
            let window = &data[i + 1 - period..=i];
            let min = window.iter().copied().fold(f64::INFINITY, f64::min);
            let max = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let value = result[i].unwrap();
            prop_assert!(value >= min - 1e-7 && value <= max + 1e-7);
        }
    }

    /// EMA warm-up equals SMA's and the seeds agree
    #[test]
    fn prop_ema_seed_equals_sma(data in arb_price_series(10, 100), period in 1usize..=10) {
        let s = sma(&data, period).unwrap();
        let e = ema(&data, period).unwrap();
        prop_assert_eq!(leading_none(&s), leading_none(&e));
        prop_assert_eq!(s[period - 1], e[period - 1]);
    }
}

// ==================== Momentum Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// RSI of finite input is within [0, 100]
    #[test]
    fn prop_rsi_bounded(data in arb_price_series(20, 150), period in 1usize..=14) {
        let result = rsi(&data, period).unwrap();
        prop_assert_eq!(leading_none(&result), period);
        for value in result.into_iter().flatten() {
            prop_assert!((0.0..=100.0).contains(&value), "RSI out of range: {}", value);
        }
    }

    /// MACD histogram is the line minus the signal wherever both exist
    #[test]
    fn prop_macd_histogram(
        data in arb_price_series(40, 150),
        fast in 2usize..=8,
        extra in 1usize..=10,
        signal in 1usize..=6,
    ) {
        let slow = fast + extra;
        if data.len() >= slow + signal - 1 {
            let result = macd(&data, fast, slow, signal).unwrap();
            prop_assert_eq!(leading_none(&result.signal_line), macd_lookback(fast, slow, signal));
            for i in 0..data.len() {
                match (result.macd_line[i], result.signal_line[i], result.histogram[i]) {
                    (Some(m), Some(s), Some(h)) => prop_assert!((h - (m - s)).abs() < 1e-9),
                    (_, None, None) => {}
                    other => prop_assert!(false, "inconsistent availability at {}: {:?}", i, other),
                }
            }
        }
    }

    /// MACDEXT with EMA on every line equals MACD
    #[test]
    fn prop_macd_ext_ema_equals_macd(
        data in arb_price_series(40, 120),
        fast in 2usize..=6,
        extra in 1usize..=8,
        signal in 1usize..=5,
    ) {
        let slow = fast + extra;
        let plain = macd(&data, fast, slow, signal).unwrap();
        let ext = macd_ext(&data, fast, MaType::Ema, slow, MaType::Ema, signal, MaType::Ema).unwrap();
        prop_assert_eq!(plain, ext);
    }
}

// ==================== Volatility Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// True range is non-negative and at least high - low
    #[test]
    fn prop_true_range_bounds((high, low, close, _volume) in arb_ohlcv_series(2, 100)) {
        let tr = true_range(&high, &low, &close).unwrap();
        for i in 0..high.len() {
            let value = tr[i].unwrap();
            prop_assert!(value >= high[i] - low[i] - 1e-12);
            prop_assert!(value >= 0.0);
        }
    }

    /// ATR is non-negative and keeps `period - 1` leading `None`s
    #[test]
    fn prop_atr_non_negative((high, low, close, _volume) in arb_ohlcv_series(20, 100), period in 1usize..=14) {
        let result = atr(&high, &low, &close, period).unwrap();
        prop_assert_eq!(leading_none(&result), period - 1);
        for value in result.into_iter().flatten() {
            prop_assert!(value >= 0.0);
        }
    }

    /// Band width above the middle is nbDevUp times the standard deviation
    #[test]
    fn prop_bbands_width(
        data in arb_price_series(30, 120),
        period in 2usize..=20,
        up in 0.0..4.0_f64,
        dn in 0.0..4.0_f64,
        kind in arb_implemented_kind(),
    ) {
        if data.len() >= ma_min_len(period, kind).max(period) {
            let bands = bbands(&data, period, up, dn, kind).unwrap();
            let sd = rolling_stddev(&data, period, 1.0).unwrap();
            for i in 0..data.len() {
                match (bands.upper[i], bands.middle[i], bands.lower[i]) {
                    (Some(u), Some(m), Some(l)) => {
                        let s = sd[i].unwrap();
                        prop_assert!((u - m - up * s).abs() < 1e-6);
                        prop_assert!((m - l - dn * s).abs() < 1e-6);
                        prop_assert!(u >= l - 1e-9);
                    }
                    (None, None, None) => {}
                    other => prop_assert!(false, "inconsistent availability at {}: {:?}", i, other),
                }
            }
        }
    }
}

// ==================== Volume Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// OBV rises on a strictly rising close and falls on a strictly falling one
    #[test]
    fn prop_obv_monotone(
        start in 1.0..100.0_f64,
        steps in prop::collection::vec((0.01..5.0_f64, 1.0..1e5_f64), 2..80),
        rising in any::<bool>(),
    ) {
        let mut close = vec![start];
        let mut volume = vec![1.0];
        for (step, vol) in &steps {
            let last = *close.last().unwrap();
            close.push(if rising { last + step } else { last - step });
            volume.push(*vol);
        }
        let result = obv(&close, &volume).unwrap();
        for pair in result.windows(2) {
            let (a, b) = (pair[0].unwrap(), pair[1].unwrap());
            if rising {
                prop_assert!(b > a);
            } else {
                prop_assert!(b < a);
            }
        }
    }

    /// A/D stays at zero when every bar has high == low
    #[test]
    fn prop_ad_zero_range((_high, _low, close, volume) in arb_ohlcv_series(1, 100)) {
        let result = ad(&close, &close, &close, &volume).unwrap();
        prop_assert!(result.iter().all(|v| *v == Some(0.0)));
    }

    /// A/D steps are bounded by the bar's volume
    #[test]
    fn prop_ad_step_bounded((high, low, close, volume) in arb_ohlcv_series(2, 100)) {
        let result = ad(&high, &low, &close, &volume).unwrap();
        let mut prev = 0.0;
        for (i, value) in result.iter().enumerate() {
            let value = value.unwrap();
            prop_assert!((value - prev).abs() <= volume[i] * (1.0 + 1e-9) + 1e-9);
            prev = value;
        }
    }
}
