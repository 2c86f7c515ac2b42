//! Input validation tests.
//!
//! Every kernel rejects malformed calls before computing anything, in a fixed
//! order: parameters, emptiness, parallel lengths, minimum length, buffers.

#![allow(clippy::float_cmp)]

mod common;

use common::init_tracing;
use ta_engine::error::Error;
use ta_engine::indicators::{
    ad, atr, bbands, bbands_into, dema, ema, ema_with_alpha, kama, kama_full, ma, ma_into, macd,
    macd_ext, macd_into, obv, rolling_stddev, rsi, sma, sma_into, t3, t3_full, tema, trima,
    true_range, wma, BbandsOutput, MaType,
};

const IMPLEMENTED: [MaType; 8] = [
    MaType::Sma,
    MaType::Ema,
    MaType::Wma,
    MaType::Dema,
    MaType::Tema,
    MaType::Trima,
    MaType::Kama,
    MaType::T3,
];

// ==================== Empty Input Tests ====================

#[test]
fn validation_empty_single_series() {
    init_tracing();
    let empty: Vec<f64> = vec![];
    assert!(matches!(sma(&empty, 5), Err(Error::InvalidInput { .. })));
    assert!(matches!(ema(&empty, 5), Err(Error::InvalidInput { .. })));
    assert!(matches!(wma(&empty, 5), Err(Error::InvalidInput { .. })));
    assert!(matches!(dema(&empty, 5), Err(Error::InvalidInput { .. })));
    assert!(matches!(tema(&empty, 5), Err(Error::InvalidInput { .. })));
    assert!(matches!(trima(&empty, 5), Err(Error::InvalidInput { .. })));
    assert!(matches!(kama(&empty, 5), Err(Error::InvalidInput { .. })));
    assert!(matches!(t3(&empty, 5), Err(Error::InvalidInput { .. })));
    assert!(matches!(rsi(&empty, 14), Err(Error::InvalidInput { .. })));
    assert!(matches!(macd(&empty, 12, 26, 9), Err(Error::InvalidInput { .. })));
    assert!(matches!(
        rolling_stddev(&empty, 5, 1.0),
        Err(Error::InvalidInput { .. })
    ));
    assert!(matches!(
        bbands(&empty, 5, 2.0, 2.0, MaType::Sma),
        Err(Error::InvalidInput { .. })
    ));
}

#[test]
fn validation_empty_parallel_series() {
    let empty: Vec<f64> = vec![];
    assert!(matches!(true_range(&empty, &empty, &empty), Err(Error::InvalidInput { .. })));
    assert!(matches!(atr(&empty, &empty, &empty, 14), Err(Error::InvalidInput { .. })));
    assert!(matches!(ad(&empty, &empty, &empty, &empty), Err(Error::InvalidInput { .. })));
    assert!(matches!(obv(&empty, &empty), Err(Error::InvalidInput { .. })));
}

#[test]
fn validation_empty_names_indicator() {
    let empty: Vec<f64> = vec![];
    match rsi(&empty, 14) {
        Err(Error::InvalidInput { indicator, .. }) => assert_eq!(indicator, "rsi"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

// ==================== Insufficient Data Tests ====================

#[test]
fn validation_insufficient_data_reports_lengths() {
    let data = vec![1.0_f64, 2.0, 3.0];
    assert_eq!(
        sma(&data, 5),
        Err(Error::InsufficientData {
            required: 5,
            actual: 3,
            indicator: "sma",
        })
    );
}

#[test]
fn validation_rsi_needs_period_plus_one() {
    let data: Vec<f64> = (0..14).map(f64::from).collect();
    assert!(matches!(
        rsi(&data, 14),
        Err(Error::InsufficientData { required: 15, actual: 14, .. })
    ));

    let data: Vec<f64> = (0..15).map(f64::from).collect();
    let result = rsi(&data, 14).unwrap();
    assert!(result[13].is_none());
    assert!(result[14].is_some());
}

#[test]
fn validation_macd_needs_slow_plus_signal_minus_one() {
    let short: Vec<f64> = (0..33).map(f64::from).collect();
    assert!(matches!(
        macd(&short, 12, 26, 9),
        Err(Error::InsufficientData { required: 34, actual: 33, .. })
    ));
    let enough: Vec<f64> = (0..34).map(f64::from).collect();
    assert!(macd(&enough, 12, 26, 9).is_ok());
}

#[test]
fn validation_every_ma_kind_min_len() {
    for kind in IMPLEMENTED {
        for period in [1_usize, 2, 4, 7] {
            let min = ta_engine::indicators::ma_min_len(period, kind);
            let short: Vec<f64> = (0..min - 1).map(|i| i as f64).collect();
            let exact: Vec<f64> = (0..min).map(|i| i as f64 + 1.0).collect();
            if !short.is_empty() {
                assert!(
                    matches!(ma(&short, period, kind), Err(Error::InsufficientData { .. })),
                    "{kind} period {period}"
                );
            }
            let result = ma(&exact, period, kind).unwrap();
            assert!(result[min - 1].is_some(), "{kind} period {period}");
        }
    }
}

#[test]
fn validation_huge_periods_report_insufficient_data() {
    init_tracing();
    let data = vec![1.0_f64, 2.0, 3.0];
    for period in [usize::MAX, usize::MAX / 2, usize::MAX / 4] {
        for kind in IMPLEMENTED {
            assert!(
                matches!(ma(&data, period, kind), Err(Error::InsufficientData { .. })),
                "{kind} period {period}"
            );
        }
        assert!(matches!(rsi(&data, period), Err(Error::InsufficientData { .. })));
        assert!(matches!(
            ema_with_alpha(&data, period, 0.5),
            Err(Error::InsufficientData { .. })
        ));
        assert!(matches!(
            kama_full(&data, period, period, period),
            Err(Error::InsufficientData { .. })
        ));
        assert!(matches!(t3_full(&data, period, 0.7), Err(Error::InsufficientData { .. })));
        assert!(matches!(
            rolling_stddev(&data, period, 1.0),
            Err(Error::InsufficientData { .. })
        ));
        assert!(matches!(
            bbands(&data, period, 2.0, 2.0, MaType::T3),
            Err(Error::InsufficientData { .. })
        ));
        assert!(matches!(atr(&data, &data, &data, period), Err(Error::InsufficientData { .. })));
        assert!(matches!(macd(&data, 2, period, 9), Err(Error::InsufficientData { .. })));
        assert!(matches!(macd(&data, 2, 3, period), Err(Error::InsufficientData { .. })));
        assert!(matches!(
            macd_ext(&data, 2, MaType::Tema, period, MaType::T3, period, MaType::Dema),
            Err(Error::InsufficientData { .. })
        ));
    }
}

#[test]
fn validation_huge_period_lookbacks_saturate() {
    use ta_engine::indicators::{
        dema_min_len, kama_min_len, macd_ext_min_len, rsi_min_len, t3_lookback, t3_min_len,
        tema_min_len,
    };
    assert_eq!(rsi_min_len(usize::MAX), usize::MAX);
    assert_eq!(kama_min_len(usize::MAX), usize::MAX);
    assert_eq!(dema_min_len(usize::MAX), usize::MAX);
    assert_eq!(tema_min_len(usize::MAX / 2), usize::MAX);
    assert_eq!(t3_lookback(usize::MAX / 4), usize::MAX);
    assert_eq!(t3_min_len(usize::MAX / 4), usize::MAX);
    assert_eq!(
        macd_ext_min_len(2, MaType::Ema, usize::MAX, MaType::Ema, 9, MaType::Ema),
        usize::MAX
    );
}

#[test]
fn validation_atr_insufficient_data() {
    let h = vec![2.0_f64; 3];
    let l = vec![1.0_f64; 3];
    let c = vec![1.5_f64; 3];
    assert!(matches!(atr(&h, &l, &c, 4), Err(Error::InsufficientData { .. })));
    assert!(atr(&h, &l, &c, 3).is_ok());
}

// ==================== Invalid Parameter Tests ====================

#[test]
fn validation_zero_period() {
    let data = vec![1.0_f64; 10];
    for kind in IMPLEMENTED {
        assert!(
            matches!(ma(&data, 0, kind), Err(Error::InvalidParameter { .. })),
            "{kind}"
        );
    }
    assert!(matches!(rsi(&data, 0), Err(Error::InvalidParameter { .. })));
    assert!(matches!(rolling_stddev(&data, 0, 1.0), Err(Error::InvalidParameter { .. })));
    assert!(matches!(macd(&data, 0, 5, 2), Err(Error::InvalidParameter { .. })));
    assert!(matches!(macd(&data, 2, 5, 0), Err(Error::InvalidParameter { .. })));
    assert!(matches!(
        atr(&data, &data, &data, 0),
        Err(Error::InvalidParameter { .. })
    ));
    assert!(matches!(kama_full(&data, 3, 0, 30), Err(Error::InvalidParameter { .. })));
}

#[test]
fn validation_parameters_checked_before_data() {
    let empty: Vec<f64> = vec![];
    assert!(matches!(sma(&empty, 0), Err(Error::InvalidParameter { .. })));
    assert!(matches!(macd(&empty, 26, 12, 9), Err(Error::InvalidParameter { .. })));
    assert!(matches!(
        bbands(&empty, 5, -1.0, 2.0, MaType::Sma),
        Err(Error::InvalidParameter { .. })
    ));
    assert!(matches!(
        ma(&empty, 5, MaType::Mama),
        Err(Error::NotImplemented { .. })
    ));
}

#[test]
fn validation_macd_fast_not_below_slow() {
    let data: Vec<f64> = (0..100).map(f64::from).collect();
    for (fast, slow) in [(26, 12), (12, 12)] {
        match macd(&data, fast, slow, 9) {
            Err(Error::InvalidParameter { parameter, .. }) => assert_eq!(parameter, "fast_period"),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }
}

#[test]
fn validation_multipliers() {
    let data: Vec<f64> = (0..20).map(f64::from).collect();
    for bad in [-0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            bbands(&data, 5, bad, 2.0, MaType::Sma),
            Err(Error::InvalidParameter { parameter: "nb_dev_up", .. })
        ));
        assert!(matches!(
            bbands(&data, 5, 2.0, bad, MaType::Sma),
            Err(Error::InvalidParameter { parameter: "nb_dev_dn", .. })
        ));
        assert!(matches!(
            rolling_stddev(&data, 5, bad),
            Err(Error::InvalidParameter { .. })
        ));
    }
    assert!(bbands(&data, 5, 0.0, 0.0, MaType::Sma).is_ok());
}

#[test]
fn validation_custom_alpha() {
    let data: Vec<f64> = (0..20).map(f64::from).collect();
    for bad in [0.0, -0.1, 1.5, f64::NAN] {
        assert!(
            matches!(ema_with_alpha(&data, 5, bad), Err(Error::InvalidParameter { .. })),
            "alpha {bad}"
        );
    }
    assert!(ema_with_alpha(&data, 5, 1.0).is_ok());
}

#[test]
fn validation_t3_volume_factor() {
    let data: Vec<f64> = (0..40).map(f64::from).collect();
    assert!(matches!(t3_full(&data, 3, 1.5), Err(Error::InvalidParameter { .. })));
    assert!(matches!(t3_full(&data, 3, -0.1), Err(Error::InvalidParameter { .. })));
    assert!(t3_full(&data, 3, 0.0).is_ok());
    assert!(t3_full(&data, 3, 1.0).is_ok());
}

#[test]
fn validation_ma_type_codes_and_names() {
    for code in 0..=8 {
        let kind = MaType::try_from(code).unwrap();
        assert_eq!(kind.code(), code);
        assert_eq!(kind.to_string().parse::<MaType>().unwrap(), kind);
    }
    assert!(matches!(MaType::try_from(9), Err(Error::InvalidParameter { .. })));
    assert!(matches!(MaType::try_from(-1), Err(Error::InvalidParameter { .. })));
    assert!(matches!("HMA".parse::<MaType>(), Err(Error::InvalidParameter { .. })));
}

// ==================== Not Implemented Tests ====================

#[test]
fn validation_mama_not_implemented_everywhere() {
    let data: Vec<f64> = (0..100).map(f64::from).collect();
    assert!(matches!(ma(&data, 5, MaType::Mama), Err(Error::NotImplemented { .. })));
    assert!(matches!(
        bbands(&data, 5, 2.0, 2.0, MaType::Mama),
        Err(Error::NotImplemented { .. })
    ));
    assert!(matches!(
        macd_ext(&data, 3, MaType::Mama, 6, MaType::Ema, 2, MaType::Ema),
        Err(Error::NotImplemented { .. })
    ));
    assert!(matches!(
        macd_ext(&data, 3, MaType::Ema, 6, MaType::Ema, 2, MaType::Mama),
        Err(Error::NotImplemented { .. })
    ));
}

// ==================== Dimension Mismatch Tests ====================

#[test]
fn validation_dimension_mismatch() {
    let five = vec![1.0_f64; 5];
    let four = vec![1.0_f64; 4];
    assert!(matches!(true_range(&five, &five, &four), Err(Error::DimensionMismatch { .. })));
    assert!(matches!(atr(&five, &four, &five, 2), Err(Error::DimensionMismatch { .. })));
    assert!(matches!(ad(&five, &five, &five, &four), Err(Error::DimensionMismatch { .. })));
    assert!(matches!(obv(&five, &four), Err(Error::DimensionMismatch { .. })));
}

#[test]
fn validation_mismatch_checked_before_length() {
    // Both problems present: mismatch wins
    let h = vec![2.0_f64; 3];
    let l = vec![1.0_f64; 2];
    assert!(matches!(atr(&h, &l, &h, 10), Err(Error::DimensionMismatch { .. })));
}

#[test]
fn validation_mismatch_description_names_series() {
    let err = obv(&[1.0_f64, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("close"), "{message}");
    assert!(message.contains("volume"), "{message}");
}

// ==================== Buffer Tests ====================

#[test]
fn validation_buffer_too_small() {
    let data: Vec<f64> = (0..20).map(f64::from).collect();
    let mut short = vec![None; 19];
    assert!(matches!(
        sma_into(&data, 5, &mut short),
        Err(Error::BufferTooSmall { required: 20, actual: 19, .. })
    ));
    assert!(matches!(
        ma_into(&data, 5, MaType::Tema, &mut short),
        Err(Error::BufferTooSmall { .. })
    ));

    let mut line = vec![None; 20];
    let mut signal = vec![None; 20];
    let mut hist = vec![None; 10];
    assert!(matches!(
        macd_into(&data, 3, 6, 2, &mut line, &mut signal, &mut hist),
        Err(Error::BufferTooSmall { .. })
    ));

    let mut bands = BbandsOutput::with_len(5);
    assert!(matches!(
        bbands_into(&data, 5, 2.0, 2.0, MaType::Sma, &mut bands),
        Err(Error::BufferTooSmall { .. })
    ));
}

#[test]
fn validation_larger_buffer_accepted() {
    let data: Vec<f64> = (1..=10).map(f64::from).collect();
    let mut output = vec![Some(-1.0); 12];
    let defined = sma_into(&data, 5, &mut output).unwrap();
    assert_eq!(defined, 6);
    assert!(output[..4].iter().all(Option::is_none));
    assert_eq!(output[9], Some(8.0));
    // Tail beyond the input is untouched
    assert_eq!(output[10], Some(-1.0));
}

// ==================== Error Display Tests ====================

#[test]
fn validation_error_messages() {
    let data = vec![1.0_f64, 2.0];
    let err = sma(&data, 10).unwrap_err();
    assert_eq!(
        err.to_string(),
        "insufficient data for sma: required 10 elements, got 2"
    );
    let err = ma(&data, 1, MaType::Mama).unwrap_err();
    assert!(err.to_string().starts_with("not implemented"));
}
