//! S5: a `BbitsDodXof` container computes Welford mean/variance/stddev
//! over a read window that matches a plain f64 accumulation.

use datakit_core::codec::BbitsDodXof;

#[test]
fn statistics_match_a_plain_accumulation() {
    let mut c = BbitsDodXof::new();
    let n = 5000i64;
    let mut values = Vec::with_capacity(n as usize);
    for i in 0..n {
        let v = i as f64 * 0.123 + 42.0;
        values.push(v);
        c.append(i * 100, v);
    }

    let (keys, vals, stats) = c.get_offset_count(0, -1, true).unwrap();
    assert_eq!(keys.len(), n as usize);
    assert_eq!(vals, values);

    let stats = stats.unwrap();
    let expected_mean = values.iter().sum::<f64>() / n as f64;
    let expected_var: f64 = values.iter().map(|v| (v - expected_mean).powi(2)).sum();
    let expected_stddev = (expected_var / n as f64).sqrt();

    assert!((stats.mean - expected_mean).abs() < 1e-6);
    assert!((stats.variance - expected_var).abs() / expected_var < 1e-6);
    assert!((stats.stddev - expected_stddev).abs() < 1e-6);
}

#[test]
fn stats_are_omitted_when_not_requested() {
    let mut c = BbitsDodXof::new();
    c.append(0, 1.0);
    c.append(1, 2.0);
    let (_, _, stats) = c.get_offset_count(0, -1, false).unwrap();
    assert!(stats.is_none());
}
