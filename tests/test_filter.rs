mod common;
use common::{add, lcg_signal, max_abs_diff, three_tone_signal};
use sincfir::{filter, filter_with_kernel, BoundaryPolicy, FilterError, FilterSpec, WindowSpec};

const POLICIES: [BoundaryPolicy; 3] =
    [BoundaryPolicy::Extend, BoundaryPolicy::Truncate, BoundaryPolicy::Periodic];

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn three_tone_signal_is_zero_mean() {
    let x = three_tone_signal();
    assert_eq!(x.len(), 1001);
    let s: f64 = x.iter().sum();
    assert!(s.abs() < 1e-10, "sum(x) = {s:.3e}");
}

#[test]
fn lowpass_plus_highpass_restores_signal() {
    let x = three_tone_signal();
    let lp = filter(&x, FilterSpec::lowpass(0.05).unwrap(), BoundaryPolicy::Extend).unwrap();
    let hp = filter(&x, FilterSpec::highpass(0.05).unwrap(), BoundaryPolicy::Extend).unwrap();
    let err = max_abs_diff(&x, &add(&lp, &hp));
    assert!(err < 1e-10, "max |x - lp - hp| = {err:.3e}");
}

#[test]
fn bandpass_plus_bandstop_restores_signal() {
    let x = three_tone_signal();
    let bp = filter(&x, FilterSpec::bandpass(0.05, 0.15).unwrap(), BoundaryPolicy::Extend).unwrap();
    let bs = filter(&x, FilterSpec::bandstop(0.05, 0.15).unwrap(), BoundaryPolicy::Extend).unwrap();
    let err = max_abs_diff(&x, &add(&bp, &bs));
    assert!(err < 1e-10, "max |x - bp - bs| = {err:.3e}");
}

// ── Identities across orders, windows and boundaries ─────────────────────────

#[test]
fn energy_split_holds_for_every_policy_and_order() {
    let x = lcg_signal(400, 7);
    for n in [3usize, 31, 65, 101, 399] {
        for policy in POLICIES {
            let lp = FilterSpec::lowpass(0.3).unwrap().with_order(n);
            let hp = FilterSpec::highpass(0.3).unwrap().with_order(n);
            let err = max_abs_diff(
                &x,
                &add(&filter(&x, &lp, policy).unwrap(), &filter(&x, &hp, policy).unwrap()),
            );
            assert!(err < 1e-10, "lp/hp N={n} {policy}: {err:.3e}");

            let bp = FilterSpec::bandpass(0.1, 0.6).unwrap().with_order(n);
            let bs = FilterSpec::bandstop(0.1, 0.6).unwrap().with_order(n);
            let err = max_abs_diff(
                &x,
                &add(&filter(&x, &bp, policy).unwrap(), &filter(&x, &bs, policy).unwrap()),
            );
            assert!(err < 1e-10, "bp/bs N={n} {policy}: {err:.3e}");
        }
    }
}

#[test]
fn energy_split_with_other_windows() {
    let x = lcg_signal(300, 11);
    for window in ["boxcar", "blackman", "kaiser:beta=5", "gaussian:std=20"] {
        let w: WindowSpec = window.parse().unwrap();
        let lp = FilterSpec::lowpass(0.2).unwrap().with_order(151).with_window(w.clone());
        let hp = FilterSpec::highpass(0.2).unwrap().with_order(151).with_window(w);
        let y = add(
            &filter(&x, &lp, BoundaryPolicy::Periodic).unwrap(),
            &filter(&x, &hp, BoundaryPolicy::Periodic).unwrap(),
        );
        assert!(max_abs_diff(&x, &y) < 1e-10, "window {window}");
    }
}

// ── Filtering behaviour ───────────────────────────────────────────────────────

#[test]
fn lowpass_keeps_slow_tone_and_removes_fast_tone() {
    let x = three_tone_signal();
    let slow: Vec<f64> = {
        let t = sincfir::signal::symmetric_time(1001);
        sincfir::signal::sinusoids(&[0.01], &[1.0], &t).unwrap()
    };
    let spec = FilterSpec::lowpass(0.05).unwrap().with_order(201);
    let y = filter(&x, &spec, BoundaryPolicy::Extend).unwrap();
    // Away from the edges only the 0.01 tone survives.
    let interior = 200..801;
    let err = max_abs_diff(&y[interior.clone()], &slow[interior]);
    assert!(err < 0.01, "residual {err:.4}");
}

#[test]
fn moving_average_window_preserves_constant() {
    let x = vec![4.5; 64];
    let spec = FilterSpec::window().with_order(15);
    for policy in [BoundaryPolicy::Extend, BoundaryPolicy::Periodic] {
        let y = filter(&x, &spec, policy).unwrap();
        for v in y {
            approx::assert_abs_diff_eq!(v, 4.5, epsilon = 1e-12);
        }
    }
}

#[test]
fn returned_kernel_reproduces_output() {
    let x = lcg_signal(500, 3);
    let spec = FilterSpec::bandstop(0.2, 0.4).unwrap().with_order(127);
    let (y, h) = filter_with_kernel(&x, &spec, BoundaryPolicy::Truncate).unwrap();
    assert_eq!(h.len(), 127);
    let again = filter(&x, &h, BoundaryPolicy::Truncate).unwrap();
    assert_eq!(y, again);
}

#[test]
fn filtering_is_deterministic_and_non_destructive() {
    let x = lcg_signal(256, 5);
    let before = x.clone();
    let spec = FilterSpec::highpass(0.4).unwrap().with_order(33);
    let a = filter(&x, &spec, BoundaryPolicy::Extend).unwrap();
    let b = filter(&x, &spec, BoundaryPolicy::Extend).unwrap();
    assert_eq!(a, b);
    assert_eq!(x, before);
}

#[test]
fn shared_kernel_across_threads() {
    let h = sincfir::firwin(&FilterSpec::lowpass(0.25).unwrap().with_order(51)).unwrap();
    let h = std::sync::Arc::new(h);
    let handles: Vec<_> = (0..4)
        .map(|seed| {
            let h = std::sync::Arc::clone(&h);
            std::thread::spawn(move || {
                let x = lcg_signal(200, seed);
                filter(&x, h.as_slice(), BoundaryPolicy::Extend).unwrap().len()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 200);
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[test]
fn kernel_longer_than_signal_is_size_mismatch() {
    let x = lcg_signal(20, 1);
    let spec = FilterSpec::lowpass(0.2).unwrap().with_order(21);
    assert_eq!(
        filter(&x, &spec, BoundaryPolicy::Extend),
        Err(FilterError::SizeMismatch { kernel: 21, signal: 20 })
    );
}

#[test]
fn even_default_order_rejected_for_inverted_filters() {
    let x = lcg_signal(100, 2);
    let err = filter(&x, FilterSpec::bandpass(0.1, 0.2).unwrap(), BoundaryPolicy::Extend).unwrap_err();
    assert_eq!(err, FilterError::Parity { len: 100 });
}
