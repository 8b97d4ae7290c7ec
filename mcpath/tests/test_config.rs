//! Requests described in TOML or through integer type codes.

use mcpath::time::{Date, DayCounterKind};
use mcpath::{
    generate_paths, generate_raw_sequence, BarrierKind, BarrierSpec, CurveKind, CurveSpec, Error,
    PathRequest, ProcessKind, SequenceRequest, VolKind, VolSpec,
};
use ndarray::Array2;

const REQUEST: &str = r#"
evaluation_date = "2020-02-24"
path_count = 64
steps = 6
horizon = 0.5
process = "black_scholes_merton"

[rate]
kind = "forward_rate"
terms = [0, 90, 180, 365]
values = [0.02, 0.021, 0.022, 0.024]

[dividend]
values = [0.005]

[volatility]
kind = "variance_curve"
terms = [60, 120, 182]
values = [0.30, 0.28, 0.27]

[up_out]
kind = "constant"
levels = [1.25]
observed = [false, true, true, true, true, true, true]

[down_out]
kind = "time_varying"
levels = [0.0, 0.8, 0.8, 0.8, 0.8, 0.8, 0.8]
observed = [false, false, false, true, false, false, true]
"#;

/// The TOML request spelled out with type codes.
fn coded_request() -> PathRequest {
    let dc = DayCounterKind::from_code(0).unwrap();
    let today = Date::from_ymd(2020, 2, 24).unwrap();
    let rate = CurveSpec::new(
        CurveKind::from_code(2).unwrap(),
        vec![0, 90, 180, 365],
        vec![0.02, 0.021, 0.022, 0.024],
        dc,
    );
    let vol = VolSpec {
        kind: VolKind::from_code(1).unwrap(),
        terms: vec![60, 120, 182],
        values: vec![0.30, 0.28, 0.27],
        day_counter: dc,
    };
    let mut req = PathRequest::new(today, 64, 6, 0.5, rate, vol);
    req.process = ProcessKind::from_code(1).unwrap();
    req.dividend = Some(CurveSpec::new(
        CurveKind::from_code(0).unwrap(),
        vec![],
        vec![0.005],
        dc,
    ));
    req.up_out = BarrierSpec {
        kind: BarrierKind::from_code(1).unwrap(),
        observed: vec![false, true, true, true, true, true, true],
        levels: vec![1.25],
    };
    req.down_out = BarrierSpec {
        kind: BarrierKind::from_code(2).unwrap(),
        observed: vec![false, false, false, true, false, false, true],
        levels: vec![0.0, 0.8, 0.8, 0.8, 0.8, 0.8, 0.8],
    };
    req
}

#[test]
fn toml_and_type_codes_describe_the_same_request() {
    let parsed = PathRequest::from_toml_str(REQUEST).unwrap();
    assert_eq!(parsed, coded_request());

    let mut a = Array2::from_elem((64, 7), -1.0);
    let mut b = Array2::from_elem((64, 7), -1.0);
    generate_paths(&parsed, a.view_mut()).unwrap();
    generate_paths(&coded_request(), b.view_mut()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn serialized_requests_parse_back() {
    let req = coded_request();
    let text = toml::to_string(&req).unwrap();
    assert_eq!(PathRequest::from_toml_str(&text).unwrap(), req);
}

#[test]
fn unknown_names_are_rejected() {
    let text = REQUEST.replace("\"forward_rate\"", "\"par_rate\"");
    let err = PathRequest::from_toml_str(&text).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let text = REQUEST.replace("2020-02-24", "2020-02-30");
    assert!(matches!(PathRequest::from_toml_str(&text), Err(Error::InvalidArgument(_))));
}

#[test]
fn unsupported_type_codes_are_invalid_arguments() {
    for err in [
        CurveKind::from_code(7).unwrap_err(),
        VolKind::from_code(2).unwrap_err(),
        ProcessKind::from_code(-1).unwrap_err(),
        BarrierKind::from_code(9).unwrap_err(),
        DayCounterKind::from_code(4).unwrap_err(),
    ] {
        assert!(matches!(err, Error::InvalidArgument(_)), "{err:?}");
    }
}

#[test]
fn raw_sequence_from_toml() {
    let req = SequenceRequest::from_toml_str(
        r#"
        path_count = 5
        steps = 3
        horizon = 1.0
        brownian_bridge = false
        skip = 2
        "#,
    )
    .unwrap();
    assert_eq!(req.seed, 42);
    let mut out = Array2::from_elem((5, 4), -1.0);
    let outcome = generate_raw_sequence(&req, out.view_mut()).unwrap();
    assert_eq!(outcome.rows, 5);
    assert!(out.column(0).iter().all(|&x| x == -1.0));
    assert!(out.rows().into_iter().all(|r| r.iter().skip(1).all(|x| x.is_finite())));
}
