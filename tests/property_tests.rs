//! Property-based tests for structlog using proptest

use chrono::{FixedOffset, TimeZone};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use structlog::prelude::*;
use structlog::{fixed_clock, unwrap_keyvals, Template};

fn level_strategy() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]
}

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,4}"
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[ -~]{0,12}".prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ]
}

fn keyvals_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..8).prop_map(|pairs| {
        pairs
            .into_iter()
            .flat_map(|(k, v)| [Value::from(k), v])
            .collect()
    })
}

fn clocked(format: OutputFormat) -> (Logger, BufferAppender) {
    let at = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2021, 6, 7, 8, 9, 10)
        .unwrap();
    let buffer = BufferAppender::new();
    let log = Logger::zero(vec![])
        .set_output(buffer.clone())
        .set_clock(fixed_clock(at))
        .set_log_format(format)
        .set_prefix_keys(["_t", "_l"])
        .set_suffix_keys(["_s"])
        .set_default_keyvals(keyvals!["_t", Value::Auto]);
    (log, buffer)
}

/// Single call site, so every record gets the same `_s`.
fn emit(log: &Logger, level: LogLevel, msg: &str, keyvals: Vec<Value>) {
    match level {
        LogLevel::Debug => log.debug(msg, keyvals),
        LogLevel::Info => log.info(msg, keyvals),
        LogLevel::Warn => log.warn(msg, keyvals),
        LogLevel::Error => log.print_err(msg, keyvals),
    }
}

// ============================================================================
// Rendering
// ============================================================================

proptest! {
    /// Rendering the same input twice gives byte-identical records
    #[test]
    fn test_render_deterministic(
        level in level_strategy(),
        msg in "[ -~]{0,20}",
        keyvals in keyvals_strategy(),
        json in any::<bool>(),
    ) {
        let format = if json { OutputFormat::Json } else { OutputFormat::Text };
        let (first, first_buf) = clocked(format);
        let (second, second_buf) = clocked(format);

        emit(&first, level, &msg, keyvals.clone());
        emit(&second, level, &msg, keyvals);

        prop_assert_eq!(first_buf.lines(), second_buf.lines());
        prop_assert_eq!(first_buf.len(), 1);
    }

    /// Keys appear once, in first-seen order, with their last value
    #[test]
    fn test_middle_keys_first_seen_last_wins(keyvals in keyvals_strategy()) {
        let buffer = BufferAppender::new();
        let log = Logger::zero(vec![])
            .set_output(buffer.clone())
            .set_key_val_format("|{key}={value}");
        log.info("m", keyvals.clone());

        let mut order: Vec<String> = Vec::new();
        let mut last: HashMap<String, String> = HashMap::new();
        for pair in keyvals.chunks(2) {
            let key = pair[0].to_string();
            if !order.contains(&key) {
                order.push(key.clone());
            }
            last.insert(key, pair[1].to_string());
        }
        let expected: String = std::iter::once("|_m=m".to_string())
            .chain(order.iter().map(|k| format!("|{}={}", k, last[k])))
            .collect();

        prop_assert_eq!(buffer.lines(), vec![expected]);
    }

    /// JSON records always parse back to string fields
    #[test]
    fn test_json_is_valid(msg in "\\PC{0,20}", keyvals in keyvals_strategy()) {
        let (log, buffer) = clocked(OutputFormat::Json);
        log.warn(msg.as_str(), keyvals);

        let parsed: BTreeMap<String, String> = serde_json::from_str(&buffer.lines()[0]).unwrap();
        prop_assert_eq!(&parsed["_m"], &msg);
        prop_assert_eq!(parsed["_l"].as_str(), "WRN");
    }

    /// Templates render arbitrary input without panicking
    #[test]
    fn test_template_never_panics(source in "\\PC{0,30}", key in "\\PC{0,8}", value in "\\PC{0,8}") {
        let template = Template::parse(&source);
        let _ = template.render(&key, &Value::from(value));
        prop_assert_eq!(template.as_str(), source.as_str());
    }
}

// ============================================================================
// Inheritance
// ============================================================================

proptest! {
    /// Merging from many threads at once gives the same result as a
    /// single merge
    #[test]
    fn test_concurrent_merge_matches_single(
        parent_defaults in prop::collection::btree_map(key_strategy(), "[a-z]{1,3}", 0..6),
        child_defaults in prop::collection::btree_map(key_strategy(), prop::option::of("[a-z]{1,3}"), 0..6),
    ) {
        let keys: BTreeSet<String> = parent_defaults
            .keys()
            .chain(child_defaults.keys())
            .cloned()
            .collect();

        let build = || {
            let buffer = BufferAppender::new();
            let parent = Logger::zero(vec![])
                .set_output(buffer.clone())
                .set_prefix_keys(keys.clone())
                .with_fields(parent_defaults.clone());
            let child_keyvals = child_defaults
                .iter()
                .flat_map(|(k, v)| [Value::from(k), v.clone().map_or(Value::Nil, Value::from)])
                .collect();
            let child = parent.derive(child_keyvals);
            (child, buffer)
        };

        let (single, single_buf) = build();
        single.info("m", vec![]);
        single.info("m", vec![]);

        let (shared, shared_buf) = build();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                let log = shared.clone();
                scope.spawn(move || log.info("m", vec![]));
            }
        });

        let single_lines = single_buf.lines();
        let expected = &single_lines[0];
        prop_assert_eq!(&single_lines[1], expected);
        prop_assert_eq!(shared_buf.len(), 4);
        for line in shared_buf.lines() {
            prop_assert_eq!(&line, expected);
        }

        for (key, value) in &child_defaults {
            let shown = expected.contains(&format!(" {}=", key));
            prop_assert_eq!(shown, value.is_some());
        }
    }
}

// ============================================================================
// Error keyvals and levels
// ============================================================================

proptest! {
    /// Unwrapping returns every layer's pairs, innermost layer first
    #[test]
    fn test_unwrap_layers(layers in prop::collection::vec(keyvals_strategy(), 1..5)) {
        let mut err = WrappedError::new(
            std::io::Error::new(std::io::ErrorKind::Other, "base"),
            layers[0].clone(),
        );
        for layer in &layers[1..] {
            err = WrappedError::new(err, layer.clone());
        }

        let expected: Vec<Value> = layers.concat();
        prop_assert_eq!(unwrap_keyvals(&err), expected);
        prop_assert_eq!(err.to_string(), "base");
    }

    /// Level names parse back case-insensitively
    #[test]
    fn test_level_name_roundtrip(level in level_strategy(), upper in any::<bool>()) {
        let name = if upper {
            level.to_str().to_uppercase()
        } else {
            level.to_str().to_lowercase()
        };
        prop_assert_eq!(name.parse::<LogLevel>().unwrap(), level);
    }

    /// A record is output exactly when its level reaches the minimum
    #[test]
    fn test_level_gate(min in level_strategy(), level in level_strategy()) {
        let buffer = BufferAppender::new();
        let log = Logger::zero(vec![]).set_output(buffer.clone()).set_log_level(min);
        emit(&log, level, "m", vec![]);
        prop_assert_eq!(buffer.len(), usize::from(level >= min));
    }
}
