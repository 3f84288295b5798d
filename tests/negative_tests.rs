use anyhow::Result;
use clap::Command;
use serde::Deserialize;
use serde_json::{Map, Value};
use strdur::{DurationError, ParseDurationError, StringDuration, config, settable};

#[derive(Debug, Deserialize)]
struct Holder {
    #[serde(rename = "sdv")]
    value: StringDuration,
}

#[test]
fn test_set_invalid_leaves_value_unchanged() -> Result<()> {
    let mut sdv: StringDuration = "15m".parse()?;

    let err = sdv.set("24hh").unwrap_err();
    assert_eq!(
        err,
        ParseDurationError::UnknownUnit {
            unit: "hh".to_string(),
            input: "24hh".to_string(),
        }
    );
    assert_eq!(sdv.to_string(), "15m0s");

    assert!(sdv.set("forever").is_err());
    assert!(sdv.set("10").is_err());
    assert_eq!(sdv.to_string(), "15m0s");

    Ok(())
}

#[test]
fn test_text_and_json_propagate_parse_errors() -> Result<()> {
    let mut sdv: StringDuration = "1s".parse()?;

    let err = sdv.unmarshal_text(b"24hh").unwrap_err();
    assert!(err.to_string().contains("unknown unit"));

    let err = sdv.unmarshal_json(b"\"1x\"").unwrap_err();
    assert_eq!(err.to_string(), "time: unknown unit \"x\" in duration \"1x\"");

    assert_eq!(sdv.to_string(), "1s");
    Ok(())
}

#[test]
fn test_null_is_noop() -> Result<()> {
    let mut sdv: StringDuration = "42s".parse()?;

    sdv.unmarshal_text(b"null")?;
    assert_eq!(sdv.to_string(), "42s");

    sdv.unmarshal_json(b"null")?;
    assert_eq!(sdv.to_string(), "42s");

    Ok(())
}

#[test]
fn test_null_in_documents_decodes_to_zero() -> Result<()> {
    let holder: Holder = serde_json::from_str(r#"{"sdv": null}"#)?;
    assert_eq!(holder.value.to_string(), "0s");

    let holder: Holder = config::from_yaml_str("sdv: ~")?;
    assert_eq!(holder.value, StringDuration::ZERO);

    Ok(())
}

#[test]
fn test_binary_length_rejection() {
    let mut sdv = StringDuration::from_nanos(7);

    for len in [0usize, 1, 7, 9, 16] {
        let bytes = vec![0u8; len];
        let err = sdv.unmarshal_binary(&bytes).unwrap_err();
        assert_eq!(err, DurationError::Length(len));
        assert_eq!(err.to_string(), format!("expected 8 bytes, saw {len}"));
    }

    assert_eq!(sdv.nanoseconds(), 7);
}

#[test]
fn test_binary_overflow_rejection() {
    let mut sdv = StringDuration::from_nanos(7);

    let bytes = [0, 0, 0, 0, 0, 0, 0, 128];
    let err = sdv.unmarshal_binary(&bytes).unwrap_err();
    assert_eq!(err, DurationError::Overflow(1 << 63));
    assert_eq!(err.to_string(), "int64 overflow: 9223372036854775808");

    // A negative span's own encoding cannot be read back
    let negative: StringDuration = "-1h".parse().unwrap();
    assert!(matches!(
        sdv.unmarshal_binary(&negative.marshal_binary()),
        Err(DurationError::Overflow(_))
    ));

    assert_eq!(sdv.nanoseconds(), 7);
}

#[test]
fn test_decoders_reject_invalid_text() {
    let err = config::from_yaml_str::<Holder>("sdv: 24hh").unwrap_err();
    assert!(err.to_string().contains("unknown unit"));

    let err = config::from_toml_str::<Holder>("sdv = \"abc\"").unwrap_err();
    assert!(err.to_string().contains("invalid duration"));

    let mut map = Map::new();
    map.insert("sdv".to_string(), Value::String("5 minutes".to_string()));
    let err = config::decode_map::<Holder>(map).unwrap_err();
    assert!(err.to_string().contains("unknown unit"));

    let mut map = Map::new();
    map.insert("sdv".to_string(), Value::from(30));
    assert!(config::decode_map::<Holder>(map).is_err());
}

#[test]
fn test_flag_rejects_invalid_text() {
    let cmd = settable::flag_var(
        Command::new("negative"),
        "timeout",
        "request timeout",
        &StringDuration::default(),
    );
    let err = cmd
        .try_get_matches_from(["negative", "--timeout", "24hh"])
        .unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    assert!(err.to_string().contains("unknown unit"));
}
