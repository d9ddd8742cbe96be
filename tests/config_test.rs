use clap::{CommandFactory, FromArgMatches, Parser};
use pinforge::config::{parse_count, parse_flag, LogSettings, DEFAULT_LOG_PATH};
use pinforge::log::LogLayout;
use pinforge::profiles::{resolve_lock_type_code, LockType};
use pinforge::sequence::{EnabledTypes, PinType};
use rstest::rstest;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    log: LogSettings,
}

fn parse_cli(args: &[&str]) -> (TestCli, clap::ArgMatches) {
    let matches = TestCli::command()
        .try_get_matches_from(std::iter::once("pinforge").chain(args.iter().copied()))
        .unwrap();
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli, matches)
}

#[rstest]
#[case("6", 6)]
#[case(" 12 ", 12)]
#[case("1", 1)]
fn test_parse_count_accepts_positive_integers(#[case] raw: &str, #[case] expected: usize) {
    assert_eq!(parse_count(raw, "pin count").unwrap(), expected);
}

#[rstest]
#[case("abc")]
#[case("")]
#[case("0")]
#[case("-4")]
#[case("3.0")]
fn test_parse_count_rejects_garbage(#[case] raw: &str) {
    let err = parse_count(raw, "pin count").unwrap_err();
    assert_eq!(err.kind(), "invalid_argument");
}

#[test]
fn test_parse_flag() {
    assert!(parse_flag(Some("true")));
    assert!(parse_flag(Some("TRUE")));
    assert!(!parse_flag(Some("false")));
    assert!(!parse_flag(Some("1")));
    assert!(!parse_flag(None));
}

#[test]
fn test_empty_selection_defaults_to_standard() {
    let enabled = EnabledTypes::from_flags(false, false, false);
    assert_eq!(enabled.len(), 1);
    assert!(enabled.contains(PinType::Standard));

    let only_combo = EnabledTypes::new([PinType::Combination]);
    assert!(only_combo.contains(PinType::Standard));
    assert!(!only_combo.contains(PinType::Combination));
}

#[test]
fn test_enabled_types_deserialize_normalizes() {
    let enabled: EnabledTypes = serde_json::from_str("[]").unwrap();
    assert_eq!(enabled, EnabledTypes::default());

    let enabled: EnabledTypes = serde_json::from_str(r#"["spool","serrated"]"#).unwrap();
    assert!(enabled.contains(PinType::Spool) && enabled.contains(PinType::Serrated));
}

#[rstest]
#[case("A1100", "A1100")]
#[case("a1100", "A1100")]
#[case("schlage", "SC1")]
#[case("Kwikset", "KW1")]
#[case("dial", "SAFE")]
#[case("M1", "M1")]
#[case("weird code", "weird code")]
fn test_lock_type_codes(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(resolve_lock_type_code(raw), expected);
}

#[test]
fn test_profile_domains() {
    assert_eq!(LockType::A1100.profile().height_domain, 1..=8);
    assert_eq!(LockType::Sc1.profile().height_domain, 0..=9);
    assert_eq!(LockType::Kw1.profile().height_domain, 1..=6);
    assert_eq!(LockType::A1100.profile().macs_limit, None);
    assert!(LockType::Safe.profile().is_combination());
}

#[test]
fn test_log_settings_defaults_from_cli() {
    let (cli, _) = parse_cli(&[]);
    assert_eq!(cli.log.log_path, PathBuf::from(DEFAULT_LOG_PATH));
    assert_eq!(cli.log.layout, LogLayout::PerPin);
}

#[test]
fn test_log_settings_file_then_cli_override() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{ "log_path": "from_file.csv", "layout": "per_sequence" }}"#
    )
    .unwrap();

    let mut settings = LogSettings::load_from_file(file.path()).unwrap();
    assert_eq!(settings.log_path, PathBuf::from("from_file.csv"));
    assert_eq!(settings.layout, LogLayout::PerSequence);

    // Only flags typed on the command line replace file values.
    let (cli, matches) = parse_cli(&["--log", "typed.csv"]);
    settings.merge_from_cli(&cli.log, &matches);
    assert_eq!(settings.log_path, PathBuf::from("typed.csv"));
    assert_eq!(settings.layout, LogLayout::PerSequence);
}

#[test]
fn test_partial_settings_file_keeps_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "layout": "per_sequence" }}"#).unwrap();
    let settings = LogSettings::load_from_file(file.path()).unwrap();
    assert_eq!(settings.log_path, PathBuf::from(DEFAULT_LOG_PATH));
}

#[test]
fn test_bad_settings_file_is_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "not json").unwrap();
    let err = LogSettings::load_from_file(file.path()).unwrap_err();
    assert_eq!(err.kind(), "config_error");
}
