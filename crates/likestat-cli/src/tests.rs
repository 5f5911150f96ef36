use super::*;

#[test]
fn parses_run_with_defaults() {
    let cli = Cli::try_parse_from(["likestat", "run"]).expect("expected valid cli args");

    match cli.command {
        Commands::Run {
            owner_id,
            post_id,
            object_type,
            today,
            output,
            no_save,
        } => {
            assert!(owner_id.is_none());
            assert!(post_id.is_none());
            assert_eq!(object_type, ObjectType::Post);
            assert!(today.is_none());
            assert!(output.is_none());
            assert!(!no_save);
        }
        Commands::Age { .. } => panic!("expected run command"),
    }
}

#[test]
fn parses_run_with_negative_owner_and_date() {
    let cli = Cli::try_parse_from([
        "likestat",
        "run",
        "--owner-id",
        "-48632629",
        "--post-id",
        "12829",
        "--today",
        "2024-06-01",
        "--object-type",
        "photo",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Run {
            owner_id: Some(-48_632_629),
            post_id: Some(12829),
            object_type: ObjectType::Photo,
            today: Some(d),
            ..
        } if d == NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    ));
}

#[test]
fn rejects_malformed_today() {
    let result = Cli::try_parse_from(["likestat", "run", "--today", "01.06.2024"]);
    assert!(result.is_err());
}

#[test]
fn rejects_unknown_object_type() {
    let result = Cli::try_parse_from(["likestat", "run", "--object-type", "story"]);
    assert!(result.is_err());
}

#[test]
fn no_save_conflicts_with_output() {
    let result = Cli::try_parse_from(["likestat", "run", "--no-save", "--output", "x.json"]);
    assert!(result.is_err());
}

#[test]
fn parses_age_command() {
    let cli = Cli::try_parse_from(["likestat", "age", "1.1.2000", "--today", "2024-06-01"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Age { ref bdate, today: Some(_) } if bdate == "1.1.2000"
    ));
}

#[test]
fn command_is_required() {
    assert!(Cli::try_parse_from(["likestat"]).is_err());
}

#[test]
fn default_output_path_is_stats_json_in_output_dir() {
    let path = output::default_path(std::path::Path::new("data"));
    assert_eq!(path, std::path::PathBuf::from("data/stats.json"));
}

#[test]
fn save_stats_creates_directories_and_writes_json() {
    let dir = std::env::temp_dir().join(format!("likestat-test-{}", std::process::id()));
    let path = dir.join("nested").join("stats.json");
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let stats = likestat_core::aggregate(12829, &[], today);

    output::save_stats(&stats, &path).expect("save should succeed");

    let written = std::fs::read_to_string(&path).expect("file should exist");
    let value: serde_json::Value = serde_json::from_str(&written).expect("valid json");
    assert_eq!(value["post_id"], 12829);
    assert_eq!(value["age"]["unknown"], 0);
    assert_eq!(value["sex"]["male"], 0);

    std::fs::remove_dir_all(&dir).ok();
}
