//! Integration tests for CLI functionality

#[cfg(feature = "cli")]
mod cli_integration_tests {
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    use phrase_complete::cli::commands::{format_completions, load_engine};
    use phrase_complete::cli::paths::{
        dotenv_data_path, find_dotenv, resolve_data_path_from, validate_config_path,
    };
    use phrase_complete::cli::{Cli, Commands, PersistentConfig};

    fn corpus_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.txt"),
            "To be or not to be.\nThat is the question.\n",
        )
        .unwrap();
        fs::write(dir.path().join("b.txt"), "Be quick about it.\n").unwrap();
        dir
    }

    #[test]
    fn test_config_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let config = PersistentConfig {
            data_path: Some(PathBuf::from("/srv/corpus")),
            limit: Some(3),
            correction_deadline_ms: Some(250),
        };
        config.save_to(Some(&path)).unwrap();

        let loaded = PersistentConfig::load_from(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_config_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");
        let loaded = PersistentConfig::load_from(Some(&path)).unwrap();
        assert_eq!(loaded, PersistentConfig::default());
    }

    #[test]
    fn test_partial_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "limit": 9 }"#).unwrap();

        let loaded = PersistentConfig::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.limit, Some(9));
        assert_eq!(loaded.data_path, None);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(PersistentConfig::load_from(Some(&path)).is_err());
    }

    #[test]
    fn test_config_must_be_json() {
        assert!(validate_config_path(&PathBuf::from("settings.json")).is_ok());
        assert!(validate_config_path(&PathBuf::from("settings.toml")).is_err());
        assert!(validate_config_path(&PathBuf::from("settings")).is_err());
    }

    #[test]
    fn test_merge_with_cli_prefers_cli() {
        let saved = PersistentConfig {
            data_path: Some(PathBuf::from("saved")),
            limit: Some(4),
            correction_deadline_ms: Some(10),
        };

        let merged = saved.merge_with_cli(Some(PathBuf::from("given")), None);
        assert_eq!(merged.data_path, Some(PathBuf::from("given")));
        assert_eq!(merged.limit, Some(4));
        assert_eq!(merged.correction_deadline_ms, Some(10));

        let config = merged.completion_config();
        assert_eq!(config.limit, 4);
        assert_eq!(config.correction_deadline_ms, Some(10));
    }

    #[test]
    fn test_data_path_resolution_order() {
        let saved = PersistentConfig {
            data_path: Some(PathBuf::from("saved")),
            ..Default::default()
        };
        let cli = Some(PathBuf::from("cli"));
        let env = Some(PathBuf::from("env"));
        let dotenv = Some(PathBuf::from("dotenv"));

        assert_eq!(
            resolve_data_path_from(cli.clone(), env.clone(), dotenv.clone(), &saved).unwrap(),
            PathBuf::from("cli")
        );
        assert_eq!(
            resolve_data_path_from(None, env, dotenv.clone(), &saved).unwrap(),
            PathBuf::from("env")
        );
        assert_eq!(
            resolve_data_path_from(None, Some(PathBuf::new()), dotenv, &saved).unwrap(),
            PathBuf::from("dotenv")
        );
        assert_eq!(
            resolve_data_path_from(None, None, Some(PathBuf::new()), &saved).unwrap(),
            PathBuf::from("saved")
        );
        assert!(
            resolve_data_path_from(None, None, None, &PersistentConfig::default()).is_err()
        );
    }

    #[test]
    fn test_dotenv_file_supplies_data_path() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(".env"),
            "# corpus location\nOTHER=1\nPATH_TO_DATA=\"/srv/archive\"\n",
        )
        .unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let file = find_dotenv(&nested).unwrap();
        assert_eq!(file, temp_dir.path().join(".env"));

        let value = dotenv_data_path(&file).unwrap();
        assert_eq!(value, Some(PathBuf::from("/srv/archive")));
        assert_eq!(
            resolve_data_path_from(None, None, value, &PersistentConfig::default()).unwrap(),
            PathBuf::from("/srv/archive")
        );
    }

    #[test]
    fn test_dotenv_without_data_path() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join(".env");
        fs::write(&file, "OTHER=1\n").unwrap();
        assert_eq!(dotenv_data_path(&file).unwrap(), None);
    }

    #[test]
    fn test_load_engine_and_format() {
        let dir = corpus_dir();
        let config = PersistentConfig {
            limit: Some(2),
            ..Default::default()
        };
        let engine = load_engine(dir.path(), &config).unwrap();

        let results = engine.suggest("be").unwrap();
        assert_eq!(
            format_completions(&results),
            "1. to be or not to be. (input\\0.txt, 0)\n2. to be or not to be. (input\\0.txt, 0)"
        );
    }

    #[test]
    fn test_load_engine_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let err = load_engine(&missing, &PersistentConfig::default()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("not a directory"));
        assert!(message.contains(&format!("Failed to load corpus from {}", missing.display())));
    }

    #[test]
    fn test_json_output_shape() {
        let dir = corpus_dir();
        let engine = load_engine(dir.path(), &PersistentConfig::default()).unwrap();
        let results = engine.complete("quick", 5).unwrap();

        let json: serde_json::Value = serde_json::to_value(&results).unwrap();
        assert_eq!(json[0]["completed_sentence"][0], "be");
        assert_eq!(json[0]["source_label"], "input\\1.txt");
        assert_eq!(json[0]["offset"], 0);
        assert_eq!(json[0]["query_length_at_match"], 5);
    }

    #[test]
    fn test_parse_query_command() {
        let cli = Cli::try_parse_from([
            "phrase-complete",
            "-v",
            "query",
            "to be",
            "--data",
            "corpus",
            "--limit",
            "3",
            "--json",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Query {
                text,
                data,
                limit,
                json,
            } => {
                assert_eq!(text, "to be");
                assert_eq!(data, Some(PathBuf::from("corpus")));
                assert_eq!(limit, Some(3));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_settings_command() {
        let cli = Cli::try_parse_from([
            "phrase-complete",
            "settings",
            "--set-limit",
            "7",
            "--set-deadline-ms",
            "100",
        ])
        .unwrap();

        match cli.command {
            Commands::Settings {
                set_data,
                set_limit,
                set_deadline_ms,
                reset,
            } => {
                assert_eq!(set_data, None);
                assert_eq!(set_limit, Some(7));
                assert_eq!(set_deadline_ms, Some(100));
                assert!(!reset);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
