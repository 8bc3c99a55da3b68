//! Engine settings assembled from config files and command-line flags

use std::io::Write;

use hybrid_ttt::{
    Difficulty, Engine, Error, Strength,
    cli::config::{EngineArgs, PositionArgs},
};
use tempfile::NamedTempFile;

fn config_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_file_is_loaded() {
    let file = config_file(r#"{"difficulty": "easy", "simulations": 150, "seed": 3}"#);
    let args = EngineArgs {
        config: Some(file.path().to_path_buf()),
        ..EngineArgs::default()
    };

    let config = args.resolve().unwrap();
    assert_eq!(config.difficulty, Difficulty::Easy);
    assert_eq!(config.simulations, Some(150));
    assert_eq!(config.seed, Some(3));
    assert!(Engine::new(&config).is_ok());
}

#[test]
fn test_flags_override_config_file() {
    let file = config_file(r#"{"difficulty": "easy", "minimax_threshold": 1}"#);
    let args = EngineArgs {
        config: Some(file.path().to_path_buf()),
        difficulty: Some(Difficulty::Hard),
        threshold: Some(7),
        ..EngineArgs::default()
    };

    let config = args.resolve().unwrap();
    assert_eq!(config.difficulty, Difficulty::Hard);
    assert_eq!(config.minimax_threshold, Some(7));
    assert!(matches!(
        config.strength(),
        Strength::Requested {
            difficulty: Difficulty::Hard,
            ..
        }
    ));
}

#[test]
fn test_invalid_config_is_rejected() {
    let file = config_file(r#"{"exploration": -2.0}"#);
    let args = EngineArgs {
        config: Some(file.path().to_path_buf()),
        ..EngineArgs::default()
    };
    assert!(matches!(
        args.resolve(),
        Err(Error::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_malformed_json_is_a_serialization_error() {
    let file = config_file("{ difficulty: hard");
    let args = EngineArgs {
        config: Some(file.path().to_path_buf()),
        ..EngineArgs::default()
    };
    assert!(matches!(args.resolve(), Err(Error::Serialization(_))));
}

#[test]
fn test_unknown_difficulty_in_file_is_rejected() {
    let file = config_file(r#"{"difficulty": "impossible"}"#);
    let args = EngineArgs {
        config: Some(file.path().to_path_buf()),
        ..EngineArgs::default()
    };
    assert!(args.resolve().is_err());
}

#[test]
fn test_position_from_board_string() {
    let args = PositionArgs {
        board: Some("XX.|O.O|...".to_string()),
        moves: None,
    };
    let board = args.resolve().unwrap();
    assert_eq!(board.encode(), "XX.O.O..._X");
}

#[test]
fn test_position_with_suffix_skips_piece_count_check() {
    let args = PositionArgs {
        board: Some("XX......._X".to_string()),
        moves: None,
    };
    let board = args.resolve().unwrap();
    assert_eq!(board.encode(), "XX......._X");

    let unsuffixed = PositionArgs {
        board: Some("XX.......".to_string()),
        moves: None,
    };
    assert!(matches!(
        unsuffixed.resolve(),
        Err(Error::InvalidPieceCounts { .. })
    ));
}

#[test]
fn test_position_rejects_illegal_move_list() {
    let args = PositionArgs {
        board: None,
        moves: Some("4,4".to_string()),
    };
    assert!(matches!(args.resolve(), Err(Error::IllegalMove { .. })));
}
