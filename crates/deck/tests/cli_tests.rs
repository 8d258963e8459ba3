//! Command-line behaviour of chaos-deck

use std::process::Command;
use tempfile::TempDir;

fn chaos_deck() -> Command {
    Command::new(env!("CARGO_BIN_EXE_chaos-deck"))
}

#[test]
fn test_missing_settings_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = chaos_deck()
        .arg("--settings")
        .arg(temp_dir.path().join("absent.json"))
        .args(["--scene", "title"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("loading settings"));
}

#[test]
fn test_unparsable_settings_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("deck.json");
    std::fs::write(&path, "{ not json").unwrap();
    let output = chaos_deck()
        .arg("--settings")
        .arg(&path)
        .args(["--scene", "title"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_settings_file_is_applied() {
    let temp_dir = TempDir::new().unwrap();
    let settings = temp_dir.path().join("deck.json");
    let timeline = temp_dir.path().join("deck-out.json");
    std::fs::write(&settings, r#"{"layout": {"font_size": 20.0}}"#).unwrap();
    let status = chaos_deck()
        .arg("--settings")
        .arg(&settings)
        .args(["--scene", "lorenz-system", "--output"])
        .arg(&timeline)
        .status()
        .unwrap();
    assert!(status.success());

    let deck: deck::Deck =
        serde_json::from_str(&std::fs::read_to_string(&timeline).unwrap()).unwrap();
    let font_size = deck.objects.iter().find_map(|o| match o {
        deck::SceneObject::Equation(eq) => Some(eq.font_size()),
        _ => None,
    });
    assert_eq!(font_size, Some(20.0));
}
