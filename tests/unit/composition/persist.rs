use super::*;

#[test]
fn memory_vault_round_trips_values() {
    let mut vault = MemoryVault::new();
    assert!(vault.get(CANDIDATE_IMAGE_KEY).is_none());
    vault.set(CANDIDATE_IMAGE_KEY, "data:image/png;base64,AA==").unwrap();
    assert_eq!(
        vault.get(CANDIDATE_IMAGE_KEY).as_deref(),
        Some("data:image/png;base64,AA==")
    );
}

#[test]
fn empty_value_clears_a_key() {
    let mut vault = MemoryVault::new();
    vault.set(LOGO_IMAGE_KEY, "data:image/png;base64,AA==").unwrap();
    vault.set(LOGO_IMAGE_KEY, "").unwrap();
    assert!(vault.get(LOGO_IMAGE_KEY).is_none());
}

#[test]
fn file_vault_starts_empty_without_backing_file() {
    let dir = tempfile::tempdir().unwrap();
    let vault = JsonFileVault::open(dir.path().join("vault.json")).unwrap();
    assert!(vault.get(CANDIDATE_IMAGE_KEY).is_none());
}

#[test]
fn file_vault_persists_across_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.json");

    let mut vault = JsonFileVault::open(&path).unwrap();
    vault.set(CANDIDATE_IMAGE_KEY, "data:image/png;base64,AA==").unwrap();
    vault.set(LOGO_IMAGE_KEY, "data:image/png;base64,BB==").unwrap();
    drop(vault);

    let reopened = JsonFileVault::open(&path).unwrap();
    assert_eq!(
        reopened.get(CANDIDATE_IMAGE_KEY).as_deref(),
        Some("data:image/png;base64,AA==")
    );
    assert_eq!(
        reopened.get(LOGO_IMAGE_KEY).as_deref(),
        Some("data:image/png;base64,BB==")
    );
}

#[test]
fn file_vault_rejects_corrupt_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(JsonFileVault::open(&path).is_err());
}
