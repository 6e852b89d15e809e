//! Tests for session settings.

use std::collections::HashMap;
use std::io::Write;

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key");
    file
}

fn env_with(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

#[fixture]
fn full_key() -> NamedTempFile {
    key_file(MIN_KEY_LEN)
}

fn release_vars(key: &NamedTempFile) -> Vec<(&'static str, String)> {
    vec![
        (KEY_FILE_ENV, key.path().to_string_lossy().into_owned()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]
}

fn env_from(vars: &[(&'static str, String)]) -> MockEnv {
    let borrowed: Vec<(&str, &str)> = vars.iter().map(|(n, v)| (*n, v.as_str())).collect();
    env_with(&borrowed)
}

#[rstest]
fn release_accepts_explicit_settings(full_key: NamedTempFile) {
    let env = env_from(&release_vars(&full_key));
    let settings = SessionSettings::from_env(&env, BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(full_key: NamedTempFile, #[case] missing: &str) {
    let vars: Vec<_> = release_vars(&full_key)
        .into_iter()
        .filter(|(name, _)| *name != missing)
        .collect();
    let error = SessionSettings::from_env(&env_from(&vars), BuildMode::Release)
        .expect_err("missing toggle rejected");
    assert!(matches!(error, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
fn release_rejects_malformed_boolean(full_key: NamedTempFile) {
    let mut vars = release_vars(&full_key);
    vars[1].1 = "maybe".to_owned();
    let error = SessionSettings::from_env(&env_from(&vars), BuildMode::Release)
        .expect_err("malformed toggle rejected");
    assert!(matches!(
        error,
        SessionConfigError::InvalidEnv { name: COOKIE_SECURE_ENV, .. }
    ));
}

#[rstest]
fn release_rejects_same_site_none_without_secure(full_key: NamedTempFile) {
    let mut vars = release_vars(&full_key);
    vars[1].1 = "0".to_owned();
    vars[2].1 = "None".to_owned();
    let error = SessionSettings::from_env(&env_from(&vars), BuildMode::Release)
        .expect_err("insecure SameSite=None rejected");
    assert!(matches!(error, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_rejects_ephemeral_keys(full_key: NamedTempFile) {
    let mut vars = release_vars(&full_key);
    vars[3].1 = "yes".to_owned();
    let error = SessionSettings::from_env(&env_from(&vars), BuildMode::Release)
        .expect_err("ephemeral keys rejected");
    assert!(matches!(error, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = key_file(MIN_KEY_LEN - 1);
    let error = SessionSettings::from_env(&env_from(&release_vars(&short)), BuildMode::Release)
        .expect_err("short key rejected");
    assert!(matches!(
        error,
        SessionConfigError::KeyTooShort { length, .. } if length == MIN_KEY_LEN - 1
    ));
}

#[rstest]
fn release_requires_a_readable_key() {
    let env = env_with(&[
        (KEY_FILE_ENV, "/nonexistent/frontdesk/session_key"),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Lax"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ]);
    let error =
        SessionSettings::from_env(&env, BuildMode::Release).expect_err("missing key rejected");
    assert!(matches!(error, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_falls_back_to_defaults() {
    let env = env_with(&[
        (KEY_FILE_ENV, "/nonexistent/frontdesk/session_key"),
        (SAMESITE_ENV, "sideways"),
    ]);
    let settings = SessionSettings::from_env(&env, BuildMode::Debug).expect("lenient debug");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("TRUE", Some(true))]
#[case(" n ", None)]
#[case("no", Some(false))]
#[case("2", None)]
fn booleans_are_case_insensitive(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}

#[rstest]
fn fingerprint_is_stable_per_key(full_key: NamedTempFile) {
    let env = env_from(&release_vars(&full_key));
    let first = SessionSettings::from_env(&env, BuildMode::Release).expect("settings");
    let second = SessionSettings::from_env(&env, BuildMode::Release).expect("settings");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first.fingerprint().len(), 16);
    assert!(format!("{first:?}").contains(&first.fingerprint()));
}
