//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key");
    file
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_vars(key: &NamedTempFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key.path().display().to_string()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&mock_env(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_complete_configuration() {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let settings = session_settings_from_env(&mock_env(release_vars(&key)), BuildMode::Release)
        .expect("complete release settings");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(
        settings.fingerprint(),
        key_fingerprint(&Key::derive_from(&[b'k'; SESSION_KEY_MIN_LEN]))
    );
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(#[case] missing: &'static str) {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let mut vars = release_vars(&key);
    vars.remove(missing);

    let error = release_error(vars);

    assert!(matches!(error, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(COOKIE_SECURE_ENV, "")]
#[case(SAMESITE_ENV, "sometimes")]
fn release_rejects_malformed_toggles(#[case] name: &'static str, #[case] value: &str) {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let mut vars = release_vars(&key);
    vars.insert(name, value.to_owned());

    let error = release_error(vars);

    assert!(matches!(error, SessionConfigError::InvalidEnv { name: got, .. } if got == name));
}

#[rstest]
fn release_rejects_same_site_none_without_secure_cookie() {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let mut vars = release_vars(&key);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_rejects_ephemeral_keys() {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let mut vars = release_vars(&key);
    vars.insert(ALLOW_EPHEMERAL_ENV, "1".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_rejects_short_key() {
    let key = key_file(SESSION_KEY_MIN_LEN - 1);

    let error = release_error(release_vars(&key));

    assert!(matches!(
        error,
        SessionConfigError::KeyTooShort { length, min_len, .. }
            if length == SESSION_KEY_MIN_LEN - 1 && min_len == SESSION_KEY_MIN_LEN
    ));
}

#[rstest]
fn release_rejects_missing_key_file() {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let mut vars = release_vars(&key);
    let missing = key.path().with_extension("missing");
    vars.insert(KEY_FILE_ENV, missing.display().to_string());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::KeyRead { path, .. } if path == missing
    ));
}

#[rstest]
fn debug_defaults_when_unset() {
    let env = mock_env(HashMap::from([(
        KEY_FILE_ENV,
        "/nonexistent/session_key".to_owned(),
    )]));

    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("none", "0", false, SameSite::None)]
#[case("strict", "yes", true, SameSite::Strict)]
#[case("bogus", "bogus", true, SameSite::Lax)]
fn debug_tolerates_invalid_values(
    #[case] same_site: &str,
    #[case] secure: &str,
    #[case] expected_secure: bool,
    #[case] expected_same_site: SameSite,
) {
    let key = key_file(8);
    let env = mock_env(HashMap::from([
        (KEY_FILE_ENV, key.path().display().to_string()),
        (COOKIE_SECURE_ENV, secure.to_owned()),
        (SAMESITE_ENV, same_site.to_owned()),
    ]));

    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("lenient debug");

    assert_eq!(settings.cookie_secure, expected_secure);
    assert_eq!(settings.same_site, expected_same_site);
}

#[rstest]
fn debug_accepts_short_key_file() {
    let key = key_file(DERIVE_MIN_LEN);
    let env = mock_env(HashMap::from([(KEY_FILE_ENV, key.path().display().to_string())]));

    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("short debug key");

    assert_eq!(
        settings.fingerprint(),
        key_fingerprint(&Key::derive_from(&[b'k'; DERIVE_MIN_LEN]))
    );
}
