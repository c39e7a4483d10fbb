use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;
use vagrant_roles::refresh::{RefreshGate, RefreshOutcome, STALENESS_SECS};
use vagrant_roles::vcs::{FetchRunner, FetchStatus};
use vagrant_roles::Environment;

/// Records fetch requests instead of running git.
#[derive(Default)]
struct RecordingFetch {
    calls: RefCell<Vec<(PathBuf, String)>>,
}

impl FetchRunner for RecordingFetch {
    fn fetch(&self, root: &Path, remote: &str) -> FetchStatus {
        self.calls
            .borrow_mut()
            .push((root.to_path_buf(), remote.to_string()));
        FetchStatus::Exited { code: Some(0) }
    }
}

fn environment_with_fetch_head() -> (TempDir, Environment, SystemTime) {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(".git")).unwrap();
    fs::write(temp.path().join(".git/FETCH_HEAD"), "").unwrap();
    let env = Environment::new(temp.path()).unwrap();
    let fetched = env.fetch_marker().unwrap().modified.unwrap();
    (temp, env, fetched)
}

fn open() -> RefreshGate {
    RefreshGate::from_signals(false, false)
}

#[test]
fn stale_checkout_is_fetched_from_root() {
    let (_temp, env, fetched) = environment_with_fetch_head();
    let runner = RecordingFetch::default();
    let now = fetched + Duration::from_secs(STALENESS_SECS + 1);

    let outcome = env.update_with(&runner, open(), now).unwrap();

    assert!(outcome.attempted());
    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, env.root());
    assert_eq!(calls[0].1, "origin");
}

#[test]
fn recent_fetch_is_not_repeated() {
    let (_temp, env, fetched) = environment_with_fetch_head();
    let runner = RecordingFetch::default();
    let now = fetched + Duration::from_secs(STALENESS_SECS - 1);

    assert_eq!(
        env.update_with(&runner, open(), now).unwrap(),
        RefreshOutcome::Fresh
    );
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn opt_out_suppresses_stale_fetch() {
    let (_temp, env, fetched) = environment_with_fetch_head();
    let runner = RecordingFetch::default();
    let now = fetched + Duration::from_secs(STALENESS_SECS + 1);

    for gate in [
        RefreshGate::from_signals(true, false),
        RefreshGate::from_signals(false, true),
    ] {
        assert_eq!(
            env.update_with(&runner, gate, now).unwrap(),
            RefreshOutcome::Suppressed
        );
    }
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn opt_out_file_at_root_is_detected() {
    let (temp, env, _) = environment_with_fetch_head();
    fs::write(temp.path().join("no-update"), "").unwrap();
    assert!(env.refresh_gate().opt_out);
}

#[test]
fn missing_fetch_head_is_never_stale() {
    let temp = TempDir::new().unwrap();
    let env = Environment::new(temp.path()).unwrap();
    let runner = RecordingFetch::default();
    let far_future = SystemTime::now() + Duration::from_secs(STALENESS_SECS * 100);

    assert_eq!(
        env.update_with(&runner, open(), far_future).unwrap(),
        RefreshOutcome::Fresh
    );
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn forced_update_still_honors_opt_out() {
    let (_temp, env, _) = environment_with_fetch_head();
    let runner = RecordingFetch::default();

    assert!(env.force_update_with(&runner, open()).unwrap().attempted());
    assert_eq!(
        env.force_update_with(&runner, RefreshGate::from_signals(true, false))
            .unwrap(),
        RefreshOutcome::Suppressed
    );
    assert_eq!(runner.calls.borrow().len(), 1);
}

#[test]
fn failed_fetch_is_an_outcome_not_an_error() {
    struct FailingFetch;
    impl FetchRunner for FailingFetch {
        fn fetch(&self, _root: &Path, _remote: &str) -> FetchStatus {
            FetchStatus::Exited { code: Some(128) }
        }
    }

    let (_temp, env, fetched) = environment_with_fetch_head();
    let now = fetched + Duration::from_secs(STALENESS_SECS + 1);
    let outcome = env.update_with(&FailingFetch, open(), now).unwrap();
    assert_eq!(
        outcome,
        RefreshOutcome::Attempted(FetchStatus::Exited { code: Some(128) })
    );
}
