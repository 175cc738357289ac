//! End-to-end pipeline behavior against a scripted command runner
//!
//! Run with: cargo test --test bootstrap_pipeline

use anyhow::Result;
use compose_bootstrap::error::exit_code;
use compose_bootstrap::git::CheckoutAction;
use compose_bootstrap::{
    Bootstrap, BootstrapConfig, BootstrapError, CommandRunner, CommandStatus, Invocation, Profile,
    RunOptions,
};
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Stands in for git and docker: records every call, simulates the
/// filesystem effects of clone and sparse-checkout, and fails on demand.
#[derive(Default)]
struct ScriptedRunner {
    calls: RefCell<Vec<Invocation>>,
    failures: Vec<(&'static str, i32)>,
}

impl ScriptedRunner {
    fn failing(needle: &'static str, code: i32) -> Self {
        Self {
            failures: vec![(needle, code)],
            ..Default::default()
        }
    }

    fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }

    fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandStatus> {
        self.calls.borrow_mut().push(invocation.clone());

        let line = invocation.to_string();
        if let Some((_, code)) = self.failures.iter().find(|(n, _)| line.contains(n)) {
            return Ok(CommandStatus::from_code(*code));
        }

        let args: Vec<&str> = invocation.args.iter().map(String::as_str).collect();
        match args.as_slice() {
            ["clone", .., target] => fs::create_dir_all(Path::new(target).join(".git"))?,
            ["sparse-checkout", "set", path] => fs::create_dir_all(invocation.cwd.join(path))?,
            _ => {}
        }
        Ok(CommandStatus::from_code(0))
    }
}

fn project(env: &str) -> TempDir {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(".env"), env).unwrap();
    root
}

fn run(root: &Path, runner: &ScriptedRunner, profile: Profile) -> Result<CheckoutAction> {
    run_with(root, runner, RunOptions { profile, pull: false })
}

fn run_with(root: &Path, runner: &ScriptedRunner, options: RunOptions) -> Result<CheckoutAction> {
    let config = BootstrapConfig::default();
    let layout = config.layout(root)?;
    let report = Bootstrap::new(runner, &config, layout).run(options)?;
    Ok(report.checkout)
}

#[test]
fn test_second_run_updates_instead_of_cloning() {
    for profile in Profile::all() {
        let root = project("A=1\n");
        let runner = ScriptedRunner::default();

        assert_eq!(run(root.path(), &runner, profile).unwrap(), CheckoutAction::Cloned);
        let first = runner.lines();
        assert_eq!(first.iter().filter(|l| l.contains(" clone ")).count(), 1);

        runner.clear();
        assert_eq!(run(root.path(), &runner, profile).unwrap(), CheckoutAction::Updated);
        let second = runner.lines();
        assert!(!second.iter().any(|l| l.contains(" clone ")), "{profile}: {second:?}");
        assert_eq!(second[0], "git pull");
        assert!(root.path().join("supabase/.git").exists());
    }
}

#[test]
fn test_env_file_is_copied_exactly() {
    let content = "POSTGRES_PASSWORD=pa ss\u{e9}\nDASHBOARD_USERNAME=supabase\n# no newline";
    let root = project(content);
    let runner = ScriptedRunner::default();

    run(root.path(), &runner, Profile::Cpu).unwrap();

    let copied = fs::read(root.path().join("supabase/docker/.env")).unwrap();
    assert_eq!(copied, content.as_bytes());
}

#[test]
fn test_env_file_refreshed_on_rerun() {
    let root = project("VERSION=1\n");
    let runner = ScriptedRunner::default();
    run(root.path(), &runner, Profile::Cpu).unwrap();

    fs::write(root.path().join(".env"), "VERSION=2\n").unwrap();
    run(root.path(), &runner, Profile::Cpu).unwrap();

    assert_eq!(
        fs::read_to_string(root.path().join("supabase/docker/.env")).unwrap(),
        "VERSION=2\n"
    );
}

#[test]
fn test_profile_none_has_no_filter() {
    let root = project("A=1\n");
    let runner = ScriptedRunner::default();

    run(root.path(), &runner, Profile::None).unwrap();

    let compose: Vec<String> = runner
        .lines()
        .into_iter()
        .filter(|l| l.starts_with("docker compose"))
        .collect();
    assert_eq!(compose.len(), 2);
    assert!(compose.iter().all(|l| !l.contains("--profile")));
}

#[test]
fn test_profile_gpu_nvidia_is_passed_through() {
    let root = project("A=1\n");
    let runner = ScriptedRunner::default();

    run(root.path(), &runner, Profile::GpuNvidia).unwrap();

    let compose: Vec<String> = runner
        .lines()
        .into_iter()
        .filter(|l| l.starts_with("docker compose"))
        .collect();
    assert_eq!(
        compose,
        vec![
            "docker compose -f docker-compose.yml --profile gpu-nvidia down",
            "docker compose -f docker-compose.yml --profile gpu-nvidia up -d",
        ]
    );
}

#[test]
fn test_existing_checkout_never_recloned() {
    let root = project("A=1\n");
    fs::create_dir_all(root.path().join("supabase/.git")).unwrap();
    fs::create_dir_all(root.path().join("supabase/docker")).unwrap();
    let runner = ScriptedRunner::default();

    assert_eq!(run(root.path(), &runner, Profile::Cpu).unwrap(), CheckoutAction::Updated);

    let git: Vec<String> = runner
        .lines()
        .into_iter()
        .filter(|l| l.starts_with("git"))
        .collect();
    assert_eq!(git, vec!["git pull"]);
}

#[test]
fn test_failing_step_stops_the_run() {
    let cases = [
        ("sparse-checkout init", 129),
        ("checkout master", 1),
        (" down", 14),
        (" pull", 9),
        (" up -d", 18),
    ];

    for (needle, code) in cases {
        let root = project("A=1\n");
        let runner = ScriptedRunner::failing(needle, code);
        let options = RunOptions {
            profile: Profile::Cpu,
            pull: true,
        };

        let err = run_with(root.path(), &runner, options).unwrap_err();
        assert_eq!(exit_code(&err), code, "failing on {needle}");

        let lines = runner.lines();
        assert!(lines.last().unwrap().contains(needle), "{lines:?}");
        if needle != " up -d" {
            assert!(!lines.iter().any(|l| l.contains(" up -d")), "{lines:?}");
        }
    }
}

#[test]
fn test_failed_pull_skips_compose() {
    let root = project("A=1\n");
    fs::create_dir_all(root.path().join("supabase/.git")).unwrap();
    fs::create_dir_all(root.path().join("supabase/docker")).unwrap();
    let runner = ScriptedRunner::failing("git pull", 1);

    let err = run(root.path(), &runner, Profile::GpuAmd).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BootstrapError>(),
        Some(BootstrapError::CommandFailed { .. })
    ));
    assert_eq!(runner.lines(), vec!["git pull"]);
    assert!(!root.path().join("supabase/docker/.env").exists());
}

#[test]
fn test_corrupt_checkout_runs_nothing() {
    let root = project("A=1\n");
    fs::create_dir_all(root.path().join("supabase/docker")).unwrap();
    let runner = ScriptedRunner::default();

    let err = run(root.path(), &runner, Profile::Cpu).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BootstrapError>(),
        Some(BootstrapError::CorruptCheckout { .. })
    ));
    assert!(runner.lines().is_empty());
    assert!(root.path().join("supabase/docker").exists());
}

#[test]
fn test_interrupted_clone_is_reported_on_rerun() {
    let root = project("A=1\n");
    let interrupted = ScriptedRunner::failing("sparse-checkout init", 1);
    assert!(run(root.path(), &interrupted, Profile::Cpu).is_err());
    assert!(root.path().join("supabase/.git").exists());

    for _ in 0..2 {
        let runner = ScriptedRunner::default();
        let err = run(root.path(), &runner, Profile::Cpu).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BootstrapError>(),
            Some(BootstrapError::CorruptCheckout { .. })
        ));
        assert!(runner.lines().is_empty());
    }
}
