//! Integration tests for regsweep

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;

    fn regsweep() -> Command {
        cargo_bin_cmd!("regsweep")
    }

    #[test]
    fn help_displays() {
        regsweep()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("repository:clean"));
    }

    #[test]
    fn version_displays() {
        regsweep()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("regsweep"));
    }

    #[test]
    fn clean_requires_arguments() {
        regsweep()
            .args(["repository:clean", "myreg"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("<REPOSITORY>"));
    }

    #[test]
    fn clean_help_lists_options() {
        regsweep()
            .args(["repository:clean", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--cacheExpireSeconds"))
            .stdout(predicate::str::contains("--delete"));
    }
}

#[cfg(unix)]
mod fake_registry_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const LISTING: &str = r#"[
        {"digest": "sha256:aaa", "tags": ["v1", "v2"]},
        {"digest": "sha256:bbb", "tags": []}
    ]"#;

    /// A stand-in for `az` that logs its arguments and serves listing.json
    const FAKE_AZ: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
echo "$@" >> "$dir/calls.log"
if [ -f "$dir/stderr.txt" ]; then cat "$dir/stderr.txt" >&2; fi
case "$3" in
  show-manifests)
    if [ -f "$dir/fail" ]; then exit 1; fi
    cat "$dir/listing.json"
    ;;
  delete)
    exit 0
    ;;
esac
"#;

    struct FakeRegistry {
        dir: TempDir,
    }

    impl FakeRegistry {
        fn new(listing: &str) -> Self {
            let dir = TempDir::new().unwrap();
            let script = dir.path().join("fake-az");
            std::fs::write(&script, FAKE_AZ).unwrap();
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
            std::fs::write(dir.path().join("listing.json"), listing).unwrap();

            let config = format!(
                "[general]\naudit_log = false\n\n[registry]\nprogram = \"{}\"\nprefix = [\"acr\"]\n\n[cache]\ndir = \"{}\"\n",
                script.display(),
                dir.path().join("cache").display()
            );
            std::fs::write(dir.path().join("config.toml"), config).unwrap();

            Self { dir }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn command(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("regsweep");
            cmd.env("REGSWEEP_CONFIG", self.path("config.toml"));
            cmd
        }

        fn calls(&self) -> Vec<String> {
            read_lines(&self.path("calls.log"))
        }
    }

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn reports_tagged_and_orphaned() {
        let registry = FakeRegistry::new(LISTING);

        registry
            .command()
            .args(["repository:clean", "myreg", "app"])
            .assert()
            .success()
            .stdout("Tagged manifest: sha256:aaa tags: v1, v2\nOrphaned manifest: sha256:bbb\n");

        assert_eq!(
            registry.calls(),
            vec!["acr repository show-manifests --name myreg --repository app"]
        );
    }

    #[test]
    fn deletes_orphaned_manifests() {
        let registry = FakeRegistry::new(LISTING);

        registry
            .command()
            .args(["repository:clean", "myreg", "app", "--delete"])
            .assert()
            .success()
            .stdout(
                "Tagged manifest: sha256:aaa tags: v1, v2\n\
                 Orphaned manifest: sha256:bbb\n\
                 Deleting manifest: sha256:bbb\n",
            );

        assert_eq!(
            registry.calls(),
            vec![
                "acr repository show-manifests --name myreg --repository app",
                "acr repository delete -y --name myreg --repository app --manifest sha256:bbb",
            ]
        );
    }

    #[test]
    fn empty_listing_prints_nothing() {
        let registry = FakeRegistry::new("[]");

        registry
            .command()
            .args(["repository:clean", "myreg", "app", "-d"])
            .assert()
            .success()
            .stdout("");

        assert_eq!(registry.calls().len(), 1);
    }

    #[test]
    fn failed_listing_aborts() {
        let registry = FakeRegistry::new(LISTING);
        std::fs::write(registry.path("fail"), "").unwrap();

        registry
            .command()
            .args(["repository:clean", "myreg", "app"])
            .assert()
            .failure()
            .stdout("")
            .stderr(predicate::str::contains("Command failed"));
    }

    #[test]
    fn malformed_listing_reports_output() {
        let registry = FakeRegistry::new("this is not json");

        registry
            .command()
            .args(["repository:clean", "myreg", "app"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Failed to get manifests: this is not json",
            ));
    }

    #[test]
    fn second_run_uses_cache() {
        let registry = FakeRegistry::new(LISTING);

        registry
            .command()
            .args(["repository:clean", "myreg", "team/app"])
            .assert()
            .success();

        // A broken listing would fail the run if the tool were asked again
        std::fs::write(registry.path("listing.json"), "broken").unwrap();

        registry
            .command()
            .args(["repository:clean", "myreg", "team/app"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Orphaned manifest: sha256:bbb"));

        assert_eq!(registry.calls().len(), 1);
    }

    #[test]
    fn refresh_ignores_cache() {
        let registry = FakeRegistry::new(LISTING);

        registry
            .command()
            .args(["repository:clean", "myreg", "app"])
            .assert()
            .success();

        std::fs::write(registry.path("listing.json"), "[]").unwrap();

        registry
            .command()
            .args(["repository:clean", "myreg", "app", "--refresh"])
            .assert()
            .success()
            .stdout("");

        assert_eq!(registry.calls().len(), 2);
    }

    #[test]
    fn zero_ttl_is_not_reused() {
        let registry = FakeRegistry::new(LISTING);

        for _ in 0..2 {
            registry
                .command()
                .args(["repository:clean", "myreg", "app", "-c", "0"])
                .assert()
                .success();
        }

        assert_eq!(registry.calls().len(), 2);
    }

    #[test]
    fn tool_stderr_is_forwarded() {
        let registry = FakeRegistry::new("[]");
        std::fs::write(registry.path("stderr.txt"), "WARNING: preview command\n").unwrap();

        registry
            .command()
            .args(["repository:clean", "myreg", "app"])
            .assert()
            .success()
            .stdout("WARNING: preview command\n");
    }

    #[test]
    fn cache_list_and_clear() {
        let registry = FakeRegistry::new(LISTING);

        registry
            .command()
            .args(["repository:clean", "myreg", "team/app"])
            .assert()
            .success();

        registry
            .command()
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("show-manifest.myreg.team_app"));

        registry
            .command()
            .args(["cache", "clear"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed 1 cached listing(s)"));

        registry
            .command()
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached listings"));
    }

    #[test]
    fn config_path_and_show() {
        let registry = FakeRegistry::new(LISTING);

        registry
            .command()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));

        registry
            .command()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[registry]"))
            .stdout(predicate::str::contains("fake-az"));
    }
}
