//! Tests for values file substitution.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_values_file_substituted_before_helm_runs() {
    let t = Test::with_app_secret();
    t.write("values.yaml", APP_VALUES);

    let output = t.template("values.yaml");
    assert_success(&output);

    // The fake helm cats the values file, so it must already be resolved
    assert_stdout_contains(&output, "args: template app . --values values.yaml");
    assert_stdout_contains(&output, APP_VALUES_RESOLVED);
    assert_eq!(t.read("values.yaml"), APP_VALUES_RESOLVED);

    t.vault.verify();
}

#[test]
fn test_same_path_read_once_per_file() {
    let t = Test::with_app_secret();
    t.write(
        "values.yaml",
        "a: <vault:secret/data/app#username>\nb: <vault:secret/data/app#password>\nc: <vault:secret/data/app#username>\n",
    );

    t.template("values.yaml");

    assert_eq!(t.read("values.yaml"), "a: admin\nb: s3cr3t\nc: admin\n");
    t.vault.verify();
}

#[test]
fn test_each_values_file_processed() {
    let t = Test::new();
    t.vault.login(1);
    t.vault.kv2_secret(APP_PATH, app_secret(), 2);
    t.write("base.yaml", "user: <vault:secret/data/app#username>\n");
    t.write("prod.yaml", "pass: <vault:secret/data/app#password>\n");

    t.cmd()
        .args(["template", ".", "-f", "base.yaml", "--values=prod.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user: admin"))
        .stdout(predicate::str::contains("pass: s3cr3t"));

    assert_eq!(t.read("base.yaml"), "user: admin\n");
    assert_eq!(t.read("prod.yaml"), "pass: s3cr3t\n");
    t.vault.verify();
}

#[test]
fn test_attached_values_forms_processed() {
    let t = Test::new();
    t.vault.login(1);
    t.vault.kv2_secret(APP_PATH, app_secret(), 3);
    t.write("a.yaml", "a: <vault:secret/data/app#username>\n");
    t.write("b.yaml", "b: <vault:secret/data/app#password>\n");
    t.write("c.yaml", "c: <vault:secret/data/app#password|b64enc>\n");

    t.cmd()
        .args(["template", ".", "--values=a.yaml", "-fb.yaml", "-f=c.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a: admin\n"))
        .stdout(predicate::str::contains("b: s3cr3t\n"))
        .stdout(predicate::str::contains("c: czNjcjN0\n"));

    t.vault.verify();
}

#[test]
fn test_no_references_makes_no_vault_calls() {
    let t = Test::new();
    t.write("values.yaml", PLAIN_VALUES);

    let output = t.template("values.yaml");
    assert_success(&output);

    assert_eq!(t.read("values.yaml"), PLAIN_VALUES);
    assert_eq!(t.vault.requests(), 0);
}

#[test]
fn test_unresolvable_references_left_in_place() {
    let t = Test::with_app_secret();
    let values = "missing: <vault:secret/data/app#nope>\nport: <vault:secret/data/app#port>\ntls: <vault:secret/data/app#tls>\nbad: <vault: #x>\n";
    t.write("values.yaml", values);

    let output = t.template("values.yaml");
    assert_success(&output);

    assert_eq!(t.read("values.yaml"), values);
    t.vault.verify();
}

#[test]
fn test_partial_substitution() {
    let t = Test::with_app_secret();
    t.write(
        "values.yaml",
        "missing: <vault:secret/data/app#nope>\nuser: <vault:secret/data/app#username>\n",
    );

    assert_success(&t.template("values.yaml"));

    assert_eq!(
        t.read("values.yaml"),
        "missing: <vault:secret/data/app#nope>\nuser: admin\n"
    );
}

#[test]
fn test_kv1_flat_secret() {
    let t = Test::new();
    t.vault.login(1);
    t.vault.read(
        "kv/app",
        200,
        serde_json::json!({ "data": { "token": "abc123" } }),
        1,
    );
    t.write("values.yaml", "token: <vault:kv/app#token>\n");

    assert_success(&t.template("values.yaml"));
    assert_eq!(t.read("values.yaml"), "token: abc123\n");
}

#[test]
fn test_values_replacement_disabled() {
    let t = Test::new();
    t.write("values.yaml", APP_VALUES);

    let output = t
        .cmd()
        .env("ARGOCD_HELM_VAULT_VALUES", "false")
        .args(["template", "app", ".", "--values", "values.yaml"])
        .output()
        .unwrap();
    assert_success(&output);

    assert_eq!(t.read("values.yaml"), APP_VALUES);
    assert_eq!(t.vault.requests(), 0);
}

#[test]
fn test_preset_token_used_without_role() {
    let t = Test::new();
    t.vault.login(0);
    t.vault.kv2_secret(APP_PATH, app_secret(), 1);
    t.write("values.yaml", "pass: <vault:secret/data/app#password>\n");

    let output = t
        .cmd()
        .env_remove("ARGOCD_HELM_VAULT_ROLE_ID")
        .env("VAULT_TOKEN", CLIENT_TOKEN)
        .args(["template", ".", "-f", "values.yaml"])
        .output()
        .unwrap();
    assert_success(&output);

    assert_eq!(t.read("values.yaml"), "pass: s3cr3t\n");
    t.vault.verify();
}
