//! Test fixtures and constants.

use serde_json::{json, Value};

/// AppRole credentials the mock Vault accepts.
pub const ROLE_ID: &str = "test-role";
pub const SECRET_ID: &str = "test-secret";

/// Token the mock Vault hands out on login.
pub const CLIENT_TOKEN: &str = "hvs.test-token";

/// KV v2 path of the standard app secret.
pub const APP_PATH: &str = "secret/data/app";

/// Fields of the standard app secret.
pub fn app_secret() -> Value {
    json!({
        "password": "s3cr3t",
        "username": "admin",
        "port": 5432,
        "tls": { "cert": "-----BEGIN CERTIFICATE-----" }
    })
}

/// Values file using the standard app secret.
pub const APP_VALUES: &str = "\
db:
  user: <vault:secret/data/app#username>
  password: <vault:secret/data/app#password>
  encoded: <vault:secret/data/app#password|b64enc>
  port: 5432
";

/// `APP_VALUES` after substitution.
pub const APP_VALUES_RESOLVED: &str = "\
db:
  user: admin
  password: s3cr3t
  encoded: czNjcjN0
  port: 5432
";

/// Values file without any reference.
pub const PLAIN_VALUES: &str = "replicaCount: 2\nimage:\n  tag: 1.25 # <pinned>\n";

/// First line the fake helm prints; its absence means helm never ran.
pub const FAKE_HELM_MARKER: &str = "args:";

/// Fake wrapped helm.
///
/// Prints its arguments, then the contents of every values file it was
/// given (`--values FILE`, `--values=FILE`, `-f FILE`, `-fFILE` or
/// `-f=FILE`), then `FAKE_HELM_OUTPUT` if set, and exits with
/// `FAKE_HELM_EXIT`.
pub const FAKE_HELM: &str = r#"#!/bin/sh
printf 'args:'
for arg in "$@"; do printf ' %s' "$arg"; done
printf '\n'
while [ $# -gt 0 ]; do
  case "$1" in
    --values|-f)
      shift
      [ $# -gt 0 ] && cat "$1"
      ;;
    --values=*)
      cat "${1#--values=}"
      ;;
    -f?*)
      f="${1#-f}"
      cat "${f#=}"
      ;;
  esac
  [ $# -gt 0 ] && shift
done
if [ -n "$FAKE_HELM_OUTPUT" ]; then
  printf '%s\n' "$FAKE_HELM_OUTPUT"
fi
exit ${FAKE_HELM_EXIT:-0}
"#;
