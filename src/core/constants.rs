//! Constants used throughout helm-vault.
//!
//! Centralizes environment variable names and defaults.

/// Binary name, used as the error prefix and in the user agent.
pub const BIN_NAME: &str = "helm-vault";

/// Log filter environment variable.
pub const LOG_ENV: &str = "HELM_VAULT_LOG";

/// Default log filter when `HELM_VAULT_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "helm_vault=warn";

/// Wrapped command.
pub const CMD_ENV: &str = "ARGOCD_HELM_VAULT_CMD";

/// Default wrapped command (the real helm binary renamed next to the shim).
pub const DEFAULT_CMD: &str = "_helm";

/// Master switch; anything but `true` runs the wrapped command untouched.
pub const ENABLED_ENV: &str = "ARGOCD_HELM_VAULT_ENABLED";

/// Substitute references in values files.
pub const VALUES_ENV: &str = "ARGOCD_HELM_VAULT_VALUES";

/// Substitute references in the wrapped command's stdout.
pub const OUTPUT_ENV: &str = "ARGOCD_HELM_VAULT_OUTPUT";

/// AppRole role id.
pub const ROLE_ID_ENV: &str = "ARGOCD_HELM_VAULT_ROLE_ID";

/// AppRole secret id.
pub const SECRET_ID_ENV: &str = "ARGOCD_HELM_VAULT_SECRET_ID";

/// AppRole auth mount.
pub const APPROLE_MOUNT_ENV: &str = "ARGOCD_HELM_VAULT_APPROLE_MOUNT";

/// Default AppRole auth mount.
pub const DEFAULT_APPROLE_MOUNT: &str = "approle";

/// Vault address.
pub const VAULT_ADDR_ENV: &str = "VAULT_ADDR";

/// Default Vault address, same as the official Vault client.
pub const DEFAULT_VAULT_ADDR: &str = "https://127.0.0.1:8200";

/// Pre-issued Vault token.
pub const VAULT_TOKEN_ENV: &str = "VAULT_TOKEN";

/// Vault Enterprise namespace.
pub const VAULT_NAMESPACE_ENV: &str = "VAULT_NAMESPACE";

/// Long and short forms of helm's values flag.
pub const VALUES_FLAG: &str = "--values";
pub const VALUES_FLAG_SHORT: &str = "-f";

/// Separator printed after substituted wrapped output.
pub const DOCUMENT_SEPARATOR: &str = "---\n";
