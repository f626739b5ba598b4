//! Built-in rule tables.
//!
//! Each table is `(id, pattern, message)` in declaration order. Order matters
//! only for which message is surfaced when several rules of one category match.

use crate::rule::{PatternCategory, RuleSpec};

/// Version tag of the built-in tables. Bump whenever a table changes.
pub const BUILTIN_VERSION: &str = "1.2.0";

type Row = (&'static str, &'static str, &'static str);

const DESTRUCTIVE: &[Row] = &[
    ("destructive.rm-root", r"\brm\s+-rf\s+/(\s|$)", "recursive delete of the filesystem root"),
    ("destructive.rm-root-glob", r"\brm\s+-rf\s+/\*", "recursive delete of everything under the root"),
    ("destructive.sudo-rm", r"\bsudo\s+rm\s+-rf\b", "privileged recursive delete"),
    ("destructive.mkfs", r"\bmkfs\b", "formats a filesystem"),
    ("destructive.dd", r"\bdd\s+if=", "raw block copy that can overwrite disks"),
    ("destructive.shutdown", r"\bshutdown\b", "shuts the machine down"),
    ("destructive.reboot", r"\breboot\b", "reboots the machine"),
    ("destructive.fork-bomb", r":\(\)\s*\{\s*:\s*\|\s*:\s*&\s*\}\s*;", "fork bomb"),
    ("destructive.chmod-root", r"\bchmod\s+(-R\s+)?777\s+/(\s|$)", "world-writable filesystem root"),
    ("destructive.raw-disk", r">\s*/dev/sd[a-z]\b", "writes directly to a raw disk"),
];

const HIGH_RISK_COMMAND: &[Row] = &[
    ("cmd.git-push", r"\bgit\s+push\b", "publishes commits to a remote"),
    ("cmd.git-reset-hard", r"\bgit\s+reset\s+--hard\b", "discards local changes"),
    ("cmd.git-clean", r"\bgit\s+clean\s+-fd", "deletes untracked files"),
    ("cmd.git-rebase", r"\bgit\s+rebase\b", "rewrites history"),
    ("cmd.terraform", r"\bterraform\s+(apply|destroy)\b", "changes provisioned infrastructure"),
    ("cmd.kubectl", r"\bkubectl\s+(apply|delete|scale)\b", "changes cluster state"),
    ("cmd.helm", r"\bhelm\s+(upgrade|install|uninstall)\b", "changes a cluster release"),
    ("cmd.publish", r"\b(vercel|flyctl|fly|npm|pnpm|cargo)\s+(publish|deploy)\b", "publishes or deploys an artifact"),
    ("cmd.aws", r"\baws\b.*\b(delete|terminate|update|put)\b", "mutates AWS resources"),
    ("cmd.gcloud", r"\bgcloud\b.*\b(delete|deploy)\b", "mutates Google Cloud resources"),
    ("cmd.az", r"\baz\b.*\b(delete|create|update)\b", "mutates Azure resources"),
    ("cmd.psql", r"\bpsql\b.*\b(drop|truncate|alter)\b", "alters a Postgres schema or data"),
    ("cmd.mysql", r"\bmysql\b.*\b(drop|truncate|alter)\b", "alters a MySQL schema or data"),
    ("cmd.curl-pipe-shell", r"\bcurl\b.*\|\s*(ba)?sh\b", "executes a downloaded script"),
    ("cmd.wget-pipe-shell", r"\bwget\b.*\|\s*(ba)?sh\b", "executes a downloaded script"),
    ("cmd.docker", r"\bdocker\s+(rm|rmi|system\s+prune|push)\b", "removes or publishes container state"),
    ("cmd.npm-global", r"\bnpm\s+install\s+-g\b", "installs packages globally"),
    ("cmd.pip-force", r"\bpip\s+install\s+--force\b", "force-reinstalls Python packages"),
    ("cmd.sudo", r"\bsudo\s+", "runs with elevated privileges"),
];

const SENSITIVE_PATH: &[Row] = &[
    ("path.dotenv", r"(^|/)\.env(\.|$)", "environment file"),
    ("path.dotenv-local", r"(^|/)\.env\.local$", "local environment file"),
    ("path.secrets-dir", r"(^|/)secrets?(/|$)", "secrets directory"),
    ("path.pem", r"(^|/).*\.pem$", "PEM certificate or key"),
    ("path.key", r"(^|/).*\.key$", "private key file"),
    ("path.id-rsa", r"(^|/).*id_rsa", "SSH RSA key"),
    ("path.id-ed25519", r"(^|/).*id_ed25519", "SSH Ed25519 key"),
    ("path.credentials-json", r"(^|/)credentials\.json$", "credentials file"),
    ("path.service-account", r"(^|/)service[_-]?account.*\.json$", "cloud service account key"),
    ("path.npmrc", r"(^|/)\.npmrc$", "npm registry credentials"),
    ("path.pypirc", r"(^|/)\.pypirc$", "PyPI registry credentials"),
    ("path.docker-config", r"(^|/)\.docker/config\.json$", "Docker registry credentials"),
    ("path.kubeconfig", r"(^|/)kubeconfig", "Kubernetes credentials"),
    ("path.aws-credentials", r"(^|/)\.aws/credentials$", "AWS credentials"),
];

// High-risk markers match anywhere, including inside identifiers.
const HIGH_RISK_TOPIC: &[Row] = &[
    ("topic.auth", r"auth", "authentication"),
    ("topic.token", r"token", "tokens"),
    ("topic.secret", r"secret", "secrets"),
    ("topic.deploy", r"deploy", "deployment"),
    ("topic.payment", r"payment|billing", "payments"),
    ("topic.migration", r"migration", "migrations"),
    ("topic.database", r"database", "databases"),
    ("topic.production", r"prod", "production"),
    ("topic.security", r"security|permission|firewall", "security posture"),
    ("topic.extensions", r"mcp|marketplace|plugin", "extensions and plugins"),
    ("topic.publish", r"publish|release|rollback", "publishing and releases"),
    ("topic.delete", r"delete", "deletion"),
    ("topic.crypto", r"encrypt|decrypt|certificate|ssl|tls", "cryptography"),
    ("topic.infra", r"infra|terraform|k8s|kubernetes|docker", "infrastructure"),
    ("topic.pipeline", r"ci/cd|pipeline", "CI/CD pipelines"),
];

const LOW_RISK_TOPIC: &[Row] = &[
    ("topic.typo", r"\btypos?\b", "typo fix"),
    ("topic.rename", r"\brenam\w*", "rename"),
    ("topic.comment", r"\bcomments?\b", "comments"),
    ("topic.docs", r"\b(docs?|readme)\b", "documentation"),
    ("topic.format", r"\b(format\w*|lint\w*|whitespace|style)\b", "formatting"),
    ("topic.small-fix", r"\bsmall\s+fix\b", "small fix"),
    ("topic.logging", r"\b(logs?|logging)\b", "logging"),
    ("topic.todo", r"\btodos?\b", "todo"),
    ("topic.cleanup", r"\bclean\s*-?up\b", "cleanup"),
];

/// All built-in rules, category by category in evaluation order.
#[must_use]
pub(crate) fn builtin_specs() -> Vec<RuleSpec> {
    [
        (PatternCategory::Destructive, DESTRUCTIVE),
        (PatternCategory::HighRiskCommand, HIGH_RISK_COMMAND),
        (PatternCategory::SensitivePath, SENSITIVE_PATH),
        (PatternCategory::HighRiskTopic, HIGH_RISK_TOPIC),
        (PatternCategory::LowRiskTopic, LOW_RISK_TOPIC),
    ]
    .into_iter()
    .flat_map(|(category, rows)| {
        rows.iter()
            .map(move |(id, pattern, message)| RuleSpec::new(*id, category, *pattern, *message))
    })
    .collect()
}
