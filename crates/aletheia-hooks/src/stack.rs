//! Repository stack detection from marker files.

use std::path::Path;

/// Marker file → stack label, in reporting order.
const MARKERS: &[(&str, &str)] = &[
    ("Cargo.toml", "rust"),
    ("go.mod", "go"),
    ("pom.xml", "java-maven"),
    ("build.gradle", "java-gradle"),
    ("build.gradle.kts", "kotlin-gradle"),
    ("Package.swift", "swift"),
    ("Gemfile", "ruby"),
    ("composer.json", "php"),
    ("mix.exs", "elixir"),
    ("deno.json", "deno"),
    ("bun.lockb", "bun"),
    ("pnpm-lock.yaml", "pnpm"),
    ("yarn.lock", "yarn"),
    ("package-lock.json", "npm"),
    ("package.json", "node"),
    ("pyproject.toml", "python"),
    ("requirements.txt", "python"),
    ("Pipfile", "python"),
    ("CMakeLists.txt", "cpp-cmake"),
    ("Makefile", "make"),
    ("Dockerfile", "docker"),
    ("docker-compose.yml", "docker-compose"),
    ("docker-compose.yaml", "docker-compose"),
    ("terraform.tf", "terraform"),
    (".terraform", "terraform"),
];

const DOTNET_EXTENSIONS: [&str; 3] = ["csproj", "fsproj", "sln"];

/// Detect the technology stack of the directory at `cwd`.
///
/// Labels are deduplicated and keep marker order. A missing or unreadable
/// directory yields an empty list.
#[must_use]
pub fn detect_stack(cwd: &Path) -> Vec<&'static str> {
    let mut hits: Vec<&'static str> = Vec::new();
    let mut push = |label: &'static str| {
        if !hits.contains(&label) {
            hits.push(label);
        }
    };

    for &(marker, label) in MARKERS {
        if cwd.join(marker).exists() {
            push(label);
        }
    }

    if cwd.join(".claude-plugin").join("plugin.json").exists() {
        push("claude-plugin");
    }

    if has_dotnet_project(cwd) {
        push("dotnet");
    }

    hits
}

fn has_dotnet_project(cwd: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(cwd) else {
        return false;
    };
    entries.flatten().any(|entry| {
        entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| DOTNET_EXTENSIONS.contains(&ext))
    })
}

/// Human-readable summary: `rust, docker` or `unknown stack`.
#[must_use]
pub fn describe(stack: &[&str]) -> String {
    if stack.is_empty() {
        "unknown stack".to_string()
    } else {
        stack.join(", ")
    }
}
