//! Helpers for driving the `review-kit` binary.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

const KEY_VARS: [&str; 4] = [
    "OPENAI_API_KEY",
    "GEMINI_API_KEY",
    "XAI_API_KEY",
    "ANTHROPIC_API_KEY",
];

/// The binary with plain output, no provider keys and a piped stdin, so
/// it never stops at a key prompt.
pub fn review_kit() -> Command {
    let mut cmd = Command::cargo_bin("review-kit").expect("binary is built");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG").write_stdin("");
    for var in KEY_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// A workspace whose agents all run on the offline `stub` provider.
#[allow(dead_code)]
pub fn offline_workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let document = r#"
agents:
  - id: echo
    name: Echo
    provider: stub
    default_model: echo
    system_prompt: Repeat the input.
  - id: shout
    name: Shout
    provider: stub
    default_model: uppercase
    system_prompt: Shout the input.
  - id: hosted
    name: Hosted
    provider: openai
    default_model: gpt-4o-mini
    system_prompt: Review the input.
pipelines:
  - id: loud
    name: Loud Review
    steps:
      - agent_id: echo
      - agent_id: shout
  - id: hosted_review
    name: Hosted Review
    steps:
      - agent_id: hosted
"#;
    write(dir.path(), "agents.yaml", document);
    dir
}

#[allow(dead_code)]
pub fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("write fixture");
}
