#![allow(dead_code)]

use binsuite::DiscoveryOptions;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes a stand-in binary; the filesystem loader only needs a regular file.
pub fn write_binary(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"\x7fELF\x02\x01\x01").unwrap();
    path
}

pub fn write_manifest(binary: &Path, suffix: &str, content: &str) -> PathBuf {
    let mut path = binary.as_os_str().to_owned();
    path.push(suffix);
    let path = PathBuf::from(path);
    fs::write(&path, content).unwrap();
    path
}

/// Writes a shell script that answers `--list` the way a libtest harness
/// does and records every invocation's arguments next to itself.
pub fn write_fake_harness(dir: &Path, name: &str, all: &[&str], ignored: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let script = format!(
        "#!/bin/sh\n\
         printf '%s\\n' \"$*\" >> \"$0.args\"\n\
         case \" $* \" in\n\
         *\" --ignored \"*)\n\
         cat <<'EOF'\n{ignored}\nEOF\n\
         ;;\n\
         *)\n\
         cat <<'EOF'\n{all}\nEOF\n\
         ;;\n\
         esac\n",
        ignored = listing(ignored),
        all = listing(all),
    );
    fs::write(&path, script).unwrap();
    path
}

pub fn write_failing_harness(dir: &Path, name: &str, stderr: &str, code: i32) -> PathBuf {
    let path = dir.join(name);
    let script = format!("#!/bin/sh\necho '{stderr}' >&2\nexit {code}\n");
    fs::write(&path, script).unwrap();
    path
}

/// Arguments of each recorded harness invocation, one entry per call.
pub fn recorded_args(harness: &Path) -> Vec<String> {
    let mut path = harness.as_os_str().to_owned();
    path.push(".args");
    fs::read_to_string(PathBuf::from(path))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Options that launch fake harness scripts through `sh`.
pub fn sh_runner() -> DiscoveryOptions {
    DiscoveryOptions::new().with("runner", "sh")
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

fn listing(entries: &[&str]) -> String {
    entries.join("\n")
}
