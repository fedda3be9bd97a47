#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Stand-in for the host `python3`: implements just enough of `-m venv` and
/// `-m pip` for the integration tests. The venv branch plants a `python`
/// copy and an `ipython` stub that reports the environment it was exec'd in;
/// the pip branch logs its argv and exits with a scripted code.
const FAKE_PYTHON: &str = r#"#!/bin/sh
if [ "$1" = "-m" ] && [ "$2" = "venv" ]; then
    dest="$3"
    mkdir -p "$dest/bin"
    cp "$0" "$dest/bin/python"
    cat > "$dest/bin/ipython" <<'STUB'
#!/bin/sh
echo "ipython-stub $VIRTUAL_ENV"
STUB
    chmod +x "$dest/bin/python" "$dest/bin/ipython"
    exit 0
fi
if [ "$1" = "-m" ] && [ "$2" = "pip" ]; then
    shift 2
    echo "pip $*" >> "$EPH_TEST_PIP_LOG"
    exit "${EPH_TEST_PIP_EXIT:-0}"
fi
exit 0
"#;

pub struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let temp = tempfile::Builder::new()
            .prefix("eph-test")
            .tempdir()
            .expect("tempdir");
        let bin = temp.path().join("fakebin");
        fs::create_dir_all(&bin).expect("create fakebin");
        fs::create_dir_all(temp.path().join("tmp")).expect("create tmp root");
        let python = bin.join("python3");
        fs::write(&python, FAKE_PYTHON).expect("write fake python");
        make_executable(&python);
        Self { temp }
    }

    /// Points a binary invocation at the sandbox: fake interpreter first on
    /// `PATH`, data and temp roots inside the sandbox, spinner off.
    pub fn configure(&self, cmd: &mut Command) {
        let path = format!(
            "{}:{}",
            self.fake_bin().display(),
            std::env::var("PATH").unwrap_or_default()
        );
        cmd.env("PATH", path)
            .env("EPH_DATA_DIR", self.data_root())
            .env("EPH_TEST_PIP_LOG", self.pip_log())
            .env("EPH_PROGRESS", "0")
            .env("TMPDIR", self.tmp_root())
            .env_remove("EPH_TEST_PIP_EXIT");
    }

    pub fn fake_bin(&self) -> PathBuf {
        self.temp.path().join("fakebin")
    }

    pub fn data_root(&self) -> PathBuf {
        self.temp.path().join("data")
    }

    pub fn tmp_root(&self) -> PathBuf {
        self.temp.path().join("tmp")
    }

    pub fn pip_log(&self) -> PathBuf {
        self.temp.path().join("pip.log")
    }

    /// One entry per pip invocation seen by the fake interpreter.
    pub fn pip_lines(&self) -> Vec<String> {
        match fs::read_to_string(self.pip_log()) {
            Ok(contents) => contents.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Cached environment directories under the sandbox data root, sorted.
    pub fn env_dirs(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(self.data_root().join("ephemeral-envs")) else {
            return Vec::new();
        };
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();
        dirs
    }
}

fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path).expect("metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("chmod");
}

/// The environment directory the ipython stub reported via `VIRTUAL_ENV`.
pub fn stub_env_dir(stdout: &[u8]) -> PathBuf {
    let text = String::from_utf8_lossy(stdout);
    let line = text
        .lines()
        .find(|line| line.starts_with("ipython-stub "))
        .expect("ipython stub output");
    PathBuf::from(line.trim_start_matches("ipython-stub "))
}
