use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

const NO_GIT: &str = "no-git";
const BRANCH_REF_PREFIX: &str = "ref: refs/heads/";
const SHORT_HASH_LEN: usize = 7;

static ORIGIN_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[remote "origin"\][^\[]*url\s*=\s*(.+)"#).expect("valid regex")
});

// Only github.com URLs map to owner/repo; other hosts fall back to the
// bare branch label.
static GITHUB_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com[:/]([^/]+)/([^/.]+)").expect("valid regex"));

/// Derives the `owner/repo:branch` label for a project directory from its
/// on-disk repository metadata, without shelling out to git.
///
/// An unreadable `HEAD` means no repository at all; an unreadable or
/// remote-less `config` still yields the branch (or detached short hash).
pub fn git_ref(project_dir: &str) -> String {
    let git_dir = Path::new(project_dir).join(".git");
    let Ok(head) = fs::read_to_string(git_dir.join("HEAD")) else {
        return NO_GIT.to_string();
    };

    let head = head.trim();
    let branch: String = match head.strip_prefix(BRANCH_REF_PREFIX) {
        Some(branch) => branch.to_string(),
        None => head.chars().take(SHORT_HASH_LEN).collect(),
    };

    match origin_remote(&git_dir) {
        Some(remote) => format!("{remote}:{branch}"),
        None => branch,
    }
}

fn origin_remote(git_dir: &Path) -> Option<String> {
    let config = fs::read_to_string(git_dir.join("config")).ok()?;
    let url = ORIGIN_URL_RE.captures(&config)?.get(1)?.as_str().trim();
    let caps = GITHUB_URL_RE.captures(url)?;
    Some(format!("{}/{}", &caps[1], &caps[2]))
}
