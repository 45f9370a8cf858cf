#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn tagdex_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tagdex").unwrap();
    cmd.env_remove("TAGDEX_ROOT");
    cmd.env_remove("TAGDEX_LOG");
    cmd
}

/// Initialize a site with the default `_posts` directory
pub fn init_site(root: &Path) {
    tagdex_cmd().arg("init").arg(root).assert().success();
}

/// Write a post source under `_posts/`
pub fn write_post(root: &Path, name: &str, content: &str) {
    let path = root.join("_posts").join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A YAML front matter post with the given title and tags
pub fn post(title: &str, tags: &[&str]) -> String {
    format!(
        "---\nlayout: post\ntitle: \"{}\"\ntags: [{}]\n---\n\nBody of {}.\n",
        title,
        tags.join(", "),
        title
    )
}
