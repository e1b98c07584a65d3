use color_eyre::eyre::{eyre, Result};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Platform clipboard commands, tried in order. On Linux the WSL bridge is
/// probed first, then Wayland, then X11.
fn candidates() -> &'static [(&'static str, &'static [&'static str])] {
    if cfg!(target_os = "macos") {
        &[("pbcopy", &[])]
    } else if cfg!(target_os = "windows") {
        &[("clip.exe", &[])]
    } else {
        &[
            ("clip.exe", &[]),
            ("wl-copy", &[]),
            ("xclip", &["-selection", "clipboard"]),
        ]
    }
}

async fn pipe_into(cmd: &str, args: &[&str], text: &str) -> Result<bool> {
    let child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    let Ok(mut child) = child else {
        return Ok(false);
    };
    if let Some(mut stdin) = child.stdin.take() {
        let _ = stdin.write_all(text.as_bytes()).await;
        drop(stdin);
    }
    Ok(child.wait().await?.success())
}

/// Copy `text` to the system clipboard using the first tool that works.
pub async fn copy(text: &str) -> Result<()> {
    for (cmd, args) in candidates() {
        if pipe_into(cmd, args, text).await? {
            return Ok(());
        }
    }
    Err(eyre!(
        "No clipboard tool found. Install xclip, wl-copy, or use WSL with clip.exe"
    ))
}
