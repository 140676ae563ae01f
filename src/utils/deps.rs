use std::process::{Command, Stdio};

/// Check whether the given ffmpeg executable can be run
pub fn ffmpeg_available(program: &str) -> bool {
    check_command(program, &["-version"])
}

/// Check if a command is available
fn check_command(cmd: &str, args: &[&str]) -> bool {
    Command::new(cmd)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_command() {
        assert!(!check_command("definitely-not-an-ffmpeg-binary", &["-version"]));
    }
}
