use std::path::Path;

/// Parameters for one ffmpeg invocation
#[derive(Debug, Clone)]
pub struct EncodingParams<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    /// Preset-derived encoder arguments, inserted between input and output
    pub args: &'a [String],
    /// Replace an existing output instead of failing
    pub overwrite: bool,
}

/// Build FFmpeg arguments for encoding
pub fn build_ffmpeg_args(params: &EncodingParams) -> Vec<String> {
    let mut args = vec![
        "-hide_banner".to_string(),
        "-nostdin".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        if params.overwrite { "-y" } else { "-n" }.to_string(),
        "-i".to_string(),
        normalize(params.input),
    ];
    args.extend(params.args.iter().cloned());
    args.push(normalize(params.output));
    args
}

/// ffmpeg accepts forward slashes on every platform
fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Format a command line for logging, quoting arguments with spaces or quotes
pub fn format_command(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        if arg.contains(' ') || arg.contains('"') {
            line.push_str(&format!("{:?}", arg));
        } else {
            line.push_str(arg);
        }
    }
    line
}
