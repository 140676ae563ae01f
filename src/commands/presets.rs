use crate::cli::{AddPresetArgs, PresetsCommand};
use crate::presets::{Preset, PresetStore};
use anyhow::{Context, Result};
use std::io::Write;

pub fn run_presets(command: &PresetsCommand, store: &PresetStore, out: &mut impl Write) -> Result<()> {
    match command {
        PresetsCommand::List { json } => list(store, *json, out),
        PresetsCommand::Show { name, json } => show(store, name, *json, out),
        PresetsCommand::Add(args) => add(store, args, out),
        PresetsCommand::Remove { name } => remove(store, name, out),
    }
}

fn list(store: &PresetStore, json: bool, out: &mut impl Write) -> Result<()> {
    let all = store
        .load_all()
        .with_context(|| format!("loading presets from {}", store.path().display()))?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&all)?)?;
        return Ok(());
    }
    for name in all.keys() {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

fn show(store: &PresetStore, name: &str, json: bool, out: &mut impl Write) -> Result<()> {
    let preset = store.get(name)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&preset)?)?;
        return Ok(());
    }
    writeln!(out, "name:        {}", name)?;
    writeln!(out, "video codec: {}", preset.video_codec)?;
    writeln!(out, "preset:      {}", preset.speed_preset)?;
    writeln!(out, "crf:         {}", preset.crf)?;
    if !preset.description.is_empty() {
        writeln!(out, "description: {}", preset.description)?;
    }
    writeln!(out, "ffmpeg args: {}", preset.ffmpeg_args().join(" "))?;
    Ok(())
}

fn add(store: &PresetStore, args: &AddPresetArgs, out: &mut impl Write) -> Result<()> {
    let preset = Preset {
        video_codec: args.video_codec.clone(),
        speed_preset: args.preset.clone(),
        crf: args.crf,
        description: args.description.clone(),
    };
    store
        .save(&args.name, preset)
        .with_context(|| format!("saving preset {}", args.name))?;
    writeln!(out, "Saved preset {} to {}", args.name, store.path().display())?;
    Ok(())
}

fn remove(store: &PresetStore, name: &str, out: &mut impl Write) -> Result<()> {
    store
        .delete(name)
        .with_context(|| format!("deleting preset {}", name))?;
    writeln!(out, "Removed preset {}", name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run(command: PresetsCommand, store: &PresetStore) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = run_presets(&command, store, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn add_args(name: &str) -> AddPresetArgs {
        AddPresetArgs {
            name: name.to_string(),
            video_codec: "h264".to_string(),
            preset: "fast".to_string(),
            crf: 30,
            description: "Quick previews".to_string(),
        }
    }

    #[test]
    fn test_list_prints_sorted_names() {
        let dir = TempDir::new().unwrap();
        let store = PresetStore::in_dir(dir.path());
        store.save("foo", Preset::default()).unwrap();
        store.save("bar", Preset::default()).unwrap();

        let (result, out) = run(PresetsCommand::List { json: false }, &store);
        assert!(result.is_ok());
        assert_eq!(out, "bar\ndefault\nfoo\n");
    }

    #[test]
    fn test_list_json() {
        let dir = TempDir::new().unwrap();
        let store = PresetStore::in_dir(dir.path());

        let (result, out) = run(PresetsCommand::List { json: true }, &store);
        assert!(result.is_ok());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["default"]["video_codec"], "libx264");
        assert_eq!(value["default"]["crf"], 23);
    }

    #[test]
    fn test_list_load_error() {
        let dir = TempDir::new().unwrap();
        let store = PresetStore::in_dir(dir.path());
        std::fs::write(store.path(), "presets = [broken").unwrap();

        let (result, _) = run(PresetsCommand::List { json: false }, &store);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.starts_with("loading presets from"), "{message}");
    }

    #[test]
    fn test_add_show_remove() {
        let dir = TempDir::new().unwrap();
        let store = PresetStore::in_dir(dir.path());

        let (result, out) = run(PresetsCommand::Add(add_args("new-preset")), &store);
        assert!(result.is_ok());
        assert!(out.starts_with("Saved preset new-preset"));

        let saved = store.get("new-preset").unwrap();
        assert_eq!(saved.video_codec, "h264");
        assert_eq!(saved.speed_preset, "fast");
        assert_eq!(saved.crf, 30);

        let (result, out) = run(
            PresetsCommand::Show {
                name: "new-preset".to_string(),
                json: false,
            },
            &store,
        );
        assert!(result.is_ok());
        assert!(out.contains("description: Quick previews"));
        assert!(out.contains("ffmpeg args: -c:v h264 -preset fast -crf 30"));

        let (result, out) = run(
            PresetsCommand::Remove {
                name: "new-preset".to_string(),
            },
            &store,
        );
        assert!(result.is_ok());
        assert_eq!(out, "Removed preset new-preset\n");
        assert!(store.get("new-preset").is_err());
    }

    #[test]
    fn test_remove_unknown_fails() {
        let dir = TempDir::new().unwrap();
        let store = PresetStore::in_dir(dir.path());

        let (result, _) = run(
            PresetsCommand::Remove {
                name: "x".to_string(),
            },
            &store,
        );
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("deleting preset x"), "{message}");
        assert!(message.contains("unknown preset \"x\""), "{message}");
    }
}
