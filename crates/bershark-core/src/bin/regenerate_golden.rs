use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bershark_core::{OutputFormat, dump_file};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.ber");
        if !input.exists() {
            continue;
        }
        regenerate_one(&path, &input)?;
    }

    Ok(())
}

fn regenerate_one(dir: &Path, input: &Path) -> Result<(), String> {
    let forms = [
        (OutputFormat::Tree, "expected_tree.txt"),
        (OutputFormat::Flat, "expected_flat.txt"),
        (OutputFormat::Path, "expected_path.txt"),
    ];
    for (format, name) in forms {
        let mut out = Vec::new();
        dump_file(input, format, &mut out)
            .map_err(|err| format!("dump failed for {}: {}", input.display(), err))?;
        let target = dir.join(name);
        fs::write(&target, out)
            .map_err(|err| format!("failed to write {}: {}", target.display(), err))?;
    }
    Ok(())
}
