use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Path meaning stdin for input and stdout for output
pub const STD_STREAM: &str = "-";

const INVALID_FILE_NAME_CHARS: &str = "#<>$+%&/\\*|{}!?`'\"=: @";
const INVALID_FILE_NAME_EDGE_CHARS: &[char] = &[' ', '.', '_', '-'];

/// Where a rendered document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// Display name used in messages: `-` for stdout
    pub fn name(&self) -> String {
        match self {
            Destination::Stdout => STD_STREAM.to_string(),
            Destination::File(path) => path.display().to_string(),
        }
    }

    pub fn write(&self, content: &str) -> Result<()> {
        match self {
            Destination::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                stdout.flush()?;
            }
            Destination::File(path) => {
                fs::write(path, content)
                    .with_context(|| format!("Failed to write output file: {:?}", path))?;
            }
        }
        Ok(())
    }
}

/// Decide where the document goes.
///
/// `-` means stdout. An explicit path must not exist yet unless `replace` is
/// set. Without a path, a new file is named after the collection and never
/// replaces anything.
pub fn resolve_destination(requested: Option<&Path>, collection_name: &str, replace: bool) -> Result<Destination> {
    match requested {
        Some(path) if path.as_os_str() == STD_STREAM => Ok(Destination::Stdout),
        Some(path) => {
            if path.exists() && !replace {
                anyhow::bail!(
                    "File {:?} already exists. Use --replace to overwrite it",
                    path
                );
            }
            Ok(Destination::File(path.to_path_buf()))
        }
        None => {
            let mut base_name = format_file_name(collection_name);
            if base_name.is_empty() {
                base_name = "collection".to_string();
            }
            Ok(Destination::File(PathBuf::from(create_unique_file_name(&base_name, ".md")?)))
        }
    }
}

/// Read the collection from a file, or from stdin for `-`
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == STD_STREAM {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .context("Failed to read collection from stdin")?;
        return Ok(buffer);
    }

    fs::read(path).with_context(|| format!("Failed to read collection: {:?}", path))
}

/// `name` + `extension` if no such file exists, otherwise a period and the
/// first free number are inserted before the extension: `name.1.md`.
///
/// The extension must be empty or a period followed by at least one character.
pub fn create_unique_file_name(file_name: &str, extension: &str) -> Result<String> {
    if file_name.is_empty() {
        anyhow::bail!("The file name must not be empty");
    }
    if extension == "." || (!extension.is_empty() && !extension.starts_with('.')) {
        anyhow::bail!("Extension must be empty or be a period followed by one or more characters");
    }

    let mut unique = format!("{}{}", file_name, extension);
    let mut i = 1;
    while Path::new(&unique).exists() {
        unique = format!("{}.{}{}", file_name, i, extension);
        i += 1;
    }

    Ok(unique)
}

/// Make a file name (without extension) valid on all major platforms: each
/// invalid character becomes a dash and ` ._-` are trimmed from both ends.
pub fn format_file_name(file_name: &str) -> String {
    let replaced: String = file_name
        .chars()
        .map(|ch| if INVALID_FILE_NAME_CHARS.contains(ch) { '-' } else { ch })
        .collect();

    replaced.trim_matches(INVALID_FILE_NAME_EDGE_CHARS).to_string()
}
