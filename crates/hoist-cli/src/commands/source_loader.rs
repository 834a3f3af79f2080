use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Source text plus the name diagnostics refer to it by.
#[derive(Debug)]
pub struct LoadedSource {
    pub text: String,
    pub name: String,
    /// Set only for real files, which `--write` may rewrite.
    pub path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("source is required: use a FILE argument, `-` for stdin, or -s/--source")]
    Missing,
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("failed to read '{}': {}", .path.display(), .source)]
    File { path: PathBuf, source: io::Error },
}

pub fn load_source(path: Option<&Path>, text: Option<&str>) -> Result<LoadedSource, LoadError> {
    if let Some(text) = text {
        return Ok(LoadedSource {
            text: text.to_string(),
            name: "<source>".to_string(),
            path: None,
        });
    }

    match path {
        Some(path) if path.as_os_str() == "-" => load_stdin(),
        Some(path) => load_file(path),
        None => Err(LoadError::Missing),
    }
}

fn load_stdin() -> Result<LoadedSource, LoadError> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(LoadError::Stdin)?;
    Ok(LoadedSource {
        text,
        name: "<stdin>".to_string(),
        path: None,
    })
}

fn load_file(path: &Path) -> Result<LoadedSource, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(LoadedSource {
        text,
        name: path.display().to_string(),
        path: Some(path.to_path_buf()),
    })
}

/// Load a source or exit with an error message.
pub fn load_or_exit(path: Option<&Path>, text: Option<&str>) -> LoadedSource {
    load_source(path, text).unwrap_or_else(|err| {
        eprintln!("error: {}", err);
        std::process::exit(1);
    })
}
