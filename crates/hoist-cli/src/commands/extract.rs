//! Extract one anonymous type into a named declaration.

use std::fs;
use std::path::PathBuf;

use hoist_lib::extract::MemberStyle;
use hoist_lib::{Document, ExtractConfig, ExtractError, ExtractRequest};

use super::cursor::Cursor;
use super::source_loader::load_or_exit;

pub struct ExtractArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub at: Option<Cursor>,
    pub name: Option<String>,
    pub style: MemberStyle,
    pub output: Option<PathBuf>,
    pub write: bool,
}

/// Rewritten source and the name given to the new type.
#[derive(Debug, PartialEq, Eq)]
pub struct Extracted {
    pub text: String,
    pub type_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractFailure {
    #[error(transparent)]
    Parse(#[from] hoist_lib::Error),
    #[error("position {0} is outside the source")]
    OutOfRange(Cursor),
    #[error("fix not applicable: {0}")]
    NotApplicable(ExtractError),
    #[error(transparent)]
    Extract(ExtractError),
}

impl From<ExtractError> for ExtractFailure {
    fn from(err: ExtractError) -> Self {
        if err.is_not_applicable() {
            ExtractFailure::NotApplicable(err)
        } else {
            ExtractFailure::Extract(err)
        }
    }
}

pub fn run(args: ExtractArgs) {
    let source = load_or_exit(args.source_path.as_deref(), args.source_text.as_deref());

    let mut request = ExtractRequest::new().config(ExtractConfig::new().member_style(args.style));
    if let Some(name) = &args.name {
        request = request.name(name.clone());
    }

    let extracted = match extract_source(&source.text, args.at, &request) {
        Ok(extracted) => extracted,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    let target = if args.write {
        match &source.path {
            Some(path) => Some(path.clone()),
            None => {
                eprintln!("error: --write needs a source file");
                std::process::exit(1);
            }
        }
    } else {
        args.output.clone()
    };

    match target {
        Some(path) => {
            if let Err(err) = fs::write(&path, &extracted.text) {
                eprintln!("error: failed to write '{}': {}", path.display(), err);
                std::process::exit(1);
            }
            eprintln!(
                "extracted `{}` into '{}'",
                extracted.type_name,
                path.display()
            );
        }
        None => print!("{}", extracted.text),
    }
}

/// Apply one extraction to `text`: at `at` when given, otherwise to the
/// first anonymous type in the document.
pub fn extract_source(
    text: &str,
    at: Option<Cursor>,
    request: &ExtractRequest,
) -> Result<Extracted, ExtractFailure> {
    let doc = Document::parse(text)?;

    let extraction = match at {
        Some(cursor) => {
            let offset = cursor
                .to_offset(text)
                .ok_or(ExtractFailure::OutOfRange(cursor))?;
            let offset = u32::try_from(offset).map_err(|_| ExtractFailure::OutOfRange(cursor))?;
            doc.extract_at(offset.into(), request)?
        }
        None => doc.extract(request)?,
    };
    tracing::debug!(type_name = %extraction.type_name, "extraction applied");

    Ok(Extracted {
        text: extraction.text(),
        type_name: extraction.type_name,
    })
}
