//! One source text, parsed and analyzed, ready for extraction.

use rowan::{GreenNode, TextSize};

use crate::Diagnostics;
use crate::extract::{
    self, CandidateSite, ExtractError, ExtractRequest, Extraction, RuleDescriptor, SemanticModel,
};
use crate::parser::ast::Root;
use crate::parser::{ParseResult, SyntaxNode, parse};
use crate::semantic::Model;

/// Parsed source plus its semantic model.
///
/// Holds the green tree rather than a `SyntaxNode`, so a document can be
/// shared between threads; each call materializes its own root.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    green: GreenNode,
    model: Model,
    diagnostics: Diagnostics,
    fuel_consumed: u32,
}

/// Outcome of [`Document::fix_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixAll {
    pub text: String,
    /// Names of the declared types, in the order they were extracted.
    pub type_names: Vec<String>,
}

impl Document {
    /// Parse and analyze `source`. Fails only when the parser runs out of fuel.
    pub fn parse(source: impl Into<String>) -> crate::Result<Self> {
        let source = source.into();
        let ParseResult {
            root,
            mut diagnostics,
            exec_fuel_consumed,
        } = parse(&source)?;

        let (model, semantic) = Model::build(&root);
        diagnostics.extend(semantic);
        tracing::debug!(
            bytes = source.len(),
            fuel = exec_fuel_consumed,
            diagnostics = diagnostics.len(),
            "document parsed"
        );

        Ok(Self {
            green: root.as_cst().green().into_owned(),
            source,
            model,
            diagnostics,
            fuel_consumed: exec_fuel_consumed,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn root(&self) -> Option<Root> {
        Root::cast(self.syntax())
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Syntax and semantic errors.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn fuel_consumed(&self) -> u32 {
        self.fuel_consumed
    }

    pub fn candidates(&self) -> Vec<CandidateSite> {
        extract::detect(&self.syntax(), &self.model).collect()
    }

    /// One finding per candidate site.
    pub fn analyze(&self, rule: &RuleDescriptor) -> Diagnostics {
        extract::analyze(&self.syntax(), &self.model, rule)
    }

    /// Extract the type of the first candidate site in document order.
    pub fn extract(&self, request: &ExtractRequest) -> Result<Extraction, ExtractError> {
        let root = self.syntax();
        let first = extract::detect(&root, &self.model)
            .next()
            .ok_or(ExtractError::NoCandidateFound)?;
        extract::extract(&root, &self.model, first.ty, request)
    }

    /// Extract the type of the candidate site covering `offset`.
    pub fn extract_at(
        &self,
        offset: TextSize,
        request: &ExtractRequest,
    ) -> Result<Extraction, ExtractError> {
        extract::extract_at(&self.syntax(), &self.model, offset, request)
    }

    /// Extract every extractable type, one at a time, reanalyzing between steps.
    ///
    /// Types that cannot be extracted are left as they are.
    pub fn fix_all(&self, request: &ExtractRequest) -> crate::Result<FixAll> {
        let mut current = self.clone();
        let mut type_names = Vec::new();

        loop {
            let root = current.syntax();
            let mut targets = Vec::new();
            for site in extract::detect(&root, &current.model) {
                if !targets
                    .iter()
                    .any(|t| current.model.structurally_equal(*t, site.ty))
                {
                    targets.push(site.ty);
                }
            }

            let applied = targets.into_iter().find_map(|target| {
                match extract::extract(&root, &current.model, target, request) {
                    Ok(extraction) => Some(extraction),
                    Err(err) => {
                        tracing::debug!(%err, "skipping type");
                        None
                    }
                }
            });
            let Some(extraction) = applied else {
                break;
            };

            type_names.push(extraction.type_name.clone());
            current = Document::parse(extraction.text())?;
        }

        Ok(FixAll {
            text: current.source,
            type_names,
        })
    }
}
