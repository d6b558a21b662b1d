//! Level 3: control-flow restructuring
//!
//! Conditions are located through the `condition` field of each statement
//! and rewritten at node boundaries. Every rewrite of one pass goes into a
//! single replacement set, so nested and multi-line constructs either come
//! out consistent or fail validation as a whole.

use serde::Serialize;
use tracing::debug;
use tree_sitter::Node;

use super::{braced, python};
use crate::errors::Result;
use crate::features::parsing::{grammar, LanguageId};
use crate::shared::models::{ByteSpan, ReplacementSet, SourceUnit};

/// Counts of rewritten and skipped constructs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RewriteStats {
    pub ifs: usize,
    pub whiles: usize,
    pub fors: usize,
    pub skipped: usize,
}

impl RewriteStats {
    pub fn total(&self) -> usize {
        self.ifs + self.whiles + self.fors
    }
}

#[derive(Debug, Clone)]
pub struct ControlFlowOutcome {
    pub code: String,
    pub stats: RewriteStats,
}

/// Replacement set under construction plus the condition spans it rewrites
#[derive(Default)]
pub(crate) struct Rewrite {
    pub replacements: ReplacementSet,
    pub replaced: Vec<ByteSpan>,
    pub stats: RewriteStats,
}

impl Rewrite {
    pub fn replace_node(&mut self, node: &Node, text: String) {
        self.replacements
            .replace(node.start_byte(), node.end_byte(), text);
        self.replaced.push(ByteSpan::of(node));
    }

    /// Node lies within a span that is already being replaced
    pub fn is_shadowed(&self, node: &Node) -> bool {
        let span = ByteSpan::of(node);
        self.replaced.iter().any(|r| r.contains_span(&span))
    }

    /// Offset falls strictly inside a replaced span
    pub fn splits_replacement(&self, offset: usize) -> bool {
        self.replaced.iter().any(|r| r.strictly_contains(offset))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ControlFlowTransformer {
    allow_error_trees: bool,
}

impl ControlFlowTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_error_trees(mut self, allow: bool) -> Self {
        self.allow_error_trees = allow;
        self
    }

    pub fn transform(&self, unit: &SourceUnit) -> Result<ControlFlowOutcome> {
        let tree = grammar(unit.language()).parse_with(unit.code(), self.allow_error_trees)?;
        let mut rewrite = Rewrite::default();

        match unit.language() {
            LanguageId::Python => python::plan(&tree, &mut rewrite),
            language => braced::plan(&tree, language, &mut rewrite),
        }

        let code = rewrite.replacements.apply(unit.code())?;
        debug!(
            language = %unit.language(),
            ifs = rewrite.stats.ifs,
            whiles = rewrite.stats.whiles,
            fors = rewrite.stats.fors,
            skipped = rewrite.stats.skipped,
            "level 3 applied"
        );
        Ok(ControlFlowOutcome {
            code,
            stats: rewrite.stats,
        })
    }
}
