//! Rendering: content tree in, `.docx` bytes out.
//!
//! Layers, bottom-up: `model` (writer-neutral document), `primitives` (the only
//! code that mutates the model), `widgets` (composite blocks), `assemblers`
//! (one fixed-order pipeline per worksheet type) and `docx` (model to OOXML).

mod assemblers;
mod docx;
pub mod model;
pub mod primitives;
mod widgets;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::content::ContentTree;
use crate::domain::{Level, ThemeKey};
use crate::error::RenderError;
use crate::styles::{self, LevelEntry, ThemeEntry};

pub use model::Document;

/// Everything a widget needs besides its slice of content.
pub struct Ctx {
  pub theme: &'static ThemeEntry,
  pub level: Level,
  pub level_entry: &'static LevelEntry,
  pub show_answers: bool,
  /// Source for matching and sentence-card shuffles.
  pub rng: StdRng,
}

impl Ctx {
  pub fn new(theme: ThemeKey, level: Level, show_answers: bool, seed: Option<u64>) -> Self {
    let rng = match seed {
      Some(s) => StdRng::seed_from_u64(s),
      None => StdRng::from_entropy(),
    };
    Ctx { theme: styles::theme(theme), level, level_entry: styles::level(level), show_answers, rng }
  }

  pub fn developing(&self) -> bool {
    self.level.is_developing()
  }

  /// Body font size for this level.
  pub fn body(&self) -> u32 {
    self.level_entry.font_size
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RenderOptions {
  #[serde(default)]
  pub theme: ThemeKey,
  pub level: Level,
  #[serde(default)]
  pub objective: String,
  #[serde(default)]
  pub extra_spacing: bool,
  #[serde(default)]
  pub eal_glossary: bool,
  #[serde(default)]
  pub show_answers: bool,
  /// Fixes the shuffles; `None` draws from entropy.
  #[serde(default)]
  pub seed: Option<u64>,
}

/// Builds the document model for one tree, level and mode.
pub fn build_document(tree: &ContentTree, opts: &RenderOptions) -> Result<Document, RenderError> {
  let mut ctx = Ctx::new(opts.theme, opts.level, opts.show_answers, opts.seed);
  assemblers::assemble(tree, &mut ctx, opts)
}

/// Renders one worksheet to `.docx` bytes.
#[instrument(level = "info", skip(tree, opts), fields(kind = tree.kind().key(), level = %opts.level, answers = opts.show_answers))]
pub fn render(tree: &ContentTree, opts: &RenderOptions) -> Result<Vec<u8>, RenderError> {
  let doc = build_document(tree, opts)?;
  let bytes = docx::write(&doc)?;
  debug!(target: "worksheet", bytes = bytes.len(), blocks = doc.blocks.len(), "Worksheet rendered");
  Ok(bytes)
}
