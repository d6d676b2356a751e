//! Download naming and bundling of rendered worksheets.

use std::io::{Cursor, Write};

use serde::Serialize;
use tracing::{info, instrument};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::{GenerationParams, Level};
use crate::error::PackageError;
use crate::util::filename_part;

pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const ZIP_MIME: &str = "application/zip";

/// One rendered worksheet before packaging.
#[derive(Clone, Debug)]
pub struct RenderedDoc {
  pub filename: String,
  pub label: String,
  pub bytes: Vec<u8>,
}

/// One downloadable file.
#[derive(Clone, Debug, Serialize)]
pub struct Artifact {
  pub filename: String,
  pub label: String,
  pub mime: &'static str,
  #[serde(skip)]
  pub bytes: Vec<u8>,
}

fn stem(params: &GenerationParams) -> String {
  format!(
    "{}_{}_{}",
    filename_part(&params.year_group),
    filename_part(&params.topic),
    filename_part(params.worksheet_type.display_name()),
  )
}

/// `{year_group}_{topic}_{worksheet_type}_{level}[_ANSWER_KEY].docx`
pub fn document_filename(params: &GenerationParams, level: Level, answer_key: bool) -> String {
  let suffix = if answer_key { "_ANSWER_KEY" } else { "" };
  format!("{}_{}{}.docx", stem(params), level.key(), suffix)
}

/// `{year_group}_{topic}_{worksheet_type}_All.zip`
pub fn archive_filename(params: &GenerationParams) -> String {
  format!("{}_All.zip", stem(params))
}

/// Human label shown next to a download.
pub fn document_label(level: Level, answer_key: bool) -> String {
  let entry = crate::styles::level(level);
  if answer_key { format!("{} - Answer Key", entry.label) } else { entry.label.to_string() }
}

fn archive(docs: &[RenderedDoc]) -> Result<Vec<u8>, PackageError> {
  let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
  let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
  for doc in docs {
    zip.start_file(doc.filename.as_str(), options).map_err(|e| PackageError::Archive(e.to_string()))?;
    zip.write_all(&doc.bytes).map_err(|e| PackageError::Archive(e.to_string()))?;
  }
  let cursor = zip.finish().map_err(|e| PackageError::Archive(e.to_string()))?;
  Ok(cursor.into_inner())
}

/// Every document as its own artifact; with more than one, a combined archive
/// is listed first.
#[instrument(level = "info", skip(params, docs), fields(docs = docs.len()))]
pub fn bundle(params: &GenerationParams, docs: Vec<RenderedDoc>) -> Result<Vec<Artifact>, PackageError> {
  if docs.is_empty() {
    return Err(PackageError::NothingGenerated);
  }
  let mut artifacts = Vec::with_capacity(docs.len() + 1);
  if docs.len() > 1 {
    let bytes = archive(&docs)?;
    info!(target: "worksheet", archive_bytes = bytes.len(), files = docs.len(), "Combined archive built");
    artifacts.push(Artifact {
      filename: archive_filename(params),
      label: "All worksheets (zip)".into(),
      mime: ZIP_MIME,
      bytes,
    });
  }
  artifacts.extend(docs.into_iter().map(|d| Artifact {
    filename: d.filename,
    label: d.label,
    mime: DOCX_MIME,
    bytes: d.bytes,
  }));
  Ok(artifacts)
}

#[cfg(test)]
mod tests {
  use std::io::Read;

  use super::*;
  use crate::domain::{ThemeKey, WorksheetType};

  fn params() -> GenerationParams {
    GenerationParams {
      worksheet_type: WorksheetType::Cloze,
      year_group: "Year 3".into(),
      topic: "Volcanoes and Earthquakes".into(),
      objective: String::new(),
      theme: ThemeKey::Classic,
      levels: Level::ALL.to_vec(),
      extra_spacing: false,
      eal_glossary: false,
      include_answer_key: true,
    }
  }

  fn doc(name: &str) -> RenderedDoc {
    RenderedDoc { filename: name.into(), label: name.into(), bytes: name.as_bytes().to_vec() }
  }

  #[test]
  fn filenames_replace_spaces_with_underscores() {
    let p = params();
    assert_eq!(
      document_filename(&p, Level::GreaterDepth, true),
      "Year_3_Volcanoes_and_Earthquakes_Cloze_Passage_greater_depth_ANSWER_KEY.docx"
    );
    assert_eq!(document_filename(&p, Level::Expected, false), "Year_3_Volcanoes_and_Earthquakes_Cloze_Passage_expected.docx");
    assert_eq!(archive_filename(&p), "Year_3_Volcanoes_and_Earthquakes_Cloze_Passage_All.zip");
  }

  #[test]
  fn nothing_to_bundle_is_an_error() {
    assert!(matches!(bundle(&params(), vec![]), Err(PackageError::NothingGenerated)));
  }

  #[test]
  fn single_document_is_not_archived() {
    let out = bundle(&params(), vec![doc("a.docx")]).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].mime, DOCX_MIME);
  }

  #[test]
  fn six_documents_give_seven_artifacts_with_archive_first() {
    let docs: Vec<_> = (0..6).map(|i| doc(&format!("{i}.docx"))).collect();
    let out = bundle(&params(), docs).unwrap();
    assert_eq!(out.len(), 7);
    assert_eq!(out[0].mime, ZIP_MIME);

    let mut zip = zip::ZipArchive::new(Cursor::new(out[0].bytes.clone())).unwrap();
    assert_eq!(zip.len(), 6);
    let mut content = String::new();
    zip.by_name("3.docx").unwrap().read_to_string(&mut content).unwrap();
    assert_eq!(content, "3.docx");
  }
}
