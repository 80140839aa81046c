//! Generator module — trait-based output format dispatch.

pub mod doc;
pub mod source;

use crate::error::TranslateError;
use crate::model::Example;
use anyhow::{anyhow, Result};

/// What happened to the example while generating its output.
#[derive(Debug)]
pub enum Status {
    Translated,
    /// No command, or no rule for some command; a placeholder was written.
    Untranslated,
    /// A rule matched but rendering failed; a failure marker was written.
    Failed(TranslateError),
}

/// Generated file content for one example.
#[derive(Debug)]
pub struct Rendered {
    pub content: String,
    pub status: Status,
}

/// Trait for rendering an example into one output file.
pub trait Generator {
    fn file_name(&self, example: &Example) -> String;
    fn render(&self, example: &Example) -> Rendered;
    /// Subdirectory of the output directory the files are written to.
    fn directory(&self) -> &str;
}

/// Create the generators for the given format name.
pub fn create_generators(format: &str) -> Result<Vec<Box<dyn Generator>>> {
    match format {
        "src" | "go" => Ok(vec![Box::new(source::SrcGenerator)]),
        "doc" | "asciidoc" => Ok(vec![Box::new(doc::DocGenerator)]),
        "all" => Ok(vec![Box::new(source::SrcGenerator), Box::new(doc::DocGenerator)]),
        _ => Err(anyhow!("unknown format: {}. Use src, doc, or all", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats() {
        assert_eq!(create_generators("src").unwrap().len(), 1);
        assert_eq!(create_generators("doc").unwrap().len(), 1);
        assert_eq!(create_generators("all").unwrap().len(), 2);
    }

    #[test]
    fn unknown_format() {
        let err = create_generators("pdf").err().unwrap();
        assert!(err.to_string().contains("unknown format"));
    }
}
