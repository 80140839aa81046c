//! AsciiDoc snippet generator.
//!
//! Produces the `[source, go]` listing that the reference documentation
//! includes next to the console example. Only the translated calls appear,
//! one tab shallower than in the test files, followed by a print of the
//! response.

use super::{Generator, Rendered, Status};
use crate::model::Example;
use crate::translate::Translator;

pub struct DocGenerator;

impl Generator for DocGenerator {
    fn file_name(&self, example: &Example) -> String {
        format!("{}.asciidoc", example.digest())
    }

    fn render(&self, example: &Example) -> Rendered {
        let translator = Translator::new(example);

        let mut out = format!("// Generated from {}\n", example.id());
        out.push_str("//\n[source, go]\n----\n");

        let status = if !translator.is_translated() {
            out.push_str("// This example has no Go translation.\n");
            Status::Untranslated
        } else {
            match translator.fragments() {
                Ok(calls) => {
                    let blocks: Vec<String> = calls.iter().map(|call| listing_block(&call.src)).collect();
                    out.push_str(&blocks.join("\n"));
                    Status::Translated
                }
                Err(err) => {
                    out.push_str(&format!("// Error translating example: {err}\n"));
                    Status::Failed(err)
                }
            }
        };

        out.push_str("----\n");
        Rendered { content: out, status }
    }

    fn directory(&self) -> &str {
        "doc"
    }
}

/// One call, de-indented by a tab, plus the response print.
fn listing_block(fragment: &str) -> String {
    let mut out = String::new();
    for line in fragment.lines() {
        out.push_str(line.strip_prefix('\t').unwrap_or(line));
        out.push('\n');
    }
    out.push_str("fmt.Println(res, err)\n");
    out
}
