//! Go test file generator.
//!
//! Each example becomes one `_test.go` file holding a single test function,
//! so the generated calls are compiled and run by `go test`.

use super::{Generator, Rendered, Status};
use crate::convert::go_quote;
use crate::model::Example;
use crate::rules::Imports;
use crate::translate::{self, Profile, Translator};

const HEADER: &str = "// Licensed to Elasticsearch B.V under one or more agreements.
// Elasticsearch B.V. licenses this file to you under the Apache 2.0 License.
// See the LICENSE file in the project root for more information.
//
// Code generated, DO NOT EDIT

package elasticsearch_test
";

const VARS: &str = "var (
\t_ = fmt.Printf
\t_ = os.Stdout
\t_ = elasticsearch.NewDefaultClient
)
";

pub struct SrcGenerator;

impl Generator for SrcGenerator {
    /// `docs/get.asciidoc` + digest → `docs-get_<digest>_test.go`.
    fn file_name(&self, example: &Example) -> String {
        let file = example.source_location.file.as_str();
        let stem = file.strip_suffix(".asciidoc").unwrap_or(file);
        format!("{}_{}_test.go", stem.replace('/', "-"), example.digest())
    }

    fn render(&self, example: &Example) -> Rendered {
        let translator = Translator::new(example).with_profile(Profile::Test);
        let (body, imports, status) = if !translator.is_translated() {
            let first_line = example.source.lines().next().unwrap_or_default();
            (
                format!(
                    "\t// es, _ := elasticsearch.NewDefaultClient()\n\n\tt.Error({})\n",
                    go_quote(first_line)
                ),
                Imports::default(),
                Status::Untranslated,
            )
        } else {
            match translator.fragments() {
                Ok(calls) => (
                    format!(
                        "\tes, _ := elasticsearch.NewDefaultClient()\n{}",
                        translator.assemble(&calls)
                    ),
                    translate::imports(&calls),
                    Status::Translated,
                ),
                Err(err) => (
                    "\tes, _ := elasticsearch.NewDefaultClient()\n\t_ = es\n\n\tpanic(\"Error translating example\")\n"
                        .to_string(),
                    Imports::default(),
                    Status::Failed(err),
                ),
            }
        };

        let mut out = String::from(HEADER);
        out.push('\n');
        out.push_str(&import_block(imports));
        out.push('\n');
        out.push_str(VARS);
        out.push('\n');
        out.push_str(&source_comment(example));
        out.push('\n');
        out.push_str(&format!(
            "func Test_{}_{}(t *testing.T) {{\n",
            example.chapter(),
            example.digest()
        ));
        out.push_str(&body);
        out.push_str("}\n");

        Rendered { content: out, status }
    }

    fn directory(&self) -> &str {
        "src"
    }
}

/// Import block; `strings` and `time` only when a rendered call uses them.
fn import_block(imports: Imports) -> String {
    let mut std_imports = vec!["fmt", "os"];
    if imports.strings {
        std_imports.push("strings");
    }
    std_imports.push("testing");
    if imports.time {
        std_imports.push("time");
    }

    let mut out = String::from("import (\n");
    for import in std_imports {
        out.push_str(&format!("\t\"{import}\"\n"));
    }
    out.push_str("\n\t\"github.com/elastic/go-elasticsearch/v8\"\n)\n");
    out
}

/// The original console source as a comment block with a link back to it.
fn source_comment(example: &Example) -> String {
    let rule = "-".repeat(80);
    let mut out = format!("// <{}>\n//\n// {rule}\n", example.github_url());
    for line in example.source.trim_end_matches('\n').lines() {
        if line.is_empty() {
            out.push_str("//\n");
        } else {
            out.push_str(&format!("// {line}\n"));
        }
    }
    out.push_str(&format!("// {rule}\n"));
    out
}
