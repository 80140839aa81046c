//! Console-to-Go translation rules.
//!
//! Each rule pairs a loose recognizer, tested against the whole command text,
//! with a renderer that re-matches the command against a strict pattern and
//! emits the Go call. Rules are tried in declaration order and the first
//! recognizer that matches wins, so a general shape must come after every
//! specific shape it overlaps (e.g. `PUT /<name>` after `PUT /_cluster/settings`
//! and `PUT /<index>/_doc/<id>`). New shapes are appended.
//!
//! Strict patterns are anchored at both ends: text the rule has no place for
//! is a mismatch, never silently dropped.

use crate::convert::{body_to_reader, go_quote, params_to_arguments, query_to_params, ARG_INDENT, DURATION_PARAM};
use crate::error::{Result, TranslateError};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Standard Go packages a rendered call refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Imports {
    /// A body was wrapped in `strings.NewReader`.
    pub strings: bool,
    /// A parameter was rendered as `time.Duration`.
    pub time: bool,
}

impl Imports {
    pub fn union(self, other: Imports) -> Imports {
        Imports {
            strings: self.strings || other.strings,
            time: self.time || other.time,
        }
    }
}

/// One rendered Go call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub src: String,
    pub imports: Imports,
}

impl Call {
    fn plain(src: &str) -> Self {
        Self {
            src: src.to_string(),
            imports: Imports::default(),
        }
    }
}

/// A single translation rule.
pub struct Rule {
    /// Client API the rule renders, used in error reports.
    pub name: &'static str,
    pattern: Regex,
    render: fn(&str) -> Result<Call>,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, render: fn(&str) -> Result<Call>) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            render,
        }
    }

    /// Returns true when the command has the shape this rule handles.
    pub fn matches(&self, command: &str) -> bool {
        self.pattern.is_match(command)
    }

    /// Render the command as a Go call. Only meaningful after [`Rule::matches`].
    pub fn render(&self, command: &str) -> Result<Call> {
        (self.render)(command)
    }
}

/// The rule registry, in priority order.
pub static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new("Info", r"^GET /\s*$", render_info),
        Rule::new("Cat.Health", r"^GET /?_cat/health\?v", render_cat_health),
        Rule::new("Cluster.PutSettings", r"^PUT /?_cluster/settings", render_cluster_put_settings),
        Rule::new("Index", r"^(?:PUT|POST) /?\w+/(?:_doc|_create)\b", render_document_write),
        Rule::new("Indices.Create", r"^PUT /?[^\s/?]+/?(?:[\s?]|$)", render_indices_create),
        Rule::new("Get", r"^GET /?\w+/(?:_doc|_source)/\w+", render_get),
        Rule::new("Exists", r"^HEAD /?\w+/(?:_doc|_source)/\w+", render_exists),
        Rule::new("Delete", r"^DELETE /?\w+/_doc/\w+", render_delete),
        Rule::new("Search", r"^GET /?(?:[^\s/?]+/)?_search/?(?:[\s?]|$)", render_search),
    ]
});

/// Find the first rule whose recognizer matches the command.
pub fn find_rule(command: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(command))
}

// -- Strict extraction patterns -------------------------------------------------

static RE_CLUSTER_SETTINGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^PUT /?_cluster/settings\s+(?P<body>\S.*?)\s*$").unwrap());

static RE_DOCUMENT_WRITE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)^(?:PUT|POST) /?(?P<index>\w+)/(?P<api>_doc|_create)",
        r"(?:/(?P<id>\w+))?(?P<params>/?\?\S*)?\s+(?P<body>\S.*?)\s*$"
    ))
    .unwrap()
});

static RE_INDICES_CREATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^PUT /?(?P<index>[^\s/?]+)/?(?P<params>\?\S*)?(?:\s+(?P<body>\S.*?))?\s*$").unwrap()
});

static RE_GET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^GET /?(?P<index>\w+)/(?P<api>_doc|_source)/(?P<id>\w+)(?P<params>/?\?\S*)?\s*$")
        .unwrap()
});

static RE_EXISTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^HEAD /?(?P<index>\w+)/(?P<api>_doc|_source)/(?P<id>\w+)(?P<params>/?\?\S*)?\s*$")
        .unwrap()
});

static RE_DELETE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^DELETE /?(?P<index>\w+)/_doc/(?P<id>\w+)(?P<params>/?\?\S*)?\s*$").unwrap()
});

static RE_SEARCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)^GET /?(?:(?P<index>[^\s/?]+)/)?_search/?",
        r"(?P<params>\?\S*)?(?:\s+(?P<body>\S.*?))?\s*$"
    ))
    .unwrap()
});

// -- Helpers --------------------------------------------------------------------

fn extract<'t>(re: &Regex, command: &'t str, rule: &'static str) -> Result<Captures<'t>> {
    re.captures(command)
        .ok_or(TranslateError::ExtractionMismatch { rule })
}

/// A named group's text, or `None` when the group did not participate.
fn group<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    caps.name(name).map(|m| m.as_str())
}

/// A named group that must be present for the rule to render.
fn required<'t>(caps: &Captures<'t>, name: &str, rule: &'static str) -> Result<&'t str> {
    group(caps, name).ok_or(TranslateError::ExtractionMismatch { rule })
}

/// Builds a multi-line call, one argument per line.
struct CallWriter {
    src: String,
    imports: Imports,
}

impl CallWriter {
    fn new(api: &str) -> Self {
        Self {
            src: format!("\tres, err := es.{api}(\n"),
            imports: Imports::default(),
        }
    }

    fn arg(&mut self, value: &str) {
        self.src.push_str(&format!("{ARG_INDENT}{value},\n"));
    }

    fn quoted(&mut self, value: &str) {
        self.arg(&go_quote(value));
    }

    /// A body as a `strings.NewReader` literal, optionally wrapped in an option call.
    fn body(&mut self, raw: &str, option: Option<&str>) -> Result<()> {
        let reader = body_to_reader(raw)?;
        self.imports.strings = true;
        match option {
            Some(option) => self.arg(&format!("{option}({reader})")),
            None => self.arg(&reader),
        }
        Ok(())
    }

    /// Converted query parameters, if the command has any.
    fn params(&mut self, api: &str, raw: Option<&str>) -> Result<()> {
        if let Some(raw) = raw {
            let params = query_to_params(raw)?;
            self.src.push_str(&params_to_arguments(api, &params)?);
            self.imports.time |= params.contains_key(DURATION_PARAM);
        }
        Ok(())
    }

    fn pretty(&mut self, api: &str) {
        self.arg(&format!("es.{api}.WithPretty()"));
    }

    fn finish(mut self) -> Call {
        self.src.push_str("\t)");
        Call {
            src: self.src,
            imports: self.imports,
        }
    }
}

// -- Renderers ------------------------------------------------------------------

fn render_info(_command: &str) -> Result<Call> {
    Ok(Call::plain("\tres, err := es.Info()"))
}

fn render_cat_health(_command: &str) -> Result<Call> {
    Ok(Call::plain("\tres, err := es.Cat.Health(es.Cat.Health.WithV(true))"))
}

fn render_cluster_put_settings(command: &str) -> Result<Call> {
    const RULE: &str = "Cluster.PutSettings";
    let caps = extract(&RE_CLUSTER_SETTINGS, command, RULE)?;

    let mut call = CallWriter::new(RULE);
    call.body(required(&caps, "body", RULE)?, None)?;
    Ok(call.finish())
}

/// `PUT|POST /<index>/_doc[/<id>]` → `es.Index`, `/<index>/_create/<id>` → `es.Create`.
fn render_document_write(command: &str) -> Result<Call> {
    const RULE: &str = "Index";
    let caps = extract(&RE_DOCUMENT_WRITE, command, RULE)?;
    let index = required(&caps, "index", RULE)?;
    let id = group(&caps, "id");
    let body = required(&caps, "body", RULE)?;

    let (api, mut call) = match required(&caps, "api", RULE)? {
        "_create" => {
            let id = id.ok_or(TranslateError::ExtractionMismatch { rule: "Create" })?;
            let mut call = CallWriter::new("Create");
            call.quoted(index);
            call.quoted(id);
            call.body(body, None)?;
            ("Create", call)
        }
        _ => {
            let mut call = CallWriter::new("Index");
            call.quoted(index);
            call.body(body, None)?;
            if let Some(id) = id {
                call.arg(&format!("es.Index.WithDocumentID({})", go_quote(id)));
            }
            ("Index", call)
        }
    };

    call.params(api, group(&caps, "params"))?;
    call.pretty(api);
    Ok(call.finish())
}

fn render_indices_create(command: &str) -> Result<Call> {
    const RULE: &str = "Indices.Create";
    let caps = extract(&RE_INDICES_CREATE, command, RULE)?;
    let index = required(&caps, "index", RULE)?;
    let params = group(&caps, "params");
    let body = group(&caps, "body");

    if params.is_none() && body.is_none() {
        return Ok(Call::plain(&format!("\tres, err := es.Indices.Create({})", go_quote(index))));
    }

    let mut call = CallWriter::new(RULE);
    call.quoted(index);
    if let Some(body) = body {
        call.body(body, Some("es.Indices.Create.WithBody"))?;
    }
    call.params(RULE, params)?;
    Ok(call.finish())
}

/// Shared renderer for `<index>/<id>` calls without a body: Get, Exists, Delete.
fn render_document_call(api: &str, index: &str, id: &str, params: Option<&str>) -> Result<Call> {
    if params.is_none() {
        return Ok(Call::plain(&format!(
            "\tres, err := es.{api}({}, {}, es.{api}.WithPretty())",
            go_quote(index),
            go_quote(id)
        )));
    }

    let mut call = CallWriter::new(api);
    call.quoted(index);
    call.quoted(id);
    call.params(api, params)?;
    call.pretty(api);
    Ok(call.finish())
}

/// Render a document read, choosing the API by the `_doc`/`_source` segment.
fn render_document_read(command: &str, re: &Regex, rule: &'static str, apis: (&str, &str)) -> Result<Call> {
    let caps = extract(re, command, rule)?;
    let api = match required(&caps, "api", rule)? {
        "_source" => apis.1,
        _ => apis.0,
    };
    render_document_call(
        api,
        required(&caps, "index", rule)?,
        required(&caps, "id", rule)?,
        group(&caps, "params"),
    )
}

fn render_get(command: &str) -> Result<Call> {
    render_document_read(command, &RE_GET, "Get", ("Get", "GetSource"))
}

fn render_exists(command: &str) -> Result<Call> {
    render_document_read(command, &RE_EXISTS, "Exists", ("Exists", "ExistsSource"))
}

fn render_delete(command: &str) -> Result<Call> {
    const RULE: &str = "Delete";
    let caps = extract(&RE_DELETE, command, RULE)?;
    render_document_call(
        RULE,
        required(&caps, "index", RULE)?,
        required(&caps, "id", RULE)?,
        group(&caps, "params"),
    )
}

fn render_search(command: &str) -> Result<Call> {
    const RULE: &str = "Search";
    let caps = extract(&RE_SEARCH, command, RULE)?;

    let mut call = CallWriter::new(RULE);
    if let Some(index) = group(&caps, "index") {
        call.arg(&format!("es.Search.WithIndex({})", go_quote(index)));
    }
    if let Some(body) = group(&caps, "body") {
        call.body(body, Some("es.Search.WithBody"))?;
    }
    call.params(RULE, group(&caps, "params"))?;
    call.pretty(RULE);
    Ok(call.finish())
}
