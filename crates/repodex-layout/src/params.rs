//! Rendering of indexer parameter files and document templates.
//!
//! The parameter file is the contract with the external indexer: UTF-8 XML
//! rooted at `<parameters>`, children in the order `index`, `corpus`, the
//! optional tuning block (`memory`, `stemmer`, `normalize`, `stopper`), then
//! `metadata` with the fixed lifecycle fields followed by the per-kind
//! schema fields. All configured values are lowercased on the way out.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::{CorpusConfig, IndexConfig};
use crate::error::{LayoutError, LayoutResult};

/// Fixed read-only system fields every parameter file lists.
const SYSTEM_FIELDS: [&str; 8] = [
    "odmver", "schver", "kind", "basetime", "maxareas", "maxcats", "offset", "app",
];

/// Fixed read-write application fields, appended after the system fields.
const APPLICATION_FIELDS: [&str; 2] = ["docno", "docver"];

/// Render the parameter file for `kind` from `config`.
///
/// Pure: validates the configuration and produces the XML bytes without
/// touching the filesystem, so a misconfiguration can never leave a partial
/// file behind.
pub(crate) fn render_params(config: &IndexConfig, kind: &str) -> LayoutResult<Vec<u8>> {
    let indexer = &config.indexer;
    if indexer.path.is_empty() {
        return Err(LayoutError::MissingIndexPath);
    }
    let corpus = match &indexer.corpus {
        Some(corpus) if *corpus != CorpusConfig::default() => corpus,
        _ => return Err(LayoutError::MissingCorpusConfig),
    };
    let fields = usable_fields(config, kind)?;

    let mut xml = XmlBuilder::new();
    xml.start("parameters")?;

    xml.text_element("index", &indexer.path.to_lowercase())?;

    xml.start("corpus")?;
    if !corpus.path.is_empty() {
        xml.text_element("path", &corpus.path.to_lowercase())?;
    }
    if !corpus.class.is_empty() {
        xml.text_element("class", &corpus.class.to_lowercase())?;
    }
    if !corpus.metadata.is_empty() {
        xml.text_element("metadata", &corpus.metadata.to_lowercase())?;
    }
    xml.end("corpus")?;

    xml.comment(" optional index parameters ")?;
    if let Some(memory) = &indexer.memory {
        xml.text_element("memory", &memory.to_lowercase())?;
    }
    if let Some(stemmer) = &indexer.stemmer {
        xml.start("stemmer")?;
        xml.text_element("name", &stemmer.to_lowercase())?;
        xml.end("stemmer")?;
    }
    xml.text_element("normalize", if indexer.normalize { "true" } else { "false" })?;
    if !indexer.stopper.is_empty() {
        xml.start("stopper")?;
        for word in &indexer.stopper {
            xml.text_element("word", &word.to_lowercase())?;
        }
        xml.end("stopper")?;
    }

    xml.start("metadata")?;
    xml.comment(" read-only life-cycle [system] metadata fields ")?;
    for field in SYSTEM_FIELDS {
        xml.text_element("forward", field)?;
    }
    xml.comment(" read-write life-cycle [document] metadata fields ")?;
    for field in APPLICATION_FIELDS {
        xml.text_element("forward", field)?;
    }
    for field in SYSTEM_FIELDS.iter().chain(APPLICATION_FIELDS.iter()) {
        xml.text_element("backward", field)?;
    }
    for field in SYSTEM_FIELDS.iter().chain(APPLICATION_FIELDS.iter()) {
        xml.field(field)?;
    }
    xml.comment(" start of [document] kind specific metadata fields ")?;
    xml.field(&kind.to_lowercase())?;
    for field in fields {
        xml.field(&field.to_lowercase())?;
    }
    xml.end("metadata")?;

    xml.end("parameters")?;
    Ok(xml.finish())
}

/// Render an empty document template for `kind`: a root element named after
/// the kind with one empty child per configured field.
pub(crate) fn render_doc_template(config: &IndexConfig, kind: &str) -> LayoutResult<String> {
    let fields = usable_fields(config, kind)?;

    let mut xml = XmlBuilder::new();
    xml.start(kind)?;
    for field in fields {
        xml.empty(&field.to_lowercase())?;
    }
    xml.end(kind)?;

    String::from_utf8(xml.finish()).map_err(|e| LayoutError::Xml(e.to_string()))
}

/// The non-empty configured field names for `kind`.
fn usable_fields<'a>(config: &'a IndexConfig, kind: &str) -> LayoutResult<Vec<&'a str>> {
    let fields: Vec<&str> = config
        .kind_fields(kind)
        .unwrap_or_default()
        .iter()
        .filter(|f| !f.is_empty())
        .map(String::as_str)
        .collect();
    if fields.is_empty() {
        return Err(LayoutError::KindNotConfigured(kind.to_string()));
    }
    Ok(fields)
}

/// Thin wrapper over the event writer with two-space indentation.
struct XmlBuilder {
    writer: Writer<Vec<u8>>,
}

impl XmlBuilder {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn start(&mut self, name: &str) -> LayoutResult<()> {
        self.emit(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> LayoutResult<()> {
        self.emit(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str) -> LayoutResult<()> {
        self.emit(Event::Empty(BytesStart::new(name)))
    }

    fn text_element(&mut self, name: &str, value: &str) -> LayoutResult<()> {
        self.start(name)?;
        self.emit(Event::Text(BytesText::new(value)))?;
        self.end(name)
    }

    fn comment(&mut self, text: &str) -> LayoutResult<()> {
        self.emit(Event::Comment(BytesText::new(text)))
    }

    fn field(&mut self, name: &str) -> LayoutResult<()> {
        self.start("field")?;
        self.text_element("name", name)?;
        self.end("field")
    }

    fn emit(&mut self, event: Event<'_>) -> LayoutResult<()> {
        self.writer
            .write_event(event)
            .map_err(|e| LayoutError::Xml(e.to_string()))
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}
