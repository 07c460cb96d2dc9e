mod builder;

use crate::{
    bpmn::Namespace,
    document::Document,
    error::{
        EXTRA_ROOT_ELEMENT, Error, MISPLACED_DECLARATION, NO_ROOT_ELEMENT, TEXT_OUTSIDE_ROOT,
        UNCLOSED_ELEMENT,
    },
};
use builder::DocumentBuilder;
use quick_xml::{
    NsReader,
    escape::resolve_predefined_entity,
    events::{BytesRef, BytesStart, Event},
    name::{QName, ResolveResult},
};

pub(super) fn read_document(mut reader: NsReader<&[u8]>) -> Result<Document, Error> {
    reader.config_mut().trim_text(true);

    let mut builder = DocumentBuilder::default();
    let mut entities: Vec<String> = Vec::new();
    let mut first_event = true;
    loop {
        let read = reader
            .read_resolved_event()
            .map(|(resolved, event)| (resolve(resolved), event));
        let (namespace, event) = match read {
            Ok(value) => value,
            Err(err) => return Err(Error::malformed(err.to_string(), reader.error_position())),
        };
        let position = reader.buffer_position();

        match event {
            Event::Start(bs) | Event::Empty(bs) if builder.root_closed() => {
                return Err(Error::malformed(
                    format!("{EXTRA_ROOT_ELEMENT}: <{}>", local_name(&bs)),
                    position,
                ));
            }
            Event::Start(bs) => {
                check_element(&reader, &bs, &entities, position)?;
                let namespace = namespace.map_err(|msg| Error::malformed(msg, position))?;
                builder.open(namespace, local_name(&bs));
            }
            Event::Empty(bs) => {
                check_element(&reader, &bs, &entities, position)?;
                let namespace = namespace.map_err(|msg| Error::malformed(msg, position))?;
                builder.leaf(namespace, local_name(&bs));
            }
            Event::End(_) => builder.close(),
            Event::Text(_) | Event::CData(_) | Event::GeneralRef(_) if builder.depth() == 0 => {
                return Err(Error::malformed(TEXT_OUTSIDE_ROOT, position));
            }
            Event::GeneralRef(reference) => check_reference(&reference, &entities, position)?,
            Event::Decl(_) if !first_event => {
                return Err(Error::malformed(MISPLACED_DECLARATION, position));
            }
            Event::DocType(doctype) => entities = declared_entities(&doctype),
            Event::Eof => break,
            _ => {}
        }
        first_event = false;
    }

    let position = reader.buffer_position();
    if builder.depth() > 0 {
        return Err(Error::malformed(UNCLOSED_ELEMENT, position));
    }
    if !builder.root_closed() {
        return Err(Error::malformed(NO_ROOT_ELEMENT, position));
    }
    Ok(builder.into())
}

fn local_name(bs: &BytesStart) -> String {
    String::from_utf8_lossy(bs.local_name().as_ref()).into_owned()
}

// Undeclared prefixes make the document ill-formed.
fn resolve(resolved: ResolveResult) -> Result<Namespace, String> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Namespace::from(ns.as_ref())),
        ResolveResult::Unbound => Ok(Namespace::Foreign),
        ResolveResult::Unknown(prefix) => Err(undefined_prefix(&prefix)),
    }
}

fn undefined_prefix(prefix: &[u8]) -> String {
    format!(
        "namespace prefix '{}' is not defined",
        String::from_utf8_lossy(prefix)
    )
}

// Both the qualified name and the part after the prefix must start like an XML name.
fn check_name(name: QName, position: u64) -> Result<(), Error> {
    let starts_like_name = |bytes: &[u8]| bytes.first().is_some_and(|&b| is_name_start(b));
    if starts_like_name(name.as_ref()) && starts_like_name(name.local_name().as_ref()) {
        return Ok(());
    }
    Err(Error::malformed(
        format!("invalid name '{}'", String::from_utf8_lossy(name.as_ref())),
        position,
    ))
}

fn is_name_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte == b':' || !byte.is_ascii()
}

// Attributes are parsed lazily by quick-xml. Walk them once so duplicates,
// broken quoting, unknown references and undeclared prefixes are reported.
fn check_element(
    reader: &NsReader<&[u8]>,
    bs: &BytesStart,
    entities: &[String],
    position: u64,
) -> Result<(), Error> {
    check_name(bs.name(), position)?;
    for attribute in bs.attributes() {
        let attribute = attribute.map_err(|err| Error::malformed(err.to_string(), position))?;
        check_name(attribute.key, position)?;
        if let (ResolveResult::Unknown(prefix), _) = reader.resolve_attribute(attribute.key) {
            return Err(Error::malformed(undefined_prefix(&prefix), position));
        }
        attribute
            .decode_and_unescape_value_with(reader.decoder(), |name| declared(entities, name))
            .map_err(|err| Error::malformed(err.to_string(), position))?;
    }
    Ok(())
}

// Character references, the five predefined entities and entities declared in
// the DOCTYPE are accepted.
fn check_reference(reference: &BytesRef, entities: &[String], position: u64) -> Result<(), Error> {
    let malformed = |message: String| Error::malformed(message, position);
    if reference
        .resolve_char_ref()
        .map_err(|err| malformed(err.to_string()))?
        .is_some()
    {
        return Ok(());
    }
    let name = reference.decode().map_err(|err| malformed(err.to_string()))?;
    if resolve_predefined_entity(&name).is_some() || declared(entities, &name).is_some() {
        return Ok(());
    }
    Err(malformed(format!("entity '{name}' is not defined")))
}

fn declared(entities: &[String], name: &str) -> Option<&'static str> {
    entities.iter().any(|entity| entity == name).then_some("")
}

// General entity names from `<!ENTITY name ...>` declarations. Parameter
// entities (`<!ENTITY % name ...>`) cannot appear in content.
fn declared_entities(doctype: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(doctype)
        .split("<!ENTITY")
        .skip(1)
        .map(str::trim_start)
        .filter(|declaration| !declaration.starts_with('%'))
        .filter_map(|declaration| declaration.split_whitespace().next())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    fn read(text: &str) -> Result<Document> {
        read_document(NsReader::from_str(text))
    }

    fn assert_malformed(text: &str) {
        match read(text) {
            Err(Error::MalformedInput { .. }) => {}
            other => panic!("expected malformed input for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn empty_input() {
        assert_malformed("");
        assert_malformed("   \n\t");
    }

    #[test]
    fn declaration_only() {
        assert_malformed(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    }

    #[test]
    fn mismatched_end_tag() {
        assert_malformed("<a><b></a></b>");
    }

    #[test]
    fn unclosed_root() {
        assert_malformed("<definitions><process>");
    }

    #[test]
    fn two_roots() {
        assert_malformed("<a/><b/>");
    }

    #[test]
    fn text_before_root() {
        assert_malformed("hello <a/>");
    }

    #[test]
    fn undefined_prefix() {
        assert_malformed("<bpmn:definitions/>");
    }

    #[test]
    fn duplicate_attribute() {
        assert_malformed(r#"<a id="1" id="2"/>"#);
    }

    #[test]
    fn undefined_entity_in_text() {
        assert_malformed("<a>&bogus;</a>");
    }

    #[test]
    fn undefined_entity_in_attribute() {
        assert_malformed(r#"<a name="&bogus;"/>"#);
    }

    #[test]
    fn raw_ampersand_in_attribute() {
        assert_malformed(r#"<a name="this & that"/>"#);
    }

    #[test]
    fn undefined_attribute_prefix() {
        assert_malformed(r#"<a x:y="1"/>"#);
    }

    #[test]
    fn invalid_element_names() {
        assert_malformed("<1process/>");
        assert_malformed("<a><-b/></a>");
        assert_malformed(r#"<a xmlns:p="urn:p"><p:1b/></a>"#);
        assert_malformed(r#"<a 1x="1"/>"#);
    }

    #[test]
    fn declaration_inside_root() {
        assert_malformed(r#"<a><?xml version="1.0"?></a>"#);
        assert_malformed(r#"<!-- first --><?xml version="1.0"?><a/>"#);
    }

    #[test]
    fn entity_reference_outside_root() {
        assert_malformed("<a/>&amp;");
    }

    #[test]
    fn known_references_are_accepted() -> Result<(), Box<dyn std::error::Error>> {
        let document = read(
            r#"<a name="&lt;&#65;&#x42;&quot;" xml:lang="en" xmlns:p="urn:p" p:b="1">&amp;&gt;&apos;&#169;</a>"#,
        )?;
        assert_eq!(document.len(), 1);
        Ok(())
    }

    #[test]
    fn doctype_entities_are_accepted() -> Result<(), Box<dyn std::error::Error>> {
        let document = read(
            r#"<?xml version="1.0"?>
<!DOCTYPE a [
  <!ENTITY company "ACME">
  <!ENTITY % hidden "x">
]>
<a name="&company;">&company;</a>"#,
        )?;
        assert_eq!(document.len(), 1);
        assert_malformed(r#"<!DOCTYPE a [<!ENTITY % hidden "x">]><a>&hidden;</a>"#);
        Ok(())
    }

    #[test]
    fn error_reports_position() {
        match read("<a><b></a>") {
            Err(Error::MalformedInput { position, .. }) => assert!(position > 0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn comments_and_declaration_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
        let document = read(
            r#"<?xml version="1.0"?>
<!-- generated -->
<root><child>text</child><![CDATA[raw]]></root>
<!-- trailing -->"#,
        )?;
        assert_eq!(document.len(), 2);
        Ok(())
    }
}
