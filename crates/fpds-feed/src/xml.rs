//! Convert an Atom feed document into nested JSON values.
//!
//! Elements become object keys, attributes become `@name` keys, text next
//! to attributes or children lands under `#text`, and repeated siblings
//! collect into arrays. Elements in the Atom and FPDS namespaces are keyed
//! by local name; any other namespace is kept as `<uri>:<local>`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use serde_json::{Map, Value};

use crate::types::{FeedError, FeedResult};

pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
pub const FPDS_NAMESPACE: &str = "http://www.fpdsng.com/FPDS";

const COLLAPSED_NAMESPACES: &[&str] = &[ATOM_NAMESPACE, FPDS_NAMESPACE];

struct Node {
    key: String,
    fields: Map<String, Value>,
    text: String,
}

/// Parse a feed document. Malformed XML is an error.
pub fn parse_feed(xml: &str) -> FeedResult<Value> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root = Map::new();

    loop {
        let (ns, event) = reader.read_resolved_event().map_err(xml_error)?;
        let namespace = namespace_uri(&ns);

        match event {
            Event::Start(e) => {
                let node = open_node(&reader, &e, namespace.as_deref())?;
                stack.push(node);
            }
            Event::Empty(e) => {
                let node = open_node(&reader, &e, namespace.as_deref())?;
                close_node(node, &mut stack, &mut root);
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| FeedError::Xml("unbalanced end tag".to_string()))?;
                close_node(node, &mut stack, &mut root);
            }
            Event::Text(e) => {
                if let Some(top) = stack.last_mut() {
                    let text = e.unescape().map_err(xml_error)?;
                    top.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(FeedError::Xml(format!("unclosed element <{}>", open.key)));
    }
    if root.is_empty() {
        return Err(FeedError::Xml("document has no root element".to_string()));
    }

    Ok(Value::Object(root))
}

fn xml_error(e: impl std::fmt::Display) -> FeedError {
    FeedError::Xml(e.to_string())
}

fn namespace_uri(ns: &ResolveResult) -> Option<String> {
    match ns {
        ResolveResult::Bound(uri) => Some(String::from_utf8_lossy(uri.as_ref()).into_owned()),
        _ => None,
    }
}

fn qualified(namespace: Option<&str>, local: &[u8]) -> String {
    let local = String::from_utf8_lossy(local).into_owned();
    match namespace {
        Some(uri) if !COLLAPSED_NAMESPACES.contains(&uri) => format!("{uri}:{local}"),
        _ => local,
    }
}

fn open_node(reader: &NsReader<&[u8]>, e: &BytesStart, namespace: Option<&str>) -> FeedResult<Node> {
    let mut fields = Map::new();

    for attr in e.attributes() {
        let attr = attr.map_err(xml_error)?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (ns, local) = reader.resolve_attribute(attr.key);
        let name = qualified(namespace_uri(&ns).as_deref(), local.as_ref());
        let value = attr.unescape_value().map_err(xml_error)?;
        fields.insert(format!("@{name}"), Value::String(value.into_owned()));
    }

    Ok(Node {
        key: qualified(namespace, e.local_name().as_ref()),
        fields,
        text: String::new(),
    })
}

fn close_node(node: Node, stack: &mut [Node], root: &mut Map<String, Value>) {
    let Node {
        key,
        mut fields,
        text,
    } = node;

    let value = if fields.is_empty() {
        if text.is_empty() {
            Value::Null
        } else {
            Value::String(text)
        }
    } else {
        if !text.is_empty() {
            fields.insert("#text".to_string(), Value::String(text));
        }
        Value::Object(fields)
    };

    let target = match stack.last_mut() {
        Some(parent) => &mut parent.fields,
        None => root,
    };
    insert_child(target, key, value);
}

fn insert_child(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}
