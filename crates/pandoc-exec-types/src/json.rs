/*
 * json.rs
 * Copyright (c) 2025 pandoc-exec contributors
 *
 * Pandoc JSON wire format: reading and writing.
 */

//! Pandoc JSON reader and writer.
//!
//! Pandoc encodes AST nodes as `{"t": "Kind", "c": content}` objects.
//! The reader converts the node kinds the filter models into typed
//! structures and keeps every other node as [`Block::Opaque`] /
//! [`Inline::Opaque`] raw JSON, so a document containing arbitrary
//! pandoc nodes survives a filter pass structurally unchanged.

use hashlink::LinkedHashMap;
use serde_json::{Value, json};

use crate::attr::Attr;
use crate::block::{Block, CodeBlock, Div, Para, Plain, RawBlock};
use crate::inline::{Code, Emph, Inline, RawInline};
use crate::meta::{Meta, MetaValue};
use crate::pandoc::Pandoc;

#[derive(Debug)]
pub enum JsonReadError {
    InvalidJson(serde_json::Error),
    MissingField(String),
    InvalidType(String),
}

impl std::fmt::Display for JsonReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonReadError::InvalidJson(e) => write!(f, "Invalid JSON: {}", e),
            JsonReadError::MissingField(field) => write!(f, "Missing required field: {}", field),
            JsonReadError::InvalidType(msg) => write!(f, "Invalid type: {}", msg),
        }
    }
}

impl std::error::Error for JsonReadError {}

type Result<T> = std::result::Result<T, JsonReadError>;

fn invalid(msg: impl Into<String>) -> JsonReadError {
    JsonReadError::InvalidType(msg.into())
}

// ============================================================================
// Reading
// ============================================================================

/// Parse a pandoc JSON document.
pub fn read(input: &str) -> Result<Pandoc> {
    let mut root: Value = serde_json::from_str(input).map_err(JsonReadError::InvalidJson)?;

    let api_version = root
        .get_mut("pandoc-api-version")
        .map(Value::take)
        .ok_or_else(|| JsonReadError::MissingField("pandoc-api-version".to_string()))?;
    let api_version: Vec<u64> = serde_json::from_value(api_version)
        .map_err(|_| invalid("pandoc-api-version must be an integer array"))?;

    let meta = match root.get_mut("meta").map(Value::take) {
        Some(Value::Object(map)) => {
            let mut meta = Meta::new();
            for (key, value) in map {
                meta.insert(key, meta_value_from_json(value)?);
            }
            meta
        }
        Some(_) => return Err(invalid("meta must be an object")),
        None => return Err(JsonReadError::MissingField("meta".to_string())),
    };

    let blocks = match root.get_mut("blocks").map(Value::take) {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(block_from_json)
            .collect::<Result<Vec<Block>>>()?,
        Some(_) => return Err(invalid("blocks must be an array")),
        None => return Err(JsonReadError::MissingField("blocks".to_string())),
    };

    Ok(Pandoc {
        api_version,
        meta,
        blocks,
    })
}

fn block_from_json(value: Value) -> Result<Block> {
    let Some(tag) = value.get("t").and_then(Value::as_str) else {
        // Untagged values never come out of pandoc, but a filter must
        // not destroy what it does not understand.
        return Ok(Block::Opaque(value));
    };

    match tag {
        "CodeBlock" => {
            let content = content_array(&value, 2)?;
            Ok(Block::CodeBlock(CodeBlock {
                attr: attr_from_json(&content[0])?,
                text: string_from_json(&content[1], "CodeBlock text")?,
            }))
        }
        "Para" => Ok(Block::Para(Para {
            content: inlines_from_json(content_value(&value)?)?,
        })),
        "Plain" => Ok(Block::Plain(Plain {
            content: inlines_from_json(content_value(&value)?)?,
        })),
        "RawBlock" => {
            let content = content_array(&value, 2)?;
            Ok(Block::RawBlock(RawBlock {
                format: string_from_json(&content[0], "RawBlock format")?,
                text: string_from_json(&content[1], "RawBlock text")?,
            }))
        }
        "Div" => {
            let content = content_array(&value, 2)?;
            let attr = attr_from_json(&content[0])?;
            let inner = content[1]
                .as_array()
                .ok_or_else(|| invalid("Div content must be an array"))?
                .iter()
                .cloned()
                .map(block_from_json)
                .collect::<Result<Vec<Block>>>()?;
            Ok(Block::Div(Div {
                attr,
                content: inner,
            }))
        }
        _ => Ok(Block::Opaque(value)),
    }
}

fn inline_from_json(value: Value) -> Result<Inline> {
    let Some(tag) = value.get("t").and_then(Value::as_str) else {
        return Ok(Inline::Opaque(value));
    };

    match tag {
        "Str" => Ok(Inline::Str(string_from_json(
            content_value(&value)?,
            "Str text",
        )?)),
        "Space" => Ok(Inline::Space),
        "Emph" => Ok(Inline::Emph(Emph {
            content: inlines_from_json(content_value(&value)?)?,
        })),
        "Code" => {
            let content = content_array(&value, 2)?;
            Ok(Inline::Code(Code {
                attr: attr_from_json(&content[0])?,
                text: string_from_json(&content[1], "Code text")?,
            }))
        }
        "RawInline" => {
            let content = content_array(&value, 2)?;
            Ok(Inline::RawInline(RawInline {
                format: string_from_json(&content[0], "RawInline format")?,
                text: string_from_json(&content[1], "RawInline text")?,
            }))
        }
        _ => Ok(Inline::Opaque(value)),
    }
}

fn meta_value_from_json(value: Value) -> Result<MetaValue> {
    let tag = value
        .get("t")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("meta value must be a tagged object"))?;

    match tag {
        "MetaString" => Ok(MetaValue::MetaString(string_from_json(
            content_value(&value)?,
            "MetaString",
        )?)),
        "MetaBool" => Ok(MetaValue::MetaBool(
            content_value(&value)?
                .as_bool()
                .ok_or_else(|| invalid("MetaBool content must be a boolean"))?,
        )),
        "MetaInlines" => Ok(MetaValue::MetaInlines(inlines_from_json(content_value(
            &value,
        )?)?)),
        "MetaBlocks" => {
            let items = content_value(&value)?
                .as_array()
                .ok_or_else(|| invalid("MetaBlocks content must be an array"))?;
            Ok(MetaValue::MetaBlocks(
                items
                    .iter()
                    .cloned()
                    .map(block_from_json)
                    .collect::<Result<Vec<Block>>>()?,
            ))
        }
        "MetaList" => {
            let items = content_value(&value)?
                .as_array()
                .ok_or_else(|| invalid("MetaList content must be an array"))?;
            Ok(MetaValue::MetaList(
                items
                    .iter()
                    .cloned()
                    .map(meta_value_from_json)
                    .collect::<Result<Vec<MetaValue>>>()?,
            ))
        }
        "MetaMap" => {
            let map = content_value(&value)?
                .as_object()
                .ok_or_else(|| invalid("MetaMap content must be an object"))?;
            let mut entries = LinkedHashMap::new();
            for (key, entry) in map {
                entries.insert(key.clone(), meta_value_from_json(entry.clone())?);
            }
            Ok(MetaValue::MetaMap(entries))
        }
        other => Err(invalid(format!("unsupported meta variant: {}", other))),
    }
}

fn inlines_from_json(value: &Value) -> Result<Vec<Inline>> {
    value
        .as_array()
        .ok_or_else(|| invalid("inline content must be an array"))?
        .iter()
        .cloned()
        .map(inline_from_json)
        .collect()
}

fn attr_from_json(value: &Value) -> Result<Attr> {
    let parts = value
        .as_array()
        .filter(|a| a.len() == 3)
        .ok_or_else(|| invalid("attr must be a 3-element array"))?;

    let id = string_from_json(&parts[0], "attr id")?;
    let classes = parts[1]
        .as_array()
        .ok_or_else(|| invalid("attr classes must be an array"))?
        .iter()
        .map(|c| string_from_json(c, "attr class"))
        .collect::<Result<Vec<String>>>()?;

    let mut kvs = LinkedHashMap::new();
    for pair in parts[2]
        .as_array()
        .ok_or_else(|| invalid("attr key-values must be an array"))?
    {
        let pair = pair
            .as_array()
            .filter(|p| p.len() == 2)
            .ok_or_else(|| invalid("attr key-value must be a 2-element array"))?;
        kvs.insert(
            string_from_json(&pair[0], "attr key")?,
            string_from_json(&pair[1], "attr value")?,
        );
    }

    Ok((id, classes, kvs))
}

fn content_value(value: &Value) -> Result<&Value> {
    value
        .get("c")
        .ok_or_else(|| JsonReadError::MissingField("c".to_string()))
}

fn content_array(value: &Value, len: usize) -> Result<&Vec<Value>> {
    content_value(value)?
        .as_array()
        .filter(|a| a.len() == len)
        .ok_or_else(|| invalid(format!("node content must be a {}-element array", len)))
}

fn string_from_json(value: &Value, what: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(format!("{} must be a string", what)))
}

// ============================================================================
// Writing
// ============================================================================

/// Serialize a document back to pandoc JSON.
pub fn write(doc: &Pandoc) -> Value {
    let meta: serde_json::Map<String, Value> = doc
        .meta
        .iter()
        .map(|(k, v)| (k.clone(), meta_value_to_json(v)))
        .collect();

    json!({
        "pandoc-api-version": doc.api_version,
        "meta": meta,
        "blocks": doc.blocks.iter().map(block_to_json).collect::<Vec<Value>>(),
    })
}

pub fn write_string(doc: &Pandoc) -> String {
    write(doc).to_string()
}

fn block_to_json(block: &Block) -> Value {
    match block {
        Block::CodeBlock(cb) => json!({"t": "CodeBlock", "c": [attr_to_json(&cb.attr), cb.text]}),
        Block::Para(p) => json!({"t": "Para", "c": inlines_to_json(&p.content)}),
        Block::Plain(p) => json!({"t": "Plain", "c": inlines_to_json(&p.content)}),
        Block::RawBlock(r) => json!({"t": "RawBlock", "c": [r.format, r.text]}),
        Block::Div(d) => json!({
            "t": "Div",
            "c": [attr_to_json(&d.attr), d.content.iter().map(block_to_json).collect::<Vec<Value>>()],
        }),
        Block::Opaque(v) => v.clone(),
    }
}

fn inline_to_json(inline: &Inline) -> Value {
    match inline {
        Inline::Str(s) => json!({"t": "Str", "c": s}),
        Inline::Space => json!({"t": "Space"}),
        Inline::Emph(e) => json!({"t": "Emph", "c": inlines_to_json(&e.content)}),
        Inline::Code(c) => json!({"t": "Code", "c": [attr_to_json(&c.attr), c.text]}),
        Inline::RawInline(r) => json!({"t": "RawInline", "c": [r.format, r.text]}),
        Inline::Opaque(v) => v.clone(),
    }
}

fn inlines_to_json(inlines: &[Inline]) -> Vec<Value> {
    inlines.iter().map(inline_to_json).collect()
}

fn attr_to_json(attr: &Attr) -> Value {
    let kvs: Vec<Value> = attr.2.iter().map(|(k, v)| json!([k, v])).collect();
    json!([attr.0, attr.1, kvs])
}

fn meta_value_to_json(value: &MetaValue) -> Value {
    match value {
        MetaValue::MetaString(s) => json!({"t": "MetaString", "c": s}),
        MetaValue::MetaBool(b) => json!({"t": "MetaBool", "c": b}),
        MetaValue::MetaInlines(inlines) => {
            json!({"t": "MetaInlines", "c": inlines_to_json(inlines)})
        }
        MetaValue::MetaBlocks(blocks) => json!({
            "t": "MetaBlocks",
            "c": blocks.iter().map(block_to_json).collect::<Vec<Value>>(),
        }),
        MetaValue::MetaList(items) => json!({
            "t": "MetaList",
            "c": items.iter().map(meta_value_to_json).collect::<Vec<Value>>(),
        }),
        MetaValue::MetaMap(map) => {
            let entries: serde_json::Map<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), meta_value_to_json(v)))
                .collect();
            json!({"t": "MetaMap", "c": entries})
        }
    }
}
